use std::io::{self, Write};

use chrono::Local;

use crate::analyzer::OutlineAnalysis;
use crate::config::{OutputFormat, ReportOptions};
use crate::outline::{percent, Chapter, ContentType, ExamRequirement, Importance, KnowledgePoint};

const RULE_WIDTH: usize = 80;

/// 千分位格式化，如 12345 -> "12,345"
fn group_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// 截取前 `max_chars` 个字符
fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

fn chapter_heading(chapter: Option<Chapter>) -> String {
    match chapter {
        Some(chapter) => format!("{} {}", chapter.label(), chapter.display_name()),
        None => "未分章".to_string(),
    }
}

/// 报告渲染器
///
/// 把分析结果写成控制台文本报告或 JSON
pub struct ReportRenderer<'a> {
    options: &'a ReportOptions,
}

impl<'a> ReportRenderer<'a> {
    pub fn new(options: &'a ReportOptions) -> Self {
        Self { options }
    }

    /// 按选项中的格式输出报告
    pub fn render<W: Write>(&self, analysis: &OutlineAnalysis, out: &mut W) -> io::Result<()> {
        match self.options.format {
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut *out, analysis)?;
                writeln!(out)
            }
            OutputFormat::Text => self.render_text(analysis, out),
        }
    }

    fn render_text<W: Write>(&self, analysis: &OutlineAnalysis, out: &mut W) -> io::Result<()> {
        if self.options.debug {
            self.write_debug_info(analysis, out)?;
        }

        self.write_header(out)?;
        self.write_basic_info(analysis, out)?;
        self.write_structure_info(analysis, out)?;
        self.write_knowledge_summary(analysis, out)?;
        self.write_chapter_details(analysis, out)?;
        self.write_question_summary(analysis, out)?;
        self.write_content_features(analysis, out)?;

        if self.options.show_knowledge_list() {
            self.write_knowledge_list(analysis, out)?;
        }

        self.write_footer(out)
    }

    /// 调试信息：文本样本 + 前若干个知识点的解析详情
    fn write_debug_info<W: Write>(&self, analysis: &OutlineAnalysis, out: &mut W) -> io::Result<()> {
        let rule = "=".repeat(RULE_WIDTH);
        let thin = "-".repeat(RULE_WIDTH);
        writeln!(out, "\n{}", rule)?;
        writeln!(out, "调试信息：前{}个知识点的详细解析", self.options.debug_limit)?;
        writeln!(out, "{}", rule)?;

        writeln!(out, "\n【文本提取样本】（前{}字符）", self.options.sample_chars)?;
        writeln!(out, "{}", thin)?;
        writeln!(out, "{}", truncate_chars(&analysis.text, self.options.sample_chars))?;
        writeln!(out, "{}", thin)?;
        writeln!(out, "\n总字符数: {}", analysis.basic_info.total_chars)?;
        writeln!(out, "总行数: {}", analysis.line_count)?;
        writeln!(out)?;

        let points = &analysis.knowledge_points;
        if points.is_empty() {
            writeln!(out, "\n⚠️  未提取到任何知识点！")?;
            writeln!(out, "请检查:")?;
            writeln!(out, "  1. 文本格式是否正确")?;
            writeln!(out, "  2. 是否包含 '知识点1', '知识点2' 等标记")?;
            writeln!(out, "  3. 使用 --save-text 参数保存提取的文本查看详情")?;
            writeln!(out)?;
        } else {
            for (i, kp) in points.iter().take(self.options.debug_limit).enumerate() {
                self.write_debug_point(i + 1, kp, out)?;
            }

            if points.len() > self.options.debug_limit {
                writeln!(
                    out,
                    "\n... 还有 {} 个知识点未显示",
                    points.len() - self.options.debug_limit
                )?;
            }
        }

        writeln!(out, "\n{}", rule)?;
        writeln!(out)
    }

    fn write_debug_point<W: Write>(&self, index: usize, kp: &KnowledgePoint, out: &mut W) -> io::Result<()> {
        let chapter = kp.chapter.map(|c| c.label()).unwrap_or("无");
        let importance = kp.importance.map(|i| i.stars()).unwrap_or("未找到");
        let requirements = if kp.exam_requirements.is_empty() {
            "无".to_string()
        } else {
            kp.exam_requirements
                .iter()
                .map(|r| r.label())
                .collect::<Vec<_>>()
                .join(", ")
        };

        writeln!(out, "\n知识点 {}:", index)?;
        writeln!(out, "  ID: {}", kp.id)?;
        writeln!(out, "  标题: {}", kp.title)?;
        writeln!(out, "  章节: {}", chapter)?;
        writeln!(out, "  重要程度: {}", importance)?;
        writeln!(out, "  考核要求: {}", requirements)?;
        writeln!(out, "  内容行数: {}", kp.content.len())?;
        if let Some(first) = kp.content.first() {
            writeln!(out, "  首行内容: {}...", truncate_chars(first, 80))?;
        }
        Ok(())
    }

    fn write_header<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let rule = "=".repeat(RULE_WIDTH);
        writeln!(out, "\n{}", rule)?;
        writeln!(out, "《中国近现代史纲要》规划卡综合分析报告")?;
        writeln!(out, "{}", rule)?;
        writeln!(out)
    }

    fn write_basic_info<W: Write>(&self, analysis: &OutlineAnalysis, out: &mut W) -> io::Result<()> {
        let info = &analysis.basic_info;
        writeln!(out, "【一、文档基本信息】")?;
        writeln!(out, "  总字符数: {} 字符", group_thousands(info.total_chars))?;
        writeln!(out, "  有效字数: 约 {} 字", group_thousands(info.total_chars_no_space))?;
        if let Some(last) = info.pages.last() {
            writeln!(
                out,
                "  文档页数: {} 页 (第1页 - 第{}页)",
                info.page_count, last
            )?;
        }
        writeln!(out)
    }

    fn write_structure_info<W: Write>(&self, analysis: &OutlineAnalysis, out: &mut W) -> io::Result<()> {
        writeln!(out, "【二、文档结构层次】")?;
        writeln!(out, "  章节总数: {} 章", Chapter::ALL.len())?;
        writeln!(out, "    ├─ 导言: 1 章")?;
        writeln!(out, "    └─ 正文: {} 章", Chapter::ALL.len() - 1)?;
        writeln!(out, "  小节总数: {} 节", analysis.structure.total_sections)?;
        writeln!(out, "  知识点数: {} 个", analysis.knowledge.total)?;
        writeln!(out)
    }

    fn write_knowledge_summary<W: Write>(&self, analysis: &OutlineAnalysis, out: &mut W) -> io::Result<()> {
        let knowledge = &analysis.knowledge;
        let total = knowledge.total;
        writeln!(out, "【三、知识点分布概况】")?;
        writeln!(out, "  总计: {} 个知识点", total)?;
        writeln!(out)?;

        writeln!(out, "  重要程度分布:")?;
        let mut levels: Vec<(&str, &str, usize)> = Importance::ALL
            .iter()
            .map(|&level| (level.stars(), level.description(), knowledge.by_importance.get(level)))
            .collect();
        levels.push(("未标注", "未标注", knowledge.by_importance.unmarked));
        for (level, desc, count) in levels.into_iter().filter(|(_, _, count)| *count > 0) {
            writeln!(
                out,
                "    {:6} ({:8}): {:3} 个 ({:5.1}%)",
                level,
                desc,
                count,
                percent(count, total)
            )?;
        }
        writeln!(out)?;

        writeln!(out, "  考核要求分布:")?;
        let mut requirements: Vec<(&str, usize)> = ExamRequirement::ALL
            .iter()
            .map(|&req| (req.label(), knowledge.by_exam.get(req)))
            .collect();
        requirements.push(("综合", knowledge.by_exam.combined));
        requirements.push(("未标注", knowledge.by_exam.unmarked));
        for (req, count) in requirements.into_iter().filter(|(_, count)| *count > 0) {
            writeln!(out, "    {:6}: {:3} 个 ({:5.1}%)", req, count, percent(count, total))?;
        }
        writeln!(out)
    }

    fn write_chapter_details<W: Write>(&self, analysis: &OutlineAnalysis, out: &mut W) -> io::Result<()> {
        writeln!(out, "【四、各章节详细分析】")?;
        for chapter in Chapter::ALL {
            let Some(detail) = analysis.knowledge.chapter_details.get(&chapter) else {
                continue;
            };
            let sections = analysis.structure.chapter_sections.get(&chapter).copied().unwrap_or(0);
            let questions = analysis.questions.by_chapter.get(&chapter).copied().unwrap_or(0);
            let importance = |level: Importance| detail.importance.get(&level).copied().unwrap_or(0);
            let exam = |req: ExamRequirement| detail.exam_requirements.get(&req).copied().unwrap_or(0);

            writeln!(out, "\n  {}", chapter_heading(Some(chapter)))?;
            writeln!(out, "  {}", "─".repeat(76))?;
            writeln!(
                out,
                "    知识点: {} 个  |  小节: {} 节  |  测试题: {} 道",
                detail.total, sections, questions
            )?;
            writeln!(
                out,
                "    重要程度: ★★★ {:2}个  ★★ {:2}个  ★ {:2}个",
                importance(Importance::ThreeStar),
                importance(Importance::TwoStar),
                importance(Importance::OneStar)
            )?;
            writeln!(
                out,
                "    考核要求: 单选 {:2}个  简答 {:2}个  论述 {:2}个",
                exam(ExamRequirement::SingleChoice),
                exam(ExamRequirement::ShortAnswer),
                exam(ExamRequirement::Essay)
            )?;
        }
        writeln!(out)
    }

    fn write_question_summary<W: Write>(&self, analysis: &OutlineAnalysis, out: &mut W) -> io::Result<()> {
        let questions = &analysis.questions;
        writeln!(out, "【五、测试题统计】")?;
        writeln!(out, "  题目总数: {} 道", questions.total)?;
        writeln!(
            out,
            "    ├─ 真题: {} 道 ({:.1}%)",
            questions.real,
            questions.real_percent()
        )?;
        writeln!(
            out,
            "    └─ 模拟题: {} 道 ({:.1}%)",
            questions.mock,
            questions.mock_percent()
        )?;
        writeln!(out, "  配套答案: {} 个", questions.answers)?;
        writeln!(out, "  配套解析: {} 个", questions.explanations)?;
        writeln!(out, "  题型: 以单选题为主")?;
        writeln!(out)
    }

    fn write_content_features<W: Write>(&self, analysis: &OutlineAnalysis, out: &mut W) -> io::Result<()> {
        let content = &analysis.content;
        writeln!(out, "【六、内容特征分析】")?;
        writeln!(out, "  知识点平均长度: {:.0} 字符", content.avg_length)?;
        writeln!(out)?;

        writeln!(out, "  内容类型分布:")?;
        let total: usize = content.content_types.values().sum();
        for content_type in ContentType::ALL {
            let count = content.content_types.get(&content_type).copied().unwrap_or(0);
            if count > 0 {
                writeln!(
                    out,
                    "    {:8}: {:3} 个 ({:5.1}%)",
                    content_type.label(),
                    count,
                    percent(count, total)
                )?;
            }
        }
        writeln!(out)?;

        writeln!(out, "  文档特点:")?;
        writeln!(out, "    ✓ 每个知识点标注考核要求（单选/简答/论述）")?;
        writeln!(out, "    ✓ 每个知识点标注重要程度（★ ~ ★★★）")?;
        writeln!(out, "    ✓ 每章配有知识体系导图说明")?;
        writeln!(out, "    ✓ 每章附有考点练习（真题+模拟题）")?;
        writeln!(out, "    ✓ 包含【识记】【领会】【应用】三级能力要求")?;
        writeln!(out)
    }

    /// 按重要程度分组的知识点列表，组内按章节连续分段
    fn write_knowledge_list<W: Write>(&self, analysis: &OutlineAnalysis, out: &mut W) -> io::Result<()> {
        writeln!(out, "【七、知识点列表】")?;

        for level in Importance::ALL {
            let points: Vec<&KnowledgePoint> = analysis
                .knowledge_points
                .iter()
                .filter(|kp| kp.importance == Some(level))
                .collect();

            writeln!(
                out,
                "  （{} 级别）共 {} 个{}知识点",
                level.stars(),
                points.len(),
                level.tier()
            )?;

            if points.is_empty() {
                writeln!(out, "    （未找到{}级别知识点）", level.stars())?;
                writeln!(out)?;
                continue;
            }

            let mut current_chapter: Option<Option<Chapter>> = None;
            for (i, kp) in points.iter().take(self.options.list_limit).enumerate() {
                if current_chapter != Some(kp.chapter) {
                    if current_chapter.is_some() {
                        writeln!(out)?;
                    }
                    writeln!(out, "    ▸ {}", chapter_heading(kp.chapter))?;
                    current_chapter = Some(kp.chapter);
                }
                writeln!(out, "      {:2}. {}", i + 1, kp.title)?;
            }

            if points.len() > self.options.list_limit {
                writeln!(
                    out,
                    "\n      ... 还有 {} 个{}级别知识点",
                    points.len() - self.options.list_limit,
                    level.stars()
                )?;
            }
            writeln!(out)?;
        }

        Ok(())
    }

    fn write_footer<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let rule = "=".repeat(RULE_WIDTH);
        writeln!(out, "{}", rule)?;
        writeln!(out, "分析完成！生成时间: {}", Local::now().format("%Y-%m-%d %H:%M:%S"))?;
        writeln!(out, "{}", rule)
    }
}
