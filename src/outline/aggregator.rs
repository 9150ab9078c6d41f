use std::collections::{BTreeMap, BTreeSet};

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::chapter_detector::ChapterDetector;
use super::types::*;

/// 核心知识点列表的最大长度
const CORE_KNOWLEDGE_LIMIT: usize = 100;

/// 所有键初始化为 0 的计数表
fn zeroed<K: Ord + Copy>(keys: &[K]) -> BTreeMap<K, usize> {
    keys.iter().map(|&k| (k, 0)).collect()
}

fn contains_any(content: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| content.contains(k))
}

/// 百分比，分母为 0 时返回 0
pub fn percent(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64 * 100.0
    }
}

/// 文档基本信息
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicInfo {
    pub total_chars: usize,
    pub total_chars_no_space: usize,
    /// 去重并排序后的页码
    pub pages: Vec<u64>,
    pub page_count: usize,
}

/// 文档结构统计
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructureStats {
    pub total_sections: usize,
    pub chapter_sections: BTreeMap<Chapter, usize>,
}

/// 全局重要程度分布
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportanceDistribution {
    pub levels: BTreeMap<Importance, usize>,
    pub unmarked: usize,
}

impl ImportanceDistribution {
    pub fn get(&self, importance: Importance) -> usize {
        self.levels.get(&importance).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.levels.values().sum::<usize>() + self.unmarked
    }
}

/// 全局考核要求分布
///
/// 多个标签的知识点只计入“综合”，不再计入单项
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamDistribution {
    pub single: BTreeMap<ExamRequirement, usize>,
    pub combined: usize,
    pub unmarked: usize,
}

impl ExamDistribution {
    pub fn get(&self, requirement: ExamRequirement) -> usize {
        self.single.get(&requirement).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.single.values().sum::<usize>() + self.combined + self.unmarked
    }
}

/// 单个章节的知识点分布
///
/// 与全局分布不同，多标签知识点会计入它的每一个考核要求
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterDetail {
    pub total: usize,
    pub importance: BTreeMap<Importance, usize>,
    pub exam_requirements: BTreeMap<ExamRequirement, usize>,
}

impl ChapterDetail {
    fn new() -> Self {
        Self {
            total: 0,
            importance: zeroed(&Importance::ALL),
            exam_requirements: zeroed(&ExamRequirement::ALL),
        }
    }
}

/// 知识点分布
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeStats {
    pub total: usize,
    pub by_chapter: BTreeMap<Chapter, usize>,
    pub by_importance: ImportanceDistribution,
    pub by_exam: ExamDistribution,
    pub chapter_details: BTreeMap<Chapter, ChapterDetail>,
}

/// 测试题统计
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionStats {
    pub total: usize,
    pub real: usize,
    pub mock: usize,
    pub answers: usize,
    pub explanations: usize,
    pub by_chapter: BTreeMap<Chapter, usize>,
}

impl QuestionStats {
    pub fn real_percent(&self) -> f64 {
        percent(self.real, self.total)
    }

    pub fn mock_percent(&self) -> f64 {
        percent(self.mock, self.total)
    }
}

/// 核心知识点（★★★）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoreKnowledge {
    pub chapter: Option<Chapter>,
    pub title: String,
}

/// 内容特征
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentStats {
    /// 知识点平均长度（字符）
    pub avg_length: f64,
    pub content_types: BTreeMap<ContentType, usize>,
    pub core_knowledge_count: usize,
    pub core_knowledge: Vec<CoreKnowledge>,
}

/// 分布统计器
///
/// 基于知识点序列和原文计算各类分布，不会失败
pub struct DistributionAggregator {
    detector: ChapterDetector,
    /// 分页标记，兼容 `=== 第 N 页 ===` 与 `=== page N ===`
    page_regex: Regex,
    /// 小节标记，如 `第12页第三节`
    section_regex: Regex,
    // 历史意义关键词
    significance_keywords: Vec<&'static str>,
    // 理论政策关键词
    policy_keywords: Vec<&'static str>,
    // 人物
    figure_keywords: Vec<&'static str>,
    // 历史事件关键词
    event_keywords: Vec<&'static str>,
}

impl DistributionAggregator {
    pub fn new() -> Self {
        Self {
            detector: ChapterDetector::new(),
            page_regex: Regex::new(r"===\s*(?:第\s*(\d+)\s*页|page\s+(\d+))\s*===").unwrap(),
            section_regex: Regex::new(r"第\d+页第[一二三四五]节").unwrap(),
            significance_keywords: vec!["意义", "影响", "作用"],
            policy_keywords: vec!["政策", "方针", "路线"],
            figure_keywords: vec!["毛泽东", "孙中山", "邓小平", "江泽民", "胡锦涛", "习近平"],
            event_keywords: vec!["战争", "运动", "革命", "起义", "事变"],
        }
    }

    /// 文档基本信息：字符数、非空白字符数、页码
    pub fn basic_info(&self, text: &str) -> BasicInfo {
        let pages: BTreeSet<u64> = self
            .page_regex
            .captures_iter(text)
            .filter_map(|caps| caps.get(1).or_else(|| caps.get(2)))
            .filter_map(|m| m.as_str().parse().ok())
            .collect();

        BasicInfo {
            total_chars: text.chars().count(),
            total_chars_no_space: text.chars().filter(|c| !c.is_whitespace()).count(),
            page_count: pages.len(),
            pages: pages.into_iter().collect(),
        }
    }

    /// 章节标记位置
    ///
    /// 章节名在全文中的每一次出现，只要所在行带有页码或分页标记就记录其字节偏移，按偏移排序
    fn chapter_positions(&self, text: &str) -> Vec<(usize, Chapter)> {
        let mut positions = Vec::new();

        for chapter in Chapter::ALL {
            for (pos, _) in text.match_indices(chapter.label()) {
                let line_start = text[..pos].rfind('\n').map(|p| p + 1).unwrap_or(0);
                let line_end = text[pos..].find('\n').map(|p| pos + p).unwrap_or(text.len());

                if self.detector.has_boundary_marker(&text[line_start..line_end]) {
                    positions.push((pos, chapter));
                }
            }
        }

        positions.sort();
        positions
    }

    /// 小节统计
    ///
    /// 每个小节归属于偏移量在它之前且距离最近的章节标记
    pub fn structure(&self, text: &str) -> StructureStats {
        let mut chapter_sections = zeroed(&Chapter::ALL);
        let positions = self.chapter_positions(text);

        let mut total_sections = 0;
        for section in self.section_regex.find_iter(text) {
            total_sections += 1;

            let idx = positions.partition_point(|&(pos, _)| pos < section.start());
            if idx > 0 {
                let (_, chapter) = positions[idx - 1];
                *chapter_sections.entry(chapter).or_insert(0) += 1;
            }
        }

        StructureStats {
            total_sections,
            chapter_sections,
        }
    }

    /// 知识点分布
    pub fn knowledge(&self, knowledge_points: &[KnowledgePoint]) -> KnowledgeStats {
        let mut by_chapter = zeroed(&Chapter::ALL);
        let mut by_importance = ImportanceDistribution {
            levels: zeroed(&Importance::ALL),
            unmarked: 0,
        };
        let mut by_exam = ExamDistribution {
            single: zeroed(&ExamRequirement::ALL),
            combined: 0,
            unmarked: 0,
        };
        let mut chapter_details: BTreeMap<Chapter, ChapterDetail> = Chapter::ALL
            .iter()
            .map(|&chapter| (chapter, ChapterDetail::new()))
            .collect();

        for kp in knowledge_points {
            match kp.importance {
                Some(level) => *by_importance.levels.entry(level).or_insert(0) += 1,
                None => by_importance.unmarked += 1,
            }

            match kp.exam_requirements.as_slice() {
                [] => by_exam.unmarked += 1,
                [only] => *by_exam.single.entry(*only).or_insert(0) += 1,
                _ => by_exam.combined += 1,
            }

            let Some(chapter) = kp.chapter else {
                continue;
            };
            *by_chapter.entry(chapter).or_insert(0) += 1;

            let detail = chapter_details.entry(chapter).or_insert_with(ChapterDetail::new);
            detail.total += 1;
            if let Some(level) = kp.importance {
                *detail.importance.entry(level).or_insert(0) += 1;
            }
            for req in &kp.exam_requirements {
                *detail.exam_requirements.entry(*req).or_insert(0) += 1;
            }
        }

        KnowledgeStats {
            total: knowledge_points.len(),
            by_chapter,
            by_importance,
            by_exam,
            chapter_details,
        }
    }

    /// 测试题统计
    ///
    /// 按章节统计时逐行扫描并维护当前章节，而不是按偏移量就近归属
    pub fn questions(&self, text: &str) -> QuestionStats {
        let real = text.matches("【真题·").count();
        let mock = text.matches("【模拟·").count();

        let mut by_chapter = zeroed(&Chapter::ALL);
        let mut current_chapter: Option<Chapter> = None;

        for line in text.lines() {
            if let Some(chapter) = self.detector.detect_chapter(line) {
                current_chapter = Some(chapter);
            }

            if let Some(chapter) = current_chapter {
                let count = line.matches("【真题·").count() + line.matches("【模拟·").count();
                *by_chapter.entry(chapter).or_insert(0) += count;
            }
        }

        QuestionStats {
            total: real + mock,
            real,
            mock,
            answers: text.matches("【答案】").count(),
            explanations: text.matches("【解析】").count(),
            by_chapter,
        }
    }

    /// 内容类型分类，按优先级取第一个命中的类型
    pub fn classify_content(&self, content: &str) -> ContentType {
        if contains_any(content, &self.significance_keywords) {
            ContentType::HistoricalSignificance
        } else if contains_any(content, &self.policy_keywords) {
            ContentType::TheoryAndPolicy
        } else if contains_any(content, &self.figure_keywords) {
            ContentType::FiguresAndThought
        } else if contains_any(content, &self.event_keywords) {
            ContentType::HistoricalEvent
        } else {
            ContentType::Other
        }
    }

    /// 内容特征：平均长度、内容类型分布、核心知识点
    pub fn content(&self, knowledge_points: &[KnowledgePoint]) -> ContentStats {
        let mut content_types = zeroed(&ContentType::ALL);
        let mut total_length = 0;

        for kp in knowledge_points {
            let content = kp.joined_content();
            total_length += content.chars().count();
            *content_types.entry(self.classify_content(&content)).or_insert(0) += 1;
        }

        let avg_length = if knowledge_points.is_empty() {
            0.0
        } else {
            total_length as f64 / knowledge_points.len() as f64
        };

        let core: Vec<&KnowledgePoint> = knowledge_points
            .iter()
            .filter(|kp| kp.importance == Some(Importance::ThreeStar))
            .collect();

        ContentStats {
            avg_length,
            content_types,
            core_knowledge_count: core.len(),
            core_knowledge: core
                .iter()
                .take(CORE_KNOWLEDGE_LIMIT)
                .map(|kp| CoreKnowledge {
                    chapter: kp.chapter,
                    title: kp.title.clone(),
                })
                .collect(),
        }
    }
}

impl Default for DistributionAggregator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(
        chapter: Option<Chapter>,
        importance: Option<Importance>,
        exam_requirements: Vec<ExamRequirement>,
    ) -> KnowledgePoint {
        KnowledgePoint {
            id: "1".to_string(),
            title: "标题".to_string(),
            chapter,
            importance,
            exam_requirements,
            content: vec![],
            start_line: 0,
        }
    }

    #[test]
    fn test_percent_guards_zero() {
        assert_eq!(percent(3, 0), 0.0);
        assert_eq!(percent(1, 4), 25.0);
    }

    #[test]
    fn test_basic_info() {
        let aggregator = DistributionAggregator::new();
        let text = "=== 第 2 页 ===\n甲 乙\n=== 第 1 页 ===\n=== 第 2 页 ===\n=== page 5 ===";
        let info = aggregator.basic_info(text);

        assert_eq!(info.pages, vec![1, 2, 5]);
        assert_eq!(info.page_count, 3);
        assert_eq!(info.total_chars, text.chars().count());
        assert_eq!(
            info.total_chars_no_space,
            text.chars().filter(|c| !c.is_whitespace()).count()
        );
    }

    #[test]
    fn test_structure_attributes_sections_to_preceding_chapter() {
        let aggregator = DistributionAggregator::new();
        let text = "第2页第一节 前言\n\
                    第一章 第3页\n\
                    第3页第一节\n\
                    第4页第二节\n\
                    第二章 第5页\n\
                    第5页第一节\n\
                    提到第一章但没有页码\n\
                    第6页第二节";
        let structure = aggregator.structure(text);

        assert_eq!(structure.total_sections, 5);
        assert_eq!(structure.chapter_sections[&Chapter::Chapter1], 2);
        assert_eq!(structure.chapter_sections[&Chapter::Chapter2], 2);
        assert_eq!(structure.chapter_sections[&Chapter::Introduction], 0);
        assert_eq!(structure.chapter_sections.len(), 11);
    }

    #[test]
    fn test_structure_uses_every_marked_occurrence() {
        let aggregator = DistributionAggregator::new();
        // 第一章的出现位置在第三章之后，就近归属到第一章
        let text = "第三章 第1页 回顾第一章\n第2页第一节";
        let structure = aggregator.structure(text);

        assert_eq!(structure.chapter_sections[&Chapter::Chapter1], 1);
        assert_eq!(structure.chapter_sections[&Chapter::Chapter3], 0);
    }

    #[test]
    fn test_sections_and_questions_use_different_attribution() {
        let aggregator = DistributionAggregator::new();
        // 小节按最近的章节名偏移归属，测试题按行内第一个章节名归属
        let text = "导言 第1页 第二章\n第2页第一节 【真题·1】";

        let structure = aggregator.structure(text);
        assert_eq!(structure.chapter_sections[&Chapter::Introduction], 0);
        assert_eq!(structure.chapter_sections[&Chapter::Chapter2], 1);

        let questions = aggregator.questions(text);
        assert_eq!(questions.by_chapter[&Chapter::Introduction], 1);
        assert_eq!(questions.by_chapter[&Chapter::Chapter2], 0);
    }

    #[test]
    fn test_basic_info_keeps_large_page_numbers() {
        let aggregator = DistributionAggregator::new();
        let info = aggregator.basic_info("=== 第 99999999999 页 ===\n内容");

        assert_eq!(info.pages, vec![99_999_999_999u64]);
        assert_eq!(info.page_count, 1);
    }

    #[test]
    fn test_knowledge_distribution() {
        let aggregator = DistributionAggregator::new();
        let points = vec![
            point(
                Some(Chapter::Chapter1),
                Some(Importance::ThreeStar),
                vec![ExamRequirement::SingleChoice],
            ),
            point(
                Some(Chapter::Chapter1),
                None,
                vec![ExamRequirement::ShortAnswer, ExamRequirement::Essay],
            ),
            point(None, Some(Importance::OneStar), vec![]),
        ];
        let stats = aggregator.knowledge(&points);

        assert_eq!(stats.total, 3);
        assert_eq!(stats.by_chapter[&Chapter::Chapter1], 2);
        assert_eq!(stats.by_chapter.values().sum::<usize>(), 2);

        assert_eq!(stats.by_importance.get(Importance::ThreeStar), 1);
        assert_eq!(stats.by_importance.get(Importance::OneStar), 1);
        assert_eq!(stats.by_importance.unmarked, 1);
        assert_eq!(stats.by_importance.total(), 3);

        assert_eq!(stats.by_exam.get(ExamRequirement::SingleChoice), 1);
        assert_eq!(stats.by_exam.get(ExamRequirement::ShortAnswer), 0);
        assert_eq!(stats.by_exam.combined, 1);
        assert_eq!(stats.by_exam.unmarked, 1);
        assert_eq!(stats.by_exam.total(), 3);
    }

    #[test]
    fn test_chapter_detail_counts_every_tag() {
        let aggregator = DistributionAggregator::new();
        let points = vec![point(
            Some(Chapter::Chapter5),
            None,
            vec![ExamRequirement::ShortAnswer, ExamRequirement::Essay],
        )];
        let stats = aggregator.knowledge(&points);
        let detail = &stats.chapter_details[&Chapter::Chapter5];

        assert_eq!(detail.total, 1);
        assert_eq!(detail.exam_requirements[&ExamRequirement::ShortAnswer], 1);
        assert_eq!(detail.exam_requirements[&ExamRequirement::Essay], 1);
        assert_eq!(detail.importance.values().sum::<usize>(), 0);
    }

    #[test]
    fn test_questions_by_chapter() {
        let aggregator = DistributionAggregator::new();
        let text = "【真题·2020】开篇题\n\
                    第一章 第1页\n\
                    【真题·2021】【模拟·1】\n\
                    【答案】A\n\
                    【解析】略\n\
                    第二章 第8页\n\
                    【模拟·2】";
        let stats = aggregator.questions(text);

        assert_eq!(stats.real, 2);
        assert_eq!(stats.mock, 2);
        assert_eq!(stats.total, 4);
        assert_eq!(stats.answers, 1);
        assert_eq!(stats.explanations, 1);
        assert_eq!(stats.by_chapter[&Chapter::Chapter1], 2);
        assert_eq!(stats.by_chapter[&Chapter::Chapter2], 1);
        assert_eq!(stats.real_percent(), 50.0);
    }

    #[test]
    fn test_questions_without_any_question() {
        let aggregator = DistributionAggregator::new();
        let stats = aggregator.questions("第一章 第1页\n知识点1 甲");

        assert_eq!(stats.total, 0);
        assert_eq!(stats.real_percent(), 0.0);
        assert_eq!(stats.mock_percent(), 0.0);
    }

    #[test]
    fn test_classify_content_priority() {
        let aggregator = DistributionAggregator::new();

        assert_eq!(
            aggregator.classify_content("辛亥革命的历史意义"),
            ContentType::HistoricalSignificance
        );
        assert_eq!(
            aggregator.classify_content("毛泽东提出的土地政策"),
            ContentType::TheoryAndPolicy
        );
        assert_eq!(
            aggregator.classify_content("孙中山与三民主义"),
            ContentType::FiguresAndThought
        );
        assert_eq!(
            aggregator.classify_content("武昌起义爆发"),
            ContentType::HistoricalEvent
        );
        assert_eq!(aggregator.classify_content("洋务企业"), ContentType::Other);
    }

    #[test]
    fn test_content_stats() {
        let aggregator = DistributionAggregator::new();
        let mut first = point(Some(Chapter::Chapter1), Some(Importance::ThreeStar), vec![]);
        first.title = "鸦片战争".to_string();
        first.content = vec!["鸦片战争".to_string(), "爆发".to_string()];
        let mut second = point(None, None, vec![]);
        second.content = vec!["一二".to_string()];

        let stats = aggregator.content(&[first, second]);

        // "鸦片战争 爆发" 7 个字符，"一二" 2 个字符
        assert_eq!(stats.avg_length, 4.5);
        assert_eq!(stats.content_types[&ContentType::HistoricalEvent], 1);
        assert_eq!(stats.content_types[&ContentType::Other], 1);
        assert_eq!(stats.core_knowledge_count, 1);
        assert_eq!(
            stats.core_knowledge,
            vec![CoreKnowledge {
                chapter: Some(Chapter::Chapter1),
                title: "鸦片战争".to_string(),
            }]
        );
    }

    #[test]
    fn test_content_stats_empty() {
        let aggregator = DistributionAggregator::new();
        let stats = aggregator.content(&[]);

        assert_eq!(stats.avg_length, 0.0);
        assert_eq!(stats.core_knowledge_count, 0);
        assert_eq!(stats.content_types.values().sum::<usize>(), 0);
    }
}
