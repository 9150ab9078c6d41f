use regex::Regex;
use super::types::*;

/// 知识点标题行解析结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnowledgeHeader {
    /// `知识点N` 中的编号，无法解析时为 "0"
    pub id: String,
    /// 清理后的标题
    pub title: String,
    /// 标题行上的星级
    pub importance: Option<Importance>,
    /// 标题行上的考核要求标签
    pub exam_requirements: Vec<ExamRequirement>,
}

/// 行分类结果
///
/// 扫描器对每一行只分类一次，再根据分类推进状态
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// 知识点标题行；若同一行也是章节标记行，`chapter` 为该章节
    KnowledgePoint {
        chapter: Option<Chapter>,
        header: KnowledgeHeader,
    },
    /// 章节标记行（章节名 + 页码或分页标记）
    ChapterMarker(Chapter),
    /// 普通内容行（已去除首尾空白）
    Content(&'a str),
    /// 空行
    Blank,
}

/// 章节与知识点标记检测器
///
/// 章节标记：行内同时出现章节名（导言、第一章 … 第十章）和
/// 页码标记 `第N页` 或分页标记 `=== … ===`。
/// 知识点标记：行内出现 `知识点N`。
pub struct ChapterDetector {
    /// 页码 / 分页标记
    boundary_regex: Regex,
    /// 知识点编号
    knowledge_regex: Regex,
    /// 方括号标签，如 `[识记]`
    bracket_regex: Regex,
    /// 全角括号标签，如 `【单选】`
    full_width_regex: Regex,
    /// 连续星号
    star_run_regex: Regex,
    /// 星级，三星优先
    rating_regex: Regex,
}

impl ChapterDetector {
    /// 创建新的检测器实例
    pub fn new() -> Self {
        Self {
            boundary_regex: Regex::new(r"第\d+页|===.*===").unwrap(),
            knowledge_regex: Regex::new(r"知识点(\d+)").unwrap(),
            bracket_regex: Regex::new(r"\[.*?\]").unwrap(),
            full_width_regex: Regex::new(r"【.*?】").unwrap(),
            star_run_regex: Regex::new(r"★+").unwrap(),
            rating_regex: Regex::new(r"★★★|★★|★").unwrap(),
        }
    }

    /// 是否包含页码或分页标记
    pub fn has_boundary_marker(&self, line: &str) -> bool {
        self.boundary_regex.is_match(line)
    }

    /// 检测章节标记行
    ///
    /// 按固定章节顺序取第一个出现在行内的章节名，且该行必须带有页码或分页标记
    pub fn detect_chapter(&self, line: &str) -> Option<Chapter> {
        let chapter = Chapter::ALL
            .iter()
            .copied()
            .find(|chapter| line.contains(chapter.label()))?;

        if self.has_boundary_marker(line) {
            Some(chapter)
        } else {
            None
        }
    }

    /// 是否为知识点标题行
    pub fn is_knowledge_marker(&self, line: &str) -> bool {
        self.knowledge_regex.is_match(line)
    }

    /// 查找第一个星级标记
    pub fn find_importance(&self, text: &str) -> Option<Importance> {
        self.rating_regex
            .find(text)
            .and_then(|m| Importance::from_stars(m.as_str()))
    }

    /// 解析知识点标题行
    pub fn parse_header(&self, line: &str) -> KnowledgeHeader {
        let id = self
            .knowledge_regex
            .captures(line)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
            .unwrap_or_else(|| "0".to_string());

        let title = self.clean_title(line);
        let importance = self.find_importance(line);

        let exam_requirements = ExamRequirement::ALL
            .iter()
            .copied()
            .filter(|req| line.contains(req.tag()))
            .collect();

        KnowledgeHeader {
            id,
            title,
            importance,
            exam_requirements,
        }
    }

    /// 清理标题：去掉编号、方括号标签、全角括号标签和星号
    fn clean_title(&self, line: &str) -> String {
        let title = self.knowledge_regex.replace_all(line, "");
        let title = self.bracket_regex.replace_all(title.trim(), "");
        let title = self.full_width_regex.replace_all(title.trim(), "");
        let title = self.star_run_regex.replace_all(title.trim(), "");
        title.trim().to_string()
    }

    /// 对一行进行分类
    ///
    /// 知识点标记优先于章节标记；两者都优先于内容
    pub fn classify<'a>(&self, line: &'a str) -> LineKind<'a> {
        let chapter = self.detect_chapter(line);

        if self.is_knowledge_marker(line) {
            return LineKind::KnowledgePoint {
                chapter,
                header: self.parse_header(line),
            };
        }

        if let Some(chapter) = chapter {
            return LineKind::ChapterMarker(chapter);
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            LineKind::Blank
        } else {
            LineKind::Content(trimmed)
        }
    }
}

impl Default for ChapterDetector {
    fn default() -> Self {
        Self::new()
    }
}
