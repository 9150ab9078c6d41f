use super::chapter_detector::{ChapterDetector, LineKind};
use super::types::*;

/// 补查星级时检查的内容行数
const IMPORTANCE_LOOKAHEAD_LINES: usize = 5;

/// 结构扫描器
///
/// 单遍扫描全文，维护“当前章节”和“当前知识点”两个状态，输出知识点序列
pub struct StructureScanner {
    detector: ChapterDetector,
}

impl StructureScanner {
    pub fn new() -> Self {
        Self {
            detector: ChapterDetector::new(),
        }
    }

    /// 扫描全文，提取所有知识点
    ///
    /// # 参数
    /// - `text`: 文档全文
    ///
    /// # 返回
    /// 按出现顺序排列的知识点列表
    pub fn scan(&self, text: &str) -> Vec<KnowledgePoint> {
        let mut knowledge_points = Vec::new();
        let mut current_chapter: Option<Chapter> = None;
        let mut current: Option<KnowledgePoint> = None;

        for (i, line) in text.lines().enumerate() {
            match self.detector.classify(line) {
                LineKind::KnowledgePoint { chapter, header } => {
                    if chapter.is_some() {
                        current_chapter = chapter;
                    }
                    if let Some(kp) = current.take() {
                        knowledge_points.push(kp);
                    }

                    current = Some(KnowledgePoint {
                        id: header.id,
                        title: header.title,
                        chapter: current_chapter,
                        importance: header.importance,
                        exam_requirements: header.exam_requirements,
                        content: Vec::new(),
                        start_line: i,
                    });
                }
                LineKind::ChapterMarker(chapter) => {
                    current_chapter = Some(chapter);
                    if let Some(kp) = current.take() {
                        knowledge_points.push(kp);
                    }
                }
                LineKind::Content(content) => {
                    if let Some(kp) = current.as_mut() {
                        kp.content.push(content.to_string());
                        if kp.importance.is_none() {
                            kp.importance = self.detector.find_importance(line);
                        }
                    }
                }
                LineKind::Blank => {}
            }
        }

        if let Some(kp) = current.take() {
            knowledge_points.push(kp);
        }

        self.fill_missing_importance(&mut knowledge_points);

        log::debug!("扫描完成：共 {} 个知识点", knowledge_points.len());
        knowledge_points
    }

    /// 二次扫描：星号可能出现在标题后几行，只查看前五行内容
    fn fill_missing_importance(&self, knowledge_points: &mut [KnowledgePoint]) {
        for kp in knowledge_points.iter_mut().filter(|kp| kp.importance.is_none()) {
            kp.importance = kp
                .content
                .iter()
                .take(IMPORTANCE_LOOKAHEAD_LINES)
                .find_map(|line| self.detector.find_importance(line));

            if kp.importance.is_none() {
                log::debug!("知识点{} 未找到重要程度标记", kp.id);
            }
        }
    }
}

impl Default for StructureScanner {
    fn default() -> Self {
        Self::new()
    }
}
