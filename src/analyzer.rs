use std::path::Path;

use serde::Serialize;

use crate::error::AnalyzeError;
use crate::outline::*;
use crate::source::SourceRouter;

/// 分析结果
///
/// 一次运行得到的全部统计，均由原文推导，不做持久化
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutlineAnalysis {
    /// 文档全文
    #[serde(skip)]
    pub text: String,
    pub line_count: usize,
    pub basic_info: BasicInfo,
    pub structure: StructureStats,
    pub knowledge_points: Vec<KnowledgePoint>,
    pub knowledge: KnowledgeStats,
    pub questions: QuestionStats,
    pub content: ContentStats,
}

/// 规划卡分析器
///
/// 串联加载、结构扫描和分布统计
pub struct OutlineAnalyzer {
    router: SourceRouter,
    scanner: StructureScanner,
    aggregator: DistributionAggregator,
}

impl OutlineAnalyzer {
    pub fn new() -> Self {
        Self {
            router: SourceRouter::new(),
            scanner: StructureScanner::new(),
            aggregator: DistributionAggregator::new(),
        }
    }

    pub fn router(&self) -> &SourceRouter {
        &self.router
    }

    /// 加载文件并分析
    pub fn analyze_file(&self, file_path: &Path) -> Result<OutlineAnalysis, AnalyzeError> {
        log::info!("正在加载文件...");
        let text = self.router.load(file_path)?;
        self.analyze_text(text)
    }

    /// 分析已加载的全文
    ///
    /// 全文为空（或只有空白）时返回 `EmptyContent`
    pub fn analyze_text(&self, text: impl Into<String>) -> Result<OutlineAnalysis, AnalyzeError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(AnalyzeError::EmptyContent);
        }

        log::info!("正在分析文档结构...");
        let basic_info = self.aggregator.basic_info(&text);
        let structure = self.aggregator.structure(&text);

        log::info!("正在提取知识点...");
        let knowledge_points = self.scanner.scan(&text);

        log::info!("正在分析知识点分布...");
        let knowledge = self.aggregator.knowledge(&knowledge_points);

        log::info!("正在分析测试题...");
        let questions = self.aggregator.questions(&text);

        log::info!("正在分析内容特征...");
        let content = self.aggregator.content(&knowledge_points);

        Ok(OutlineAnalysis {
            line_count: text.split('\n').count(),
            text,
            basic_info,
            structure,
            knowledge_points,
            knowledge,
            questions,
            content,
        })
    }
}

impl Default for OutlineAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_analyze_empty_text() {
        let analyzer = OutlineAnalyzer::new();
        assert!(matches!(analyzer.analyze_text(""), Err(AnalyzeError::EmptyContent)));
        assert!(matches!(analyzer.analyze_text(" \n\t"), Err(AnalyzeError::EmptyContent)));
    }

    #[test]
    fn test_analyze_text() {
        let analyzer = OutlineAnalyzer::new();
        let analysis = analyzer
            .analyze_text("=== 第 1 页 ===\n导言 第1页\n知识点1 学习方法★\n内容")
            .unwrap();

        assert_eq!(analysis.line_count, 4);
        assert_eq!(analysis.basic_info.pages, vec![1]);
        assert_eq!(analysis.knowledge_points.len(), 1);
        assert_eq!(analysis.knowledge.by_chapter[&Chapter::Introduction], 1);
    }

    #[test]
    fn test_line_count_includes_trailing_newline() {
        let analyzer = OutlineAnalyzer::new();
        let analysis = analyzer.analyze_text("知识点1 甲\n内容\n").unwrap();

        assert_eq!(analysis.line_count, 3);
    }

    #[test]
    fn test_analyze_file() {
        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        file.write_all("第一章 第1页\n知识点1 鸦片战争★★\n".as_bytes()).unwrap();

        let analyzer = OutlineAnalyzer::new();
        let analysis = analyzer.analyze_file(file.path()).unwrap();
        assert_eq!(analysis.knowledge_points[0].chapter, Some(Chapter::Chapter1));
        assert_eq!(analysis.knowledge_points[0].importance, Some(Importance::TwoStar));
    }

    #[test]
    fn test_analyze_missing_file() {
        let analyzer = OutlineAnalyzer::new();
        let result = analyzer.analyze_file(Path::new("/nonexistent/规划卡.txt"));
        assert!(matches!(result, Err(AnalyzeError::NotFound(_))));
    }

    #[test]
    fn test_serialized_analysis_skips_text() {
        let analyzer = OutlineAnalyzer::new();
        let analysis = analyzer.analyze_text("知识点1 甲").unwrap();
        let json = serde_json::to_value(&analysis).unwrap();

        assert!(json.get("text").is_none());
        assert_eq!(json["knowledge"]["total"], 1);
        assert_eq!(json["knowledge_points"][0]["id"], "1");
    }
}
