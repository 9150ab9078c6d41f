// Outline 模块
// 从规划卡全文中提取章节、知识点并统计分布

pub mod types;
pub mod chapter_detector;
pub mod scanner;
pub mod aggregator;


// 重新导出主要类型
pub use types::*;
pub use chapter_detector::{ChapterDetector, KnowledgeHeader, LineKind};
pub use scanner::StructureScanner;
pub use aggregator::*;
