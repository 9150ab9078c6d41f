use std::collections::HashMap;
use std::path::Path;

use crate::error::AnalyzeError;

// 子模块声明
pub mod txt_source;
pub mod pdf_source;

/// 文本来源类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// PDF 文件，按页提取文本
    Pdf,
    /// 纯文本文件
    Text,
}

impl SourceKind {
    /// 报告中显示的文件类型
    pub fn display_name(&self) -> &'static str {
        match self {
            SourceKind::Pdf => "PDF文件",
            SourceKind::Text => "文本文件",
        }
    }
}

/// TextSource trait
///
/// 所有文本来源必须实现此 trait
pub trait TextSource: Send + Sync {
    /// 加载文件并返回完整的 UTF-8 文本
    ///
    /// # 参数
    /// - `file_path`: 要加载的文件路径
    ///
    /// # 返回
    /// 文档全文；PDF 来源会在每页前插入 `=== 第 N 页 ===` 分隔行
    fn load(&self, file_path: &Path) -> Result<String, AnalyzeError>;

    /// 获取来源类型
    fn kind(&self) -> SourceKind;

    /// 获取支持的文件扩展名列表
    fn supported_extensions(&self) -> Vec<&str>;
}

/// 读取文件字节，区分“不存在”和“无法读取”
pub(crate) fn read_bytes(file_path: &Path) -> Result<Vec<u8>, AnalyzeError> {
    if !file_path.exists() {
        return Err(AnalyzeError::NotFound(file_path.to_path_buf()));
    }

    std::fs::read(file_path).map_err(|source| AnalyzeError::Unreadable {
        path: file_path.to_path_buf(),
        source,
    })
}

/// Source 路由器
///
/// 根据文件扩展名路由到对应的文本来源，未知扩展名按纯文本处理
pub struct SourceRouter {
    /// 扩展名到来源的映射
    sources: HashMap<String, Box<dyn TextSource>>,
    /// 未匹配扩展名时使用的来源
    fallback: Box<dyn TextSource>,
}

impl SourceRouter {
    /// 创建新的路由器实例
    ///
    /// 注册所有可用的文本来源
    pub fn new() -> Self {
        let mut sources: HashMap<String, Box<dyn TextSource>> = HashMap::new();

        // 注册 TXT 来源
        let txt = Box::new(txt_source::TxtSource::new());
        for ext in txt.supported_extensions() {
            sources.insert(ext.to_string(), txt.clone());
        }

        // 注册 PDF 来源
        let pdf = Box::new(pdf_source::PdfSource::new());
        for ext in pdf.supported_extensions() {
            sources.insert(ext.to_string(), pdf.clone());
        }

        Self {
            sources,
            fallback: txt,
        }
    }

    /// 根据文件路径路由到对应的文本来源
    pub fn route(&self, file_path: &Path) -> &dyn TextSource {
        let ext = file_path
            .extension()
            .and_then(|s| s.to_str())
            .map(|s| s.to_lowercase());

        ext.and_then(|ext| self.sources.get(&ext))
            .unwrap_or(&self.fallback)
            .as_ref()
    }

    /// 加载文档全文
    ///
    /// 内容为空（或只有空白）时返回 `EmptyContent`
    pub fn load(&self, file_path: &Path) -> Result<String, AnalyzeError> {
        let source = self.route(file_path);
        log::info!(
            "加载 {}: {}",
            source.kind().display_name(),
            file_path.display()
        );

        let text = source.load(file_path)?;
        if text.trim().is_empty() {
            return Err(AnalyzeError::EmptyContent);
        }

        Ok(text)
    }

}

impl Default for SourceRouter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_route_by_extension() {
        let router = SourceRouter::new();
        assert_eq!(router.route(Path::new("card.pdf")).kind(), SourceKind::Pdf);
        assert_eq!(router.route(Path::new("card.PDF")).kind(), SourceKind::Pdf);
        assert_eq!(router.route(Path::new("card.txt")).kind(), SourceKind::Text);
    }

    #[test]
    fn test_route_unknown_extension_falls_back_to_text() {
        let router = SourceRouter::new();
        assert_eq!(router.route(Path::new("card.md")).kind(), SourceKind::Text);
        assert_eq!(router.route(Path::new("card")).kind(), SourceKind::Text);
    }

    #[test]
    fn test_load_missing_file() {
        let router = SourceRouter::new();
        let result = router.load(Path::new("/nonexistent/规划卡.txt"));
        assert!(matches!(result, Err(AnalyzeError::NotFound(_))));
    }

    #[test]
    fn test_load_empty_file() {
        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        file.write_all(b"  \n\n ").unwrap();

        let router = SourceRouter::new();
        let result = router.load(file.path());
        assert!(matches!(result, Err(AnalyzeError::EmptyContent)));
    }

    #[test]
    fn test_load_text_file() {
        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        file.write_all("知识点1 历史背景★★★".as_bytes()).unwrap();

        let router = SourceRouter::new();
        let text = router.load(file.path()).unwrap();
        assert_eq!(text, "知识点1 历史背景★★★");
    }

    #[test]
    fn test_source_kind_display_name() {
        assert_eq!(SourceKind::Pdf.display_name(), "PDF文件");
        assert_eq!(SourceKind::Text.display_name(), "文本文件");
    }
}
