use super::*;

/// PDF 来源（基础版）
///
/// 支持纯文本 PDF 的按页提取，不支持扫描版 PDF
#[derive(Clone)]
pub struct PdfSource;

impl PdfSource {
    /// 创建新的 PDF 来源实例
    pub fn new() -> Self {
        Self
    }

    /// 拼接分页文本
    ///
    /// 每个非空页前插入 `=== 第 N 页 ===` 分隔行（N 从 1 开始），页与页之间以换行连接。
    /// 没有提取到文本的页跳过，但不影响后续页的页码；只含空白的页保留
    fn join_pages(&self, pages: &[String]) -> String {
        pages
            .iter()
            .enumerate()
            .filter(|(_, text)| !text.is_empty())
            .map(|(i, text)| format!("=== 第 {} 页 ===\n{}\n", i + 1, text))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl TextSource for PdfSource {
    fn load(&self, file_path: &Path) -> Result<String, AnalyzeError> {
        let bytes = read_bytes(file_path)?;

        let pages = pdf_extract::extract_text_from_mem_by_pages(&bytes)
            .map_err(|e| AnalyzeError::Pdf(format!("{}。可能是扫描版 PDF，暂不支持", e)))?;
        log::info!("PDF 共 {} 页", pages.len());

        let text = self.join_pages(&pages);
        if text.is_empty() {
            log::warn!("PDF 未提取到任何文本，可能是扫描件，需要先进行 OCR 处理");
        }

        Ok(text)
    }

    fn kind(&self) -> SourceKind {
        SourceKind::Pdf
    }

    fn supported_extensions(&self) -> Vec<&str> {
        vec!["pdf"]
    }
}

impl Default for PdfSource {
    fn default() -> Self {
        Self::new()
    }
}
