use super::*;
use encoding_rs::*;

/// TXT 来源
///
/// 支持纯文本文件的加载，自动检测编码（UTF-8, GBK 等）
#[derive(Clone)]
pub struct TxtSource;

impl TxtSource {
    /// 创建新的 TXT 来源实例
    pub fn new() -> Self {
        Self
    }

    /// 检测文件编码
    ///
    /// 尝试检测文件的字符编码，支持 UTF-8、GBK 等常见编码
    ///
    /// # 参数
    /// - `bytes`: 文件字节数据
    ///
    /// # 返回
    /// 检测到的编码
    fn detect_encoding(&self, bytes: &[u8]) -> &'static Encoding {
        // 1. 检查 BOM (Byte Order Mark)
        if let Some((encoding, _bom_length)) = Encoding::for_bom(bytes) {
            return encoding;
        }

        // 2. 尝试 UTF-8 解码
        if std::str::from_utf8(bytes).is_ok() {
            return UTF_8;
        }

        // 3. 检测是否为 GBK
        if self.looks_like_gbk(bytes) {
            return GBK;
        }

        // 4. 默认使用 UTF-8
        UTF_8
    }

    /// 检测字节序列是否像 GBK 编码
    ///
    /// GBK 编码特征：
    /// - 第一字节范围：0x81-0xFE
    /// - 第二字节范围：0x40-0xFE
    fn looks_like_gbk(&self, bytes: &[u8]) -> bool {
        let mut gbk_pairs = 0;
        let mut total_pairs = 0;

        let mut i = 0;
        while i < bytes.len().saturating_sub(1) {
            let b1 = bytes[i];
            let b2 = bytes[i + 1];

            if b1 < 0x80 {
                i += 1;
                continue;
            }

            total_pairs += 1;

            if (0x81..=0xFE).contains(&b1) && (0x40..=0xFE).contains(&b2) {
                gbk_pairs += 1;
                i += 2;
            } else {
                i += 1;
            }
        }

        // 超过 50% 的非 ASCII 字节对符合 GBK 规则，则认为是 GBK
        total_pairs > 0 && (gbk_pairs as f32 / total_pairs as f32) > 0.5
    }

    /// 将字节解码为文本
    ///
    /// 解码出现替换字符时视为编码错误，不返回带乱码的文本
    fn decode(&self, bytes: &[u8]) -> Result<String, AnalyzeError> {
        let encoding = self.detect_encoding(bytes);
        let (content, encoding_used, had_errors) = encoding.decode(bytes);
        if had_errors {
            return Err(AnalyzeError::Decode(format!(
                "按 {} 解码时出现无效字节",
                encoding_used.name()
            )));
        }

        log::info!("文本编码: {}", encoding_used.name());
        Ok(content.into_owned())
    }
}

impl TextSource for TxtSource {
    fn load(&self, file_path: &Path) -> Result<String, AnalyzeError> {
        let bytes = read_bytes(file_path)?;
        self.decode(&bytes)
    }

    fn kind(&self) -> SourceKind {
        SourceKind::Text
    }

    fn supported_extensions(&self) -> Vec<&str> {
        vec!["txt"]
    }
}

impl Default for TxtSource {
    fn default() -> Self {
        Self::new()
    }
}
