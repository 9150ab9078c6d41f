use std::path::PathBuf;
use thiserror::Error;

/// 分析流程错误
///
/// 只有加载阶段的问题才会成为错误；解析阶段的异常一律回落为默认值
#[derive(Error, Debug)]
pub enum AnalyzeError {
    #[error("文件不存在 - {}", .0.display())]
    NotFound(PathBuf),
    #[error("无法读取文件 - {}: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("文件内容为空")]
    EmptyContent,
    #[error("文件编码错误 - {0}")]
    Decode(String),
    #[error("PDF解析失败 - {0}")]
    Pdf(String),
    #[error("IO错误: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = AnalyzeError::NotFound(PathBuf::from("missing.txt"));
        assert_eq!(err.to_string(), "文件不存在 - missing.txt");

        assert_eq!(AnalyzeError::EmptyContent.to_string(), "文件内容为空");
        assert_eq!(
            AnalyzeError::Decode("GBK".to_string()).to_string(),
            "文件编码错误 - GBK"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "boom");
        let err: AnalyzeError = io.into();
        assert!(matches!(err, AnalyzeError::Io(_)));
        assert!(err.to_string().contains("boom"));
    }
}
