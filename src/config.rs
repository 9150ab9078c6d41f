/// 报告输出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// 控制台文本报告
    Text,
    /// JSON（完整分析结果）
    Json,
}

/// 报告选项
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportOptions {
    /// 显示知识点列表
    pub verbose: bool,
    /// 调试模式：先输出文本样本和知识点解析详情
    pub debug: bool,
    /// 知识点列表中每个级别最多显示的条数
    pub list_limit: usize,
    /// 调试模式下最多显示的知识点条数
    pub debug_limit: usize,
    /// 调试模式下文本样本的字符数
    pub sample_chars: usize,
    pub format: OutputFormat,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            verbose: false,
            debug: false,
            list_limit: 50,
            debug_limit: 200,
            sample_chars: 2000,
            format: OutputFormat::Text,
        }
    }
}

impl ReportOptions {
    /// 是否输出知识点列表（详细模式和调试模式都会输出）
    pub fn show_knowledge_list(&self) -> bool {
        self.verbose || self.debug
    }
}
