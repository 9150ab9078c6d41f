use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;

use crate::analyzer::OutlineAnalyzer;
use crate::config::{OutputFormat, ReportOptions};
use crate::error::AnalyzeError;
use crate::report::ReportRenderer;

/// 《中国近现代史纲要》规划卡综合分析工具（支持TXT和PDF）
#[derive(Parser, Debug)]
#[command(
    name = "outline-analyzer",
    version,
    about = "《中国近现代史纲要》规划卡综合分析工具（支持TXT和PDF）",
    after_help = "说明:\n  - 核心知识点: 重要程度为 ★★★ 的知识点\n  - -v 模式: 显示知识点列表\n  - -d 模式: 显示前200个知识点的详细解析 + 知识点列表"
)]
pub struct Cli {
    /// 输入文件路径（支持 .txt 和 .pdf）
    #[arg(short, long)]
    pub file: PathBuf,

    /// 显示知识点列表（每个级别最多 50 个）
    #[arg(short, long)]
    pub verbose: bool,

    /// 调试模式：显示前200个知识点的详细解析 + 知识点列表
    #[arg(short, long)]
    pub debug: bool,

    /// 保存提取的文本到指定文件（用于调试PDF提取）
    #[arg(long, value_name = "FILE")]
    pub save_text: Option<PathBuf>,

    /// 以 JSON 输出完整分析结果
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// 命令行参数转换为报告选项
    pub fn report_options(&self) -> ReportOptions {
        ReportOptions {
            verbose: self.verbose,
            debug: self.debug,
            format: if self.json {
                OutputFormat::Json
            } else {
                OutputFormat::Text
            },
            ..Default::default()
        }
    }

    /// 执行分析并输出报告
    pub fn run(&self) -> Result<(), AnalyzeError> {
        let analyzer = OutlineAnalyzer::new();
        let kind = analyzer.router().route(&self.file).kind();

        log::info!("开始分析《中国近现代史纲要》规划卡...");
        log::info!("文件路径: {}", self.file.display());
        log::info!("文件类型: {}", kind.display_name());

        let analysis = analyzer.analyze_file(&self.file)?;

        if let Some(path) = &self.save_text {
            match fs::write(path, &analysis.text) {
                Ok(()) => log::info!("提取的文本已保存到: {}", path.display()),
                Err(e) => log::warn!("保存文本失败: {}", e),
            }
        }

        let options = self.report_options();
        let stdout = io::stdout();
        let mut out = stdout.lock();
        ReportRenderer::new(&options).render(&analysis, &mut out)?;
        out.flush()?;

        Ok(())
    }
}
