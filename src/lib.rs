// 规划卡分析工具：加载 TXT/PDF -> 结构扫描 -> 分布统计 -> 报告

pub mod error;
pub mod config;
pub mod source;
pub mod outline;
pub mod analyzer;
pub mod report;
pub mod cli;

pub use analyzer::{OutlineAnalysis, OutlineAnalyzer};
pub use error::AnalyzeError;

use clap::Parser;

/// 初始化日志，默认级别 info，可通过 RUST_LOG 覆盖
fn init_logger() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();
}

// 核心入口
pub fn run() -> i32 {
    init_logger();

    let cli = cli::Cli::parse();
    match cli.run() {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("\n分析失败！{}", e);
            eprintln!("请检查文件路径和文件格式。");
            1
        }
    }
}
