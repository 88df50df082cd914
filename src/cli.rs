//! 命令行参数解析模块

use clap::{Parser, ValueEnum};
use log::LevelFilter;
use std::path::PathBuf;

/// 命令行参数
#[derive(Debug, Clone, Parser)]
#[command(
    name = "vision-ocr",
    about = "GoogleVisionOCR - PDF/EPUB OCR 应用",
    disable_version_flag = true
)]
pub struct Args {
    /// 需要进行 OCR 处理的文件路径
    pub file: Option<PathBuf>,

    /// 启用调试模式
    #[arg(long)]
    pub debug: bool,

    /// 显示版本信息并退出
    #[arg(long)]
    pub version: bool,

    /// 日志级别
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,
}

/// 可选的日志级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    #[value(name = "DEBUG")]
    Debug,
    #[value(name = "INFO")]
    Info,
    #[value(name = "WARNING")]
    Warning,
    #[value(name = "ERROR")]
    Error,
    #[value(name = "CRITICAL")]
    Critical,
}

impl LogLevel {
    /// 转换为 `log` 的过滤级别
    ///
    /// `log` 没有 CRITICAL，映射到 Error
    pub fn to_level_filter(self) -> LevelFilter {
        match self {
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Warning => LevelFilter::Warn,
            LogLevel::Error | LogLevel::Critical => LevelFilter::Error,
        }
    }
}

/// 解析进程命令行参数，出错时由 clap 打印用法并退出
pub fn parse_arguments() -> Args {
    Args::parse()
}
