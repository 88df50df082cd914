//! 日志系统初始化模块
//!
//! 同时输出到终端和日志文件，实际生效的级别由 `log::set_max_level` 控制

use crate::bootstrap::LogControl;
use simplelog::{
    ColorChoice, CombinedLogger, ConfigBuilder, LevelFilter, SharedLogger, TermLogger,
    TerminalMode, WriteLogger,
};
use std::fs::{self, File};
use std::path::PathBuf;

const LOG_FILE_NAME: &str = "vision_ocr.log";

/// 日志级别控制句柄
#[derive(Debug)]
pub struct LogHandle {
    _private: (),
}

impl LogControl for LogHandle {
    fn set_level(&mut self, level: LevelFilter) {
        log::set_max_level(level);
    }

    fn level(&self) -> LevelFilter {
        log::max_level()
    }
}

/// 初始化日志系统
///
/// 各输出端接受所有级别，过滤统一交给全局最大级别，
/// 这样 `--debug` 可以在初始化之后再调整级别
///
/// # 参数
///
/// * `level` - 初始日志级别
///
/// # 返回值
///
/// 用于之后调整级别的句柄
pub fn init_logger(level: LevelFilter) -> LogHandle {
    let mut config_builder = ConfigBuilder::new();
    config_builder.set_time_offset_to_local().ok();
    let config = config_builder.build();

    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        LevelFilter::Trace,
        config.clone(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )];

    let log_path = log_file_path();
    match create_log_file(&log_path) {
        Ok(file) => loggers.push(WriteLogger::new(LevelFilter::Trace, config, file)),
        Err(e) => eprintln!("[WARN] 无法创建日志文件 {}: {}", log_path.display(), e),
    }

    // 重复初始化时保留已有的日志器
    let _ = CombinedLogger::init(loggers);
    log::set_max_level(level);

    log::debug!("日志系统初始化完成，日志文件: {:?}", log_path);
    LogHandle { _private: () }
}

/// 日志文件路径
///
/// 优先放在用户数据目录下，找不到则放在可执行文件所在目录
fn log_file_path() -> PathBuf {
    if let Some(dirs) = crate::app::project_dirs() {
        return dirs.data_local_dir().join("logs").join(LOG_FILE_NAME);
    }

    std::env::current_exe()
        .unwrap_or_else(|_| PathBuf::from("."))
        .parent()
        .unwrap_or(std::path::Path::new("."))
        .join(LOG_FILE_NAME)
}

fn create_log_file(path: &std::path::Path) -> std::io::Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    File::create(path)
}
