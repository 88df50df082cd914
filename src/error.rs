//! 错误类型定义

use std::path::PathBuf;
use thiserror::Error;

/// 应用程序统一错误类型
#[derive(Debug, Error)]
pub enum Error {
    #[error("创建事件循环失败: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("创建窗口失败: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("文件读写失败: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML 解析失败: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("不支持的文件格式: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("文件内容与 {kind} 格式不符: {}", .path.display())]
    SignatureMismatch { path: PathBuf, kind: &'static str },
}

pub type Result<T> = std::result::Result<T, Error>;
