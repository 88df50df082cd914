//! 扫描版 PDF / EPUB 的 OCR 桌面工具
//!
//! 负责命令行解析、日志、配置、样式表与翻译加载，以及主窗口和事件循环的启动。

pub mod app;
pub mod bootstrap;
pub mod cli;
pub mod config;
pub mod document;
pub mod error;
pub mod i18n;
pub mod logger;
pub mod style;
pub mod window;
