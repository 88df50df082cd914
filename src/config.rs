//! 配置文件加载和保存模块
//!
//! 用户设置以 YAML 格式保存在用户配置目录下

use crate::bootstrap::ConfigStore;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAME: &str = "config.yaml";

/// 最近打开文件列表的最大长度
pub const MAX_RECENT_FILES: usize = 10;

/// 配置文件根结构
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub window: WindowGeometry,
    /// 最近打开的文件，最新的在最前
    pub recent_files: Vec<PathBuf>,
    pub last_directory: Option<PathBuf>,
    /// OCR 服务凭据文件
    pub credentials_path: Option<PathBuf>,
    /// OCR 语言提示，如 "ja"、"en"
    pub language_hints: Vec<String>,
    pub output_directory: Option<PathBuf>,

    #[serde(skip)]
    path: Option<PathBuf>,
}

/// 主窗口尺寸（逻辑像素）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowGeometry {
    pub width: u32,
    pub height: u32,
    pub maximized: bool,
}

impl Default for WindowGeometry {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 800,
            maximized: false,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            window: WindowGeometry::default(),
            recent_files: Vec::new(),
            last_directory: None,
            credentials_path: None,
            language_hints: vec!["ja".to_string(), "en".to_string()],
            output_directory: None,
            path: None,
        }
    }
}

impl Config {
    /// 创建默认配置，保存位置为用户配置目录
    pub fn new() -> Self {
        Self {
            path: crate::app::project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME)),
            ..Self::default()
        }
    }

    /// 创建默认配置，保存到指定路径
    pub fn with_path<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: Some(path.into()),
            ..Self::default()
        }
    }

    /// 配置文件路径
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// 从文件加载配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// 从字符串加载配置
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(yaml_str: &str) -> Result<Self> {
        if yaml_str.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Config = serde_yaml::from_str(yaml_str)?;
        Ok(config)
    }

    /// 写入文件，必要时创建目录
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_yaml::to_string(self)?)?;
        Ok(())
    }

    /// 记录最近打开的文件
    pub fn add_recent_file(&mut self, file: &Path) {
        self.recent_files.retain(|existing| existing != file);
        self.recent_files.insert(0, file.to_path_buf());
        self.recent_files.truncate(MAX_RECENT_FILES);

        if let Some(parent) = file.parent() {
            self.last_directory = Some(parent.to_path_buf());
        }
    }
}

impl ConfigStore for Config {
    fn load(&mut self) {
        let Some(path) = self.path.clone() else {
            log::warn!("无法确定配置文件目录，使用默认配置");
            return;
        };

        if !path.exists() {
            log::info!("配置文件不存在，使用默认配置: {}", path.display());
            return;
        }

        match Config::from_file(&path) {
            Ok(loaded) => {
                log::info!("已加载配置文件: {}", path.display());
                *self = Config {
                    path: Some(path),
                    ..loaded
                };
            }
            Err(e) => log::warn!("加载配置文件失败，使用默认配置: {} ({})", e, path.display()),
        }
    }

    fn save(&self) {
        let Some(path) = &self.path else {
            log::warn!("无法确定配置文件目录，配置未保存");
            return;
        };

        match self.to_file(path) {
            Ok(()) => log::info!("配置已保存: {}", path.display()),
            Err(e) => log::error!("保存配置文件失败: {} ({})", e, path.display()),
        }
    }
}
