//! 样式表模块
//!
//! 样式表是 YAML 文本，应用到主窗口的创建参数上

use crate::error::Result;
use serde::Deserialize;
use winit::dpi::LogicalSize;
use winit::window::{Theme, WindowAttributes};

/// 样式表文件相对路径
pub const STYLE_SHEET_PATH: &str = "resources/style.yaml";

/// 界面样式
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StyleSheet {
    pub theme: Option<ThemeName>,
    pub min_width: Option<u32>,
    pub min_height: Option<u32>,
    pub resizable: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeName {
    Light,
    Dark,
}

impl From<ThemeName> for Theme {
    fn from(name: ThemeName) -> Self {
        match name {
            ThemeName::Light => Theme::Light,
            ThemeName::Dark => Theme::Dark,
        }
    }
}

impl StyleSheet {
    /// 解析样式表文本，空文本视为默认样式
    pub fn parse(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(text)?)
    }

    /// 最小窗口尺寸，只设置了一边时另一边不限制
    pub fn min_size(&self) -> Option<LogicalSize<u32>> {
        if self.min_width.is_none() && self.min_height.is_none() {
            return None;
        }
        Some(LogicalSize::new(
            self.min_width.unwrap_or(0),
            self.min_height.unwrap_or(0),
        ))
    }

    /// 把样式应用到窗口创建参数
    pub fn apply(&self, mut attributes: WindowAttributes) -> WindowAttributes {
        if let Some(theme) = self.theme {
            attributes = attributes.with_theme(Some(theme.into()));
        }
        if let Some(min_size) = self.min_size() {
            attributes = attributes.with_min_inner_size(min_size);
        }
        if let Some(resizable) = self.resizable {
            attributes = attributes.with_resizable(resizable);
        }
        attributes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_style_sheet() {
        let style = StyleSheet::parse("theme: dark\nmin_width: 800\nmin_height: 600\n").unwrap();
        assert_eq!(style.theme, Some(ThemeName::Dark));
        assert_eq!(style.min_width, Some(800));
        assert_eq!(style.min_height, Some(600));
        assert_eq!(style.resizable, None);
    }

    #[test]
    fn test_min_size() {
        let both = StyleSheet::parse("min_width: 800\nmin_height: 600").unwrap();
        assert_eq!(both.min_size(), Some(LogicalSize::new(800, 600)));

        let width_only = StyleSheet::parse("min_width: 800").unwrap();
        assert_eq!(width_only.min_size(), Some(LogicalSize::new(800, 0)));

        let height_only = StyleSheet::parse("min_height: 600").unwrap();
        assert_eq!(height_only.min_size(), Some(LogicalSize::new(0, 600)));

        assert_eq!(StyleSheet::default().min_size(), None);
    }

    #[test]
    fn test_empty_style_sheet() {
        assert_eq!(StyleSheet::parse("").unwrap(), StyleSheet::default());
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(StyleSheet::parse("font_size: 12").is_err());
    }

    #[test]
    fn test_unknown_theme_rejected() {
        assert!(StyleSheet::parse("theme: solarized").is_err());
    }

    #[test]
    fn test_bundled_style_sheet_parses() {
        let text = include_str!("../resources/style.yaml");
        assert!(StyleSheet::parse(text).is_ok());
    }
}
