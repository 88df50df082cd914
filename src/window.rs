//! 主窗口模块
//!
//! 原生窗口在事件循环启动后才会创建，在此之前只记录状态

use crate::app::APP_NAME;
use crate::bootstrap::MainWindow;
use crate::config::Config;
use crate::document::Document;
use crate::error::Result;
use crate::fl;
use crate::style::StyleSheet;
use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;
use winit::{
    dpi::{LogicalSize, PhysicalSize},
    event_loop::ActiveEventLoop,
    window::{Window, WindowId},
};

/// OCR 主窗口
pub struct OcrWindow {
    config: Rc<RefCell<Config>>,
    document: Option<Document>,
    app_name: String,
    visible: bool,
    window: Option<Window>,
}

impl OcrWindow {
    pub fn new(config: Rc<RefCell<Config>>) -> Self {
        Self {
            config,
            document: None,
            app_name: APP_NAME.to_string(),
            visible: false,
            window: None,
        }
    }

    pub fn set_app_name(&mut self, name: &str) {
        self.app_name = name.to_string();
        self.refresh_title();
    }

    /// 当前打开的文档
    pub fn document(&self) -> Option<&Document> {
        self.document.as_ref()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn title(&self) -> String {
        let app = self.app_name.clone();
        match &self.document {
            Some(document) => fl!("window-title-document", file = document.file_name(), app = app),
            None => fl!("window-title", app = app),
        }
    }

    fn refresh_title(&self) {
        if let Some(window) = &self.window {
            window.set_title(&self.title());
        }
    }

    /// 创建原生窗口，已创建时不做任何事
    pub(crate) fn realize(&mut self, event_loop: &ActiveEventLoop, style: &StyleSheet) -> Result<()> {
        if self.window.is_some() {
            return Ok(());
        }

        let geometry = self.config.borrow().window;
        let attributes = Window::default_attributes()
            .with_title(self.title())
            .with_inner_size(LogicalSize::new(geometry.width, geometry.height))
            .with_maximized(geometry.maximized)
            .with_visible(self.visible);

        let window = event_loop.create_window(style.apply(attributes))?;
        log::debug!("主窗口已创建: {:?}", window.id());
        self.window = Some(window);
        Ok(())
    }

    pub(crate) fn owns(&self, id: WindowId) -> bool {
        self.window.as_ref().is_some_and(|window| window.id() == id)
    }

    pub(crate) fn resized(&mut self, size: PhysicalSize<u32>) {
        let Some(window) = &self.window else {
            return;
        };
        let Some(logical) = restorable_size(size, window.scale_factor(), window.is_maximized())
        else {
            return;
        };

        let mut config = self.config.borrow_mut();
        config.window.width = logical.width;
        config.window.height = logical.height;
    }

    /// 关闭前记录窗口状态
    pub(crate) fn remember_geometry(&mut self) {
        if let Some(window) = &self.window {
            self.config.borrow_mut().window.maximized = window.is_maximized();
        }
    }
}

/// 需要记录到配置中的窗口尺寸
///
/// 最大化时保留之前的尺寸，最小化时系统会报告 0x0，同样忽略
fn restorable_size(
    size: PhysicalSize<u32>,
    scale_factor: f64,
    maximized: bool,
) -> Option<LogicalSize<u32>> {
    if maximized || size.width == 0 || size.height == 0 {
        return None;
    }

    let logical: LogicalSize<u32> = size.to_logical(scale_factor);
    (logical.width > 0 && logical.height > 0).then_some(logical)
}

impl MainWindow for OcrWindow {
    fn open_file(&mut self, path: &Path) {
        match Document::open(path) {
            Ok(document) => {
                log::info!("已打开 {} 文件: {}", document.kind().name(), path.display());
                self.config.borrow_mut().add_recent_file(document.path());
                self.document = Some(document);
                self.refresh_title();
            }
            Err(e) => log::warn!("无法打开文件: {}", e),
        }
    }

    fn show(&mut self) {
        self.visible = true;
        if let Some(window) = &self.window {
            window.set_visible(true);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    fn shared_config() -> Rc<RefCell<Config>> {
        Rc::new(RefCell::new(Config::default()))
    }

    #[test]
    fn test_open_valid_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan.pdf");
        fs::write(&path, b"%PDF-1.4").unwrap();

        let config = shared_config();
        let mut window = OcrWindow::new(Rc::clone(&config));
        window.open_file(&path);

        assert_eq!(window.document().map(Document::path), Some(path.as_path()));
        assert_eq!(config.borrow().recent_files, vec![path.clone()]);
        assert_eq!(config.borrow().last_directory, Some(dir.path().to_path_buf()));
    }

    #[test]
    fn test_open_invalid_document_keeps_state() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        fs::write(&path, b"text").unwrap();

        let config = shared_config();
        let mut window = OcrWindow::new(Rc::clone(&config));
        window.open_file(&path);

        assert!(window.document().is_none());
        assert!(config.borrow().recent_files.is_empty());
    }

    #[test]
    fn test_invalid_document_does_not_replace_current() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("book.epub");
        fs::write(&good, b"PK\x03\x04rest").unwrap();

        let mut window = OcrWindow::new(shared_config());
        window.open_file(&good);
        window.open_file(&PathBuf::from("/does/not/exist.pdf"));

        assert_eq!(window.document().map(Document::path), Some(good.as_path()));
    }

    #[test]
    fn test_title_contains_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("volume1.pdf");
        fs::write(&path, b"%PDF-1.4").unwrap();

        let mut window = OcrWindow::new(shared_config());
        assert!(window.title().contains(APP_NAME));
        assert!(!window.title().contains("volume1.pdf"));

        window.open_file(&path);
        assert!(window.title().contains("volume1.pdf"));
        assert!(window.title().contains(APP_NAME));
    }

    #[test]
    fn test_restorable_size() {
        assert_eq!(
            restorable_size(PhysicalSize::new(1600, 1200), 2.0, false),
            Some(LogicalSize::new(800, 600))
        );
        assert_eq!(
            restorable_size(PhysicalSize::new(1024, 768), 1.0, false),
            Some(LogicalSize::new(1024, 768))
        );
    }

    #[test]
    fn test_minimized_size_ignored() {
        assert_eq!(restorable_size(PhysicalSize::new(0, 0), 1.0, false), None);
        assert_eq!(restorable_size(PhysicalSize::new(0, 600), 1.0, false), None);
        assert_eq!(restorable_size(PhysicalSize::new(800, 0), 1.5, false), None);
    }

    #[test]
    fn test_maximized_size_ignored() {
        assert_eq!(restorable_size(PhysicalSize::new(1920, 1080), 1.0, true), None);
    }

    #[test]
    fn test_show_before_realize() {
        let mut window = OcrWindow::new(shared_config());
        assert!(!window.is_visible());
        window.show();
        assert!(window.is_visible());
    }
}
