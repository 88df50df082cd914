//! 应用程序核心模块
//!
//! 持有进程内唯一的事件循环，负责主窗口的事件分发和生命周期

use crate::bootstrap::{Application, MainWindow};
use crate::error::Result;
use crate::i18n::Translator;
use crate::style::StyleSheet;
use crate::window::OcrWindow;
use directories::ProjectDirs;
use winit::{
    application::ApplicationHandler,
    error::EventLoopError,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::WindowId,
};

pub const APP_NAME: &str = "GoogleVisionOCR";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const ORGANIZATION_NAME: &str = "Shohei";
pub const ORGANIZATION_DOMAIN: &str = "shoheisoftware.com";

/// 应用程序元数据
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppMetadata {
    pub name: &'static str,
    pub version: &'static str,
    pub organization: &'static str,
    pub domain: &'static str,
}

impl AppMetadata {
    pub const fn current() -> Self {
        Self {
            name: APP_NAME,
            version: APP_VERSION,
            organization: ORGANIZATION_NAME,
            domain: ORGANIZATION_DOMAIN,
        }
    }
}

/// 用户配置、数据目录
pub fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", ORGANIZATION_NAME, APP_NAME)
}

/// 桌面应用程序对象
///
/// winit 不允许在同一进程内创建第二个事件循环
pub struct OcrApplication {
    event_loop: EventLoop<()>,
    metadata: AppMetadata,
    style: StyleSheet,
    translator: Option<Translator>,
}

impl OcrApplication {
    pub fn new() -> Result<Self> {
        let event_loop = EventLoop::new()?;
        Ok(Self {
            event_loop,
            metadata: AppMetadata::current(),
            style: StyleSheet::default(),
            translator: None,
        })
    }
}

impl Application for OcrApplication {
    type Window = OcrWindow;
    type Translator = Translator;

    fn set_metadata(&mut self, metadata: AppMetadata) {
        self.metadata = metadata;
    }

    fn set_style_sheet(&mut self, sheet: &str) {
        match StyleSheet::parse(sheet) {
            Ok(style) => self.style = style,
            Err(e) => log::warn!("样式表无效，已忽略: {}", e),
        }
    }

    fn install_translator(&mut self, translator: Translator) {
        match translator.install() {
            Ok(()) => {
                log::debug!("已加载界面语言: {}", translator.language());
                self.translator = Some(translator);
            }
            Err(e) => log::warn!("加载界面语言失败: {}", e),
        }
    }

    fn exec(self, mut window: OcrWindow) -> i32 {
        log::debug!(
            "{} {} ({}) 进入事件循环，界面语言: {}",
            self.metadata.name,
            self.metadata.version,
            self.metadata.domain,
            self.translator
                .as_ref()
                .map_or_else(|| "默认".to_string(), |t| t.language().to_string())
        );
        window.set_app_name(self.metadata.name);

        let mut handler = EventHandler {
            window,
            style: self.style,
            exit_code: 0,
        };

        match self.event_loop.run_app(&mut handler) {
            Ok(()) => handler.exit_code,
            Err(EventLoopError::ExitFailure(code)) => code,
            Err(e) => {
                log::error!("运行事件循环失败: {}", e);
                1
            }
        }
    }
}

/// 事件循环回调
struct EventHandler {
    window: OcrWindow,
    style: StyleSheet,
    exit_code: i32,
}

impl ApplicationHandler for EventHandler {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        event_loop.set_control_flow(ControlFlow::Wait);

        if let Err(e) = self.window.realize(event_loop, &self.style) {
            log::error!("{}", e);
            self.exit_code = 1;
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        if !self.window.owns(window_id) {
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                self.window.remember_geometry();
                event_loop.exit();
            }
            WindowEvent::Resized(size) => self.window.resized(size),
            WindowEvent::DroppedFile(path) => self.window.open_file(&path),
            _ => {}
        }
    }
}
