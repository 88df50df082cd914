//! 应用程序启动模块
//!
//! 按顺序完成日志、配置、应用对象、样式表、翻译、主窗口的初始化，
//! 运行事件循环，退出前保存配置。

use crate::app::{AppMetadata, OcrApplication, APP_NAME, APP_VERSION};
use crate::cli::{self, Args};
use crate::config::Config;
use crate::error::Result;
use crate::i18n::{self, Translator};
use crate::logger::{self, LogHandle};
use crate::style::STYLE_SHEET_PATH;
use crate::window::OcrWindow;
use log::LevelFilter;
use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// 日志级别控制
pub trait LogControl {
    fn set_level(&mut self, level: LevelFilter);
    fn level(&self) -> LevelFilter;
}

/// 可持久化的设置，读写错误由实现方自行处理
pub trait ConfigStore {
    fn load(&mut self);
    fn save(&self);
}

/// 主窗口
pub trait MainWindow {
    /// 打开文件，`path` 已是存在的绝对路径
    fn open_file(&mut self, path: &Path);
    fn show(&mut self);
}

/// GUI 应用程序对象，每个进程只有一个
pub trait Application {
    type Window: MainWindow;
    type Translator;

    fn set_metadata(&mut self, metadata: AppMetadata);
    fn set_style_sheet(&mut self, sheet: &str);
    fn install_translator(&mut self, translator: Self::Translator);

    /// 运行事件循环直到应用退出，返回退出码
    fn exec(self, window: Self::Window) -> i32;
}

/// 启动过程用到的各个组件的工厂
pub trait Platform {
    type Logger: LogControl;
    type Config: ConfigStore;
    type Window: MainWindow;
    type App: Application<Window = Self::Window>;

    fn init_logger(&mut self, level: LevelFilter) -> Self::Logger;
    fn create_config(&mut self) -> Self::Config;
    fn create_application(&mut self) -> Result<Self::App>;
    fn load_translator(&mut self) -> Option<<Self::App as Application>::Translator>;
    fn create_main_window(&mut self, config: Rc<RefCell<Self::Config>>) -> Self::Window;
    fn style_sheet_path(&self) -> PathBuf;
}

/// 桌面环境下的组件实现
#[derive(Debug, Default)]
pub struct DesktopPlatform;

impl Platform for DesktopPlatform {
    type Logger = LogHandle;
    type Config = Config;
    type Window = OcrWindow;
    type App = OcrApplication;

    fn init_logger(&mut self, level: LevelFilter) -> LogHandle {
        logger::init_logger(level)
    }

    fn create_config(&mut self) -> Config {
        Config::new()
    }

    fn create_application(&mut self) -> Result<OcrApplication> {
        OcrApplication::new()
    }

    fn load_translator(&mut self) -> Option<Translator> {
        i18n::load_system_translator()
    }

    fn create_main_window(&mut self, config: Rc<RefCell<Config>>) -> OcrWindow {
        OcrWindow::new(config)
    }

    fn style_sheet_path(&self) -> PathBuf {
        resource_path(STYLE_SHEET_PATH)
    }
}

/// 版本信息
pub fn version_string() -> String {
    format!("{} version {}", APP_NAME, APP_VERSION)
}

/// 查找资源文件
///
/// 优先使用工作目录下的文件，找不到则使用可执行文件所在目录下的路径
///
/// # 参数
///
/// * `relative` - 相对于安装目录的资源路径
///
/// # 返回值
///
/// 资源文件路径，文件不一定存在
pub fn resource_path(relative: &str) -> PathBuf {
    if let Ok(current_dir) = std::env::current_dir() {
        let candidate = current_dir.join(relative);
        if candidate.exists() {
            return candidate;
        }
    }

    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(relative)))
        .unwrap_or_else(|| PathBuf::from(relative))
}

/// 按启动顺序运行应用程序
///
/// 命令行中的文件会先转换为绝对路径，只有文件存在时才交给主窗口打开。
/// 配置在事件循环结束后保存一次。
///
/// # 参数
///
/// * `args` - 命令行参数
/// * `platform` - 提供日志、配置、应用对象和主窗口的组件工厂
///
/// # 返回值
///
/// 成功返回事件循环的退出码，应用程序对象创建失败时返回错误
pub fn run<P: Platform>(args: &Args, platform: &mut P) -> Result<i32> {
    if args.version {
        println!("{}", version_string());
        return Ok(0);
    }

    let mut logger = platform.init_logger(args.log_level.to_level_filter());
    log::info!("应用程序正在启动...");

    if args.debug {
        logger.set_level(LevelFilter::Debug);
        log::debug!("调试模式已启用");
    }
    log::debug!("当前日志级别: {}", logger.level());

    let mut config = platform.create_config();
    config.load();
    let config = Rc::new(RefCell::new(config));

    let mut app = platform.create_application()?;
    app.set_metadata(AppMetadata::current());

    let style_path = platform.style_sheet_path();
    if style_path.exists() {
        match fs::read_to_string(&style_path) {
            Ok(sheet) => app.set_style_sheet(&sheet),
            Err(e) => log::warn!("读取样式表失败: {} ({})", e, style_path.display()),
        }
    }

    if let Some(translator) = platform.load_translator() {
        app.install_translator(translator);
    }

    let mut window = platform.create_main_window(Rc::clone(&config));

    if let Some(file) = &args.file {
        match std::path::absolute(file) {
            Ok(path) if path.exists() => window.open_file(&path),
            Ok(path) => log::warn!("指定的文件不存在: {}", path.display()),
            Err(e) => log::warn!("无法解析文件路径: {} ({})", file.display(), e),
        }
    }

    window.show();
    let exit_code = app.exec(window);

    config.borrow().save();

    log::info!("应用程序已退出，退出码: {}", exit_code);
    Ok(exit_code)
}

/// 进程入口，返回退出码
pub fn main() -> i32 {
    let args = cli::parse_arguments();

    match run(&args, &mut DesktopPlatform) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            log::error!("应用运行失败: {}", e);
            show_error_dialog(&e.to_string());
            1
        }
    }
}

/// 显示错误对话框
///
/// Windows 下使用 MessageBox，其他平台输出到标准错误
#[cfg(windows)]
pub fn show_error_dialog(message: &str) {
    use windows::Win32::Foundation::HWND;
    use windows::Win32::UI::WindowsAndMessaging::{MessageBoxW, MB_ICONERROR, MB_OK};

    let message_wide: Vec<u16> = message.encode_utf16().chain(std::iter::once(0)).collect();
    let title_wide: Vec<u16> = APP_NAME.encode_utf16().chain(std::iter::once(0)).collect();

    unsafe {
        MessageBoxW(
            HWND(std::ptr::null_mut()),
            windows::core::PCWSTR(message_wide.as_ptr()),
            windows::core::PCWSTR(title_wide.as_ptr()),
            MB_ICONERROR | MB_OK,
        );
    }
}

#[cfg(not(windows))]
pub fn show_error_dialog(message: &str) {
    eprintln!("{}: {}", APP_NAME, message);
}
