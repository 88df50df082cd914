//! 界面翻译模块
//!
//! 翻译文件以 fluent 格式嵌入程序，回退语言为 en-US

use i18n_embed::{
    fluent::{fluent_language_loader, FluentLanguageLoader},
    DesktopLanguageRequester, I18nEmbedError, LanguageLoader,
};
use once_cell::sync::Lazy;
use rust_embed::RustEmbed;
use unic_langid::LanguageIdentifier;

#[derive(RustEmbed)]
#[folder = "i18n/"]
struct Localizations;

pub static LANGUAGE_LOADER: Lazy<FluentLanguageLoader> = Lazy::new(|| {
    let loader = fluent_language_loader!();
    loader
        .load_fallback_language(&Localizations)
        .expect("Failed to load fallback language");
    // 窗口标题里不需要双向文本隔离符
    loader.set_use_isolating(false);
    loader
});

/// 与系统语言匹配的翻译
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translator {
    language: LanguageIdentifier,
}

impl Translator {
    /// 在可用翻译中查找与请求语言匹配的一项
    ///
    /// 没有匹配时返回 None
    pub fn load(requested: &[LanguageIdentifier]) -> Option<Self> {
        let available = LANGUAGE_LOADER.available_languages(&Localizations).ok()?;
        negotiate(requested, &available).map(|language| Self { language })
    }

    pub fn language(&self) -> &LanguageIdentifier {
        &self.language
    }

    /// 切换全局翻译到该语言
    pub fn install(&self) -> Result<(), I18nEmbedError> {
        i18n_embed::select(
            &*LANGUAGE_LOADER,
            &Localizations,
            std::slice::from_ref(&self.language),
        )
        .map(|_| ())
    }
}

/// 按系统语言设置加载翻译
pub fn load_system_translator() -> Option<Translator> {
    let requested = DesktopLanguageRequester::requested_languages();
    Translator::load(&requested)
}

/// 先找完全一致的语言，再找主语言相同的
fn negotiate(
    requested: &[LanguageIdentifier],
    available: &[LanguageIdentifier],
) -> Option<LanguageIdentifier> {
    requested.iter().find_map(|wanted| {
        available
            .iter()
            .find(|candidate| *candidate == wanted)
            .or_else(|| {
                available
                    .iter()
                    .find(|candidate| candidate.language == wanted.language)
            })
            .cloned()
    })
}

/// 获取翻译后的字符串
#[macro_export]
macro_rules! fl {
    ($key:expr) => {
        i18n_embed_fl::fl!($crate::i18n::LANGUAGE_LOADER, $key)
    };
    ($key:expr, $($arg:tt)*) => {
        i18n_embed_fl::fl!($crate::i18n::LANGUAGE_LOADER, $key, $($arg)*)
    };
}
