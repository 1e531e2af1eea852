//! Report labels in English and French
//!
//! The language comes from the `language` config key: `en`, `fr`, or `auto`
//! to follow the locale environment (`LC_ALL`, then `LC_MESSAGES`, then `LANG`).

mod en;
mod fr;

use std::fmt;

/// Languages the report can be rendered in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    English,
    French,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::English, Language::French];

    /// ISO 639-1 code, as written in the config file
    pub fn code(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::French => "fr",
        }
    }

    /// Name of the language in that language
    pub fn native_name(self) -> &'static str {
        match self {
            Language::English => "English",
            Language::French => "Fran\u{00E7}ais",
        }
    }

    pub fn from_code(code: &str) -> Option<Language> {
        Self::ALL
            .into_iter()
            .find(|lang| lang.code().eq_ignore_ascii_case(code.trim()))
    }

    /// Language of a POSIX locale such as `fr_FR.UTF-8`. Unsupported locales give English.
    pub fn from_locale(locale: &str) -> Language {
        let code = locale
            .split(|c: char| c == '_' || c == '.' || c == '@')
            .next()
            .unwrap_or_default();
        Self::from_code(code).unwrap_or_default()
    }

    /// Language of the current process environment
    pub fn detect() -> Language {
        Self::detect_with(|name| std::env::var(name).ok())
    }

    fn detect_with(var: impl Fn(&str) -> Option<String>) -> Language {
        ["LC_ALL", "LC_MESSAGES", "LANG"]
            .into_iter()
            .filter_map(var)
            .find(|value| !value.is_empty())
            .map_or_else(Language::default, |locale| Self::from_locale(&locale))
    }

    /// Resolve a config setting; `auto` detects, anything unknown falls back to English
    pub fn resolve(setting: &str) -> Language {
        if setting.trim().eq_ignore_ascii_case("auto") {
            return Self::detect();
        }
        Self::from_code(setting).unwrap_or_else(|| {
            log::warn!("Unsupported language '{}', falling back to English", setting);
            Language::default()
        })
    }

    fn labels(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Language::English => en::LABELS,
            Language::French => fr::LABELS,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Label lookup for one language
pub struct I18n {
    language: Language,
}

impl I18n {
    /// Labels for a config setting (`en`, `fr` or `auto`)
    pub fn new(setting: &str) -> Self {
        let language = Language::resolve(setting);
        log::debug!("Report language: {}", language);
        Self { language }
    }

    /// Label for `key`. Missing keys are shown as the key itself.
    pub fn get<'a>(&self, key: &'a str) -> &'a str {
        self.language
            .labels()
            .iter()
            .find(|(k, _)| *k == key)
            .map_or(key, |&(_, label)| label)
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn current_language(&self) -> &'static str {
        self.language.code()
    }
}

impl Default for I18n {
    fn default() -> Self {
        Self::new("auto")
    }
}
