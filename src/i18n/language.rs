//! Language type: flexible, validated language representation.
//!
//! A `Language` can only be constructed for codes the registry knows about,
//! so the rest of the crate never has to re-validate language strings.
//! Detection of a preferred language from a browser/OS-reported tag also
//! lives here.

use crate::i18n::{LanguageConfig, LanguageRegistry};
use anyhow::{bail, Result};

/// A validated language.
///
/// Only supported, enabled languages can be constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Language {
    /// Language code (e.g., "de", "en", "zh-cn")
    code: &'static str,
}

impl Language {
    /// Create a Language from a language code string.
    ///
    /// # Returns
    /// * `Ok(Language)` if the code is known and the language is enabled
    /// * `Err` if the code is unknown or the language is disabled
    pub fn from_code(code: &str) -> Result<Language> {
        let registry = LanguageRegistry::get();

        match registry.get_by_code(code) {
            Some(config) if config.enabled => Ok(Language {
                code: config.code, // Use the static str from the registry
            }),
            Some(_) => bail!("Language '{}' is not enabled", code),
            None => bail!("Unknown language code: '{}'", code),
        }
    }

    /// Get the fallback language.
    ///
    /// Used whenever a requested or detected language is unsupported or
    /// fails to load.
    pub fn fallback() -> Language {
        let config = LanguageRegistry::get().fallback();
        Language { code: config.code }
    }

    /// Detect a supported language from a browser- or OS-reported tag.
    ///
    /// Matching order, mirroring how user agents report locales:
    /// 1. exact match on the lowercased tag (e.g., "zh-cn")
    /// 2. language-family match on the part before `-` (e.g., "en-US" -> "en")
    /// 3. any remaining `zh*` variant maps to "zh-cn"
    ///
    /// Returns `None` when nothing in the registry matches.
    pub fn detect(tag: &str) -> Option<Language> {
        let tag = tag.to_lowercase();

        if let Ok(language) = Language::from_code(&tag) {
            return Some(language);
        }

        let family = tag.split('-').next().unwrap_or(&tag);
        if let Ok(language) = Language::from_code(family) {
            return Some(language);
        }

        if tag.starts_with("zh") {
            return Language::from_code("zh-cn").ok();
        }

        None
    }

    /// Get the language code.
    pub fn code(&self) -> &'static str {
        self.code
    }

    /// Get the full language configuration from the registry.
    ///
    /// # Panics
    /// Panics if the code is not in the registry, which cannot happen for a
    /// properly constructed `Language`.
    pub fn config(&self) -> &'static LanguageConfig {
        LanguageRegistry::get()
            .get_by_code(self.code)
            .expect("Language code should always be valid")
    }

    /// Get the English name of the language.
    pub fn name(&self) -> &'static str {
        self.config().name
    }

    /// Get the native name of the language.
    pub fn native_name(&self) -> &'static str {
        self.config().native_name
    }

    /// Check if this is the fallback language.
    pub fn is_fallback(&self) -> bool {
        self.config().is_fallback
    }
}
