//! Language registry: single source of truth for all supported languages.
//!
//! The registry is immutable static data, initialized once behind an
//! `OnceLock`. Everything that validates or enumerates languages goes
//! through it.

use std::sync::OnceLock;

/// Configuration for a supported language.
#[derive(Debug, Clone)]
pub struct LanguageConfig {
    /// Language code as used in locale file names (e.g., "de", "en", "zh-cn")
    pub code: &'static str,

    /// English name of the language (e.g., "German", "English")
    pub name: &'static str,

    /// Native name of the language (e.g., "Deutsch", "English", "中文")
    pub native_name: &'static str,

    /// Whether this is the fallback language (only one should be true)
    pub is_fallback: bool,

    /// Whether this language is enabled for use
    pub enabled: bool,
}

/// Global language registry.
///
/// Initialized on first access and immutable thereafter.
pub struct LanguageRegistry {
    languages: Vec<LanguageConfig>,
}

static REGISTRY: OnceLock<LanguageRegistry> = OnceLock::new();

impl LanguageRegistry {
    /// Get the global language registry instance.
    pub fn get() -> &'static LanguageRegistry {
        REGISTRY.get_or_init(|| LanguageRegistry {
            languages: default_languages(),
        })
    }

    /// Get a language configuration by its code.
    pub fn get_by_code(&self, code: &str) -> Option<&LanguageConfig> {
        self.languages.iter().find(|lang| lang.code == code)
    }

    /// Get all enabled languages, in registry order.
    pub fn list_enabled(&self) -> Vec<&LanguageConfig> {
        self.languages.iter().filter(|lang| lang.enabled).collect()
    }

    /// Get all languages (including disabled ones).
    pub fn list_all(&self) -> Vec<&LanguageConfig> {
        self.languages.iter().collect()
    }

    /// Get the fallback language configuration.
    ///
    /// The fallback is the language used when a requested or detected
    /// language is unsupported or fails to load. There must be exactly one.
    ///
    /// # Panics
    /// Panics if zero or multiple fallback languages are defined (a
    /// configuration error in `default_languages`).
    pub fn fallback(&self) -> &LanguageConfig {
        let fallbacks: Vec<_> = self
            .languages
            .iter()
            .filter(|lang| lang.is_fallback)
            .collect();

        match fallbacks.len() {
            0 => panic!("No fallback language found in registry"),
            1 => fallbacks[0],
            _ => panic!("Multiple fallback languages found in registry"),
        }
    }

    /// Check if a language code is supported and enabled.
    pub fn is_enabled(&self, code: &str) -> bool {
        self.get_by_code(code)
            .map(|lang| lang.enabled)
            .unwrap_or(false)
    }
}

/// The fixed set of supported languages.
///
/// German is the fallback: the protocol documents this toolkit validates are
/// authored in German, so it is the one locale guaranteed to exist.
fn default_languages() -> Vec<LanguageConfig> {
    vec![
        LanguageConfig {
            code: "de",
            name: "German",
            native_name: "Deutsch",
            is_fallback: true,
            enabled: true,
        },
        LanguageConfig {
            code: "en",
            name: "English",
            native_name: "English",
            is_fallback: false,
            enabled: true,
        },
        LanguageConfig {
            code: "es",
            name: "Spanish",
            native_name: "Español",
            is_fallback: false,
            enabled: true,
        },
        LanguageConfig {
            code: "fr",
            name: "French",
            native_name: "Français",
            is_fallback: false,
            enabled: true,
        },
        LanguageConfig {
            code: "it",
            name: "Italian",
            native_name: "Italiano",
            is_fallback: false,
            enabled: true,
        },
        LanguageConfig {
            code: "zh-cn",
            name: "Chinese (Simplified)",
            native_name: "中文",
            is_fallback: false,
            enabled: true,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_get_returns_singleton() {
        let registry1 = LanguageRegistry::get();
        let registry2 = LanguageRegistry::get();

        assert!(std::ptr::eq(registry1, registry2));
    }

    #[test]
    fn test_get_by_code_german() {
        let config = LanguageRegistry::get().get_by_code("de").unwrap();

        assert_eq!(config.code, "de");
        assert_eq!(config.name, "German");
        assert_eq!(config.native_name, "Deutsch");
        assert!(config.is_fallback);
        assert!(config.enabled);
    }

    #[test]
    fn test_get_by_code_chinese_uses_full_code() {
        let config = LanguageRegistry::get().get_by_code("zh-cn").unwrap();
        assert_eq!(config.native_name, "中文");

        // The bare family code is not a registry entry
        assert!(LanguageRegistry::get().get_by_code("zh").is_none());
    }

    #[test]
    fn test_get_by_code_nonexistent() {
        assert!(LanguageRegistry::get().get_by_code("pt").is_none());
        assert!(LanguageRegistry::get().get_by_code("").is_none());
    }

    #[test]
    fn test_list_enabled_contains_all_six() {
        let enabled = LanguageRegistry::get().list_enabled();

        assert_eq!(enabled.len(), 6);
        for code in ["de", "en", "es", "fr", "it", "zh-cn"] {
            assert!(enabled.iter().any(|lang| lang.code == code));
        }
    }

    #[test]
    fn test_list_all_matches_list_enabled() {
        // No disabled languages in the default registry
        let registry = LanguageRegistry::get();
        assert_eq!(registry.list_all().len(), registry.list_enabled().len());
    }

    #[test]
    fn test_fallback_is_german() {
        let fallback = LanguageRegistry::get().fallback();

        assert_eq!(fallback.code, "de");
        assert!(fallback.is_fallback);
    }

    #[test]
    fn test_exactly_one_fallback() {
        let count = LanguageRegistry::get()
            .list_all()
            .iter()
            .filter(|lang| lang.is_fallback)
            .count();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_is_enabled() {
        let registry = LanguageRegistry::get();
        assert!(registry.is_enabled("en"));
        assert!(registry.is_enabled("zh-cn"));
        assert!(!registry.is_enabled("ja"));
    }
}
