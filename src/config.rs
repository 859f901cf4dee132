use anyhow::Result;

#[derive(Debug, Clone)]
pub struct Config {
    // Locales
    pub locales_source: String,

    // Preference persistence
    pub preference_file: String,

    // Detection override (e.g. "en-US"); falls back to the LANG variable
    pub reported_language: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            // Either an http(s) locale directory or a local path
            locales_source: std::env::var("LRP_LOCALES")
                .unwrap_or_else(|_| "locales".to_string()),

            preference_file: std::env::var("LRP_PREFERENCE_FILE")
                .unwrap_or_else(|_| ".lrp-language".to_string()),

            reported_language: std::env::var("LRP_LANGUAGE")
                .ok()
                .or_else(|| std::env::var("LANG").ok().map(normalize_lang_var)),
        })
    }
}

/// Turn a POSIX LANG value like "en_US.UTF-8" into a browser-style tag.
fn normalize_lang_var(value: String) -> String {
    value
        .split('.')
        .next()
        .unwrap_or(&value)
        .replace('_', "-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        for key in ["LRP_LOCALES", "LRP_PREFERENCE_FILE", "LRP_LANGUAGE", "LANG"] {
            std::env::remove_var(key);
        }
    }

    #[test]
    #[serial]
    fn test_defaults() {
        clear_env();
        let config = Config::from_env().expect("Should succeed");

        assert_eq!(config.locales_source, "locales");
        assert_eq!(config.preference_file, ".lrp-language");
        assert_eq!(config.reported_language, None);
    }

    #[test]
    #[serial]
    fn test_explicit_values() {
        clear_env();
        std::env::set_var("LRP_LOCALES", "https://example.com/locales");
        std::env::set_var("LRP_PREFERENCE_FILE", "/tmp/lang");
        std::env::set_var("LRP_LANGUAGE", "es");

        let config = Config::from_env().expect("Should succeed");
        assert_eq!(config.locales_source, "https://example.com/locales");
        assert_eq!(config.preference_file, "/tmp/lang");
        assert_eq!(config.reported_language, Some("es".to_string()));

        clear_env();
    }

    #[test]
    #[serial]
    fn test_lang_var_normalized() {
        clear_env();
        std::env::set_var("LANG", "en_US.UTF-8");

        let config = Config::from_env().expect("Should succeed");
        assert_eq!(config.reported_language, Some("en-US".to_string()));

        clear_env();
    }

    #[test]
    #[serial]
    fn test_lrp_language_wins_over_lang() {
        clear_env();
        std::env::set_var("LANG", "en_US.UTF-8");
        std::env::set_var("LRP_LANGUAGE", "zh-cn");

        let config = Config::from_env().expect("Should succeed");
        assert_eq!(config.reported_language, Some("zh-cn".to_string()));

        clear_env();
    }

    #[test]
    fn test_normalize_lang_var() {
        assert_eq!(normalize_lang_var("de_DE.UTF-8".to_string()), "de-DE");
        assert_eq!(normalize_lang_var("C".to_string()), "C");
        assert_eq!(normalize_lang_var("fr_CA".to_string()), "fr-CA");
    }
}
