//! Document binding: the seam to whatever displays the UI.
//!
//! The provider's side effects on the surrounding document (language
//! attribute, title, selection control) go through this trait. All of them
//! are best-effort; a binding has no way to fail the provider.

use crate::i18n::{Language, LanguageConfig};
use tracing::debug;

/// Receiver for the provider's document-level side effects.
pub trait DocumentBinding: Send + Sync {
    /// Update the document's language attribute.
    fn set_language_attribute(&self, language: Language);

    /// Update the document title.
    fn set_title(&self, title: &str);

    /// Refresh the language-selection control to show `current` as active.
    /// `available` lists the enabled languages in registry order.
    fn refresh_selector(&self, available: &[&'static LanguageConfig], current: Language);
}

/// Binding that only logs, for headless use (CLI, tests without a UI).
#[derive(Debug, Default)]
pub struct LoggingDocumentBinding;

impl DocumentBinding for LoggingDocumentBinding {
    fn set_language_attribute(&self, language: Language) {
        debug!("Document language set to '{}'", language.code());
    }

    fn set_title(&self, title: &str) {
        debug!("Document title set to '{}'", title);
    }

    fn refresh_selector(&self, available: &[&'static LanguageConfig], current: Language) {
        debug!(
            "Language selector: {} options, current '{}'",
            available.len(),
            current.code()
        );
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::LanguageRegistry;

    #[test]
    fn test_logging_binding_does_not_panic() {
        let binding = LoggingDocumentBinding;
        let language = Language::fallback();

        binding.set_language_attribute(language);
        binding.set_title("LRP Generator");
        binding.refresh_selector(&LanguageRegistry::get().list_enabled(), language);
    }
}
