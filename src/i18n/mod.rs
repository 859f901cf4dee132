//! Internationalization (i18n) module.
//!
//! Centralized language handling: the supported-language registry, the
//! validated `Language` type, translation mapping trees, locale loading,
//! and the `TranslationProvider` that ties them together for one UI
//! session.
//!
//! # Architecture
//!
//! - `registry`: single source of truth for supported languages
//! - `language`: validated Language type + browser-tag detection
//! - `mapping`: tagged translation tree, dot-path lookup, interpolation
//! - `loader`: `LocaleLoader` seam with HTTP and filesystem loaders
//! - `store` / `document`: persistence and UI seams
//! - `provider`: cache, in-flight load de-duplication, observers
//! - `metrics`: per-provider cache/load counters
//!
//! # Example
//!
//! ```rust,ignore
//! use lrp_toolkit::i18n::{FsLocaleLoader, LoggingDocumentBinding,
//!     MemoryPreferenceStore, TranslationProvider};
//! use std::sync::Arc;
//!
//! let provider = TranslationProvider::new(
//!     Arc::new(FsLocaleLoader::new("locales")),
//!     Arc::new(MemoryPreferenceStore::new()),
//!     Arc::new(LoggingDocumentBinding),
//! );
//! provider.init(Some("en-US")).await;
//! let title = provider.translate("ui.title");
//! ```

mod document;
mod language;
mod loader;
mod mapping;
mod metrics;
mod provider;
mod registry;
mod store;

pub use document::{DocumentBinding, LoggingDocumentBinding};
pub use language::Language;
pub use loader::{FsLocaleLoader, HttpLocaleLoader, LoaderError, LocaleLoader};
pub use mapping::{interpolate, Mapping, Message};
pub use metrics::{MetricsReport, ProviderMetrics};
pub use provider::{SubscriberId, TextDirection, TranslationProvider};
pub use registry::{LanguageConfig, LanguageRegistry};
pub use store::{FilePreferenceStore, MemoryPreferenceStore, PreferenceStore};
