//! Translation provider: language state, mapping cache, lookup, observers.
//!
//! The provider is an explicitly constructed instance (no global engine).
//! It owns the per-language mapping cache and the in-flight load map; a
//! second request for a language already being loaded attaches to the same
//! pending load instead of fetching twice. All failures on the
//! `set_language` path are absorbed and logged, never returned to the
//! caller: the worst outcome of a broken locale source is that the UI keeps
//! its previous language.

use crate::i18n::{
    interpolate, DocumentBinding, Language, LanguageConfig, LanguageRegistry, LoaderError,
    LocaleLoader, Mapping, PreferenceStore, ProviderMetrics,
};
use futures::future::{BoxFuture, FutureExt, Shared};
use std::collections::HashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, Mutex};
use tracing::{error, info, warn};

/// A pending locale load, shareable between concurrent requesters.
type SharedLoad = Shared<BoxFuture<'static, Result<Arc<Mapping>, LoaderError>>>;

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriberId(u64);

type Callback = Arc<dyn Fn(Language) + Send + Sync>;

/// Text direction of the current language, from the mapping's `meta.direction`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextDirection {
    #[default]
    Ltr,
    Rtl,
}

struct ProviderState {
    current: Language,
    cache: HashMap<Language, Arc<Mapping>>,
    pending: HashMap<Language, SharedLoad>,
}

#[derive(Default)]
struct Subscribers {
    next_id: u64,
    entries: Vec<(SubscriberId, Callback)>,
}

/// Language state and translation lookup for one UI session.
pub struct TranslationProvider {
    loader: Arc<dyn LocaleLoader>,
    store: Arc<dyn PreferenceStore>,
    document: Arc<dyn DocumentBinding>,
    metrics: ProviderMetrics,
    state: Mutex<ProviderState>,
    subscribers: Mutex<Subscribers>,
}

impl TranslationProvider {
    /// Create a provider. The current language starts as the fallback until
    /// `init` or `set_language` switches it.
    pub fn new(
        loader: Arc<dyn LocaleLoader>,
        store: Arc<dyn PreferenceStore>,
        document: Arc<dyn DocumentBinding>,
    ) -> Self {
        Self {
            loader,
            store,
            document,
            metrics: ProviderMetrics::new(),
            state: Mutex::new(ProviderState {
                current: Language::fallback(),
                cache: HashMap::new(),
                pending: HashMap::new(),
            }),
            subscribers: Mutex::new(Subscribers::default()),
        }
    }

    /// Resolve and activate the initial language.
    ///
    /// Detection order: stored preference, then the reported environment or
    /// browser tag, then the fallback.
    pub async fn init(&self, reported_tag: Option<&str>) {
        let code = self
            .store
            .load()
            .or_else(|| {
                reported_tag
                    .and_then(Language::detect)
                    .map(|language| language.code().to_string())
            })
            .unwrap_or_else(|| Language::fallback().code().to_string());

        self.set_language(&code).await;
    }

    /// Switch the active language.
    ///
    /// Unsupported codes are substituted with the fallback. A failed load
    /// retries once with the fallback language; if that also fails, the
    /// current language is left unchanged. Never returns an error.
    pub async fn set_language(&self, code: &str) {
        let fallback = Language::fallback();
        let requested = match Language::from_code(code) {
            Ok(language) => language,
            Err(e) => {
                warn!(
                    "Unsupported language '{}' ({}), falling back to '{}'",
                    code,
                    e,
                    fallback.code()
                );
                fallback
            }
        };

        match self.activate(requested).await {
            Ok(()) => return,
            Err(e) => warn!("Failed to set language to '{}': {}", requested.code(), e),
        }

        if requested != fallback {
            match self.activate(fallback).await {
                Ok(()) => return,
                Err(e) => warn!(
                    "Failed to set fallback language '{}': {}",
                    fallback.code(),
                    e
                ),
            }
        }

        error!(
            "Language change to '{}' abandoned, keeping '{}'",
            code,
            self.current_language().code()
        );
    }

    /// Load the mapping for `language` and make it current, applying all
    /// document side effects and notifying subscribers.
    async fn activate(&self, language: Language) -> Result<(), LoaderError> {
        self.load_mapping(language).await?;

        {
            let mut state = self.state.lock().expect("provider state lock poisoned");
            state.current = language;
        }

        // Best-effort side effects; none of these can fail the switch
        if let Err(e) = self.store.save(language.code()) {
            warn!("Failed to persist language preference: {}", e);
        }
        self.document.set_language_attribute(language);
        self.document.set_title(&self.translate("ui.title"));
        self.document
            .refresh_selector(&LanguageRegistry::get().list_enabled(), language);

        self.notify(language);
        info!("Language set to '{}'", language.code());
        Ok(())
    }

    /// Get the mapping for a language, loading it at most once.
    ///
    /// Concurrent callers for the same not-yet-loaded language share one
    /// pending load.
    async fn load_mapping(&self, language: Language) -> Result<Arc<Mapping>, LoaderError> {
        let load = {
            let mut state = self.state.lock().expect("provider state lock poisoned");

            if let Some(mapping) = state.cache.get(&language) {
                self.metrics.record_cache_hit();
                return Ok(mapping.clone());
            }
            self.metrics.record_cache_miss();

            if let Some(pending) = state.pending.get(&language) {
                pending.clone()
            } else {
                self.metrics.record_load();
                let loader = self.loader.clone();
                let load = async move { loader.fetch(language).await.map(Arc::new) }
                    .boxed()
                    .shared();
                state.pending.insert(language, load.clone());
                load
            }
        };

        let result = load.await;

        let mut state = self.state.lock().expect("provider state lock poisoned");
        let was_pending = state.pending.remove(&language).is_some();
        match result {
            Ok(mapping) => {
                state
                    .cache
                    .entry(language)
                    .or_insert_with(|| mapping.clone());
                Ok(mapping)
            }
            Err(e) => {
                // Count the failure once, not once per waiter
                if was_pending {
                    self.metrics.record_load_failure();
                }
                Err(e)
            }
        }
    }

    /// Look up a translation by dot-separated key.
    ///
    /// Misses fall back to the fallback language's mapping; a miss in both
    /// returns the key itself. Never fails.
    pub fn translate(&self, key: &str) -> String {
        self.translate_with(key, &[])
    }

    /// Look up a translation and substitute `{name}` placeholders from
    /// `params`. Unmatched placeholders are left verbatim.
    pub fn translate_with(&self, key: &str, params: &[(&str, &str)]) -> String {
        let state = self.state.lock().expect("provider state lock poisoned");

        let resolved = state
            .cache
            .get(&state.current)
            .and_then(|mapping| mapping.resolve(key))
            .or_else(|| {
                state
                    .cache
                    .get(&Language::fallback())
                    .and_then(|mapping| mapping.resolve(key))
            });

        match resolved {
            Some(text) => interpolate(text, params),
            None => {
                warn!("Translation missing for key: {}", key);
                key.to_string()
            }
        }
    }

    /// Register a callback invoked with the new language after every
    /// successful language change.
    pub fn subscribe(&self, callback: impl Fn(Language) + Send + Sync + 'static) -> SubscriberId {
        let mut subscribers = self.subscribers.lock().expect("subscriber lock poisoned");
        subscribers.next_id += 1;
        let id = SubscriberId(subscribers.next_id);
        subscribers.entries.push((id, Arc::new(callback)));
        id
    }

    /// Remove a subscriber. Returns false if the id was already removed.
    pub fn unsubscribe(&self, id: SubscriberId) -> bool {
        let mut subscribers = self.subscribers.lock().expect("subscriber lock poisoned");
        let before = subscribers.entries.len();
        subscribers.entries.retain(|(entry_id, _)| *entry_id != id);
        subscribers.entries.len() < before
    }

    /// Notify all subscribers. A panicking subscriber is logged and skipped;
    /// the rest are still notified.
    fn notify(&self, language: Language) {
        let callbacks: Vec<(SubscriberId, Callback)> = {
            let subscribers = self.subscribers.lock().expect("subscriber lock poisoned");
            subscribers.entries.clone()
        };

        for (id, callback) in callbacks {
            if catch_unwind(AssertUnwindSafe(|| callback(language))).is_err() {
                error!("Language-change subscriber {:?} panicked", id);
            }
        }
    }

    /// The currently active language.
    pub fn current_language(&self) -> Language {
        self.state
            .lock()
            .expect("provider state lock poisoned")
            .current
    }

    /// Enabled languages, in registry order, for a selection control.
    pub fn languages(&self) -> Vec<&'static LanguageConfig> {
        LanguageRegistry::get().list_enabled()
    }

    /// Text direction declared by the current mapping's `meta.direction`
    /// leaf. Defaults to left-to-right.
    pub fn text_direction(&self) -> TextDirection {
        let state = self.state.lock().expect("provider state lock poisoned");
        let direction = state
            .cache
            .get(&state.current)
            .and_then(|mapping| mapping.resolve("meta.direction"));

        match direction {
            Some("rtl") => TextDirection::Rtl,
            _ => TextDirection::Ltr,
        }
    }

    pub fn is_rtl(&self) -> bool {
        self.text_direction() == TextDirection::Rtl
    }

    /// Cache and load counters for this provider.
    pub fn metrics(&self) -> &ProviderMetrics {
        &self.metrics
    }
}
