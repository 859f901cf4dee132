//! Locale loaders: fetch the translation mapping for a language.
//!
//! The provider only knows the `LocaleLoader` seam; behind it live an HTTP
//! loader for hosted locale directories and a filesystem loader for local
//! trees. Errors are a typed, cloneable `LoaderError` because a single load
//! result may be handed to several waiters sharing one in-flight future.

use crate::i18n::{Language, Mapping};
use crate::retry::{with_retry_if, RetryConfig};
use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;
use tracing::debug;

/// Failure to produce a mapping for a language.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LoaderError {
    /// The locale source answered with a non-success status
    #[error("HTTP {status} fetching locale '{code}' from {url}")]
    Http {
        status: u16,
        code: String,
        url: String,
    },

    /// The locale source could not be reached (network or I/O failure)
    #[error("Failed to fetch locale '{code}': {message}")]
    Unreachable { code: String, message: String },

    /// The locale document was fetched but is not a valid translation tree
    #[error("Locale '{code}' is not a valid translation tree: {message}")]
    Decode { code: String, message: String },
}

impl LoaderError {
    /// Transient failures (server errors, rate limiting, unreachable source)
    /// are worth one more attempt; client errors and decode errors are not.
    pub fn is_transient(&self) -> bool {
        match self {
            LoaderError::Http { status, .. } => *status == 429 || *status >= 500,
            LoaderError::Unreachable { .. } => true,
            LoaderError::Decode { .. } => false,
        }
    }
}

/// Source of translation mappings, one JSON document per language.
#[async_trait]
pub trait LocaleLoader: Send + Sync {
    /// Fetch and decode the mapping for `language`.
    async fn fetch(&self, language: Language) -> Result<Mapping, LoaderError>;
}

/// Loader for a hosted locale directory laid out as `{base_url}/{code}.json`.
#[derive(Debug, Clone)]
pub struct HttpLocaleLoader {
    client: reqwest::Client,
    base_url: String,
}

impl HttpLocaleLoader {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    fn locale_url(&self, language: Language) -> String {
        format!("{}/{}.json", self.base_url, language.code())
    }

    async fn fetch_once(&self, language: Language) -> Result<Mapping, LoaderError> {
        let code = language.code();
        let url = self.locale_url(language);
        debug!("Fetching locale '{}' from {}", code, url);

        let response =
            self.client
                .get(&url)
                .send()
                .await
                .map_err(|e| LoaderError::Unreachable {
                    code: code.to_string(),
                    message: e.to_string(),
                })?;

        if !response.status().is_success() {
            return Err(LoaderError::Http {
                status: response.status().as_u16(),
                code: code.to_string(),
                url,
            });
        }

        let body = response.bytes().await.map_err(|e| LoaderError::Unreachable {
            code: code.to_string(),
            message: e.to_string(),
        })?;

        serde_json::from_slice(&body).map_err(|e| LoaderError::Decode {
            code: code.to_string(),
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl LocaleLoader for HttpLocaleLoader {
    async fn fetch(&self, language: Language) -> Result<Mapping, LoaderError> {
        with_retry_if(
            &RetryConfig::locale_fetch(),
            &format!("Locale fetch '{}'", language.code()),
            || self.fetch_once(language),
            LoaderError::is_transient,
        )
        .await
    }
}

/// Loader for a local locale directory laid out as `{dir}/{code}.json`.
#[derive(Debug, Clone)]
pub struct FsLocaleLoader {
    dir: PathBuf,
}

impl FsLocaleLoader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

#[async_trait]
impl LocaleLoader for FsLocaleLoader {
    async fn fetch(&self, language: Language) -> Result<Mapping, LoaderError> {
        let code = language.code();
        let path = self.dir.join(format!("{}.json", code));
        debug!("Reading locale '{}' from {}", code, path.display());

        let body =
            tokio::fs::read(&path)
                .await
                .map_err(|e| LoaderError::Unreachable {
                    code: code.to_string(),
                    message: format!("{}: {}", path.display(), e),
                })?;

        serde_json::from_slice(&body).map_err(|e| LoaderError::Decode {
            code: code.to_string(),
            message: e.to_string(),
        })
    }
}
