//! Language preference persistence: a single string slot.
//!
//! The provider persists nothing but the active language code. The seam is
//! deliberately tiny so a browser's key-value storage, a config file, or an
//! in-memory fake all fit behind it.

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::Mutex;

/// One persisted string: the active language code.
pub trait PreferenceStore: Send + Sync {
    /// Read the stored code, if any. Absence is not an error.
    fn load(&self) -> Option<String>;

    /// Persist the code, replacing any previous value.
    fn save(&self, code: &str) -> Result<()>;
}

/// Preference slot backed by a single small file.
#[derive(Debug)]
pub struct FilePreferenceStore {
    path: PathBuf,
}

impl FilePreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn load(&self) -> Option<String> {
        let contents = std::fs::read_to_string(&self.path).ok()?;
        let code = contents.trim();
        if code.is_empty() {
            None
        } else {
            Some(code.to_string())
        }
    }

    fn save(&self, code: &str) -> Result<()> {
        std::fs::write(&self.path, code)
            .with_context(|| format!("Failed to write language preference to {}", self.path.display()))
    }
}

/// In-memory preference slot, used in tests and as a no-persistence default.
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    value: Mutex<Option<String>>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seed the stored value, as if a previous session had saved it.
    pub fn with_value(code: &str) -> Self {
        Self {
            value: Mutex::new(Some(code.to_string())),
        }
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn load(&self) -> Option<String> {
        self.value.lock().expect("preference lock poisoned").clone()
    }

    fn save(&self, code: &str) -> Result<()> {
        *self.value.lock().expect("preference lock poisoned") = Some(code.to_string());
        Ok(())
    }
}
