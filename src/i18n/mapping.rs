//! Translation mapping: the tree of localized strings for one language.
//!
//! A mapping is a tree of string keys to either nested sub-trees or leaf
//! strings, deserialized straight from a locale JSON document. Lookup is an
//! explicit recursive descent over dot-separated paths; a miss is an
//! explicit `None`, never a panic.

use regex::Regex;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::OnceLock;

/// One node of a translation tree: either a leaf string or a nested section.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Message {
    /// Localized text, possibly containing `{name}` placeholders
    Leaf(String),

    /// Nested section of further keys
    Node(HashMap<String, Message>),
}

/// The full translation mapping for one language.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Mapping {
    root: HashMap<String, Message>,
}

// Placeholder pattern, compiled once
static PLACEHOLDER_REGEX: OnceLock<Regex> = OnceLock::new();

fn placeholder_regex() -> &'static Regex {
    PLACEHOLDER_REGEX.get_or_init(|| Regex::new(r"\{(\w+)\}").unwrap())
}

impl Mapping {
    /// Create an empty mapping.
    pub fn empty() -> Self {
        Self {
            root: HashMap::new(),
        }
    }

    /// Resolve a dot-separated key path to a leaf string.
    ///
    /// Descends the tree one segment at a time. Returns `None` when a
    /// segment is missing or when the path ends on a section instead of a
    /// leaf.
    pub fn resolve(&self, path: &str) -> Option<&str> {
        let mut segments = path.split('.');
        let first = segments.next()?;
        let mut current = self.root.get(first)?;

        for segment in segments {
            match current {
                Message::Node(children) => current = children.get(segment)?,
                Message::Leaf(_) => return None,
            }
        }

        match current {
            Message::Leaf(text) => Some(text),
            Message::Node(_) => None,
        }
    }

    /// Check whether the mapping contains any entries at all.
    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }
}

/// Substitute `{name}` placeholders in a resolved string.
///
/// Each occurrence is replaced by the matching param value; placeholders
/// with no matching param are left verbatim.
pub fn interpolate(text: &str, params: &[(&str, &str)]) -> String {
    placeholder_regex()
        .replace_all(text, |caps: &regex::Captures<'_>| {
            let name = &caps[1];
            match params.iter().find(|(key, _)| *key == name) {
                Some((_, value)) => value.to_string(),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}
