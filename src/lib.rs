//! LRP toolkit: localization engine and compliance validation for LRP
//! protocol documents.
//!
//! Two independent components:
//!
//! - [`i18n`]: language registry and detection, JSON translation trees with
//!   dot-path lookup and `{name}` interpolation, and a
//!   [`i18n::TranslationProvider`] that caches mappings, de-duplicates
//!   in-flight locale loads, and notifies subscribers on language changes.
//! - [`compliance`]: pure checkers that score a generated LRP document
//!   against its required section markers and verify a downstream response
//!   followed the scripted confirmation protocol.

pub mod compliance;
pub mod config;
pub mod i18n;
pub mod retry;
