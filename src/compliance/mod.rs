//! Compliance checkers for the LRP document flow.
//!
//! Two pure, stateless checkers over input text:
//!
//! - `document`: deduction-scored validation of a generated LRP document
//!   against its required section markers and embedded YAML metadata
//! - `response`: pass/fail validation that a downstream response followed
//!   the scripted two-step confirmation protocol
//!
//! Both never fail; missing content is reported as violations, not errors.

pub mod document;
pub mod response;

pub use document::{ValidationResult, PASS_THRESHOLD};
pub use response::ResponseVerdict;
