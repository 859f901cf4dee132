//! Confirmation-protocol checking for downstream responses.
//!
//! The pre-selector instructions script a two-step exchange: the responder
//! first restates its understanding and asks for confirmation, and only
//! after a confirmed second branch may it generate the detector — nothing
//! more. This checker verifies a response followed that script. Unlike the
//! document checker there is no score: rules short-circuit in order and the
//! first failing rule supplies the single error message.

/// Phrases a conforming response must open its confirmation step with.
const CONFIRMATION_PHRASES: [&str; 3] = [
    "Ich verstehe:",
    "MEINE META-ERKENNTNIS",
    "Ist das korrekt? (JA/NEIN)",
];

/// Marker for the second branch of the protocol.
const BRANCH_TWO: &str = "Weg 2";

/// Topic the second branch must mention.
const BRANCH_TWO_TOPIC: &str = "OS/HW-Erkennung";

/// Confirmation token for the second branch.
const CONFIRMATION_TOKEN: &str = "JA";

/// Content that must not appear before the protocol allows the final
/// product to be generated.
const PREMATURE_CONTENT: [&str; 4] = [
    "Dashboard",
    "Maßnahmenkatalog",
    "Endprodukt",
    "komplettes System",
];

/// Verdict for one response. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseVerdict {
    /// Whether the response followed the confirmation protocol
    pub valid: bool,

    /// Message of the first failing rule, if any
    pub error: Option<String>,
}

impl ResponseVerdict {
    fn valid() -> Self {
        Self {
            valid: true,
            error: None,
        }
    }

    fn invalid(error: &str) -> Self {
        Self {
            valid: false,
            error: Some(error.to_string()),
        }
    }
}

/// Validate a downstream response against the confirmation protocol.
///
/// Rules are checked in order; the first failure wins:
/// 1. all three confirmation phrases must be present
/// 2. a response choosing the second branch must mention its topic
/// 3. a confirmed second branch must not already contain final-product
///    content
pub fn validate(response: &str) -> ResponseVerdict {
    let confirmation_followed = CONFIRMATION_PHRASES
        .iter()
        .all(|phrase| response.contains(phrase));
    if !confirmation_followed {
        return ResponseVerdict::invalid(
            "LLM hat PRE-Selector-Anweisung nicht befolgt - Kettenabbruchgefahr!",
        );
    }

    if response.contains(BRANCH_TWO) && !response.contains(BRANCH_TWO_TOPIC) {
        return ResponseVerdict::invalid(
            "LLM hat Weg 2 gewählt, aber OS/HW-Erkennung nicht erwähnt!",
        );
    }

    let premature = PREMATURE_CONTENT
        .iter()
        .any(|content| response.contains(content));
    if response.contains(BRANCH_TWO) && response.contains(CONFIRMATION_TOKEN) && premature {
        return ResponseVerdict::invalid(
            "LLM hat bei Weg 2 bereits Endprodukt generiert - Protokollbruch!",
        );
    }

    ResponseVerdict::valid()
}
