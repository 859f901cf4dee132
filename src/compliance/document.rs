//! Deduction-scored compliance checking for generated LRP documents.
//!
//! A document is checked against a fixed, ordered rule table of required
//! section markers and instructions. Every rule runs regardless of earlier
//! results; each failure subtracts its deduction from a starting score of
//! 100 and contributes one violation message. The checker itself never
//! fails: an empty document simply collects every applicable deduction.

use regex::Regex;
use std::sync::OnceLock;

/// Minimum score for a document to count as compliant.
pub const PASS_THRESHOLD: u8 = 80;

/// Required machine-readable metadata heading.
const METADATA_MARKER: &str = "## METADATEN (MASCHINENLESBAR)";

/// Required auto-generated user-request heading.
const USER_REQUEST_MARKER: &str = "## USER-REQUEST (AUTOMATISCH GENERIERT)";

/// Required closing system instruction for the pre-selector.
const FINAL_INSTRUCTION_MARKER: &str =
    "5. **ABSCHLIESSENDE SYSTEMANWEISUNG (NICHT IGNORIERBAR)**";

/// Required response-language directive.
const LANGUAGE_DIRECTIVE: &str = "ANTWORTE AUF DEUTSCH";

/// Required instruction for the confirmed second branch.
const CONFIRMATION_INSTRUCTION: &str = "NACH \"JA\"-BESTÄTIGUNG AUF WEG 2";

/// Required detector-only generation instruction.
const DETECTOR_INSTRUCTION: &str = "GENERIERE NUR DEN OS/HW-DETEKTOR";

/// Required protocol version line inside the YAML block.
const PROTOCOL_VERSION_LINE: &str = "protocol_version: \"1.2\"";

/// Required task id key inside the YAML block.
const TASK_ID_KEY: &str = "task_id:";

// Fenced YAML block, compiled once
static YAML_BLOCK_REGEX: OnceLock<Regex> = OnceLock::new();

fn yaml_block_regex() -> &'static Regex {
    YAML_BLOCK_REGEX.get_or_init(|| Regex::new(r"(?s)```yaml\n(.*?)\n```").unwrap())
}

/// Result of one document validation run. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    /// Whether the document meets the pass threshold
    pub compliant: bool,

    /// Compliance score in [0, 100]
    pub score: u8,

    /// One message per failed check, in rule-table order
    pub violations: Vec<String>,
}

impl ValidationResult {
    pub fn has_violations(&self) -> bool {
        !self.violations.is_empty()
    }
}

/// Validate a generated LRP document against the core rule table.
pub fn validate(document: &str) -> ValidationResult {
    let mut violations = Vec::new();
    let mut score: i32 = 100;

    let mut check = |passed: bool, deduction: i32, message: &str| {
        if !passed {
            violations.push(format!("❌ {}", message));
            score -= deduction;
        }
    };

    check(
        document.contains(METADATA_MARKER),
        30,
        "Metadaten-Block fehlt",
    );

    match yaml_block_regex().captures(document) {
        None => check(false, 25, "Ungültiges YAML-Format"),
        Some(captures) => {
            let yaml_content = &captures[1];
            check(
                yaml_content.contains(PROTOCOL_VERSION_LINE),
                15,
                "Falsche Protokollversion",
            );
            check(yaml_content.contains(TASK_ID_KEY), 10, "task_id fehlt");
        }
    }

    check(
        document.contains(USER_REQUEST_MARKER),
        20,
        "User-Request-Block fehlt",
    );
    check(
        document.contains(FINAL_INSTRUCTION_MARKER),
        20,
        "Fehlende abschließende Systemanweisung",
    );
    check(
        document.contains(LANGUAGE_DIRECTIVE),
        10,
        "Fehlende Sprachvorgabe",
    );
    check(
        document.contains(CONFIRMATION_INSTRUCTION),
        15,
        "Fehlende Anweisung für 'JA'-Bestätigung",
    );
    check(
        document.contains(DETECTOR_INSTRUCTION),
        15,
        "Fehlende Detektor-Generierungsanweisung",
    );

    let score = score.max(0) as u8;
    ValidationResult {
        compliant: score >= PASS_THRESHOLD,
        score,
        violations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A document satisfying every rule in the table.
    fn compliant_document() -> String {
        format!(
            "{metadata}\n\n\
             ```yaml\n\
             protocol_version: \"1.2\"\n\
             task_id: 2024-04-17-001\n\
             ```\n\n\
             {user_request}\n\
             Beschreibung der Aufgabe.\n\n\
             {final_instruction}\n\
             ANTWORTE AUF DEUTSCH.\n\
             NACH \"JA\"-BESTÄTIGUNG AUF WEG 2: GENERIERE NUR DEN OS/HW-DETEKTOR\n",
            metadata = METADATA_MARKER,
            user_request = USER_REQUEST_MARKER,
            final_instruction = FINAL_INSTRUCTION_MARKER,
        )
    }

    // ==================== Full Document Tests ====================

    #[test]
    fn test_compliant_document_scores_100() {
        let result = validate(&compliant_document());

        assert!(result.compliant);
        assert_eq!(result.score, 100);
        assert!(result.violations.is_empty());
    }

    #[test]
    fn test_empty_document_scores_0_with_all_violations() {
        let result = validate("");

        assert!(!result.compliant);
        assert_eq!(result.score, 0);
        // Metadata, YAML block, user request, final instruction, language,
        // confirmation, detector — the YAML sub-checks don't apply
        assert_eq!(result.violations.len(), 7);
    }

    #[test]
    fn test_score_floored_at_zero() {
        // Deductions for an empty document sum past 100 but never go negative
        let result = validate("nothing relevant here");
        assert_eq!(result.score, 0);
    }

    // ==================== Individual Rule Tests ====================

    #[test]
    fn test_missing_metadata_block_costs_30() {
        let document = compliant_document().replace(METADATA_MARKER, "");
        let result = validate(&document);

        assert_eq!(result.score, 70);
        assert!(!result.compliant);
        assert!(result.violations[0].contains("Metadaten-Block"));
    }

    #[test]
    fn test_missing_yaml_block_costs_25_without_subchecks() {
        let document = compliant_document().replace("```yaml", "```text");
        let result = validate(&document);

        // Only the block deduction applies; the version/task_id sub-checks
        // are unreachable without a block
        assert_eq!(result.score, 75);
        assert!(result
            .violations
            .iter()
            .any(|v| v.contains("Ungültiges YAML-Format")));
        assert!(!result.violations.iter().any(|v| v.contains("task_id")));
    }

    #[test]
    fn test_wrong_protocol_version_costs_exactly_15() {
        let document =
            compliant_document().replace("protocol_version: \"1.2\"", "protocol_version: \"1.1\"");
        let result = validate(&document);

        assert_eq!(result.score, 85);
        assert!(result.compliant); // 85 is still above the threshold
        assert!(result.violations[0].contains("Protokollversion"));
    }

    #[test]
    fn test_missing_task_id_costs_10() {
        let document = compliant_document().replace("task_id: 2024-04-17-001\n", "");
        let result = validate(&document);

        assert_eq!(result.score, 90);
        assert!(result.compliant);
        assert!(result.violations[0].contains("task_id"));
    }

    #[test]
    fn test_missing_user_request_costs_20() {
        let document = compliant_document().replace(USER_REQUEST_MARKER, "");
        let result = validate(&document);

        assert_eq!(result.score, 80);
        assert!(result.compliant); // exactly at the threshold
    }

    #[test]
    fn test_missing_final_instruction_costs_20() {
        let document = compliant_document().replace(FINAL_INSTRUCTION_MARKER, "");
        assert_eq!(validate(&document).score, 80);
    }

    #[test]
    fn test_missing_language_directive_costs_10() {
        let document = compliant_document().replace(LANGUAGE_DIRECTIVE, "ANTWORTE AUF ENGLISCH");
        let result = validate(&document);

        assert_eq!(result.score, 90);
        assert!(result.violations[0].contains("Sprachvorgabe"));
    }

    #[test]
    fn test_missing_confirmation_instruction_costs_15() {
        let document = compliant_document().replace("NACH \"JA\"-BESTÄTIGUNG AUF WEG 2", "");
        assert_eq!(validate(&document).score, 85);
    }

    #[test]
    fn test_missing_detector_instruction_costs_15() {
        let document = compliant_document().replace(DETECTOR_INSTRUCTION, "");
        assert_eq!(validate(&document).score, 85);
    }

    // ==================== Independence / Accumulation Tests ====================

    #[test]
    fn test_checks_are_independent_and_accumulate() {
        let document = compliant_document()
            .replace(LANGUAGE_DIRECTIVE, "")
            .replace(DETECTOR_INSTRUCTION, "");
        let result = validate(&document);

        // 100 - 10 - 15, both messages present in rule-table order
        assert_eq!(result.score, 75);
        assert!(!result.compliant);
        assert_eq!(result.violations.len(), 2);
        assert!(result.violations[0].contains("Sprachvorgabe"));
        assert!(result.violations[1].contains("Detektor"));
    }

    #[test]
    fn test_protocol_version_drop_below_threshold_fails() {
        // 100 - 15 (version) - 10 (language) = 75 < 80
        let document = compliant_document()
            .replace("protocol_version: \"1.2\"", "protocol_version: \"2.0\"")
            .replace(LANGUAGE_DIRECTIVE, "");
        let result = validate(&document);

        assert_eq!(result.score, 75);
        assert!(!result.compliant);
    }

    #[test]
    fn test_yaml_block_spanning_multiple_lines() {
        let document = compliant_document().replace(
            "task_id: 2024-04-17-001",
            "task_id: abc\nextra: value\nmore: lines",
        );
        assert_eq!(validate(&document).score, 100);
    }

    #[test]
    fn test_markers_inside_yaml_do_not_satisfy_subchecks_elsewhere() {
        // protocol_version outside the fenced block does not count
        let document = compliant_document()
            .replace("protocol_version: \"1.2\"\n", "")
            + "\nprotocol_version: \"1.2\"\n";
        let result = validate(&document);

        assert_eq!(result.score, 85);
        assert!(result.violations[0].contains("Protokollversion"));
    }
}
