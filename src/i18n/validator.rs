//! Label coverage validation.
//!
//! Compares a locale's tree against a reference tree to find labels a
//! translation is missing, labels it has that the reference does not, and
//! labels that dropped host placeholders (`%1`, `$1`) or markup (`<STRONG>`).
//! Reports are informational; lookups never consult them.

use crate::i18n::{KeyPath, ResourceNode, ResourceTree};
use regex::Regex;
use std::sync::OnceLock;

/// Validation report containing errors and warnings about a locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    /// Structural conflicts (a label in one tree is a group in the other)
    pub errors: Vec<String>,

    /// Coverage gaps and text differences
    pub warnings: Vec<String>,
}

impl ValidationReport {
    /// Create a new empty validation report
    pub fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Check if the report has any errors
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Check if the report has any warnings
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Check if the report is clean (no errors or warnings)
    pub fn is_clean(&self) -> bool {
        !self.has_errors() && !self.has_warnings()
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Validator for label coverage between two locales.
pub struct CoverageValidator;

static PLACEHOLDER_REGEX: OnceLock<Regex> = OnceLock::new();
static MARKUP_REGEX: OnceLock<Regex> = OnceLock::new();

impl CoverageValidator {
    /// Compare `candidate` against `reference`.
    ///
    /// Checks that:
    /// - every reference label exists in the candidate
    /// - the candidate has no labels the reference lacks
    /// - no path is a label in one tree and a group in the other
    /// - placeholder tokens and markup tags match (order-insensitive)
    /// - no candidate label is empty
    pub fn validate(reference: &ResourceTree, candidate: &ResourceTree) -> ValidationReport {
        let mut report = ValidationReport::new();
        Self::compare(reference, candidate, &mut KeyPath::root(), &mut report);
        report
    }

    fn compare(
        reference: &ResourceTree,
        candidate: &ResourceTree,
        path: &mut KeyPath,
        report: &mut ValidationReport,
    ) {
        for (key, expected) in reference {
            path.push(key.as_str());
            match (expected, candidate.get(key)) {
                (_, None) => report.warnings.push(format!("Missing label: {}", path)),
                (ResourceNode::Branch(expected), Some(ResourceNode::Branch(actual))) => {
                    Self::compare(expected, actual, path, report)
                }
                (ResourceNode::Leaf(expected), Some(ResourceNode::Leaf(actual))) => {
                    Self::compare_labels(expected, actual, path, report)
                }
                (ResourceNode::Leaf(_), Some(ResourceNode::Branch(_))) => report
                    .errors
                    .push(format!("Type mismatch at {}: expected a label, found a group", path)),
                (ResourceNode::Branch(_), Some(ResourceNode::Leaf(_))) => report
                    .errors
                    .push(format!("Type mismatch at {}: expected a group, found a label", path)),
            }
            path.pop();
        }

        for (key, _) in candidate {
            if reference.get(key).is_none() {
                report
                    .warnings
                    .push(format!("Extra label: {}", path.child(key.as_str())));
            }
        }
    }

    fn compare_labels(expected: &str, actual: &str, path: &KeyPath, report: &mut ValidationReport) {
        if actual.is_empty() {
            report.warnings.push(format!("Empty label: {}", path));
            return;
        }

        let expected_placeholders = Self::extract_placeholders(expected);
        let actual_placeholders = Self::extract_placeholders(actual);
        if expected_placeholders != actual_placeholders {
            report.warnings.push(format!(
                "Placeholder mismatch at {}: reference has {:?}, locale has {:?}",
                path, expected_placeholders, actual_placeholders
            ));
        }

        let expected_tags = Self::extract_tags(expected);
        let actual_tags = Self::extract_tags(actual);
        if expected_tags != actual_tags {
            report.warnings.push(format!(
                "Markup mismatch at {}: reference has {:?}, locale has {:?}",
                path, expected_tags, actual_tags
            ));
        }
    }

    /// Extract host placeholder tokens (`%1`, `$1`), sorted
    fn extract_placeholders(text: &str) -> Vec<String> {
        let regex = PLACEHOLDER_REGEX
            .get_or_init(|| Regex::new(r"[%$]\d+").expect("placeholder pattern is valid"));

        let mut tokens: Vec<String> = regex
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .collect();
        tokens.sort();
        tokens
    }

    /// Extract markup tags as uppercase names (`STRONG`, `/STRONG`), sorted
    fn extract_tags(text: &str) -> Vec<String> {
        let regex = MARKUP_REGEX.get_or_init(|| {
            Regex::new(r"<(/?)([A-Za-z][A-Za-z0-9]*)\b[^<>]*>").expect("markup pattern is valid")
        });

        let mut tags: Vec<String> = regex
            .captures_iter(text)
            .map(|cap| format!("{}{}", &cap[1], cap[2].to_ascii_uppercase()))
            .collect();
        tags.sort();
        tags
    }
}
