//! Style rules
//!
//! Policy-level checks applied per document: required headings,
//! placeholder text, line length, merge-conflict markers. Findings are
//! reported individually and never abort the rest of the scan.

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};

use crate::core::model::Violation;
use crate::markdown::heading::Heading;
use crate::markdown::is_fence_delimiter;

/// Placeholder markers that indicate unfinished documentation
static PLACEHOLDER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\btbd\b|\bfixme\b|todo:|lorem ipsum").expect("Invalid PLACEHOLDER_RE regex")
});

/// Configurable rule set evaluated against each document
#[derive(Debug, Clone)]
pub struct RuleSet {
    /// Require at least one level-1 heading
    pub require_h1: bool,

    /// Each pattern must match some heading title (case-insensitive)
    pub required_sections: Vec<Regex>,

    /// Maximum line length in characters, outside fences
    pub max_line_length: Option<usize>,

    pub check_placeholders: bool,
    pub check_conflict_markers: bool,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            require_h1: true,
            required_sections: Vec::new(),
            max_line_length: None,
            check_placeholders: true,
            check_conflict_markers: true,
        }
    }
}

/// Compile user-supplied section patterns, case-insensitively
pub fn compile_section_patterns(patterns: &[String]) -> Result<Vec<Regex>> {
    patterns
        .iter()
        .map(|p| {
            RegexBuilder::new(p)
                .case_insensitive(true)
                .build()
                .with_context(|| format!("invalid section pattern `{}`", p))
        })
        .collect()
}

impl RuleSet {
    /// Apply all enabled rules to one document
    pub fn apply(&self, path: &str, text: &str, headings: &[Heading]) -> Vec<Violation> {
        let mut violations = Vec::new();

        if text.trim().is_empty() {
            violations.push(Violation::error(
                "EMPTY_DOCUMENT",
                path,
                None,
                "document contains only whitespace",
            ));
            return violations;
        }

        if self.require_h1 && !headings.iter().any(|h| h.level == 1) {
            violations.push(Violation::error(
                "NO_H1",
                path,
                None,
                "document has no level-1 heading",
            ));
        }

        for pattern in &self.required_sections {
            if !headings.iter().any(|h| pattern.is_match(&h.title)) {
                violations.push(Violation::error(
                    "MISSING_SECTION",
                    path,
                    None,
                    format!("no heading matches required section `{}`", pattern.as_str()),
                ));
            }
        }

        let mut in_fence = false;
        for (idx, line) in text.lines().enumerate() {
            let line_no = idx as u32 + 1;

            if self.check_conflict_markers && is_conflict_marker(line) {
                violations.push(Violation::error(
                    "CONFLICT_MARKER",
                    path,
                    Some(line_no),
                    "merge conflict marker",
                ));
            }

            if is_fence_delimiter(line) {
                in_fence = !in_fence;
                continue;
            }
            if in_fence {
                continue;
            }

            if let Some(max) = self.max_line_length {
                let len = line.chars().count();
                if len > max {
                    violations.push(Violation::warning(
                        "LINE_TOO_LONG",
                        path,
                        Some(line_no),
                        format!("line is {} chars (max {})", len, max),
                    ));
                }
            }

            if self.check_placeholders {
                if let Some(m) = PLACEHOLDER_RE.find(line) {
                    violations.push(Violation::warning(
                        "PLACEHOLDER",
                        path,
                        Some(line_no),
                        format!("placeholder text `{}`", m.as_str()),
                    ));
                }
            }
        }

        violations
    }
}

/// Git conflict markers: begin/end carry a label after the marker, the
/// separator is a bare line of seven equals signs
fn is_conflict_marker(line: &str) -> bool {
    line.starts_with("<<<<<<< ") || line.starts_with(">>>>>>> ") || line.trim_end() == "======="
}
