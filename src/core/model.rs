//! Unified violation model
//!
//! Every check (link resolution, style rules, read failures) maps its
//! findings into this model before rendering output.

use serde::{Deserialize, Serialize};

/// Violation severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// A single finding against a document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Violation {
    pub severity: Severity,

    /// Stable machine-readable code (e.g. BROKEN_LINK, NO_H1)
    pub code: String,

    /// Path relative to root, using '/' as separator
    pub path: String,

    /// 1-indexed line number, when the finding is tied to a line
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,

    pub message: String,
}

impl Violation {
    pub fn error(code: &str, path: &str, line: Option<u32>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code: code.to_string(),
            path: path.to_string(),
            line,
            message: message.into(),
        }
    }

    pub fn warning(code: &str, path: &str, line: Option<u32>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code: code.to_string(),
            path: path.to_string(),
            line,
            message: message.into(),
        }
    }
}

/// Aggregated result of one validation run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Report {
    pub violations: Vec<Violation>,

    /// Documents that were actually checked (relative paths)
    pub documents: Vec<String>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, violation: Violation) {
        self.violations.push(violation);
    }

    pub fn extend(&mut self, violations: impl IntoIterator<Item = Violation>) {
        self.violations.extend(violations);
    }

    /// Sort violations by path, then line, for stable output
    pub fn sort(&mut self) {
        self.violations.sort_by(|a, b| {
            a.path
                .cmp(&b.path)
                .then_with(|| a.line.unwrap_or(0).cmp(&b.line.unwrap_or(0)))
                .then_with(|| a.code.cmp(&b.code))
        });
    }

    pub fn error_count(&self) -> usize {
        self.violations
            .iter()
            .filter(|v| v.severity == Severity::Error)
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.violations
            .iter()
            .filter(|v| v.severity == Severity::Warning)
            .count()
    }

    pub fn has_errors(&self) -> bool {
        self.violations.iter().any(|v| v.severity == Severity::Error)
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }
}
