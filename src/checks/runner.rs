//! The validation pipeline
//!
//! Stateless single pass: discovery, then per document read once,
//! extract headings and links, resolve links, apply style rules.
//! Every violation across every document is collected before anything
//! is reported; nothing stops the scan early.

use std::path::Path;

use anyhow::Result;

use crate::checks::discover::discover_documents;
use crate::checks::resolve::resolve_link;
use crate::checks::rules::RuleSet;
use crate::core::file_reader::{read_document, ReadOutcome};
use crate::core::model::{Report, Violation};
use crate::core::paths::{join_normalized, normalize_relative};
use crate::core::render::{RenderConfig, Renderer};
use crate::markdown::heading::extract_headings;
use crate::markdown::link::extract_links;

/// What to check and how
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// Explicit document paths (relative to root); bypasses discovery
    pub explicit: Vec<String>,

    /// Discovery: candidate relative paths
    pub candidates: Vec<String>,

    /// Discovery: case-insensitive path substring patterns
    pub patterns: Vec<String>,

    pub rules: RuleSet,
}

/// Result of a validation run
#[derive(Debug, Clone)]
pub struct CheckOutcome {
    pub report: Report,

    /// True when discovery found nothing to check (skip condition, not
    /// a failure, unless the caller opts into strict mode)
    pub no_documents: bool,
}

/// Validate all selected documents under `root`
pub fn check_documents(root: &Path, options: &CheckOptions) -> CheckOutcome {
    let mut report = Report::new();

    let docs: Vec<String> = if options.explicit.is_empty() {
        discover_documents(root, &options.candidates, &options.patterns)
            .into_iter()
            .map(|d| d.path)
            .collect()
    } else {
        let mut selected = Vec::new();
        for rel in &options.explicit {
            let rel = normalize_relative(rel);
            if join_normalized(root, &rel).is_file() {
                if !selected.contains(&rel) {
                    selected.push(rel);
                }
            } else {
                report.push(Violation::error(
                    "DOCUMENT_NOT_FOUND",
                    &rel,
                    None,
                    "document does not exist",
                ));
            }
        }
        selected
    };

    let no_documents = docs.is_empty() && report.is_empty();

    for rel in docs {
        let full = join_normalized(root, &rel);

        let text = match read_document(&full) {
            ReadOutcome::Content { text, .. } => text,
            ReadOutcome::Skipped { reason } => {
                report.push(Violation::warning(
                    "UNREADABLE_FILE",
                    &rel,
                    None,
                    format!("skipped: {}", reason),
                ));
                continue;
            }
        };

        report.documents.push(rel.clone());

        let headings = extract_headings(&text);
        let links = extract_links(&text);

        for link in &links {
            if let Err(e) = resolve_link(root, &full, link) {
                report.push(Violation::error(e.code(), &rel, Some(link.line), e.to_string()));
            }
        }

        report.extend(options.rules.apply(&rel, &text, &headings));
    }

    report.sort();
    CheckOutcome {
        report,
        no_documents,
    }
}

/// Run the check command
pub fn run_check(
    root: &Path,
    options: &CheckOptions,
    strict: bool,
    quiet: bool,
    config: RenderConfig,
) -> Result<()> {
    let outcome = check_documents(root, options);

    if outcome.no_documents {
        if !quiet {
            eprintln!("no candidate documents found under {}", root.display());
        }
        if strict {
            std::process::exit(1);
        }
        return Ok(());
    }

    let renderer = Renderer::with_config(config);
    let output = renderer.render(&outcome.report);
    if !output.is_empty() {
        println!("{}", output);
    }

    if !quiet {
        eprintln!(
            "checked {} document(s): {} error(s), {} warning(s)",
            outcome.report.documents.len(),
            outcome.report.error_count(),
            outcome.report.warning_count()
        );
    }

    if outcome.report.has_errors() {
        std::process::exit(1);
    }

    Ok(())
}
