//! ATX heading extraction
//!
//! Scans a document line-by-line for `#`..`######` headings, with
//! explicit fence-state tracking so a `#` line inside a fenced code
//! block is never reported as a heading.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{bail, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::core::file_reader::{read_document, ReadOutcome};
use crate::core::render::{OutputFormat, RenderConfig};
use crate::markdown::is_fence_delimiter;
use crate::markdown::slug::slugify;

/// ATX heading line: optional leading whitespace, a run of `#`, required
/// whitespace, then title text. The run length is validated separately so
/// that 7+ hashes are rejected rather than truncated.
static HEADING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(#+)\s+(\S.*)$").expect("Invalid HEADING_RE regex"));

/// A heading extracted from a document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    /// Heading level, 1-6 (count of leading `#`)
    pub level: u8,

    /// Title text with surrounding whitespace and any closing `#` run stripped
    pub title: String,

    /// 1-indexed line number
    pub line: u32,

    /// Anchor slug derived from the title
    pub slug: String,
}

/// Extract all ATX headings from document text, in order
pub fn extract_headings(text: &str) -> Vec<Heading> {
    let mut headings = Vec::new();
    let mut in_fence = false;

    for (idx, line) in text.lines().enumerate() {
        if is_fence_delimiter(line) {
            in_fence = !in_fence;
            continue;
        }
        if in_fence {
            continue;
        }

        let Some(caps) = HEADING_RE.captures(line) else {
            continue;
        };
        let hashes = caps.get(1).map(|m| m.as_str()).unwrap_or("");
        if hashes.len() > 6 {
            continue;
        }

        let raw_title = caps.get(2).map(|m| m.as_str()).unwrap_or("");
        let title = strip_closing_sequence(raw_title);
        if title.is_empty() {
            continue;
        }

        headings.push(Heading {
            level: hashes.len() as u8,
            title: title.to_string(),
            line: idx as u32 + 1,
            slug: slugify(title),
        });
    }

    headings
}

/// The set of anchor slugs a document's headings produce.
///
/// Duplicate headings are legal Markdown; this is a membership set, not
/// a unique lookup.
pub fn anchor_set(text: &str) -> HashSet<String> {
    extract_headings(text).into_iter().map(|h| h.slug).collect()
}

/// Strip an ATX closing sequence: a trailing run of `#` counts only when
/// separated from the title by whitespace (so `C#` survives intact)
fn strip_closing_sequence(title: &str) -> &str {
    let t = title.trim_end();
    let stripped = t.trim_end_matches('#');
    if stripped.len() == t.len() {
        return t;
    }
    if stripped.is_empty() || stripped.ends_with(char::is_whitespace) {
        stripped.trim_end()
    } else {
        t
    }
}

/// Run the headings command: dump extracted headings for one file
pub fn run_headings(root: &Path, file: &Path, config: RenderConfig) -> Result<()> {
    let full = if file.is_absolute() {
        file.to_path_buf()
    } else {
        root.join(file)
    };

    let text = match read_document(&full) {
        ReadOutcome::Content { text, .. } => text,
        ReadOutcome::Skipped { reason } => bail!("{}: {}", full.display(), reason),
    };

    let headings = extract_headings(&text);

    match config.format {
        OutputFormat::Jsonl => {
            for h in &headings {
                println!("{}", serde_json::to_string(h)?);
            }
        }
        OutputFormat::Json => {
            if config.pretty {
                println!("{}", serde_json::to_string_pretty(&headings)?);
            } else {
                println!("{}", serde_json::to_string(&headings)?);
            }
        }
        OutputFormat::Markdown => {
            for h in &headings {
                println!(
                    "- `{}` {} (line {}, anchor `#{}`)",
                    "#".repeat(h.level as usize),
                    h.title,
                    h.line,
                    h.slug
                );
            }
        }
        OutputFormat::Text => {
            for h in &headings {
                println!(
                    "{:>5}  {} {}  #{}",
                    h.line,
                    "#".repeat(h.level as usize),
                    h.title,
                    h.slug
                );
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_levels() {
        let text = "# One\n## Two\n###### Six\n";
        let headings = extract_headings(text);
        assert_eq!(headings.len(), 3);
        assert_eq!(headings[0].level, 1);
        assert_eq!(headings[0].title, "One");
        assert_eq!(headings[1].level, 2);
        assert_eq!(headings[2].level, 6);
        assert_eq!(headings[2].line, 3);
    }

    #[test]
    fn test_seven_hashes_not_a_heading() {
        let headings = extract_headings("####### Too deep\n");
        assert!(headings.is_empty());
    }

    #[test]
    fn test_hash_without_space_not_a_heading() {
        let headings = extract_headings("#NoSpace\n");
        assert!(headings.is_empty());
    }

    #[test]
    fn test_leading_whitespace_allowed() {
        let headings = extract_headings("   ## Indented\n");
        assert_eq!(headings.len(), 1);
        assert_eq!(headings[0].title, "Indented");
    }

    #[test]
    fn test_closing_sequence_stripped() {
        let headings = extract_headings("## Title ##\n# Other #   \n");
        assert_eq!(headings[0].title, "Title");
        assert_eq!(headings[1].title, "Other");
    }

    #[test]
    fn test_closing_sequence_needs_whitespace() {
        let headings = extract_headings("# C#\n");
        assert_eq!(headings[0].title, "C#");
    }

    #[test]
    fn test_fenced_code_excluded() {
        let text = "# Real\n```sh\n# not a heading\n```\n## Also Real\n";
        let headings = extract_headings(text);
        assert_eq!(headings.len(), 2);
        assert_eq!(headings[0].title, "Real");
        assert_eq!(headings[1].title, "Also Real");
    }

    #[test]
    fn test_unclosed_fence_suppresses_rest() {
        let text = "# Real\n```\n# inside\n# still inside\n";
        let headings = extract_headings(text);
        assert_eq!(headings.len(), 1);
    }

    #[test]
    fn test_fence_with_language_tag() {
        let text = "```python\n# comment\n```\n# Heading\n";
        let headings = extract_headings(text);
        assert_eq!(headings.len(), 1);
        assert_eq!(headings[0].title, "Heading");
    }

    #[test]
    fn test_slug_attached() {
        let headings = extract_headings("## Getting Started\n");
        assert_eq!(headings[0].slug, "getting-started");
    }

    #[test]
    fn test_anchor_set_membership() {
        let text = "# Title\n## Overview\n## Overview\n";
        let set = anchor_set(text);
        assert!(set.contains("title"));
        assert!(set.contains("overview"));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_order_preserved() {
        let text = "## B\n# A\n";
        let headings = extract_headings(text);
        assert_eq!(headings[0].title, "B");
        assert_eq!(headings[1].title, "A");
    }
}
