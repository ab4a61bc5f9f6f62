//! Candidate document discovery
//!
//! Locates Markdown files under a root by explicit candidate paths and
//! substring patterns, ranked by a scoring heuristic so that specific
//! documents (docs/, named guides) beat a generic top-level README.
//! Traversal respects ignore files and skips hidden directories.

use std::collections::HashMap;
use std::path::Path;

use anyhow::Result;
use ignore::WalkBuilder;
use serde::{Deserialize, Serialize};

use crate::core::paths::{is_markdown, join_normalized, make_relative, normalize_relative};
use crate::core::render::{OutputFormat, RenderConfig};

/// A discovered document with its ranking score
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveredDoc {
    /// Path relative to root, '/' separated
    pub path: String,
    pub score: i32,
}

/// Discover candidate Markdown documents under `root`.
///
/// Explicit `candidates` (relative paths) are checked for existence and
/// given a ranking bonus; the tree walk then adds every Markdown file
/// whose relative path contains one of `patterns` (case-insensitive),
/// or every Markdown file when `patterns` is empty. The result is
/// de-duplicated and ordered by descending score, then path.
///
/// Never fails: missing directories and unreadable entries are skipped.
pub fn discover_documents(
    root: &Path,
    candidates: &[String],
    patterns: &[String],
) -> Vec<DiscoveredDoc> {
    let mut scored: HashMap<String, i32> = HashMap::new();

    for candidate in candidates {
        // Same key the tree walk produces, so `./README.md` and
        // `README.md` collapse to one entry
        let rel = normalize_relative(candidate);
        let full = join_normalized(root, &rel);
        if full.is_file() && is_markdown(&full) {
            let score = score_path(&rel) + 10;
            let slot = scored.entry(rel).or_insert(score);
            *slot = (*slot).max(score);
        }
    }

    let lowered: Vec<String> = patterns.iter().map(|p| p.to_lowercase()).collect();

    let walker = WalkBuilder::new(root)
        .hidden(true)
        .git_ignore(true)
        .git_global(true)
        .git_exclude(true)
        .build();

    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(_) => continue,
        };
        let path = entry.path();
        if path.is_dir() || !is_markdown(path) {
            continue;
        }
        let rel = match make_relative(path, root) {
            Some(r) => r,
            None => continue,
        };
        let rel_lower = rel.to_lowercase();
        if !lowered.is_empty() && !lowered.iter().any(|p| rel_lower.contains(p)) {
            continue;
        }
        let score = score_path(&rel);
        let slot = scored.entry(rel).or_insert(score);
        *slot = (*slot).max(score);
    }

    let mut docs: Vec<DiscoveredDoc> = scored
        .into_iter()
        .map(|(path, score)| DiscoveredDoc { path, score })
        .collect();

    docs.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.path.cmp(&b.path)));
    docs
}

/// Ranking heuristic: deeper and more specifically named paths score
/// higher than a generic top-level `README.md`
fn score_path(rel: &str) -> i32 {
    let lower = rel.to_lowercase();
    let parts: Vec<&str> = lower.split('/').collect();

    let mut score = parts.len() as i32 - 1;
    if parts.iter().any(|p| *p == "docs" || *p == "doc") {
        score += 3;
    }
    if parts.last().map(|n| *n != "readme.md").unwrap_or(false) {
        score += 1;
    }
    score
}

/// Run the discover command
pub fn run_discover(
    root: &Path,
    candidates: &[String],
    patterns: &[String],
    config: RenderConfig,
) -> Result<()> {
    let docs = discover_documents(root, candidates, patterns);

    match config.format {
        OutputFormat::Jsonl => {
            for d in &docs {
                println!("{}", serde_json::to_string(d)?);
            }
        }
        OutputFormat::Json => {
            if config.pretty {
                println!("{}", serde_json::to_string_pretty(&docs)?);
            } else {
                println!("{}", serde_json::to_string(&docs)?);
            }
        }
        OutputFormat::Markdown => {
            for d in &docs {
                println!("- `{}` (score {})", d.path, d.score);
            }
        }
        OutputFormat::Text => {
            for d in &docs {
                println!("{}", d.path);
            }
        }
    }

    Ok(())
}
