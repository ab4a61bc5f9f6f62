//! Inline link and image extraction
//!
//! Finds `[label](target)` and `![alt](target)` occurrences, splits each
//! target into path and fragment, and classifies it for the resolver.
//! Detection is suppressed inside fenced code blocks, and an escaped
//! `\!` before a bracket is an ordinary link, not an image.

use std::path::Path;

use anyhow::{bail, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::core::file_reader::{read_document, ReadOutcome};
use crate::core::render::{OutputFormat, RenderConfig};
use crate::markdown::is_fence_delimiter;

/// Inline link syntax, with an optional leading `!` for images. Targets
/// with embedded whitespace (e.g. a quoted title) are out of scope.
static LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(!?)\[([^\]]*)\]\(([^)\s]+)\)").expect("Invalid LINK_RE regex"));

/// URI scheme prefix, e.g. `https:`, `mailto:`
static SCHEME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*:").expect("Invalid SCHEME_RE regex"));

/// How a link target resolves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetKind {
    /// Scheme-prefixed or protocol-relative; never resolved
    External,
    /// Leading `/`; resolved against the repository root
    #[serde(rename = "root-relative")]
    RootRelative,
    /// Fragment only; resolved against the source document itself
    #[serde(rename = "anchor-only")]
    AnchorOnly,
    /// Everything else; resolved against the source document's directory
    Relative,
}

impl TargetKind {
    /// Display name, matching the serialized form
    pub fn name(&self) -> &'static str {
        match self {
            TargetKind::External => "external",
            TargetKind::RootRelative => "root-relative",
            TargetKind::AnchorOnly => "anchor-only",
            TargetKind::Relative => "relative",
        }
    }
}

/// A link extracted from a document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// 1-indexed line number
    pub line: u32,

    /// Link label (alt text for images)
    pub label: String,

    /// Raw target string as written
    pub target: String,

    pub is_image: bool,
}

impl Link {
    /// Path part of the target: everything before the first literal `#`
    pub fn path(&self) -> &str {
        match self.target.split_once('#') {
            Some((path, _)) => path,
            None => &self.target,
        }
    }

    /// Fragment part of the target, if any
    pub fn fragment(&self) -> Option<&str> {
        self.target.split_once('#').map(|(_, frag)| frag)
    }

    pub fn kind(&self) -> TargetKind {
        if self.target.starts_with("//") || SCHEME_RE.is_match(&self.target) {
            TargetKind::External
        } else if self.path().is_empty() {
            TargetKind::AnchorOnly
        } else if self.target.starts_with('/') {
            TargetKind::RootRelative
        } else {
            TargetKind::Relative
        }
    }
}

/// Extract all inline links and images from document text, in order
pub fn extract_links(text: &str) -> Vec<Link> {
    let mut links = Vec::new();
    let mut in_fence = false;

    for (idx, line) in text.lines().enumerate() {
        if is_fence_delimiter(line) {
            in_fence = !in_fence;
            continue;
        }
        if in_fence {
            continue;
        }

        for caps in LINK_RE.captures_iter(line) {
            let Some(whole) = caps.get(0) else {
                continue;
            };
            let bang = caps.get(1).map(|m| m.as_str()).unwrap_or("");
            let label = caps.get(2).map(|m| m.as_str()).unwrap_or("");
            let target = caps.get(3).map(|m| m.as_str()).unwrap_or("");

            // `\![x](y)` is a plain link with a literal bang before it
            let escaped = !bang.is_empty()
                && whole.start() > 0
                && line.as_bytes()[whole.start() - 1] == b'\\';

            links.push(Link {
                line: idx as u32 + 1,
                label: label.to_string(),
                target: target.to_string(),
                is_image: !bang.is_empty() && !escaped,
            });
        }
    }

    links
}

/// Run the links command: dump extracted links for one file
pub fn run_links(root: &Path, file: &Path, config: RenderConfig) -> Result<()> {
    let full = if file.is_absolute() {
        file.to_path_buf()
    } else {
        root.join(file)
    };

    let text = match read_document(&full) {
        ReadOutcome::Content { text, .. } => text,
        ReadOutcome::Skipped { reason } => bail!("{}: {}", full.display(), reason),
    };

    let links = extract_links(&text);
    let records: Vec<_> = links
        .iter()
        .map(|l| {
            json!({
                "line": l.line,
                "label": l.label,
                "target": l.target,
                "is_image": l.is_image,
                "path": l.path(),
                "fragment": l.fragment(),
                "kind": l.kind(),
            })
        })
        .collect();

    match config.format {
        OutputFormat::Jsonl => {
            for r in &records {
                println!("{}", serde_json::to_string(r)?);
            }
        }
        OutputFormat::Json => {
            if config.pretty {
                println!("{}", serde_json::to_string_pretty(&records)?);
            } else {
                println!("{}", serde_json::to_string(&records)?);
            }
        }
        OutputFormat::Markdown => {
            for l in &links {
                let marker = if l.is_image { "image" } else { "link" };
                println!(
                    "- `{}` ({} {}, line {})",
                    l.target,
                    l.kind().name(),
                    marker,
                    l.line
                );
            }
        }
        OutputFormat::Text => {
            for l in &links {
                let marker = if l.is_image { "image" } else { "link" };
                println!(
                    "{:>5}  {:<5} {:<13} {}",
                    l.line,
                    marker,
                    l.kind().name(),
                    l.target
                );
            }
        }
    }

    Ok(())
}
