//! Link resolution
//!
//! Resolves relative, root-relative and same-document links against the
//! filesystem and the target document's anchor set. Purely syntactic:
//! external URLs are never followed and no network access occurs.

use std::path::Path;

use thiserror::Error;

use crate::core::file_reader::{read_document, ReadOutcome};
use crate::core::paths::{is_markdown, join_normalized};
use crate::markdown::heading::anchor_set;
use crate::markdown::link::{Link, TargetKind};
use crate::markdown::slug::slugify;

/// Why a link failed to resolve
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("link target `{target}` does not exist")]
    BrokenLink { target: String },

    #[error("anchor `#{fragment}` does not match any heading in `{target}`")]
    BrokenAnchor { fragment: String, target: String },
}

impl ResolveError {
    pub fn code(&self) -> &'static str {
        match self {
            ResolveError::BrokenLink { .. } => "BROKEN_LINK",
            ResolveError::BrokenAnchor { .. } => "BROKEN_ANCHOR",
        }
    }
}

/// Resolve one link from `source` (absolute path of the document it
/// appears in) against the filesystem.
///
/// - External links always resolve (out of scope).
/// - The path part must name an existing file or directory.
/// - A fragment must slugify to a member of the target document's anchor
///   set. Fragments on non-Markdown targets are not checkable and pass.
/// - Unreadable target files are a resolution failure, never a panic.
pub fn resolve_link(root: &Path, source: &Path, link: &Link) -> Result<(), ResolveError> {
    let kind = link.kind();
    if kind == TargetKind::External {
        return Ok(());
    }

    let target_file = match kind {
        TargetKind::AnchorOnly => source.to_path_buf(),
        TargetKind::RootRelative => {
            join_normalized(root, strip_query(link.path()).trim_start_matches('/'))
        }
        TargetKind::Relative => {
            let base = source.parent().unwrap_or(root);
            join_normalized(base, strip_query(link.path()))
        }
        TargetKind::External => unreachable!(),
    };

    if kind != TargetKind::AnchorOnly && !target_file.exists() {
        return Err(ResolveError::BrokenLink {
            target: link.target.clone(),
        });
    }

    let Some(fragment) = link.fragment() else {
        return Ok(());
    };
    if fragment.is_empty() || !is_markdown(&target_file) {
        return Ok(());
    }

    let text = match read_document(&target_file) {
        ReadOutcome::Content { text, .. } => text,
        ReadOutcome::Skipped { .. } => {
            return Err(ResolveError::BrokenAnchor {
                fragment: fragment.to_string(),
                target: display_target(&target_file, root),
            });
        }
    };

    if anchor_set(&text).contains(&slugify(fragment)) {
        Ok(())
    } else {
        Err(ResolveError::BrokenAnchor {
            fragment: fragment.to_string(),
            target: display_target(&target_file, root),
        })
    }
}

/// Drop a `?query` suffix from the path part before hitting the filesystem
fn strip_query(path: &str) -> &str {
    match path.split_once('?') {
        Some((p, _)) => p,
        None => path,
    }
}

fn display_target(target: &Path, root: &Path) -> String {
    crate::core::paths::make_relative(target, root)
        .unwrap_or_else(|| crate::core::paths::normalize_path(target))
}
