//! Best-effort document reading
//!
//! Provides consistent handling for:
//! - Non-UTF-8 files (lossy conversion)
//! - Binary files (skipped)
//! - Oversized files (skipped)
//!
//! A read never aborts a validation run; failures become skip outcomes
//! that callers report and move past.

use std::fs;
use std::path::Path;

/// Maximum document size in bytes (8 MB); documentation files beyond this
/// are almost certainly not prose and are skipped
pub const MAX_DOCUMENT_SIZE: u64 = 8 * 1024 * 1024;

/// Result of reading a document
#[derive(Debug, Clone)]
pub enum ReadOutcome {
    /// Document content, with a flag for lossy UTF-8 conversion
    Content { text: String, lossy: bool },

    /// Document was skipped, with the reason
    Skipped { reason: String },
}

impl ReadOutcome {
    pub fn text(&self) -> Option<&str> {
        match self {
            ReadOutcome::Content { text, .. } => Some(text),
            ReadOutcome::Skipped { .. } => None,
        }
    }
}

/// Read a document with best-effort decoding
pub fn read_document(path: &Path) -> ReadOutcome {
    match fs::metadata(path) {
        Ok(meta) if meta.len() > MAX_DOCUMENT_SIZE => {
            return ReadOutcome::Skipped {
                reason: format!("file too large ({} bytes)", meta.len()),
            };
        }
        Ok(_) => {}
        Err(e) => {
            return ReadOutcome::Skipped {
                reason: format!("cannot stat: {}", e),
            };
        }
    }

    let bytes = match fs::read(path) {
        Ok(b) => b,
        Err(e) => {
            return ReadOutcome::Skipped {
                reason: format!("cannot read: {}", e),
            };
        }
    };

    if bytes.contains(&0) {
        return ReadOutcome::Skipped {
            reason: "binary content".to_string(),
        };
    }

    match String::from_utf8(bytes) {
        Ok(text) => ReadOutcome::Content { text, lossy: false },
        Err(e) => {
            let text = String::from_utf8_lossy(e.as_bytes()).into_owned();
            ReadOutcome::Content { text, lossy: true }
        }
    }
}
