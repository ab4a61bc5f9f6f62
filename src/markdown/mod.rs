//! Markdown parsing: ATX headings, inline links, anchor slugs
//!
//! Deliberately not a full Markdown parser. Only the constructs the
//! validator needs are recognized: ATX headings, inline links/images,
//! and backtick fences (so that neither is misdetected inside code).

pub mod heading;
pub mod link;
pub mod slug;

/// Whether a line opens or closes a fenced code block.
///
/// A fence delimiter is a line whose trimmed form starts with three
/// backticks. Both the opening line (which may carry a language tag)
/// and the bare closing line match.
pub fn is_fence_delimiter(line: &str) -> bool {
    line.trim_start().starts_with("```")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fence_delimiter() {
        assert!(is_fence_delimiter("```"));
        assert!(is_fence_delimiter("```rust"));
        assert!(is_fence_delimiter("  ```sh"));
        assert!(!is_fence_delimiter("``inline``"));
        assert!(!is_fence_delimiter("plain text"));
    }
}
