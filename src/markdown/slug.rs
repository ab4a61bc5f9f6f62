//! Anchor slugification
//!
//! Converts heading titles to the anchor identifiers fragment links
//! point at. Approximates common static-site anchor generation:
//! percent-decode, lowercase, drop punctuation, hyphenate whitespace.
//! Byte-for-byte parity with any specific renderer is a non-goal; the
//! algorithm is stable (idempotent) and case-insensitive.

use anyhow::Result;

/// Slugify heading title text into an anchor identifier
pub fn slugify(title: &str) -> String {
    let decoded = percent_decode(title);
    let mut out = String::with_capacity(decoded.len());
    let mut pending_hyphen = false;

    for ch in decoded.to_lowercase().chars() {
        if ch.is_whitespace() || ch == '-' {
            pending_hyphen = true;
            continue;
        }
        // Keep word characters only; everything else is dropped without
        // leaving a hyphen behind
        if !ch.is_alphanumeric() && ch != '_' {
            continue;
        }
        if pending_hyphen && !out.is_empty() {
            out.push('-');
        }
        pending_hyphen = false;
        out.push(ch);
    }

    out
}

/// Decode %XX escape sequences; invalid escapes pass through literally
fn percent_decode(input: &str) -> String {
    if !input.contains('%') {
        return input.to_string();
    }

    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            let hi = (bytes[i + 1] as char).to_digit(16);
            let lo = (bytes[i + 2] as char).to_digit(16);
            if let (Some(hi), Some(lo)) = (hi, lo) {
                out.push((hi * 16 + lo) as u8);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }

    String::from_utf8_lossy(&out).into_owned()
}

/// Run the slug command
pub fn run_slug(text: &str) -> Result<()> {
    println!("{}", slugify(text));
    Ok(())
}
