//! Frontmatter splitting and stripping.
//!
//! A frontmatter block is a line of exactly `---` at the very start of the
//! text, a run of `key: value` lines, and a closing `---` line. Both `\n`
//! and `\r\n` terminators are tolerated. Malformed blocks (opened but never
//! closed) are treated as absent, never as an error.

use std::collections::HashMap;

use tracing::warn;

/// Split a document into its frontmatter fields and body.
///
/// Returns `(None, text)` unchanged when no block opens at position zero,
/// or when the opening delimiter is never closed.
pub fn split_frontmatter(text: &str) -> (Option<HashMap<String, String>>, &str) {
    let mut lines = text.split_inclusive('\n');

    let Some(first) = lines.next() else {
        return (None, text);
    };
    if line_content(first) != "---" || !first.ends_with('\n') {
        return (None, text);
    }

    // Find the closing delimiter line, tracking byte offsets so the body
    // can be returned as a subslice.
    let mut offset = first.len();
    for line in lines {
        let line_start = offset;
        offset += line.len();

        if line_content(line) == "---" {
            let fields = parse_fields(&text[first.len()..line_start]);
            return (Some(fields), &text[offset..]);
        }
    }

    warn!("frontmatter block opened but never closed, treating as absent");
    (None, text)
}

/// Remove a leading frontmatter block, returning the body.
/// Idempotent: text without a block at position zero passes through.
pub fn strip_frontmatter(text: &str) -> &str {
    split_frontmatter(text).1
}

/// A line without its terminator.
fn line_content(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}

/// Parse `key: value` pairs from the block interior.
/// Lines without a colon are ignored.
fn parse_fields(block: &str) -> HashMap<String, String> {
    block
        .lines()
        .filter_map(|line| {
            let (key, value) = line.split_once(':')?;
            let key = key.trim();
            if key.is_empty() {
                return None;
            }
            Some((key.to_string(), value.trim().to_string()))
        })
        .collect()
}
