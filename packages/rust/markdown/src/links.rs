//! Markdown link extraction and heading helpers.

use std::sync::LazyLock;

use regex::Regex;

use docweld_shared::LinkReference;

/// Matches `[text](url)`. Capture order follows first appearance in the
/// source text, which governs expansion and substitution order.
static LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("valid regex"));

/// Matches a heading at the very start of a body: `#` through `######`
/// followed by text.
static LEADING_HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\A(#{1,6})[ \t]+([^\r\n]+)(?:\r?\n)?").expect("valid regex"));

/// Stray punctuation that seed-file authors leave in front of URLs.
const URL_NOISE: &[char] = &[
    '>', '[', ']', '(', ')', '{', '}', '`', '*', '+', '-', ' ',
];

/// Extract every Markdown link in first-appearance order.
///
/// Captures are kept verbatim (no trimming) so that
/// [`LinkReference::markup`] reproduces the exact source text — callers
/// clean the URL with [`clean_url`] before resolving it.
pub fn extract_links(text: &str) -> Vec<LinkReference> {
    LINK_RE
        .captures_iter(text)
        .map(|caps| LinkReference {
            text: caps[1].to_string(),
            url: caps[2].to_string(),
        })
        .collect()
}

/// Extract the first Markdown link on a line, if any.
pub fn first_link(line: &str) -> Option<LinkReference> {
    LINK_RE.captures(line).map(|caps| LinkReference {
        text: caps[1].to_string(),
        url: caps[2].to_string(),
    })
}

/// Clean stray leading punctuation from an extracted URL.
pub fn clean_url(url: &str) -> &str {
    url.trim().trim_start_matches(URL_NOISE)
}

/// Split a leading Markdown heading off a body.
///
/// Returns `(heading text, remainder)` when the body's first line is a
/// `#`–`######` heading, `None` otherwise.
pub fn split_leading_heading(body: &str) -> Option<(&str, &str)> {
    let caps = LEADING_HEADING_RE.captures(body)?;
    let whole = caps.get(0).expect("match");
    let text = caps.get(2).expect("heading text");
    Some((text.as_str().trim_end(), &body[whole.end()..]))
}

/// Derive a human-readable title from a canonical file stem by splitting
/// on capital-letter boundaries: `GettingStarted` → `Getting Started`,
/// `HTMLGuide` → `HTML Guide`.
pub fn title_from_stem(stem: &str) -> String {
    let chars: Vec<char> = stem.chars().collect();
    let mut title = String::with_capacity(stem.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c.is_ascii_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_lower = chars.get(i + 1).is_some_and(|n| n.is_ascii_lowercase());
            if prev.is_ascii_lowercase() || prev.is_ascii_digit() || (prev.is_ascii_uppercase() && next_lower)
            {
                title.push(' ');
            }
        }
        title.push(c);
    }

    title
}
