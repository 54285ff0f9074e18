//! Navigation-order extraction and fallback ordering.
//!
//! The site generator emits a per-language navigation fragment enumerating
//! manual pages in curated reading order. [`NavExtractor`] recovers that
//! order as a list of canonical source filenames; when no order can be
//! recovered, [`alphabetical_md_files`] provides the deterministic fallback.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use regex::Regex;
use scraper::{Html, Selector};
use tracing::{debug, info};

use docweld_shared::{DocweldError, Result};

// ---------------------------------------------------------------------------
// NavExtractor
// ---------------------------------------------------------------------------

/// Extracts the curated page order from a generated navigation fragment.
#[derive(Debug, Clone)]
pub struct NavExtractor {
    href_re: Regex,
    excluded: HashSet<String>,
}

impl NavExtractor {
    /// Build an extractor for one language of one manual version.
    ///
    /// Slugs in `excluded_slugs` (assistant page, index, the one-page
    /// manual itself) never appear in the extracted order.
    pub fn new(version: &str, language: &str, excluded_slugs: &[String]) -> Result<Self> {
        // Pattern depends on config, so it is compiled here rather than
        // in a LazyLock static.
        let pattern = format!(
            r"^/manuals/{}/{}/([A-Za-z0-9_-]+)\.html$",
            regex::escape(version),
            regex::escape(language),
        );
        let href_re = Regex::new(&pattern)
            .map_err(|e| DocweldError::parse(format!("invalid nav href pattern: {e}")))?;

        Ok(Self {
            href_re,
            excluded: excluded_slugs.iter().cloned().collect(),
        })
    }

    /// Recover the curated order from a navigation fragment.
    ///
    /// Anchors are walked in document order; matching hrefs yield slugs
    /// (duplicates preserved), exclusions are dropped, and each survivor
    /// is converted to its canonical filename. Returns `None` when the
    /// fragment yields no order — callers fall back to directory listing.
    pub fn extract(&self, fragment_html: &str) -> Option<Vec<String>> {
        let fragment = Html::parse_fragment(fragment_html);
        let anchors = Selector::parse("a[href]").expect("valid selector");

        let mut order = Vec::new();
        for anchor in fragment.select(&anchors) {
            let Some(href) = anchor.value().attr("href") else {
                continue;
            };
            let Some(caps) = self.href_re.captures(href) else {
                continue;
            };
            let slug = &caps[1];
            if self.excluded.contains(slug) {
                debug!(slug, "excluded from navigation order");
                continue;
            }
            order.push(canonical_filename(slug));
        }

        if order.is_empty() {
            info!("navigation fragment yields no order");
            return None;
        }

        debug!(pages = order.len(), "navigation order extracted");
        Some(order)
    }
}

/// Convert a hyphen/underscore-separated slug to its canonical source
/// filename: each word segment capitalized, concatenated, `.md` appended.
/// `getting-started` → `GettingStarted.md`.
pub fn canonical_filename(slug: &str) -> String {
    let mut name: String = slug
        .split(['-', '_'])
        .filter(|segment| !segment.is_empty())
        .map(capitalize)
        .collect();
    name.push_str(".md");
    name
}

/// Uppercase the first ASCII character of a word segment.
fn capitalize(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(c) => {
            let upper: String = c.to_uppercase().collect();
            format!("{upper}{}", chars.as_str())
        }
        None => String::new(),
    }
}

// ---------------------------------------------------------------------------
// Fallback ordering
// ---------------------------------------------------------------------------

/// Filenames the fallback listing must never include: the composed output
/// itself plus the canonical form of every excluded slug.
pub fn excluded_filenames(excluded_slugs: &[String], output_name: &str) -> HashSet<String> {
    let mut set: HashSet<String> = excluded_slugs.iter().map(|s| canonical_filename(s)).collect();
    set.insert(output_name.to_string());
    set
}

/// List the `.md` files directly inside `dir`, alphabetically by file name,
/// skipping `excluded` names. Deterministic for a given tree.
pub fn alphabetical_md_files(dir: &Path, excluded: &HashSet<String>) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir).map_err(|e| DocweldError::io(dir, e))?;

    let mut files: Vec<PathBuf> = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| DocweldError::io(dir, e))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if path.extension().and_then(|e| e.to_str()) != Some("md") {
            continue;
        }
        let name = entry.file_name().to_string_lossy().to_string();
        if excluded.contains(&name) {
            continue;
        }
        files.push(path);
    }

    files.sort_by_key(|p| p.file_name().map(|n| n.to_os_string()));
    Ok(files)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> NavExtractor {
        NavExtractor::new("1.0", "en", &["ai-assistant".into(), "index".into(), "1page".into()])
            .expect("valid extractor")
    }

    #[test]
    fn extracts_slugs_in_document_order() {
        let fragment = r#"
            <ul class="nav">
              <li><a href="/manuals/1.0/en/intro.html">Intro</a></li>
              <li><a href="/manuals/1.0/en/ai-assistant.html">AI Assistant</a></li>
              <li><a href="/manuals/1.0/en/setup.html">Setup</a></li>
            </ul>
        "#;
        let order = extractor().extract(fragment).expect("order");
        assert_eq!(order, vec!["Intro.md", "Setup.md"]);
    }

    #[test]
    fn duplicates_are_preserved() {
        let fragment = r#"
            <a href="/manuals/1.0/en/router.html">Router</a>
            <a href="/manuals/1.0/en/di.html">DI</a>
            <a href="/manuals/1.0/en/router.html">Router (again)</a>
        "#;
        let order = extractor().extract(fragment).expect("order");
        assert_eq!(order, vec!["Router.md", "Di.md", "Router.md"]);
    }

    #[test]
    fn foreign_hrefs_ignored() {
        let fragment = r#"
            <a href="/manuals/1.0/ja/intro.html">JA intro</a>
            <a href="https://example.com/manuals/1.0/en/intro.html">absolute</a>
            <a href="/manuals/1.0/en/intro.html#section">fragmented</a>
            <a href="/blog/post.html">blog</a>
        "#;
        assert!(extractor().extract(fragment).is_none());
    }

    #[test]
    fn zero_matches_is_no_order() {
        assert!(extractor().extract("<p>no nav here</p>").is_none());
        assert!(extractor().extract("").is_none());
    }

    #[test]
    fn nav_fixture_order() {
        let fragment = std::fs::read_to_string("../../../fixtures/site/_includes/nav/en.html")
            .expect("read fixture");
        let order = extractor().extract(&fragment).expect("order");
        assert_eq!(
            order,
            vec!["Intro.md", "GettingStarted.md", "Router.md", "Faq.md"]
        );
    }

    #[test]
    fn canonical_filename_conversion() {
        assert_eq!(canonical_filename("getting-started"), "GettingStarted.md");
        assert_eq!(canonical_filename("intro"), "Intro.md");
        assert_eq!(canonical_filename("v2_migration"), "V2Migration.md");
        assert_eq!(canonical_filename("a--b"), "AB.md");
    }

    #[test]
    fn excluded_filenames_cover_output_and_slugs() {
        let set = excluded_filenames(&["ai-assistant".into(), "index".into()], "1page.md");
        assert!(set.contains("AiAssistant.md"));
        assert!(set.contains("Index.md"));
        assert!(set.contains("1page.md"));
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn alphabetical_listing_is_deterministic() {
        let tmp = tempfile::tempdir().expect("tempdir");
        for name in ["Zebra.md", "Alpha.md", "Mid.md", "notes.txt", "1page.md"] {
            std::fs::write(tmp.path().join(name), "x").unwrap();
        }
        std::fs::create_dir(tmp.path().join("appendix")).unwrap();

        let excluded: HashSet<String> = ["1page.md".to_string()].into_iter().collect();
        let files = alphabetical_md_files(tmp.path(), &excluded).expect("list");
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["Alpha.md", "Mid.md", "Zebra.md"]);
    }

    #[test]
    fn missing_directory_is_io_error() {
        let excluded = HashSet::new();
        let err = alphabetical_md_files(Path::new("/nonexistent/dir"), &excluded).unwrap_err();
        assert!(matches!(err, DocweldError::Io { .. }));
    }
}
