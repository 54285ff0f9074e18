//! One-page manual composition.
//!
//! Stitches the per-language manual pages into a single combined document:
//! navigation order (or alphabetical fallback) for the main group, followed
//! by the appendix group under a one-time banner, with per-file frontmatter
//! stripped and empty pages dropped.

use std::path::PathBuf;

use tracing::{debug, info, instrument, warn};

use docweld_markdown::{load_document, split_leading_heading, title_from_stem};
use docweld_nav::{NavExtractor, alphabetical_md_files, excluded_filenames};
use docweld_shared::{DocweldError, Result};

use crate::output::write_atomic;
use crate::progress::ProgressReporter;

/// Separator emitted between sections.
const SECTION_SEPARATOR: &str = "\n***\n\n";

/// Banner heading emitted once before the first appendix section.
const APPENDIX_BANNER: &str = "# Appendix";

/// Title of the composed document.
const MANUAL_TITLE: &str = "1 Page Manual";

/// Configuration for composing one language's manual.
#[derive(Debug, Clone)]
pub struct ComposeConfig {
    /// Language code (path segment and layout suffix).
    pub language: String,
    /// Manual version (permalink segment).
    pub version: String,
    /// Introductory message placed under the title.
    pub intro: String,
    /// Directory holding the language's main manual pages.
    pub main_dir: PathBuf,
    /// Subdirectory holding the appendix group (may not exist).
    pub appendix_dir: PathBuf,
    /// Generated navigation fragment for this language (may not exist).
    pub nav_fragment: PathBuf,
    /// Destination for the combined document.
    pub output_file: PathBuf,
    /// File name of the composed output (excluded from fallback listing).
    pub output_name: String,
    /// Slugs omitted from the navigation order and fallback listing.
    pub excluded_slugs: Vec<String>,
}

/// Result of composing one language's manual.
#[derive(Debug)]
pub struct ComposeReport {
    /// Sections emitted into the combined document.
    pub sections: usize,
    /// Files skipped (read errors or empty bodies).
    pub skipped: usize,
    /// Whether the curated navigation order was used (false = fallback).
    pub used_nav_order: bool,
    /// Whether the output differs from the previous run's file.
    pub changed: bool,
}

/// Which group a file belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Group {
    Main,
    Appendix,
}

/// Compose the one-page manual for a single language.
#[instrument(skip_all, fields(language = %config.language))]
pub fn compose(config: &ComposeConfig, progress: &dyn ProgressReporter) -> Result<ComposeReport> {
    if !config.main_dir.is_dir() {
        return Err(DocweldError::validation(format!(
            "source folder does not exist: {}",
            config.main_dir.display()
        )));
    }

    progress.phase(&format!("Composing {} manual", config.language));

    let excluded = excluded_filenames(&config.excluded_slugs, &config.output_name);

    // Curated order from the navigation fragment, else alphabetical fallback.
    let nav_order = extract_nav_order(config);
    let used_nav_order = nav_order.is_some();
    let main_files: Vec<PathBuf> = match nav_order {
        Some(names) => names.iter().map(|name| config.main_dir.join(name)).collect(),
        None => {
            info!(dir = %config.main_dir.display(), "no navigation order, using alphabetical fallback");
            alphabetical_md_files(&config.main_dir, &excluded)?
        }
    };

    // The appendix group is always the alphabetical listing of its
    // subdirectory; an absent directory just means an empty group.
    let appendix_files = if config.appendix_dir.is_dir() {
        alphabetical_md_files(&config.appendix_dir, &excluded)?
    } else {
        Vec::new()
    };

    let files: Vec<(PathBuf, Group)> = main_files
        .into_iter()
        .map(|p| (p, Group::Main))
        .chain(appendix_files.into_iter().map(|p| (p, Group::Appendix)))
        .collect();

    let mut out = header(config);
    let mut sections = 0;
    let mut skipped = 0;
    let mut banner_emitted = false;
    let total = files.len();

    for (i, (path, group)) in files.iter().enumerate() {
        progress.item(&path.display().to_string(), i + 1, total);

        let doc = match load_document(path) {
            Ok(doc) => doc,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "skipping unreadable page");
                skipped += 1;
                continue;
            }
        };

        let body = doc.body.trim();
        if body.is_empty() {
            debug!(path = %path.display(), "empty body after stripping, skipping");
            skipped += 1;
            continue;
        }

        let section = match group {
            Group::Main => body.to_string(),
            Group::Appendix => appendix_section(path, body),
        };

        out.push_str(SECTION_SEPARATOR);
        if *group == Group::Appendix && !banner_emitted {
            out.push_str(APPENDIX_BANNER);
            out.push_str("\n\n");
            banner_emitted = true;
        }
        out.push_str(section.trim_end());
        sections += 1;
    }

    out.push('\n');
    let changed = write_atomic(&config.output_file, &out)?;

    info!(
        sections,
        skipped,
        used_nav_order,
        changed,
        output = %config.output_file.display(),
        "manual composition complete"
    );

    Ok(ComposeReport {
        sections,
        skipped,
        used_nav_order,
        changed,
    })
}

/// Read the navigation fragment and recover the curated order, if any.
fn extract_nav_order(config: &ComposeConfig) -> Option<Vec<String>> {
    if !config.nav_fragment.is_file() {
        debug!(path = %config.nav_fragment.display(), "no navigation fragment");
        return None;
    }

    let html = match std::fs::read_to_string(&config.nav_fragment) {
        Ok(html) => html,
        Err(e) => {
            warn!(path = %config.nav_fragment.display(), error = %e, "cannot read navigation fragment");
            return None;
        }
    };

    let extractor =
        match NavExtractor::new(&config.version, &config.language, &config.excluded_slugs) {
            Ok(extractor) => extractor,
            Err(e) => {
                warn!(error = %e, "cannot build navigation extractor");
                return None;
            }
        };

    extractor.extract(&html)
}

/// The fixed metadata header, title line, and intro message.
fn header(config: &ComposeConfig) -> String {
    let permalink_name = config
        .output_name
        .strip_suffix(".md")
        .unwrap_or(&config.output_name);

    format!(
        "---\nlayout: docs-{language}\ntitle: {MANUAL_TITLE}\ncategory: Manual\npermalink: /manuals/{version}/{language}/{permalink_name}.html\n---\n# {MANUAL_TITLE}\n\n{intro}\n",
        language = config.language,
        version = config.version,
        intro = config.intro.trim(),
    )
}

/// Render an appendix page: its leading heading normalized to a fixed
/// sub-heading, or a title derived from the filename when it has none.
fn appendix_section(path: &std::path::Path, body: &str) -> String {
    match split_leading_heading(body) {
        Some((title, rest)) => format!("## {title}\n\n{}", rest.trim()),
        None => {
            let stem = path
                .file_stem()
                .map(|s| s.to_string_lossy().to_string())
                .unwrap_or_default();
            format!("## {}\n\n{body}", title_from_stem(&stem))
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::SilentProgress;
    use std::path::Path;

    fn fixture_site() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("../../../fixtures/site")
    }

    fn make_config(output: &Path) -> ComposeConfig {
        let main_dir = fixture_site().join("manuals/1.0/en");
        ComposeConfig {
            language: "en".into(),
            version: "1.0".into(),
            intro: "This page collects every manual page in one place.".into(),
            appendix_dir: main_dir.join("appendix"),
            nav_fragment: fixture_site().join("_includes/nav/en.html"),
            main_dir,
            output_file: output.to_path_buf(),
            output_name: "1page.md".into(),
            excluded_slugs: vec!["ai-assistant".into(), "index".into(), "1page".into()],
        }
    }

    #[test]
    fn composes_in_navigation_order() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let out = tmp.path().join("1page.md");

        let report = compose(&make_config(&out), &SilentProgress).expect("compose");
        assert!(report.used_nav_order);

        let text = std::fs::read_to_string(&out).unwrap();
        let intro = text.find("# Intro").expect("intro section");
        let started = text.find("# Getting Started").expect("getting started");
        let router = text.find("# Router").expect("router");
        let faq = text.find("# FAQ").expect("faq");
        assert!(intro < started && started < router && router < faq);
    }

    #[test]
    fn header_is_language_keyed() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let out = tmp.path().join("1page.md");
        compose(&make_config(&out), &SilentProgress).expect("compose");

        let text = std::fs::read_to_string(&out).unwrap();
        assert!(text.starts_with("---\nlayout: docs-en\ntitle: 1 Page Manual\ncategory: Manual\npermalink: /manuals/1.0/en/1page.html\n---\n"));
        assert!(text.contains("This page collects every manual page in one place."));
    }

    #[test]
    fn appendix_banner_once_before_first_appendix_section() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let out = tmp.path().join("1page.md");
        compose(&make_config(&out), &SilentProgress).expect("compose");

        let text = std::fs::read_to_string(&out).unwrap();
        assert_eq!(text.matches("# Appendix\n").count(), 1);

        // The banner precedes the first appendix page (alphabetical order).
        let banner = text.find("# Appendix\n").unwrap();
        let glossary = text.find("## Glossary").expect("glossary sub-heading");
        let notes = text.find("## Release Notes").expect("derived sub-heading");
        assert!(banner < glossary && glossary < notes);
    }

    #[test]
    fn no_double_or_leading_separators() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let out = tmp.path().join("1page.md");
        compose(&make_config(&out), &SilentProgress).expect("compose");

        let text = std::fs::read_to_string(&out).unwrap();
        assert!(!text.contains("***\n\n\n***"));
        assert!(!text.contains("***\n\n***"));
        // The first separator comes after the intro, not before it.
        let intro_pos = text.find("in one place.").unwrap();
        assert!(text.find("\n***\n").unwrap() > intro_pos);
    }

    #[test]
    fn fallback_order_is_alphabetical_and_skips_empty() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let out = tmp.path().join("1page.md");

        let mut config = make_config(&out);
        config.nav_fragment = fixture_site().join("_includes/nav/absent.html");

        let report = compose(&config, &SilentProgress).expect("compose");
        assert!(!report.used_nav_order);

        let text = std::fs::read_to_string(&out).unwrap();
        // Alphabetical fallback: Empty.md sorts first but is skipped, and
        // the excluded assistant page never appears.
        assert!(report.skipped >= 1);
        assert!(!text.contains("assistant-only"));
        let faq = text.find("# FAQ").expect("faq");
        let started = text.find("# Getting Started").expect("getting started");
        assert!(faq < started);
    }

    #[test]
    fn empty_appendix_group_has_no_banner() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let out = tmp.path().join("1page.md");

        let mut config = make_config(&out);
        config.appendix_dir = fixture_site().join("manuals/1.0/en/no-such-dir");

        compose(&config, &SilentProgress).expect("compose");
        let text = std::fs::read_to_string(&out).unwrap();
        assert!(!text.contains("# Appendix\n"));
    }

    #[test]
    fn missing_main_dir_is_fatal() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let out = tmp.path().join("1page.md");

        let mut config = make_config(&out);
        config.main_dir = fixture_site().join("manuals/1.0/xx");

        let err = compose(&config, &SilentProgress).unwrap_err();
        assert!(matches!(err, DocweldError::Validation { .. }));
    }

    #[test]
    fn consecutive_empty_files_leave_no_dangling_separators() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let out = tmp.path().join("1page.md");

        let main_dir = tmp.path().join("manuals/1.0/en");
        std::fs::create_dir_all(&main_dir).unwrap();
        std::fs::write(main_dir.join("Alpha.md"), "---\ntitle: A\n---\n").unwrap();
        std::fs::write(main_dir.join("Beta.md"), "---\ntitle: B\n---\n\n\n").unwrap();
        std::fs::write(
            main_dir.join("Gamma.md"),
            "---\ntitle: G\n---\n# Gamma\n\nReal content.\n",
        )
        .unwrap();

        let config = ComposeConfig {
            language: "en".into(),
            version: "1.0".into(),
            intro: "Intro message.".into(),
            appendix_dir: main_dir.join("appendix"),
            nav_fragment: tmp.path().join("nav/en.html"),
            main_dir,
            output_file: out.clone(),
            output_name: "1page.md".into(),
            excluded_slugs: vec![],
        };

        let report = compose(&config, &SilentProgress).expect("compose");
        assert_eq!(report.sections, 1);
        assert_eq!(report.skipped, 2);

        let text = std::fs::read_to_string(&out).unwrap();
        assert_eq!(text.matches("***").count(), 1);
        assert!(!text.contains("***\n\n***"));
        assert!(text.trim_end().ends_with("Real content."));
    }

    #[test]
    fn nav_listed_but_missing_file_is_skipped() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let out = tmp.path().join("1page.md");

        // A scratch tree whose nav order names a file that does not exist.
        let site = tmp.path().join("site");
        let main_dir = site.join("manuals/1.0/en");
        std::fs::create_dir_all(&main_dir).unwrap();
        std::fs::write(
            main_dir.join("Intro.md"),
            "---\ntitle: Intro\n---\n# Intro\n\nText.\n",
        )
        .unwrap();
        let nav_dir = site.join("_includes/nav");
        std::fs::create_dir_all(&nav_dir).unwrap();
        std::fs::write(
            nav_dir.join("en.html"),
            r#"<a href="/manuals/1.0/en/intro.html">Intro</a>
               <a href="/manuals/1.0/en/ghost.html">Ghost</a>"#,
        )
        .unwrap();

        let config = ComposeConfig {
            language: "en".into(),
            version: "1.0".into(),
            intro: "Intro message.".into(),
            appendix_dir: main_dir.join("appendix"),
            nav_fragment: nav_dir.join("en.html"),
            main_dir,
            output_file: out.clone(),
            output_name: "1page.md".into(),
            excluded_slugs: vec![],
        };

        let report = compose(&config, &SilentProgress).expect("compose");
        assert_eq!(report.sections, 1);
        assert_eq!(report.skipped, 1);

        let text = std::fs::read_to_string(&out).unwrap();
        assert!(text.contains("# Intro"));
        assert!(!text.contains("Ghost"));
    }
}
