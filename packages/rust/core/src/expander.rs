//! Recursive link expansion.
//!
//! Reads a seed index file of Markdown links, inlines each target's full
//! content, and recursively substitutes internal links found inside loaded
//! pages. One bad link never aborts the run; failures are tallied and the
//! remaining entries still produce output.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::{info, instrument, warn};

use docweld_markdown::{clean_url, extract_links, first_link, load_document};
use docweld_resolve::Resolver;
use docweld_shared::{DocweldError, ResolveConfig, Result};

use crate::output::write_atomic;
use crate::progress::ProgressReporter;

/// Delimiter emitted between expanded seed entries.
const ENTRY_DELIMITER: &str = "--------------------";

/// Configuration for a link-expansion run.
#[derive(Debug, Clone)]
pub struct ExpandConfig {
    /// Seed index file: one Markdown link per non-comment line.
    pub index_file: PathBuf,
    /// Destination for the combined expanded output.
    pub output_file: PathBuf,
    /// Resolver settings (base URL + base directory).
    pub resolve: ResolveConfig,
}

/// Result of a link-expansion run.
#[derive(Debug)]
pub struct ExpandReport {
    /// Seed entries expanded successfully.
    pub processed: usize,
    /// Seed entries whose target could not be resolved or read.
    pub failed: usize,
    /// Lines skipped because they contained no Markdown link.
    pub skipped: usize,
    /// Whether the output differs from the previous run's file.
    pub changed: bool,
}

/// Run the expansion pipeline over the seed index file.
///
/// Fatal only when the index file is missing or the output cannot be
/// written; every per-entry failure is recovered and tallied.
#[instrument(skip_all, fields(index = %config.index_file.display()))]
pub fn expand(config: &ExpandConfig, progress: &dyn ProgressReporter) -> Result<ExpandReport> {
    let resolver = Resolver::new(config.resolve.clone())?;

    let index = std::fs::read_to_string(&config.index_file)
        .map_err(|e| DocweldError::io(&config.index_file, e))?;

    let seeds: Vec<&str> = index
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .collect();

    info!(seeds = seeds.len(), "expanding seed links");
    progress.phase("Expanding seed links");

    let mut out = String::new();
    let mut processed = 0;
    let mut failed = 0;
    let mut skipped = 0;
    let total = seeds.len();

    for (i, &line) in seeds.iter().enumerate() {
        let Some(link) = first_link(line) else {
            warn!(line, "skipping line (not a Markdown link)");
            skipped += 1;
            continue;
        };

        let url = clean_url(&link.url).to_string();
        progress.item(&url, i + 1, total);

        match expand_seed(&resolver, &url) {
            Ok(content) => {
                out.push_str(&format!("# Source: {url}\n\n"));
                out.push_str(content.trim());
                out.push_str("\n\n");
                out.push_str(ENTRY_DELIMITER);
                out.push_str("\n\n");
                processed += 1;
            }
            Err(e) => {
                warn!(url, error = %e, "failed to expand seed link");
                failed += 1;
            }
        }
    }

    let changed = write_atomic(&config.output_file, &out)?;

    info!(processed, failed, skipped, changed, "link expansion complete");

    Ok(ExpandReport {
        processed,
        failed,
        skipped,
        changed,
    })
}

/// Expand one top-level seed entry: resolve, load, strip frontmatter, and
/// recursively inline internal links.
fn expand_seed(resolver: &Resolver, url: &str) -> Result<String> {
    let path = resolver.resolve(url)?;
    let doc = load_document(&path)?;

    let mut visited = HashSet::new();
    visited.insert(path);

    Ok(expand_body(resolver, &doc.body, &mut visited))
}

/// Substitute every internal link in `body` with its target's expanded
/// content, text-for-text.
///
/// `visited` holds every path already inlined under the current seed; a
/// revisit substitutes a short reference instead of re-inlining, so
/// mutually linking pages always terminate.
fn expand_body(resolver: &Resolver, body: &str, visited: &mut HashSet<PathBuf>) -> String {
    let mut content = body.to_string();

    for link in extract_links(body) {
        let target = clean_url(&link.url);
        if !resolver.is_internal(target) {
            continue;
        }

        let absolute = resolver.absolutize(target);
        let path = match resolver.resolve(&absolute) {
            Ok(path) => path,
            Err(e) => {
                warn!(url = target, error = %e, "cannot resolve linked URL");
                continue;
            }
        };

        let replacement = if visited.contains(&path) {
            format!(
                "{} *(see {})*",
                link.text,
                display_path(resolver, &path)
            )
        } else {
            let doc = match load_document(&path) {
                Ok(doc) => doc,
                Err(e) => {
                    warn!(url = target, error = %e, "cannot read linked page");
                    continue;
                }
            };
            visited.insert(path);
            let expanded = expand_body(resolver, &doc.body, visited);
            format!("{}\n\n{}", link.text, expanded)
        };

        content = content.replacen(&link.markup(), &replacement, 1);
    }

    content
}

/// A resolved path relative to the base directory, for `(see …)` references.
fn display_path(resolver: &Resolver, path: &Path) -> String {
    path.strip_prefix(resolver.base_dir())
        .unwrap_or(path)
        .display()
        .to_string()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
