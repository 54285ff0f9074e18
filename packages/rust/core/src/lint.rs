//! Frontmatter lint for the content tree.
//!
//! Every authored page must open with a frontmatter block defining
//! `layout`, `title`, `category`, and `permalink`. Generated outputs
//! (the one-page manuals) are exempt.

use std::collections::HashSet;
use std::path::PathBuf;

use tracing::{debug, info, instrument, warn};

use docweld_markdown::split_frontmatter;
use docweld_shared::{DocweldError, Result};

use crate::progress::ProgressReporter;
use crate::walk::collect_md_files;

/// Fields every authored page's frontmatter must define.
const REQUIRED_FIELDS: [&str; 4] = ["layout", "title", "category", "permalink"];

/// Configuration for a lint run.
#[derive(Debug, Clone)]
pub struct LintConfig {
    /// Root of the content tree to check.
    pub content_dir: PathBuf,
    /// File names exempt from the check (generated outputs).
    pub exempt_files: HashSet<String>,
}

/// A single violation found in one file.
#[derive(Debug)]
pub struct LintIssue {
    /// File the violation was found in.
    pub path: PathBuf,
    /// Human-readable description.
    pub message: String,
}

/// Result of a lint run.
#[derive(Debug)]
pub struct LintReport {
    /// Files checked.
    pub checked: usize,
    /// Violations found, in path order.
    pub issues: Vec<LintIssue>,
}

/// Check every Markdown page under the content tree.
///
/// Violations are collected, never thrown; the caller decides whether
/// they fail the build.
#[instrument(skip_all, fields(dir = %config.content_dir.display()))]
pub fn lint(config: &LintConfig, progress: &dyn ProgressReporter) -> Result<LintReport> {
    if !config.content_dir.is_dir() {
        return Err(DocweldError::validation(format!(
            "content folder does not exist: {}",
            config.content_dir.display()
        )));
    }

    progress.phase("Checking frontmatter");

    let files = collect_md_files(&config.content_dir)?;
    let total = files.len();
    let mut checked = 0;
    let mut issues = Vec::new();

    for (i, path) in files.iter().enumerate() {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        if config.exempt_files.contains(&name) {
            debug!(path = %path.display(), "exempt from lint");
            continue;
        }

        progress.item(&path.display().to_string(), i + 1, total);
        checked += 1;

        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "unreadable page");
                issues.push(LintIssue {
                    path: path.clone(),
                    message: format!("unreadable: {e}"),
                });
                continue;
            }
        };

        match split_frontmatter(&raw).0 {
            None => issues.push(LintIssue {
                path: path.clone(),
                message: "missing or unclosed frontmatter block".into(),
            }),
            Some(fields) => {
                for field in REQUIRED_FIELDS {
                    if !fields.contains_key(field) {
                        issues.push(LintIssue {
                            path: path.clone(),
                            message: format!("missing required field '{field}'"),
                        });
                    }
                }
            }
        }
    }

    info!(checked, issues = issues.len(), "lint complete");
    Ok(LintReport { checked, issues })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::SilentProgress;

    fn write(dir: &std::path::Path, name: &str, content: &str) {
        std::fs::write(dir.join(name), content).unwrap();
    }

    #[test]
    fn valid_tree_has_no_issues() {
        let tmp = tempfile::tempdir().expect("tempdir");
        write(
            tmp.path(),
            "Router.md",
            "---\nlayout: docs-en\ntitle: Router\ncategory: Manual\npermalink: /manuals/1.0/en/router.html\n---\nBody\n",
        );

        let report = lint(
            &LintConfig {
                content_dir: tmp.path().to_path_buf(),
                exempt_files: HashSet::new(),
            },
            &SilentProgress,
        )
        .expect("lint");

        assert_eq!(report.checked, 1);
        assert!(report.issues.is_empty());
    }

    #[test]
    fn reports_missing_fields_and_blocks() {
        let tmp = tempfile::tempdir().expect("tempdir");
        write(
            tmp.path(),
            "NoBlock.md",
            "# Just content\n",
        );
        write(
            tmp.path(),
            "Partial.md",
            "---\nlayout: docs-en\ntitle: Partial\n---\nBody\n",
        );

        let report = lint(
            &LintConfig {
                content_dir: tmp.path().to_path_buf(),
                exempt_files: HashSet::new(),
            },
            &SilentProgress,
        )
        .expect("lint");

        assert_eq!(report.checked, 2);
        // NoBlock: one block issue. Partial: category + permalink missing.
        assert_eq!(report.issues.len(), 3);
        assert!(
            report
                .issues
                .iter()
                .any(|i| i.message.contains("missing or unclosed"))
        );
        assert!(
            report
                .issues
                .iter()
                .any(|i| i.message.contains("'category'"))
        );
    }

    #[test]
    fn exempt_files_are_not_checked() {
        let tmp = tempfile::tempdir().expect("tempdir");
        write(tmp.path(), "1page.md", "generated, no frontmatter\n");

        let exempt: HashSet<String> = ["1page.md".to_string()].into_iter().collect();
        let report = lint(
            &LintConfig {
                content_dir: tmp.path().to_path_buf(),
                exempt_files: exempt,
            },
            &SilentProgress,
        )
        .expect("lint");

        assert_eq!(report.checked, 0);
        assert!(report.issues.is_empty());
    }
}
