//! URL → local path resolution.
//!
//! Maps an internal URL (base-URL-prefixed or root-relative) to the
//! absolute path of the Markdown source that backs it. Purely syntactic:
//! the resolver never touches the filesystem, so existence checks stay
//! with the caller.

use std::path::{Path, PathBuf};

use tracing::trace;
use url::Url;

use docweld_shared::{DocweldError, ResolveConfig, Result};

/// The extension appended to directory-style references.
const INDEX_FILE: &str = "index.md";

/// Resolves internal hrefs onto a local Markdown tree.
#[derive(Debug, Clone)]
pub struct Resolver {
    config: ResolveConfig,
}

impl Resolver {
    /// Create a resolver. Fails if the configured base URL is not a valid
    /// absolute URL.
    pub fn new(config: ResolveConfig) -> Result<Self> {
        Url::parse(&config.base_url).map_err(|e| {
            DocweldError::config(format!("invalid base_url '{}': {e}", config.base_url))
        })?;
        Ok(Self { config })
    }

    /// The configured base URL prefix.
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// The configured base directory.
    pub fn base_dir(&self) -> &Path {
        &self.config.base_dir
    }

    /// Whether a URL passes the base-URL-or-root-relative test.
    pub fn is_internal(&self, url: &str) -> bool {
        url.starts_with(&self.config.base_url) || url.starts_with('/')
    }

    /// Normalize a root-relative href onto the base URL.
    /// Already-absolute internal URLs pass through unchanged.
    pub fn absolutize(&self, url: &str) -> String {
        match url.strip_prefix('/') {
            Some(rest) => format!("{}{rest}", self.config.base_url),
            None => url.to_string(),
        }
    }

    /// Resolve an internal URL to an absolute local file path.
    ///
    /// - extension-less paths are directory references and get `index.md`
    /// - `.html`/`.htm` is rewritten to `.md` (case-insensitive, suffix only)
    /// - `#fragment` portions are discarded
    ///
    /// The returned path is not checked for existence.
    pub fn resolve(&self, url: &str) -> Result<PathBuf> {
        let url = url.trim();

        let relative = if let Some(rest) = url.strip_prefix(self.config.base_url.as_str()) {
            rest
        } else if let Some(rest) = url.strip_prefix('/') {
            rest
        } else {
            return Err(DocweldError::unresolvable(url));
        };

        // Collapse stray leading/trailing separators, then drop the fragment.
        let relative = relative.trim_matches('/');
        let relative = relative.split('#').next().unwrap_or_default();
        let relative = relative.trim_matches('/');

        let resolved = match Path::new(relative)
            .extension()
            .and_then(|ext| ext.to_str())
        {
            None => {
                // Directory reference — a bare base URL lands on the root index.
                if relative.is_empty() {
                    INDEX_FILE.to_string()
                } else {
                    format!("{relative}/{INDEX_FILE}")
                }
            }
            Some(ext) if ext.eq_ignore_ascii_case("html") || ext.eq_ignore_ascii_case("htm") => {
                format!("{}md", &relative[..relative.len() - ext.len()])
            }
            Some(_) => relative.to_string(),
        };

        let path = self.config.base_dir.join(resolved);
        trace!(url, path = %path.display(), "resolved internal link");
        Ok(path)
    }
}
