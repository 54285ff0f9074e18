//! Site configuration for docweld.
//!
//! Config lives in a `docweld.toml` next to the documentation tree
//! (like the site's own `_config.yml`). CLI flags override config file
//! values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{DocweldError, Result};

/// Default configuration file name.
pub const CONFIG_FILE_NAME: &str = "docweld.toml";

// ---------------------------------------------------------------------------
// Config structs (matching docweld.toml schema)
// ---------------------------------------------------------------------------

/// Top-level site config, deserialized from TOML.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Site identity: base URL, content root, manual version.
    #[serde(default)]
    pub site: SiteConfig,

    /// Link-expansion settings.
    #[serde(default)]
    pub expand: ExpandConfigFile,

    /// One-page manual composition settings.
    #[serde(default)]
    pub manual: ManualConfigFile,

    /// Documented languages, in build order.
    #[serde(default = "default_languages")]
    pub languages: Vec<LanguageConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            site: SiteConfig::default(),
            expand: ExpandConfigFile::default(),
            manual: ManualConfigFile::default(),
            languages: default_languages(),
        }
    }
}

/// `[site]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// URL prefix that identifies internal links.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Root of the Markdown tree, relative to the config file.
    #[serde(default = "default_base_dir")]
    pub base_dir: String,

    /// Manual version segment used in permalinks (`/manuals/<version>/...`).
    #[serde(default = "default_version")]
    pub version: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            base_dir: default_base_dir(),
            version: default_version(),
        }
    }
}

fn default_base_url() -> String {
    "https://docs.example.com/".into()
}
fn default_base_dir() -> String {
    ".".into()
}
fn default_version() -> String {
    "1.0".into()
}

/// `[expand]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpandConfigFile {
    /// Seed index file listing one Markdown link per line.
    #[serde(default = "default_index_file")]
    pub index_file: String,

    /// Destination for the expanded output.
    #[serde(default = "default_output_file")]
    pub output_file: String,
}

impl Default for ExpandConfigFile {
    fn default() -> Self {
        Self {
            index_file: default_index_file(),
            output_file: default_output_file(),
        }
    }
}

fn default_index_file() -> String {
    "llms.txt".into()
}
fn default_output_file() -> String {
    "llms-full.txt".into()
}

/// `[manual]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManualConfigFile {
    /// Directory holding per-language manual trees, relative to base_dir.
    #[serde(default = "default_manuals_dir")]
    pub manuals_dir: String,

    /// Subdirectory of a language tree treated as the appendix group.
    #[serde(default = "default_appendix_dir")]
    pub appendix_dir: String,

    /// Directory holding generated navigation fragments (`<language>.html`),
    /// relative to base_dir.
    #[serde(default = "default_nav_dir")]
    pub nav_dir: String,

    /// File name of the composed one-page manual.
    #[serde(default = "default_output_name")]
    pub output_name: String,

    /// Slugs omitted from the navigation order and the fallback listing.
    #[serde(default = "default_excluded_slugs")]
    pub excluded_slugs: Vec<String>,
}

impl Default for ManualConfigFile {
    fn default() -> Self {
        Self {
            manuals_dir: default_manuals_dir(),
            appendix_dir: default_appendix_dir(),
            nav_dir: default_nav_dir(),
            output_name: default_output_name(),
            excluded_slugs: default_excluded_slugs(),
        }
    }
}

fn default_manuals_dir() -> String {
    "manuals".into()
}
fn default_appendix_dir() -> String {
    "appendix".into()
}
fn default_nav_dir() -> String {
    "_includes/nav".into()
}
fn default_output_name() -> String {
    "1page.md".into()
}
fn default_excluded_slugs() -> Vec<String> {
    vec!["ai-assistant".into(), "index".into(), "1page".into()]
}

/// `[[languages]]` entry — one documented language.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguageConfig {
    /// Language code used in paths and permalinks (e.g. `en`).
    pub code: String,
    /// Introductory message placed at the top of the composed manual.
    pub intro: String,
}

fn default_languages() -> Vec<LanguageConfig> {
    vec![LanguageConfig {
        code: "en".into(),
        intro: "This page collects every manual page in one place.".into(),
    }]
}

// ---------------------------------------------------------------------------
// Runtime resolver settings
// ---------------------------------------------------------------------------

/// Settings for the path resolver: the base URL that identifies internal
/// links and the base directory resolved paths are joined onto.
#[derive(Debug, Clone)]
pub struct ResolveConfig {
    /// URL prefix that identifies internal links.
    pub base_url: String,
    /// Root directory for resolved paths.
    pub base_dir: PathBuf,
}

impl ResolveConfig {
    /// Build resolver settings from a loaded config and its site root.
    pub fn from_app_config(config: &AppConfig, site_root: &Path) -> Self {
        Self {
            base_url: config.site.base_url.clone(),
            base_dir: site_root.to_path_buf(),
        }
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Load config from an explicit path (must exist) or from
/// `./docweld.toml` (defaults when missing).
///
/// Returns the config together with the directory it was loaded from —
/// relative paths inside the config resolve against that directory.
pub fn load_config(path: Option<&Path>) -> Result<(AppConfig, PathBuf)> {
    match path {
        Some(p) => {
            let config = load_config_from(p)?;
            let dir = p
                .parent()
                .filter(|d| !d.as_os_str().is_empty())
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from("."));
            Ok((config, dir))
        }
        None => {
            let p = PathBuf::from(CONFIG_FILE_NAME);
            if !p.exists() {
                tracing::debug!(?p, "config file not found, using defaults");
                return Ok((AppConfig::default(), PathBuf::from(".")));
            }
            Ok((load_config_from(&p)?, PathBuf::from(".")))
        }
    }
}

/// Load the site config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| DocweldError::io(path, e))?;

    toml::from_str(&content)
        .map_err(|e| DocweldError::config(format!("failed to parse {}: {e}", path.display())))
}

/// Write a default config file into the given directory.
/// Returns the path to the created file.
pub fn init_config(dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(dir).map_err(|e| DocweldError::io(dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| DocweldError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| DocweldError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}
