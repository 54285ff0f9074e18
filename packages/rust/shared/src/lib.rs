//! Shared types, error model, and configuration for docweld.
//!
//! This crate is the foundation depended on by all other docweld crates.
//! It provides:
//! - [`DocweldError`] — the unified error type
//! - Domain types ([`SourceDocument`], [`LinkReference`])
//! - Configuration ([`AppConfig`], [`ResolveConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, CONFIG_FILE_NAME, ExpandConfigFile, LanguageConfig, ManualConfigFile,
    ResolveConfig, SiteConfig, init_config, load_config, load_config_from,
};
pub use error::{DocweldError, Result};
pub use types::{LinkReference, SourceDocument};
