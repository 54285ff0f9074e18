//! Markdown tree mirroring.
//!
//! Copies every `.md` file under the manuals tree into a destination
//! directory (typically the rendered site), preserving relative paths, so
//! permalinks can serve the raw Markdown alongside the rendered pages.

use std::path::PathBuf;

use tracing::{debug, info, instrument};

use docweld_shared::{DocweldError, Result};

use crate::progress::ProgressReporter;
use crate::walk::collect_md_files;

/// Configuration for a mirror run.
#[derive(Debug, Clone)]
pub struct MirrorConfig {
    /// Root of the Markdown tree to copy.
    pub source_dir: PathBuf,
    /// Destination root; relative paths are preserved beneath it.
    pub dest_dir: PathBuf,
}

/// Result of a mirror run.
#[derive(Debug)]
pub struct MirrorReport {
    /// Files copied.
    pub copied: usize,
}

/// Copy the Markdown tree into the destination directory.
#[instrument(skip_all, fields(source = %config.source_dir.display()))]
pub fn mirror(config: &MirrorConfig, progress: &dyn ProgressReporter) -> Result<MirrorReport> {
    if !config.source_dir.is_dir() {
        return Err(DocweldError::validation(format!(
            "source folder does not exist: {}",
            config.source_dir.display()
        )));
    }

    progress.phase("Mirroring Markdown tree");

    let files = collect_md_files(&config.source_dir)?;
    let total = files.len();
    let mut copied = 0;

    for (i, path) in files.iter().enumerate() {
        let relative = path
            .strip_prefix(&config.source_dir)
            .map_err(|_| DocweldError::validation(format!("path escapes source tree: {}", path.display())))?;
        progress.item(&relative.display().to_string(), i + 1, total);

        let dest = config.dest_dir.join(relative);
        if let Some(parent) = dest.parent() {
            std::fs::create_dir_all(parent).map_err(|e| DocweldError::io(parent, e))?;
        }
        std::fs::copy(path, &dest).map_err(|e| DocweldError::io(&dest, e))?;

        debug!(file = %relative.display(), "copied page");
        copied += 1;
    }

    info!(copied, dest = %config.dest_dir.display(), "mirror complete");
    Ok(MirrorReport { copied })
}
