//! Atomic output writing with change detection.

use std::path::Path;

use sha2::{Digest, Sha256};
use tracing::debug;

use docweld_shared::{DocweldError, Result};

/// Write `content` to `path` atomically (temp file + rename), fully
/// overwriting any prior version.
///
/// Returns `true` when the written content differs from what was on disk
/// before the run (or when no prior file existed).
pub(crate) fn write_atomic(path: &Path, content: &str) -> Result<bool> {
    let changed = match std::fs::read(path) {
        Ok(previous) => hash(&previous) != hash(content.as_bytes()),
        Err(_) => true,
    };

    let parent = path.parent().filter(|p| !p.as_os_str().is_empty());
    if let Some(parent) = parent {
        std::fs::create_dir_all(parent).map_err(|e| DocweldError::io(parent, e))?;
    }

    let file_name = path
        .file_name()
        .ok_or_else(|| DocweldError::validation(format!("not a file path: {}", path.display())))?
        .to_string_lossy();
    let temp = match parent {
        Some(parent) => parent.join(format!(".{file_name}.tmp")),
        None => std::path::PathBuf::from(format!(".{file_name}.tmp")),
    };

    std::fs::write(&temp, content).map_err(|e| DocweldError::io(&temp, e))?;
    std::fs::rename(&temp, path).map_err(|e| DocweldError::io(path, e))?;

    debug!(path = %path.display(), bytes = content.len(), changed, "wrote output");
    Ok(changed)
}

/// SHA-256 hex digest of a byte slice.
fn hash(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}
