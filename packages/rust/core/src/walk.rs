//! Recursive Markdown file collection.

use std::path::{Path, PathBuf};

use docweld_shared::{DocweldError, Result};

/// Collect every `.md` file under `dir`, sorted by path for deterministic
/// processing order.
pub(crate) fn collect_md_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    visit(dir, &mut files)?;
    files.sort();
    Ok(files)
}

fn visit(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    for entry in std::fs::read_dir(dir).map_err(|e| DocweldError::io(dir, e))? {
        let entry = entry.map_err(|e| DocweldError::io(dir, e))?;
        let path = entry.path();
        if path.is_dir() {
            visit(&path, files)?;
        } else if path.extension().and_then(|e| e.to_str()) == Some("md") {
            files.push(path);
        }
    }
    Ok(())
}
