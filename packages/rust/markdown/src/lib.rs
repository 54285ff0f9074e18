//! Markdown document loading, frontmatter handling, and link extraction.
//!
//! Everything here is a pure text transform except [`load_document`], which
//! reads a page from disk and splits it into frontmatter and body.

mod frontmatter;
mod links;

use std::path::Path;

use tracing::debug;

use docweld_shared::{DocweldError, Result, SourceDocument};

pub use frontmatter::{split_frontmatter, strip_frontmatter};
pub use links::{clean_url, extract_links, first_link, split_leading_heading, title_from_stem};

/// Load a Markdown page from disk into a [`SourceDocument`].
///
/// The frontmatter map is empty when the block is absent or malformed;
/// the body is everything after it.
pub fn load_document(path: &Path) -> Result<SourceDocument> {
    let raw = std::fs::read_to_string(path).map_err(|e| DocweldError::io(path, e))?;
    let (fields, body) = split_frontmatter(&raw);

    debug!(
        path = %path.display(),
        frontmatter = fields.is_some(),
        body_len = body.len(),
        "loaded document"
    );

    Ok(SourceDocument {
        path: path.to_path_buf(),
        frontmatter: fields.unwrap_or_default(),
        body: body.to_string(),
    })
}
