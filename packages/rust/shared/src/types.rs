//! Core domain types for docweld aggregation runs.

use std::collections::HashMap;
use std::path::PathBuf;

// ---------------------------------------------------------------------------
// SourceDocument
// ---------------------------------------------------------------------------

/// A Markdown page loaded from disk: its path, the key→value pairs of its
/// leading frontmatter block (empty when the block is absent or malformed),
/// and the body text that follows it.
///
/// Immutable once loaded; discarded at the end of the run.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    /// Absolute path the document was read from.
    pub path: PathBuf,
    /// Parsed frontmatter fields. Order is irrelevant.
    pub frontmatter: HashMap<String, String>,
    /// Text following the frontmatter block.
    pub body: String,
}

impl SourceDocument {
    /// Whether the body is empty after trimming surrounding whitespace.
    pub fn is_blank(&self) -> bool {
        self.body.trim().is_empty()
    }
}

// ---------------------------------------------------------------------------
// LinkReference
// ---------------------------------------------------------------------------

/// A `[text](url)` pair extracted from Markdown link syntax.
///
/// Extraction preserves first-appearance order, which governs expansion
/// and substitution order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkReference {
    /// Display text of the link.
    pub text: String,
    /// Target URL or root-relative path.
    pub url: String,
}

impl LinkReference {
    /// The full Markdown markup this reference was extracted from.
    pub fn markup(&self) -> String {
        format!("[{}]({})", self.text, self.url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_document_detection() {
        let doc = SourceDocument {
            path: PathBuf::from("/docs/Empty.md"),
            frontmatter: HashMap::new(),
            body: "  \n\t\n".into(),
        };
        assert!(doc.is_blank());

        let doc = SourceDocument {
            path: PathBuf::from("/docs/Page.md"),
            frontmatter: HashMap::new(),
            body: "# Hello\n".into(),
        };
        assert!(!doc.is_blank());
    }

    #[test]
    fn link_reference_markup_roundtrip() {
        let link = LinkReference {
            text: "Getting Started".into(),
            url: "/manuals/1.0/en/getting-started.html".into(),
        };
        assert_eq!(
            link.markup(),
            "[Getting Started](/manuals/1.0/en/getting-started.html)"
        );
    }
}
