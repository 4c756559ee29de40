//! The result of parsing one document.

use unfurl_core::entry::ContentMap;

use crate::error::Diagnostic;

/// Everything extracted from a flattened repository dump.
///
/// Produced by [`parse`](crate::parse) and consumed by the reconciler and
/// the materializer.
#[derive(Debug, Clone)]
pub struct ParsedDocument {
    files: ContentMap,
    tree_lines: Vec<String>,
    tree_paths: Vec<String>,
    warnings: Vec<Diagnostic>,
}

impl ParsedDocument {
    pub(crate) fn new(
        files: ContentMap,
        tree_lines: Vec<String>,
        tree_paths: Vec<String>,
        warnings: Vec<Diagnostic>,
    ) -> Self {
        Self {
            files,
            tree_lines,
            tree_paths,
            warnings,
        }
    }

    /// Cleaned file contents keyed by relative path.
    pub fn files(&self) -> &ContentMap {
        &self.files
    }

    /// Raw lines of the tree diagram, empty when the document has none.
    pub fn tree_lines(&self) -> &[String] {
        &self.tree_lines
    }

    /// Paths resolved from the tree diagram, in diagram order.
    pub fn tree_paths(&self) -> &[String] {
        &self.tree_paths
    }

    /// Warnings raised while parsing.
    pub fn warnings(&self) -> &[Diagnostic] {
        &self.warnings
    }
}
