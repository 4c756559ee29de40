//! # Unfurl Parser
//!
//! Parser for flattened repository dumps. A dump mixes two formats: an ASCII
//! tree diagram of the repository layout, and one content block per file
//! with a `/path:` header, a dashed separator and line-numbered content.
//!
//! ## Usage
//!
//! ```
//! # use unfurl_parser::{parse, ParseConfig, error::ParseError};
//!
//! fn main() -> Result<(), ParseError> {
//!     let source = "\
//! ├── src
//! │   └── main.py
//!
//! /src/main.py:
//! ----------------------------------------
//!  1 | print(\"hello\")
//!
//! ";
//!
//!     let document = parse(source, &ParseConfig::default())?;
//!     assert_eq!(document.files().get("src/main.py"), Some("print(\"hello\")"));
//!     assert_eq!(document.tree_paths(), ["src", "src/main.py"]);
//!     Ok(())
//! }
//! ```

mod config;
mod content;
mod document;
pub mod error;
mod span;
pub mod tree;

pub use config::{DEFAULT_INDENT_WIDTH, DEFAULT_SEPARATOR_MIN_LEN, ParseConfig};
pub use document::ParsedDocument;
pub use span::Span;

use log::{debug, info};

use error::{DiagnosticCollector, ParseError};

/// Parse a flattened repository dump.
///
/// 1. **Content blocks** - Collect cleaned file contents by path
/// 2. **Tree lines** - Isolate the ASCII tree diagram, if any
/// 3. **Tree paths** - Rebuild relative paths from the diagram indentation
///
/// # Arguments
///
/// * `source` - The document text, with `\n` line endings
/// * `config` - Grammar tunables
///
/// # Errors
///
/// Returns a [`ParseError`] when the document contains no content block. The
/// error carries every diagnostic collected along the way. Warnings alone do
/// not fail the parse; they are returned in the [`ParsedDocument`].
pub fn parse(source: &str, config: &ParseConfig) -> Result<ParsedDocument, ParseError> {
    let mut collector = DiagnosticCollector::new();

    // Step 1: Content blocks
    let files = content::parse_content_blocks(source, config, &mut collector);

    // Step 2: Tree lines
    let tree_lines = tree::extract_tree_lines(source);

    // Step 3: Tree paths
    let tree_paths = tree::resolve_tree_paths(&tree_lines, config, &mut collector);

    let warnings = collector.finish()?;
    info!(
        files_detected = files.len(),
        tree_lines = tree_lines.len(),
        warnings = warnings.len();
        "Parsed document"
    );
    debug!(tree_paths = tree_paths.len(); "Tree diagram resolved");

    let tree_lines = tree_lines
        .iter()
        .map(|line| line.text().to_string())
        .collect();

    Ok(ParsedDocument::new(files, tree_lines, tree_paths, warnings))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_missing_blocks_fail_with_collected_warnings() {
        let source = "├── src\n    stray text\n│   └── lib.rs\n\nno blocks here\n";

        let err = parse(source, &ParseConfig::default()).unwrap_err();
        let codes: Vec<_> = err.diagnostics().iter().map(|d| d.code()).collect();

        assert_eq!(codes, vec![Some(ErrorCode::E001), Some(ErrorCode::W002)]);
        assert_eq!(err.to_string().matches("no content blocks").count(), 1);
    }

    #[test]
    fn test_warnings_do_not_fail_the_parse() {
        let source = "├── src\n    stray text\n\n/src/a.rs:\n----------------------------------------\n1 | x\n\n";

        let document = parse(source, &ParseConfig::default()).unwrap();

        assert_eq!(document.files().get("src/a.rs"), Some("x"));
        assert_eq!(document.warnings().len(), 1);
    }
}
