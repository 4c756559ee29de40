//! Unfurl - Rebuild a directory tree from a flattened repository dump.
//!
//! A dump combines an ASCII tree diagram of the repository with one
//! line-numbered content block per file. This crate reads such a document,
//! parses both parts, reconciles them into one set of files and directories,
//! and writes that set under an output directory without ever touching
//! anything outside of it.

pub mod config;

mod error;
mod materialize;

pub use unfurl_core::{entry, path_set};
pub use unfurl_parser::ParsedDocument;

pub use error::UnfurlError;
pub use materialize::{MaterializeReport, RejectReason, Rejection, WriteFailure};

use std::{fs, io, path::Path};

use log::{debug, info, trace};

use unfurl_core::path_set::ReconciledPathSet;

use config::AppConfig;

/// Builder for extracting flattened repository dumps.
///
/// This provides an API for processing a document through the reading,
/// parsing, reconciliation, and materialization stages.
///
/// # Examples
///
/// ```rust,no_run
/// use std::path::Path;
///
/// use unfurl::{Extractor, config::AppConfig};
///
/// let extractor = Extractor::new(AppConfig::default());
///
/// // Read and parse the document
/// let source = extractor.read_document(Path::new("dump.txt"))
///     .expect("Failed to read");
/// let document = extractor.parse(&source)
///     .expect("Failed to parse");
///
/// // Write the reconciled tree
/// let paths = extractor.reconcile(&document);
/// let report = extractor.materialize(&document, &paths, Path::new("extracted_repo"))
///     .expect("Failed to write");
///
/// println!("{} files written", report.files_written().len());
/// ```
#[derive(Debug, Default)]
pub struct Extractor {
    config: AppConfig,
}

impl Extractor {
    /// Create a new extractor with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Application configuration including parse and output settings
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Read an input document from disk.
    ///
    /// The file must be valid UTF-8. Line endings are normalized to `\n`.
    ///
    /// # Errors
    ///
    /// Returns [`UnfurlError::InputNotFound`] when `path` does not exist,
    /// [`UnfurlError::Encoding`] when the content is not UTF-8, and
    /// [`UnfurlError::Io`] for any other read failure.
    pub fn read_document(&self, path: &Path) -> Result<String, UnfurlError> {
        info!(path:? = path; "Reading input document");

        let bytes = fs::read(path).map_err(|err| match err.kind() {
            io::ErrorKind::NotFound => UnfurlError::InputNotFound(path.to_path_buf()),
            _ => UnfurlError::Io(err),
        })?;

        let text = String::from_utf8(bytes).map_err(|err| UnfurlError::Encoding {
            path: path.to_path_buf(),
            valid_up_to: err.utf8_error().valid_up_to(),
        })?;

        debug!(bytes = text.len(); "Input document loaded");
        Ok(normalize_line_endings(text))
    }

    /// Parse a document into file contents and tree paths.
    ///
    /// # Arguments
    ///
    /// * `source` - The document text, with `\n` line endings
    ///
    /// # Errors
    ///
    /// Returns [`UnfurlError::Parse`] when the document contains no content
    /// block.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use unfurl::Extractor;
    ///
    /// let source = "/hello.txt:\n----------------------------------------\n1 | hi\n\n";
    /// let document = Extractor::default().parse(source)
    ///     .expect("Failed to parse document");
    /// assert_eq!(document.files().get("hello.txt"), Some("hi"));
    /// ```
    pub fn parse(&self, source: &str) -> Result<ParsedDocument, UnfurlError> {
        info!("Parsing document");

        let parse_config = self.config.parse().to_parse_config();
        let document = unfurl_parser::parse(source, &parse_config)
            .map_err(|err| UnfurlError::new_parse_error(err, source))?;

        debug!(warnings = document.warnings().len(); "Document parsed successfully");
        trace!(files:? = document.files().paths().collect::<Vec<_>>(); "Parsed files");

        Ok(document)
    }

    /// Merge the tree paths and file paths of `document` into one set.
    pub fn reconcile(&self, document: &ParsedDocument) -> ReconciledPathSet {
        unfurl_core::reconcile::reconcile(document.tree_paths(), document.files())
    }

    /// Write `paths` under `output_root`.
    ///
    /// # Errors
    ///
    /// Returns [`UnfurlError::Io`] when the output root cannot be created.
    /// Problems with individual paths are recorded in the returned
    /// [`MaterializeReport`] instead.
    pub fn materialize(
        &self,
        document: &ParsedDocument,
        paths: &ReconciledPathSet,
        output_root: &Path,
    ) -> Result<MaterializeReport, UnfurlError> {
        materialize::materialize(output_root, paths, document.files(), self.config.output())
    }

    /// Run every stage on `source` and write the result under `output_root`.
    ///
    /// # Errors
    ///
    /// See [`Extractor::parse`] and [`Extractor::materialize`].
    pub fn extract(&self, source: &str, output_root: &Path) -> Result<Extraction, UnfurlError> {
        let document = self.parse(source)?;
        let paths = self.reconcile(&document);
        let report = self.materialize(&document, &paths, output_root)?;

        Ok(Extraction {
            document,
            paths,
            report,
        })
    }
}

/// Everything produced by [`Extractor::extract`].
#[derive(Debug)]
pub struct Extraction {
    document: ParsedDocument,
    paths: ReconciledPathSet,
    report: MaterializeReport,
}

impl Extraction {
    /// The parsed document.
    pub fn document(&self) -> &ParsedDocument {
        &self.document
    }

    /// The reconciled path set that was materialized.
    pub fn paths(&self) -> &ReconciledPathSet {
        &self.paths
    }

    /// The outcome of writing to disk.
    pub fn report(&self) -> &MaterializeReport {
        &self.report
    }
}

fn normalize_line_endings(text: String) -> String {
    if text.contains('\r') {
        text.replace("\r\n", "\n").replace('\r', "\n")
    } else {
        text
    }
}
