//! Error types for extraction runs.
//!
//! This module provides the main error type [`UnfurlError`] which wraps
//! the fatal conditions of one run. Per-path problems during
//! materialization are not errors; they are recorded in the
//! [`MaterializeReport`](crate::MaterializeReport).

use std::{io, path::PathBuf};

use thiserror::Error;

use unfurl_parser::error::ParseError;

/// The main error type for extraction runs.
///
/// # Diagnostic Variants
///
/// The `Parse` variant contains structured error information with source code
/// spans. This provides detailed error information that can be used for rich
/// error reporting.
#[derive(Debug, Error)]
pub enum UnfurlError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Input file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("Input file {} is not valid UTF-8 (valid up to byte {valid_up_to})", path.display())]
    Encoding { path: PathBuf, valid_up_to: usize },

    #[error("{err}")]
    Parse { err: ParseError, src: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("No files were written: {rejected} path(s) rejected as outside the output directory")]
    NothingWritten { rejected: usize },
}

impl UnfurlError {
    /// Create a new `Parse` error with the associated source code.
    pub fn new_parse_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }
}
