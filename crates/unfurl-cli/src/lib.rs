//! CLI logic for the Unfurl extraction tool.
//!
//! This module contains the core CLI logic for rebuilding a repository from
//! a flattened dump.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::path::Path;

use log::{info, warn};

use unfurl::{Extractor, MaterializeReport, UnfurlError};

use error_adapter::{diagnostic_reportables, render};

/// Run the Unfurl CLI application
///
/// This function reads the input document, parses it, and rebuilds the
/// files and directories it describes under the output directory.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `UnfurlError` for:
/// - Configuration loading errors
/// - A missing or non-UTF-8 input file
/// - A document without any content block
/// - An output directory that cannot be created
/// - A run where every file path was rejected
pub fn run(args: &Args) -> Result<(), UnfurlError> {
    info!(
        input_path = args.input,
        output_dir = args.output_dir;
        "Extracting repository"
    );

    // Load configuration
    let app_config = config::load_config(args.config.as_ref())?;
    let extractor = Extractor::new(app_config);

    // Read and parse input file
    let source = extractor.read_document(Path::new(&args.input))?;
    let document = extractor.parse(&source)?;

    for reportable in diagnostic_reportables(document.warnings(), &source) {
        warn!("{}", render(&reportable));
    }

    info!(files_detected = document.files().len(); "Detected files");
    info!(tree_lines = document.tree_lines().len(); "Detected tree lines");

    // Write the reconciled tree
    let output_dir = Path::new(&args.output_dir);
    if output_dir.exists() {
        info!(output_dir = args.output_dir; "Overwriting the output directory");
    } else {
        info!(output_dir = args.output_dir; "Output directory not found, it will be created");
    }

    let paths = extractor.reconcile(&document);
    let report = extractor.materialize(&document, &paths, output_dir)?;
    log_report(&report);

    if report.every_file_rejected() {
        return Err(UnfurlError::NothingWritten {
            rejected: report.rejections().len(),
        });
    }

    Ok(())
}

fn log_report(report: &MaterializeReport) {
    for rejection in report.rejections() {
        warn!(path = rejection.path(), reason:% = rejection.reason(); "Skipped unsafe path");
    }
    for failure in report.failures() {
        warn!(path = failure.path(), kind:% = failure.kind(), err = failure.message(); "Failed to create entry");
    }

    info!(
        files_created = report.files_written().len(),
        directories_created = report.directories_created().len(),
        skipped_existing = report.skipped_existing().len(),
        rejected = report.rejections().len(),
        failed = report.failures().len();
        "Extraction finished"
    );
}
