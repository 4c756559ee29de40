//! Writing a reconciled path set to disk.
//!
//! Every path goes through two containment checks before anything is
//! created: a lexical one on the relative path itself, then a canonical one
//! that follows symlinks already present under the output root. Paths
//! failing either check are skipped and recorded in the
//! [`MaterializeReport`].

mod report;

pub use report::{MaterializeReport, RejectReason, Rejection, WriteFailure};

use std::{fs, io, path::Path};

use log::{debug, info, trace, warn};
use relative_path::{Component, RelativePath, RelativePathBuf};

use unfurl_core::{
    entry::{ContentMap, EntryKind},
    path_set::ReconciledPathSet,
};

use crate::{UnfurlError, config::OutputConfig};

/// Materialize `paths` under `output_root`.
///
/// Paths are processed in the set's iteration order, so every directory is
/// created before anything nested below it. One path failing never stops
/// the ones after it.
///
/// # Arguments
///
/// * `output_root` - Directory to create the tree in; created if missing
/// * `paths` - The reconciled path set
/// * `files` - Content for every path classified as a file
/// * `config` - Output options
///
/// # Errors
///
/// Returns [`UnfurlError::Io`] only when the output root itself cannot be
/// created or resolved. Per-path problems end up in the report.
pub fn materialize(
    output_root: &Path,
    paths: &ReconciledPathSet,
    files: &ContentMap,
    config: &OutputConfig,
) -> Result<MaterializeReport, UnfurlError> {
    fs::create_dir_all(output_root)?;
    let root = output_root.canonicalize()?;
    info!(root:? = root, paths = paths.len(); "Materializing path set");

    let mut report = MaterializeReport::default();

    for (path, kind) in paths {
        let relative = match check_lexical(path) {
            Ok(relative) => relative,
            Err(reason) => {
                warn!(path, reason:% = reason; "Rejected path");
                report.push_rejection(Rejection::new(path, reason));
                continue;
            }
        };

        let target = relative.to_path(&root);
        match resolves_inside(&root, &target) {
            Ok(true) => {}
            Ok(false) => {
                let reason = RejectReason::ResolvesOutsideRoot;
                warn!(path, reason:% = reason; "Rejected path");
                report.push_rejection(Rejection::new(path, reason));
                continue;
            }
            Err(err) => {
                warn!(path, err:%; "Failed to resolve path");
                report.push_failure(WriteFailure::new(path, kind, &err));
                continue;
            }
        }

        match kind {
            EntryKind::Directory => create_directory(path, &target, &mut report),
            EntryKind::File => {
                let content = files.get(path).unwrap_or_default();
                write_file(path, &target, content, config, &mut report);
            }
        }
    }

    debug!(
        files_written = report.files_written().len(),
        directories_created = report.directories_created().len(),
        skipped_existing = report.skipped_existing().len(),
        rejections = report.rejections().len(),
        failures = report.failures().len();
        "Materialization finished"
    );

    Ok(report)
}

fn create_directory(path: &str, target: &Path, report: &mut MaterializeReport) {
    if target.is_dir() {
        trace!(path; "Directory already exists");
        return;
    }
    match fs::create_dir_all(target) {
        Ok(()) => {
            info!(path; "Created directory");
            report.push_directory(path);
        }
        Err(err) => {
            warn!(path, err:%; "Failed to create directory");
            report.push_failure(WriteFailure::new(path, EntryKind::Directory, &err));
        }
    }
}

fn write_file(
    path: &str,
    target: &Path,
    content: &str,
    config: &OutputConfig,
    report: &mut MaterializeReport,
) {
    if !config.overwrite_existing() && target.is_file() {
        debug!(path; "Keeping existing file");
        report.push_skipped(path);
        return;
    }

    let result = match target.parent() {
        Some(parent) => fs::create_dir_all(parent).and_then(|()| fs::write(target, content)),
        None => fs::write(target, content),
    };

    match result {
        Ok(()) => {
            info!(path, bytes = content.len(); "Created file");
            report.push_file(path);
        }
        Err(err) => {
            warn!(path, err:%; "Failed to write file");
            report.push_failure(WriteFailure::new(path, EntryKind::File, &err));
        }
    }
}

/// Normalize `path` lexically and make sure it stays below the root.
///
/// `.` segments are dropped and `..` segments folded into their parent. A
/// path that normalizes to nothing, or still climbs above the root
/// afterwards, is rejected, as is any segment carrying a backslash or NUL.
fn check_lexical(path: &str) -> Result<RelativePathBuf, RejectReason> {
    if path.contains(['\\', '\0']) {
        return Err(RejectReason::InvalidCharacter);
    }

    let normalized = RelativePath::new(path).normalize();
    if normalized.as_str().is_empty() {
        return Err(RejectReason::Empty);
    }
    if matches!(normalized.components().next(), Some(Component::ParentDir)) {
        return Err(RejectReason::EscapesRoot);
    }

    Ok(normalized)
}

/// Returns `true` if `target`, or its nearest existing ancestor, resolves
/// below `root`.
///
/// `root` must already be canonical. A dangling symlink counts as outside,
/// since writing through it would land wherever it points.
fn resolves_inside(root: &Path, target: &Path) -> io::Result<bool> {
    let mut candidate = Some(target);

    while let Some(path) = candidate {
        match path.canonicalize() {
            Ok(resolved) => return Ok(resolved.starts_with(root)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                if fs::symlink_metadata(path).is_ok() {
                    return Ok(false);
                }
                candidate = path.parent();
            }
            Err(err) => return Err(err),
        }
    }

    Ok(false)
}
