//! Outcome of one materialization.

use std::{fmt, io};

use unfurl_core::entry::EntryKind;

/// Why a path was refused before touching the filesystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// The path normalizes to the output root itself.
    Empty,
    /// A `..` segment climbs above the output root.
    EscapesRoot,
    /// A segment contains a backslash or NUL byte.
    InvalidCharacter,
    /// An existing symlink below the root points outside of it.
    ResolvesOutsideRoot,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Empty => "path is empty after normalization",
            Self::EscapesRoot => "path escapes the output directory",
            Self::InvalidCharacter => "path contains a backslash or NUL character",
            Self::ResolvesOutsideRoot => "path resolves outside the output directory",
        };
        f.write_str(text)
    }
}

/// A path skipped by the containment checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    path: String,
    reason: RejectReason,
}

impl Rejection {
    pub(crate) fn new(path: impl Into<String>, reason: RejectReason) -> Self {
        Self {
            path: path.into(),
            reason,
        }
    }

    /// The rejected relative path.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn reason(&self) -> RejectReason {
        self.reason
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.reason)
    }
}

/// A path whose directory or file could not be created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteFailure {
    path: String,
    kind: EntryKind,
    message: String,
}

impl WriteFailure {
    pub(crate) fn new(path: impl Into<String>, kind: EntryKind, err: &io::Error) -> Self {
        Self {
            path: path.into(),
            kind,
            message: err.to_string(),
        }
    }

    /// The relative path that failed.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Whether a file or a directory was being created.
    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    /// The underlying I/O error message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for WriteFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {}", self.kind, self.path, self.message)
    }
}

/// Everything that happened while writing a path set to disk.
///
/// Paths are listed in the order they were processed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaterializeReport {
    files_written: Vec<String>,
    directories_created: Vec<String>,
    skipped_existing: Vec<String>,
    rejections: Vec<Rejection>,
    failures: Vec<WriteFailure>,
}

impl MaterializeReport {
    /// Files whose content was written.
    pub fn files_written(&self) -> &[String] {
        &self.files_written
    }

    /// Directories that did not exist before this run.
    pub fn directories_created(&self) -> &[String] {
        &self.directories_created
    }

    /// Existing files left untouched because overwriting is disabled.
    pub fn skipped_existing(&self) -> &[String] {
        &self.skipped_existing
    }

    /// Paths refused by the containment checks.
    pub fn rejections(&self) -> &[Rejection] {
        &self.rejections
    }

    /// Paths that failed with an I/O error.
    pub fn failures(&self) -> &[WriteFailure] {
        &self.failures
    }

    /// Returns `true` if the containment checks refused every file.
    ///
    /// Files that were skipped because they already exist, or that failed
    /// with an I/O error, were not rejected; either one makes this `false`.
    pub fn every_file_rejected(&self) -> bool {
        !self.rejections.is_empty()
            && self.files_written.is_empty()
            && self.skipped_existing.is_empty()
            && !self.failures.iter().any(|failure| failure.kind().is_file())
    }

    pub(crate) fn push_file(&mut self, path: &str) {
        self.files_written.push(path.to_string());
    }

    pub(crate) fn push_directory(&mut self, path: &str) {
        self.directories_created.push(path.to_string());
    }

    pub(crate) fn push_skipped(&mut self, path: &str) {
        self.skipped_existing.push(path.to_string());
    }

    pub(crate) fn push_rejection(&mut self, rejection: Rejection) {
        self.rejections.push(rejection);
    }

    pub(crate) fn push_failure(&mut self, failure: WriteFailure) {
        self.failures.push(failure);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let rejection = Rejection::new("../x", RejectReason::EscapesRoot);
        assert_eq!(rejection.to_string(), "../x: path escapes the output directory");

        let err = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let failure = WriteFailure::new("a.txt", EntryKind::File, &err);
        assert_eq!(failure.to_string(), "file a.txt: denied");
    }

    fn rejected_report() -> MaterializeReport {
        let mut report = MaterializeReport::default();
        report.push_rejection(Rejection::new("../x.txt", RejectReason::EscapesRoot));
        report
    }

    #[test]
    fn test_every_file_rejected() {
        assert!(!MaterializeReport::default().every_file_rejected());
        assert!(rejected_report().every_file_rejected());

        let mut report = rejected_report();
        report.push_file("ok.txt");
        assert!(!report.every_file_rejected());
    }

    #[test]
    fn test_skipped_file_is_not_a_rejection() {
        let mut report = rejected_report();
        report.push_skipped("a.txt");

        assert!(!report.every_file_rejected());
    }

    #[test]
    fn test_failed_file_is_not_a_rejection() {
        let err = io::Error::new(io::ErrorKind::PermissionDenied, "denied");

        let mut report = rejected_report();
        report.push_failure(WriteFailure::new("sub", EntryKind::Directory, &err));
        assert!(report.every_file_rejected());

        report.push_failure(WriteFailure::new("sub/a.txt", EntryKind::File, &err));
        assert!(!report.every_file_rejected());
    }
}
