//! File entries and their classification.
//!
//! A flattened repository dump describes two kinds of entries: files, which
//! carry reconstructed content, and directories, which only exist as
//! containers. [`ContentMap`] holds the former keyed by relative path.

use std::fmt;

use indexmap::IndexMap;

use crate::path_set::normalize_path;

/// Whether a reconciled path is materialized as a file or a directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    /// A regular file whose content comes from a content block.
    File,
    /// A directory, either listed in the tree diagram or implied by a
    /// descendant path.
    Directory,
}

impl EntryKind {
    /// Returns `true` if this is a file entry.
    pub fn is_file(&self) -> bool {
        matches!(self, EntryKind::File)
    }

    /// Returns `true` if this is a directory entry.
    pub fn is_directory(&self) -> bool {
        matches!(self, EntryKind::Directory)
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryKind::File => write!(f, "file"),
            EntryKind::Directory => write!(f, "directory"),
        }
    }
}

/// A single reconstructed file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    relative_path: String,
    content: String,
}

impl FileEntry {
    /// Create a new file entry.
    ///
    /// The path is normalized with [`normalize_path`], so it is always
    /// relative and never holds an empty segment.
    pub fn new(relative_path: impl AsRef<str>, content: impl Into<String>) -> Self {
        Self {
            relative_path: normalize_path(relative_path.as_ref()),
            content: content.into(),
        }
    }

    /// The `/`-separated path relative to the output root.
    pub fn relative_path(&self) -> &str {
        &self.relative_path
    }

    /// The cleaned file content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Split the entry into its path and content.
    pub fn into_parts(self) -> (String, String) {
        (self.relative_path, self.content)
    }
}

/// Reconstructed file contents keyed by relative path.
///
/// Paths keep the order in which they were first seen in the document. Later
/// entries for an existing path replace its content in place, so the last
/// occurrence in the document wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentMap {
    files: IndexMap<String, String>,
}

impl ContentMap {
    /// Create an empty content map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a file entry, returning the content it replaced, if any.
    pub fn insert(&mut self, entry: FileEntry) -> Option<String> {
        let (path, content) = entry.into_parts();
        self.files.insert(path, content)
    }

    /// Get the content stored for `path`.
    pub fn get(&self, path: &str) -> Option<&str> {
        self.files.get(path).map(String::as_str)
    }

    /// Returns `true` if `path` has content.
    pub fn contains(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }

    /// Number of files.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Returns `true` if no file has been recorded.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Iterate over file paths in document order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    /// Iterate over `(path, content)` pairs in document order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.files.iter().map(|(p, c)| (p.as_str(), c.as_str()))
    }
}

impl FromIterator<FileEntry> for ContentMap {
    fn from_iter<I: IntoIterator<Item = FileEntry>>(iter: I) -> Self {
        let mut map = ContentMap::new();
        for entry in iter {
            map.insert(entry);
        }
        map
    }
}
