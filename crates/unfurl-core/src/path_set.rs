//! The reconciled set of paths to materialize.
//!
//! [`ReconciledPathSet`] is the only contract between parsing and
//! materialization. It maps every relative path to an [`EntryKind`] and
//! iterates in lexicographic order, which places each directory before any
//! path nested below it.

use std::collections::{BTreeMap, btree_map};

use crate::entry::EntryKind;

/// Ancestor-complete, lexicographically ordered set of relative paths.
///
/// Built by [`reconcile`](crate::reconcile::reconcile); read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconciledPathSet {
    entries: BTreeMap<String, EntryKind>,
}

impl ReconciledPathSet {
    pub(crate) fn from_entries(entries: BTreeMap<String, EntryKind>) -> Self {
        Self { entries }
    }

    /// Get the classification of `path`.
    pub fn kind(&self, path: &str) -> Option<EntryKind> {
        self.entries.get(path).copied()
    }

    /// Returns `true` if `path` is part of the set.
    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    /// Total number of paths.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the set has no paths.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of paths classified as files.
    pub fn file_count(&self) -> usize {
        self.entries.values().filter(|kind| kind.is_file()).count()
    }

    /// Number of paths classified as directories.
    pub fn directory_count(&self) -> usize {
        self.entries
            .values()
            .filter(|kind| kind.is_directory())
            .count()
    }

    /// Iterate over `(path, kind)` in creation order.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.entries.iter(),
        }
    }
}

impl<'a> IntoIterator for &'a ReconciledPathSet {
    type Item = (&'a str, EntryKind);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over a [`ReconciledPathSet`] in creation order.
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    inner: btree_map::Iter<'a, String, EntryKind>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, EntryKind);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(path, kind)| (path.as_str(), *kind))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

/// Every proper ancestor of a `/`-separated path, shallowest first.
///
/// `"a/b/c.txt"` yields `"a"` and `"a/b"`. Empty segments produced by
/// repeated separators are not treated as ancestors.
pub fn ancestors(path: &str) -> impl Iterator<Item = &str> {
    path.match_indices('/')
        .map(move |(idx, _)| &path[..idx])
        .filter(|prefix| !prefix.is_empty() && !prefix.ends_with('/'))
}

/// Collapse a `/`-separated path to its non-empty segments.
///
/// `"/src//main.rs"` becomes `"src/main.rs"` and `"docs/"` becomes `"docs"`.
/// A path made only of separators becomes the empty string.
pub fn normalize_path(path: &str) -> String {
    path.split('/')
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}

/// The immediate parent of a `/`-separated path, if it has one.
pub fn parent(path: &str) -> Option<&str> {
    path.rfind('/').map(|idx| &path[..idx])
}
