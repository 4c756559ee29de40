//! Merging tree-diagram paths with content-block paths.
//!
//! Both sources feed the same routine: a document without a tree diagram
//! simply contributes no tree paths.

use std::collections::BTreeMap;

use log::{debug, trace};

use crate::{
    entry::{ContentMap, EntryKind},
    path_set::{ReconciledPathSet, ancestors, normalize_path},
};

/// Build the [`ReconciledPathSet`] for one extraction.
///
/// The union of `tree_paths` and the paths of `files` is completed with every
/// ancestor directory. Tree paths are normalized the same way as
/// [`FileEntry`](crate::entry::FileEntry) paths, so `docs/` and `docs` are one
/// entry. A path is classified [`EntryKind::File`] exactly when `files` holds
/// content for it; every other path is a directory.
///
/// # Arguments
///
/// * `tree_paths` - Paths resolved from the tree diagram, possibly empty
/// * `files` - Content parsed from the content blocks
pub fn reconcile<S>(tree_paths: &[S], files: &ContentMap) -> ReconciledPathSet
where
    S: AsRef<str>,
{
    let mut entries = BTreeMap::new();

    let tree_paths: Vec<String> = tree_paths
        .iter()
        .map(|path| normalize_path(path.as_ref()))
        .collect();
    let all_paths = tree_paths
        .iter()
        .map(String::as_str)
        .chain(files.paths())
        .filter(|path| !path.is_empty());

    for path in all_paths {
        for ancestor in ancestors(path) {
            entries.insert(ancestor.to_string(), EntryKind::Directory);
        }
        entries.insert(path.to_string(), EntryKind::Directory);
    }

    // Classification happens last so an ancestor insert never downgrades a file.
    for (path, kind) in entries.iter_mut() {
        if files.contains(path) {
            *kind = EntryKind::File;
        }
    }

    let set = ReconciledPathSet::from_entries(entries);
    debug!(
        tree_paths = tree_paths.len(),
        files = set.file_count(),
        directories = set.directory_count();
        "Reconciled path set"
    );
    trace!(paths:? = set.iter().collect::<Vec<_>>(); "Reconciled paths");

    set
}


#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;
    use crate::{entry::FileEntry, path_set::parent};

    // ===================
    // Strategies
    // ===================

    /// Strategy for a single path segment, including characters that sort
    /// before `/` (such as `-` and `.`).
    fn segment_strategy() -> impl Strategy<Value = String> {
        "[a-c][a-c.\\-_]{0,3}"
    }

    /// Strategy for a nested relative path of one to four segments.
    fn path_strategy() -> impl Strategy<Value = String> {
        prop::collection::vec(segment_strategy(), 1..=4).prop_map(|segments| segments.join("/"))
    }

    fn path_set_strategy() -> impl Strategy<Value = (Vec<String>, Vec<String>)> {
        (
            prop::collection::vec(path_strategy(), 0..12),
            prop::collection::vec(path_strategy(), 0..12),
        )
    }

    /// Strategy for a path written sloppily: segments joined by one or two
    /// `/`, with optional leading and trailing `/`.
    fn sloppy_path_strategy() -> impl Strategy<Value = String> {
        (
            prop::collection::vec((segment_strategy(), prop::bool::ANY), 1..=4),
            prop::bool::ANY,
            prop::bool::ANY,
        )
            .prop_map(|(segments, leading, trailing)| {
                let mut path = String::new();
                if leading {
                    path.push('/');
                }
                for (idx, (segment, doubled)) in segments.iter().enumerate() {
                    if idx > 0 {
                        path.push_str(if *doubled { "//" } else { "/" });
                    }
                    path.push_str(segment);
                }
                if trailing {
                    path.push('/');
                }
                path
            })
    }

    fn sloppy_path_set_strategy() -> impl Strategy<Value = (Vec<String>, Vec<String>)> {
        (
            prop::collection::vec(sloppy_path_strategy(), 0..12),
            prop::collection::vec(sloppy_path_strategy(), 0..12),
        )
    }

    // ===================
    // Property Test Functions
    // ===================

    /// Every directory must come before every path nested below it.
    fn check_directories_precede_descendants(
        tree: &[String],
        content: &[String],
    ) -> Result<(), TestCaseError> {
        let files: ContentMap = content.iter().map(|p| FileEntry::new(p, "")).collect();
        let set = reconcile(tree, &files);
        let order: Vec<_> = set.iter().collect();

        for (dir_idx, (dir, kind)) in order.iter().enumerate() {
            if !kind.is_directory() {
                continue;
            }
            let prefix = format!("{dir}/");
            for (idx, (path, _)) in order.iter().enumerate() {
                if path.starts_with(&prefix) {
                    prop_assert!(
                        dir_idx < idx,
                        "directory `{dir}` at {dir_idx} sorted after descendant `{path}` at {idx}"
                    );
                }
            }
        }
        Ok(())
    }

    /// Every nested path must have its parent in the set.
    fn check_parents_present(tree: &[String], content: &[String]) -> Result<(), TestCaseError> {
        let files: ContentMap = content.iter().map(|p| FileEntry::new(p, "")).collect();
        let set = reconcile(tree, &files);

        for (path, _) in &set {
            if let Some(parent) = parent(path) {
                prop_assert!(set.contains(parent), "missing parent `{parent}` of `{path}`");
            }
        }
        Ok(())
    }

    /// Sloppy separators never leave an empty segment in the set, and every
    /// parent of a stored path is present.
    fn check_sloppy_paths_are_canonical(
        tree: &[String],
        content: &[String],
    ) -> Result<(), TestCaseError> {
        let files: ContentMap = content.iter().map(|p| FileEntry::new(p, "")).collect();
        let set = reconcile(tree, &files);

        for (path, _) in &set {
            prop_assert!(
                path.split('/').all(|segment| !segment.is_empty()),
                "path `{path}` has an empty segment"
            );
            if let Some(parent) = parent(path) {
                prop_assert!(set.contains(parent), "missing parent `{parent}` of `{path}`");
            }
        }
        for path in tree.iter().chain(content) {
            let canonical = normalize_path(path);
            prop_assert!(set.contains(&canonical), "input path `{path}` missing as `{canonical}`");
        }
        Ok(())
    }

    /// Classification is `File` exactly for content paths.
    fn check_classification(tree: &[String], content: &[String]) -> Result<(), TestCaseError> {
        let files: ContentMap = content.iter().map(|p| FileEntry::new(p, "")).collect();
        let set = reconcile(tree, &files);

        for (path, kind) in &set {
            prop_assert_eq!(kind.is_file(), files.contains(path), "wrong kind for `{}`", path);
        }
        for path in tree.iter().chain(content) {
            prop_assert!(set.contains(path), "input path `{path}` missing from set");
        }
        Ok(())
    }

    // ===================
    // Proptest Wrappers
    // ===================

    proptest! {
        #[test]
        fn directories_precede_descendants((tree, content) in path_set_strategy()) {
            check_directories_precede_descendants(&tree, &content)?;
        }

        #[test]
        fn parents_present((tree, content) in path_set_strategy()) {
            check_parents_present(&tree, &content)?;
        }

        #[test]
        fn sloppy_paths_are_canonical((tree, content) in sloppy_path_set_strategy()) {
            check_sloppy_paths_are_canonical(&tree, &content)?;
        }

        #[test]
        fn classification_matches_content((tree, content) in path_set_strategy()) {
            check_classification(&tree, &content)?;
        }
    }
}
