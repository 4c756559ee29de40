//! ASCII tree diagram extraction and path resolution.
//!
//! Repository dumps usually start with a rendering of the directory tree:
//!
//! ```text
//! ├── README.md
//! ├── src
//! │   ├── main.py
//! │   └── utils
//! │       └── helpers.py
//! └── tests
//! ```
//!
//! [`extract_tree_lines`] isolates those lines and `resolve_tree_paths`
//! rebuilds the relative paths from indentation.

use log::{debug, trace};

use crate::{
    config::ParseConfig,
    error::{Diagnostic, DiagnosticCollector, ErrorCode},
    span::Span,
};

/// Branch glyph for an entry with further siblings.
pub const TEE: &str = "├──";

/// Branch glyph for the last entry of a directory.
pub const ELBOW: &str = "└──";

/// Vertical continuation glyph.
pub const VERTICAL: char = '│';

const INDENT: &str = "    ";

/// A line of the tree diagram and its location in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeLine<'src> {
    text: &'src str,
    span: Span,
}

impl<'src> TreeLine<'src> {
    /// The line text, without its line ending.
    pub fn text(&self) -> &'src str {
        self.text
    }

    /// Location of the line in the source document.
    pub fn span(&self) -> Span {
        self.span
    }
}

/// A tree line broken into its indentation level and entry name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TreeNode<'src> {
    level: usize,
    name: &'src str,
    /// The name was written with a trailing `/`
    marked_directory: bool,
}

impl TreeNode<'_> {
    /// Directory when the name has no `.`, is a dotfile, or ends with `/`.
    ///
    /// Extensionless files such as `Makefile` are classified as directories.
    fn is_directory(&self) -> bool {
        self.marked_directory || !self.name.contains('.') || self.name.starts_with('.')
    }
}

fn starts_with_branch(line: &str) -> bool {
    line.starts_with(TEE) || line.starts_with(ELBOW)
}

/// Isolate the lines of the tree diagram in `source`.
///
/// Capturing starts at the first line beginning with a branch glyph and stops
/// at the first blank line after that. While capturing, only lines beginning
/// with a branch glyph, the vertical glyph, or a four-space indent are kept.
/// A document without a tree yields no lines.
pub fn extract_tree_lines(source: &str) -> Vec<TreeLine<'_>> {
    let mut lines = Vec::new();
    let mut in_tree = false;
    let mut offset = 0;

    for raw in source.split('\n') {
        let start = offset;
        offset += raw.len() + 1;
        let line = raw.strip_suffix('\r').unwrap_or(raw);

        if starts_with_branch(line) {
            in_tree = true;
        }
        if !in_tree {
            continue;
        }
        if line.trim().is_empty() {
            break;
        }

        if starts_with_branch(line) || line.starts_with(VERTICAL) || line.starts_with(INDENT) {
            lines.push(TreeLine {
                text: line,
                span: Span::new(start..start + line.len()),
            });
        }
    }

    debug!(tree_lines = lines.len(); "Extracted tree diagram");
    lines
}

/// Split a tree line into level and name.
///
/// The characters before the branch glyph must be indentation: spaces,
/// non-breaking spaces and vertical glyphs each count as one column, tabs as
/// a full level.
fn parse_tree_line(text: &str, indent_width: usize) -> Option<TreeNode<'_>> {
    let (branch_at, glyph) = [TEE, ELBOW]
        .into_iter()
        .filter_map(|glyph| text.find(glyph).map(|idx| (idx, glyph)))
        .min_by_key(|(idx, _)| *idx)?;

    let mut columns = 0;
    for c in text[..branch_at].chars() {
        match c {
            ' ' | '\u{a0}' | VERTICAL => columns += 1,
            '\t' => columns += indent_width,
            _ => return None,
        }
    }

    let name = text[branch_at + glyph.len()..]
        .trim_start_matches('─')
        .trim();
    let (name, marked_directory) = match name.strip_suffix('/') {
        Some(stripped) => (stripped.trim_end(), true),
        None => (name, false),
    };
    if name.is_empty() {
        return None;
    }

    Some(TreeNode {
        level: columns / indent_width,
        name,
        marked_directory,
    })
}

fn is_connector_only(text: &str) -> bool {
    text.chars().all(|c| c == VERTICAL || c.is_whitespace())
}

/// Rebuild relative paths from the tree diagram lines.
///
/// A stack of open directories follows the indentation: each entry first
/// closes every directory at or below its level, then is appended to the
/// remaining ancestry. Only directories are pushed. Paths are returned in
/// diagram order.
///
/// Lines that cannot be read as an entry are skipped without touching the
/// stack; lines carrying text also report an [`ErrorCode::W002`] warning.
pub(crate) fn resolve_tree_paths(
    lines: &[TreeLine<'_>],
    config: &ParseConfig,
    collector: &mut DiagnosticCollector,
) -> Vec<String> {
    let mut stack: Vec<&str> = Vec::new();
    let mut paths = Vec::with_capacity(lines.len());

    for line in lines {
        let Some(node) = parse_tree_line(line.text(), config.indent_width()) else {
            if is_connector_only(line.text()) {
                trace!(line = line.text(); "Skipping connector-only tree line");
            } else {
                collector.emit(
                    Diagnostic::warning(format!(
                        "tree line `{}` is not a recognizable entry",
                        line.text().trim()
                    ))
                    .with_code(ErrorCode::W002)
                    .with_label(line.span(), "skipped")
                    .with_help(format!(
                        "tree entries look like `│   ├── name`, with {} columns per level",
                        config.indent_width()
                    )),
                );
            }
            continue;
        };

        stack.truncate(node.level);
        let path = if stack.is_empty() {
            node.name.to_string()
        } else {
            format!("{}/{}", stack.join("/"), node.name)
        };

        if node.is_directory() {
            stack.push(node.name);
        }
        trace!(path = path, level = node.level; "Resolved tree entry");
        paths.push(path);
    }

    debug!(tree_paths = paths.len(); "Resolved tree diagram paths");
    paths
}


#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    /// An entry of a generated tree: requested depth, directory flag, name.
    type RawEntry = (usize, bool, String);

    // ===================
    // Strategies
    // ===================

    fn entry_strategy() -> impl Strategy<Value = RawEntry> {
        (0usize..5, any::<bool>()).prop_flat_map(|(depth, is_dir)| {
            let name = if is_dir {
                "[a-z]{1,6}".boxed()
            } else {
                "[a-z]{1,6}\\.[a-z]{1,3}".boxed()
            };
            (Just(depth), Just(is_dir), name)
        })
    }

    /// Clamp requested depths so that every entry is at most one level
    /// below the closest preceding directory.
    fn valid_tree(raw: Vec<RawEntry>) -> Vec<RawEntry> {
        let mut max_depth = 0;
        raw.into_iter()
            .map(|(depth, is_dir, name)| {
                let depth = depth.min(max_depth);
                max_depth = if is_dir { depth + 1 } else { depth };
                (depth, is_dir, name)
            })
            .collect()
    }

    fn render(entries: &[RawEntry]) -> String {
        entries
            .iter()
            .enumerate()
            .map(|(idx, (depth, _, name))| {
                let glyph = if idx % 3 == 2 { ELBOW } else { TEE };
                format!("{}{glyph} {name}\n", "│   ".repeat(*depth))
            })
            .collect()
    }

    fn expected_paths(entries: &[RawEntry]) -> Vec<String> {
        let mut ancestry: Vec<&str> = Vec::new();
        let mut paths = Vec::new();
        for (depth, is_dir, name) in entries {
            ancestry.truncate(*depth);
            let mut parts = ancestry.clone();
            parts.push(name);
            paths.push(parts.join("/"));
            if *is_dir {
                ancestry.push(name);
            }
        }
        paths
    }

    // ===================
    // Property Test Functions
    // ===================

    /// A rendered tree resolves back to the paths it was drawn from.
    fn check_rendered_tree_resolves(entries: &[RawEntry]) -> Result<(), TestCaseError> {
        let source = render(entries);
        let lines = extract_tree_lines(&source);
        prop_assert_eq!(lines.len(), entries.len());

        let mut collector = DiagnosticCollector::new();
        let paths = resolve_tree_paths(&lines, &ParseConfig::default(), &mut collector);
        prop_assert_eq!(paths, expected_paths(entries));
        Ok(())
    }

    // ===================
    // Proptest Wrappers
    // ===================

    proptest! {
        #[test]
        fn rendered_tree_resolves(raw in prop::collection::vec(entry_strategy(), 1..20)) {
            check_rendered_tree_resolves(&valid_tree(raw))?;
        }
    }
}
