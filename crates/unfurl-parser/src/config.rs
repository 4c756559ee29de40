//! Tunables for the document grammar.

/// Default minimum number of `-` characters in a block separator line.
pub const DEFAULT_SEPARATOR_MIN_LEN: usize = 40;

/// Default number of indentation columns per tree level.
pub const DEFAULT_INDENT_WIDTH: usize = 4;

/// Configuration for [`parse`](crate::parse).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseConfig {
    separator_min_len: usize,
    indent_width: usize,
}

impl ParseConfig {
    /// Create a new parse configuration.
    ///
    /// Zero values fall back to one, the smallest meaningful setting.
    ///
    /// # Arguments
    ///
    /// * `separator_min_len` - Minimum `-` run accepted as a block separator.
    /// * `indent_width` - Indentation columns per level in the tree diagram.
    pub fn new(separator_min_len: usize, indent_width: usize) -> Self {
        Self {
            separator_min_len: separator_min_len.max(1),
            indent_width: indent_width.max(1),
        }
    }

    /// Minimum `-` run accepted as a block separator.
    pub fn separator_min_len(&self) -> usize {
        self.separator_min_len
    }

    /// Indentation columns per level in the tree diagram.
    pub fn indent_width(&self) -> usize {
        self.indent_width
    }
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self::new(DEFAULT_SEPARATOR_MIN_LEN, DEFAULT_INDENT_WIDTH)
    }
}
