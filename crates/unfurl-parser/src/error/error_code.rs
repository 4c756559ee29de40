//! Error codes for the unfurl diagnostic system.
//!
//! - `E0xx` - Document errors that abort the extraction
//! - `W0xx` - Warnings about input that was ignored or overridden

use std::fmt;

/// Codes for categorizing diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Document Errors (E0xx)
    // =========================================================================
    /// No content blocks.
    ///
    /// The document contains no `/path:` header followed by a dashed
    /// separator line, so there is nothing to extract.
    E001,

    // =========================================================================
    // Warnings (W0xx)
    // =========================================================================
    /// Duplicate content block.
    ///
    /// The same path has more than one content block. The last one wins.
    W001,

    /// Unrecognized tree line.
    ///
    /// A line inside the tree diagram has no branch glyph or has an
    /// indentation that is not made of spaces and `│` glyphs. It is skipped.
    W002,
}

impl ErrorCode {
    /// Returns the code as a string (e.g., "E001").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "E001",
            ErrorCode::W001 => "W001",
            ErrorCode::W002 => "W002",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::E001.to_string(), "E001");
        assert_eq!(ErrorCode::W002.to_string(), "W002");
    }
}
