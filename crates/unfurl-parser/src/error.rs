//! Diagnostics reported while parsing a flattened repository dump.
//!
//! This module provides:
//! - Error codes for documentation and searchability
//! - Multiple labeled spans for rich error context
//! - Severity levels
//! - Diagnostic collector for accumulating warnings during a parse
//!
//! # Overview
//!
//! A [`Diagnostic`] is a single error or warning with an optional code,
//! source locations and help text. A failed parse returns its diagnostics
//! wrapped in a [`ParseError`]; a successful parse hands its warnings back
//! as part of the [`ParsedDocument`](crate::ParsedDocument).
//!
//! # Example
//!
//! ```
//! # use unfurl_parser::error::{Diagnostic, ErrorCode};
//! # use unfurl_parser::Span;
//!
//! let span = Span::new(100..120);
//! let first_span = Span::new(10..30);
//!
//! let diag = Diagnostic::warning("content block `src/lib.rs` appears more than once")
//!     .with_code(ErrorCode::W001)
//!     .with_label(span, "this block replaces the earlier content")
//!     .with_secondary_label(first_span, "first defined here");
//! ```

mod collector;
mod diagnostic;
mod error_code;
mod label;
mod parse_error;
mod severity;

pub(crate) use collector::DiagnosticCollector;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use label::Label;
pub use parse_error::ParseError;
pub use severity::Severity;
