//! Unfurl Core Types
//!
//! This crate provides the data model shared by the unfurl parser and
//! materializer. It includes:
//!
//! - **Entries**: file contents keyed by relative path ([`entry::ContentMap`])
//!   and the file/directory classification ([`entry::EntryKind`])
//! - **Path sets**: the ancestor-complete, ordered set of paths to create
//!   ([`path_set::ReconciledPathSet`])
//! - **Reconciliation**: merging tree-diagram paths with content-block paths
//!   ([`reconcile`] module)

pub mod entry;
pub mod path_set;
pub mod reconcile;
