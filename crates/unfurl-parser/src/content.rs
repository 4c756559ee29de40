//! Content-block scanner.
//!
//! A content block is a `/path:` header line, a separator line of dashes, and
//! a body that runs up to the first empty line:
//!
//! ```text
//! /src/main.py:
//! --------------------------------------------------------------------------------
//!  1 | import sys
//!  2 |
//!  3 | print(sys.argv)
//!
//! ```
//!
//! Body lines usually carry a `N | ` line-number prefix, which is removed.
//! Text between blocks is ignored.

use std::collections::HashMap;

use log::{debug, trace};
use winnow::{
    Parser as _,
    combinator::{opt, preceded, terminated},
    error::{ContextError, ErrMode},
    token::{one_of, take_till, take_until, take_while},
};

use unfurl_core::entry::{ContentMap, FileEntry};

use crate::{
    config::ParseConfig,
    error::{Diagnostic, DiagnosticCollector, ErrorCode},
    span::Span,
};

type Input<'src> = &'src str;
type IResult<O> = std::result::Result<O, ErrMode<ContextError>>;

/// A block as it appears in the source, before cleaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RawBlock<'src> {
    /// Header path without the leading `/`
    path: &'src str,
    /// Body text, without the terminating empty line
    body: &'src str,
}

/// Trailing whitespace allowed after the header colon and the separator.
fn trailing_ws<'src>(input: &mut Input<'src>) -> IResult<&'src str> {
    take_while(0.., [' ', '\t', '\r']).parse_next(input)
}

/// Parse a `/path:` header line, returning the raw path after the first `/`.
fn header_path<'src>(input: &mut Input<'src>) -> IResult<&'src str> {
    terminated(
        preceded('/', take_till(1.., [':', '\n'])),
        (':', trailing_ws, '\n'),
    )
    .verify(|path: &str| path.split('/').any(|segment| !segment.is_empty()))
    .parse_next(input)
}

/// Parse a separator line of at least `min_len` dashes.
fn separator<'src>(input: &mut Input<'src>, min_len: usize) -> IResult<()> {
    (take_while(min_len.., '-'), trailing_ws, '\n')
        .void()
        .parse_next(input)
}

/// Parse a block body up to and including its terminating empty line.
///
/// A block directly followed by an empty line has an empty body. A body that
/// reaches the end of the document without an empty line does not parse.
fn body<'src>(input: &mut Input<'src>) -> IResult<&'src str> {
    let current: &'src str = *input;
    if let Some(remaining) = current.strip_prefix('\n') {
        *input = remaining;
        return Ok(&current[..0]);
    }

    terminated(take_until(0.., "\n\n"), "\n\n").parse_next(input)
}

fn content_block<'src>(input: &mut Input<'src>, min_len: usize) -> IResult<RawBlock<'src>> {
    let path = header_path.parse_next(input)?;
    separator(input, min_len)?;
    let body = body.parse_next(input)?;

    Ok(RawBlock { path, body })
}

/// Skip the rest of the current line, including its newline.
fn skip_line(input: &mut Input<'_>) {
    let result: IResult<()> = (take_till(0.., '\n'), opt('\n')).void().parse_next(input);
    debug_assert!(result.is_ok(), "skipping a line never fails");
}

/// Match the `N | ` line-number prefix of a body line.
fn line_number_prefix(input: &mut Input<'_>) -> IResult<()> {
    (
        take_while(0.., |c: char| c.is_whitespace()),
        take_while(1.., |c: char| c.is_ascii_digit()),
        take_while(0.., |c: char| c.is_whitespace()),
        '|',
        opt(one_of(|c: char| c.is_whitespace())),
    )
        .void()
        .parse_next(input)
}

/// Clean a single body line.
///
/// Lines with a line-number prefix lose the prefix and keep everything after
/// it, including indentation. Other lines are kept verbatim unless they are
/// blank, in which case they are dropped.
pub(crate) fn clean_line(line: &str) -> Option<&str> {
    let mut remaining = line;
    if line_number_prefix(&mut remaining).is_ok() {
        return Some(remaining);
    }

    if line.trim().is_empty() {
        None
    } else {
        Some(line)
    }
}

/// Clean a block body into the file content.
pub(crate) fn clean_body(body: &str) -> String {
    body.split('\n')
        .filter_map(clean_line)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Scan `source` for content blocks.
///
/// Returns the cleaned file contents keyed by relative path. Duplicate paths
/// keep the last block and report a [`ErrorCode::W001`] warning. A document
/// with no content block at all reports an [`ErrorCode::E001`] error.
pub(crate) fn parse_content_blocks(
    source: &str,
    config: &ParseConfig,
    collector: &mut DiagnosticCollector,
) -> ContentMap {
    let mut input = source;
    let mut files = ContentMap::new();
    let mut first_headers: HashMap<String, Span> = HashMap::new();

    while !input.is_empty() {
        let start = input;
        let offset = source.len() - input.len();

        let block = match content_block(&mut input, config.separator_min_len()) {
            Ok(block) => block,
            Err(_) => {
                input = start;
                skip_line(&mut input);
                continue;
            }
        };

        // `/` + path + `:`
        let header = Span::new(offset..offset + block.path.len() + 2);
        let entry = FileEntry::new(block.path, clean_body(block.body));
        let path = entry.relative_path().to_string();
        debug!(path = path, body_bytes = block.body.len(); "Found content block");

        match first_headers.get(&path) {
            Some(first) => collector.emit(
                Diagnostic::warning(format!("content block `{path}` appears more than once"))
                    .with_code(ErrorCode::W001)
                    .with_label(header, "this block replaces the earlier content")
                    .with_secondary_label(*first, "first defined here"),
            ),
            None => {
                first_headers.insert(path, header);
            }
        }

        files.insert(entry);
    }

    if files.is_empty() {
        let line_count = source.lines().count();
        let first_line = source.find('\n').unwrap_or(source.len());
        collector.emit(
            Diagnostic::error(format!(
                "no content blocks found in the input: {line_count} lines are loaded"
            ))
            .with_code(ErrorCode::E001)
            .with_label(
                Span::new(0..first_line),
                "no `/path:` header followed by a dashed separator in this document",
            )
            .with_help(format!(
                "content blocks start with a line like `/src/main.rs:` followed by a line of at least {} `-` characters",
                config.separator_min_len()
            )),
        );
        return files;
    }

    trace!(paths:? = files.paths().collect::<Vec<_>>(); "Content block paths");

    files
}
