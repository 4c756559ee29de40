//! Configuration types for extraction runs.
//!
//! This module provides configuration structures that control how documents
//! are parsed and how the result is written to disk. All types implement
//! [`serde::Deserialize`] for flexible loading from external sources.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level application configuration combining parse and output settings.
//! - [`ParsingConfig`] - Tunables for the document grammar.
//! - [`OutputConfig`] - Controls how files are written under the output root.
//!
//! # Example
//!
//! ```
//! # use unfurl::config::AppConfig;
//! // Use default configuration
//! let config = AppConfig::default();
//! assert!(config.validate().is_ok());
//! assert!(config.output().overwrite_existing());
//! ```

use serde::Deserialize;

use unfurl_parser::{DEFAULT_INDENT_WIDTH, DEFAULT_SEPARATOR_MIN_LEN, ParseConfig};

/// Top-level application configuration combining parse and output settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Parse configuration section.
    #[serde(default)]
    parse: ParsingConfig,

    /// Output configuration section.
    #[serde(default)]
    output: OutputConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified parse and output configurations.
    ///
    /// # Arguments
    ///
    /// * `parse` - Grammar tunables.
    /// * `output` - Output writing options.
    pub fn new(parse: ParsingConfig, output: OutputConfig) -> Self {
        Self { parse, output }
    }

    /// Returns the parse configuration.
    pub fn parse(&self) -> &ParsingConfig {
        &self.parse
    }

    /// Returns the output configuration.
    pub fn output(&self) -> &OutputConfig {
        &self.output
    }

    /// Check that every setting holds a usable value.
    ///
    /// # Errors
    ///
    /// Returns a message naming the first invalid setting.
    pub fn validate(&self) -> Result<(), String> {
        self.parse.validate()
    }
}

/// Tunables for the document grammar.
#[derive(Debug, Clone, Deserialize)]
pub struct ParsingConfig {
    /// Minimum number of `-` characters in a block separator line.
    #[serde(default = "default_separator_min_len")]
    separator_min_len: usize,

    /// Indentation columns per level in the tree diagram.
    #[serde(default = "default_indent_width")]
    indent_width: usize,
}

fn default_separator_min_len() -> usize {
    DEFAULT_SEPARATOR_MIN_LEN
}

fn default_indent_width() -> usize {
    DEFAULT_INDENT_WIDTH
}

impl ParsingConfig {
    /// Creates a new [`ParsingConfig`].
    ///
    /// # Arguments
    ///
    /// * `separator_min_len` - Minimum `-` run accepted as a block separator.
    /// * `indent_width` - Indentation columns per tree level.
    pub fn new(separator_min_len: usize, indent_width: usize) -> Self {
        Self {
            separator_min_len,
            indent_width,
        }
    }

    /// Minimum `-` run accepted as a block separator.
    pub fn separator_min_len(&self) -> usize {
        self.separator_min_len
    }

    /// Indentation columns per tree level.
    pub fn indent_width(&self) -> usize {
        self.indent_width
    }

    /// The [`ParseConfig`] handed to the parser.
    pub fn to_parse_config(&self) -> ParseConfig {
        ParseConfig::new(self.separator_min_len, self.indent_width)
    }

    fn validate(&self) -> Result<(), String> {
        if self.separator_min_len == 0 {
            return Err("Invalid parse.separator_min_len in config: must be at least 1".to_string());
        }
        if self.indent_width == 0 {
            return Err("Invalid parse.indent_width in config: must be at least 1".to_string());
        }
        Ok(())
    }
}

impl Default for ParsingConfig {
    fn default() -> Self {
        Self::new(DEFAULT_SEPARATOR_MIN_LEN, DEFAULT_INDENT_WIDTH)
    }
}

/// Output writing configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Replace files that already exist under the output root.
    #[serde(default = "default_overwrite_existing")]
    overwrite_existing: bool,
}

fn default_overwrite_existing() -> bool {
    true
}

impl OutputConfig {
    /// Creates a new [`OutputConfig`].
    ///
    /// # Arguments
    ///
    /// * `overwrite_existing` - Replace files that already exist.
    pub fn new(overwrite_existing: bool) -> Self {
        Self { overwrite_existing }
    }

    /// Returns `true` when existing files are replaced.
    pub fn overwrite_existing(&self) -> bool {
        self.overwrite_existing
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::new(default_overwrite_existing())
    }
}
