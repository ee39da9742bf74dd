// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration format trait definition.
//!
//! This module defines the `ConfigFormat` trait, which provides an interface for
//! turning a [`ConfigFile`] into text and back.

use crate::domain::{ConfigFile, LoadReport, Result};
use crate::service::CodecRegistry;

/// A trait for on-disk configuration formats.
///
/// `parse` must accept everything `render` produces and reproduce an equal
/// [`ConfigFile`]. Structural violations abort parsing with an error; a value that
/// cannot be decoded is skipped and recorded in the returned [`LoadReport`].
///
/// # Examples
///
/// ```rust
/// use tagcfg::domain::{ConfigFile, LoadReport, Result};
/// use tagcfg::ports::ConfigFormat;
/// use tagcfg::service::CodecRegistry;
///
/// /// A format that stores nothing.
/// struct NullFormat;
///
/// impl ConfigFormat for NullFormat {
///     fn parse(&self, _content: &str, _registry: &CodecRegistry) -> Result<(ConfigFile, LoadReport)> {
///         Ok((ConfigFile::new(), LoadReport::new()))
///     }
///
///     fn render(&self, _file: &ConfigFile) -> String {
///         String::new()
///     }
///
///     fn supported_extensions(&self) -> &[&str] {
///         &["null"]
///     }
/// }
///
/// let (file, report) = NullFormat.parse("", &CodecRegistry::with_builtins()).unwrap();
/// assert!(file.is_empty() && report.is_clean());
/// ```
pub trait ConfigFormat {
    /// Parses `content` into a file, decoding values with `registry`.
    ///
    /// # Returns
    ///
    /// * `Ok((ConfigFile, LoadReport))` - The parsed file and any skipped entries
    /// * `Err(ConfigError)` - The content is structurally invalid
    fn parse(&self, content: &str, registry: &CodecRegistry) -> Result<(ConfigFile, LoadReport)>;

    /// Renders `file` into its canonical text.
    fn render(&self, file: &ConfigFile) -> String;

    /// Returns the file extensions (without the leading dot) this format uses.
    fn supported_extensions(&self) -> &[&str];
}
