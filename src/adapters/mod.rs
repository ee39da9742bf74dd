// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapters layer containing the concrete codecs, format and storage.
//!
//! This module implements the traits defined in the ports layer: the built-in
//! [`ConfigType`](crate::ports::ConfigType) codecs, the text
//! [`ConfigFormat`](crate::ports::ConfigFormat), and the file access used to
//! persist it.

pub mod codecs;
pub mod escape;
pub mod file_store;
pub mod text_format;

// Re-export commonly used types
pub use file_store::{FileStore, DEFAULT_MAX_FILE_SIZE};
pub use text_format::TextFormat;
