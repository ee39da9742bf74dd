// SPDX-License-Identifier: MIT OR Apache-2.0

//! Service layer tying the domain to its on-disk form.
//!
//! This module holds the codec registry consulted while loading and the
//! `save`/`load` entry points of [`ConfigFile`](crate::domain::ConfigFile).

pub mod persist;
pub mod registry;

// Re-export commonly used types
pub use registry::CodecRegistry;
