// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain layer containing core business logic and types.
//!
//! This module contains the in-memory model of a configuration file: sections,
//! typed variables and their erased view, the value types the built-in codecs
//! cover, and the error types. It knows nothing about the on-disk format.

pub mod errors;
pub mod file;
pub mod report;
pub mod section;
pub mod type_tag;
pub mod variable;
pub mod vector;

// Re-export commonly used types
pub use errors::{ConfigError, DecodeError, NameKind, Result};
pub use file::ConfigFile;
pub use report::{DecodeFailure, LoadReport};
pub use section::ConfigSection;
pub use type_tag::TypeTag;
pub use variable::{AnyVariable, ConfigVariable};
pub use vector::{Vec2, Vec3};
