// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed, sectioned configuration files with lossless text round trips.
//!
//! A [`ConfigFile`](domain::ConfigFile) holds named sections, and each section holds
//! named variables of any type with a registered codec. Files are saved as text and
//! load back to an equal value, including floats and compound types such as
//! [`Vec3`](domain::Vec3).
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain Layer**: The in-memory model (`ConfigFile`, `ConfigSection`, `ConfigVariable`, errors)
//! - **Ports**: Trait definitions at the seams (`ConfigType`, `ConfigFormat`)
//! - **Adapters**: Built-in codecs, the text format and file access
//! - **Service**: The codec registry and the save/load entry points
//!
//! # Format
//!
//! ```text
//! [Chelsea]
//! nickName=s:Cutiemoo
//! cutenessFactor=i:9001
//! position=v3:34.0,1.0,700.0
//! ```
//!
//! # Feature Flags
//!
//! - `cli`: Build the `tagcfg` command-line inspector
//!
//! # Quick Start
//!
//! ```rust
//! use tagcfg::prelude::*;
//!
//! # fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
//! let dir = tempfile::tempdir()?;
//! let path = dir.path().join("chelsea.cfg");
//!
//! let mut file = ConfigFile::new();
//! file.add_section(
//!     ConfigSection::new("Chelsea")
//!         .with("nickName", "Cutiemoo".to_string())?
//!         .with("cutenessFactor", 9001_i32)?
//!         .with("position", Vec3::new(34.0, 1.0, 700.0))?,
//! )?;
//! file.save(&path)?;
//!
//! let (loaded, report) = ConfigFile::from_path(&path)?;
//! assert!(report.is_clean());
//! let chelsea = loaded.get_section("Chelsea").unwrap();
//! assert_eq!(chelsea.value::<i32>("cutenessFactor"), Some(9001));
//! assert_eq!(chelsea.value::<Vec3>("position"), Some(Vec3::new(34.0, 1.0, 700.0)));
//! # Ok(())
//! # }
//! ```
//!
//! # Custom Types
//!
//! Implement [`ConfigType`](ports::ConfigType) for the type, then register it before
//! the first load with [`install_global`](service::registry::install_global) or pass
//! a registry to [`ConfigFile::load_with`](domain::ConfigFile::load_with).

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

/// Commonly used types and traits.
///
/// This module re-exports the most commonly used types and traits for convenient access.
pub mod prelude {
    pub use crate::adapters::{FileStore, TextFormat};
    pub use crate::domain::{
        AnyVariable, ConfigError, ConfigFile, ConfigSection, ConfigVariable, DecodeError,
        LoadReport, Result, Vec2, Vec3,
    };
    pub use crate::ports::{ConfigFormat, ConfigType};
    pub use crate::service::CodecRegistry;
}
