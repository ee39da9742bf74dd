// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ports layer containing trait definitions.
//!
//! This module contains the trait definitions (ports) that define the interfaces
//! between typed values and their text form. These traits are implemented by
//! adapters in the adapters layer, and by host applications for their own types.

pub mod codec;
pub mod format;

// Re-export commonly used types
pub use codec::ConfigType;
pub use format::ConfigFormat;
