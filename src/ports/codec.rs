// SPDX-License-Identifier: MIT OR Apache-2.0

//! Value codec trait definition.
//!
//! This module defines the `ConfigType` trait, the port every storable value type
//! implements. A type's codec is its tag plus an encode/decode pair that turn a
//! value into its canonical text token and back.

use crate::domain::DecodeError;
use std::fmt;

/// A value type that can be stored in a configuration file.
///
/// Implementations must round-trip: for every value `v`,
/// `T::decode(&v.encode()) == Ok(v)` (up to the type's notion of equality).
/// Encoded text must never contain a raw newline, and string-like payloads must
/// escape the format's structural characters; see
/// [`escape`](crate::adapters::escape).
///
/// # Examples
///
/// ```rust
/// use tagcfg::domain::DecodeError;
/// use tagcfg::ports::ConfigType;
///
/// #[derive(Clone, Debug, PartialEq)]
/// struct Percent(u8);
///
/// impl ConfigType for Percent {
///     const TAG: &'static str = "pct";
///
///     fn encode(&self) -> String {
///         self.0.to_string()
///     }
///
///     fn decode(text: &str) -> Result<Self, DecodeError> {
///         let text = text.trim();
///         text.parse()
///             .map(Percent)
///             .map_err(|e| DecodeError::from_parse_int_error(text, e))
///     }
/// }
///
/// assert_eq!(Percent::decode(&Percent(42).encode()), Ok(Percent(42)));
/// ```
pub trait ConfigType: Clone + PartialEq + fmt::Debug + Send + Sync + 'static {
    /// The tag written in front of every encoded value of this type.
    const TAG: &'static str;

    /// Encodes the value into its canonical text token.
    fn encode(&self) -> String;

    /// Decodes a text token produced by [`encode`](Self::encode).
    ///
    /// Implementations tolerate whitespace around numeric tokens and separators.
    fn decode(text: &str) -> Result<Self, DecodeError>;
}
