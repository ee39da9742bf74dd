// SPDX-License-Identifier: MIT OR Apache-2.0

//! Type tag newtype naming the codec that applies to an encoded value.
//!
//! Tags are short identifiers written in front of every value in a file
//! (`position=v3:1.0,2.0,3.0`), which is how a load recovers the original type
//! without an external schema.

use std::borrow::{Borrow, Cow};
use std::fmt;

/// A short identifier naming which codec applies to a value.
///
/// Built-in codecs use static tags, so a `TypeTag` borrows where it can and only
/// allocates for tags read from a file.
///
/// # Examples
///
/// ```
/// use tagcfg::domain::TypeTag;
///
/// let tag = TypeTag::from_static("v3");
/// assert_eq!(tag.as_str(), "v3");
/// assert_eq!(tag, TypeTag::from("v3".to_string()));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeTag(Cow<'static, str>);

impl TypeTag {
    /// Creates a tag from a static string without allocating.
    pub const fn from_static(tag: &'static str) -> Self {
        TypeTag(Cow::Borrowed(tag))
    }

    /// Returns the tag as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if the tag can be written to a file unambiguously.
    ///
    /// Valid tags are non-empty and made of ASCII letters, digits, `_` and `-`.
    pub fn is_valid(&self) -> bool {
        !self.0.is_empty()
            && self
                .0
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    }

    /// Converts the tag into an owned `String`.
    pub fn into_string(self) -> String {
        self.0.into_owned()
    }
}

impl From<String> for TypeTag {
    fn from(s: String) -> Self {
        TypeTag(Cow::Owned(s))
    }
}

impl From<&str> for TypeTag {
    fn from(s: &str) -> Self {
        TypeTag(Cow::Owned(s.to_string()))
    }
}

impl AsRef<str> for TypeTag {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for TypeTag {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
