// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the configuration crate.
//!
//! Two error types live here. [`ConfigError`] covers failures that abort an
//! operation (duplicate names, malformed documents, I/O). [`DecodeError`] covers a
//! single value whose encoded text cannot be turned back into its declared type;
//! a load collects those into a [`LoadReport`](crate::domain::LoadReport) instead
//! of failing.

use crate::domain::type_tag::TypeTag;
use std::fmt;
use std::num::{ParseFloatError, ParseIntError};
use std::path::PathBuf;
use thiserror::Error;

/// The kind of name a [`ConfigError`] refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NameKind {
    /// A section name, unique within a file.
    Section,
    /// A variable name, unique within a section.
    Variable,
}

impl fmt::Display for NameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NameKind::Section => write!(f, "section"),
            NameKind::Variable => write!(f, "variable"),
        }
    }
}

/// The main error type for configuration operations.
///
/// Every variant is fatal to the operation that produced it. It is marked as
/// `#[non_exhaustive]` to allow for future additions without breaking backwards
/// compatibility.
///
/// # Examples
///
/// ```
/// use tagcfg::domain::{ConfigError, NameKind};
///
/// let err = ConfigError::DuplicateName {
///     kind: NameKind::Section,
///     name: "Chelsea".to_string(),
/// };
/// assert_eq!(err.to_string(), "Duplicate section name: Chelsea");
/// ```
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// A section or variable with the same name already exists in its scope.
    #[error("Duplicate {kind} name: {name}")]
    DuplicateName {
        /// Whether the name belongs to a section or a variable
        kind: NameKind,
        /// The name that collided
        name: String,
    },

    /// A name is empty or has leading or trailing whitespace.
    #[error("Invalid {kind} name: {name:?}")]
    InvalidName {
        /// Whether the name belongs to a section or a variable
        kind: NameKind,
        /// The rejected name
        name: String,
    },

    /// The document violates the format's structural grammar.
    #[error("Malformed configuration file at line {line}: {message}")]
    MalformedFile {
        /// One-based line number of the offending line
        line: usize,
        /// What was wrong with it
        message: String,
    },

    /// A typed update targeted a variable stored under a different type.
    #[error("Variable '{name}' holds type '{found}', not '{expected}'")]
    TypeMismatch {
        /// The variable name
        name: String,
        /// The type tag the caller asked for
        expected: TypeTag,
        /// The type tag actually stored
        found: TypeTag,
    },

    /// A codec was registered under a tag that is already taken.
    #[error("Type tag already registered: {tag}")]
    DuplicateTypeTag {
        /// The colliding tag
        tag: String,
    },

    /// A codec tag is empty or contains structural characters.
    #[error("Invalid type tag: {tag:?}")]
    InvalidTypeTag {
        /// The rejected tag
        tag: String,
    },

    /// The process-wide codec registry was already initialized.
    #[error("The global codec registry is already installed")]
    RegistryAlreadyInstalled,

    /// The platform configuration directory could not be determined.
    #[error("Could not determine the platform configuration directory")]
    NoPlatformConfigDir,

    /// The file exceeds the size a configuration file may have.
    #[error("Configuration file {path} too large: {size} bytes (max {max} bytes)")]
    FileTooLarge {
        /// The offending file
        path: PathBuf,
        /// Its size in bytes
        size: u64,
        /// The configured limit
        max: u64,
    },

    /// An I/O error occurred while reading or writing a configuration file.
    #[error("I/O error accessing {path}: {source}")]
    Io {
        /// The path being accessed
        path: PathBuf,
        /// The underlying error
        #[source]
        source: std::io::Error,
    },
}

impl ConfigError {
    /// Creates an [`ConfigError::Io`] for the given path.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::Io {
            path: path.into(),
            source,
        }
    }

    /// Creates a [`ConfigError::MalformedFile`] for the given line.
    pub fn malformed(line: usize, message: impl Into<String>) -> Self {
        ConfigError::MalformedFile {
            line,
            message: message.into(),
        }
    }
}

/// A failure to turn one encoded value back into its declared type.
///
/// Decode errors are local to a single entry. During a load they are collected
/// rather than propagated.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum DecodeError {
    /// No codec is registered for the entry's type tag.
    #[error("Unknown type tag: {tag}")]
    UnknownTypeTag {
        /// The unregistered tag
        tag: String,
    },

    /// The entry has no `tag:` prefix in front of its value.
    #[error("Missing type tag before value")]
    MissingTypeTag,

    /// The text is not a valid integer for the target type.
    #[error("Invalid integer {text:?}: {source}")]
    InvalidInteger {
        /// The rejected text
        text: String,
        /// The underlying parse error
        source: ParseIntError,
    },

    /// The text is not a valid floating-point number.
    #[error("Invalid float {text:?}: {source}")]
    InvalidFloat {
        /// The rejected text
        text: String,
        /// The underlying parse error
        source: ParseFloatError,
    },

    /// The text is neither `true` nor `false`.
    #[error("Invalid boolean {text:?}")]
    InvalidBool {
        /// The rejected text
        text: String,
    },

    /// A compound value has the wrong number of components.
    #[error("Expected {expected} components, found {found}")]
    ComponentCount {
        /// Components the type needs
        expected: usize,
        /// Components present in the text
        found: usize,
    },

    /// A structural character appears in a string without its escape.
    #[error("Unescaped {ch:?} at byte {position}")]
    UnescapedCharacter {
        /// The offending character
        ch: char,
        /// Byte offset in the encoded text
        position: usize,
    },

    /// A backslash escape that the format does not define.
    #[error("Invalid escape sequence {sequence:?}")]
    InvalidEscape {
        /// The escape as it appeared, including the backslash
        sequence: String,
    },

    /// The text is not a value of the target type.
    ///
    /// Codecs for host-defined types report their own failures through this variant.
    #[error("Invalid value {text:?}: {message}")]
    InvalidValue {
        /// The rejected text
        text: String,
        /// What the codec expected
        message: String,
    },
}

impl DecodeError {
    /// Creates an [`DecodeError::InvalidValue`].
    pub fn invalid_value(text: &str, message: impl Into<String>) -> Self {
        DecodeError::InvalidValue {
            text: text.to_string(),
            message: message.into(),
        }
    }

    /// Creates an [`DecodeError::InvalidInteger`] from a `ParseIntError`.
    pub fn from_parse_int_error(text: &str, err: ParseIntError) -> Self {
        DecodeError::InvalidInteger {
            text: text.to_string(),
            source: err,
        }
    }

    /// Creates an [`DecodeError::InvalidFloat`] from a `ParseFloatError`.
    pub fn from_parse_float_error(text: &str, err: ParseFloatError) -> Self {
        DecodeError::InvalidFloat {
            text: text.to_string(),
            source: err,
        }
    }
}

/// A specialized Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
