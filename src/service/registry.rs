// SPDX-License-Identifier: MIT OR Apache-2.0

//! Codec registry mapping type tags to decoders.
//!
//! Loading a file only sees tags and text. The registry turns a `(tag, text)` pair
//! back into a typed, erased variable by looking the tag up and running the
//! matching [`ConfigType::decode`]. Encoding needs no lookup: every
//! [`ConfigVariable<T>`] already carries `T`'s codec.

use crate::domain::{
    AnyVariable, ConfigError, ConfigVariable, DecodeError, Result, TypeTag, Vec2, Vec3,
};
use crate::ports::ConfigType;
use once_cell::sync::OnceCell;
use std::collections::HashMap;
use std::fmt;

/// Builds an erased variable from a name and an encoded value.
type DecodeFn = fn(String, &str) -> std::result::Result<Box<dyn AnyVariable>, DecodeError>;

fn decode_variable<T: ConfigType>(
    name: String,
    text: &str,
) -> std::result::Result<Box<dyn AnyVariable>, DecodeError> {
    let value = T::decode(text)?;
    Ok(Box::new(ConfigVariable::new(name, value)))
}

#[derive(Clone, Copy)]
struct CodecEntry {
    type_name: &'static str,
    decode: DecodeFn,
}

/// A table of codecs keyed by type tag.
///
/// Registries are built once and then only read, so a shared reference can be
/// used from any thread without locking.
///
/// # Examples
///
/// ```rust
/// use tagcfg::domain::AnyVariable;
/// use tagcfg::service::CodecRegistry;
///
/// let registry = CodecRegistry::with_builtins();
/// let var = registry.decode("v3", "position".to_string(), "34.0,1.0,700.0").unwrap();
/// assert_eq!(var.name(), "position");
/// assert_eq!(var.serialize(), "34.0,1.0,700.0");
/// assert!(registry.decode("nope", "x".to_string(), "1").is_err());
/// ```
#[derive(Clone, Default)]
pub struct CodecRegistry {
    codecs: HashMap<TypeTag, CodecEntry>,
}

impl CodecRegistry {
    /// Creates a registry with no codecs.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding every built-in codec.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.insert::<String>();
        registry.insert::<bool>();
        registry.insert::<i32>();
        registry.insert::<i64>();
        registry.insert::<f32>();
        registry.insert::<f64>();
        registry.insert::<Vec2>();
        registry.insert::<Vec3>();
        registry
    }

    fn insert<T: ConfigType>(&mut self) {
        self.codecs.insert(
            TypeTag::from_static(T::TAG),
            CodecEntry {
                type_name: std::any::type_name::<T>(),
                decode: decode_variable::<T>,
            },
        );
    }

    /// Registers the codec of `T` under `T::TAG`.
    ///
    /// Fails with [`ConfigError::DuplicateTypeTag`] if the tag is taken and with
    /// [`ConfigError::InvalidTypeTag`] if it could not be written to a file.
    pub fn register<T: ConfigType>(&mut self) -> Result<()> {
        let tag = TypeTag::from_static(T::TAG);
        if !tag.is_valid() {
            return Err(ConfigError::InvalidTypeTag {
                tag: tag.into_string(),
            });
        }
        if self.codecs.contains_key(&tag) {
            return Err(ConfigError::DuplicateTypeTag {
                tag: tag.into_string(),
            });
        }
        tracing::debug!(
            "Registering codec for {} under tag '{}'",
            std::any::type_name::<T>(),
            tag
        );
        self.insert::<T>();
        Ok(())
    }

    /// Builder form of [`register`](Self::register).
    pub fn with<T: ConfigType>(mut self) -> Result<Self> {
        self.register::<T>()?;
        Ok(self)
    }

    /// Returns `true` if a codec is registered for `tag`.
    pub fn contains(&self, tag: &str) -> bool {
        self.codecs.contains_key(tag)
    }

    /// Returns the registered tags, sorted.
    pub fn tags(&self) -> Vec<&TypeTag> {
        let mut tags: Vec<&TypeTag> = self.codecs.keys().collect();
        tags.sort();
        tags
    }

    /// Returns the Rust type name registered under `tag`.
    pub fn type_name(&self, tag: &str) -> Option<&'static str> {
        self.codecs.get(tag).map(|entry| entry.type_name)
    }

    /// Decodes `text` with the codec registered for `tag` into a named variable.
    pub fn decode(
        &self,
        tag: &str,
        name: String,
        text: &str,
    ) -> std::result::Result<Box<dyn AnyVariable>, DecodeError> {
        let entry = self
            .codecs
            .get(tag)
            .ok_or_else(|| DecodeError::UnknownTypeTag {
                tag: tag.to_string(),
            })?;
        (entry.decode)(name, text)
    }
}

impl fmt::Debug for CodecRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for tag in self.tags() {
            map.entry(&tag.as_str(), &self.codecs[tag].type_name);
        }
        map.finish()
    }
}

static GLOBAL: OnceCell<CodecRegistry> = OnceCell::new();

/// Returns the process-wide registry.
///
/// The first call installs [`CodecRegistry::with_builtins`] unless
/// [`install_global`] ran before it. The registry never changes afterwards.
pub fn global() -> &'static CodecRegistry {
    GLOBAL.get_or_init(CodecRegistry::with_builtins)
}

/// Returns the process-wide registry if one is in place, without creating it.
pub(crate) fn installed() -> Option<&'static CodecRegistry> {
    GLOBAL.get()
}

/// Installs `registry` as the process-wide registry.
///
/// Call this once, before the first load, to make custom codecs available to
/// [`ConfigFile::load`](crate::domain::ConfigFile::load). Saving does not touch the
/// global registry, so files may be written before this runs. Fails with
/// [`ConfigError::RegistryAlreadyInstalled`] once the global registry exists.
///
/// # Examples
///
/// ```rust
/// use tagcfg::service::registry::{self, CodecRegistry};
///
/// // A registry is already in place after the first lookup.
/// let _ = registry::global();
/// assert!(registry::install_global(CodecRegistry::with_builtins()).is_err());
/// ```
pub fn install_global(registry: CodecRegistry) -> Result<()> {
    GLOBAL
        .set(registry)
        .map_err(|_| ConfigError::RegistryAlreadyInstalled)
}
