// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed configuration variables and their erased view.
//!
//! A [`ConfigVariable<T>`] holds one named value of a concrete type. Sections store
//! variables of many types side by side as `Box<dyn AnyVariable>`, and callers get
//! the typed value back with [`value_as`](trait.AnyVariable.html#method.value_as).

use crate::domain::type_tag::TypeTag;
use crate::ports::ConfigType;
use std::any::Any;
use std::fmt;

/// A named, typed configuration value.
///
/// The type tag is fixed by `T` and cannot change after construction.
///
/// # Examples
///
/// ```
/// use tagcfg::domain::{AnyVariable, ConfigVariable};
///
/// let var = ConfigVariable::new("cutenessFactor", 9001_i32);
/// assert_eq!(var.name(), "cutenessFactor");
/// assert_eq!(var.serialize(), "9001");
///
/// let erased: Box<dyn AnyVariable> = Box::new(var);
/// assert_eq!(erased.type_tag().as_str(), "i");
/// assert_eq!(erased.value_as::<i32>(), Some(9001));
/// assert_eq!(erased.value_as::<String>(), None);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ConfigVariable<T: ConfigType> {
    name: String,
    value: T,
}

impl<T: ConfigType> ConfigVariable<T> {
    /// Creates a variable from a name and a value.
    pub fn new(name: impl Into<String>, value: T) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    /// Returns the variable's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the stored value.
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Replaces the stored value, returning the previous one.
    pub fn set(&mut self, value: T) -> T {
        std::mem::replace(&mut self.value, value)
    }

    /// Consumes the variable and returns its value.
    pub fn into_value(self) -> T {
        self.value
    }

    /// Returns the tag of `T`'s codec.
    pub fn type_tag(&self) -> TypeTag {
        TypeTag::from_static(T::TAG)
    }

    /// Encodes the value with `T`'s codec.
    pub fn serialize(&self) -> String {
        self.value.encode()
    }
}

/// The erased view of a [`ConfigVariable`].
///
/// This is the capability set a section needs to store, look up and write out
/// variables without knowing their concrete type. It is implemented for every
/// `ConfigVariable<T>`; implementing it elsewhere is possible but the downcasting
/// helpers on `dyn AnyVariable` only recognize `ConfigVariable<T>`.
pub trait AnyVariable: fmt::Debug + Send + Sync + 'static {
    /// Returns the variable's name.
    fn name(&self) -> &str;

    /// Returns the tag of the codec that encodes this variable.
    fn type_tag(&self) -> TypeTag;

    /// Encodes the value with its codec. Has no side effects.
    fn serialize(&self) -> String;

    /// Returns `self` as `Any` for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Returns `self` as mutable `Any` for downcasting.
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Clones the variable behind a new box.
    fn clone_box(&self) -> Box<dyn AnyVariable>;

    /// Compares name, type and value with another erased variable.
    fn eq_dyn(&self, other: &dyn AnyVariable) -> bool;
}

impl<T: ConfigType> AnyVariable for ConfigVariable<T> {
    fn name(&self) -> &str {
        &self.name
    }

    fn type_tag(&self) -> TypeTag {
        TypeTag::from_static(T::TAG)
    }

    fn serialize(&self) -> String {
        self.value.encode()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn clone_box(&self) -> Box<dyn AnyVariable> {
        Box::new(self.clone())
    }

    fn eq_dyn(&self, other: &dyn AnyVariable) -> bool {
        other
            .as_any()
            .downcast_ref::<Self>()
            .is_some_and(|other| self == other)
    }
}

impl dyn AnyVariable {
    /// Returns a copy of the value if it is stored as `T`.
    ///
    /// There is no coercion between types: an `i32` variable is not readable as
    /// `i64` or `f32`.
    pub fn value_as<T: ConfigType>(&self) -> Option<T> {
        self.downcast_ref::<T>().map(|var| var.value().clone())
    }

    /// Returns the typed variable if it is stored as `T`.
    pub fn downcast_ref<T: ConfigType>(&self) -> Option<&ConfigVariable<T>> {
        self.as_any().downcast_ref::<ConfigVariable<T>>()
    }

    /// Returns the typed variable mutably if it is stored as `T`.
    pub fn downcast_mut<T: ConfigType>(&mut self) -> Option<&mut ConfigVariable<T>> {
        self.as_any_mut().downcast_mut::<ConfigVariable<T>>()
    }

    /// Returns `true` if the variable is stored as `T`.
    pub fn is<T: ConfigType>(&self) -> bool {
        self.as_any().is::<ConfigVariable<T>>()
    }
}

impl Clone for Box<dyn AnyVariable> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

impl PartialEq for dyn AnyVariable {
    fn eq(&self, other: &Self) -> bool {
        self.eq_dyn(other)
    }
}
