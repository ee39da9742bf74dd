// SPDX-License-Identifier: MIT OR Apache-2.0

//! Named, ordered groups of configuration variables.

use crate::domain::errors::{ConfigError, NameKind, Result};
use crate::domain::type_tag::TypeTag;
use crate::domain::variable::{AnyVariable, ConfigVariable};
use crate::ports::ConfigType;

/// Checks that a section or variable name can survive a save/load round trip.
///
/// Names must be non-empty and must not start or end with whitespace, since the
/// text format trims whitespace around names.
pub(crate) fn validate_name(kind: NameKind, name: &str) -> Result<()> {
    if name.is_empty() || name.trim() != name {
        return Err(ConfigError::InvalidName {
            kind,
            name: name.to_string(),
        });
    }
    Ok(())
}

/// An ordered collection of uniquely named variables.
///
/// Variables keep their insertion order, which is also the order they are
/// written in.
///
/// # Examples
///
/// ```
/// use tagcfg::domain::{ConfigSection, ConfigVariable, Vec3};
///
/// # fn main() -> tagcfg::domain::Result<()> {
/// let mut section = ConfigSection::new("Chelsea");
/// section.add_variable(ConfigVariable::new("nickName", "Cutiemoo".to_string()))?;
/// section.add_variable(ConfigVariable::new("position", Vec3::new(34.0, 1.0, 700.0)))?;
///
/// assert!(section.add_variable(ConfigVariable::new("nickName", 1_i32)).is_err());
/// assert_eq!(section.value::<String>("nickName").as_deref(), Some("Cutiemoo"));
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ConfigSection {
    name: String,
    variables: Vec<Box<dyn AnyVariable>>,
}

impl ConfigSection {
    /// Creates an empty section.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            variables: Vec::new(),
        }
    }

    /// Returns the section name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Replaces the name without any checks.
    ///
    /// Attached sections are renamed through
    /// [`ConfigFile::rename_section`](crate::domain::ConfigFile::rename_section), which
    /// checks the new name against its siblings.
    pub(crate) fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Appends a variable.
    ///
    /// Fails with [`ConfigError::DuplicateName`] if a variable with the same name
    /// exists, leaving the section unchanged.
    pub fn add_variable<T: ConfigType>(&mut self, variable: ConfigVariable<T>) -> Result<()> {
        self.add_boxed(Box::new(variable))
    }

    /// Appends an already erased variable.
    pub fn add_boxed(&mut self, variable: Box<dyn AnyVariable>) -> Result<()> {
        validate_name(NameKind::Variable, variable.name())?;
        if self.contains(variable.name()) {
            return Err(ConfigError::DuplicateName {
                kind: NameKind::Variable,
                name: variable.name().to_string(),
            });
        }
        self.variables.push(variable);
        Ok(())
    }

    /// Builder form of [`add_variable`](Self::add_variable).
    pub fn with<T: ConfigType>(mut self, name: impl Into<String>, value: T) -> Result<Self> {
        self.add_variable(ConfigVariable::new(name, value))?;
        Ok(self)
    }

    /// Looks up a variable by name.
    pub fn get_variable(&self, name: &str) -> Option<&dyn AnyVariable> {
        self.variables
            .iter()
            .find(|v| v.name() == name)
            .map(|v| &**v)
    }

    /// Looks up a variable by name for modification.
    pub fn get_variable_mut(&mut self, name: &str) -> Option<&mut dyn AnyVariable> {
        self.variables
            .iter_mut()
            .find(|v| v.name() == name)
            .map(|v| &mut **v)
    }

    /// Returns a copy of the named value if it exists and is stored as `T`.
    pub fn value<T: ConfigType>(&self, name: &str) -> Option<T> {
        self.get_variable(name)?.value_as::<T>()
    }

    /// Sets the named value, appending a new variable if it does not exist.
    ///
    /// Fails with [`ConfigError::TypeMismatch`] if the variable exists with a
    /// different type; a variable's type never changes once created.
    pub fn set_value<T: ConfigType>(&mut self, name: &str, value: T) -> Result<()> {
        match self.get_variable_mut(name) {
            Some(existing) => {
                let found = existing.type_tag();
                match existing.downcast_mut::<T>() {
                    Some(var) => {
                        var.set(value);
                        Ok(())
                    }
                    None => Err(ConfigError::TypeMismatch {
                        name: name.to_string(),
                        expected: TypeTag::from_static(T::TAG),
                        found,
                    }),
                }
            }
            None => self.add_variable(ConfigVariable::new(name, value)),
        }
    }

    /// Removes and returns the named variable.
    pub fn remove_variable(&mut self, name: &str) -> Option<Box<dyn AnyVariable>> {
        let index = self.variables.iter().position(|v| v.name() == name)?;
        Some(self.variables.remove(index))
    }

    /// Returns `true` if a variable with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.variables.iter().any(|v| v.name() == name)
    }

    /// Iterates over the variables in insertion order.
    pub fn variables(&self) -> impl Iterator<Item = &dyn AnyVariable> {
        self.variables.iter().map(|v| &**v)
    }

    /// Returns the number of variables.
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    /// Returns `true` if the section has no variables.
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Vec3;

    fn chelsea() -> ConfigSection {
        ConfigSection::new("Chelsea")
            .with("nickName", "Cutiemoo".to_string())
            .unwrap()
            .with("cutenessFactor", 9001_i32)
            .unwrap()
            .with("position", Vec3::new(34.0, 1.0, 700.0))
            .unwrap()
    }

    #[test]
    fn test_add_and_get() {
        let section = chelsea();
        assert_eq!(section.name(), "Chelsea");
        assert_eq!(section.len(), 3);

        let var = section.get_variable("cutenessFactor").unwrap();
        assert_eq!(var.value_as::<i32>(), Some(9001));
        assert_eq!(var.type_tag().as_str(), "i");
    }

    #[test]
    fn test_get_missing_is_none() {
        assert!(chelsea().get_variable("missing").is_none());
        assert_eq!(chelsea().value::<i32>("missing"), None);
    }

    #[test]
    fn test_duplicate_leaves_section_unchanged() {
        let mut section = chelsea();
        let before = section.clone();

        let err = section
            .add_variable(ConfigVariable::new("cutenessFactor", 1_i32))
            .unwrap_err();

        assert!(matches!(
            err,
            ConfigError::DuplicateName {
                kind: NameKind::Variable,
                ..
            }
        ));
        assert_eq!(section, before);
        assert_eq!(section.value::<i32>("cutenessFactor"), Some(9001));
    }

    #[test]
    fn test_insertion_order() {
        let section = chelsea();
        let names: Vec<&str> = section.variables().map(|v| v.name()).collect();
        assert_eq!(names, vec!["nickName", "cutenessFactor", "position"]);
    }

    #[test]
    fn test_invalid_names_rejected() {
        let mut section = ConfigSection::new("S");
        for name in ["", " lead", "trail ", "\ttab"] {
            let err = section
                .add_variable(ConfigVariable::new(name, 1_i32))
                .unwrap_err();
            assert!(matches!(err, ConfigError::InvalidName { .. }), "{name:?}");
        }
        assert!(section.is_empty());
    }

    #[test]
    fn test_set_value_updates_in_place() {
        let mut section = chelsea();
        section.set_value("cutenessFactor", 9002_i32).unwrap();
        assert_eq!(section.value::<i32>("cutenessFactor"), Some(9002));
        assert_eq!(section.len(), 3);
        assert_eq!(section.variables().nth(1).unwrap().name(), "cutenessFactor");
    }

    #[test]
    fn test_set_value_appends_when_missing() {
        let mut section = chelsea();
        section.set_value("sleepy", true).unwrap();
        assert_eq!(section.len(), 4);
        assert_eq!(section.variables().last().unwrap().name(), "sleepy");
    }

    #[test]
    fn test_set_value_type_mismatch() {
        let mut section = chelsea();
        let err = section.set_value("cutenessFactor", 1.0_f32).unwrap_err();
        match err {
            ConfigError::TypeMismatch {
                expected, found, ..
            } => {
                assert_eq!(expected.as_str(), "f");
                assert_eq!(found.as_str(), "i");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(section.value::<i32>("cutenessFactor"), Some(9001));
    }

    #[test]
    fn test_remove_variable() {
        let mut section = chelsea();
        let removed = section.remove_variable("nickName").unwrap();
        assert_eq!(removed.value_as::<String>(), Some("Cutiemoo".to_string()));
        assert!(!section.contains("nickName"));
        assert!(section.remove_variable("nickName").is_none());
    }
}
