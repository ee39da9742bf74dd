// SPDX-License-Identifier: MIT OR Apache-2.0

//! The in-memory configuration file model.
//!
//! Persisting a [`ConfigFile`] is handled by
//! [`ConfigFile::save`](crate::domain::ConfigFile::save) and
//! [`ConfigFile::load`](crate::domain::ConfigFile::load), defined in the service layer.

use crate::domain::errors::{ConfigError, NameKind, Result};
use crate::domain::section::{validate_name, ConfigSection};

/// An ordered collection of uniquely named sections.
///
/// A `ConfigFile` holds no handle to the file it was loaded from or saved to;
/// every save or load opens and closes the file within the call.
///
/// # Examples
///
/// ```
/// use tagcfg::domain::{ConfigFile, ConfigSection};
///
/// # fn main() -> tagcfg::domain::Result<()> {
/// let mut file = ConfigFile::new();
/// file.add_section(ConfigSection::new("Graphics").with("vsync", true)?)?;
/// file.add_section(ConfigSection::new("Audio").with("volume", 0.8_f32)?)?;
///
/// let names: Vec<&str> = file.sections().map(|s| s.name()).collect();
/// assert_eq!(names, ["Graphics", "Audio"]);
/// assert_eq!(file.get_section("Audio").unwrap().value::<f32>("volume"), Some(0.8));
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConfigFile {
    sections: Vec<ConfigSection>,
}

impl ConfigFile {
    /// Creates an empty file.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a section, taking ownership of it.
    ///
    /// Fails with [`ConfigError::DuplicateName`] if a section with the same name
    /// exists, leaving the file unchanged.
    pub fn add_section(&mut self, section: ConfigSection) -> Result<()> {
        validate_name(NameKind::Section, section.name())?;
        if self.contains(section.name()) {
            return Err(ConfigError::DuplicateName {
                kind: NameKind::Section,
                name: section.name().to_string(),
            });
        }
        self.sections.push(section);
        Ok(())
    }

    /// Looks up a section by name.
    pub fn get_section(&self, name: &str) -> Option<&ConfigSection> {
        self.sections.iter().find(|s| s.name() == name)
    }

    /// Looks up a section by name for modification.
    pub fn get_section_mut(&mut self, name: &str) -> Option<&mut ConfigSection> {
        self.sections.iter_mut().find(|s| s.name() == name)
    }

    /// Returns the named section, appending an empty one if it does not exist.
    pub fn section_or_insert(&mut self, name: &str) -> Result<&mut ConfigSection> {
        let index = match self.sections.iter().position(|s| s.name() == name) {
            Some(index) => index,
            None => {
                self.add_section(ConfigSection::new(name))?;
                self.sections.len() - 1
            }
        };
        Ok(&mut self.sections[index])
    }

    /// Removes and returns the named section.
    pub fn remove_section(&mut self, name: &str) -> Option<ConfigSection> {
        let index = self.sections.iter().position(|s| s.name() == name)?;
        Some(self.sections.remove(index))
    }

    /// Renames a section in place, keeping its position.
    ///
    /// This is the only way to rename a section once it belongs to a file. Fails
    /// with [`ConfigError::InvalidName`] or [`ConfigError::DuplicateName`] if
    /// `new_name` is unusable or taken by another section. Returns `Ok(false)` if no
    /// section is called `old_name`.
    ///
    /// # Examples
    ///
    /// ```
    /// use tagcfg::domain::{ConfigFile, ConfigSection};
    ///
    /// let mut file = ConfigFile::new();
    /// file.add_section(ConfigSection::new("A")).unwrap();
    /// file.add_section(ConfigSection::new("B")).unwrap();
    ///
    /// assert!(file.rename_section("B", "A").is_err());
    /// assert!(file.rename_section("B", "Beta").unwrap());
    /// assert!(file.contains("A") && file.contains("Beta"));
    /// ```
    ///
    /// Sections borrowed from a file cannot be renamed directly:
    ///
    /// ```compile_fail
    /// use tagcfg::domain::{ConfigFile, ConfigSection};
    ///
    /// let mut file = ConfigFile::new();
    /// file.add_section(ConfigSection::new("B")).unwrap();
    /// file.get_section_mut("B").unwrap().set_name("A");
    /// ```
    pub fn rename_section(&mut self, old_name: &str, new_name: &str) -> Result<bool> {
        let Some(index) = self.sections.iter().position(|s| s.name() == old_name) else {
            return Ok(false);
        };
        validate_name(NameKind::Section, new_name)?;
        if old_name != new_name && self.contains(new_name) {
            return Err(ConfigError::DuplicateName {
                kind: NameKind::Section,
                name: new_name.to_string(),
            });
        }
        self.sections[index].set_name(new_name);
        Ok(true)
    }

    /// Returns `true` if a section with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.sections.iter().any(|s| s.name() == name)
    }

    /// Iterates over the sections in insertion order.
    pub fn sections(&self) -> impl Iterator<Item = &ConfigSection> {
        self.sections.iter()
    }

    /// Returns the number of sections.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Returns `true` if the file has no sections.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}
