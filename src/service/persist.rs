// SPDX-License-Identifier: MIT OR Apache-2.0

//! Saving and loading [`ConfigFile`]s.

use crate::adapters::{FileStore, TextFormat};
use crate::domain::{ConfigFile, LoadReport, Result};
use crate::ports::ConfigFormat;
use crate::service::registry::{self, CodecRegistry};
use std::path::Path;

impl ConfigFile {
    /// Writes the file to `path` in the text format, replacing any existing file.
    ///
    /// Sections and variables are written in insertion order. The text is fully
    /// rendered before anything touches the disk, and the target is replaced
    /// atomically.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tagcfg::domain::{ConfigFile, ConfigSection, Vec3};
    ///
    /// # fn main() -> tagcfg::domain::Result<()> {
    /// let dir = tempfile::tempdir().unwrap();
    /// let path = dir.path().join("chelsea.cfg");
    ///
    /// let mut file = ConfigFile::new();
    /// file.add_section(
    ///     ConfigSection::new("Chelsea")
    ///         .with("nickName", "Cutiemoo".to_string())?
    ///         .with("cutenessFactor", 9001_i32)?
    ///         .with("position", Vec3::new(34.0, 1.0, 700.0))?,
    /// )?;
    /// file.save(&path)?;
    ///
    /// let mut loaded = ConfigFile::new();
    /// let report = loaded.load(&path)?;
    /// assert!(report.is_clean());
    /// assert_eq!(loaded, file);
    /// # Ok(())
    /// # }
    /// ```
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        self.save_with(path, &TextFormat::new())
    }

    /// Writes the file to `path` using `format`.
    ///
    /// Read it back with [`load_with_format`](Self::load_with_format) or
    /// [`from_path_with`](Self::from_path_with) and the same format.
    pub fn save_with(&self, path: impl AsRef<Path>, format: &dyn ConfigFormat) -> Result<()> {
        let path = path.as_ref();
        match registry::installed() {
            Some(registry) => self.warn_unloadable_tags(registry),
            None => tracing::debug!("No codec registry installed yet; skipping tag check"),
        }

        let content = format.render(self);
        FileStore::new().write_atomic(path, &content)?;

        tracing::debug!("Saved {} section(s) to {}", self.len(), path.display());
        Ok(())
    }

    /// Replaces this file's contents with the file at `path`.
    ///
    /// Values are decoded with the [global registry](registry::global). Entries that
    /// fail to decode are skipped and listed in the returned [`LoadReport`]. A
    /// structural error or an I/O error leaves `self` untouched.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<LoadReport> {
        self.load_with(path, registry::global())
    }

    /// Like [`load`](Self::load), decoding values with `registry`.
    pub fn load_with(
        &mut self,
        path: impl AsRef<Path>,
        registry: &CodecRegistry,
    ) -> Result<LoadReport> {
        self.load_with_format(path, registry, &TextFormat::new())
    }

    /// Like [`load_with`](Self::load_with), parsing the file with `format`.
    pub fn load_with_format(
        &mut self,
        path: impl AsRef<Path>,
        registry: &CodecRegistry,
        format: &dyn ConfigFormat,
    ) -> Result<LoadReport> {
        let (file, report) = Self::from_path_with(path, registry, format)?;
        *self = file;
        Ok(report)
    }

    /// Loads a new file from `path` with the global registry.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use tagcfg::domain::ConfigFile;
    ///
    /// let (file, report) = ConfigFile::from_path("settings.cfg").unwrap();
    /// for failure in &report {
    ///     eprintln!("skipped {failure}");
    /// }
    /// println!("{} sections", file.len());
    /// ```
    pub fn from_path(path: impl AsRef<Path>) -> Result<(ConfigFile, LoadReport)> {
        Self::from_path_with(path, registry::global(), &TextFormat::new())
    }

    /// Loads a new file from `path`, parsing it with `format` and decoding values
    /// with `registry`.
    pub fn from_path_with(
        path: impl AsRef<Path>,
        registry: &CodecRegistry,
        format: &dyn ConfigFormat,
    ) -> Result<(ConfigFile, LoadReport)> {
        let path = path.as_ref();
        let content = FileStore::new().read(path)?;
        let (file, report) = format.parse(&content, registry)?;

        tracing::debug!(
            "Loaded {} section(s) from {} ({} entries skipped)",
            file.len(),
            path.display(),
            report.len()
        );
        Ok((file, report))
    }

    fn warn_unloadable_tags(&self, registry: &CodecRegistry) {
        for section in self.sections() {
            for variable in section.variables() {
                if !registry.contains(variable.type_tag().as_str()) {
                    tracing::warn!(
                        "Variable '{}' in section '{}' has tag '{}' with no registered codec; it will not load back",
                        variable.name(),
                        section.name(),
                        variable.type_tag()
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ConfigError, ConfigSection, DecodeError, Vec2};
    use std::fs;
    use tempfile::tempdir;

    fn sample() -> ConfigFile {
        let mut file = ConfigFile::new();
        file.add_section(
            ConfigSection::new("Video")
                .with("fullscreen", true)
                .unwrap()
                .with("gamma", 2.2_f32)
                .unwrap()
                .with("resolution", Vec2::new(1920.0, 1080.0))
                .unwrap(),
        )
        .unwrap();
        file.add_section(
            ConfigSection::new("Stats")
                .with("playTime", 1_234_567_890_123_i64)
                .unwrap()
                .with("ratio", 0.1_f64)
                .unwrap(),
        )
        .unwrap();
        file
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.cfg");

        let file = sample();
        file.save(&path).unwrap();

        let mut loaded = ConfigFile::new();
        assert!(loaded.load(&path).unwrap().is_clean());
        assert_eq!(loaded, file);
    }

    #[test]
    fn test_save_writes_canonical_text() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.cfg");

        sample().save(&path).unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "[Video]\n\
             fullscreen=b:true\n\
             gamma=f:2.2\n\
             resolution=v2:1920.0,1080.0\n\
             \n\
             [Stats]\n\
             playTime=l:1234567890123\n\
             ratio=d:0.1\n"
        );
    }

    #[test]
    fn test_load_replaces_existing_contents() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.cfg");
        fs::write(&path, "[Other]\nx=i:1\n").unwrap();

        let mut file = sample();
        file.load(&path).unwrap();
        assert_eq!(file.len(), 1);
        assert!(file.get_section("Video").is_none());
        assert_eq!(file.get_section("Other").unwrap().value::<i32>("x"), Some(1));
    }

    #[test]
    fn test_failed_load_leaves_file_untouched() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.cfg");
        fs::write(&path, "[A]\nx=i:1\n[A]\n").unwrap();

        let mut file = sample();
        assert!(matches!(
            file.load(&path),
            Err(ConfigError::DuplicateName { .. })
        ));
        assert_eq!(file, sample());

        let missing = dir.path().join("missing.cfg");
        assert!(matches!(file.load(&missing), Err(ConfigError::Io { .. })));
        assert_eq!(file, sample());
    }

    #[test]
    fn test_load_with_custom_registry() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.cfg");
        sample().save(&path).unwrap();

        let registry = CodecRegistry::new().with::<bool>().unwrap();
        let mut file = ConfigFile::new();
        let report = file.load_with(&path, &registry).unwrap();

        assert_eq!(report.len(), 4);
        assert!(report
            .failures()
            .iter()
            .all(|f| matches!(f.error, DecodeError::UnknownTypeTag { .. })));
        assert_eq!(
            file.get_section("Video").unwrap().value::<bool>("fullscreen"),
            Some(true)
        );
        assert!(file.get_section("Stats").unwrap().is_empty());
    }

    #[test]
    fn test_from_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.cfg");
        sample().save(&path).unwrap();

        let (file, report) = ConfigFile::from_path(&path).unwrap();
        assert!(report.is_clean());
        assert_eq!(file, sample());
    }

    #[test]
    fn test_save_with_format() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.cfg");

        sample().save_with(&path, &TextFormat::new()).unwrap();
        assert_eq!(ConfigFile::from_path(&path).unwrap().0, sample());
    }

    // Text format behind a magic first line
    struct Framed;

    impl ConfigFormat for Framed {
        fn parse(
            &self,
            content: &str,
            registry: &CodecRegistry,
        ) -> Result<(ConfigFile, LoadReport)> {
            let body = content
                .strip_prefix("TAGCFG 1\n")
                .ok_or_else(|| ConfigError::malformed(1, "missing TAGCFG header"))?;
            TextFormat::new().parse(body, registry)
        }

        fn render(&self, file: &ConfigFile) -> String {
            format!("TAGCFG 1\n{}", TextFormat::new().render(file))
        }

        fn supported_extensions(&self) -> &[&str] {
            &["tagcfg"]
        }
    }

    #[test]
    fn test_custom_format_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.tagcfg");
        let registry = CodecRegistry::with_builtins();

        sample().save_with(&path, &Framed).unwrap();
        assert!(fs::read_to_string(&path).unwrap().starts_with("TAGCFG 1\n"));

        let (file, report) = ConfigFile::from_path_with(&path, &registry, &Framed).unwrap();
        assert!(report.is_clean());
        assert_eq!(file, sample());

        let mut loaded = ConfigFile::new();
        loaded.load_with_format(&path, &registry, &Framed).unwrap();
        assert_eq!(loaded, sample());
    }

    #[test]
    fn test_format_mismatch_is_structural() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.cfg");
        sample().save(&path).unwrap();

        let mut file = sample();
        let result = file.load_with_format(&path, &CodecRegistry::with_builtins(), &Framed);
        assert!(matches!(result, Err(ConfigError::MalformedFile { line: 1, .. })));
        assert_eq!(file, sample());
    }

    #[test]
    fn test_save_empty_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.cfg");

        ConfigFile::new().save(&path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "");
        assert!(ConfigFile::from_path(&path).unwrap().0.is_empty());
    }
}
