// SPDX-License-Identifier: MIT OR Apache-2.0

//! Bounded reads and atomic writes of configuration files.

use crate::domain::{ConfigError, Result};
use directories::ProjectDirs;
use std::ffi::OsString;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Default maximum size of a configuration file (10MB).
/// Larger files are refused rather than read into memory.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Reads and writes whole configuration files.
///
/// # Examples
///
/// ```rust
/// use tagcfg::adapters::FileStore;
///
/// let dir = tempfile::tempdir().unwrap();
/// let path = dir.path().join("game.cfg");
///
/// let store = FileStore::new();
/// store.write_atomic(&path, "[Chelsea]\n").unwrap();
/// assert_eq!(store.read(&path).unwrap(), "[Chelsea]\n");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FileStore {
    max_size: u64,
}

impl FileStore {
    /// Creates a store with the default size limit.
    pub fn new() -> Self {
        Self {
            max_size: DEFAULT_MAX_FILE_SIZE,
        }
    }

    /// Creates a store that refuses files larger than `max_size` bytes.
    pub fn with_max_size(max_size: u64) -> Self {
        Self { max_size }
    }

    /// Returns the size limit in bytes.
    pub fn max_size(&self) -> u64 {
        self.max_size
    }

    /// Reads the whole file at `path` as UTF-8.
    ///
    /// # Errors
    ///
    /// * [`ConfigError::FileTooLarge`] - The file exceeds the size limit
    /// * [`ConfigError::Io`] - The file could not be read
    pub fn read(&self, path: &Path) -> Result<String> {
        let metadata = fs::metadata(path).map_err(|e| ConfigError::io(path, e))?;
        if metadata.len() > self.max_size {
            return Err(ConfigError::FileTooLarge {
                path: path.to_path_buf(),
                size: metadata.len(),
                max: self.max_size,
            });
        }

        fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))
    }

    /// Replaces the file at `path` with `content`.
    ///
    /// The content goes to a temporary file next to the target first and is renamed
    /// over it once flushed, so readers see either the old file or the new one.
    /// The temporary file is removed if any step fails.
    pub fn write_atomic(&self, path: &Path, content: &str) -> Result<()> {
        let temp_path = temp_path_for(path);

        let result = write_synced(&temp_path, content).and_then(|()| fs::rename(&temp_path, path));
        if let Err(e) = result {
            let _ = fs::remove_file(&temp_path);
            return Err(ConfigError::io(path, e));
        }

        tracing::debug!("Wrote {} bytes to {}", content.len(), path.display());
        Ok(())
    }

    /// Returns the platform configuration path for an application's file.
    ///
    /// On Linux this is `$XDG_CONFIG_HOME/<application>/<file_name>`; other
    /// platforms follow their own conventions. The directory is not created.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use tagcfg::adapters::FileStore;
    ///
    /// let path = FileStore::default_path("com", "Example", "Moo", "settings.cfg").unwrap();
    /// assert!(path.ends_with("settings.cfg"));
    /// ```
    pub fn default_path(
        qualifier: &str,
        organization: &str,
        application: &str,
        file_name: &str,
    ) -> Result<PathBuf> {
        let dirs = ProjectDirs::from(qualifier, organization, application)
            .ok_or(ConfigError::NoPlatformConfigDir)?;
        Ok(dirs.config_dir().join(file_name))
    }
}

impl Default for FileStore {
    fn default() -> Self {
        Self::new()
    }
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("config"));
    name.push(".tmp");
    path.with_file_name(name)
}

fn write_synced(path: &Path, content: &str) -> std::io::Result<()> {
    let mut file = fs::File::create(path)?;
    file.write_all(content.as_bytes())?;
    file.sync_all()
}
