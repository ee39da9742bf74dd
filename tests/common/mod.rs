// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared fixtures for integration tests.

use std::path::PathBuf;
use tagcfg::domain::{ConfigFile, ConfigSection, Vec3};
use tempfile::TempDir;

/// Routes `tracing` output to the test harness. Safe to call from every test.
#[allow(dead_code)]
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// Creates a scratch directory and a path for `file_name` inside it.
///
/// The directory is deleted when the returned `TempDir` is dropped.
#[allow(dead_code)]
pub fn scratch_path(file_name: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(file_name);
    (dir, path)
}

/// The `Chelsea` section every scenario starts from.
#[allow(dead_code)]
pub fn chelsea_section() -> ConfigSection {
    ConfigSection::new("Chelsea")
        .with("nickName", "Cutiemoo".to_string())
        .unwrap()
        .with("cutenessFactor", 9001_i32)
        .unwrap()
        .with("position", Vec3::new(34.0, 1.0, 700.0))
        .unwrap()
}

/// A file holding only [`chelsea_section`].
#[allow(dead_code)]
pub fn chelsea_file() -> ConfigFile {
    let mut file = ConfigFile::new();
    file.add_section(chelsea_section()).unwrap();
    file
}
