// Shared test helpers for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::Path;
use tempfile::{tempdir, TempDir};
use test_dispatch::models::Manifest;

/// Creates an empty project directory with the given `package.json` content.
pub fn setup_project(package_json: &str) -> TempDir {
    let temp_dir = tempdir().expect("Failed to create temporary directory");
    fs::write(temp_dir.path().join("package.json"), package_json)
        .expect("Failed to write package.json");
    temp_dir
}

/// Adds an empty file (typically a lock file) to the project.
pub fn touch(project: &TempDir, relative: &str) {
    let path = project.path().join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create parent directory");
    }
    fs::write(path, "").expect("Failed to create file");
}

/// Writes a `TestDispatch.toml` into the project.
pub fn write_config(project: &TempDir, content: &str) {
    fs::write(project.path().join("TestDispatch.toml"), content)
        .expect("Failed to write TestDispatch.toml");
}

/// Parses a `package.json` literal used by unit tests.
pub fn manifest(json: &str) -> Manifest {
    serde_json::from_str(json).expect("test manifest must be valid JSON")
}

/// Canonical form of a path, for comparisons against located roots.
pub fn canonical(path: &Path) -> std::path::PathBuf {
    fs::canonicalize(path).expect("path must exist")
}
