//! Compiled-artifact scanning and module-name mapping.

use crate::result::CubrirResult;
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// Logical module identifier, derived from an artifact's file stem.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ModuleName(String);

impl ModuleName {
    /// Create a module name
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The name as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModuleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ModuleName {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

/// A compiled artifact in the output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactRef {
    path: PathBuf,
}

impl ArtifactRef {
    /// Wrap an artifact path
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path to the artifact file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Logical module the artifact maps back to (file stem, no extension)
    #[must_use]
    pub fn module_name(&self) -> ModuleName {
        let stem = self
            .path
            .file_stem()
            .map_or_else(String::new, |s| s.to_string_lossy().into_owned());
        ModuleName(stem)
    }
}

/// Recursively collect files under `dir` whose names match `pattern`.
///
/// A missing directory yields an empty list; discovering zero test sources
/// is a valid outcome, not an error.
#[must_use]
pub fn find_files(dir: &Path, pattern: &Regex) -> Vec<PathBuf> {
    let mut found = Vec::new();
    collect_files(dir, pattern, &mut found);
    found.sort();
    found
}

fn collect_files(dir: &Path, pattern: &Regex, found: &mut Vec<PathBuf>) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_files(&path, pattern, found);
        } else if let Some(name) = path.file_name().map(|n| n.to_string_lossy().into_owned()) {
            if pattern.is_match(&name) {
                found.push(path);
            }
        }
    }
}

/// List compiled artifacts in the output directory by extension.
///
/// Non-recursive: the harness compiles everything into a flat output
/// directory.
///
/// # Errors
///
/// Returns an error if the output directory cannot be read.
pub fn scan_artifacts(out_dir: &Path, ext: &str) -> CubrirResult<Vec<ArtifactRef>> {
    let mut artifacts = Vec::new();
    for entry in std::fs::read_dir(out_dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|e| e == ext) {
            artifacts.push(ArtifactRef::new(path));
        }
    }
    artifacts.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(artifacts)
}
