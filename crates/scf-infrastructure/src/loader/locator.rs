//! Resource location

use std::path::{Path, PathBuf};

use scf_domain::error::{Error, Result};

/// Resolves resource names against a list of base directories
///
/// Absolute names are returned as-is when they exist. Relative names are
/// tried against the current directory passed to [`FileLocator::locate`]
/// first, then against each configured path in order.
#[derive(Debug, Clone, Default)]
pub struct FileLocator {
    paths: Vec<PathBuf>,
}

impl FileLocator {
    /// Create a locator without extra search paths
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a directory to search after the current one
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.paths.push(path.into());
        self
    }

    /// Configured search paths
    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    /// Find a resource, returning its canonical path
    pub fn locate(&self, name: &str, current_dir: Option<&Path>) -> Result<PathBuf> {
        if name.is_empty() {
            return Err(Error::invalid_argument("An empty file name is not valid"));
        }

        let candidate = Path::new(name);
        if candidate.is_absolute() {
            return canonical_file(candidate)
                .ok_or_else(|| Error::not_found(format!("The file \"{name}\" does not exist")));
        }

        current_dir
            .into_iter()
            .chain(self.paths.iter().map(PathBuf::as_path))
            .find_map(|dir| canonical_file(&dir.join(candidate)))
            .ok_or_else(|| {
                let searched: Vec<String> = current_dir
                    .into_iter()
                    .chain(self.paths.iter().map(PathBuf::as_path))
                    .map(|dir| dir.display().to_string())
                    .collect();
                Error::not_found(format!(
                    "The file \"{name}\" does not exist (in: {})",
                    searched.join(", ")
                ))
            })
    }
}

fn canonical_file(path: &Path) -> Option<PathBuf> {
    path.is_file()
        .then(|| path.canonicalize().ok())
        .flatten()
}
