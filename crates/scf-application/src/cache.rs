//! Compiled container cache
//!
//! A cache entry is the file a [`ContainerDumper`] wrote for a class name.
//! It is fresh while it exists and none of the resources recorded in it
//! was removed or modified after it was written.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use scf_domain::Container;
use scf_domain::error::{Error, Result};
use scf_domain::ports::ContainerDumper;
use tracing::{debug, warn};

/// Location and reader of one dumped container
#[derive(Clone)]
pub struct ContainerCache {
    directory: PathBuf,
    class_name: String,
    dumper: Arc<dyn ContainerDumper>,
}

impl fmt::Debug for ContainerCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContainerCache")
            .field("directory", &self.directory)
            .field("class_name", &self.class_name)
            .finish_non_exhaustive()
    }
}

impl ContainerCache {
    /// Create a cache for `{directory}/{class_name}.{dumper extension}`
    pub fn new(
        directory: impl Into<PathBuf>,
        class_name: impl Into<String>,
        dumper: Arc<dyn ContainerDumper>,
    ) -> Self {
        Self {
            directory: directory.into(),
            class_name: class_name.into(),
            dumper,
        }
    }

    /// Directory dumps are written to
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Class name of the dumped container
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// Path of the cache file
    pub fn path(&self) -> PathBuf {
        self.directory
            .join(format!("{}.{}", self.class_name, self.dumper.file_extension()))
    }

    /// Whether a usable dump exists
    pub fn is_fresh(&self) -> Result<bool> {
        Ok(self.load()?.is_some())
    }

    /// The cached container, or `None` when it is missing or stale
    ///
    /// A dump that can no longer be read back counts as stale.
    pub fn load(&self) -> Result<Option<Container>> {
        let path = self.path();
        let Some(written) = modified(&path)? else {
            debug!(path = %path.display(), "No cached container");
            return Ok(None);
        };

        let source = fs::read_to_string(&path)
            .map_err(|e| Error::io_with_source(format!("Failed to read {}", path.display()), e))?;
        let container = match self.dumper.restore(&source) {
            Ok(container) => container,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Cached container is unreadable, ignoring it");
                return Ok(None);
            }
        };

        for resource in container.resources() {
            match modified(resource)? {
                Some(changed) if changed <= written => {}
                Some(_) => {
                    debug!(resource = %resource.display(), "Resource changed since dump, cache is stale");
                    return Ok(None);
                }
                None => {
                    debug!(resource = %resource.display(), "Resource removed since dump, cache is stale");
                    return Ok(None);
                }
            }
        }
        Ok(Some(container))
    }
}

fn modified(path: &Path) -> Result<Option<SystemTime>> {
    match fs::metadata(path) {
        Ok(metadata) => metadata
            .modified()
            .map(Some)
            .map_err(|e| Error::io_with_source(format!("Failed to stat {}", path.display()), e)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(Error::io_with_source(
            format!("Failed to stat {}", path.display()),
            e,
        )),
    }
}
