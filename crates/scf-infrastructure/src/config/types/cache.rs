//! Container cache configuration types

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_CACHE_DIR, DEFAULT_CONTAINER_CLASS};

/// Where and under which name compiled containers are dumped
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Reuse a fresh dump instead of rebuilding
    pub enabled: bool,
    /// Dump directory; must exist when dumping
    pub directory: PathBuf,
    /// Class name of the dumped container
    pub class_name: String,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            directory: PathBuf::from(DEFAULT_CACHE_DIR),
            class_name: DEFAULT_CONTAINER_CLASS.to_string(),
        }
    }
}
