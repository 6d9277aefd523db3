//! Main application configuration

use serde::{Deserialize, Serialize};

use super::{BootstrapConfig, CacheConfig, ContainerConfig, LoggingConfig};

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Registration manifests applied before the container is built
    #[serde(default)]
    pub bootstrap: BootstrapConfig,
    /// Inputs of `create_container`
    #[serde(default)]
    pub container: ContainerConfig,
    /// Compiled container cache
    #[serde(default)]
    pub cache: CacheConfig,
}
