//! Container input configuration

use std::path::PathBuf;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Parameters and service file handed to `create_container`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContainerConfig {
    /// Service-definition file; skipped when absent
    pub services_file: Option<PathBuf>,
    /// Initial container parameters
    pub parameters: IndexMap<String, Value>,
}
