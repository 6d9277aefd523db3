//! Bootstrap configuration types

use serde::{Deserialize, Serialize};

/// Registration manifests to apply to the factory
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BootstrapConfig {
    /// Glob patterns of YAML manifests naming extensions and compiler passes
    pub manifests: Vec<String>,
}
