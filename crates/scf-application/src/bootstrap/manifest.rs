//! YAML registration manifests
//!
//! ```yaml
//! extensions:
//!   - service_files
//!   - { name: dummy, replace: true }
//! compiler_passes:
//!   - { name: report_tags, phase: optimization }
//! ```

use std::fs;
use std::path::Path;

use scf_domain::PassPhase;
use scf_domain::error::{Error, Result};
use serde::Deserialize;

/// Catalog names to register on a factory
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BootstrapManifest {
    /// Extensions, in registration order
    #[serde(default)]
    pub extensions: Vec<ManifestEntry>,
    /// Compiler passes, in registration order
    #[serde(default)]
    pub compiler_passes: Vec<ManifestEntry>,
}

/// One manifest line: a bare name or a name with options
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ManifestEntry {
    /// Register with defaults
    Name(String),
    /// Register with options
    Detailed(DetailedEntry),
}

/// Manifest line with options; unknown keys are rejected
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DetailedEntry {
    /// Catalog name
    pub name: String,
    /// Replace instead of failing on a duplicate
    #[serde(default)]
    pub replace: bool,
    /// Compiler pass phase overriding the catalog default
    #[serde(default)]
    pub phase: Option<PassPhase>,
}

impl ManifestEntry {
    /// Catalog name
    pub fn name(&self) -> &str {
        match self {
            Self::Name(name) | Self::Detailed(DetailedEntry { name, .. }) => name,
        }
    }

    /// Whether an existing registration is replaced
    pub fn replace(&self) -> bool {
        matches!(self, Self::Detailed(DetailedEntry { replace: true, .. }))
    }

    /// Explicit phase, if any
    pub fn phase(&self) -> Option<PassPhase> {
        match self {
            Self::Name(_) => None,
            Self::Detailed(entry) => entry.phase,
        }
    }
}

impl BootstrapManifest {
    /// Parse a manifest; a document without content is an empty manifest
    pub fn parse(source: &str) -> Result<Self> {
        let blank = source.lines().all(|line| {
            let line = line.trim();
            line.is_empty() || line.starts_with('#')
        });
        if blank {
            return Ok(Self::default());
        }
        let manifest: Option<Self> = serde_yaml::from_str(source).map_err(|e| {
            Error::configuration_with_source("Invalid bootstrap manifest", e)
        })?;
        Ok(manifest.unwrap_or_default())
    }

    /// Read and parse a manifest file
    pub fn from_path(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path)
            .map_err(|e| Error::io_with_source(format!("Failed to read {}", path.display()), e))?;
        Self::parse(&source).map_err(|e| match e {
            Error::Configuration { message, source } => Error::Configuration {
                message: format!("{message} in {}", path.display()),
                source,
            },
            other => other,
        })
    }
}
