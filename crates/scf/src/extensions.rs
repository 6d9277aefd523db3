//! Built-in extensions and compiler passes
//!
//! Both are registered in the bootstrap catalogs, so manifests can name
//! them as `service_files` and `report_tags`.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use scf_application::bootstrap::{COMPILER_PASSES, CompilerPassEntry, EXTENSIONS, ExtensionEntry};
use scf_domain::error::{Error, Result};
use scf_domain::ports::{CompilerPass, Extension, ServiceFileLoader};
use scf_domain::{Container, PassPhase};
use scf_infrastructure::YamlFileLoader;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};

/// Alias of [`ServiceFilesExtension`]
pub const SERVICE_FILES_ALIAS: &str = "service_files";

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ServiceFilesConfig {
    #[serde(default)]
    resources: Vec<PathBuf>,
}

/// Loads the YAML service files listed in its configuration
///
/// ```yaml
/// service_files:
///   resources: [config/mailer.yml, config/logging.yml]
/// ```
///
/// Relative paths resolve against the base directory, the working
/// directory by default. Every configuration block is loaded in order.
#[derive(Debug, Default)]
pub struct ServiceFilesExtension {
    base_dir: Option<PathBuf>,
    loader: YamlFileLoader,
}

impl ServiceFilesExtension {
    /// Resolve relative resources against the working directory
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve relative resources against a directory
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: Some(base_dir.into()),
            loader: YamlFileLoader::new(),
        }
    }

    fn resolve(&self, resource: &Path) -> PathBuf {
        match &self.base_dir {
            Some(base) if resource.is_relative() => base.join(resource),
            _ => resource.to_path_buf(),
        }
    }
}

impl Extension for ServiceFilesExtension {
    fn alias(&self) -> &str {
        SERVICE_FILES_ALIAS
    }

    fn load(&self, configs: &[Value], container: &mut Container) -> Result<()> {
        for config in configs {
            let config: ServiceFilesConfig = serde_json::from_value(config.clone())?;
            for resource in &config.resources {
                let path = self.resolve(resource);
                if !self.loader.supports(&path) {
                    return Err(Error::loader(path, "Only YAML service files are supported"));
                }
                debug!(file = %path.display(), "Loading service file from extension");
                self.loader.load(&path, container)?;
            }
        }
        Ok(())
    }
}

/// Logs every tag in use with the services carrying it
#[derive(Debug, Default)]
pub struct ReportTagsPass;

impl CompilerPass for ReportTagsPass {
    fn id(&self) -> &str {
        "report_tags"
    }

    fn process(&self, container: &mut Container) -> Result<()> {
        for tag in container.find_tags() {
            let ids: Vec<String> = container.find_tagged_service_ids(&tag).into_keys().collect();
            info!(tag = %tag, services = ?ids, "Tagged services");
        }
        Ok(())
    }
}

fn service_files_extension() -> Arc<dyn Extension> {
    Arc::new(ServiceFilesExtension::new())
}

fn report_tags_pass() -> Arc<dyn CompilerPass> {
    Arc::new(ReportTagsPass)
}

#[linkme::distributed_slice(EXTENSIONS)]
static SERVICE_FILES: ExtensionEntry = ExtensionEntry {
    name: SERVICE_FILES_ALIAS,
    description: "Loads the YAML service files listed under `resources`",
    factory: service_files_extension,
};

#[linkme::distributed_slice(COMPILER_PASSES)]
static REPORT_TAGS: CompilerPassEntry = CompilerPassEntry {
    name: "report_tags",
    description: "Logs tagged services once the container is final",
    default_phase: PassPhase::AfterRemoving,
    factory: report_tags_pass,
};
