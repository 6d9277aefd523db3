//! Loads configured extensions into the container

use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use crate::container::Container;
use crate::error::Result;
use crate::ports::{CompilerPass, Extension};

/// Loads every extension that received configuration, in registration order
///
/// Parameters present before the extensions load take precedence over
/// anything an extension sets under the same name.
#[derive(Debug, Default, Clone, Copy)]
pub struct MergeExtensionConfigurationPass;

impl CompilerPass for MergeExtensionConfigurationPass {
    fn id(&self) -> &str {
        "merge_extension_configuration"
    }

    fn process(&self, container: &mut Container) -> Result<()> {
        let configured: Vec<(Arc<dyn Extension>, Vec<Value>)> = container
            .extensions()
            .iter()
            .filter_map(|(alias, extension)| {
                let configs = container.extension_config(alias);
                (!configs.is_empty()).then(|| (Arc::clone(extension), configs.to_vec()))
            })
            .collect();

        if configured.is_empty() {
            return Ok(());
        }

        let existing = container.parameters().all().clone();
        for (extension, configs) in configured {
            debug!(
                alias = extension.alias(),
                namespace = extension.namespace().unwrap_or_default(),
                blocks = configs.len(),
                "Loading extension configuration"
            );
            extension.load(&configs, container)?;
        }
        container.parameters_mut()?.add(existing);
        Ok(())
    }
}
