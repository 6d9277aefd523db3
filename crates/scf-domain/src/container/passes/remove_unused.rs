//! Removes private aliases and unreferenced private services

use std::collections::HashSet;

use tracing::debug;

use crate::container::Container;
use crate::error::Result;
use crate::ports::CompilerPass;

/// Drops aliases that are not public
#[derive(Debug, Default, Clone, Copy)]
pub struct RemovePrivateAliasesPass;

impl CompilerPass for RemovePrivateAliasesPass {
    fn id(&self) -> &str {
        "remove_private_aliases"
    }

    fn process(&self, container: &mut Container) -> Result<()> {
        let private: Vec<String> = container
            .aliases()
            .iter()
            .filter(|(_, alias)| !alias.public)
            .map(|(id, _)| id.clone())
            .collect();
        for id in private {
            debug!(alias = %id, "Removing private alias");
            container.remove_alias(&id)?;
        }
        Ok(())
    }
}

/// Drops private definitions nothing refers to, until none is left
#[derive(Debug, Default, Clone, Copy)]
pub struct RemoveUnusedDefinitionsPass;

impl CompilerPass for RemoveUnusedDefinitionsPass {
    fn id(&self) -> &str {
        "remove_unused_definitions"
    }

    fn process(&self, container: &mut Container) -> Result<()> {
        loop {
            let mut referenced: HashSet<String> = container
                .aliases()
                .values()
                .map(|alias| alias.target.clone())
                .collect();
            for definition in container.definitions().values() {
                referenced.extend(definition.references().into_iter().map(|r| r.id.clone()));
            }

            let unused: Vec<String> = container
                .definitions()
                .iter()
                .filter(|(id, definition)| !definition.public && !referenced.contains(*id))
                .map(|(id, _)| id.clone())
                .collect();
            if unused.is_empty() {
                return Ok(());
            }
            for id in unused {
                debug!(service = %id, "Removing unused private service");
                container.remove_definition(&id)?;
            }
        }
    }
}
