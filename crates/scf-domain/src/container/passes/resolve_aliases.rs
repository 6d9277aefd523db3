//! Points references at definitions instead of aliases

use std::collections::HashMap;

use crate::container::Container;
use crate::error::Result;
use crate::ports::CompilerPass;
use crate::value_objects::Alias;

/// Rewrites references and alias targets to the final definition id
#[derive(Debug, Default, Clone, Copy)]
pub struct ResolveReferencesToAliasesPass;

impl CompilerPass for ResolveReferencesToAliasesPass {
    fn id(&self) -> &str {
        "resolve_references_to_aliases"
    }

    fn process(&self, container: &mut Container) -> Result<()> {
        let mut targets: HashMap<String, String> = HashMap::new();
        for id in container.aliases().keys() {
            targets.insert(id.clone(), container.resolve_alias(id)?);
        }
        if targets.is_empty() {
            return Ok(());
        }

        let aliases: Vec<(String, Alias)> = container
            .aliases()
            .iter()
            .map(|(id, alias)| (id.clone(), alias.clone()))
            .collect();
        for (id, alias) in aliases {
            if let Some(target) = targets.get(&id) {
                if *target != alias.target {
                    container.set_alias(id, Alias::new(target.clone()).with_public(alias.public))?;
                }
            }
        }

        let ids: Vec<String> = container.definitions().keys().cloned().collect();
        for id in ids {
            if let Some(definition) = container.definition_mut(&id) {
                definition.for_each_reference_mut(&mut |reference| {
                    if let Some(target) = targets.get(&reference.id) {
                        reference.id.clone_from(target);
                    }
                });
            }
        }
        Ok(())
    }
}
