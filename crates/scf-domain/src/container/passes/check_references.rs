//! Validates references and applies their invalid behaviour

use std::collections::HashSet;

use serde_json::Value;

use crate::container::Container;
use crate::error::{Error, Result};
use crate::ports::CompilerPass;
use crate::value_objects::{Argument, InvalidBehavior, MethodCall};

/// Fails on strict references to missing services; nulls or drops the
/// lenient ones
///
/// A missing `Ignore` reference becomes `null` in argument position, is
/// dropped from lists and maps, and removes the whole method call it
/// appears in.
#[derive(Debug, Default, Clone, Copy)]
pub struct CheckReferencesPass;

impl CompilerPass for CheckReferencesPass {
    fn id(&self) -> &str {
        "check_references"
    }

    fn process(&self, container: &mut Container) -> Result<()> {
        let known: HashSet<String> = container
            .definitions()
            .keys()
            .chain(container.aliases().keys())
            .cloned()
            .collect();

        for (alias, target) in container.aliases() {
            let resolved = container.resolve_alias(&target.target)?;
            if !container.has_definition(&resolved) {
                return Err(Error::service_not_found(resolved, Some(alias.clone())));
            }
        }

        let ids: Vec<String> = container.definitions().keys().cloned().collect();
        for id in ids {
            let Some(definition) = container.definition_mut(&id) else {
                continue;
            };

            let arguments = std::mem::take(&mut definition.arguments);
            definition.arguments = arguments
                .into_iter()
                .map(|argument| -> Result<Argument> {
                    Ok(check(argument, &known, &id)?.unwrap_or(Argument::Value(Value::Null)))
                })
                .collect::<Result<_>>()?;

            let calls = std::mem::take(&mut definition.calls);
            let mut kept = Vec::with_capacity(calls.len());
            'calls: for call in calls {
                let mut arguments = Vec::with_capacity(call.arguments.len());
                for argument in call.arguments {
                    match check(argument, &known, &id)? {
                        Some(argument) => arguments.push(argument),
                        None => continue 'calls,
                    }
                }
                kept.push(MethodCall::new(call.method, arguments));
            }
            definition.calls = kept;
        }
        Ok(())
    }
}

/// `None` means the argument must be dropped
fn check(argument: Argument, known: &HashSet<String>, service_id: &str) -> Result<Option<Argument>> {
    match argument {
        Argument::Reference(reference) if !known.contains(&reference.id) => {
            match reference.on_invalid {
                InvalidBehavior::Exception => Err(Error::service_not_found(
                    reference.id,
                    Some(service_id.to_string()),
                )),
                InvalidBehavior::Null => Ok(Some(Argument::Value(Value::Null))),
                InvalidBehavior::Ignore => Ok(None),
            }
        }
        Argument::List(items) => {
            let mut kept = Vec::with_capacity(items.len());
            for item in items {
                if let Some(item) = check(item, known, service_id)? {
                    kept.push(item);
                }
            }
            Ok(Some(Argument::List(kept)))
        }
        Argument::Map(items) => {
            let mut kept = indexmap::IndexMap::with_capacity(items.len());
            for (key, item) in items {
                if let Some(item) = check(item, known, service_id)? {
                    kept.insert(key, item);
                }
            }
            Ok(Some(Argument::Map(kept)))
        }
        other => Ok(Some(other)),
    }
}
