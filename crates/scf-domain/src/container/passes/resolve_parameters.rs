//! Replaces `%parameter%` placeholders

use crate::container::Container;
use crate::error::{Error, Result};
use crate::ports::CompilerPass;
use crate::value_objects::{Argument, Definition, ParameterBag};

/// Resolves the parameter bag, then placeholders in class names,
/// constructor arguments and method-call arguments
#[derive(Debug, Default, Clone, Copy)]
pub struct ResolveParameterPlaceholdersPass;

impl CompilerPass for ResolveParameterPlaceholdersPass {
    fn id(&self) -> &str {
        "resolve_parameter_placeholders"
    }

    fn process(&self, container: &mut Container) -> Result<()> {
        container.parameters_mut()?.resolve()?;
        let bag = container.parameters().clone();

        let ids: Vec<String> = container.definitions().keys().cloned().collect();
        for id in ids {
            let Some(definition) = container.definition_mut(&id) else {
                continue;
            };
            resolve_definition(&bag, definition).map_err(|err| attribute_to(err, &id))?;
        }
        Ok(())
    }
}

fn resolve_definition(bag: &ParameterBag, definition: &mut Definition) -> Result<()> {
    if let Some(class) = &definition.class {
        definition.class = Some(match bag.resolve_string(class)? {
            serde_json::Value::String(s) => s,
            other => other.to_string(),
        });
    }
    for argument in &mut definition.arguments {
        *argument = resolve_argument(bag, argument)?;
    }
    for call in &mut definition.calls {
        for argument in &mut call.arguments {
            *argument = resolve_argument(bag, argument)?;
        }
    }
    Ok(())
}

fn resolve_argument(bag: &ParameterBag, argument: &Argument) -> Result<Argument> {
    Ok(match argument {
        Argument::Value(value) => Argument::Value(bag.resolve_value(value)?),
        Argument::Reference(reference) => Argument::Reference(reference.clone()),
        Argument::List(items) => Argument::List(
            items
                .iter()
                .map(|item| resolve_argument(bag, item))
                .collect::<Result<_>>()?,
        ),
        Argument::Map(items) => Argument::Map(
            items
                .iter()
                .map(|(key, item)| -> Result<(String, Argument)> {
                    Ok((key.clone(), resolve_argument(bag, item)?))
                })
                .collect::<Result<_>>()?,
        ),
    })
}

fn attribute_to(err: Error, service_id: &str) -> Error {
    match err {
        Error::ParameterNotFound {
            name,
            referenced_by: None,
        } => Error::parameter_not_found(name, Some(service_id.to_string())),
        other => other,
    }
}
