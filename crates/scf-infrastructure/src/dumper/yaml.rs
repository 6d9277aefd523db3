//! YAML container dumper
//!
//! Dumps are sorted by key so that the same container always renders to
//! the same bytes. Arguments carry YAML tags (`!value`, `!reference`, ...)
//! so they restore to exactly what was dumped.

use std::collections::BTreeMap;
use std::path::PathBuf;

use indexmap::IndexMap;
use scf_domain::error::{Error, Result};
use scf_domain::ports::{ContainerDumper, DumpOptions};
use scf_domain::{
    Alias, Argument, Container, Definition, InvalidBehavior, MethodCall, Reference, TagAttributes,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::constants::{DUMP_FILE_EXTENSION, DUMP_HEADER};
use crate::error_ext::ErrorContext;

/// Renders compiled containers as YAML and reads them back
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlDumper;

impl YamlDumper {
    /// Create a dumper
    pub fn new() -> Self {
        Self
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct DumpedContainer {
    class: String,
    #[serde(default)]
    parameters: BTreeMap<String, Value>,
    #[serde(default)]
    services: BTreeMap<String, DumpedService>,
    #[serde(default)]
    aliases: BTreeMap<String, DumpedAlias>,
    #[serde(default)]
    resources: Vec<PathBuf>,
}

#[derive(Debug, Serialize, Deserialize)]
struct DumpedService {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    class: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    arguments: Vec<DumpedArgument>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    calls: Vec<DumpedCall>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    tags: IndexMap<String, Vec<TagAttributes>>,
    public: bool,
    shared: bool,
}

#[derive(Debug, Serialize, Deserialize)]
struct DumpedCall {
    method: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    arguments: Vec<DumpedArgument>,
}

#[derive(Debug, Serialize, Deserialize)]
struct DumpedAlias {
    target: String,
    public: bool,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
enum DumpedArgument {
    Value(Value),
    Reference(String),
    NullOnInvalid(String),
    IgnoreOnInvalid(String),
    List(Vec<DumpedArgument>),
    Map(IndexMap<String, DumpedArgument>),
}

impl From<&Argument> for DumpedArgument {
    fn from(argument: &Argument) -> Self {
        match argument {
            Argument::Value(value) => Self::Value(value.clone()),
            Argument::Reference(reference) => {
                let id = reference.id.clone();
                match reference.on_invalid {
                    InvalidBehavior::Exception => Self::Reference(id),
                    InvalidBehavior::Null => Self::NullOnInvalid(id),
                    InvalidBehavior::Ignore => Self::IgnoreOnInvalid(id),
                }
            }
            Argument::List(items) => Self::List(items.iter().map(Self::from).collect()),
            Argument::Map(items) => Self::Map(
                items
                    .iter()
                    .map(|(key, item)| (key.clone(), Self::from(item)))
                    .collect(),
            ),
        }
    }
}

impl From<DumpedArgument> for Argument {
    fn from(argument: DumpedArgument) -> Self {
        match argument {
            DumpedArgument::Value(value) => Self::Value(value),
            DumpedArgument::Reference(id) => Self::Reference(Reference::new(id)),
            DumpedArgument::NullOnInvalid(id) => {
                Self::Reference(Reference::new(id).with_on_invalid(InvalidBehavior::Null))
            }
            DumpedArgument::IgnoreOnInvalid(id) => Self::Reference(Reference::optional(id)),
            DumpedArgument::List(items) => Self::List(items.into_iter().map(Self::from).collect()),
            DumpedArgument::Map(items) => Self::Map(
                items
                    .into_iter()
                    .map(|(key, item)| (key, Self::from(item)))
                    .collect(),
            ),
        }
    }
}

impl From<&Definition> for DumpedService {
    fn from(definition: &Definition) -> Self {
        Self {
            class: definition.class.clone(),
            arguments: definition.arguments.iter().map(DumpedArgument::from).collect(),
            calls: definition
                .calls
                .iter()
                .map(|call| DumpedCall {
                    method: call.method.clone(),
                    arguments: call.arguments.iter().map(DumpedArgument::from).collect(),
                })
                .collect(),
            tags: definition.tags.clone(),
            public: definition.public,
            shared: definition.shared,
        }
    }
}

impl From<DumpedService> for Definition {
    fn from(service: DumpedService) -> Self {
        Self {
            class: service.class,
            arguments: service.arguments.into_iter().map(Argument::from).collect(),
            calls: service
                .calls
                .into_iter()
                .map(|call| {
                    MethodCall::new(
                        call.method,
                        call.arguments.into_iter().map(Argument::from).collect(),
                    )
                })
                .collect(),
            tags: service.tags,
            public: service.public,
            shared: service.shared,
        }
    }
}

impl ContainerDumper for YamlDumper {
    fn file_extension(&self) -> &str {
        DUMP_FILE_EXTENSION
    }

    fn dump(&self, container: &Container, options: &DumpOptions) -> Result<String> {
        if !container.is_compiled() {
            return Err(Error::dump(
                "Cannot dump an uncompiled container, compile it first",
            ));
        }

        let dumped = DumpedContainer {
            class: options.class_name.clone(),
            parameters: container
                .parameters()
                .all()
                .iter()
                .map(|(name, value)| (name.clone(), value.clone()))
                .collect(),
            services: container
                .definitions()
                .iter()
                .map(|(id, definition)| (id.clone(), DumpedService::from(definition)))
                .collect(),
            aliases: container
                .aliases()
                .iter()
                .map(|(id, alias)| {
                    let dumped = DumpedAlias {
                        target: alias.target.clone(),
                        public: alias.public,
                    };
                    (id.clone(), dumped)
                })
                .collect(),
            resources: container.resources().to_vec(),
        };

        let body = serde_yaml::to_string(&dumped).dump_context("Failed to render container")?;
        debug!(
            class = %options.class_name,
            services = dumped.services.len(),
            "Rendered container"
        );
        Ok(format!("{DUMP_HEADER}\n{body}"))
    }

    fn restore(&self, source: &str) -> Result<Container> {
        let dumped: DumpedContainer =
            serde_yaml::from_str(source).dump_context("Failed to parse dumped container")?;

        let parameters = dumped.parameters.into_iter().collect();
        let definitions = dumped
            .services
            .into_iter()
            .map(|(id, service)| (id, Definition::from(service)))
            .collect();
        let aliases = dumped
            .aliases
            .into_iter()
            .map(|(id, alias)| (id, Alias::new(alias.target).with_public(alias.public)))
            .collect();

        debug!(class = %dumped.class, "Restored container from dump");
        Ok(Container::restore(
            parameters,
            definitions,
            aliases,
            dumped.resources,
        ))
    }
}
