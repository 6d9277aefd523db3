//! YAML service-definition loader
//!
//! ```yaml
//! imports:
//!   - { resource: common.yml, ignore_errors: false }
//! parameters:
//!   mailer.transport: smtp
//! services:
//!   mailer:
//!     class: App\Mailer
//!     arguments: ['%mailer.transport%', '@logger', '@?metrics']
//!     calls:
//!       - [setLogger, ['@logger']]
//!     tags:
//!       - { name: mailer.transport, priority: 10 }
//!       - plain_tag
//!   logger: ~
//!   app.mailer: '@mailer'
//! dummy: { enabled: true }
//! ```
//!
//! Top-level keys other than `imports`, `parameters` and `services` are
//! handed to the extension registered under that alias.

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use scf_domain::error::{Error, Result};
use scf_domain::ports::ServiceFileLoader;
use scf_domain::{Alias, Argument, Container, Definition, MethodCall, Reference, TagAttributes};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::FileLocator;
use crate::constants::{OPTIONAL_REFERENCE_PREFIX, REFERENCE_PREFIX, YAML_EXTENSIONS};
use crate::error_ext::ErrorContext;

const DEFINITION_KEYS: [&str; 6] = ["class", "arguments", "calls", "tags", "public", "shared"];
const ALIAS_KEYS: [&str; 2] = ["alias", "public"];

/// Loads `.yml` / `.yaml` service files into a container
#[derive(Debug, Clone, Default)]
pub struct YamlFileLoader {
    locator: FileLocator,
}

enum ServiceEntry {
    Definition(Definition),
    Alias(Alias),
}

impl YamlFileLoader {
    /// Create a loader resolving imports relative to each file
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a loader that also searches the locator's paths for imports
    pub fn with_locator(locator: FileLocator) -> Self {
        Self { locator }
    }

    fn load_file(
        &self,
        path: &Path,
        container: &mut Container,
        stack: &mut Vec<PathBuf>,
    ) -> Result<()> {
        let path = path
            .canonicalize()
            .loader_context(path, "The file does not exist")?;
        if stack.contains(&path) {
            let mut chain: Vec<String> = stack.iter().map(|p| p.display().to_string()).collect();
            chain.push(path.display().to_string());
            return Err(Error::loader(
                &path,
                format!("Circular import detected: {}", chain.join(" > ")),
            ));
        }

        debug!(file = %path.display(), "Loading service file");
        let content = fs::read_to_string(&path)
            .io_context(format!("Failed to read {}", path.display()))?;
        container.add_resource(&path);

        let document = parse_document(&path, &content)?;
        let Some(mut document) = document else {
            return Ok(());
        };

        stack.push(path.clone());
        let imported = match document.shift_remove("imports") {
            Some(imports) => self.load_imports(&path, imports, container, stack),
            None => Ok(()),
        };
        stack.pop();
        imported?;

        if let Some(parameters) = document.shift_remove("parameters") {
            load_parameters(&path, parameters, container)?;
        }
        if let Some(services) = document.shift_remove("services") {
            load_services(&path, services, container)?;
        }

        for (alias, config) in document {
            debug!(alias = %alias, file = %path.display(), "Queueing extension configuration");
            container.load_from_extension(&alias, config)?;
        }
        Ok(())
    }

    fn load_imports(
        &self,
        file: &Path,
        imports: Value,
        container: &mut Container,
        stack: &mut Vec<PathBuf>,
    ) -> Result<()> {
        let imports = match imports {
            Value::Null => return Ok(()),
            Value::Array(imports) => imports,
            _ => return Err(Error::loader(file, "The \"imports\" key should contain an array")),
        };

        let current_dir = file.parent();
        for import in imports {
            let (resource, ignore_errors) = match import {
                Value::String(resource) => (resource, false),
                Value::Object(mut entry) => {
                    let Some(Value::String(resource)) = entry.remove("resource") else {
                        return Err(Error::loader(
                            file,
                            "An import should provide a \"resource\" string",
                        ));
                    };
                    let ignore_errors = entry
                        .remove("ignore_errors")
                        .and_then(|v| v.as_bool())
                        .unwrap_or(false);
                    (resource, ignore_errors)
                }
                _ => {
                    return Err(Error::loader(
                        file,
                        "An import should be a string or a mapping with a \"resource\"",
                    ));
                }
            };

            let result = self
                .locator
                .locate(&resource, current_dir)
                .and_then(|path| self.load_file(&path, container, stack));
            match result {
                Ok(()) => {}
                Err(e) if ignore_errors => {
                    warn!(resource = %resource, error = %e, "Ignoring failed import");
                }
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }
}

impl ServiceFileLoader for YamlFileLoader {
    fn supports(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| YAML_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
    }

    fn load(&self, path: &Path, container: &mut Container) -> Result<()> {
        self.load_file(path, container, &mut Vec::new())
    }
}

fn parse_document(path: &Path, content: &str) -> Result<Option<IndexMap<String, Value>>> {
    let blank = content.lines().all(|line| {
        let line = line.trim();
        line.is_empty() || line.starts_with('#')
    });
    if blank {
        return Ok(None);
    }
    let value: Value = serde_yaml::from_str(content).loader_context(path, "Invalid YAML")?;
    match value {
        Value::Null => Ok(None),
        Value::Object(map) => Ok(Some(map.into_iter().collect())),
        _ => Err(Error::loader(
            path,
            "The service file must contain a mapping at the top level",
        )),
    }
}

fn load_parameters(file: &Path, parameters: Value, container: &mut Container) -> Result<()> {
    match parameters {
        Value::Null => Ok(()),
        Value::Object(parameters) => {
            for (name, value) in parameters {
                container.set_parameter(name, value)?;
            }
            Ok(())
        }
        _ => Err(Error::loader(file, "The \"parameters\" key should contain a mapping")),
    }
}

fn load_services(file: &Path, services: Value, container: &mut Container) -> Result<()> {
    let services = match services {
        Value::Null => return Ok(()),
        Value::Object(services) => services,
        _ => return Err(Error::loader(file, "The \"services\" key should contain a mapping")),
    };

    for (id, value) in services {
        match parse_service(&id, value)? {
            ServiceEntry::Definition(definition) => container.set_definition(id, definition)?,
            ServiceEntry::Alias(alias) => container.set_alias(id, alias)?,
        }
    }
    Ok(())
}

fn parse_service(id: &str, value: Value) -> Result<ServiceEntry> {
    match value {
        Value::Null => Ok(ServiceEntry::Definition(Definition::new(id))),
        Value::String(target) => match target.strip_prefix(REFERENCE_PREFIX) {
            Some(target) if !target.is_empty() => Ok(ServiceEntry::Alias(Alias::new(target))),
            _ => Err(Error::invalid_definition(
                id,
                "a string value must be an alias of the form \"@service_id\"",
            )),
        },
        Value::Object(entry) if entry.contains_key("alias") => parse_alias(id, entry),
        Value::Object(entry) => parse_definition(id, entry).map(ServiceEntry::Definition),
        _ => Err(Error::invalid_definition(
            id,
            "expected a mapping, null or an \"@alias\" string",
        )),
    }
}

fn parse_alias(id: &str, entry: Map<String, Value>) -> Result<ServiceEntry> {
    reject_unknown_keys(id, &entry, &ALIAS_KEYS)?;
    let target = match entry.get("alias") {
        Some(Value::String(target)) if !target.is_empty() => target.clone(),
        _ => return Err(Error::invalid_definition(id, "\"alias\" must be a service id")),
    };
    let public = bool_key(id, &entry, "public")?.unwrap_or(true);
    Ok(ServiceEntry::Alias(Alias::new(target).with_public(public)))
}

fn parse_definition(id: &str, mut entry: Map<String, Value>) -> Result<Definition> {
    reject_unknown_keys(id, &entry, &DEFINITION_KEYS)?;

    let mut definition = match entry.remove("class") {
        None | Some(Value::Null) => Definition::new(id),
        Some(Value::String(class)) => Definition::new(class),
        Some(_) => return Err(Error::invalid_definition(id, "\"class\" must be a string")),
    };

    if let Some(public) = bool_key(id, &entry, "public")? {
        definition.public = public;
    }
    if let Some(shared) = bool_key(id, &entry, "shared")? {
        definition.shared = shared;
    }

    match entry.remove("arguments") {
        None | Some(Value::Null) => {}
        Some(Value::Array(arguments)) => {
            definition.arguments = arguments
                .into_iter()
                .map(|argument| parse_argument(id, argument))
                .collect::<Result<Vec<_>>>()?;
        }
        Some(_) => return Err(Error::invalid_definition(id, "\"arguments\" must be a list")),
    }

    match entry.remove("calls") {
        None | Some(Value::Null) => {}
        Some(Value::Array(calls)) => {
            definition.calls = calls
                .into_iter()
                .map(|call| parse_call(id, call))
                .collect::<Result<Vec<_>>>()?;
        }
        Some(_) => return Err(Error::invalid_definition(id, "\"calls\" must be a list")),
    }

    match entry.remove("tags") {
        None | Some(Value::Null) => {}
        Some(Value::Array(tags)) => {
            for tag in tags {
                let (name, attributes) = parse_tag(id, tag)?;
                definition.add_tag(name, attributes);
            }
        }
        Some(_) => return Err(Error::invalid_definition(id, "\"tags\" must be a list")),
    }

    Ok(definition)
}

fn parse_call(id: &str, call: Value) -> Result<MethodCall> {
    let (method, arguments) = match call {
        Value::Array(mut parts) if (1..=2).contains(&parts.len()) => {
            let arguments = if parts.len() == 2 { parts.pop() } else { None };
            (parts.pop(), arguments)
        }
        Value::Object(mut parts) => (parts.remove("method"), parts.remove("arguments")),
        _ => {
            return Err(Error::invalid_definition(
                id,
                "a method call must be [method, [arguments]] or {method, arguments}",
            ));
        }
    };

    let Some(Value::String(method)) = method else {
        return Err(Error::invalid_definition(id, "a method call needs a method name"));
    };
    let arguments = match arguments {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(arguments)) => arguments
            .into_iter()
            .map(|argument| parse_argument(id, argument))
            .collect::<Result<Vec<_>>>()?,
        Some(_) => {
            return Err(Error::invalid_definition(
                id,
                format!("arguments of method call \"{method}\" must be a list"),
            ));
        }
    };
    Ok(MethodCall::new(method, arguments))
}

fn parse_tag(id: &str, tag: Value) -> Result<(String, TagAttributes)> {
    match tag {
        Value::String(name) if !name.is_empty() => Ok((name, TagAttributes::new())),
        Value::Object(mut attributes) => {
            let Some(Value::String(name)) = attributes.shift_remove("name") else {
                return Err(Error::invalid_definition(
                    id,
                    "a tag mapping must have a \"name\" string",
                ));
            };
            let attributes = attributes
                .into_iter()
                .map(|(key, value)| {
                    if value.is_array() || value.is_object() {
                        Err(Error::invalid_definition(
                            id,
                            format!("tag \"{name}\" attribute \"{key}\" must be a scalar"),
                        ))
                    } else {
                        Ok((key, value))
                    }
                })
                .collect::<Result<TagAttributes>>()?;
            Ok((name, attributes))
        }
        _ => Err(Error::invalid_definition(
            id,
            "a tag must be a name or a mapping with a \"name\"",
        )),
    }
}

/// `@id` is a reference, `@?id` an optional one and `@@text` the literal `@text`
fn parse_argument(id: &str, value: Value) -> Result<Argument> {
    match value {
        Value::String(s) => {
            if let Some(literal) = s.strip_prefix("@@") {
                return Ok(Argument::value(format!("{REFERENCE_PREFIX}{literal}")));
            }
            let reference = if let Some(target) = s.strip_prefix(OPTIONAL_REFERENCE_PREFIX) {
                Reference::optional(target)
            } else if let Some(target) = s.strip_prefix(REFERENCE_PREFIX) {
                Reference::new(target)
            } else {
                return Ok(Argument::Value(Value::String(s)));
            };
            if reference.id.is_empty() {
                return Err(Error::invalid_definition(
                    id,
                    format!("\"{s}\" does not name a service"),
                ));
            }
            Ok(Argument::Reference(reference))
        }
        Value::Array(items) => items
            .into_iter()
            .map(|item| parse_argument(id, item))
            .collect::<Result<Vec<_>>>()
            .map(Argument::List),
        Value::Object(items) => items
            .into_iter()
            .map(|(key, item)| -> Result<(String, Argument)> {
                Ok((key, parse_argument(id, item)?))
            })
            .collect::<Result<IndexMap<_, _>>>()
            .map(Argument::Map),
        other => Ok(Argument::Value(other)),
    }
}

fn bool_key(id: &str, entry: &Map<String, Value>, key: &str) -> Result<Option<bool>> {
    match entry.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Bool(flag)) => Ok(Some(*flag)),
        Some(_) => Err(Error::invalid_definition(id, format!("\"{key}\" must be a boolean"))),
    }
}

fn reject_unknown_keys(id: &str, entry: &Map<String, Value>, allowed: &[&str]) -> Result<()> {
    if let Some(key) = entry.keys().find(|key| !allowed.contains(&key.as_str())) {
        return Err(Error::invalid_definition(
            id,
            format!(
                "unsupported key \"{key}\" (supported keys: {})",
                allowed.join(", ")
            ),
        ));
    }
    Ok(())
}
