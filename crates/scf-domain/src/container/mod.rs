//! Service container
//!
//! A [`Container`] holds service definitions, aliases, parameters,
//! registered extensions and compiler passes. It starts out mutable; once
//! [`Container::compile`] has run every compiler pass it is frozen and only
//! answers queries.
//!
//! ```text
//! new() ──► register extensions / passes / definitions ──► compile() ──► dump
//!  EMPTY              ASSEMBLED                             COMPILED     DUMPED
//! ```

mod pass_config;
pub mod passes;

pub use pass_config::PassConfig;

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Value;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::ports::{CompilerPass, Extension};
use crate::value_objects::{Alias, Definition, ParameterBag, PassPhase, TagAttributes};

/// Dependency-injection container under construction or compiled
#[derive(Default)]
pub struct Container {
    definitions: IndexMap<String, Definition>,
    aliases: IndexMap<String, Alias>,
    parameters: ParameterBag,
    extensions: IndexMap<String, Arc<dyn Extension>>,
    extension_configs: IndexMap<String, Vec<Value>>,
    pass_config: PassConfig,
    resources: Vec<PathBuf>,
    compiled: bool,
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Container")
            .field("definitions", &self.definitions.keys().collect::<Vec<_>>())
            .field("aliases", &self.aliases)
            .field("parameters", &self.parameters)
            .field("extensions", &self.extensions.keys().collect::<Vec<_>>())
            .field("resources", &self.resources)
            .field("compiled", &self.compiled)
            .finish_non_exhaustive()
    }
}

impl Container {
    /// Create an empty container with the built-in compiler passes
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild an already compiled container, e.g. from a cached dump
    ///
    /// Parameters are taken as resolved and no compiler pass runs again.
    pub fn restore(
        parameters: IndexMap<String, Value>,
        definitions: IndexMap<String, Definition>,
        aliases: IndexMap<String, Alias>,
        resources: Vec<PathBuf>,
    ) -> Self {
        Self {
            definitions,
            aliases,
            parameters: ParameterBag::resolved_from_map(parameters),
            resources,
            compiled: true,
            ..Self::default()
        }
    }

    /// Whether compile has completed
    pub fn is_compiled(&self) -> bool {
        self.compiled
    }

    fn ensure_mutable(&self, operation: &str) -> Result<()> {
        if self.compiled {
            return Err(Error::frozen(operation));
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Definitions
    // ------------------------------------------------------------------

    /// Set a definition, replacing any definition or alias with that id
    pub fn set_definition(&mut self, id: impl Into<String>, definition: Definition) -> Result<()> {
        self.ensure_mutable("add a definition")?;
        let id = id.into();
        self.aliases.shift_remove(&id);
        self.definitions.insert(id, definition);
        Ok(())
    }

    /// Register a class under an id and return its definition for tweaking
    pub fn register(
        &mut self,
        id: impl Into<String>,
        class: impl Into<String>,
    ) -> Result<&mut Definition> {
        let id = id.into();
        self.set_definition(id.clone(), Definition::new(class))?;
        self.definitions
            .get_mut(&id)
            .ok_or_else(|| Error::internal(format!("definition \"{id}\" vanished after insert")))
    }

    /// Definition registered under exactly this id
    pub fn definition(&self, id: &str) -> Option<&Definition> {
        self.definitions.get(id)
    }

    /// Mutable definition registered under exactly this id
    pub fn definition_mut(&mut self, id: &str) -> Option<&mut Definition> {
        self.definitions.get_mut(id)
    }

    /// Definition for an id, following aliases
    pub fn find_definition(&self, id: &str) -> Result<&Definition> {
        let target = self.resolve_alias(id)?;
        self.definitions
            .get(&target)
            .ok_or_else(|| Error::service_not_found(id, None))
    }

    /// Check if a definition exists under exactly this id
    pub fn has_definition(&self, id: &str) -> bool {
        self.definitions.contains_key(id)
    }

    /// Remove a definition, keeping the order of the rest
    pub fn remove_definition(&mut self, id: &str) -> Result<Option<Definition>> {
        self.ensure_mutable("remove a definition")?;
        Ok(self.definitions.shift_remove(id))
    }

    /// All definitions in registration order
    pub fn definitions(&self) -> &IndexMap<String, Definition> {
        &self.definitions
    }

    // ------------------------------------------------------------------
    // Aliases
    // ------------------------------------------------------------------

    /// Set an alias, replacing any definition with that id
    pub fn set_alias(&mut self, alias: impl Into<String>, target: Alias) -> Result<()> {
        self.ensure_mutable("add an alias")?;
        let alias = alias.into();
        if alias == target.target {
            return Err(Error::invalid_argument(format!(
                "An alias can not reference itself, got a circular reference on \"{alias}\""
            )));
        }
        self.definitions.shift_remove(&alias);
        self.aliases.insert(alias, target);
        Ok(())
    }

    /// Alias registered under an id
    pub fn alias(&self, id: &str) -> Option<&Alias> {
        self.aliases.get(id)
    }

    /// Remove an alias
    pub fn remove_alias(&mut self, id: &str) -> Result<Option<Alias>> {
        self.ensure_mutable("remove an alias")?;
        Ok(self.aliases.shift_remove(id))
    }

    /// All aliases in registration order
    pub fn aliases(&self) -> &IndexMap<String, Alias> {
        &self.aliases
    }

    /// Whether a definition or alias exists under the id
    pub fn has(&self, id: &str) -> bool {
        self.definitions.contains_key(id) || self.aliases.contains_key(id)
    }

    /// Follow an alias chain to the id it finally points at
    ///
    /// Ids that are not aliases resolve to themselves.
    pub fn resolve_alias(&self, id: &str) -> Result<String> {
        let mut seen: Vec<String> = Vec::new();
        let mut current = id.to_string();
        while let Some(alias) = self.aliases.get(&current) {
            if let Some(pos) = seen.iter().position(|id| *id == current) {
                let mut path = seen.split_off(pos);
                path.push(current);
                return Err(Error::ServiceCircularReference { path });
            }
            seen.push(current.clone());
            current.clone_from(&alias.target);
        }
        Ok(current)
    }

    // ------------------------------------------------------------------
    // Parameters
    // ------------------------------------------------------------------

    /// Parameter bag
    pub fn parameters(&self) -> &ParameterBag {
        &self.parameters
    }

    /// Mutable parameter bag
    pub fn parameters_mut(&mut self) -> Result<&mut ParameterBag> {
        self.ensure_mutable("change parameters")?;
        Ok(&mut self.parameters)
    }

    /// Set a parameter
    pub fn set_parameter(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Result<()> {
        self.parameters_mut()?.set(name, value);
        Ok(())
    }

    /// Parameter value; resolved once the container is compiled
    pub fn parameter(&self, name: &str) -> Option<&Value> {
        self.parameters.get(name)
    }

    /// Check if a parameter exists
    pub fn has_parameter(&self, name: &str) -> bool {
        self.parameters.has(name)
    }

    // ------------------------------------------------------------------
    // Tags
    // ------------------------------------------------------------------

    /// Ids of every service carrying a tag, with the tag's attribute sets
    pub fn find_tagged_service_ids(&self, tag: &str) -> IndexMap<String, Vec<TagAttributes>> {
        self.definitions
            .iter()
            .filter_map(|(id, definition)| {
                definition
                    .tags
                    .get(tag)
                    .map(|attributes| (id.clone(), attributes.clone()))
            })
            .collect()
    }

    /// Every tag name in use, in first-seen order
    pub fn find_tags(&self) -> Vec<String> {
        let mut tags: Vec<String> = Vec::new();
        for definition in self.definitions.values() {
            for tag in definition.tags.keys() {
                if !tags.contains(tag) {
                    tags.push(tag.clone());
                }
            }
        }
        tags
    }

    // ------------------------------------------------------------------
    // Extensions
    // ------------------------------------------------------------------

    /// Register an extension under its alias
    pub fn register_extension(&mut self, extension: Arc<dyn Extension>) -> Result<()> {
        self.ensure_mutable("register an extension")?;
        let alias = extension.alias().to_string();
        debug!(alias = %alias, "Registering extension with container");
        self.extensions.insert(alias, extension);
        Ok(())
    }

    /// Extension registered under an alias
    pub fn extension(&self, alias: &str) -> Option<Arc<dyn Extension>> {
        self.extensions.get(alias).cloned()
    }

    /// Check if an extension is registered
    pub fn has_extension(&self, alias: &str) -> bool {
        self.extensions.contains_key(alias)
    }

    /// Registered extensions in registration order
    pub fn extensions(&self) -> &IndexMap<String, Arc<dyn Extension>> {
        &self.extensions
    }

    /// Queue configuration for an extension; it is loaded at compile time
    ///
    /// A `null` configuration is recorded as an empty object so that the
    /// extension still loads.
    pub fn load_from_extension(&mut self, alias: &str, config: Value) -> Result<()> {
        self.ensure_mutable("load extension configuration")?;
        if !self.has_extension(alias) {
            return Err(Error::extension_not_found(alias));
        }
        let config = match config {
            Value::Null => Value::Object(serde_json::Map::new()),
            other => other,
        };
        self.extension_configs
            .entry(alias.to_string())
            .or_default()
            .push(config);
        Ok(())
    }

    /// Configuration blocks queued for an extension
    pub fn extension_config(&self, alias: &str) -> &[Value] {
        self.extension_configs
            .get(alias)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    // ------------------------------------------------------------------
    // Compiler passes
    // ------------------------------------------------------------------

    /// Add a compiler pass to a phase
    pub fn add_compiler_pass(&mut self, pass: Arc<dyn CompilerPass>, phase: PassPhase) -> Result<()> {
        self.ensure_mutable("add a compiler pass")?;
        debug!(pass = pass.id(), phase = %phase, "Adding compiler pass to container");
        self.pass_config.add_pass(pass, phase);
        Ok(())
    }

    /// Compiler pass configuration
    pub fn pass_config(&self) -> &PassConfig {
        &self.pass_config
    }

    // ------------------------------------------------------------------
    // Resources
    // ------------------------------------------------------------------

    /// Record a file the container was built from
    pub fn add_resource(&mut self, path: impl AsRef<Path>) {
        let path = path.as_ref().to_path_buf();
        if !self.resources.contains(&path) {
            self.resources.push(path);
        }
    }

    /// Files the container was built from
    pub fn resources(&self) -> &[PathBuf] {
        &self.resources
    }

    // ------------------------------------------------------------------
    // Compilation
    // ------------------------------------------------------------------

    /// Run every compiler pass, then freeze the container
    ///
    /// Passes run phase by phase; inside a phase the built-in passes run
    /// first and user passes follow in the order they were added.
    /// Compiling an already compiled container does nothing.
    pub fn compile(&mut self) -> Result<()> {
        if self.compiled {
            debug!("Container already compiled, skipping");
            return Ok(());
        }

        let passes = self.pass_config.ordered();
        info!(passes = passes.len(), "Compiling container");
        for (phase, pass) in passes {
            debug!(pass = pass.id(), phase = %phase, "Running compiler pass");
            pass.process(self)?;
        }

        self.parameters.resolve()?;
        self.compiled = true;
        info!(
            services = self.definitions.len(),
            aliases = self.aliases.len(),
            parameters = self.parameters.len(),
            "Container compiled"
        );
        Ok(())
    }
}
