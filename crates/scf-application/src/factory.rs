//! Container factory
//!
//! [`ContainerFactory`] accumulates extensions and compiler passes, then
//! assembles fresh containers from them, compiles and dumps them.
//!
//! ```text
//! add_extension / add_compiler_pass ──► create_container ──► dump_container
//!            (registry)                    ASSEMBLED        COMPILED + DUMPED
//! ```
//!
//! The registry itself is never touched by building, compiling or dumping;
//! it lives until cleared or dropped.

use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use indexmap::IndexMap;
use scf_domain::error::{Error, RegistrationKind, Result};
use scf_domain::ports::{CompilerPass, ContainerDumper, DumpOptions, Extension, ServiceFileLoader};
use scf_domain::{Container, PassPhase};
use serde_json::Value;
use tracing::{debug, info};

use crate::bootstrap::{BootstrapManifest, resolve_compiler_pass, resolve_extension};
use crate::cache::ContainerCache;

/// Callback registering extensions or passes on a factory
///
/// Bootstrap code hands a list of these to [`ContainerFactory::bootstrap`].
pub type Registration = fn(&mut ContainerFactory) -> Result<()>;

/// Registry of extensions and compiler passes that builds containers
pub struct ContainerFactory {
    extensions: IndexMap<String, Arc<dyn Extension>>,
    compiler_passes: IndexMap<String, (Arc<dyn CompilerPass>, PassPhase)>,
    loader: Arc<dyn ServiceFileLoader>,
    dumper: Arc<dyn ContainerDumper>,
    applied_manifests: HashSet<PathBuf>,
}

impl fmt::Debug for ContainerFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContainerFactory")
            .field("extensions", &self.extensions.keys().collect::<Vec<_>>())
            .field(
                "compiler_passes",
                &self
                    .compiler_passes
                    .iter()
                    .map(|(id, (_, phase))| (id.as_str(), *phase))
                    .collect::<Vec<_>>(),
            )
            .field("applied_manifests", &self.applied_manifests)
            .finish_non_exhaustive()
    }
}

impl ContainerFactory {
    /// Create an empty factory using the given file loader and dumper
    pub fn new(loader: Arc<dyn ServiceFileLoader>, dumper: Arc<dyn ContainerDumper>) -> Self {
        Self {
            extensions: IndexMap::new(),
            compiler_passes: IndexMap::new(),
            loader,
            dumper,
            applied_manifests: HashSet::new(),
        }
    }

    // ------------------------------------------------------------------
    // Extensions
    // ------------------------------------------------------------------

    /// Check if an extension is registered under the alias
    pub fn has_extension(&self, alias: &str) -> bool {
        self.extensions.contains_key(alias)
    }

    /// Register an extension; its alias must be new
    pub fn add_extension(&mut self, extension: Arc<dyn Extension>) -> Result<()> {
        let alias = extension.alias().to_string();
        if self.has_extension(&alias) {
            return Err(Error::duplicate(RegistrationKind::Extension, alias));
        }
        debug!(alias = %alias, "Adding extension");
        self.extensions.insert(alias, extension);
        Ok(())
    }

    /// Register an extension, replacing one with the same alias in place
    pub fn replace_extension(&mut self, extension: Arc<dyn Extension>) {
        let alias = extension.alias().to_string();
        debug!(alias = %alias, "Replacing extension");
        self.extensions.insert(alias, extension);
    }

    /// Remove an extension; unknown aliases are ignored
    pub fn remove_extension(&mut self, alias: &str) {
        if self.extensions.shift_remove(alias).is_some() {
            debug!(alias, "Removed extension");
        }
    }

    /// Remove every extension
    pub fn clear_extensions(&mut self) {
        self.extensions.clear();
    }

    /// Extension registered under the alias
    pub fn extension(&self, alias: &str) -> Option<Arc<dyn Extension>> {
        self.extensions.get(alias).cloned()
    }

    /// Registered extensions in registration order
    pub fn extensions(&self) -> impl Iterator<Item = (&str, &Arc<dyn Extension>)> {
        self.extensions
            .iter()
            .map(|(alias, extension)| (alias.as_str(), extension))
    }

    // ------------------------------------------------------------------
    // Compiler passes
    // ------------------------------------------------------------------

    /// Check if a compiler pass is registered under the identifier
    pub fn has_compiler_pass(&self, id: &str) -> bool {
        self.compiler_passes.contains_key(id)
    }

    /// Register a compiler pass for a phase; its identifier must be new
    pub fn add_compiler_pass(
        &mut self,
        pass: Arc<dyn CompilerPass>,
        phase: PassPhase,
    ) -> Result<()> {
        let id = pass.id().to_string();
        if self.has_compiler_pass(&id) {
            return Err(Error::duplicate(RegistrationKind::CompilerPass, id));
        }
        debug!(pass = %id, phase = %phase, "Adding compiler pass");
        self.compiler_passes.insert(id, (pass, phase));
        Ok(())
    }

    /// Register a compiler pass, replacing one with the same identifier in
    /// place; the given phase is stored either way
    pub fn replace_compiler_pass(&mut self, pass: Arc<dyn CompilerPass>, phase: PassPhase) {
        let id = pass.id().to_string();
        debug!(pass = %id, phase = %phase, "Replacing compiler pass");
        self.compiler_passes.insert(id, (pass, phase));
    }

    /// Remove a compiler pass; unknown identifiers are ignored
    pub fn remove_compiler_pass(&mut self, id: &str) {
        if self.compiler_passes.shift_remove(id).is_some() {
            debug!(pass = id, "Removed compiler pass");
        }
    }

    /// Remove every compiler pass
    pub fn clear_compiler_passes(&mut self) {
        self.compiler_passes.clear();
    }

    /// Phase stored for a compiler pass
    pub fn compiler_pass_phase(&self, id: &str) -> Option<PassPhase> {
        self.compiler_passes.get(id).map(|(_, phase)| *phase)
    }

    /// Registered compiler passes with their phases, in registration order
    pub fn compiler_passes(
        &self,
    ) -> impl Iterator<Item = (&str, &Arc<dyn CompilerPass>, PassPhase)> {
        self.compiler_passes
            .iter()
            .map(|(id, (pass, phase))| (id.as_str(), pass, *phase))
    }

    // ------------------------------------------------------------------
    // Bootstrap
    // ------------------------------------------------------------------

    /// Run registration callbacks in order, stopping at the first failure
    pub fn bootstrap(&mut self, registrations: &[Registration]) -> Result<()> {
        for registration in registrations {
            registration(self)?;
        }
        Ok(())
    }

    /// Apply every bootstrap manifest matching the glob patterns
    ///
    /// Manifests are applied in pattern order, then in the order the glob
    /// walker yields them. A manifest already applied by this factory is
    /// skipped. Returns how many manifests were newly applied.
    pub fn require_extension_configs<S: AsRef<str>>(&mut self, patterns: &[S]) -> Result<usize> {
        let mut applied = 0;
        for pattern in patterns {
            let pattern = pattern.as_ref();
            let paths = glob::glob(pattern).map_err(|e| {
                Error::configuration_with_source(format!("Invalid manifest pattern '{pattern}'"), e)
            })?;

            for entry in paths {
                let path = entry.map_err(|e| {
                    Error::io_with_source(format!("Failed to read a match of '{pattern}'"), e)
                })?;
                let path = path.canonicalize().map_err(|e| {
                    Error::io_with_source(format!("Failed to resolve {}", path.display()), e)
                })?;
                if self.applied_manifests.contains(&path) {
                    debug!(manifest = %path.display(), "Manifest already applied, skipping");
                    continue;
                }

                self.apply_manifest(&BootstrapManifest::from_path(&path)?)?;
                info!(manifest = %path.display(), "Applied bootstrap manifest");
                self.applied_manifests.insert(path);
                applied += 1;
            }
        }
        Ok(applied)
    }

    /// Register everything a manifest names, resolved through the catalogs
    pub fn apply_manifest(&mut self, manifest: &BootstrapManifest) -> Result<()> {
        for entry in &manifest.extensions {
            if entry.phase().is_some() {
                return Err(Error::invalid_argument(format!(
                    "Extension '{}' cannot be given a compiler pass phase",
                    entry.name()
                )));
            }
            let extension = resolve_extension(entry.name())?;
            if entry.replace() {
                self.replace_extension(extension);
            } else {
                self.add_extension(extension)?;
            }
        }

        for entry in &manifest.compiler_passes {
            let (pass, default_phase) = resolve_compiler_pass(entry.name())?;
            let phase = entry.phase().unwrap_or(default_phase);
            if entry.replace() {
                self.replace_compiler_pass(pass, phase);
            } else {
                self.add_compiler_pass(pass, phase)?;
            }
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Building
    // ------------------------------------------------------------------

    /// Assemble a new, uncompiled container from the registry
    ///
    /// Extensions and passes are registered in registration order. A
    /// `services_file` that does not exist is skipped; an existing one is
    /// loaded before `parameters` are merged, so caller parameters win.
    pub fn create_container(
        &self,
        parameters: IndexMap<String, Value>,
        services_file: Option<&Path>,
    ) -> Result<Container> {
        let mut container = Container::new();

        for extension in self.extensions.values() {
            container.register_extension(Arc::clone(extension))?;
        }
        for (pass, phase) in self.compiler_passes.values() {
            container.add_compiler_pass(Arc::clone(pass), *phase)?;
        }

        match services_file {
            Some(file) if file.exists() => {
                if !self.loader.supports(file) {
                    return Err(Error::loader(file, "No loader supports this file type"));
                }
                self.loader.load(file, &mut container)?;
            }
            Some(file) => {
                debug!(file = %file.display(), "Services file does not exist, skipping");
            }
            None => {}
        }

        container.parameters_mut()?.add(parameters);

        info!(
            extensions = self.extensions.len(),
            compiler_passes = self.compiler_passes.len(),
            services = container.definitions().len(),
            "Container created"
        );
        Ok(container)
    }

    /// Compile a container and write it to `{target_dir}/{class_name}.{ext}`
    ///
    /// The target directory must already exist; nothing is compiled or
    /// written otherwise. An existing file is overwritten. Returns the
    /// written path.
    pub fn dump_container(
        &self,
        container: &mut Container,
        class_name: &str,
        target_dir: &Path,
    ) -> Result<PathBuf> {
        if !target_dir.is_dir() {
            return Err(Error::invalid_target(target_dir));
        }
        validate_class_name(class_name)?;

        container.compile()?;
        let source = self.dumper.dump(container, &DumpOptions::new(class_name))?;

        let directory = target_dir.canonicalize().map_err(|e| {
            Error::io_with_source(format!("Failed to resolve {}", target_dir.display()), e)
        })?;
        let path = directory.join(format!("{class_name}.{}", self.dumper.file_extension()));
        fs::write(&path, source)
            .map_err(|e| Error::io_with_source(format!("Failed to write {}", path.display()), e))?;

        info!(class = class_name, path = %path.display(), "Container dumped");
        Ok(path)
    }

    /// Cache handle for dumps made by this factory's dumper
    pub fn cache(
        &self,
        directory: impl Into<PathBuf>,
        class_name: impl Into<String>,
    ) -> ContainerCache {
        ContainerCache::new(directory, class_name, Arc::clone(&self.dumper))
    }

    /// Reuse a fresh cached container, or build, dump and return a new one
    pub fn load_or_create(
        &self,
        cache: &ContainerCache,
        parameters: IndexMap<String, Value>,
        services_file: Option<&Path>,
    ) -> Result<Container> {
        if let Some(container) = cache.load()? {
            info!(path = %cache.path().display(), "Using cached container");
            return Ok(container);
        }

        let mut container = self.create_container(parameters, services_file)?;
        self.dump_container(&mut container, cache.class_name(), cache.directory())?;
        Ok(container)
    }
}

fn validate_class_name(class_name: &str) -> Result<()> {
    if class_name.trim().is_empty() {
        return Err(Error::invalid_argument("Container class name cannot be empty"));
    }
    if class_name.contains(['/', '\\']) {
        return Err(Error::invalid_argument(format!(
            "Container class name cannot contain path separators: {class_name}"
        )));
    }
    Ok(())
}
