//! Compiler pass configuration

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use super::passes::{
    CheckCircularReferencesPass, CheckReferencesPass, MergeExtensionConfigurationPass,
    RemovePrivateAliasesPass, RemoveUnusedDefinitionsPass, ResolveParameterPlaceholdersPass,
    ResolveReferencesToAliasesPass,
};
use crate::ports::CompilerPass;
use crate::value_objects::PassPhase;

/// Compiler passes grouped by phase
///
/// Every container starts with the built-in passes below; passes added
/// later are appended to the end of their phase.
///
/// | Phase | Built-in passes |
/// |-------|-----------------|
/// | `before_optimization` | merge extension configuration |
/// | `optimization` | resolve parameters, resolve aliases, check references, check circular references |
/// | `before_removing` | - |
/// | `removing` | remove private aliases, remove unused definitions |
/// | `after_removing` | - |
#[derive(Clone)]
pub struct PassConfig {
    passes: BTreeMap<PassPhase, Vec<Arc<dyn CompilerPass>>>,
}

impl Default for PassConfig {
    fn default() -> Self {
        let mut config = Self::empty();
        config.add_pass(Arc::new(MergeExtensionConfigurationPass), PassPhase::BeforeOptimization);
        config.add_pass(Arc::new(ResolveParameterPlaceholdersPass), PassPhase::Optimization);
        config.add_pass(Arc::new(ResolveReferencesToAliasesPass), PassPhase::Optimization);
        config.add_pass(Arc::new(CheckReferencesPass), PassPhase::Optimization);
        config.add_pass(Arc::new(CheckCircularReferencesPass), PassPhase::Optimization);
        config.add_pass(Arc::new(RemovePrivateAliasesPass), PassPhase::Removing);
        config.add_pass(Arc::new(RemoveUnusedDefinitionsPass), PassPhase::Removing);
        config
    }
}

impl fmt::Debug for PassConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (phase, passes) in &self.passes {
            map.entry(phase, &passes.iter().map(|p| p.id()).collect::<Vec<_>>());
        }
        map.finish()
    }
}

impl PassConfig {
    /// Configuration with the built-in passes
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration without any pass
    pub fn empty() -> Self {
        Self {
            passes: PassPhase::ALL.into_iter().map(|phase| (phase, Vec::new())).collect(),
        }
    }

    /// Append a pass to a phase
    pub fn add_pass(&mut self, pass: Arc<dyn CompilerPass>, phase: PassPhase) {
        self.passes.entry(phase).or_default().push(pass);
    }

    /// Passes of one phase in execution order
    pub fn passes(&self, phase: PassPhase) -> &[Arc<dyn CompilerPass>] {
        self.passes.get(&phase).map(Vec::as_slice).unwrap_or_default()
    }

    /// Every pass in execution order, tagged with its phase
    pub fn ordered(&self) -> Vec<(PassPhase, Arc<dyn CompilerPass>)> {
        self.passes
            .iter()
            .flat_map(|(phase, passes)| passes.iter().map(move |pass| (*phase, Arc::clone(pass))))
            .collect()
    }

    /// Total number of passes
    pub fn len(&self) -> usize {
        self.passes.values().map(Vec::len).sum()
    }

    /// Whether no pass is configured
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
