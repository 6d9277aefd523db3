//! Built-in compiler passes
//!
//! These run on every compile, before the user passes of the same phase.

mod check_circular_references;
mod check_references;
mod merge_extension_configuration;
mod remove_unused;
mod resolve_aliases;
mod resolve_parameters;

pub use check_circular_references::CheckCircularReferencesPass;
pub use check_references::CheckReferencesPass;
pub use merge_extension_configuration::MergeExtensionConfigurationPass;
pub use remove_unused::{RemovePrivateAliasesPass, RemoveUnusedDefinitionsPass};
pub use resolve_aliases::ResolveReferencesToAliasesPass;
pub use resolve_parameters::ResolveParameterPlaceholdersPass;
