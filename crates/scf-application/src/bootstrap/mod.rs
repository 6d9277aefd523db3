//! Bootstrap discovery
//!
//! Extensions and compiler passes are registered into compile-time
//! catalogs ([`EXTENSIONS`], [`COMPILER_PASSES`]) with linkme. YAML
//! manifests name catalog entries so that a deployment can decide what a
//! factory registers without recompiling.

mod catalog;
mod manifest;

pub use catalog::{
    COMPILER_PASSES, CompilerPassEntry, EXTENSIONS, ExtensionEntry, list_compiler_passes,
    list_extensions, resolve_compiler_pass, resolve_extension,
};
pub use manifest::{BootstrapManifest, DetailedEntry, ManifestEntry};
