//! Extension and compiler pass catalogs
//!
//! Implementations register themselves at compile time:
//!
//! ```ignore
//! #[linkme::distributed_slice(EXTENSIONS)]
//! static MAILER_EXTENSION: ExtensionEntry = ExtensionEntry {
//!     name: "mailer",
//!     description: "Mailer services",
//!     factory: || Arc::new(MailerExtension),
//! };
//! ```

use std::sync::Arc;

use scf_domain::error::{Error, Result};
use scf_domain::ports::{CompilerPass, Extension};
use scf_domain::PassPhase;

/// Catalog entry for an extension
pub struct ExtensionEntry {
    /// Name used in manifests, usually the extension alias
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Creates the extension
    pub factory: fn() -> Arc<dyn Extension>,
}

/// Catalog entry for a compiler pass
pub struct CompilerPassEntry {
    /// Name used in manifests
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Phase used when a manifest does not name one
    pub default_phase: PassPhase,
    /// Creates the pass
    pub factory: fn() -> Arc<dyn CompilerPass>,
}

/// Every extension linked into the binary
#[linkme::distributed_slice]
pub static EXTENSIONS: [ExtensionEntry] = [..];

/// Every compiler pass linked into the binary
#[linkme::distributed_slice]
pub static COMPILER_PASSES: [CompilerPassEntry] = [..];

/// Create the extension registered under a catalog name
pub fn resolve_extension(name: &str) -> Result<Arc<dyn Extension>> {
    EXTENSIONS
        .iter()
        .find(|entry| entry.name == name)
        .map(|entry| (entry.factory)())
        .ok_or_else(|| {
            let available: Vec<&str> = EXTENSIONS.iter().map(|e| e.name).collect();
            Error::not_found(format!(
                "Unknown extension '{name}'. Available extensions: {available:?}"
            ))
        })
}

/// Create the compiler pass registered under a catalog name, with its
/// default phase
pub fn resolve_compiler_pass(name: &str) -> Result<(Arc<dyn CompilerPass>, PassPhase)> {
    COMPILER_PASSES
        .iter()
        .find(|entry| entry.name == name)
        .map(|entry| ((entry.factory)(), entry.default_phase))
        .ok_or_else(|| {
            let available: Vec<&str> = COMPILER_PASSES.iter().map(|e| e.name).collect();
            Error::not_found(format!(
                "Unknown compiler pass '{name}'. Available compiler passes: {available:?}"
            ))
        })
}

/// (name, description) of every catalogued extension
pub fn list_extensions() -> Vec<(&'static str, &'static str)> {
    EXTENSIONS.iter().map(|e| (e.name, e.description)).collect()
}

/// (name, description) of every catalogued compiler pass
pub fn list_compiler_passes() -> Vec<(&'static str, &'static str)> {
    COMPILER_PASSES
        .iter()
        .map(|e| (e.name, e.description))
        .collect()
}
