//! Service-definition file loading port

use std::path::Path;

use crate::container::Container;
use crate::error::Result;

/// Loads service definitions from a file into a container
///
/// Relative resources referenced from inside the file resolve against the
/// file's own directory.
pub trait ServiceFileLoader: Send + Sync {
    /// Whether this loader understands the file
    fn supports(&self, path: &Path) -> bool;

    /// Load definitions, parameters and extension configuration
    fn load(&self, path: &Path, container: &mut Container) -> Result<()>;
}
