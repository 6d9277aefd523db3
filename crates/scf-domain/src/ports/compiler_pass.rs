//! Compiler pass port

use crate::container::Container;
use crate::error::Result;

/// Transformation applied to a container while it compiles
///
/// Passes are keyed by [`CompilerPass::id`]. The default identifier is the
/// implementing type's name, which keeps two instances of the same pass
/// type from being registered side by side; override it when a stable
/// identifier independent of the type path is needed.
pub trait CompilerPass: Send + Sync {
    /// Stable identifier used for registry deduplication
    fn id(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Inspect or modify the container
    fn process(&self, container: &mut Container) -> Result<()>;
}
