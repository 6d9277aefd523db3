//! Process-wide factory
//!
//! For code that cannot thread a [`ContainerFactory`] through, one factory
//! can be installed once and then borrowed from anywhere. Bootstrap is
//! expected to happen on a single thread before the factory is shared.

use std::sync::{Mutex, MutexGuard, PoisonError};

use once_cell::sync::OnceCell;
use scf_application::ContainerFactory;
use scf_domain::error::{Error, Result};
use tracing::debug;

static SHARED: OnceCell<Mutex<ContainerFactory>> = OnceCell::new();

/// Install the process-wide factory; fails when one is already installed
pub fn install_shared(factory: ContainerFactory) -> Result<()> {
    SHARED
        .set(Mutex::new(factory))
        .map_err(|_| Error::invalid_argument("A shared container factory is already installed"))?;
    debug!("Installed shared container factory");
    Ok(())
}

/// Lock the process-wide factory
///
/// A lock poisoned by a panicking holder is recovered; the registry maps
/// are never left half-updated by a single operation.
pub fn shared() -> Result<MutexGuard<'static, ContainerFactory>> {
    let factory = SHARED
        .get()
        .ok_or_else(|| Error::not_found("shared container factory (call install_shared first)"))?;
    Ok(factory.lock().unwrap_or_else(PoisonError::into_inner))
}
