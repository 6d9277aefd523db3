//! # Shared Container Factory
//!
//! Assemble dependency-injection containers from registered extensions and
//! compiler passes, compile them, and dump them to a cache so that later
//! process starts can skip assembly.
//!
//! ## Example
//!
//! ```no_run
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! use scf::extensions::ServiceFilesExtension;
//!
//! let mut factory = scf::default_factory();
//! factory.add_extension(Arc::new(ServiceFilesExtension::new()))?;
//!
//! let mut container = factory.create_container(
//!     Default::default(),
//!     Some(Path::new("config/services.yml")),
//! )?;
//! factory.dump_container(&mut container, "ProjectServiceContainer", Path::new("var/cache"))?;
//! # Ok::<(), scf::Error>(())
//! ```
//!
//! ## Architecture
//!
//! - `domain` - container engine, ports and errors
//! - `application` - the [`ContainerFactory`] registry, catalogs and cache
//! - `infrastructure` - YAML loading and dumping, configuration, logging

pub mod cli;
pub mod extensions;
mod shared;

use std::sync::Arc;

/// Domain layer - container engine, ports and errors
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use scf_domain::*;
}

/// Application layer - registry, bootstrap catalogs and cache
///
/// Re-exports from the application crate for convenience
pub mod application {
    pub use scf_application::*;
}

/// Infrastructure layer - YAML adapters, configuration and logging
///
/// Re-exports from the infrastructure crate for convenience
pub mod infrastructure {
    pub use scf_infrastructure::*;
}

// Re-export commonly used domain types at the crate root
pub use domain::*;

pub use application::{ContainerCache, ContainerFactory, Registration};
pub use shared::{install_shared, shared};

/// Factory wired with the YAML service-file loader and YAML dumper
pub fn default_factory() -> ContainerFactory {
    ContainerFactory::new(
        Arc::new(scf_infrastructure::YamlFileLoader::new()),
        Arc::new(scf_infrastructure::YamlDumper::new()),
    )
}
