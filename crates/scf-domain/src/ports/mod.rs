//! Domain Port Interfaces
//!
//! Contracts between the container engine and the code that plugs into
//! it. Extensions and compiler passes are supplied by applications;
//! service-file loaders and dumpers are implemented by the
//! infrastructure layer.
//!
//! ## Organization
//!
//! - **extension** - Named configuration units that register services
//! - **compiler_pass** - Container transformations run during compilation
//! - **loader** - Service-definition file loading
//! - **dumper** - Rendering compiled containers as cacheable source

/// Compiler passes
pub mod compiler_pass;
/// Compiled container rendering
pub mod dumper;
/// Container extensions
pub mod extension;
/// Service-definition file loading
pub mod loader;

pub use compiler_pass::CompilerPass;
pub use dumper::{ContainerDumper, DumpOptions};
pub use extension::Extension;
pub use loader::ServiceFileLoader;
