//! # Infrastructure Layer
//!
//! File-system and process-level adapters for the Shared Container
//! Factory.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | figment-based [`ConfigLoader`] and typed [`AppConfig`] |
//! | [`constants`] | File names, environment prefixes, service-file syntax |
//! | [`dumper`] | [`YamlDumper`], the `ContainerDumper` adapter |
//! | [`error_ext`] | [`ErrorContext`] for attaching context to foreign errors |
//! | [`loader`] | [`YamlFileLoader`] and [`FileLocator`] |
//! | [`logging`] | tracing subscriber setup |

pub mod config;
pub mod constants;
pub mod dumper;
pub mod error_ext;
pub mod loader;
pub mod logging;

pub use config::{AppConfig, ConfigLoader};
pub use dumper::YamlDumper;
pub use error_ext::ErrorContext;
pub use loader::{FileLocator, YamlFileLoader};
pub use logging::init_logging;
