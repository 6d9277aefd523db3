//! Application configuration
//!
//! Typed configuration sections plus the figment-based [`ConfigLoader`].

mod loader;
pub mod types;

pub use loader::ConfigLoader;
pub use types::{AppConfig, BootstrapConfig, CacheConfig, ContainerConfig, LoggingConfig};
