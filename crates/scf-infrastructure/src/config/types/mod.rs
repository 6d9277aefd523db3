//! Configuration types module

pub mod app;
pub mod bootstrap;
pub mod cache;
pub mod container;
pub mod logging;

pub use app::AppConfig;
pub use bootstrap::BootstrapConfig;
pub use cache::CacheConfig;
pub use container::ContainerConfig;
pub use logging::LoggingConfig;
