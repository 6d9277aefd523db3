//! Service-definition file loading
//!
//! [`YamlFileLoader`] implements the domain's `ServiceFileLoader` port for
//! Symfony-style YAML files; [`FileLocator`] resolves the resources they
//! import.

mod locator;
mod yaml;

pub use locator::FileLocator;
pub use yaml::YamlFileLoader;
