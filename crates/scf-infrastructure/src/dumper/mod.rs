//! Compiled container dumping
//!
//! [`YamlDumper`] implements the domain's `ContainerDumper` port.

mod yaml;

pub use yaml::YamlDumper;
