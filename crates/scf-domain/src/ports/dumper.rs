//! Compiled container rendering port

use crate::container::Container;
use crate::error::Result;

/// Options controlling a dump
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DumpOptions {
    /// Name the generated container is published under
    pub class_name: String,
}

impl DumpOptions {
    /// Create options for a class name
    pub fn new(class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
        }
    }
}

/// Renders compiled containers as persistable source and reads them back
pub trait ContainerDumper: Send + Sync {
    /// Extension of generated files, without the dot
    fn file_extension(&self) -> &str;

    /// Render a compiled container; output must be deterministic
    fn dump(&self, container: &Container, options: &DumpOptions) -> Result<String>;

    /// Rebuild a compiled container from previously dumped source
    fn restore(&self, source: &str) -> Result<Container>;
}
