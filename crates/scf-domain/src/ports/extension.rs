//! Extension port

use serde_json::Value;

use crate::container::Container;
use crate::error::Result;

/// Named unit of configuration logic
///
/// An extension is registered with a container under its alias. When the
/// container is compiled, every registered extension that received
/// configuration through [`Container::load_from_extension`] is loaded with
/// all of its configuration blocks, in the order they were given.
///
/// # Example
///
/// ```
/// use scf_domain::{Container, Definition, Extension, Result};
/// use serde_json::Value;
///
/// struct MailerExtension;
///
/// impl Extension for MailerExtension {
///     fn alias(&self) -> &str {
///         "mailer"
///     }
///
///     fn load(&self, _configs: &[Value], container: &mut Container) -> Result<()> {
///         container.set_definition("mailer", Definition::new("App\\Mailer"))
///     }
/// }
/// ```
pub trait Extension: Send + Sync {
    /// Unique alias; also the configuration key the extension answers to
    fn alias(&self) -> &str;

    /// Register services and parameters from the collected configuration
    fn load(&self, configs: &[Value], container: &mut Container) -> Result<()>;

    /// Optional configuration namespace, reported when the extension loads
    fn namespace(&self) -> Option<&str> {
        None
    }
}
