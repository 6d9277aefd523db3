//! # Domain Layer
//!
//! Core types of the Shared Container Factory: the dependency-injection
//! [`Container`], the value objects it is made of, and the ports that
//! extensions, compiler passes, loaders and dumpers implement.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`container`] | Container engine and built-in compiler passes |
//! | [`error`] | Error type and `Result` alias |
//! | [`ports`] | `Extension`, `CompilerPass`, `ServiceFileLoader`, `ContainerDumper` |
//! | [`value_objects`] | Definitions, arguments, references, parameters, phases |
//!
//! ## Example
//!
//! ```
//! use scf_domain::{Container, Definition};
//!
//! let mut container = Container::new();
//! container.set_parameter("mailer.transport", "smtp").unwrap();
//! container
//!     .set_definition("mailer", Definition::new("App\\Mailer").with_argument("%mailer.transport%"))
//!     .unwrap();
//! container.compile().unwrap();
//!
//! let mailer = container.definition("mailer").unwrap();
//! assert_eq!(mailer.arguments[0], scf_domain::Argument::value("smtp"));
//! ```

pub mod container;
pub mod error;
pub mod ports;
pub mod value_objects;

pub use container::{Container, PassConfig};
pub use error::{Error, RegistrationKind, Result};
pub use ports::{CompilerPass, ContainerDumper, DumpOptions, Extension, ServiceFileLoader};
pub use value_objects::{
    Alias, Argument, Definition, InvalidBehavior, MethodCall, ParameterBag, PassPhase, Reference,
    TagAttributes,
};
