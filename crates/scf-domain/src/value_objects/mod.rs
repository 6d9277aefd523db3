//! Domain Value Objects
//!
//! Building blocks of a container: what a service is, how it refers to
//! other services and which parameters it may interpolate.
//!
//! ## Value Objects
//!
//! | Value Object | Description |
//! |--------------|-------------|
//! | [`Definition`] | Declarative description of a service |
//! | [`Argument`] | Constructor or method-call argument |
//! | [`Reference`] | Pointer to another service by id |
//! | [`Alias`] | Alternative id for an existing service |
//! | [`ParameterBag`] | Named parameters with `%placeholder%` resolution |
//! | [`PassPhase`] | Ordered compiler pass execution phase |

/// Service aliases
pub mod alias;
/// Constructor and method-call arguments
pub mod argument;
/// Service definitions
pub mod definition;
/// Parameter storage and placeholder resolution
pub mod parameter;
/// Compiler pass phases
pub mod phase;
/// Service references
pub mod reference;

pub use alias::Alias;
pub use argument::Argument;
pub use definition::{Definition, MethodCall, TagAttributes};
pub use parameter::ParameterBag;
pub use phase::PassPhase;
pub use reference::{InvalidBehavior, Reference};
