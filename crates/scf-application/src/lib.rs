//! # Application Layer
//!
//! Orchestrates container assembly on top of the domain's container
//! engine.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`factory`] | [`ContainerFactory`], the registry of extensions and compiler passes |
//! | [`bootstrap`] | linkme catalogs and YAML registration manifests |
//! | [`cache`] | [`ContainerCache`] for reusing dumped containers |

pub mod bootstrap;
pub mod cache;
pub mod factory;

pub use cache::ContainerCache;
pub use factory::{ContainerFactory, Registration};
