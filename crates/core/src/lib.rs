//! modelgen-core
//!
//! Core library for generating taint-analysis entry-point models from a
//! type index.
//!
//! This crate defines the taint-specification data model, the query boundary
//! to an external type-indexing service, the subclass-flattening algorithm,
//! the composable model-generator pipeline, and the built-in domain profiles.
//!
//! The goal is to keep all substantive logic here so it is fully testable
//! and reusable from multiple frontends (CLI, service integrations, etc.).

pub mod generate;
pub mod hierarchy;
pub mod model;
pub mod profiles;
pub mod query;

/// Returns the library version as encoded at compile time.
///
/// Useful for tests and for frontends to report consistent version info.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
