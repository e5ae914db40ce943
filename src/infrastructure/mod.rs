//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer.
//!
//! # Modules
//!
//! - [`persistence`] - Mapping store implementations
//! - [`resolver`] - DNS lookups for URL validation

pub mod persistence;
pub mod resolver;
