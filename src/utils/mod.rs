//! Utility functions for id generation, URL processing, and error classification.
//!
//! - [`id_generator`] - Numeric short id generation with bounded retry
//! - [`url_normalizer`] - URL validation and canonicalization
//! - [`db_error`] - Database error classification

pub mod db_error;
pub mod id_generator;
pub mod url_normalizer;
