//! Core domain entities.
//!
//! - [`UrlMapping`] - A stored original URL and its short id
//! - [`NewUrlMapping`] - Input for creating a mapping

pub mod url_mapping;

pub use url_mapping::{NewUrlMapping, UrlMapping};
