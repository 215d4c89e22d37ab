//! Configuration module for the scale3x tool
//!
//! Provides types, discovery and parsing for `scale3x.toml`.

pub mod loader;
pub mod schema;

pub use loader::*;
pub use schema::*;
