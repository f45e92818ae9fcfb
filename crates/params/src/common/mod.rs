//! Common types used throughout the parameter system.
//!
//! Every fallible operation in the crate returns [`Result`], whose error side
//! is the single [`ConfigError`] taxonomy.

/// Error types for schema declaration, overrides, and finalization.
pub mod error;

pub use error::{ConfigError, Result};
