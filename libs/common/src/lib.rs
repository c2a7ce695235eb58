//! Shared config and error definitions for the london-times workspace.

pub mod config;
pub mod error;

pub use config::{Adjustments, LookupConfig};
pub use error::Error;

/// Convenience Result alias.
pub type Result<T> = std::result::Result<T, Error>;
