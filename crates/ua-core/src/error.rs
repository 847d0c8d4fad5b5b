//! Framework error type.
//!
//! Everything here is a configuration error: an invalid behavior definition
//! detected while building or initializing a brain.  Sub-crates wrap
//! `UaError` as one variant of their own enums.

use thiserror::Error;

/// The top-level error type for `ua-core` and a common base for sub-crates.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum UaError {
    #[error("consideration {name:?}: min_range ({min}) must be less than max_range ({max})")]
    InvalidRange {
        name: String,
        min:  f32,
        max:  f32,
    },

    #[error("action {name:?}: weight {weight} is outside [0, 10]")]
    InvalidWeight {
        name:   String,
        weight: f32,
    },

    #[error("guid of {name:?} is already set and cannot be reassigned")]
    GuidReassigned { name: String },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),
}

/// Shorthand result type for all `ua-*` crates.
pub type UaResult<T> = Result<T, UaError>;
