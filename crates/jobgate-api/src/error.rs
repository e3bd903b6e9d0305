//! Error types for job key construction.

use thiserror::Error;

/// Result type alias for job key parsing and validation.
pub type KeyResult<T> = Result<T, KeyError>;

/// Errors raised while building a job identifier.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum KeyError {
    #[error("{0} must not be empty")]
    Empty(&'static str),

    #[error("invalid {field} {value:?}: only letters, digits, '_', '-' and '.' are allowed")]
    InvalidComponent { field: &'static str, value: String },

    #[error("malformed job identifier {0:?}: expected cluster/role/environment/name")]
    Malformed(String),
}
