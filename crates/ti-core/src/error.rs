//! Core error type.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unknown weight attribute {0:?}: expected \"travel_time\" or \"length\"")]
    UnknownWeight(String),
}

/// Shorthand result type for `ti-core`.
pub type CoreResult<T> = Result<T, CoreError>;
