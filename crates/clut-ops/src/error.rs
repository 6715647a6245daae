//! Error types for transform operations.

use thiserror::Error;

/// Error type for transform operations.
#[derive(Error, Debug)]
pub enum OpsError {
    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// A dedicated worker pool could not be created.
    #[error("thread pool: {0}")]
    ThreadPool(String),
}

/// Result type for transform operations.
pub type OpsResult<T> = Result<T, OpsError>;
