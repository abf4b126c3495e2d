//! Cache error types.

use thiserror::Error;

/// Errors raised by a cache backend.
///
/// Every variant means the cache could not answer. None of them means "the
/// key is absent"; that is `Ok(None)`.
#[derive(Debug, Error)]
pub enum CacheError {
    /// Failed to reach the cache backend.
    #[error("cache connection error: {0}")]
    ConnectionError(String),

    /// Failed to serialize or deserialize a cached value.
    #[error("cache serialization error: {0}")]
    SerializationError(String),

    /// The backend did not answer within the operation timeout.
    #[error("cache operation timed out: {0}")]
    Timeout(String),

    /// The backend answered with an error.
    #[error("cache backend error: {0}")]
    BackendError(String),
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;
