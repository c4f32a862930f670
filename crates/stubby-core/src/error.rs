use thiserror::Error;

/// Errors produced when a string cannot be used as a [`Token`][crate::Token].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("token cannot be empty")]
    Empty,
    #[error("token length must be at most {max}, got {len}")]
    TooLong { len: usize, max: usize },
    #[error("token must contain only ASCII letters and digits: '{0}'")]
    InvalidCharacter(String),
}

/// Result type for mapping store operations.
pub type StorageResult<T> = std::result::Result<T, StorageError>;

#[derive(Debug, Clone, Error)]
pub enum StorageError {
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
    #[error("storage operation timed out: {0}")]
    Timeout(String),
    #[error("storage query failed: {0}")]
    Query(String),
    #[error("stored data is invalid: {0}")]
    InvalidData(String),
}

/// Errors that cross the shortener boundary.
///
/// Token collisions never show up here, they are absorbed by the retry loop.
#[derive(Debug, Clone, Error)]
pub enum ShortenerError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("no free token found after {attempts} attempts")]
    RetryExhausted { attempts: u32 },
    #[error("invalid retry policy: {0}")]
    InvalidPolicy(String),
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Result type for shortener operations.
pub type Result<T> = std::result::Result<T, ShortenerError>;
