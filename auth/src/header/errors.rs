use thiserror::Error;

/// Error type for credential extraction from request headers.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum HeaderError {
    #[error("Authorization header is missing")]
    Missing,

    #[error("Authorization header is malformed")]
    Malformed,
}
