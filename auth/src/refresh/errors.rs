use thiserror::Error;

/// The operating system random source could not be read.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Secure random source unavailable: {0}")]
pub struct EntropyError(pub String);
