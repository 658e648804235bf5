use thiserror::Error;

/// Error type for password operations.
///
/// Verification failures are deliberately collapsed into `Mismatch`: a wrong
/// password and an unreadable stored digest look the same to the caller.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Password does not match")]
    Mismatch,
}
