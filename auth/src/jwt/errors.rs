use thiserror::Error;

/// Error type for access token operations.
///
/// Verification failures share the single `Invalid` kind so the caller cannot
/// tell a bad signature from an expired or malformed token.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Failed to sign token: {0}")]
    SigningFailed(String),

    #[error("Token is invalid")]
    Invalid,
}
