use auth::AuthenticationError;
use auth::TokenError;
use thiserror::Error;

use crate::user::errors::UserError;

/// Top-level error for all session operations.
///
/// Classification only; the inbound layer picks status codes and messages.
#[derive(Debug, Clone, Error)]
pub enum SessionError {
    /// Login failed. Unknown email and wrong password are not distinguished.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Refresh token unknown, revoked or expired.
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Token error: {0}")]
    Token(#[from] TokenError),

    // Cryptographic primitive failures, never retried
    #[error("Password hashing failed: {0}")]
    Hashing(String),

    #[error("Entropy source failed: {0}")]
    Entropy(String),

    #[error("Token lifetime out of range")]
    LifetimeOutOfRange,

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<AuthenticationError> for SessionError {
    fn from(err: AuthenticationError) -> Self {
        match err {
            AuthenticationError::InvalidCredentials => SessionError::InvalidCredentials,
            AuthenticationError::PasswordError(e) => SessionError::Hashing(e.to_string()),
            AuthenticationError::TokenError(e) => SessionError::Token(e),
            AuthenticationError::EntropyError(e) => SessionError::Entropy(e.to_string()),
        }
    }
}

impl From<UserError> for SessionError {
    fn from(err: UserError) -> Self {
        SessionError::DatabaseError(err.to_string())
    }
}
