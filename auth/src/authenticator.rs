use chrono::Duration;
use uuid::Uuid;

use crate::jwt::AccessTokenCodec;
use crate::jwt::TokenError;
use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::refresh::EntropyError;
use crate::refresh::RefreshTokenIssuer;

/// Authentication coordinator combining password verification, access token
/// minting and refresh token generation.
///
/// Holds no mutable state; share it behind an `Arc`.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    access_tokens: AccessTokenCodec,
    refresh_tokens: RefreshTokenIssuer,
}

/// Result of successful authentication.
#[derive(Debug, Clone)]
pub struct AuthenticationResult {
    /// Signed access token
    pub access_token: String,

    /// Opaque refresh token, not yet persisted
    pub refresh_token: String,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(PasswordError),

    #[error("Token error: {0}")]
    TokenError(#[from] TokenError),

    #[error("Entropy error: {0}")]
    EntropyError(#[from] EntropyError),
}

impl From<PasswordError> for AuthenticationError {
    fn from(err: PasswordError) -> Self {
        match err {
            PasswordError::Mismatch => AuthenticationError::InvalidCredentials,
            other => AuthenticationError::PasswordError(other),
        }
    }
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `secret` - Secret key for access token signing
    /// * `access_token_ttl` - Lifetime of minted access tokens
    pub fn new(secret: &[u8], access_token_ttl: Duration) -> Self {
        Self::with_codec(AccessTokenCodec::new(secret, access_token_ttl))
    }

    /// Create an authenticator around an already configured codec.
    pub fn with_codec(access_tokens: AccessTokenCodec) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            access_tokens,
            refresh_tokens: RefreshTokenIssuer::new(),
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `HashingFailed` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify credentials and issue an access token and a refresh token.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `subject` - User identifier to put in the access token
    ///
    /// # Returns
    /// AuthenticationResult with both tokens
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `TokenError` - Token signing failed
    /// * `EntropyError` - Refresh token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        subject: Uuid,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        self.password_hasher.verify(password, stored_hash)?;

        let access_token = self.access_tokens.mint(subject)?;
        let refresh_token = self.refresh_tokens.generate()?;

        Ok(AuthenticationResult {
            access_token,
            refresh_token,
        })
    }

    /// Reject a login attempt for an account that does not exist.
    ///
    /// Spends the same hashing work as `authenticate` so both failure paths
    /// take about as long.
    ///
    /// # Returns
    /// `InvalidCredentials`, or `PasswordError` if hashing itself failed
    pub fn reject(&self, password: &str) -> AuthenticationError {
        match self.password_hasher.verify_absent(password) {
            Ok(()) => AuthenticationError::InvalidCredentials,
            Err(err) => err.into(),
        }
    }

    /// Mint an access token without password verification.
    ///
    /// Used by the refresh flow, where the refresh token already proved the
    /// identity.
    ///
    /// # Errors
    /// * `SigningFailed` - Token signing failed
    pub fn generate_token(&self, subject: Uuid) -> Result<String, TokenError> {
        self.access_tokens.mint(subject)
    }

    /// Validate an access token and return its subject.
    ///
    /// # Errors
    /// * `Invalid` - Token failed verification
    pub fn validate_token(&self, token: &str) -> Result<Uuid, TokenError> {
        self.access_tokens.verify(token)
    }
}
