use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;

use crate::session::errors::SessionError;
use crate::session::models::LoginCommand;
use crate::session::models::RefreshTokenRecord;
use crate::session::models::Session;
use crate::user::models::UserId;

/// Port for session domain service operations.
#[async_trait]
pub trait SessionServicePort: Send + Sync + 'static {
    /// Verify credentials and open a session.
    ///
    /// # Arguments
    /// * `command` - Raw email and password
    ///
    /// # Returns
    /// Access token, refresh token and the user they belong to
    ///
    /// # Errors
    /// * `InvalidCredentials` - Malformed or unknown email, or wrong password
    /// * `Hashing` / `Entropy` / `Token` - Cryptographic failure
    /// * `DatabaseError` - Database operation failed
    async fn login(&self, command: LoginCommand) -> Result<Session, SessionError>;

    /// Mint a new access token from a refresh token.
    ///
    /// The refresh token itself is left untouched.
    ///
    /// # Arguments
    /// * `refresh_token` - Raw refresh token string
    ///
    /// # Returns
    /// New access token
    ///
    /// # Errors
    /// * `Unauthorized` - Token unknown, revoked or expired
    /// * `Token` - Token signing failed
    /// * `DatabaseError` - Database operation failed
    async fn refresh(&self, refresh_token: &str) -> Result<String, SessionError>;

    /// Revoke a refresh token.
    ///
    /// Idempotent: unknown and already revoked tokens succeed.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn revoke(&self, refresh_token: &str) -> Result<(), SessionError>;

    /// Resolve an access token to the user it was minted for.
    ///
    /// # Errors
    /// * `Token` - Token failed verification
    fn authenticate(&self, access_token: &str) -> Result<UserId, SessionError>;
}

/// Persistence operations for refresh tokens.
///
/// Implementations must make a revoke visible to the next `find` of the same
/// token.
#[async_trait]
pub trait RefreshTokenRepository: Send + Sync + 'static {
    /// Retrieve a refresh token record by its raw token string.
    ///
    /// # Returns
    /// Optional record (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find(&self, token: &str) -> Result<Option<RefreshTokenRecord>, SessionError>;

    /// Persist a newly issued refresh token.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn save(&self, record: RefreshTokenRecord) -> Result<(), SessionError>;

    /// Set `revoked_at` if it is not set yet.
    ///
    /// Unknown tokens are ignored.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn revoke(&self, token: &str, revoked_at: DateTime<Utc>) -> Result<(), SessionError>;
}
