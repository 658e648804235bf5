use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use crate::user::models::EmailAddress;
use crate::user::models::UserId;

/// Persisted refresh token.
///
/// Bound to one user for its whole lifetime. `revoked_at` only ever moves from
/// `None` to `Some`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshTokenRecord {
    pub token: String,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub revoked_at: Option<DateTime<Utc>>,
}

/// Lifecycle state of a refresh token at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshTokenState {
    Active,
    Revoked,
    Expired,
}

impl RefreshTokenRecord {
    /// Create an active record issued at `now` and living for `ttl`.
    ///
    /// Returns `None` when the expiry falls outside the representable range.
    pub fn issue(
        token: String,
        user_id: UserId,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Option<Self> {
        let expires_at = now.checked_add_signed(ttl)?;

        Some(Self {
            token,
            user_id,
            created_at: now,
            updated_at: now,
            expires_at,
            revoked_at: None,
        })
    }

    /// State of the token as seen at `now`. Revocation wins over expiry.
    pub fn state(&self, now: DateTime<Utc>) -> RefreshTokenState {
        if self.revoked_at.is_some() {
            RefreshTokenState::Revoked
        } else if now > self.expires_at {
            RefreshTokenState::Expired
        } else {
            RefreshTokenState::Active
        }
    }

    /// Mark the token revoked. A second call keeps the first timestamp.
    pub fn revoke(&mut self, at: DateTime<Utc>) {
        if self.revoked_at.is_none() {
            self.revoked_at = Some(at);
            self.updated_at = at;
        }
    }
}

/// Command to log a user in with raw credentials.
///
/// The email is kept unvalidated on purpose: a malformed address must fail
/// exactly like an unknown one.
#[derive(Debug)]
pub struct LoginCommand {
    pub email: String,
    pub password: String,
}

impl LoginCommand {
    pub fn new(email: String, password: String) -> Self {
        Self { email, password }
    }
}

/// Tokens handed out by a successful login.
#[derive(Debug, Clone)]
pub struct Session {
    pub user_id: UserId,
    pub email: EmailAddress,
    pub access_token: String,
    pub refresh_token: String,
}
