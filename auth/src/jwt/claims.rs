use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

/// Claim set carried by an access token.
///
/// Only the registered claims the session layer relies on: issuer, subject
/// (the user identity in canonical UUID form), issued-at and expiry as Unix
/// timestamps.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Issuer
    pub iss: String,

    /// Subject (user identifier)
    pub sub: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Create claims for a subject, valid for `ttl` starting at `issued_at`.
    ///
    /// Returns `None` when the expiry falls outside the representable range.
    ///
    /// # Arguments
    /// * `issuer` - Issuer constant of the service
    /// * `subject` - User identifier
    /// * `issued_at` - Mint time
    /// * `ttl` - Lifetime of the token
    pub fn for_subject(
        issuer: impl ToString,
        subject: Uuid,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Option<Self> {
        let expiration = issued_at.checked_add_signed(ttl)?;

        Some(Self {
            iss: issuer.to_string(),
            sub: subject.to_string(),
            iat: issued_at.timestamp(),
            exp: expiration.timestamp(),
        })
    }

    /// Parse the subject back into a user identifier.
    pub fn subject(&self) -> Option<Uuid> {
        Uuid::parse_str(&self.sub).ok()
    }

    /// Check if token is expired.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp < current_timestamp
    }
}
