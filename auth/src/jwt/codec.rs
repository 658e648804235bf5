use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use uuid::Uuid;

use super::claims::Claims;
use super::errors::TokenError;

/// Issuer written into every token unless configured otherwise.
pub const DEFAULT_ISSUER: &str = "chirpy";

/// Access token codec.
///
/// Mints and verifies short-lived HS256 tokens whose subject is a user
/// identifier. The signing key and lifetime come from configuration and are
/// fixed for the life of the codec; the key is never part of the token.
pub struct AccessTokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    issuer: String,
    ttl: Duration,
}

impl AccessTokenCodec {
    /// Create a new codec with a secret key and token lifetime.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens
    /// * `ttl` - Lifetime of each minted token
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation: Self::validation(DEFAULT_ISSUER),
            issuer: DEFAULT_ISSUER.to_string(),
            ttl,
        }
    }

    /// Replace the issuer written into and required from tokens.
    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = issuer.into();
        self.validation = Self::validation(&self.issuer);
        self
    }

    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    /// Mint a token for `subject`, issued now.
    ///
    /// # Errors
    /// * `SigningFailed` - Token encoding failed
    pub fn mint(&self, subject: Uuid) -> Result<String, TokenError> {
        self.mint_at(subject, Utc::now())
    }

    /// Mint a token for `subject` with an explicit issue time.
    ///
    /// # Errors
    /// * `SigningFailed` - Token encoding failed
    pub fn mint_at(&self, subject: Uuid, issued_at: DateTime<Utc>) -> Result<String, TokenError> {
        let claims = Claims::for_subject(&self.issuer, subject, issued_at, self.ttl)
            .ok_or_else(|| TokenError::SigningFailed("token lifetime out of range".to_string()))?;
        let header = Header::new(Algorithm::HS256);

        encode(&header, &claims, &self.encoding_key)
            .map_err(|e| TokenError::SigningFailed(e.to_string()))
    }

    /// Verify a token and return its subject.
    ///
    /// Signature, algorithm, issuer, expiry and subject format are all checked;
    /// there is no leeway on expiry.
    ///
    /// # Errors
    /// * `Invalid` - Any check failed, whatever the cause
    pub fn verify(&self, token: &str) -> Result<Uuid, TokenError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|_| TokenError::Invalid)?;
        let claims = token_data.claims;

        if claims.is_expired(Utc::now().timestamp()) {
            return Err(TokenError::Invalid);
        }

        claims.subject().ok_or(TokenError::Invalid)
    }

    fn validation(issuer: &str) -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.set_issuer(&[issuer]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);
        validation
    }
}
