use rand::rngs::OsRng;
use rand::RngCore;

use super::errors::EntropyError;

/// Refresh token size in bytes (32 bytes = 256 bits of entropy)
pub const REFRESH_TOKEN_BYTES: usize = 32;

/// Length of the hex encoding of a refresh token.
pub const REFRESH_TOKEN_LENGTH: usize = REFRESH_TOKEN_BYTES * 2;

/// Generator for opaque refresh tokens.
///
/// Reads straight from the operating system CSPRNG; there is no fallback
/// generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct RefreshTokenIssuer;

impl RefreshTokenIssuer {
    pub fn new() -> Self {
        Self
    }

    /// Generate a new refresh token.
    ///
    /// # Returns
    /// 64 lowercase hex characters
    ///
    /// # Errors
    /// * `EntropyError` - The OS random source failed
    pub fn generate(&self) -> Result<String, EntropyError> {
        let mut buffer = [0u8; REFRESH_TOKEN_BYTES];
        OsRng
            .try_fill_bytes(&mut buffer)
            .map_err(|e| EntropyError(e.to_string()))?;

        Ok(hex::encode(buffer))
    }

    /// Check that `token` has the shape of a generated refresh token.
    pub fn is_well_formed(token: &str) -> bool {
        token.len() == REFRESH_TOKEN_LENGTH
            && token
                .bytes()
                .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
    }
}
