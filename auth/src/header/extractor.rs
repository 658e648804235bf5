use http::header::AUTHORIZATION;
use http::HeaderMap;

use super::errors::HeaderError;

pub const BEARER_PREFIX: &str = "Bearer ";
pub const API_KEY_PREFIX: &str = "ApiKey ";

/// Extract a bearer token from the `Authorization` header.
///
/// The prefix match is case-sensitive and the remainder is returned verbatim.
///
/// # Errors
/// * `Missing` - No `Authorization` header, or an empty one
/// * `Malformed` - Header is not text or does not start with `Bearer `
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, HeaderError> {
    let value = authorization(headers)?;

    value
        .strip_prefix(BEARER_PREFIX)
        .ok_or(HeaderError::Malformed)
}

/// Extract an API key from the `Authorization` header.
///
/// Unlike `bearer_token`, surrounding whitespace is trimmed from the key.
///
/// # Errors
/// * `Missing` - No `Authorization` header, or an empty one
/// * `Malformed` - Header is not text or does not start with `ApiKey `
pub fn api_key(headers: &HeaderMap) -> Result<&str, HeaderError> {
    let value = authorization(headers)?;

    value
        .strip_prefix(API_KEY_PREFIX)
        .map(str::trim)
        .ok_or(HeaderError::Malformed)
}

fn authorization(headers: &HeaderMap) -> Result<&str, HeaderError> {
    let header = headers.get(AUTHORIZATION).ok_or(HeaderError::Missing)?;

    if header.is_empty() {
        return Err(HeaderError::Missing);
    }

    header.to_str().map_err(|_| HeaderError::Malformed)
}
