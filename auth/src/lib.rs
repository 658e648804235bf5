//! Credential utilities library
//!
//! Provides the cryptographic leaves of the session subsystem:
//! - Password hashing (Argon2id)
//! - Access token minting and verification (HS256 JWT)
//! - Refresh token generation (256-bit, hex)
//! - Credential extraction from `Authorization` headers
//! - Authentication coordination
//!
//! Nothing here logs or touches storage; callers receive classified errors and
//! decide what to do with them.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).is_ok());
//! ```
//!
//! ## Access Tokens
//! ```
//! use auth::AccessTokenCodec;
//! use chrono::Duration;
//! use uuid::Uuid;
//!
//! let codec = AccessTokenCodec::new(b"secret_key_at_least_32_bytes_long!", Duration::hours(1));
//! let user_id = Uuid::new_v4();
//! let token = codec.mint(user_id).unwrap();
//! assert_eq!(codec.verify(&token).unwrap(), user_id);
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::Authenticator;
//! use chrono::Duration;
//! use uuid::Uuid;
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!", Duration::hours(1));
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and issue tokens
//! let user_id = Uuid::new_v4();
//! let result = auth.authenticate("password123", &hash, user_id).unwrap();
//! assert_eq!(result.refresh_token.len(), 64);
//!
//! // Validate token
//! assert_eq!(auth.validate_token(&result.access_token).unwrap(), user_id);
//! ```

pub mod authenticator;
pub mod header;
pub mod jwt;
pub mod password;
pub mod refresh;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use header::api_key;
pub use header::bearer_token;
pub use header::HeaderError;
pub use jwt::AccessTokenCodec;
pub use jwt::Claims;
pub use jwt::TokenError;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use refresh::EntropyError;
pub use refresh::RefreshTokenIssuer;
