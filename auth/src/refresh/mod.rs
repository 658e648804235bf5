pub mod errors;
pub mod issuer;

pub use errors::EntropyError;
pub use issuer::RefreshTokenIssuer;
pub use issuer::REFRESH_TOKEN_LENGTH;
