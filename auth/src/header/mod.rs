pub mod errors;
pub mod extractor;

pub use errors::HeaderError;
pub use extractor::api_key;
pub use extractor::bearer_token;
