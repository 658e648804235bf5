use std::env;

use chrono::Duration;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    #[serde(default = "default_issuer")]
    pub issuer: String,
    #[serde(default = "default_access_token_ttl_seconds")]
    pub access_token_ttl_seconds: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionConfig {
    #[serde(default = "default_refresh_token_ttl_days")]
    pub refresh_token_ttl_days: i64,
}

/// Shortest signing secret accepted for HS256.
pub const MIN_SECRET_BYTES: usize = 32;

/// Longest accepted access token lifetime (one day).
pub const MAX_ACCESS_TOKEN_TTL_SECONDS: i64 = 24 * 60 * 60;

/// Longest accepted refresh token lifetime (ten years).
pub const MAX_REFRESH_TOKEN_TTL_DAYS: i64 = 3650;

impl JwtConfig {
    /// Access token lifetime. Values beyond chrono's range saturate.
    pub fn access_token_ttl(&self) -> Duration {
        Duration::try_seconds(self.access_token_ttl_seconds).unwrap_or(Duration::MAX)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.secret.len() < MIN_SECRET_BYTES {
            return Err(ConfigError::Message(format!(
                "jwt.secret must be at least {} bytes",
                MIN_SECRET_BYTES
            )));
        }

        if !(1..=MAX_ACCESS_TOKEN_TTL_SECONDS).contains(&self.access_token_ttl_seconds) {
            return Err(ConfigError::Message(format!(
                "jwt.access_token_ttl_seconds must be between 1 and {}",
                MAX_ACCESS_TOKEN_TTL_SECONDS
            )));
        }

        Ok(())
    }
}

impl SessionConfig {
    /// Refresh token lifetime. Values beyond chrono's range saturate.
    pub fn refresh_token_ttl(&self) -> Duration {
        Duration::try_days(self.refresh_token_ttl_days).unwrap_or(Duration::MAX)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_REFRESH_TOKEN_TTL_DAYS).contains(&self.refresh_token_ttl_days) {
            return Err(ConfigError::Message(format!(
                "session.refresh_token_ttl_days must be between 1 and {}",
                MAX_REFRESH_TOKEN_TTL_DAYS
            )));
        }

        Ok(())
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            refresh_token_ttl_days: default_refresh_token_ttl_days(),
        }
    }
}

fn default_max_connections() -> u32 {
    5
}

fn default_issuer() -> String {
    auth::jwt::DEFAULT_ISSUER.to_string()
}

fn default_access_token_ttl_seconds() -> i64 {
    3600
}

fn default_refresh_token_ttl_days() -> i64 {
    60
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, JWT__SECRET, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on environment-specific configuration
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Layer on environment variables (with __ as separator)
            // Example: JWT__SECRET=... overrides jwt.secret
            .add_source(Environment::with_prefix("").separator("__"))
            .build()?;

        let config: Config = configuration.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    /// Reject settings the service cannot run safely with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.jwt.validate()?;
        self.session.validate()
    }
}
