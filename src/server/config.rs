/**
 * Server Configuration
 *
 * All configuration comes from environment variables, read once at boot.
 * Required values (database URL, session secret, music API key) are fatal
 * when missing; optional values fall back to development defaults.
 *
 * Reading everything up front keeps the rest of the codebase free of
 * `std::env` calls: the music client, the session layer, and the CORS
 * policy all receive their settings through this struct.
 */

use axum::http::HeaderValue;
use thiserror::Error;

/// Default base URL of the external music-generation provider.
pub const DEFAULT_MUSIC_API_URL: &str = "https://api.topmediai.com/v1";

/// Configuration errors raised during startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    MissingVar(&'static str),

    #[error("invalid value for {0}")]
    InvalidVar(&'static str),
}

/// Application configuration, fully resolved at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Postgres connection string (`DATABASE_URL`, required)
    pub database_url: String,
    /// HMAC secret for signing session tokens (`JWT_SECRET`, required)
    pub jwt_secret: String,
    /// API key for the music-generation provider (`MUSIC_API_KEY`, required)
    pub music_api_key: String,
    /// Base URL of the music-generation provider (`MUSIC_API_URL`)
    pub music_api_url: String,
    /// Web origin allowed by CORS (`FRONTEND_ORIGIN`)
    pub frontend_origin: HeaderValue,
    /// Domain attribute for session/CSRF cookies (`COOKIE_DOMAIN`).
    /// Empty means host-only cookies.
    pub cookie_domain: String,
    /// Listen port (`SERVER_PORT`)
    pub port: u16,
}

impl Config {
    /// Load configuration from the environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a required variable is missing or an
    /// optional one has an unusable value (bad origin, non-numeric port).
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = require("DATABASE_URL")?;
        let jwt_secret = require("JWT_SECRET")?;
        let music_api_key = require("MUSIC_API_KEY")?;

        let music_api_url = std::env::var("MUSIC_API_URL")
            .unwrap_or_else(|_| DEFAULT_MUSIC_API_URL.to_string());

        let frontend_origin = std::env::var("FRONTEND_ORIGIN")
            .unwrap_or_else(|_| "http://localhost:3000".to_string())
            .parse::<HeaderValue>()
            .map_err(|_| ConfigError::InvalidVar("FRONTEND_ORIGIN"))?;

        let cookie_domain = std::env::var("COOKIE_DOMAIN").unwrap_or_default();

        let port = std::env::var("SERVER_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidVar("SERVER_PORT"))?;

        Ok(Self {
            database_url,
            jwt_secret,
            music_api_key,
            music_api_url,
            frontend_origin,
            cookie_domain,
            port,
        })
    }
}

fn require(key: &'static str) -> Result<String, ConfigError> {
    match std::env::var(key) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => {
            tracing::error!("Required environment variable {} is not set", key);
            Err(ConfigError::MissingVar(key))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config {
            database_url: "postgres://localhost/melodiary".to_string(),
            jwt_secret: "secret".to_string(),
            music_api_key: "key".to_string(),
            music_api_url: DEFAULT_MUSIC_API_URL.to_string(),
            frontend_origin: "http://localhost:3000".parse().unwrap(),
            cookie_domain: String::new(),
            port: 8080,
        }
    }

    #[test]
    fn default_music_api_url_is_provider_base() {
        let config = test_config();
        assert_eq!(config.music_api_url, "https://api.topmediai.com/v1");
    }

    #[test]
    fn missing_required_var_is_an_error() {
        // Use a name no environment will have set
        let result = require("MELODIARY_TEST_UNSET_VARIABLE");
        assert!(matches!(result, Err(ConfigError::MissingVar(_))));
    }
}
