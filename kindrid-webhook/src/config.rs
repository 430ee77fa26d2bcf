//! Configuration module for environment variable parsing.
//!
//! The API secret and webhook URL are required; startup fails if either is
//! missing, empty, or (for the URL) not an absolute http(s) URL.

use std::env;

use crate::error::ConfigError;
use crate::signature::SignatureVerifier;

/// Environment variable holding the Kindrid API secret.
pub const API_SECRET_VAR: &str = "KINDRID_API_SECRET";

/// Environment variable holding the webhook URL registered with Kindrid.
pub const WEBHOOK_URL_VAR: &str = "KINDRID_WEBHOOK_URL";

const DEFAULT_PORT: u16 = 8080;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Verifier for the Kindrid API secret and registered webhook URL.
    /// Validated once here, so request handling never sees bad settings.
    pub verifier: SignatureVerifier,

    /// Port for the web server to listen on
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_secret =
            env::var(API_SECRET_VAR).map_err(|_| ConfigError::Missing(API_SECRET_VAR))?;
        let webhook_url =
            env::var(WEBHOOK_URL_VAR).map_err(|_| ConfigError::Missing(WEBHOOK_URL_VAR))?;
        let port = parse_port(env::var("PORT").ok())?;

        Self::new(api_secret, webhook_url, port)
    }

    /// Build and validate a configuration without touching the environment.
    pub fn new(
        api_secret: impl Into<String>,
        webhook_url: impl Into<String>,
        port: u16,
    ) -> Result<Self, ConfigError> {
        Ok(Config {
            verifier: SignatureVerifier::new(api_secret, webhook_url)?,
            port,
        })
    }

    /// Exact webhook URL signatures are computed over.
    pub fn webhook_url(&self) -> &str {
        self.verifier.endpoint_url()
    }
}

/// Parse the `PORT` value, defaulting when unset.
fn parse_port(raw: Option<String>) -> Result<u16, ConfigError> {
    match raw {
        None => Ok(DEFAULT_PORT),
        Some(value) if value.trim().is_empty() => Ok(DEFAULT_PORT),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidPort { value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_valid() {
        let config = Config::new("abc123", "https://example.com/endpoint", 9000).unwrap();
        assert_eq!(config.webhook_url(), "https://example.com/endpoint");
        assert_eq!(config.port, 9000);
        assert_eq!(
            config.verifier.expected_signature(b"hello"),
            crate::signature::compute_signature(b"https://example.com/endpointhello", b"abc123")
        );
    }

    #[test]
    fn test_new_rejects_empty_values() {
        assert!(matches!(
            Config::new("", "https://example.com/endpoint", 8080),
            Err(ConfigError::Empty(API_SECRET_VAR))
        ));
        assert!(matches!(
            Config::new("abc123", "  ", 8080),
            Err(ConfigError::Empty(WEBHOOK_URL_VAR))
        ));
    }

    #[test]
    fn test_new_rejects_relative_url() {
        assert!(matches!(
            Config::new("abc123", "example.com/endpoint", 8080),
            Err(ConfigError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn test_parse_port() {
        assert_eq!(parse_port(None).unwrap(), 8080);
        assert_eq!(parse_port(Some("".to_string())).unwrap(), 8080);
        assert_eq!(parse_port(Some("3000".to_string())).unwrap(), 3000);
        assert!(matches!(
            parse_port(Some("http".to_string())),
            Err(ConfigError::InvalidPort { .. })
        ));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = Config::new("super-secret", "https://example.com/endpoint", 8080).unwrap();
        assert!(!format!("{config:?}").contains("super-secret"));
    }
}
