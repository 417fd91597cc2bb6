//! Configuration structures for panel clients.
//!
//! A [`PanelConfig`] carries the panel base URL, the Application API key and
//! the HTTP settings used for every request made by a client instance.

use crate::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use url::Url;
use validator::Validate;

/// Configuration for a panel client instance.
///
/// The configuration is fixed for the lifetime of the client built from it.
#[derive(Clone, Serialize, Deserialize, Validate)]
pub struct PanelConfig {
    /// Panel base URL (e.g. `https://panel.example.com`)
    #[validate(url)]
    pub base_url: String,

    /// Application API key sent as a bearer token
    #[serde(skip_serializing)]
    #[validate(length(min = 1, message = "API key must not be empty"))]
    pub api_key: String,

    /// Request timeout in seconds
    #[validate(range(min = 1, max = 300))]
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Whether to verify TLS certificates
    #[serde(default = "default_tls_verify")]
    pub tls_verify: bool,
}

const fn default_request_timeout_secs() -> u64 {
    30
}

const fn default_tls_verify() -> bool {
    true
}

impl PanelConfig {
    /// Create a new configuration with required parameters.
    ///
    /// # Arguments
    ///
    /// * `base_url` - The panel URL (e.g., "https://panel.example.com")
    /// * `api_key` - An Application API key
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or the key is empty.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self, Error> {
        let config = Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            request_timeout_secs: default_request_timeout_secs(),
            tls_verify: default_tls_verify(),
        };

        config.check()?;
        Ok(config)
    }

    /// Re-run validation, e.g. after deserializing from a file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] describing the failing fields.
    pub fn check(&self) -> Result<(), Error> {
        self.validate()
            .map_err(|e| Error::ConfigError(format!("Invalid configuration: {e}")))
    }

    /// Set request timeout in seconds.
    #[must_use]
    pub const fn with_timeout(mut self, seconds: u64) -> Self {
        self.request_timeout_secs = seconds;
        self
    }

    /// Set whether to verify TLS certificates.
    #[must_use]
    pub const fn with_tls_verify(mut self, verify: bool) -> Self {
        self.tls_verify = verify;
        self
    }

    /// Get the request timeout as a Duration.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Parse the base URL, dropping any trailing slash from its path.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be parsed.
    pub fn parse_base_url(&self) -> Result<Url, Error> {
        let trimmed = self.base_url.trim_end_matches('/');
        Url::parse(trimmed).map_err(|e| Error::ConfigError(format!("Invalid panel URL: {e}")))
    }
}

impl fmt::Debug for PanelConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PanelConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("tls_verify", &self.tls_verify)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panel_config_new() {
        let config = PanelConfig::new("https://panel.example.com", "ptla_key").unwrap();
        assert_eq!(config.base_url, "https://panel.example.com");
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert!(config.tls_verify);
    }

    #[test]
    fn test_panel_config_invalid_url() {
        let err = PanelConfig::new("not a url", "ptla_key").unwrap_err();
        assert!(matches!(err, Error::ConfigError(_)));
        assert!(err.is_validation());
    }

    #[test]
    fn test_panel_config_empty_key() {
        let err = PanelConfig::new("https://panel.example.com", "").unwrap_err();
        assert!(matches!(err, Error::ConfigError(_)));
    }

    #[test]
    fn test_panel_config_builder() {
        let config = PanelConfig::new("https://panel.example.com", "ptla_key")
            .unwrap()
            .with_timeout(60)
            .with_tls_verify(false);

        assert_eq!(config.timeout(), Duration::from_secs(60));
        assert!(!config.tls_verify);
    }

    #[test]
    fn test_parse_base_url_trims_trailing_slash() {
        let config = PanelConfig::new("https://panel.example.com/sub/", "ptla_key").unwrap();
        let url = config.parse_base_url().unwrap();
        assert_eq!(url.as_str(), "https://panel.example.com/sub");
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = PanelConfig::new("https://panel.example.com", "ptla_secret").unwrap();
        let debug = format!("{config:?}");
        assert!(!debug.contains("ptla_secret"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn test_deserialize_applies_defaults() {
        let config: PanelConfig = serde_json::from_str(
            r#"{"base_url": "https://panel.example.com", "api_key": "ptla_key"}"#,
        )
        .unwrap();
        assert_eq!(config.request_timeout_secs, 30);
        assert!(config.tls_verify);
        assert!(config.check().is_ok());
    }

    #[test]
    fn test_serialize_skips_api_key() {
        let config = PanelConfig::new("https://panel.example.com", "ptla_secret").unwrap();
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("ptla_secret"));
        assert!(json.contains("panel.example.com"));
    }

    #[test]
    fn test_timeout_out_of_range_rejected() {
        let config = PanelConfig::new("https://panel.example.com", "ptla_key")
            .unwrap()
            .with_timeout(0);
        assert!(config.check().is_err());
    }
}
