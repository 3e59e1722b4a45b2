//! # Configuration Settings
//!
//! Connection settings for the Connect client and the context consulted by the
//! config loader.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::secret::SecretString;
use super::{ENV_CLIENT_TIMEOUT, ENV_CONNECT_HOST, ENV_CONNECT_TOKEN, ENV_VAULT};
use crate::errors::{ConnectError, Result};

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Read `OP_CONNECT_CLIENT_REQ_TIMEOUT` in seconds, or the default when it is
/// unset or blank
pub fn timeout_from_env() -> Result<u64> {
    match std::env::var(ENV_CLIENT_TIMEOUT) {
        Ok(raw) if !raw.trim().is_empty() => raw.trim().parse().map_err(|e| {
            ConnectError::config(format!("Invalid {}: '{}' ({})", ENV_CLIENT_TIMEOUT, raw, e))
        }),
        _ => Ok(DEFAULT_TIMEOUT_SECONDS),
    }
}

/// Connection settings for a Connect server
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ClientConfig {
    /// Base URL of the Connect server (e.g. "http://localhost:8080")
    #[validate(url(message = "Connect host must be a valid URL"))]
    pub base_url: String,

    /// Bearer token sent with every request
    pub token: SecretString,

    /// Request timeout in seconds
    #[validate(range(min = 1, max = 600, message = "Timeout must be between 1 and 600 seconds"))]
    pub timeout_seconds: u64,

    /// PEM bundle added to the trusted roots, for servers behind a private CA
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ca_file: Option<PathBuf>,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>, token: impl Into<SecretString>) -> Self {
        Self {
            base_url: base_url.into(),
            token: token.into(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            ca_file: None,
        }
    }

    /// Set the request timeout in seconds
    pub fn with_timeout(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = timeout_seconds;
        self
    }

    /// Trust the certificates of a PEM file in addition to the system roots
    pub fn with_ca_file(mut self, ca_file: impl Into<PathBuf>) -> Self {
        self.ca_file = Some(ca_file.into());
        self
    }

    /// Build the configuration from `OP_CONNECT_HOST`, `OP_CONNECT_TOKEN` and
    /// the optional `OP_CONNECT_CLIENT_REQ_TIMEOUT`.
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var(ENV_CONNECT_HOST)
            .map_err(|_| ConnectError::EnvironmentNotSet { variable: ENV_CONNECT_HOST })?;
        let token = std::env::var(ENV_CONNECT_TOKEN)
            .map_err(|_| ConnectError::EnvironmentNotSet { variable: ENV_CONNECT_TOKEN })?;

        Ok(Self::new(base_url, token).with_timeout(timeout_from_env()?))
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        Validate::validate(self)?;

        if self.token.is_empty() {
            return Err(ConnectError::config("Connect token cannot be empty"));
        }

        Ok(())
    }

    /// Base URL without a trailing slash
    pub fn base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// Get request timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

/// Context consulted while resolving field declarations.
///
/// Carries the vault used for any field whose tag omits `opvault`. Passing it
/// explicitly keeps concurrent loads with different defaults independent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadContext {
    default_vault: Option<String>,
}

impl LoadContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default_vault(mut self, vault: impl Into<String>) -> Self {
        let vault = vault.into();
        self.default_vault = if vault.is_empty() { None } else { Some(vault) };
        self
    }

    /// Read the default vault from `OP_VAULT`
    pub fn from_env() -> Self {
        match std::env::var(ENV_VAULT) {
            Ok(vault) => Self::new().with_default_vault(vault),
            Err(_) => Self::new(),
        }
    }

    pub fn default_vault(&self) -> Option<&str> {
        self.default_vault.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_config_defaults() {
        let config = ClientConfig::new("https://connect.example.com/", "jwt_token");
        assert_eq!(config.timeout_seconds, DEFAULT_TIMEOUT_SECONDS);
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert_eq!(config.base_url(), "https://connect.example.com");
        assert!(config.ca_file.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_client_config_with_ca_file() {
        let config = ClientConfig::new("https://test.com", "token")
            .with_ca_file("path/to/ca.pem")
            .with_timeout(60);
        assert_eq!(config.ca_file, Some(PathBuf::from("path/to/ca.pem")));
        assert_eq!(config.timeout(), Duration::from_secs(60));
    }

    #[test]
    fn test_client_config_rejects_bad_url() {
        let config = ClientConfig::new("not a url", "token");
        assert!(matches!(config.validate(), Err(ConnectError::Config { .. })));
    }

    #[test]
    fn test_client_config_rejects_empty_token() {
        let config = ClientConfig::new("http://localhost:8080", "");
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("token"));
    }

    #[test]
    fn test_client_config_rejects_zero_timeout() {
        let config = ClientConfig::new("http://localhost:8080", "token").with_timeout(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_client_config_debug_hides_token() {
        let config = ClientConfig::new("http://localhost:8080", "super-secret-token");
        assert!(!format!("{:?}", config).contains("super-secret-token"));
    }

    #[test]
    fn test_load_context_default_vault() {
        assert_eq!(LoadContext::new().default_vault(), None);
        assert_eq!(LoadContext::new().with_default_vault("").default_vault(), None);
        assert_eq!(
            LoadContext::new().with_default_vault("Shared").default_vault(),
            Some("Shared")
        );
    }
}
