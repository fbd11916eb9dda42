//! Centralized server configuration.
//!
//! This module provides strongly-typed configuration for the server,
//! loaded via the `config` crate from environment variables.
//!
//! See [`ProviderConfig`](meui_platform_access::ProviderConfig) for the
//! identity-provider section.

use meui_platform_access::ProviderConfig;
use serde::Deserialize;

/// Server configuration composed from library configs.
#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    /// Listener configuration.
    #[serde(default)]
    pub serve: ServeConfig,

    /// Session configuration.
    #[serde(default)]
    pub session: SessionConfig,

    /// OIDC identity-provider configuration.
    pub provider: ProviderConfig,

    /// Identity Provider backend API.
    pub idp: BackendConfig,

    /// Access Provider backend API.
    pub aap: BackendConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServeConfig {
    /// Port to serve on.
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Session-related configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Name of the session cookie.
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,

    /// Session (and cookie) lifetime in seconds. Fixed 24h window; there is
    /// no sliding renewal.
    #[serde(default = "default_max_age_seconds")]
    pub max_age_seconds: u64,

    /// Whether to set the Secure flag on cookies (requires HTTPS).
    /// Defaults to true for production safety; set to false for local HTTP
    /// development.
    #[serde(default = "default_secure_cookies")]
    pub secure_cookies: bool,

    /// Interval between expired-session sweeps, in seconds.
    #[serde(default = "default_cleanup_interval_seconds")]
    pub cleanup_interval_seconds: u64,
}

/// Location of a backend REST API.
#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    /// Public base URL of the backend.
    pub url: String,
}

fn default_port() -> u16 {
    8080
}

fn default_cookie_name() -> String {
    "meui".to_string()
}

fn default_max_age_seconds() -> u64 {
    86400
}

fn default_secure_cookies() -> bool {
    true
}

fn default_cleanup_interval_seconds() -> u64 {
    300
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: default_cookie_name(),
            max_age_seconds: default_max_age_seconds(),
            secure_cookies: default_secure_cookies(),
            cleanup_interval_seconds: default_cleanup_interval_seconds(),
        }
    }
}

impl ServerConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if required configuration is missing or invalid.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(
                config::Environment::default()
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_config_has_correct_defaults() {
        let config = SessionConfig::default();
        assert_eq!(config.cookie_name, "meui");
        assert_eq!(config.max_age_seconds, 86400);
        assert!(config.secure_cookies);
        assert_eq!(config.cleanup_interval_seconds, 300);
    }

    #[test]
    fn serve_config_has_correct_defaults() {
        let config = ServeConfig::default();
        assert_eq!(config.port, 8080);
    }
}
