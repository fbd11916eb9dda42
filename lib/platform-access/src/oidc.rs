//! Identity-provider configuration.
//!
//! This module provides configuration types for connecting to the OIDC
//! identity provider that meui relies on for user authentication.

use serde::{Deserialize, Serialize};

/// Configuration for the OIDC identity provider.
///
/// Fields with defaults can be omitted when loading from environment
/// variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// The OIDC issuer URL (e.g., "https://hydra.example.com").
    /// Used for OIDC discovery.
    issuer_url: String,
    /// The OAuth2 client ID registered with the provider.
    client_id: String,
    /// The OAuth2 client secret.
    client_secret: String,
    /// The redirect URI for the authorization-code callback
    /// (e.g., "https://me.example.com/callback").
    redirect_uri: String,
    /// OAuth2 scopes to request as a comma-separated string.
    /// Default: "openid,offline"
    #[serde(default = "default_scopes")]
    scopes: String,
    /// Post-logout landing URL registered with the provider's whitelist.
    /// Optional; when absent the provider decides where to send the user.
    #[serde(default)]
    post_logout_redirect_uri: Option<String>,
}

fn default_scopes() -> String {
    "openid,offline".to_string()
}

impl ProviderConfig {
    /// Creates a new provider configuration with defaults for optional
    /// fields.
    #[must_use]
    pub fn new(
        issuer_url: String,
        client_id: String,
        client_secret: String,
        redirect_uri: String,
    ) -> Self {
        Self {
            issuer_url,
            client_id,
            client_secret,
            redirect_uri,
            scopes: default_scopes(),
            post_logout_redirect_uri: None,
        }
    }

    /// Creates a configuration builder for more customization.
    #[must_use]
    pub fn builder(
        issuer_url: String,
        client_id: String,
        client_secret: String,
        redirect_uri: String,
    ) -> ProviderConfigBuilder {
        ProviderConfigBuilder::new(issuer_url, client_id, client_secret, redirect_uri)
    }

    /// Returns the OIDC issuer URL.
    #[must_use]
    pub fn issuer_url(&self) -> &str {
        &self.issuer_url
    }

    /// Returns the OAuth2 client ID.
    #[must_use]
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// Returns the OAuth2 client secret.
    #[must_use]
    pub fn client_secret(&self) -> &str {
        &self.client_secret
    }

    /// Returns the OAuth2 redirect URI.
    #[must_use]
    pub fn redirect_uri(&self) -> &str {
        &self.redirect_uri
    }

    /// Returns the OAuth2 scopes to request, parsed from the
    /// comma-separated string.
    #[must_use]
    pub fn scopes(&self) -> Vec<&str> {
        self.scopes.split(',').map(str::trim).collect()
    }

    /// Returns the post-logout landing URL, if configured.
    #[must_use]
    pub fn post_logout_redirect_uri(&self) -> Option<&str> {
        self.post_logout_redirect_uri.as_deref()
    }
}

/// Builder for `ProviderConfig`.
#[derive(Debug)]
pub struct ProviderConfigBuilder {
    issuer_url: String,
    client_id: String,
    client_secret: String,
    redirect_uri: String,
    scopes: Vec<String>,
    post_logout_redirect_uri: Option<String>,
}

impl ProviderConfigBuilder {
    /// Creates a new builder with required fields.
    #[must_use]
    pub fn new(
        issuer_url: String,
        client_id: String,
        client_secret: String,
        redirect_uri: String,
    ) -> Self {
        Self {
            issuer_url,
            client_id,
            client_secret,
            redirect_uri,
            scopes: vec!["openid".to_string(), "offline".to_string()],
            post_logout_redirect_uri: None,
        }
    }

    /// Sets the OAuth2 scopes to request.
    #[must_use]
    pub fn scopes(mut self, scopes: Vec<String>) -> Self {
        self.scopes = scopes;
        self
    }

    /// Adds a scope to the list of scopes to request.
    #[must_use]
    pub fn add_scope(mut self, scope: String) -> Self {
        if !self.scopes.contains(&scope) {
            self.scopes.push(scope);
        }
        self
    }

    /// Sets the post-logout landing URL.
    #[must_use]
    pub fn post_logout_redirect_uri(mut self, uri: String) -> Self {
        self.post_logout_redirect_uri = Some(uri);
        self
    }

    /// Builds the `ProviderConfig`.
    #[must_use]
    pub fn build(self) -> ProviderConfig {
        ProviderConfig {
            issuer_url: self.issuer_url,
            client_id: self.client_id,
            client_secret: self.client_secret,
            redirect_uri: self.redirect_uri,
            scopes: self.scopes.join(","),
            post_logout_redirect_uri: self.post_logout_redirect_uri,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_config_has_defaults() {
        let config = ProviderConfig::new(
            "https://hydra.example.com".to_string(),
            "meui".to_string(),
            "secret".to_string(),
            "https://me.example.com/callback".to_string(),
        );

        assert_eq!(config.issuer_url(), "https://hydra.example.com");
        assert_eq!(config.client_id(), "meui");
        assert_eq!(config.client_secret(), "secret");
        assert_eq!(config.redirect_uri(), "https://me.example.com/callback");
        assert!(config.scopes().contains(&"openid"));
        assert!(config.scopes().contains(&"offline"));
        assert!(config.post_logout_redirect_uri().is_none());
    }

    #[test]
    fn builder_allows_customization() {
        let config = ProviderConfig::builder(
            "https://hydra.example.com".to_string(),
            "meui".to_string(),
            "secret".to_string(),
            "https://me.example.com/callback".to_string(),
        )
        .add_scope("idp:read:humans".to_string())
        .post_logout_redirect_uri("https://me.example.com/seeyoulater".to_string())
        .build();

        assert!(config.scopes().contains(&"idp:read:humans"));
        assert_eq!(
            config.post_logout_redirect_uri(),
            Some("https://me.example.com/seeyoulater")
        );
    }

    #[test]
    fn builder_add_scope_does_not_duplicate() {
        let config = ProviderConfig::builder(
            "https://hydra.example.com".to_string(),
            "meui".to_string(),
            "secret".to_string(),
            "https://me.example.com/callback".to_string(),
        )
        .add_scope("openid".to_string()) // Already present
        .add_scope("custom".to_string())
        .build();

        let openid_count = config.scopes().iter().filter(|s| *s == &"openid").count();
        assert_eq!(openid_count, 1);
        assert!(config.scopes().contains(&"custom"));
    }

    #[test]
    fn config_deserializes_with_defaults() {
        let json = r#"{
            "issuer_url": "https://hydra.example.com",
            "client_id": "meui",
            "client_secret": "secret",
            "redirect_uri": "https://me.example.com/callback"
        }"#;

        let config: ProviderConfig = serde_json::from_str(json).expect("deserialize");

        assert_eq!(config.scopes(), vec!["openid", "offline"]);
        assert!(config.post_logout_redirect_uri().is_none());
    }

    #[test]
    fn scopes_parses_comma_separated() {
        let json = r#"{
            "issuer_url": "https://hydra.example.com",
            "client_id": "meui",
            "client_secret": "secret",
            "redirect_uri": "https://me.example.com/callback",
            "scopes": "openid, offline, idp:read:humans"
        }"#;

        let config: ProviderConfig = serde_json::from_str(json).expect("deserialize");

        assert_eq!(
            config.scopes(),
            vec!["openid", "offline", "idp:read:humans"]
        );
    }
}
