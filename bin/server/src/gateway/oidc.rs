//! OIDC relying-party client built on the openidconnect crate.
//!
//! One instance is created at startup from discovery and shared by the
//! gate, the callback handler, and the logout flow. It owns every
//! interaction with the identity provider: the authorization redirect,
//! the code exchange with ID-token verification, transparent refresh,
//! client-credentials tokens for service-to-service calls, and the
//! end-session URL.

use chrono::{Duration, Utc};
use oauth2::AuthType;
use openidconnect::core::{CoreAuthenticationFlow, CoreClient};
use openidconnect::{
    AuthorizationCode, ClientId, ClientSecret, CsrfToken, IssuerUrl, Nonce, OAuth2TokenResponse,
    ProviderMetadataWithLogout, RedirectUrl, RefreshToken, Scope, TokenResponse,
};
use url::Url;

use meui_platform_access::{IdTokenClaims, ProviderConfig, TokenPair};

/// Result of a successful authorization-code exchange.
pub struct ExchangedTokens {
    /// The OAuth2 token pair from the token endpoint.
    pub tokens: TokenPair,
    /// The verified ID-token projection.
    pub claims: IdTokenClaims,
    /// The raw encoded ID token, kept for the logout `id_token_hint`.
    pub raw_id_token: String,
}

/// OIDC relying-party client.
pub struct RelyingParty {
    provider: ProviderMetadataWithLogout,
    client_id: ClientId,
    client_secret: ClientSecret,
    redirect_url: RedirectUrl,
    config: ProviderConfig,
    http: reqwest::Client,
}

impl RelyingParty {
    /// Creates a relying party by discovering the provider metadata.
    pub async fn discover(config: ProviderConfig) -> Result<Self, OidcError> {
        let issuer_url = IssuerUrl::new(config.issuer_url().to_string())
            .map_err(|e| OidcError::Configuration(format!("invalid issuer URL: {e}")))?;

        let http = http_client()?;

        let provider = ProviderMetadataWithLogout::discover_async(issuer_url, &http)
            .await
            .map_err(|e| OidcError::Discovery(format!("failed to discover provider: {e}")))?;

        Self::from_provider_metadata(provider, config)
    }

    /// Creates a relying party from already-known provider metadata.
    pub fn from_provider_metadata(
        provider: ProviderMetadataWithLogout,
        config: ProviderConfig,
    ) -> Result<Self, OidcError> {
        let redirect_url = RedirectUrl::new(config.redirect_uri().to_string())
            .map_err(|e| OidcError::Configuration(format!("invalid redirect URI: {e}")))?;

        let client_id = ClientId::new(config.client_id().to_string());
        let client_secret = ClientSecret::new(config.client_secret().to_string());
        let http = http_client()?;

        Ok(Self {
            provider,
            client_id,
            client_secret,
            redirect_url,
            config,
            http,
        })
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    /// Generates a fresh anti-replay `state` value: 32 random bytes,
    /// URL-safe base64. Large enough that collisions are cryptographically
    /// negligible, and free of characters unsafe for cookie-backed storage.
    #[must_use]
    pub fn new_state() -> String {
        CsrfToken::new_random_len(32).secret().clone()
    }

    /// Generates a fresh OIDC nonce.
    #[must_use]
    pub fn new_nonce() -> String {
        Nonce::new_random().secret().clone()
    }

    /// Builds the authorization-endpoint URL carrying `state` and `nonce`.
    #[must_use]
    pub fn authorization_url(&self, state: &str, nonce: &str) -> String {
        let client = self.oauth_client();

        let state = state.to_string();
        let nonce = nonce.to_string();
        let mut request = client.authorize_url(
            CoreAuthenticationFlow::AuthorizationCode,
            move || CsrfToken::new(state),
            move || Nonce::new(nonce),
        );

        for scope in self.config.scopes() {
            request = request.add_scope(Scope::new(scope.to_string()));
        }

        let (auth_url, _, _) = request.url();
        auth_url.to_string()
    }

    /// Exchanges an authorization code for tokens and verifies the ID token
    /// against the provider's signing keys, issuer, audience, and the nonce
    /// recorded with the pending login.
    pub async fn exchange_code(
        &self,
        code: &str,
        expected_nonce: &str,
    ) -> Result<ExchangedTokens, OidcError> {
        let client = self.oauth_client();

        let token_response = client
            .exchange_code(AuthorizationCode::new(code.to_string()))
            .map_err(|e| OidcError::TokenExchange(format!("token endpoint error: {e}")))?
            .request_async(&self.http)
            .await
            .map_err(|e| OidcError::TokenExchange(format!("token exchange failed: {e}")))?;

        let id_token = token_response
            .id_token()
            .ok_or_else(|| OidcError::TokenExchange("no ID token in response".to_string()))?;

        let nonce = Nonce::new(expected_nonce.to_string());
        let claims = id_token
            .claims(&client.id_token_verifier(), &nonce)
            .map_err(|e| OidcError::TokenValidation(format!("ID token validation failed: {e}")))?;

        let id_claims = IdTokenClaims::new(
            claims.subject().to_string(),
            claims.issuer().to_string(),
            claims.expiration(),
        );

        Ok(ExchangedTokens {
            tokens: token_pair_from_response(&token_response),
            claims: id_claims,
            raw_id_token: id_token.to_string(),
        })
    }

    /// The token-source: hands back `tokens` unchanged while valid, and
    /// performs a refresh-token grant once the access token has expired.
    ///
    /// An expired pair without a refresh token is returned as-is; the gate
    /// treats it as invalid and restarts the login flow. Only transport
    /// failures during an actual refresh are errors.
    pub async fn ensure_fresh(&self, tokens: &TokenPair) -> Result<TokenPair, OidcError> {
        if tokens.is_valid() || !tokens.can_refresh() {
            return Ok(tokens.clone());
        }

        let Some(refresh_token) = tokens.refresh_token() else {
            return Ok(tokens.clone());
        };

        let client = self.oauth_client();
        let token_response = client
            .exchange_refresh_token(&RefreshToken::new(refresh_token.to_string()))
            .map_err(|e| OidcError::TokenExchange(format!("token endpoint error: {e}")))?
            .request_async(&self.http)
            .await
            .map_err(|e| OidcError::TokenExchange(format!("token refresh failed: {e}")))?;

        let mut refreshed = token_pair_from_response(&token_response);
        refreshed.inherit_refresh_token(tokens);
        Ok(refreshed)
    }

    /// Obtains a token for the application itself via the client-credentials
    /// grant; `audience` selects which backend API the token is valid for.
    pub async fn client_credentials(&self, audience: &str) -> Result<TokenPair, OidcError> {
        let client = self.oauth_client();

        let mut request = client
            .exchange_client_credentials()
            .map_err(|e| OidcError::TokenExchange(format!("token endpoint error: {e}")))?
            .add_extra_param("audience", audience);

        for scope in self.config.scopes() {
            request = request.add_scope(Scope::new(scope.to_string()));
        }

        let token_response = request
            .request_async(&self.http)
            .await
            .map_err(|e| OidcError::TokenExchange(format!("client credentials failed: {e}")))?;

        Ok(token_pair_from_response(&token_response))
    }

    /// Builds the provider's end-session URL for RP-initiated logout.
    ///
    /// The application does not terminate the provider-side session itself;
    /// it only redirects the browser here. The post-logout target must be
    /// whitelisted at the provider.
    pub fn end_session_url(&self, state: &str, id_token_hint: &str) -> Result<Url, OidcError> {
        let end_session = self
            .provider
            .additional_metadata()
            .end_session_endpoint
            .as_ref()
            .ok_or_else(|| {
                OidcError::Configuration(
                    "provider does not advertise an end_session_endpoint".to_string(),
                )
            })?;

        let mut url = end_session.url().clone();
        url.query_pairs_mut()
            .append_pair("state", state)
            .append_pair("id_token_hint", id_token_hint);

        if let Some(target) = self.config.post_logout_redirect_uri() {
            url.query_pairs_mut()
                .append_pair("post_logout_redirect_uri", target);
        }

        Ok(url)
    }

    /// Builds the confidential OAuth2 client. The secret always travels in
    /// the Authorization header, never in the POST body, so a misconfigured
    /// provider cannot downgrade the exchange.
    fn oauth_client(
        &self,
    ) -> CoreClient<
        openidconnect::EndpointSet,
        openidconnect::EndpointNotSet,
        openidconnect::EndpointNotSet,
        openidconnect::EndpointNotSet,
        openidconnect::EndpointMaybeSet,
        openidconnect::EndpointMaybeSet,
    > {
        CoreClient::from_provider_metadata(
            self.provider.clone(),
            self.client_id.clone(),
            Some(self.client_secret.clone()),
        )
        .set_redirect_uri(self.redirect_url.clone())
        .set_auth_type(AuthType::BasicAuth)
    }
}

/// Builds the HTTP transport used against the provider. Redirects are
/// disabled: a token endpoint answering with a redirect is not trusted.
fn http_client() -> Result<reqwest::Client, OidcError> {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .map_err(|e| OidcError::Configuration(format!("failed to create HTTP client: {e}")))
}

/// Projects an openidconnect token response into the session's token pair.
fn token_pair_from_response<TR: OAuth2TokenResponse>(response: &TR) -> TokenPair {
    let expires_at = response
        .expires_in()
        .and_then(|d| Duration::from_std(d).ok())
        .map(|d| Utc::now() + d);

    TokenPair::new(
        response.access_token().secret().clone(),
        "bearer".to_string(),
        response.refresh_token().map(|t| t.secret().clone()),
        expires_at,
    )
}

/// OIDC-related errors.
#[derive(Debug)]
pub enum OidcError {
    /// Configuration error (invalid URLs, missing metadata, etc.)
    Configuration(String),
    /// Failed to discover provider metadata.
    Discovery(String),
    /// Token exchange, refresh, or client-credentials grant failed.
    TokenExchange(String),
    /// ID-token validation failed.
    TokenValidation(String),
}

impl std::fmt::Display for OidcError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Configuration(msg) => write!(f, "OIDC configuration error: {msg}"),
            Self::Discovery(msg) => write!(f, "OIDC discovery error: {msg}"),
            Self::TokenExchange(msg) => write!(f, "OIDC token exchange error: {msg}"),
            Self::TokenValidation(msg) => write!(f, "OIDC token validation error: {msg}"),
        }
    }
}

impl std::error::Error for OidcError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_values_are_unique_and_cookie_safe() {
        let a = RelyingParty::new_state();
        let b = RelyingParty::new_state();
        assert_ne!(a, b);
        // 32 bytes of URL-safe base64 without padding.
        assert_eq!(a.len(), 43);
        assert!(
            a.chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        );
    }

    #[test]
    fn nonce_values_are_unique() {
        assert_ne!(RelyingParty::new_nonce(), RelyingParty::new_nonce());
    }
}
