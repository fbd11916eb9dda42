//! The authentication/session gateway.
//!
//! This module is the core of the server:
//! - [`gate`]: per-request token check, transparent refresh, and the
//!   redirect that starts a new Authorization Code flow
//! - [`callback`]: completes the flow when the provider redirects back
//! - [`identity`]: resolves the authenticated subject into a profile and
//!   binds it to the request
//! - [`logout`]: RP-initiated logout and the terminal landing page
//! - [`oidc`]: the relying-party client the above are built on
//! - [`store`]: the cookie-keyed session store
//!
//! Control flow per request: gate (token presence/validity) → redirect to
//! the provider or continue → callback on the return leg → identity
//! resolution → resource controller.

pub mod callback;
pub mod gate;
pub mod identity;
pub mod logout;
pub mod oidc;
pub mod store;

pub use gate::authentication_required;
pub use identity::{CurrentIdentity, CurrentSession, MaybeIdentity, require_identity};
pub use oidc::RelyingParty;
pub use store::{MemorySessionStore, SessionStore};

use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use meui_aap::AapClient;
use meui_idp::IdpClient;
use meui_platform_access::{IdTokenClaims, SessionId, TokenPair};
use std::sync::Arc;
use url::Url;

use crate::config::SessionConfig;
use crate::error::GatewayError;

/// A `302 Found` redirect, the status the browser flow is built around.
pub(crate) fn redirect_found(target: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, target)]).into_response()
}

/// Audience parameter selecting the IdP API for client-credentials tokens.
const IDP_AUDIENCE: &str = "idp";
/// Audience parameter selecting the AAP API for client-credentials tokens.
const AAP_AUDIENCE: &str = "aap";

/// Shared application state.
pub struct AppState {
    /// Session persistence, keyed per browser cookie.
    pub store: Arc<dyn SessionStore>,
    /// The OIDC relying-party client.
    pub relying_party: RelyingParty,
    /// Session/cookie configuration.
    pub session_config: SessionConfig,
    /// Base URL of the IdP backend API.
    pub idp_base: Url,
    /// Base URL of the AAP backend API.
    pub aap_base: Url,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(
        store: Arc<dyn SessionStore>,
        relying_party: RelyingParty,
        session_config: SessionConfig,
        idp_base: Url,
        aap_base: Url,
    ) -> Self {
        Self {
            store,
            relying_party,
            session_config,
            idp_base,
            aap_base,
        }
    }

    /// IdP client acting on behalf of the session's user.
    #[must_use]
    pub fn idp_client_for(&self, ctx: &SessionContext) -> IdpClient {
        IdpClient::new(
            self.idp_base.clone(),
            ctx.tokens.access_token().to_string(),
        )
    }

    /// AAP client acting on behalf of the session's user.
    #[must_use]
    pub fn aap_client_for(&self, ctx: &SessionContext) -> AapClient {
        AapClient::new(
            self.aap_base.clone(),
            ctx.tokens.access_token().to_string(),
        )
    }

    /// IdP client acting as the application itself, via the
    /// client-credentials grant.
    pub async fn idp_client_as_app(&self) -> Result<IdpClient, GatewayError> {
        let tokens = self
            .relying_party
            .client_credentials(IDP_AUDIENCE)
            .await
            .map_err(|e| GatewayError::TokenExchange(e.to_string()))?;
        Ok(IdpClient::new(
            self.idp_base.clone(),
            tokens.access_token().to_string(),
        ))
    }

    /// AAP client acting as the application itself, via the
    /// client-credentials grant.
    pub async fn aap_client_as_app(&self) -> Result<AapClient, GatewayError> {
        let tokens = self
            .relying_party
            .client_credentials(AAP_AUDIENCE)
            .await
            .map_err(|e| GatewayError::TokenExchange(e.to_string()))?;
        Ok(AapClient::new(
            self.aap_base.clone(),
            tokens.access_token().to_string(),
        ))
    }
}

/// Per-request authenticated session context, bound by the gate.
#[derive(Debug, Clone)]
pub struct SessionContext {
    /// The session the request is riding on.
    pub session_id: SessionId,
    /// The validated token pair admitted by the gate.
    pub tokens: TokenPair,
    /// The verified ID-token claims, absent for pure bearer requests.
    pub id_token: Option<IdTokenClaims>,
    /// The raw encoded ID token, absent for pure bearer requests.
    pub raw_id_token: Option<String>,
}
