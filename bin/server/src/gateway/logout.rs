//! Session termination.
//!
//! `GET /logout` hands the browser to the provider's end-session endpoint;
//! the provider decides whether to send it back to the whitelisted landing
//! page. `GET /seeyoulater` is that landing page: it clears the local
//! session best-effort and renders a terminal page either way.

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::CookieJar;
use axum_extra::extract::cookie::Cookie;
use std::sync::Arc;
use time::Duration as TimeDuration;

use meui_platform_access::SessionId;

use super::identity::CurrentSession;
use super::oidc::RelyingParty;
use super::{AppState, redirect_found};
use crate::error::GatewayError;
use crate::views;

/// `GET /logout` (protected): redirect to the provider's end-session URL.
pub async fn logout(
    State(state): State<Arc<AppState>>,
    CurrentSession(ctx): CurrentSession,
) -> Result<Response, GatewayError> {
    // Without the raw ID token there is nothing to hand the provider as
    // id_token_hint; the browser has to authenticate first.
    let raw_id_token = ctx.raw_id_token.ok_or(GatewayError::NotAuthenticated)?;

    let logout_state = RelyingParty::new_state();
    let logout_url = state
        .relying_party
        .end_session_url(&logout_state, &raw_id_token)
        .map_err(|e| GatewayError::ProviderMetadata(e.to_string()))?;

    tracing::debug!(redirect_to = %logout_url, "redirecting to provider logout");
    Ok(redirect_found(logout_url.as_str()))
}

/// `GET /seeyoulater` (public): terminal landing page after logout.
///
/// Clears the local session unconditionally; a failure to clear is logged
/// but never blocks rendering the page.
pub async fn seeyoulater(State(state): State<Arc<AppState>>, jar: CookieJar) -> Response {
    let mut session_cleared = true;

    if let Some(cookie) = jar.get(&state.session_config.cookie_name) {
        let id = SessionId::from(cookie.value());
        if let Err(e) = state.store.delete(&id).await {
            tracing::debug!(error = %e, "failed to clear session");
            session_cleared = false;
        }
    }

    let removal = Cookie::build((state.session_config.cookie_name.clone(), ""))
        .path("/")
        .max_age(TimeDuration::ZERO)
        .build();

    let body = if session_cleared {
        "<p>You are signed out. See you later.</p>"
    } else {
        "<p>You are signed out, but the session could not be fully cleared.</p>"
    };

    (jar.add(removal), views::page("See You Later", body)).into_response()
}
