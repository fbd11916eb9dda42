//! The authentication gate.
//!
//! Middleware on every protected route. Each request is driven through an
//! explicit decision: either a valid (possibly just refreshed) token admits
//! it, or a new login attempt is recorded and the browser is sent to the
//! identity provider. A missing or invalid token is the normal
//! unauthenticated path and never a hard failure; only session-store and
//! refresh-transport errors are.

use axum::extract::{Request, State};
use axum::http::{HeaderMap, HeaderValue, header};
use axum::middleware::Next;
use axum::response::Response;
use axum_extra::extract::CookieJar;
use axum_extra::extract::cookie::{Cookie, SameSite};
use chrono::Duration;
use std::sync::Arc;
use time::Duration as TimeDuration;

use meui_platform_access::{PendingLogin, Session, SessionId, TokenPair};

use super::oidc::RelyingParty;
use super::store::generate_session_id;
use super::{AppState, SessionContext, redirect_found};
use crate::config::SessionConfig;
use crate::error::GatewayError;

/// One deterministic outcome per request at the gate.
#[derive(Debug)]
pub enum AuthDecision {
    /// A valid token admits the request; persist and continue.
    Proceed {
        /// The validated (possibly refreshed) token pair.
        tokens: TokenPair,
        /// Whether the access-token value changed during refresh.
        refreshed: bool,
    },
    /// No usable token; record a pending login and redirect to the provider.
    StartLogin,
}

/// Decides the fate of a request from its token candidate.
///
/// The token is taken from the bearer header first, else from the session.
/// A found token is run through the token-source for a transparent refresh;
/// the refreshed pair admits the request only if it reports itself valid.
pub async fn evaluate(
    relying_party: &RelyingParty,
    candidate: Option<TokenPair>,
) -> Result<AuthDecision, GatewayError> {
    let Some(tokens) = candidate else {
        return Ok(AuthDecision::StartLogin);
    };

    let fresh = relying_party
        .ensure_fresh(&tokens)
        .await
        .map_err(|e| GatewayError::TokenExchange(e.to_string()))?;
    let refreshed = fresh.access_token() != tokens.access_token();

    if fresh.is_valid() {
        // Expiry is the only authority consulted here; there is no
        // revocation-list lookup.
        tracing::debug!(refreshed, "access token valid");
        return Ok(AuthDecision::Proceed {
            tokens: fresh,
            refreshed,
        });
    }

    Ok(AuthDecision::StartLogin)
}

/// Gate middleware for protected routes.
pub async fn authentication_required(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, GatewayError> {
    let (mut session, fresh_session) = resolve_session(&state, request.headers()).await?;

    let candidate = bearer_token(request.headers())
        .inspect(|_| tracing::debug!(authorization = "bearer", "access token found"))
        .or_else(|| {
            session
                .tokens()
                .cloned()
                .inspect(|_| tracing::debug!(authorization = "session", "access token found"))
        });

    match evaluate(&state.relying_party, candidate).await? {
        AuthDecision::Proceed { tokens, refreshed } => {
            if refreshed {
                tracing::debug!("access token refreshed");
            }
            session.set_tokens(tokens.clone());
            state.store.save(session.clone()).await?;

            request.extensions_mut().insert(SessionContext {
                session_id: session.id().clone(),
                tokens,
                id_token: session.id_token().cloned(),
                raw_id_token: session.raw_id_token().map(str::to_string),
            });

            let mut response = next.run(request).await;
            if fresh_session {
                attach_session_cookie(&mut response, &state.session_config, session.id());
            }
            Ok(response)
        }
        AuthDecision::StartLogin => {
            let return_to = request
                .uri()
                .path_and_query()
                .map(|pq| pq.as_str().to_string())
                .unwrap_or_else(|| "/".to_string());

            let login_state = RelyingParty::new_state();
            let nonce = RelyingParty::new_nonce();
            session.add_pending_login(
                login_state.clone(),
                PendingLogin::new(return_to.clone(), nonce.clone()),
            );
            state.store.save(session.clone()).await?;

            let auth_url = state.relying_party.authorization_url(&login_state, &nonce);
            tracing::debug!(state = %login_state, return_to = %return_to, "started login attempt");

            let mut response = redirect_found(&auth_url);
            if fresh_session {
                attach_session_cookie(&mut response, &state.session_config, session.id());
            }
            Ok(response)
        }
    }
}

/// Resolves the browser's session record, creating a fresh one when the
/// cookie is absent, unknown, or pointing at an expired record. Returns the
/// session and whether a new cookie must be issued.
async fn resolve_session(
    state: &AppState,
    headers: &HeaderMap,
) -> Result<(Session, bool), GatewayError> {
    let jar = CookieJar::from_headers(headers);
    let ttl = Duration::seconds(state.session_config.max_age_seconds as i64);

    if let Some(cookie) = jar.get(&state.session_config.cookie_name) {
        let id = SessionId::from(cookie.value());
        if let Some(session) = state.store.find(&id).await? {
            if !session.is_expired() {
                return Ok((session, false));
            }
            state.store.delete(&id).await?;
        }
    }

    Ok((Session::new(generate_session_id(), ttl), true))
}

/// Extracts a bearer token from the `Authorization` header: split on the
/// first space, scheme matched case-insensitively.
pub fn bearer_token(headers: &HeaderMap) -> Option<TokenPair> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    if scheme.eq_ignore_ascii_case("bearer") && !token.is_empty() {
        Some(TokenPair::bearer(token.to_string()))
    } else {
        None
    }
}

/// Builds the session cookie: HTTP-only, path `/`, fixed max-age.
fn session_cookie(config: &SessionConfig, id: &SessionId) -> Cookie<'static> {
    Cookie::build((config.cookie_name.clone(), id.to_string()))
        .path("/")
        .http_only(true)
        .secure(config.secure_cookies)
        .same_site(SameSite::Lax)
        .max_age(TimeDuration::seconds(config.max_age_seconds as i64))
        .build()
}

fn attach_session_cookie(response: &mut Response, config: &SessionConfig, id: &SessionId) {
    let cookie = session_cookie(config, id);
    if let Ok(value) = HeaderValue::from_str(&cookie.to_string()) {
        response.headers_mut().append(header::SET_COOKIE, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers_with_authorization(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_str(value).expect("header value"),
        );
        headers
    }

    #[test]
    fn bearer_header_is_parsed() {
        let headers = headers_with_authorization("Bearer abc123");
        let tokens = bearer_token(&headers).expect("token");
        assert_eq!(tokens.access_token(), "abc123");
    }

    #[test]
    fn bearer_scheme_is_case_insensitive() {
        let headers = headers_with_authorization("bEaReR abc123");
        assert!(bearer_token(&headers).is_some());
    }

    #[test]
    fn non_bearer_scheme_is_ignored() {
        let headers = headers_with_authorization("Basic dXNlcjpwYXNz");
        assert!(bearer_token(&headers).is_none());
    }

    #[test]
    fn missing_header_yields_none() {
        assert!(bearer_token(&HeaderMap::new()).is_none());
    }

    #[test]
    fn empty_token_is_rejected() {
        let headers = headers_with_authorization("Bearer ");
        assert!(bearer_token(&headers).is_none());
    }

    #[test]
    fn session_cookie_carries_configured_attributes() {
        let config = SessionConfig::default();
        let cookie = session_cookie(&config, &SessionId::new("sess_1".to_string()));
        let rendered = cookie.to_string();
        assert!(rendered.starts_with("meui=sess_1"));
        assert!(rendered.contains("HttpOnly"));
        assert!(rendered.contains("Secure"));
        assert!(rendered.contains("Path=/"));
        assert!(rendered.contains("Max-Age=86400"));
    }
}
