//! The authorization-code callback handler.
//!
//! Completes the flow the gate started: validates the returned `state`
//! against the session's pending logins, exchanges the code, verifies the
//! ID token, persists everything into the session, and sends the browser
//! back to where it was headed before the detour.

use axum::extract::{Query, State};
use axum::response::Response;
use axum_extra::extract::CookieJar;
use serde::Deserialize;
use std::sync::Arc;

use meui_platform_access::SessionId;

use super::oidc::OidcError;
use super::{AppState, redirect_found};
use crate::error::GatewayError;

/// Query parameters of the provider's redirect back.
#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    pub state: String,
    pub code: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
}

/// `GET /callback` (public): the provider's redirect target.
pub async fn callback(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CallbackQuery>,
    jar: CookieJar,
) -> Result<Response, GatewayError> {
    // Without the session that recorded the pending login this request
    // cannot be bound to an attempt we started: reject it like a forged
    // state.
    let session_id = jar
        .get(&state.session_config.cookie_name)
        .map(|c| SessionId::from(c.value()))
        .ok_or(GatewayError::StateMismatch)?;

    let mut session = state
        .store
        .find(&session_id)
        .await?
        .filter(|s| !s.is_expired())
        .ok_or(GatewayError::StateMismatch)?;

    let pending = session
        .take_pending_login(&query.state)
        .ok_or(GatewayError::StateMismatch)?;

    // Persist the consumed entry before the exchange so a replay of the
    // same state fails regardless of how the exchange turns out.
    state.store.save(session.clone()).await?;

    if let Some(error) = query.error {
        let description = query.error_description.unwrap_or_default();
        return Err(GatewayError::ProviderRefused(format!(
            "{error}: {description}"
        )));
    }

    let code = query.code.ok_or(GatewayError::MissingAuthorizationCode)?;

    let exchanged = state
        .relying_party
        .exchange_code(&code, &pending.nonce)
        .await
        .map_err(|e| match e {
            OidcError::TokenValidation(msg) => GatewayError::TokenVerification(msg),
            other => GatewayError::TokenExchange(other.to_string()),
        })?;

    session.set_tokens(exchanged.tokens);
    session.install_id_token(exchanged.claims, exchanged.raw_id_token);
    state.store.save(session).await?;

    let target = if pending.return_to.is_empty() {
        "/".to_string()
    } else {
        pending.return_to
    };
    tracing::debug!(return_to = %target, "completed login attempt");

    Ok(redirect_found(&target))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn callback_query_parses_success_leg() {
        let query: CallbackQuery =
            serde_json::from_str(r#"{"state": "s1", "code": "abc"}"#).expect("deserialize");
        assert_eq!(query.state, "s1");
        assert_eq!(query.code.as_deref(), Some("abc"));
        assert!(query.error.is_none());
    }

    #[test]
    fn callback_query_parses_error_leg() {
        let query: CallbackQuery = serde_json::from_str(
            r#"{"state": "s1", "error": "access_denied", "error_description": "user refused"}"#,
        )
        .expect("deserialize");
        assert!(query.code.is_none());
        assert_eq!(query.error.as_deref(), Some("access_denied"));
    }

    #[test]
    fn callback_query_requires_state() {
        let result: Result<CallbackQuery, _> = serde_json::from_str(r#"{"code": "abc"}"#);
        assert!(result.is_err());
    }
}
