//! Identity resolution.
//!
//! Runs after the gate has admitted a request. Resolves the authenticated
//! subject into a full profile with one batched read against the IdP and
//! attaches it to the request for the resource controllers. Deny by
//! default: a partial or undecodable answer never passes through.

use axum::extract::{FromRequestParts, Request, State};
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::Response;
use meui_batch::ClientError;
use meui_idp::{Human, ReadHumansRequest};
use std::convert::Infallible;
use std::sync::Arc;

use super::{AppState, SessionContext};
use crate::error::GatewayError;

/// Identity middleware for protected routes.
pub async fn require_identity(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, GatewayError> {
    let ctx = request
        .extensions()
        .get::<SessionContext>()
        .cloned()
        .ok_or(GatewayError::NotAuthenticated)?;

    let idp = state.idp_client_for(&ctx);

    // With a session-established identity the subject is known; a pure
    // bearer request carries no ID token, so ask the IdP to resolve the
    // caller from the access token instead.
    let ops = match ctx.id_token.as_ref() {
        Some(claims) => vec![ReadHumansRequest::by_id(claims.subject().to_string())],
        None => vec![ReadHumansRequest::default()],
    };

    let envelope = idp.read_humans(&ops).await.map_err(|e| match e {
        ClientError::Transport { .. } => GatewayError::backend_read(e),
        denied_or_unexpected => {
            tracing::debug!(error = %denied_or_unexpected, "identity lookup refused");
            GatewayError::IdentityRequired
        }
    })?;

    let humans: Vec<Human> = envelope.decode(0).map_err(|e| {
        tracing::debug!(error = %e, "identity envelope did not decode");
        GatewayError::IdentityRequired
    })?;

    let identity = humans.into_iter().next().ok_or_else(|| {
        tracing::debug!("identity lookup returned no profile");
        GatewayError::IdentityRequired
    })?;

    request.extensions_mut().insert(identity);
    Ok(next.run(request).await)
}

/// Extractor for the resolved identity. Fails with 403 when the identity
/// middleware has not attached one.
pub struct CurrentIdentity(pub Human);

impl<S> FromRequestParts<S> for CurrentIdentity
where
    S: Send + Sync,
{
    type Rejection = GatewayError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Human>()
            .cloned()
            .map(CurrentIdentity)
            .ok_or(GatewayError::IdentityRequired)
    }
}

/// Non-failing variant: `None` when no identity has been resolved yet.
pub struct MaybeIdentity(pub Option<Human>);

impl<S> FromRequestParts<S> for MaybeIdentity
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(MaybeIdentity(parts.extensions.get::<Human>().cloned()))
    }
}

/// Extractor for the authenticated session context bound by the gate.
pub struct CurrentSession(pub SessionContext);

impl<S> FromRequestParts<S> for CurrentSession
where
    S: Send + Sync,
{
    type Rejection = GatewayError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<SessionContext>()
            .cloned()
            .map(CurrentSession)
            .ok_or(GatewayError::NotAuthenticated)
    }
}
