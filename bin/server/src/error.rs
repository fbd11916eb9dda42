//! Error types for the web layer.
//!
//! Every failure a handler or middleware can hit maps onto one deterministic
//! HTTP response. Deny by default: no branch continues past an
//! unauthenticated or unverified state.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use meui_batch::ClientError;
use std::fmt;

use crate::gateway::store::StoreError;

/// Gateway and controller errors.
#[derive(Debug)]
pub enum GatewayError {
    /// No authenticated session context on the request.
    NotAuthenticated,
    /// No resolved identity where one is required.
    IdentityRequired,
    /// Callback `state` does not match any pending login attempt.
    StateMismatch,
    /// The provider redirected back without an authorization code.
    MissingAuthorizationCode,
    /// The provider redirected back reporting an error.
    ProviderRefused(String),
    /// Authorization-code or refresh-token exchange failed.
    TokenExchange(String),
    /// ID-token signature/issuer/expiry verification failed.
    TokenVerification(String),
    /// The provider does not advertise what the flow needs.
    ProviderMetadata(String),
    /// The session store could not be read or written.
    SessionStore(String),
    /// A read call to a backend failed.
    BackendRead(ClientError),
    /// A write call to a backend failed.
    BackendWrite(ClientError),
}

impl GatewayError {
    /// Wraps a backend failure from a read flow.
    pub fn backend_read(e: impl Into<ClientError>) -> Self {
        Self::BackendRead(e.into())
    }

    /// Wraps a backend failure from a write flow.
    pub fn backend_write(e: impl Into<ClientError>) -> Self {
        Self::BackendWrite(e.into())
    }
}

impl fmt::Display for GatewayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAuthenticated => write!(f, "not authenticated"),
            Self::IdentityRequired => write!(f, "identity required"),
            Self::StateMismatch => write!(f, "state does not match a pending login"),
            Self::MissingAuthorizationCode => write!(f, "missing authorization code"),
            Self::ProviderRefused(msg) => write!(f, "provider refused authentication: {msg}"),
            Self::TokenExchange(msg) => write!(f, "token exchange failed: {msg}"),
            Self::TokenVerification(msg) => write!(f, "id token verification failed: {msg}"),
            Self::ProviderMetadata(msg) => write!(f, "provider metadata incomplete: {msg}"),
            Self::SessionStore(msg) => write!(f, "session store failure: {msg}"),
            Self::BackendRead(e) => write!(f, "backend read failed: {e}"),
            Self::BackendWrite(e) => write!(f, "backend write failed: {e}"),
        }
    }
}

impl std::error::Error for GatewayError {}

impl From<StoreError> for GatewayError {
    fn from(e: StoreError) -> Self {
        Self::SessionStore(e.to_string())
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::NotAuthenticated => (StatusCode::UNAUTHORIZED, "Not authenticated"),
            Self::IdentityRequired => (StatusCode::FORBIDDEN, "Access denied"),
            Self::StateMismatch => {
                tracing::debug!("callback state did not match a pending login");
                (StatusCode::BAD_REQUEST, "Unknown login attempt")
            }
            Self::MissingAuthorizationCode => {
                (StatusCode::BAD_REQUEST, "Missing authorization code")
            }
            Self::ProviderRefused(msg) => {
                tracing::debug!(reason = %msg, "provider refused authentication");
                (StatusCode::FORBIDDEN, "Authentication refused")
            }
            Self::TokenExchange(msg) => {
                tracing::error!(reason = %msg, "token exchange failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Authentication failed")
            }
            Self::TokenVerification(msg) => {
                tracing::debug!(reason = %msg, "id token verification failed");
                (StatusCode::BAD_REQUEST, "Authentication failed")
            }
            Self::ProviderMetadata(msg) => {
                tracing::error!(reason = %msg, "provider metadata incomplete");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
            Self::SessionStore(msg) => {
                tracing::error!(reason = %msg, "session store failure");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
            Self::BackendRead(e) => backend_response(e, StatusCode::INTERNAL_SERVER_ERROR),
            Self::BackendWrite(e) => backend_response(e, StatusCode::NOT_FOUND),
        };

        (status, message).into_response()
    }
}

/// Maps a backend client error; `fallback` is the status for unexpected
/// backend answers, which differs between read and write flows.
fn backend_response(e: &ClientError, fallback: StatusCode) -> (StatusCode, &'static str) {
    match e {
        ClientError::Transport { url, reason } => {
            tracing::error!(url = %url, reason = %reason, "backend transport failure");
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
        }
        ClientError::Denied { url } => {
            tracing::debug!(url = %url, "backend denied the call");
            (StatusCode::FORBIDDEN, "Access denied")
        }
        ClientError::UnexpectedStatus { url, status } => {
            tracing::warn!(url = %url, status, "unexpected backend status");
            (fallback, "Request failed")
        }
        ClientError::Envelope(reason) => {
            tracing::debug!(reason = %reason, "backend envelope did not decode");
            (fallback, "Request failed")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_mismatch_is_client_error() {
        let response = GatewayError::StateMismatch.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn transport_failure_is_internal_error() {
        let err = GatewayError::backend_read(ClientError::Transport {
            url: "https://idp.example.com/humans".to_string(),
            reason: "connection refused".to_string(),
        });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn backend_denial_propagates_as_forbidden() {
        let err = GatewayError::backend_read(ClientError::Denied {
            url: "https://aap.example.com/grants".to_string(),
        });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn unexpected_status_depends_on_call_class() {
        let unexpected = || ClientError::UnexpectedStatus {
            url: "https://idp.example.com/clients".to_string(),
            status: 502,
        };
        let read = GatewayError::backend_read(unexpected()).into_response();
        assert_eq!(read.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let write = GatewayError::backend_write(unexpected()).into_response();
        assert_eq!(write.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn verification_failure_is_client_error() {
        let response =
            GatewayError::TokenVerification("bad signature".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
