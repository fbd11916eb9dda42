//! HTTP transport for batched backend calls.
//!
//! Reads are GET with a JSON array body, creates POST, updates PUT and
//! deletes DELETE, all against a collection URL. A bearer credential is
//! attached to every call; whether it is the end-user's access token or
//! the application's own client-credentials token is the caller's choice.

use reqwest::{Method, StatusCode};
use serde::Serialize;
use std::fmt;
use url::Url;

use crate::envelope::{BatchError, BatchResponse};

/// Errors from issuing a batched backend call.
#[derive(Debug)]
pub enum ClientError {
    /// Network/DNS/TLS failure reaching the backend. Never retried.
    Transport { url: String, reason: String },
    /// The backend denied the call outright.
    Denied { url: String },
    /// The backend answered with a status the caller cannot act on.
    UnexpectedStatus { url: String, status: u16 },
    /// The response body was not a well-formed envelope.
    Envelope(BatchError),
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport { url, reason } => {
                write!(f, "transport failure calling {url}: {reason}")
            }
            Self::Denied { url } => {
                write!(f, "call to {url} was denied")
            }
            Self::UnexpectedStatus { url, status } => {
                write!(f, "unexpected status {status} from {url}")
            }
            Self::Envelope(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for ClientError {}

impl From<BatchError> for ClientError {
    fn from(e: BatchError) -> Self {
        Self::Envelope(e)
    }
}

/// A bearer-authorized HTTP client speaking the batch envelope convention.
#[derive(Debug, Clone)]
pub struct BatchClient {
    http: reqwest::Client,
    bearer: String,
}

impl BatchClient {
    /// Creates a client carrying `bearer` as its credential.
    #[must_use]
    pub fn new(bearer: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            bearer,
        }
    }

    /// Creates a client reusing an existing reqwest client.
    #[must_use]
    pub fn with_http(http: reqwest::Client, bearer: String) -> Self {
        Self { http, bearer }
    }

    /// Issues one batched call: `ops` as the JSON array body, envelope back.
    ///
    /// An empty `ops` slice is sent as an empty array, which backends treat
    /// as "everything the credential may see".
    ///
    /// # Errors
    ///
    /// `Transport` on connection failure, `Denied` on HTTP 403,
    /// `UnexpectedStatus` on any other non-200, `Envelope` when the body
    /// does not parse as a batch response.
    pub async fn call<Req: Serialize>(
        &self,
        method: Method,
        url: Url,
        ops: &[Req],
    ) -> Result<BatchResponse, ClientError> {
        let response = self
            .http
            .request(method, url.clone())
            .bearer_auth(&self.bearer)
            .json(ops)
            .send()
            .await
            .map_err(|e| ClientError::Transport {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        match response.status() {
            StatusCode::OK => {}
            StatusCode::FORBIDDEN => {
                return Err(ClientError::Denied {
                    url: url.to_string(),
                });
            }
            status => {
                return Err(ClientError::UnexpectedStatus {
                    url: url.to_string(),
                    status: status.as_u16(),
                });
            }
        }

        let envelope: BatchResponse =
            response
                .json()
                .await
                .map_err(|e| ClientError::Envelope(BatchError::Malformed {
                    reason: e.to_string(),
                }))?;

        Ok(envelope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_error_display_names_url() {
        let err = ClientError::Transport {
            url: "https://idp.example.com/humans".to_string(),
            reason: "connection refused".to_string(),
        };
        assert!(err.to_string().contains("https://idp.example.com/humans"));
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn denied_display() {
        let err = ClientError::Denied {
            url: "https://aap.example.com/grants".to_string(),
        };
        assert!(err.to_string().contains("denied"));
    }

    #[test]
    fn envelope_error_converts() {
        let err: ClientError = BatchError::MissingItem { index: 0 }.into();
        assert!(matches!(err, ClientError::Envelope(_)));
    }
}
