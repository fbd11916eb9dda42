//! Consent read operations.

use meui_batch::{BatchResponse, ClientError};
use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::client::AapClient;

/// Collection endpoint for consents.
const CONSENTS: &str = "consents";

/// A consent the identity has given a client to act on a scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Consent {
    pub identity: String,
    pub subscriber: String,
    pub publisher: String,
    pub scope: String,
}

/// One read operation; an empty operation lists the caller's consents.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReadConsentsRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identity: Option<String>,
}

impl AapClient {
    /// Reads consents. Each item decodes to `Vec<Consent>`.
    pub async fn read_consents(
        &self,
        ops: &[ReadConsentsRequest],
    ) -> Result<BatchResponse, ClientError> {
        self.transport()
            .call(Method::GET, self.collection(CONSENTS), ops)
            .await
    }
}
