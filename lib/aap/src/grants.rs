//! Scope grant operations.

use meui_batch::{BatchResponse, ClientError};
use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::client::AapClient;

/// Collection endpoint for grants.
const GRANTS: &str = "grants";

/// A scope granted by a publisher to an identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grant {
    pub identity: String,
    pub scope: String,
    pub publisher: String,
    /// Unix timestamps; zero means unbounded.
    #[serde(default)]
    pub start_date: i64,
    #[serde(default)]
    pub end_date: i64,
}

/// One read operation; filters are optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReadGrantsRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
}

/// One grant creation operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateGrantsRequest {
    pub identity: String,
    pub scope: String,
    pub publisher: String,
}

/// One grant removal operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteGrantsRequest {
    pub identity: String,
    pub scope: String,
    pub publisher: String,
}

impl AapClient {
    /// Reads grants. Each item decodes to `Vec<Grant>`.
    pub async fn read_grants(
        &self,
        ops: &[ReadGrantsRequest],
    ) -> Result<BatchResponse, ClientError> {
        self.transport()
            .call(Method::GET, self.collection(GRANTS), ops)
            .await
    }

    /// Creates grants. Each item decodes to `Vec<Grant>`.
    pub async fn create_grants(
        &self,
        ops: &[CreateGrantsRequest],
    ) -> Result<BatchResponse, ClientError> {
        self.transport()
            .call(Method::POST, self.collection(GRANTS), ops)
            .await
    }

    /// Removes grants.
    pub async fn delete_grants(
        &self,
        ops: &[DeleteGrantsRequest],
    ) -> Result<BatchResponse, ClientError> {
        self.transport()
            .call(Method::DELETE, self.collection(GRANTS), ops)
            .await
    }
}
