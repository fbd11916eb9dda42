//! Scope publishing operations.

use meui_batch::{BatchResponse, ClientError};
use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::client::AapClient;

/// Collection endpoint for publishes.
const PUBLISHES: &str = "publishes";

/// A scope published by a resource server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Publish {
    pub publisher: String,
    pub scope: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Scopes whose holders may grant this one onwards.
    #[serde(default)]
    pub may_grant_scopes: Vec<String>,
}

/// One read operation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReadPublishesRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
}

/// One publish operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePublishesRequest {
    pub publisher: String,
    pub scope: String,
    pub title: String,
    pub description: String,
}

impl AapClient {
    /// Reads publishings. Each item decodes to `Vec<Publish>`.
    pub async fn read_publishes(
        &self,
        ops: &[ReadPublishesRequest],
    ) -> Result<BatchResponse, ClientError> {
        self.transport()
            .call(Method::GET, self.collection(PUBLISHES), ops)
            .await
    }

    /// Publishes scopes. Each item decodes to `Vec<Publish>`.
    pub async fn create_publishes(
        &self,
        ops: &[CreatePublishesRequest],
    ) -> Result<BatchResponse, ClientError> {
        self.transport()
            .call(Method::POST, self.collection(PUBLISHES), ops)
            .await
    }
}
