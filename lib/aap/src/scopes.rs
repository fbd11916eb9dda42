//! Scope definition operations.

use meui_batch::{BatchResponse, ClientError};
use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::client::AapClient;

/// Collection endpoint for scopes.
const SCOPES: &str = "scopes";

/// A scope definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scope {
    pub scope: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// One read operation; an empty operation lists visible scopes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReadScopesRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
}

/// One scope creation operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateScopesRequest {
    pub scope: String,
    pub title: String,
    pub description: String,
}

impl AapClient {
    /// Reads scope definitions. Each item decodes to `Vec<Scope>`.
    pub async fn read_scopes(
        &self,
        ops: &[ReadScopesRequest],
    ) -> Result<BatchResponse, ClientError> {
        self.transport()
            .call(Method::GET, self.collection(SCOPES), ops)
            .await
    }

    /// Creates scope definitions. Each item decodes to `Vec<Scope>`.
    pub async fn create_scopes(
        &self,
        ops: &[CreateScopesRequest],
    ) -> Result<BatchResponse, ClientError> {
        self.transport()
            .call(Method::POST, self.collection(SCOPES), ops)
            .await
    }
}
