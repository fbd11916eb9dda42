//! Shadow (role membership) operations.

use meui_batch::{BatchResponse, ClientError};
use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::client::AapClient;

/// Collection endpoint for shadows.
const SHADOWS: &str = "shadows";

/// A shadow: an identity standing in a role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shadow {
    pub identity: String,
    pub shadow: String,
    /// Unix timestamps; zero means unbounded.
    #[serde(default)]
    pub start_date: i64,
    #[serde(default)]
    pub end_date: i64,
}

/// One read operation; filter by identity or role.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReadShadowsRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shadow: Option<String>,
}

/// One shadow creation operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateShadowsRequest {
    pub identity: String,
    pub shadow: String,
}

/// One shadow removal operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteShadowsRequest {
    pub identity: String,
    pub shadow: String,
}

impl AapClient {
    /// Reads shadows. Each item decodes to `Vec<Shadow>`.
    pub async fn read_shadows(
        &self,
        ops: &[ReadShadowsRequest],
    ) -> Result<BatchResponse, ClientError> {
        self.transport()
            .call(Method::GET, self.collection(SHADOWS), ops)
            .await
    }

    /// Creates shadows. Each item decodes to `Vec<Shadow>`.
    pub async fn create_shadows(
        &self,
        ops: &[CreateShadowsRequest],
    ) -> Result<BatchResponse, ClientError> {
        self.transport()
            .call(Method::POST, self.collection(SHADOWS), ops)
            .await
    }

    /// Removes shadows.
    pub async fn delete_shadows(
        &self,
        ops: &[DeleteShadowsRequest],
    ) -> Result<BatchResponse, ClientError> {
        self.transport()
            .call(Method::DELETE, self.collection(SHADOWS), ops)
            .await
    }
}
