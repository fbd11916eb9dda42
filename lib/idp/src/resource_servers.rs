//! Resource server registration operations.

use meui_batch::{BatchResponse, ClientError};
use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::client::IdpClient;

/// Collection endpoint for resource servers.
const RESOURCE_SERVERS: &str = "resourceservers";

/// A registered resource server (an API protected by the AAP).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceServer {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub audience: String,
}

/// One read operation; an empty operation lists the caller's resource
/// servers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReadResourceServersRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

/// One registration operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateResourceServersRequest {
    pub name: String,
    pub description: String,
    pub audience: String,
}

/// One deletion operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteResourceServersRequest {
    pub id: String,
}

impl IdpClient {
    /// Reads resource servers. Each item decodes to `Vec<ResourceServer>`.
    pub async fn read_resource_servers(
        &self,
        ops: &[ReadResourceServersRequest],
    ) -> Result<BatchResponse, ClientError> {
        self.transport()
            .call(Method::GET, self.collection(RESOURCE_SERVERS), ops)
            .await
    }

    /// Registers resource servers.
    pub async fn create_resource_servers(
        &self,
        ops: &[CreateResourceServersRequest],
    ) -> Result<BatchResponse, ClientError> {
        self.transport()
            .call(Method::POST, self.collection(RESOURCE_SERVERS), ops)
            .await
    }

    /// Deletes resource servers.
    pub async fn delete_resource_servers(
        &self,
        ops: &[DeleteResourceServersRequest],
    ) -> Result<BatchResponse, ClientError> {
        self.transport()
            .call(Method::DELETE, self.collection(RESOURCE_SERVERS), ops)
            .await
    }
}
