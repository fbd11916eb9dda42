//! Role operations.

use meui_batch::{BatchResponse, ClientError};
use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::client::IdpClient;

/// Collection endpoint for roles.
const ROLES: &str = "roles";

/// A role definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// One read operation; an empty operation lists visible roles.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReadRolesRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

/// One role creation operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRolesRequest {
    pub name: String,
    pub description: String,
}

/// One role deletion operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteRolesRequest {
    pub id: String,
}

impl IdpClient {
    /// Reads roles. Each item decodes to `Vec<Role>`.
    pub async fn read_roles(
        &self,
        ops: &[ReadRolesRequest],
    ) -> Result<BatchResponse, ClientError> {
        self.transport()
            .call(Method::GET, self.collection(ROLES), ops)
            .await
    }

    /// Creates roles. Each item decodes to `Vec<Role>`.
    pub async fn create_roles(
        &self,
        ops: &[CreateRolesRequest],
    ) -> Result<BatchResponse, ClientError> {
        self.transport()
            .call(Method::POST, self.collection(ROLES), ops)
            .await
    }

    /// Deletes roles.
    pub async fn delete_roles(
        &self,
        ops: &[DeleteRolesRequest],
    ) -> Result<BatchResponse, ClientError> {
        self.transport()
            .call(Method::DELETE, self.collection(ROLES), ops)
            .await
    }
}
