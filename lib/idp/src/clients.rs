//! OAuth2 client registration operations.

use meui_batch::{BatchResponse, ClientError};
use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::client::IdpClient;

/// Collection endpoint for OAuth2 clients.
const CLIENTS: &str = "clients";

/// A registered OAuth2 client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Only present in the create response, never on reads.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
}

/// One read operation; an empty operation lists the caller's clients.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReadClientsRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

/// One client registration operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateClientsRequest {
    pub name: String,
    pub description: String,
    pub is_public: bool,
}

/// One client deletion operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteClientsRequest {
    pub id: String,
}

impl IdpClient {
    /// Reads client registrations. Each item decodes to `Vec<Client>`.
    pub async fn read_clients(
        &self,
        ops: &[ReadClientsRequest],
    ) -> Result<BatchResponse, ClientError> {
        self.transport()
            .call(Method::GET, self.collection(CLIENTS), ops)
            .await
    }

    /// Registers clients. Each item decodes to `Vec<Client>` carrying the
    /// generated secret.
    pub async fn create_clients(
        &self,
        ops: &[CreateClientsRequest],
    ) -> Result<BatchResponse, ClientError> {
        self.transport()
            .call(Method::POST, self.collection(CLIENTS), ops)
            .await
    }

    /// Deletes client registrations.
    pub async fn delete_clients(
        &self,
        ops: &[DeleteClientsRequest],
    ) -> Result<BatchResponse, ClientError> {
        self.transport()
            .call(Method::DELETE, self.collection(CLIENTS), ops)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_read_omits_secret() {
        let client: Client = serde_json::from_str(
            r#"{"id": "c1", "name": "My App", "description": "demo"}"#,
        )
        .expect("deserialize");
        assert!(client.secret.is_none());
        let json = serde_json::to_string(&client).expect("serialize");
        assert!(!json.contains("secret"));
    }
}
