//! Human (user profile) operations.

use meui_batch::{BatchResponse, ClientError};
use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::client::IdpClient;

/// Collection endpoint for humans.
const HUMANS: &str = "humans";

/// A user profile as the IdP exposes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Human {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub allow_login: bool,
    #[serde(default)]
    pub totp_required: bool,
}

/// One read operation. All filters optional; an empty operation resolves
/// to whatever the bearer credential is allowed to see (for an end-user
/// token: the caller's own profile).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReadHumansRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl ReadHumansRequest {
    /// A read filtered by subject id.
    #[must_use]
    pub fn by_id(id: String) -> Self {
        Self {
            id: Some(id),
            ..Self::default()
        }
    }
}

/// One profile update operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateHumansRequest {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl IdpClient {
    /// Reads human profiles. Each response item decodes to `Vec<Human>`.
    pub async fn read_humans(
        &self,
        ops: &[ReadHumansRequest],
    ) -> Result<BatchResponse, ClientError> {
        self.transport()
            .call(Method::GET, self.collection(HUMANS), ops)
            .await
    }

    /// Updates human profiles. Each response item decodes to `Vec<Human>`.
    pub async fn update_humans(
        &self,
        ops: &[UpdateHumansRequest],
    ) -> Result<BatchResponse, ClientError> {
        self.transport()
            .call(Method::PUT, self.collection(HUMANS), ops)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_request_omits_empty_filters() {
        let op = ReadHumansRequest::by_id("sub-1".to_string());
        let json = serde_json::to_string(&op).expect("serialize");
        assert_eq!(json, r#"{"id":"sub-1"}"#);
    }

    #[test]
    fn human_decodes_with_missing_optionals() {
        let human: Human = serde_json::from_str(
            r#"{"id": "h1", "username": "alice"}"#,
        )
        .expect("deserialize");
        assert_eq!(human.id, "h1");
        assert_eq!(human.email, "");
        assert!(!human.totp_required);
    }
}
