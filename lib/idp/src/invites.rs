//! Invite operations.

use meui_batch::{BatchResponse, ClientError};
use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::client::IdpClient;

/// Collection endpoint for invites.
const INVITES: &str = "invites";
/// Endpoint that emails an issued invite to its recipient.
const INVITES_SEND: &str = "invites/send";

/// An issued invite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invite {
    pub id: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub invited_by: String,
    /// Unix timestamps, matching the backend's wire form.
    #[serde(default)]
    pub issued_at: i64,
    #[serde(default)]
    pub expires_at: i64,
    /// Zero until the invite has been mailed out.
    #[serde(default)]
    pub sent_at: i64,
}

/// One read operation; an empty operation lists the caller's invites.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReadInvitesRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

/// One invite issuance operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateInvitesRequest {
    pub email: String,
}

/// One invite send operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendInvitesRequest {
    pub id: String,
}

impl IdpClient {
    /// Reads invites. Each item decodes to `Vec<Invite>`.
    pub async fn read_invites(
        &self,
        ops: &[ReadInvitesRequest],
    ) -> Result<BatchResponse, ClientError> {
        self.transport()
            .call(Method::GET, self.collection(INVITES), ops)
            .await
    }

    /// Issues invites. Each item decodes to `Vec<Invite>`.
    pub async fn create_invites(
        &self,
        ops: &[CreateInvitesRequest],
    ) -> Result<BatchResponse, ClientError> {
        self.transport()
            .call(Method::POST, self.collection(INVITES), ops)
            .await
    }

    /// Mails issued invites to their recipients.
    pub async fn send_invites(
        &self,
        ops: &[SendInvitesRequest],
    ) -> Result<BatchResponse, ClientError> {
        self.transport()
            .call(Method::POST, self.collection(INVITES_SEND), ops)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsent_invite_has_zero_sent_at() {
        let invite: Invite = serde_json::from_str(
            r#"{"id": "i1", "email": "a@example.com", "issued_at": 1700000000, "expires_at": 1700086400}"#,
        )
        .expect("deserialize");
        assert_eq!(invite.sent_at, 0);
    }
}
