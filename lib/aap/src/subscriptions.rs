//! Subscription operations.

use meui_batch::{BatchResponse, ClientError};
use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::client::AapClient;

/// Collection endpoint for subscriptions.
const SUBSCRIPTIONS: &str = "subscriptions";

/// A subscriber's hold on a published scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    pub subscriber: String,
    pub publisher: String,
    pub scope: String,
}

/// One read operation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReadSubscriptionsRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscriber: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
}

/// One subscription creation operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSubscriptionsRequest {
    pub subscriber: String,
    pub publisher: String,
    pub scope: String,
}

/// One subscription removal operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteSubscriptionsRequest {
    pub subscriber: String,
    pub publisher: String,
    pub scope: String,
}

impl AapClient {
    /// Reads subscriptions. Each item decodes to `Vec<Subscription>`.
    pub async fn read_subscriptions(
        &self,
        ops: &[ReadSubscriptionsRequest],
    ) -> Result<BatchResponse, ClientError> {
        self.transport()
            .call(Method::GET, self.collection(SUBSCRIPTIONS), ops)
            .await
    }

    /// Creates subscriptions. Each item decodes to `Vec<Subscription>`.
    pub async fn create_subscriptions(
        &self,
        ops: &[CreateSubscriptionsRequest],
    ) -> Result<BatchResponse, ClientError> {
        self.transport()
            .call(Method::POST, self.collection(SUBSCRIPTIONS), ops)
            .await
    }

    /// Removes subscriptions.
    pub async fn delete_subscriptions(
        &self,
        ops: &[DeleteSubscriptionsRequest],
    ) -> Result<BatchResponse, ClientError> {
        self.transport()
            .call(Method::DELETE, self.collection(SUBSCRIPTIONS), ops)
            .await
    }
}
