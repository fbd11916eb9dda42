//! Authorization judgement operations.

use meui_batch::{BatchResponse, ClientError};
use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::client::AapClient;

/// Judgement endpoint.
const ENTITIES_JUDGE: &str = "entities/judge";

/// One judgement request: may `owners` exercise `scopes` published by
/// `publisher`?
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JudgeRequest {
    pub publisher: String,
    pub owners: Vec<String>,
    pub scopes: Vec<String>,
}

/// The AAP's answer to a judgement request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub granted: bool,
}

impl AapClient {
    /// Asks the AAP for authorization verdicts. Each item decodes to
    /// [`Verdict`].
    pub async fn judge(&self, ops: &[JudgeRequest]) -> Result<BatchResponse, ClientError> {
        self.transport()
            .call(Method::GET, self.collection(ENTITIES_JUDGE), ops)
            .await
    }
}
