//! The batched response envelope and its typed accessors.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single error detail inside a per-item result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemError {
    /// Machine-readable error code assigned by the backend.
    pub code: i32,
    /// Human-readable description of what went wrong.
    pub error: String,
}

impl fmt::Display for ItemError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.error)
    }
}

/// One entry of a batched response: a status plus either a payload or
/// a list of error details.
///
/// The payload is kept as raw JSON until the caller asks for it with a
/// concrete type, so a single response can mix result shapes per item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemResult {
    /// Per-item HTTP-style status code.
    pub status: u16,
    /// The payload for successful items.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ok: Option<serde_json::Value>,
    /// Error details for failed items.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ItemError>,
}

impl ItemResult {
    /// Returns true if this item reports success.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.status == 200 && self.ok.is_some()
    }

    /// Deserializes the payload into `T`.
    ///
    /// # Errors
    ///
    /// Returns `BatchError::ItemFailed` when the item carries errors or a
    /// non-200 status, and `BatchError::Malformed` when the payload does
    /// not deserialize into `T`.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, BatchError> {
        if !self.errors.is_empty() || self.status != 200 {
            return Err(BatchError::ItemFailed {
                status: self.status,
                errors: self.errors.clone(),
            });
        }
        let value = self.ok.clone().ok_or(BatchError::ItemFailed {
            status: self.status,
            errors: Vec::new(),
        })?;
        serde_json::from_value(value).map_err(|e| BatchError::Malformed {
            reason: e.to_string(),
        })
    }
}

/// An ordered sequence of per-item results, indexed positionally.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BatchResponse(Vec<ItemResult>);

impl BatchResponse {
    /// Wraps a list of item results.
    #[must_use]
    pub fn new(items: Vec<ItemResult>) -> Self {
        Self(items)
    }

    /// Returns the number of items in the response.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the response holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the raw item at `index`, if present.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&ItemResult> {
        self.0.get(index)
    }

    /// Decodes the payload of the item at `index` into `T`.
    ///
    /// This is the typed replacement for the index-based unmarshal the
    /// backends' envelope convention calls for; single-item operations
    /// use `index == 0`.
    ///
    /// # Errors
    ///
    /// `BatchError::MissingItem` when the index is out of range, otherwise
    /// whatever [`ItemResult::decode`] reports.
    pub fn decode<T: DeserializeOwned>(&self, index: usize) -> Result<T, BatchError> {
        let item = self.0.get(index).ok_or(BatchError::MissingItem { index })?;
        item.decode()
    }

    /// Iterates over the raw items.
    pub fn iter(&self) -> impl Iterator<Item = &ItemResult> {
        self.0.iter()
    }
}

/// Errors from reading a batched response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchError {
    /// The requested index is not present in the response.
    MissingItem { index: usize },
    /// The item reported a failure status or error details.
    ItemFailed { status: u16, errors: Vec<ItemError> },
    /// The payload did not match the expected shape.
    Malformed { reason: String },
}

impl fmt::Display for BatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingItem { index } => {
                write!(f, "batch response has no item at index {index}")
            }
            Self::ItemFailed { status, errors } => {
                write!(f, "batch item failed with status {status}")?;
                for e in errors {
                    write!(f, "; {e}")?;
                }
                Ok(())
            }
            Self::Malformed { reason } => {
                write!(f, "malformed batch payload: {reason}")
            }
        }
    }
}

impl std::error::Error for BatchError {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Deserialize)]
    struct Widget {
        id: String,
    }

    fn ok_item(payload: serde_json::Value) -> ItemResult {
        ItemResult {
            status: 200,
            ok: Some(payload),
            errors: Vec::new(),
        }
    }

    #[test]
    fn decode_first_item() {
        let response = BatchResponse::new(vec![ok_item(serde_json::json!([{"id": "w1"}]))]);
        let widgets: Vec<Widget> = response.decode(0).expect("decode");
        assert_eq!(widgets, vec![Widget { id: "w1".into() }]);
    }

    #[test]
    fn decode_out_of_range_index() {
        let response = BatchResponse::new(vec![]);
        let err = response.decode::<Vec<Widget>>(0).unwrap_err();
        assert_eq!(err, BatchError::MissingItem { index: 0 });
    }

    #[test]
    fn decode_failed_item_reports_errors() {
        let response = BatchResponse::new(vec![ItemResult {
            status: 403,
            ok: None,
            errors: vec![ItemError {
                code: 12,
                error: "not allowed".into(),
            }],
        }]);
        let err = response.decode::<Vec<Widget>>(0).unwrap_err();
        match err {
            BatchError::ItemFailed { status, errors } => {
                assert_eq!(status, 403);
                assert_eq!(errors.len(), 1);
                assert!(errors[0].to_string().contains("not allowed"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn decode_wrong_shape_is_malformed() {
        let response = BatchResponse::new(vec![ok_item(serde_json::json!({"nope": true}))]);
        let err = response.decode::<Vec<Widget>>(0).unwrap_err();
        assert!(matches!(err, BatchError::Malformed { .. }));
    }

    #[test]
    fn mixed_item_statuses_are_independent() {
        let response = BatchResponse::new(vec![
            ok_item(serde_json::json!([{"id": "a"}])),
            ItemResult {
                status: 404,
                ok: None,
                errors: vec![],
            },
        ]);
        assert!(response.get(0).expect("item 0").is_ok());
        assert!(!response.get(1).expect("item 1").is_ok());
        let first: Vec<Widget> = response.decode(0).expect("decode 0");
        assert_eq!(first.len(), 1);
        assert!(response.decode::<Vec<Widget>>(1).is_err());
    }

    #[test]
    fn envelope_serde_roundtrip() {
        let response = BatchResponse::new(vec![ok_item(serde_json::json!([{"id": "a"}]))]);
        let json = serde_json::to_string(&response).expect("serialize");
        // The envelope is a bare JSON array on the wire.
        assert!(json.starts_with('['));
        let parsed: BatchResponse = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed.len(), 1);
    }
}
