//! Bulk request/response envelope for the meui backend APIs.
//!
//! Every call to the IdP or AAP backend is batched: the request body is an
//! array of per-item operations, and the response body is an array of
//! per-item results, each independently carrying a status and either a
//! payload or a list of error details. Single-item operations read their
//! result at index 0.
//!
//! The [`client`] module provides the bearer-authorized HTTP transport the
//! typed backend clients are built on.

pub mod client;
pub mod envelope;

pub use client::{BatchClient, ClientError};
pub use envelope::{BatchError, BatchResponse, ItemError, ItemResult};
