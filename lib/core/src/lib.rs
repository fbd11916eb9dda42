//! Core domain types and utilities for the meui identity front-end.
//!
//! This crate provides the foundational typed identifiers shared across
//! the meui self-service gateway.

pub mod id;

pub use id::RequestId;
