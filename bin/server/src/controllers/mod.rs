//! Per-resource show/submit controllers.
//!
//! Thin CRUD-over-HTTP glue: each handler consumes the identity bound by
//! the gateway, issues one or a few batched calls against the IdP/AAP
//! backends, and renders a minimal page or redirects.

pub mod access;
pub mod clients;
pub mod consents;
pub mod grants;
pub mod invites;
pub mod profiles;
pub mod publishings;
pub mod resource_servers;
pub mod roles;
pub mod shadows;
pub mod subscriptions;
