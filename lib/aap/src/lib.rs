//! REST client for the Access/Authorization Provider backend.
//!
//! The AAP owns scopes, scope grants, publishings, subscriptions,
//! consents, shadows and authorization verdicts. Every operation is
//! batched per the envelope convention in `meui-batch`.

pub mod client;
pub mod consents;
pub mod entities;
pub mod grants;
pub mod publishes;
pub mod scopes;
pub mod shadows;
pub mod subscriptions;

pub use client::AapClient;
pub use consents::{Consent, ReadConsentsRequest};
pub use entities::{JudgeRequest, Verdict};
pub use grants::{CreateGrantsRequest, DeleteGrantsRequest, Grant, ReadGrantsRequest};
pub use publishes::{CreatePublishesRequest, Publish, ReadPublishesRequest};
pub use scopes::{CreateScopesRequest, ReadScopesRequest, Scope};
pub use shadows::{CreateShadowsRequest, DeleteShadowsRequest, ReadShadowsRequest, Shadow};
pub use subscriptions::{
    CreateSubscriptionsRequest, DeleteSubscriptionsRequest, ReadSubscriptionsRequest, Subscription,
};
