//! REST client for the Identity Provider backend.
//!
//! The IdP owns humans (user profiles), OAuth2 clients, resource servers,
//! invites, and roles. Every operation is batched per the envelope
//! convention in `meui-batch`; the calls here expose typed per-resource
//! request/response shapes on top of that transport.

pub mod client;
pub mod clients;
pub mod humans;
pub mod invites;
pub mod resource_servers;
pub mod roles;

pub use client::IdpClient;
pub use clients::{Client, CreateClientsRequest, DeleteClientsRequest, ReadClientsRequest};
pub use humans::{Human, ReadHumansRequest, UpdateHumansRequest};
pub use invites::{CreateInvitesRequest, Invite, ReadInvitesRequest, SendInvitesRequest};
pub use resource_servers::{
    CreateResourceServersRequest, DeleteResourceServersRequest, ReadResourceServersRequest,
    ResourceServer,
};
pub use roles::{CreateRolesRequest, DeleteRolesRequest, ReadRolesRequest, Role};
