//! Router assembly.
//!
//! Two route groups: public endpoints (the token-exchange callback must be
//! reachable by the provider redirect before any session is authenticated,
//! and the post-logout landing page clears sessions that are already gone),
//! and everything else behind the authentication gate plus identity
//! resolution.

use axum::routing::get;
use axum::{Router, middleware};
use std::sync::Arc;
use tower_http::services::ServeDir;

use crate::controllers::{
    access, clients, consents, grants, invites, profiles, publishings, resource_servers, roles,
    shadows, subscriptions,
};
use crate::gateway::{self, AppState};
use crate::request_id;

/// Builds the application router.
pub fn app(state: Arc<AppState>) -> Router {
    let public = Router::new()
        .route("/callback", get(gateway::callback::callback))
        .route("/seeyoulater", get(gateway::logout::seeyoulater))
        .route("/profile/public", get(profiles::show_public_profile));

    let protected = Router::new()
        // Profile
        .route("/", get(profiles::show_profile))
        .route(
            "/profile/edit",
            get(profiles::show_profile_edit).post(profiles::submit_profile_edit),
        )
        .route("/logout", get(gateway::logout::logout))
        // Invites
        .route("/invites", get(invites::show_invites))
        .route(
            "/invites/send",
            get(invites::show_invites_send).post(invites::submit_invites_send),
        )
        .route(
            "/invite",
            get(invites::show_invite).post(invites::submit_invite),
        )
        // Clients
        .route("/clients", get(clients::show_clients))
        .route(
            "/clients/delete",
            get(clients::show_client_delete).post(clients::submit_client_delete),
        )
        .route(
            "/client",
            get(clients::show_client).post(clients::submit_client),
        )
        // Resource servers
        .route(
            "/resourceservers",
            get(resource_servers::show_resource_servers),
        )
        .route(
            "/resourceservers/delete",
            get(resource_servers::show_resource_server_delete)
                .post(resource_servers::submit_resource_server_delete),
        )
        .route(
            "/resourceserver",
            get(resource_servers::show_resource_server)
                .post(resource_servers::submit_resource_server),
        )
        // Access
        .route("/access", get(access::show_access))
        .route(
            "/access/new",
            get(access::show_access_new).post(access::submit_access_new),
        )
        .route(
            "/access/grant",
            get(grants::show_grants).post(grants::submit_grants),
        )
        // Publishings
        .route("/publishings", get(publishings::show_publishings))
        .route(
            "/publish",
            get(publishings::show_publish).post(publishings::submit_publish),
        )
        // Subscriptions
        .route(
            "/subscriptions",
            get(subscriptions::show_subscriptions).post(subscriptions::submit_subscriptions),
        )
        // Consents
        .route("/consents", get(consents::show_consents))
        // Roles
        .route("/roles", get(roles::show_roles))
        .route(
            "/roles/delete",
            get(roles::show_role_delete).post(roles::submit_role_delete),
        )
        .route("/role", get(roles::show_role).post(roles::submit_role))
        // Shadows
        .route("/shadows", get(shadows::show_shadows))
        .route(
            "/shadow",
            get(shadows::show_shadow).post(shadows::submit_shadow),
        )
        // The outermost layer is added last: requests hit the gate before
        // identity resolution.
        .layer(middleware::from_fn_with_state(
            state.clone(),
            gateway::identity::require_identity,
        ))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            gateway::gate::authentication_required,
        ));

    Router::new()
        .merge(public)
        .merge(protected)
        .nest_service("/public", ServeDir::new("public"))
        .layer(middleware::from_fn(request_id::request_logger))
        .with_state(state)
}
