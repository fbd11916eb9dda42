//! Role pages: list, create, delete.

use axum::Form;
use axum::extract::{Query, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use serde::Deserialize;
use std::sync::Arc;

use meui_idp::{CreateRolesRequest, DeleteRolesRequest, ReadRolesRequest, Role};

use crate::error::GatewayError;
use crate::gateway::{AppState, CurrentIdentity, CurrentSession};
use crate::views::{escape, page};

/// `GET /roles`: roles visible to the caller.
pub async fn show_roles(
    State(state): State<Arc<AppState>>,
    CurrentSession(ctx): CurrentSession,
    CurrentIdentity(_identity): CurrentIdentity,
) -> Result<Html<String>, GatewayError> {
    let idp = state.idp_client_for(&ctx);

    let envelope = idp
        .read_roles(&[])
        .await
        .map_err(GatewayError::backend_read)?;
    let roles: Vec<Role> = envelope.decode(0).map_err(GatewayError::backend_read)?;

    let mut rows = String::new();
    for role in &roles {
        rows.push_str(&format!(
            "<li>{name} \
             <a href=\"/shadows?role={id}\">members</a> \
             <a href=\"/roles/delete?id={id}\">delete</a></li>",
            name = escape(&role.name),
            id = escape(&role.id),
        ));
    }

    let body = format!("<ul>{rows}</ul><p><a href=\"/role\">Create a role</a></p>");
    Ok(page("Roles", &body))
}

/// `GET /role`: the creation form.
pub async fn show_role(CurrentIdentity(_identity): CurrentIdentity) -> Html<String> {
    let body = "<form method=\"post\" action=\"/role\">\
                <label>Name <input type=\"text\" name=\"name\"></label>\
                <label>Description <input type=\"text\" name=\"description\"></label>\
                <button type=\"submit\">Create</button>\
                </form>";
    page("Create Role", body)
}

/// Form fields for role creation.
#[derive(Debug, Deserialize)]
pub struct RoleForm {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// `POST /role`: create and return to the list.
pub async fn submit_role(
    State(state): State<Arc<AppState>>,
    CurrentSession(ctx): CurrentSession,
    Form(form): Form<RoleForm>,
) -> Result<Response, GatewayError> {
    let idp = state.idp_client_for(&ctx);

    let ops = [CreateRolesRequest {
        name: form.name,
        description: form.description,
    }];
    let envelope = idp
        .create_roles(&ops)
        .await
        .map_err(GatewayError::backend_write)?;
    envelope
        .decode::<Vec<Role>>(0)
        .map_err(GatewayError::backend_write)?;

    Ok(Redirect::to("/roles").into_response())
}

/// Query parameters for the delete confirmation.
#[derive(Debug, Deserialize)]
pub struct RoleDeleteQuery {
    pub id: String,
}

/// `GET /roles/delete`: confirmation form, with the role looked up first.
pub async fn show_role_delete(
    State(state): State<Arc<AppState>>,
    CurrentSession(ctx): CurrentSession,
    Query(query): Query<RoleDeleteQuery>,
) -> Result<Html<String>, GatewayError> {
    let idp = state.idp_client_for(&ctx);

    let ops = [ReadRolesRequest {
        id: Some(query.id.clone()),
    }];
    let envelope = idp
        .read_roles(&ops)
        .await
        .map_err(GatewayError::backend_read)?;
    let roles: Vec<Role> = envelope.decode(0).map_err(GatewayError::backend_read)?;

    let Some(role) = roles.into_iter().next() else {
        return Ok(page("Delete Role", "<p>No such role.</p>"));
    };

    let body = format!(
        "<p>Delete role {name}?</p>\
         <form method=\"post\" action=\"/roles/delete\">\
         <input type=\"hidden\" name=\"id\" value=\"{id}\">\
         <button type=\"submit\">Delete</button>\
         </form>",
        name = escape(&role.name),
        id = escape(&role.id),
    );
    Ok(page("Delete Role", &body))
}

/// Form fields for the delete submission.
#[derive(Debug, Deserialize)]
pub struct RoleDeleteForm {
    pub id: String,
}

/// `POST /roles/delete`: delete and return to the list.
pub async fn submit_role_delete(
    State(state): State<Arc<AppState>>,
    CurrentSession(ctx): CurrentSession,
    Form(form): Form<RoleDeleteForm>,
) -> Result<Response, GatewayError> {
    let idp = state.idp_client_for(&ctx);

    let ops = [DeleteRolesRequest { id: form.id }];
    idp.delete_roles(&ops)
        .await
        .map_err(GatewayError::backend_write)?;

    Ok(Redirect::to("/roles").into_response())
}
