//! Resource server pages: list, register, delete.

use axum::Form;
use axum::extract::{Query, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use serde::Deserialize;
use std::sync::Arc;

use meui_idp::{
    CreateResourceServersRequest, DeleteResourceServersRequest, ResourceServer,
};

use crate::error::GatewayError;
use crate::gateway::{AppState, CurrentIdentity, CurrentSession};
use crate::views::{escape, page};

/// `GET /resourceservers`: the caller's resource servers.
pub async fn show_resource_servers(
    State(state): State<Arc<AppState>>,
    CurrentSession(ctx): CurrentSession,
    CurrentIdentity(_identity): CurrentIdentity,
) -> Result<Html<String>, GatewayError> {
    let idp = state.idp_client_for(&ctx);

    let envelope = idp
        .read_resource_servers(&[])
        .await
        .map_err(GatewayError::backend_read)?;
    let servers: Vec<ResourceServer> =
        envelope.decode(0).map_err(GatewayError::backend_read)?;

    let mut rows = String::new();
    for server in &servers {
        rows.push_str(&format!(
            "<li>{name} (audience {audience}) \
             <a href=\"/access/grant?publisher={id}\">grants</a> \
             <a href=\"/resourceservers/delete?id={id}\">delete</a></li>",
            name = escape(&server.name),
            audience = escape(&server.audience),
            id = escape(&server.id),
        ));
    }

    let body = format!(
        "<ul>{rows}</ul><p><a href=\"/resourceserver\">Register a resource server</a></p>"
    );
    Ok(page("Resource Servers", &body))
}

/// `GET /resourceserver`: the registration form.
pub async fn show_resource_server(CurrentIdentity(_identity): CurrentIdentity) -> Html<String> {
    let body = "<form method=\"post\" action=\"/resourceserver\">\
                <label>Name <input type=\"text\" name=\"name\"></label>\
                <label>Description <input type=\"text\" name=\"description\"></label>\
                <label>Audience <input type=\"text\" name=\"audience\"></label>\
                <button type=\"submit\">Register</button>\
                </form>";
    page("Register Resource Server", body)
}

/// Form fields for resource server registration.
#[derive(Debug, Deserialize)]
pub struct ResourceServerForm {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub audience: String,
}

/// `POST /resourceserver`: register and return to the list.
pub async fn submit_resource_server(
    State(state): State<Arc<AppState>>,
    CurrentSession(ctx): CurrentSession,
    Form(form): Form<ResourceServerForm>,
) -> Result<Response, GatewayError> {
    let idp = state.idp_client_for(&ctx);

    let ops = [CreateResourceServersRequest {
        name: form.name,
        description: form.description,
        audience: form.audience,
    }];
    let envelope = idp
        .create_resource_servers(&ops)
        .await
        .map_err(GatewayError::backend_write)?;
    envelope
        .decode::<Vec<ResourceServer>>(0)
        .map_err(GatewayError::backend_write)?;

    Ok(Redirect::to("/resourceservers").into_response())
}

/// Query parameters for the delete confirmation.
#[derive(Debug, Deserialize)]
pub struct ResourceServerDeleteQuery {
    pub id: String,
}

/// `GET /resourceservers/delete`: confirmation form.
pub async fn show_resource_server_delete(
    Query(query): Query<ResourceServerDeleteQuery>,
    CurrentIdentity(_identity): CurrentIdentity,
) -> Html<String> {
    let body = format!(
        "<p>Delete resource server {id}?</p>\
         <form method=\"post\" action=\"/resourceservers/delete\">\
         <input type=\"hidden\" name=\"id\" value=\"{id}\">\
         <button type=\"submit\">Delete</button>\
         </form>",
        id = escape(&query.id),
    );
    page("Delete Resource Server", &body)
}

/// Form fields for the delete submission.
#[derive(Debug, Deserialize)]
pub struct ResourceServerDeleteForm {
    pub id: String,
}

/// `POST /resourceservers/delete`: delete and return to the list.
pub async fn submit_resource_server_delete(
    State(state): State<Arc<AppState>>,
    CurrentSession(ctx): CurrentSession,
    Form(form): Form<ResourceServerDeleteForm>,
) -> Result<Response, GatewayError> {
    let idp = state.idp_client_for(&ctx);

    let ops = [DeleteResourceServersRequest { id: form.id }];
    idp.delete_resource_servers(&ops)
        .await
        .map_err(GatewayError::backend_write)?;

    Ok(Redirect::to("/resourceservers").into_response())
}
