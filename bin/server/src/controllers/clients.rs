//! OAuth2 client pages: list, register, delete.

use axum::Form;
use axum::extract::{Query, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use serde::Deserialize;
use std::sync::Arc;

use meui_idp::{Client, CreateClientsRequest, DeleteClientsRequest, ReadClientsRequest};

use crate::error::GatewayError;
use crate::gateway::{AppState, CurrentIdentity, CurrentSession};
use crate::views::{escape, page};

/// `GET /clients`: the caller's registered clients.
pub async fn show_clients(
    State(state): State<Arc<AppState>>,
    CurrentSession(ctx): CurrentSession,
    CurrentIdentity(_identity): CurrentIdentity,
) -> Result<Html<String>, GatewayError> {
    let idp = state.idp_client_for(&ctx);

    let envelope = idp
        .read_clients(&[])
        .await
        .map_err(GatewayError::backend_read)?;
    let clients: Vec<Client> = envelope.decode(0).map_err(GatewayError::backend_read)?;

    let mut rows = String::new();
    for client in &clients {
        rows.push_str(&format!(
            "<li>{name} ({id}) \
             <a href=\"/access/grant?receiver={id}\">grants</a> \
             <a href=\"/clients/delete?id={id}\">delete</a></li>",
            name = escape(&client.name),
            id = escape(&client.id),
        ));
    }

    let body = format!(
        "<ul>{rows}</ul><p><a href=\"/client\">Register a client</a></p>"
    );
    Ok(page("Clients", &body))
}

/// `GET /client`: the registration form.
pub async fn show_client(CurrentIdentity(_identity): CurrentIdentity) -> Html<String> {
    let body = "<form method=\"post\" action=\"/client\">\
                <label>Name <input type=\"text\" name=\"name\"></label>\
                <label>Description <input type=\"text\" name=\"description\"></label>\
                <label>Public client <input type=\"checkbox\" name=\"is_public\" value=\"true\"></label>\
                <button type=\"submit\">Register</button>\
                </form>";
    page("Register Client", body)
}

/// Form fields for client registration.
#[derive(Debug, Deserialize)]
pub struct ClientForm {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub is_public: bool,
}

/// `POST /client`: register and show the generated secret once.
pub async fn submit_client(
    State(state): State<Arc<AppState>>,
    CurrentSession(ctx): CurrentSession,
    Form(form): Form<ClientForm>,
) -> Result<Html<String>, GatewayError> {
    let idp = state.idp_client_for(&ctx);

    let ops = [CreateClientsRequest {
        name: form.name,
        description: form.description,
        is_public: form.is_public,
    }];
    let envelope = idp
        .create_clients(&ops)
        .await
        .map_err(GatewayError::backend_write)?;
    let created: Vec<Client> = envelope.decode(0).map_err(GatewayError::backend_write)?;

    let mut body = String::new();
    for client in &created {
        body.push_str(&format!(
            "<p>Registered {name} with id {id}.</p>",
            name = escape(&client.name),
            id = escape(&client.id),
        ));
        if let Some(secret) = &client.secret {
            // Shown exactly once; the IdP never returns it again.
            body.push_str(&format!(
                "<p>Client secret: <code>{}</code></p>",
                escape(secret)
            ));
        }
    }
    body.push_str("<p><a href=\"/clients\">Back to clients</a></p>");
    Ok(page("Client Registered", &body))
}

/// Query parameters for the delete confirmation.
#[derive(Debug, Deserialize)]
pub struct ClientDeleteQuery {
    pub id: String,
}

/// `GET /clients/delete`: confirmation form.
pub async fn show_client_delete(
    Query(query): Query<ClientDeleteQuery>,
    CurrentIdentity(_identity): CurrentIdentity,
) -> Html<String> {
    let body = format!(
        "<p>Delete client {id}?</p>\
         <form method=\"post\" action=\"/clients/delete\">\
         <input type=\"hidden\" name=\"id\" value=\"{id}\">\
         <button type=\"submit\">Delete</button>\
         </form>",
        id = escape(&query.id),
    );
    page("Delete Client", &body)
}

/// Form fields for the delete submission.
#[derive(Debug, Deserialize)]
pub struct ClientDeleteForm {
    pub id: String,
}

/// `POST /clients/delete`: delete and return to the list.
pub async fn submit_client_delete(
    State(state): State<Arc<AppState>>,
    CurrentSession(ctx): CurrentSession,
    Form(form): Form<ClientDeleteForm>,
) -> Result<Response, GatewayError> {
    let idp = state.idp_client_for(&ctx);

    let ops = [DeleteClientsRequest { id: form.id }];
    idp.delete_clients(&ops)
        .await
        .map_err(GatewayError::backend_write)?;

    Ok(Redirect::to("/clients").into_response())
}
