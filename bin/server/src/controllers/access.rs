//! Access pages: scope overview and new-scope publishing.

use axum::Form;
use axum::extract::State;
use axum::response::{Html, IntoResponse, Redirect, Response};
use serde::Deserialize;
use std::sync::Arc;

use meui_aap::{CreateScopesRequest, ReadScopesRequest, Scope};

use crate::error::GatewayError;
use crate::gateway::{AppState, CurrentIdentity, CurrentSession};
use crate::views::{escape, page};

/// `GET /access`: scopes visible to the caller.
pub async fn show_access(
    State(state): State<Arc<AppState>>,
    CurrentSession(ctx): CurrentSession,
    CurrentIdentity(_identity): CurrentIdentity,
) -> Result<Html<String>, GatewayError> {
    let aap = state.aap_client_for(&ctx);

    let ops: [ReadScopesRequest; 0] = [];
    let envelope = aap
        .read_scopes(&ops)
        .await
        .map_err(GatewayError::backend_read)?;
    let scopes: Vec<Scope> = envelope.decode(0).map_err(GatewayError::backend_read)?;

    let mut rows = String::new();
    for scope in &scopes {
        rows.push_str(&format!(
            "<li><code>{scope}</code> {title}</li>",
            scope = escape(&scope.scope),
            title = escape(&scope.title),
        ));
    }

    let body = format!("<ul>{rows}</ul><p><a href=\"/access/new\">Define a scope</a></p>");
    Ok(page("Access", &body))
}

/// `GET /access/new`: the scope definition form.
pub async fn show_access_new(CurrentIdentity(_identity): CurrentIdentity) -> Html<String> {
    let body = "<form method=\"post\" action=\"/access/new\">\
                <label>Scope <input type=\"text\" name=\"scope\"></label>\
                <label>Title <input type=\"text\" name=\"title\"></label>\
                <label>Description <input type=\"text\" name=\"description\"></label>\
                <button type=\"submit\">Define</button>\
                </form>";
    page("New Scope", body)
}

/// Form fields for the scope definition.
#[derive(Debug, Deserialize)]
pub struct AccessNewForm {
    pub scope: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// `POST /access/new`: define the scope and return to the overview.
pub async fn submit_access_new(
    State(state): State<Arc<AppState>>,
    CurrentSession(ctx): CurrentSession,
    Form(form): Form<AccessNewForm>,
) -> Result<Response, GatewayError> {
    let aap = state.aap_client_for(&ctx);

    let ops = [CreateScopesRequest {
        scope: form.scope,
        title: form.title,
        description: form.description,
    }];
    let envelope = aap
        .create_scopes(&ops)
        .await
        .map_err(GatewayError::backend_write)?;
    envelope
        .decode::<Vec<Scope>>(0)
        .map_err(GatewayError::backend_write)?;

    Ok(Redirect::to("/access").into_response())
}
