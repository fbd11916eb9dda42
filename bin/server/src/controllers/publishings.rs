//! Publishing pages: published scopes per resource server, and publishing
//! a new scope.

use axum::Form;
use axum::extract::{Query, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use serde::Deserialize;
use std::sync::Arc;

use meui_aap::{CreatePublishesRequest, Publish, ReadPublishesRequest};

use crate::error::GatewayError;
use crate::gateway::{AppState, CurrentIdentity, CurrentSession};
use crate::views::{escape, page};

/// Query parameters for the publishing list.
#[derive(Debug, Deserialize)]
pub struct PublishingsQuery {
    #[serde(default)]
    pub publisher: Option<String>,
}

/// `GET /publishings`: scopes published by the selected resource server.
pub async fn show_publishings(
    State(state): State<Arc<AppState>>,
    CurrentSession(ctx): CurrentSession,
    CurrentIdentity(_identity): CurrentIdentity,
    Query(query): Query<PublishingsQuery>,
) -> Result<Html<String>, GatewayError> {
    let aap = state.aap_client_for(&ctx);

    let ops = [ReadPublishesRequest {
        publisher: query.publisher,
    }];
    let envelope = aap
        .read_publishes(&ops)
        .await
        .map_err(GatewayError::backend_read)?;
    let publishes: Vec<Publish> = envelope.decode(0).map_err(GatewayError::backend_read)?;

    let mut rows = String::new();
    for publish in &publishes {
        rows.push_str(&format!(
            "<li><code>{scope}</code> {title} (publisher {publisher})</li>",
            scope = escape(&publish.scope),
            title = escape(&publish.title),
            publisher = escape(&publish.publisher),
        ));
    }

    let body = format!("<ul>{rows}</ul><p><a href=\"/publish\">Publish a scope</a></p>");
    Ok(page("Publishings", &body))
}

/// `GET /publish`: the publish form.
pub async fn show_publish(CurrentIdentity(_identity): CurrentIdentity) -> Html<String> {
    let body = "<form method=\"post\" action=\"/publish\">\
                <label>Publisher <input type=\"text\" name=\"publisher\"></label>\
                <label>Scope <input type=\"text\" name=\"scope\"></label>\
                <label>Title <input type=\"text\" name=\"title\"></label>\
                <label>Description <input type=\"text\" name=\"description\"></label>\
                <button type=\"submit\">Publish</button>\
                </form>";
    page("Publish Scope", body)
}

/// Form fields for the publish submission.
#[derive(Debug, Deserialize)]
pub struct PublishForm {
    pub publisher: String,
    pub scope: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// `POST /publish`: publish the scope and return to the list.
pub async fn submit_publish(
    State(state): State<Arc<AppState>>,
    CurrentSession(ctx): CurrentSession,
    Form(form): Form<PublishForm>,
) -> Result<Response, GatewayError> {
    let aap = state.aap_client_for(&ctx);

    let ops = [CreatePublishesRequest {
        publisher: form.publisher.clone(),
        scope: form.scope,
        title: form.title,
        description: form.description,
    }];
    let envelope = aap
        .create_publishes(&ops)
        .await
        .map_err(GatewayError::backend_write)?;
    envelope
        .decode::<Vec<Publish>>(0)
        .map_err(GatewayError::backend_write)?;

    let target = format!("/publishings?publisher={}", form.publisher);
    Ok(Redirect::to(&target).into_response())
}
