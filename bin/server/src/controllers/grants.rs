//! Grant pages: per-receiver grant overview and grant submission.

use axum::Form;
use axum::extract::{Query, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use serde::Deserialize;
use std::collections::HashSet;
use std::sync::Arc;

use meui_aap::{CreateGrantsRequest, Grant, Publish, ReadGrantsRequest, ReadPublishesRequest};
use meui_idp::ResourceServer;

use crate::error::GatewayError;
use crate::gateway::{AppState, CurrentIdentity, CurrentSession};
use crate::views::{escape, page};

/// Query parameters shared by the grant pages. The receiver defaults to
/// the caller's own identity.
#[derive(Debug, Deserialize)]
pub struct GrantsQuery {
    #[serde(default)]
    pub publisher: Option<String>,
    #[serde(default)]
    pub receiver: Option<String>,
}

/// `GET /access/grant`: what the receiver holds, and what the publisher
/// offers.
pub async fn show_grants(
    State(state): State<Arc<AppState>>,
    CurrentSession(ctx): CurrentSession,
    CurrentIdentity(identity): CurrentIdentity,
    Query(query): Query<GrantsQuery>,
) -> Result<Html<String>, GatewayError> {
    let aap = state.aap_client_for(&ctx);
    let idp = state.idp_client_for(&ctx);

    let receiver = query.receiver.unwrap_or(identity.id);

    // Scopes offered by the selected publisher, when one is picked.
    let mut published: Vec<Publish> = Vec::new();
    if let Some(publisher) = &query.publisher {
        let ops = [ReadPublishesRequest {
            publisher: Some(publisher.clone()),
        }];
        let envelope = aap
            .read_publishes(&ops)
            .await
            .map_err(GatewayError::backend_read)?;
        published = envelope.decode(0).map_err(GatewayError::backend_read)?;
    }

    // What the receiver already holds.
    let ops = [ReadGrantsRequest {
        identity: Some(receiver.clone()),
        publisher: query.publisher.clone(),
        scope: None,
    }];
    let envelope = aap
        .read_grants(&ops)
        .await
        .map_err(GatewayError::backend_read)?;
    let grants: Vec<Grant> = envelope.decode(0).map_err(GatewayError::backend_read)?;
    let held: HashSet<&str> = grants.iter().map(|g| g.scope.as_str()).collect();

    // Publisher picker.
    let envelope = idp
        .read_resource_servers(&[])
        .await
        .map_err(GatewayError::backend_read)?;
    let servers: Vec<ResourceServer> =
        envelope.decode(0).map_err(GatewayError::backend_read)?;

    let mut publishers = String::new();
    for server in &servers {
        publishers.push_str(&format!(
            "<li><a href=\"/access/grant?receiver={receiver}&publisher={id}\">{name}</a></li>",
            receiver = escape(&receiver),
            id = escape(&server.id),
            name = escape(&server.name),
        ));
    }

    let mut rows = String::new();
    for publish in &published {
        let marker = if held.contains(publish.scope.as_str()) {
            " (granted)"
        } else {
            ""
        };
        rows.push_str(&format!(
            "<li><code>{scope}</code> {title}{marker}</li>",
            scope = escape(&publish.scope),
            title = escape(&publish.title),
        ));
    }

    let form = match &query.publisher {
        Some(publisher) => format!(
            "<form method=\"post\" action=\"/access/grant?receiver={receiver}&publisher={publisher}\">\
             <label>Scopes to grant (space separated)\
             <input type=\"text\" name=\"scopes\"></label>\
             <button type=\"submit\">Grant</button>\
             </form>",
            receiver = escape(&receiver),
            publisher = escape(publisher),
        ),
        None => String::new(),
    };

    let body = format!(
        "<h2>Publishers</h2><ul>{publishers}</ul>\
         <h2>Published scopes</h2><ul>{rows}</ul>\
         {form}"
    );
    Ok(page("Grants", &body))
}

/// Form fields for the grant submission: scope names, space separated.
#[derive(Debug, Deserialize)]
pub struct GrantsForm {
    #[serde(default)]
    pub scopes: String,
}

/// `POST /access/grant`: grant the listed scopes to the receiver.
pub async fn submit_grants(
    State(state): State<Arc<AppState>>,
    CurrentSession(ctx): CurrentSession,
    Query(query): Query<GrantsQuery>,
    Form(form): Form<GrantsForm>,
) -> Result<Response, GatewayError> {
    let (Some(publisher), Some(receiver)) = (query.publisher, query.receiver) else {
        return Err(GatewayError::backend_write(
            meui_batch::BatchError::Malformed {
                reason: "publisher and receiver are required".to_string(),
            },
        ));
    };

    let aap = state.aap_client_for(&ctx);

    let ops: Vec<CreateGrantsRequest> = form
        .scopes
        .split_whitespace()
        .map(|scope| CreateGrantsRequest {
            identity: receiver.clone(),
            scope: scope.to_string(),
            publisher: publisher.clone(),
        })
        .collect();

    if !ops.is_empty() {
        let envelope = aap
            .create_grants(&ops)
            .await
            .map_err(GatewayError::backend_write)?;
        envelope
            .decode::<Vec<Grant>>(0)
            .map_err(GatewayError::backend_write)?;
    }

    let target = format!("/access/grant?receiver={receiver}&publisher={publisher}");
    Ok(Redirect::to(&target).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grants_form_splits_scopes_on_whitespace() {
        let form = GrantsForm {
            scopes: "idp:read:humans  idp:update:humans".to_string(),
        };
        let scopes: Vec<&str> = form.scopes.split_whitespace().collect();
        assert_eq!(scopes, vec!["idp:read:humans", "idp:update:humans"]);
    }
}
