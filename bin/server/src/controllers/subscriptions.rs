//! Subscription pages: what the subscriber holds, and subscribing to
//! published scopes.

use axum::Form;
use axum::extract::{Query, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use serde::Deserialize;
use std::sync::Arc;

use meui_aap::{CreateSubscriptionsRequest, ReadSubscriptionsRequest, Subscription};

use crate::error::GatewayError;
use crate::gateway::{AppState, CurrentIdentity, CurrentSession};
use crate::views::{escape, page};

/// Query parameters for the subscription pages; the subscriber defaults to
/// the caller.
#[derive(Debug, Deserialize)]
pub struct SubscriptionsQuery {
    #[serde(default)]
    pub subscriber: Option<String>,
    #[serde(default)]
    pub publisher: Option<String>,
}

/// `GET /subscriptions`: the subscriber's subscriptions.
pub async fn show_subscriptions(
    State(state): State<Arc<AppState>>,
    CurrentSession(ctx): CurrentSession,
    CurrentIdentity(identity): CurrentIdentity,
    Query(query): Query<SubscriptionsQuery>,
) -> Result<Html<String>, GatewayError> {
    let aap = state.aap_client_for(&ctx);

    let subscriber = query.subscriber.unwrap_or(identity.id);

    let ops = [ReadSubscriptionsRequest {
        subscriber: Some(subscriber.clone()),
        publisher: query.publisher,
    }];
    let envelope = aap
        .read_subscriptions(&ops)
        .await
        .map_err(GatewayError::backend_read)?;
    let subscriptions: Vec<Subscription> =
        envelope.decode(0).map_err(GatewayError::backend_read)?;

    let mut rows = String::new();
    for subscription in &subscriptions {
        rows.push_str(&format!(
            "<li><code>{scope}</code> from {publisher}</li>",
            scope = escape(&subscription.scope),
            publisher = escape(&subscription.publisher),
        ));
    }

    let body = format!(
        "<ul>{rows}</ul>\
         <form method=\"post\" action=\"/subscriptions\">\
         <input type=\"hidden\" name=\"subscriber\" value=\"{subscriber}\">\
         <label>Publisher <input type=\"text\" name=\"publisher\"></label>\
         <label>Scopes (space separated) <input type=\"text\" name=\"scopes\"></label>\
         <button type=\"submit\">Subscribe</button>\
         </form>",
        subscriber = escape(&subscriber),
    );
    Ok(page("Subscriptions", &body))
}

/// Form fields for the subscribe submission.
#[derive(Debug, Deserialize)]
pub struct SubscribeForm {
    pub subscriber: String,
    pub publisher: String,
    #[serde(default)]
    pub scopes: String,
}

/// `POST /subscriptions`: subscribe to the listed scopes.
pub async fn submit_subscriptions(
    State(state): State<Arc<AppState>>,
    CurrentSession(ctx): CurrentSession,
    Form(form): Form<SubscribeForm>,
) -> Result<Response, GatewayError> {
    let aap = state.aap_client_for(&ctx);

    let ops: Vec<CreateSubscriptionsRequest> = form
        .scopes
        .split_whitespace()
        .map(|scope| CreateSubscriptionsRequest {
            subscriber: form.subscriber.clone(),
            publisher: form.publisher.clone(),
            scope: scope.to_string(),
        })
        .collect();

    if !ops.is_empty() {
        let envelope = aap
            .create_subscriptions(&ops)
            .await
            .map_err(GatewayError::backend_write)?;
        envelope
            .decode::<Vec<Subscription>>(0)
            .map_err(GatewayError::backend_write)?;
    }

    Ok(Redirect::to("/subscriptions").into_response())
}
