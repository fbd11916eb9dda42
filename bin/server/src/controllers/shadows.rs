//! Shadow pages: role membership listing and assignment.

use axum::Form;
use axum::extract::{Query, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use serde::Deserialize;
use std::sync::Arc;

use meui_aap::{CreateShadowsRequest, ReadShadowsRequest, Shadow};

use crate::error::GatewayError;
use crate::gateway::{AppState, CurrentIdentity, CurrentSession};
use crate::views::{escape, page};

/// Query parameters for the shadow listing.
#[derive(Debug, Deserialize)]
pub struct ShadowsQuery {
    #[serde(default)]
    pub role: Option<String>,
}

/// `GET /shadows`: identities standing in the selected role.
pub async fn show_shadows(
    State(state): State<Arc<AppState>>,
    CurrentSession(ctx): CurrentSession,
    CurrentIdentity(_identity): CurrentIdentity,
    Query(query): Query<ShadowsQuery>,
) -> Result<Html<String>, GatewayError> {
    let aap = state.aap_client_for(&ctx);

    let ops = [ReadShadowsRequest {
        identity: None,
        shadow: query.role,
    }];
    let envelope = aap
        .read_shadows(&ops)
        .await
        .map_err(GatewayError::backend_read)?;
    let shadows: Vec<Shadow> = envelope.decode(0).map_err(GatewayError::backend_read)?;

    let mut rows = String::new();
    for shadow in &shadows {
        rows.push_str(&format!(
            "<li>{identity} in {role}</li>",
            identity = escape(&shadow.identity),
            role = escape(&shadow.shadow),
        ));
    }

    let body = format!("<ul>{rows}</ul><p><a href=\"/shadow\">Assign a role</a></p>");
    Ok(page("Shadows", &body))
}

/// `GET /shadow`: the assignment form.
pub async fn show_shadow(CurrentIdentity(_identity): CurrentIdentity) -> Html<String> {
    let body = "<form method=\"post\" action=\"/shadow\">\
                <label>Identity <input type=\"text\" name=\"identity\"></label>\
                <label>Role <input type=\"text\" name=\"role\"></label>\
                <button type=\"submit\">Assign</button>\
                </form>";
    page("Assign Role", body)
}

/// Form fields for the assignment submission.
#[derive(Debug, Deserialize)]
pub struct ShadowForm {
    pub identity: String,
    pub role: String,
}

/// `POST /shadow`: assign and return to the listing.
pub async fn submit_shadow(
    State(state): State<Arc<AppState>>,
    CurrentSession(ctx): CurrentSession,
    Form(form): Form<ShadowForm>,
) -> Result<Response, GatewayError> {
    let aap = state.aap_client_for(&ctx);

    let ops = [CreateShadowsRequest {
        identity: form.identity,
        shadow: form.role.clone(),
    }];
    let envelope = aap
        .create_shadows(&ops)
        .await
        .map_err(GatewayError::backend_write)?;
    envelope
        .decode::<Vec<Shadow>>(0)
        .map_err(GatewayError::backend_write)?;

    let target = format!("/shadows?role={}", form.role);
    Ok(Redirect::to(&target).into_response())
}
