//! Consent overview.

use axum::extract::State;
use axum::response::Html;
use std::sync::Arc;

use meui_aap::{Consent, ReadConsentsRequest};
use meui_idp::Client;

use crate::error::GatewayError;
use crate::gateway::{AppState, CurrentIdentity, CurrentSession};
use crate::views::{escape, page};

/// `GET /consents`: consents the caller has given, with client names
/// resolved where possible.
pub async fn show_consents(
    State(state): State<Arc<AppState>>,
    CurrentSession(ctx): CurrentSession,
    CurrentIdentity(_identity): CurrentIdentity,
) -> Result<Html<String>, GatewayError> {
    let aap = state.aap_client_for(&ctx);
    let idp = state.idp_client_for(&ctx);

    let ops: [ReadConsentsRequest; 0] = [];
    let envelope = aap
        .read_consents(&ops)
        .await
        .map_err(GatewayError::backend_read)?;
    let consents: Vec<Consent> = envelope.decode(0).map_err(GatewayError::backend_read)?;

    let envelope = idp
        .read_clients(&[])
        .await
        .map_err(GatewayError::backend_read)?;
    let clients: Vec<Client> = envelope.decode(0).map_err(GatewayError::backend_read)?;

    let client_name = |id: &str| -> String {
        clients
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.name.clone())
            .unwrap_or_else(|| id.to_string())
    };

    let mut rows = String::new();
    for consent in &consents {
        rows.push_str(&format!(
            "<li>{subscriber} may <code>{scope}</code> (publisher {publisher})</li>",
            subscriber = escape(&client_name(&consent.subscriber)),
            scope = escape(&consent.scope),
            publisher = escape(&consent.publisher),
        ));
    }

    let body = format!("<ul>{rows}</ul>");
    Ok(page("Consents", &body))
}
