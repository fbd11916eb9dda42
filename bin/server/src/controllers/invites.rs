//! Invite pages: list, issue, send.

use axum::Form;
use axum::extract::{Query, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use chrono::DateTime;
use serde::Deserialize;
use std::sync::Arc;

use meui_idp::{CreateInvitesRequest, Invite, ReadInvitesRequest, SendInvitesRequest};

use crate::error::GatewayError;
use crate::gateway::{AppState, CurrentIdentity, CurrentSession};
use crate::views::{escape, page};

/// Renders a unix timestamp for display; `n/a` when unset.
fn render_timestamp(ts: i64) -> String {
    if ts <= 0 {
        return "n/a".to_string();
    }
    DateTime::from_timestamp(ts, 0)
        .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "n/a".to_string())
}

/// `GET /invites`: invites issued by the caller.
pub async fn show_invites(
    State(state): State<Arc<AppState>>,
    CurrentSession(ctx): CurrentSession,
    CurrentIdentity(_identity): CurrentIdentity,
) -> Result<Html<String>, GatewayError> {
    let idp = state.idp_client_for(&ctx);

    let envelope = idp
        .read_invites(&[])
        .await
        .map_err(GatewayError::backend_read)?;
    let invites: Vec<Invite> = envelope.decode(0).map_err(GatewayError::backend_read)?;

    let mut rows = String::new();
    for invite in &invites {
        rows.push_str(&format!(
            "<li>{email} issued {issued} expires {expires} sent {sent} \
             <a href=\"/invites/send?id={id}\">send</a> \
             <a href=\"/access/grant?receiver={id}\">grants</a></li>",
            email = escape(&invite.email),
            issued = render_timestamp(invite.issued_at),
            expires = render_timestamp(invite.expires_at),
            sent = render_timestamp(invite.sent_at),
            id = escape(&invite.id),
        ));
    }

    let body = format!("<ul>{rows}</ul><p><a href=\"/invite\">Issue an invite</a></p>");
    Ok(page("Invites", &body))
}

/// `GET /invite`: the issue form.
pub async fn show_invite(CurrentIdentity(_identity): CurrentIdentity) -> Html<String> {
    let body = "<form method=\"post\" action=\"/invite\">\
                <label>Email <input type=\"email\" name=\"email\"></label>\
                <button type=\"submit\">Issue invite</button>\
                </form>";
    page("Issue Invite", body)
}

/// Form fields for issuing an invite.
#[derive(Debug, Deserialize)]
pub struct InviteForm {
    pub email: String,
}

/// `POST /invite`: issue and return to the list.
pub async fn submit_invite(
    State(state): State<Arc<AppState>>,
    CurrentSession(ctx): CurrentSession,
    Form(form): Form<InviteForm>,
) -> Result<Response, GatewayError> {
    let idp = state.idp_client_for(&ctx);

    let ops = [CreateInvitesRequest { email: form.email }];
    let envelope = idp
        .create_invites(&ops)
        .await
        .map_err(GatewayError::backend_write)?;
    envelope
        .decode::<Vec<Invite>>(0)
        .map_err(GatewayError::backend_write)?;

    Ok(Redirect::to("/invites").into_response())
}

/// Query parameters for the send confirmation.
#[derive(Debug, Deserialize)]
pub struct InviteSendQuery {
    pub id: String,
}

/// `GET /invites/send`: confirmation form for mailing an invite.
pub async fn show_invites_send(
    State(state): State<Arc<AppState>>,
    CurrentSession(ctx): CurrentSession,
    Query(query): Query<InviteSendQuery>,
) -> Result<Html<String>, GatewayError> {
    let idp = state.idp_client_for(&ctx);

    let ops = [ReadInvitesRequest {
        id: Some(query.id.clone()),
    }];
    let envelope = idp
        .read_invites(&ops)
        .await
        .map_err(GatewayError::backend_read)?;
    let invites: Vec<Invite> = envelope.decode(0).map_err(GatewayError::backend_read)?;

    let Some(invite) = invites.into_iter().next() else {
        return Ok(page("Send Invite", "<p>No such invite.</p>"));
    };

    let body = format!(
        "<p>Send invite to {email}?</p>\
         <form method=\"post\" action=\"/invites/send\">\
         <input type=\"hidden\" name=\"id\" value=\"{id}\">\
         <button type=\"submit\">Send</button>\
         </form>",
        email = escape(&invite.email),
        id = escape(&invite.id),
    );
    Ok(page("Send Invite", &body))
}

/// Form fields for the send submission.
#[derive(Debug, Deserialize)]
pub struct InviteSendForm {
    pub id: String,
}

/// `POST /invites/send`: mail the invite and return to the list.
pub async fn submit_invites_send(
    State(state): State<Arc<AppState>>,
    CurrentSession(ctx): CurrentSession,
    Form(form): Form<InviteSendForm>,
) -> Result<Response, GatewayError> {
    let idp = state.idp_client_for(&ctx);

    let ops = [SendInvitesRequest { id: form.id }];
    idp.send_invites(&ops)
        .await
        .map_err(GatewayError::backend_write)?;

    Ok(Redirect::to("/invites").into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_timestamp_renders_as_na() {
        assert_eq!(render_timestamp(0), "n/a");
        assert_eq!(render_timestamp(-5), "n/a");
    }

    #[test]
    fn timestamp_renders_human_readable() {
        assert_eq!(render_timestamp(1700000000), "2023-11-14 22:13:20");
    }
}
