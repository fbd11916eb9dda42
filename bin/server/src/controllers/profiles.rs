//! Profile pages: the landing page, profile editing, and the public
//! profile view.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use serde::Deserialize;
use std::sync::Arc;

use meui_idp::{Human, ReadHumansRequest, UpdateHumansRequest};

use crate::error::GatewayError;
use crate::gateway::{AppState, CurrentIdentity, CurrentSession};
use crate::views::{escape, page};

/// `GET /`: the authenticated user's profile.
pub async fn show_profile(CurrentIdentity(identity): CurrentIdentity) -> Html<String> {
    let body = format!(
        "<dl>\
         <dt>Id</dt><dd>{id}</dd>\
         <dt>Username</dt><dd>{username}</dd>\
         <dt>Name</dt><dd>{name}</dd>\
         <dt>Email</dt><dd>{email}</dd>\
         </dl>\
         <p><a href=\"/profile/edit\">Edit profile</a></p>",
        id = escape(&identity.id),
        username = escape(&identity.username),
        name = escape(&identity.name),
        email = escape(&identity.email),
    );
    page("Profile", &body)
}

/// `GET /profile/edit`: the edit form, prefilled.
pub async fn show_profile_edit(CurrentIdentity(identity): CurrentIdentity) -> Html<String> {
    let body = format!(
        "<form method=\"post\" action=\"/profile/edit\">\
         <label>Name <input type=\"text\" name=\"name\" value=\"{name}\"></label>\
         <label>Email <input type=\"email\" name=\"email\" value=\"{email}\"></label>\
         <button type=\"submit\">Save</button>\
         </form>",
        name = escape(&identity.name),
        email = escape(&identity.email),
    );
    page("Edit Profile", &body)
}

/// Form fields for the profile edit submission.
#[derive(Debug, Deserialize)]
pub struct ProfileEditForm {
    pub name: String,
    pub email: String,
}

/// `POST /profile/edit`: persist the edit and return to the profile.
pub async fn submit_profile_edit(
    State(state): State<Arc<AppState>>,
    CurrentSession(ctx): CurrentSession,
    CurrentIdentity(identity): CurrentIdentity,
    Form(form): Form<ProfileEditForm>,
) -> Result<Response, GatewayError> {
    let idp = state.idp_client_for(&ctx);

    let ops = [UpdateHumansRequest {
        id: identity.id,
        name: Some(form.name),
        email: Some(form.email),
    }];
    let envelope = idp
        .update_humans(&ops)
        .await
        .map_err(GatewayError::backend_write)?;
    envelope
        .decode::<Vec<Human>>(0)
        .map_err(GatewayError::backend_write)?;

    Ok(Redirect::to("/").into_response())
}

/// Query parameters for the public profile view.
#[derive(Debug, Deserialize)]
pub struct PublicProfileQuery {
    pub id: String,
}

/// `GET /profile/public` (public): a limited profile rendered for anyone,
/// fetched with the application's own credentials.
pub async fn show_public_profile(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PublicProfileQuery>,
) -> Result<Response, GatewayError> {
    let idp = state.idp_client_as_app().await?;

    let ops = [ReadHumansRequest::by_id(query.id)];
    let envelope = idp
        .read_humans(&ops)
        .await
        .map_err(GatewayError::backend_read)?;
    let humans: Vec<Human> = envelope.decode(0).map_err(GatewayError::backend_read)?;

    let Some(human) = humans.into_iter().next() else {
        return Ok((StatusCode::NOT_FOUND, page("Profile", "<p>No such profile.</p>"))
            .into_response());
    };

    let body = format!("<p>{}</p>", escape(&human.name));
    Ok(page("Profile", &body).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_edit_form_deserializes() {
        let form: ProfileEditForm =
            serde_json::from_str(r#"{"name": "Alice", "email": "alice@example.com"}"#)
                .expect("deserialize");
        assert_eq!(form.name, "Alice");
        assert_eq!(form.email, "alice@example.com");
    }
}
