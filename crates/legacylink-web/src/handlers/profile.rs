//! The member's own profile: view, change password, edit alumni details.

use axum::{
  Form,
  extract::State,
  http::StatusCode,
  response::Response,
};
use legacylink_core::{
  account::AlumniProfileUpdate,
  authz::authorize_password_change,
  principal::{Principal, Role},
  store::CampusStore,
};
use serde::Deserialize;
use serde_json::json;

use crate::{
  AppState, auth,
  error::{Error, PageResult as _},
  handlers::render_page,
  render::Page,
  session::CurrentSession,
};

/// Re-read the principal's row and render the profile page.
async fn render_profile<S>(
  state:     &AppState<S>,
  principal: &Principal,
  status:    StatusCode,
  message:   Option<(&str, &str)>,
) -> Result<Response, Error>
where
  S: CampusStore + Clone + 'static,
{
  let directory = principal.role().directory()?;
  let profile = state
    .store
    .find_member(directory, principal.key())
    .await
    .map_err(Error::store)?
    .ok_or_else(|| Error::NotFound("Profile not found".into()))?;

  let mut data = json!({ "user": profile });
  if let Some((kind, text)) = message {
    data[kind] = json!(text);
  }
  render_page(state, status, Page::Profile, &data)
}

/// `GET /profile`
pub async fn show<S>(
  State(state): State<AppState<S>>,
  session: CurrentSession,
) -> Response
where
  S: CampusStore + Clone + 'static,
{
  let result = async {
    let principal = session.require_member()?;
    render_profile(&state, principal, StatusCode::OK, None).await
  }
  .await;
  result.or_error_page(&*state.renderer, "/")
}

// ─── Password ────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordForm {
  #[serde(default)]
  pub current_password: String,
  #[serde(default)]
  pub new_password:     String,
  #[serde(default)]
  pub confirm_password: String,
}

/// `POST /update-password`
pub async fn update_password<S>(
  State(state): State<AppState<S>>,
  session: CurrentSession,
  Form(form): Form<PasswordForm>,
) -> Response
where
  S: CampusStore + Clone + 'static,
{
  let result = async {
    let principal = session.require_member()?;
    let directory = principal.role().directory()?;

    let stored = state
      .store
      .member_password_hash(directory, principal.key())
      .await
      .map_err(Error::store)?;
    let verified = stored
      .as_deref()
      .is_some_and(|phc| auth::verify_password(&form.current_password, phc));

    if let Err(e) =
      authorize_password_change(verified, &form.new_password, &form.confirm_password)
    {
      let message = e.to_string();
      return render_profile(
        &state,
        principal,
        StatusCode::BAD_REQUEST,
        Some(("error", message.as_str())),
      )
      .await;
    }

    let hash = auth::hash_password(&form.new_password)?;
    state
      .store
      .set_member_password(directory, principal.key(), hash)
      .await
      .map_err(Error::store)?;
    tracing::info!(key = principal.key(), "password changed");

    render_profile(
      &state,
      principal,
      StatusCode::OK,
      Some(("success", "Password updated successfully")),
    )
    .await
  }
  .await;
  result.or_error_page(&*state.renderer, "/")
}

// ─── Alumni details ──────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileForm {
  #[serde(default)]
  pub current_position: String,
  #[serde(default)]
  pub company:          String,
  #[serde(default)]
  pub location:         String,
  #[serde(default)]
  pub email:            String,
}

/// `POST /update-profile`
pub async fn update_profile<S>(
  State(state): State<AppState<S>>,
  session: CurrentSession,
  Form(form): Form<ProfileForm>,
) -> Response
where
  S: CampusStore + Clone + 'static,
{
  let result = async {
    let principal = session.require_role(Role::Alumni)?;

    let changed = state
      .store
      .update_alumni_profile(principal.key(), AlumniProfileUpdate {
        current_position: form.current_position.trim().to_owned(),
        company:          form.company.trim().to_owned(),
        location:         form.location.trim().to_owned(),
        email:            form.email.trim().to_owned(),
      })
      .await
      .map_err(Error::store)?;
    if !changed {
      return Err(Error::NotFound("Profile not found".into()));
    }

    render_profile(
      &state,
      principal,
      StatusCode::OK,
      Some(("success", "Profile updated successfully")),
    )
    .await
  }
  .await;
  result.or_error_page(&*state.renderer, "/")
}
