//! Landing page, the three login forms and logout.

use axum::{
  Form,
  extract::State,
  http::{StatusCode, header},
  response::{IntoResponse, Redirect, Response},
};
use legacylink_core::{
  principal::{Directory, Principal, Role},
  store::CampusStore,
};
use serde::Deserialize;
use serde_json::json;

use crate::{
  AppState, auth,
  error::{Error, PageResult as _},
  handlers::render_page,
  render::Page,
  session::{CurrentSession, clear_session_cookie, session_cookie},
};

/// Member forms post the PRN in `username`; `prn` is accepted too.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
  #[serde(default, alias = "prn")]
  pub username: String,
  #[serde(default)]
  pub password: String,
}

fn login_page(role: Role) -> Page {
  match role {
    Role::Student => Page::StudentLogin,
    Role::Alumni => Page::AlumniLogin,
    Role::Admin => Page::AdminLogin,
  }
}

fn rejection_message(role: Role) -> &'static str {
  match role {
    Role::Admin => "Invalid username or password.",
    Role::Student | Role::Alumni => "Invalid PRN or password.",
  }
}

// ─── Pages ───────────────────────────────────────────────────────────────────

/// `GET /`
pub async fn main_page<S>(State(state): State<AppState<S>>) -> Response
where
  S: CampusStore + Clone + 'static,
{
  render_page(&state, StatusCode::OK, Page::Main, &json!({ "error": null }))
    .or_error_page(&*state.renderer, "/")
}

async fn show_login<S>(state: &AppState<S>, role: Role) -> Response
where
  S: CampusStore + Clone + 'static,
{
  render_page(state, StatusCode::OK, login_page(role), &json!({ "error": null }))
    .or_error_page(&*state.renderer, "/")
}

/// `GET /student_login`
pub async fn student_login_page<S>(State(state): State<AppState<S>>) -> Response
where
  S: CampusStore + Clone + 'static,
{
  show_login(&state, Role::Student).await
}

/// `GET /alumni_login`
pub async fn alumni_login_page<S>(State(state): State<AppState<S>>) -> Response
where
  S: CampusStore + Clone + 'static,
{
  show_login(&state, Role::Alumni).await
}

/// `GET /admin_login`
pub async fn admin_login_page<S>(State(state): State<AppState<S>>) -> Response
where
  S: CampusStore + Clone + 'static,
{
  show_login(&state, Role::Admin).await
}

// ─── Login ───────────────────────────────────────────────────────────────────

/// Bind the principal to a fresh session, or re-render the form.
async fn finish_login<S>(
  state:     &AppState<S>,
  session:   &CurrentSession,
  role:      Role,
  username:  &str,
  principal: Option<Principal>,
) -> Result<Response, Error>
where
  S: CampusStore + Clone + 'static,
{
  let Some(principal) = principal else {
    tracing::warn!(%role, username, "rejected login");
    return render_page(
      state,
      StatusCode::UNAUTHORIZED,
      login_page(role),
      &json!({ "error": rejection_message(role) }),
    );
  };

  tracing::info!(%role, key = principal.key(), "login");
  let token = state
    .sessions
    .establish(principal, session.token.as_deref())
    .await;
  let cookie = session_cookie(&token, state.config.secure_cookies);
  Ok(([(header::SET_COOKIE, cookie)], Redirect::to(role.home_path())).into_response())
}

async fn member_login<S>(
  state:     &AppState<S>,
  session:   &CurrentSession,
  directory: Directory,
  form:      LoginForm,
) -> Response
where
  S: CampusStore + Clone + 'static,
{
  let role = directory.role();
  let username = form.username.trim();

  let result = async {
    let principal =
      auth::authenticate_member(&*state.store, directory, username, &form.password).await?;
    finish_login(state, session, role, username, principal).await
  }
  .await;
  result.or_error_page(&*state.renderer, role.login_path())
}

/// `POST /student_login`
pub async fn student_login<S>(
  State(state): State<AppState<S>>,
  session: CurrentSession,
  Form(form): Form<LoginForm>,
) -> Response
where
  S: CampusStore + Clone + 'static,
{
  member_login(&state, &session, Directory::Students, form).await
}

/// `POST /alumni_login`
pub async fn alumni_login<S>(
  State(state): State<AppState<S>>,
  session: CurrentSession,
  Form(form): Form<LoginForm>,
) -> Response
where
  S: CampusStore + Clone + 'static,
{
  member_login(&state, &session, Directory::Alumni, form).await
}

/// `POST /admin_login`
pub async fn admin_login<S>(
  State(state): State<AppState<S>>,
  session: CurrentSession,
  Form(form): Form<LoginForm>,
) -> Response
where
  S: CampusStore + Clone + 'static,
{
  let username = form.username.trim();

  let result = async {
    let principal =
      auth::authenticate_admin(&*state.store, username, &form.password).await?;
    finish_login(&state, &session, Role::Admin, username, principal).await
  }
  .await;
  result.or_error_page(&*state.renderer, Role::Admin.login_path())
}

// ─── Logout ──────────────────────────────────────────────────────────────────

/// `POST /logout`
pub async fn logout<S>(
  State(state): State<AppState<S>>,
  session: CurrentSession,
) -> Response
where
  S: CampusStore + Clone + 'static,
{
  if let Some(token) = &session.token
    && state.sessions.destroy(token).await
  {
    tracing::info!("logout");
  }
  let cookie = clear_session_cookie(state.config.secure_cookies);
  ([(header::SET_COOKIE, cookie)], Redirect::to("/")).into_response()
}
