//! Role home pages.
//!
//! Member homes show the feed and the event list, both projected for the
//! viewer. The admin home shows roster counts and the latest posts.

use axum::{
  extract::State,
  http::StatusCode,
  response::{IntoResponse, Redirect, Response},
};
use legacylink_core::{
  principal::{Principal, Role},
  store::CampusStore,
};
use serde_json::{Value, json};

use crate::{
  AppState,
  error::{Error, PageResult as _},
  handlers::render_page,
  render::Page,
  session::CurrentSession,
};

/// Number of posts shown on the admin dashboard.
const DASHBOARD_RECENT_POSTS: usize = 10;

/// `GET /home`
pub async fn home(session: CurrentSession) -> Response {
  match &session.principal {
    Some(p) => Redirect::to(p.role().home_path()).into_response(),
    None => Redirect::to("/").into_response(),
  }
}

/// Render `principal`'s own home page. `extra` keys (an inline error, the
/// fields of a rejected form) are merged into the data bag.
pub(crate) async fn render_home<S>(
  state:     &AppState<S>,
  principal: &Principal,
  status:    StatusCode,
  extra:     Value,
) -> Result<Response, Error>
where
  S: CampusStore + Clone + 'static,
{
  let (page, mut data) = match principal.role() {
    Role::Admin => {
      let dashboard = state
        .store
        .dashboard(DASHBOARD_RECENT_POSTS)
        .await
        .map_err(Error::store)?;
      (Page::AdminHome, json!({
        "admin": principal,
        "studentCount": dashboard.student_count,
        "alumniCount": dashboard.alumni_count,
        "postCount": dashboard.post_count,
        "recentPosts": dashboard.recent_posts,
      }))
    }
    role @ (Role::Student | Role::Alumni) => {
      let viewer = principal.owner();
      let posts = state.store.feed(&viewer).await.map_err(Error::store)?;
      let events = state.store.events(&viewer).await.map_err(Error::store)?;
      (Page::Home, json!({
        "user": principal,
        "userType": role,
        "posts": posts,
        "events": events,
      }))
    }
  };

  if let (Value::Object(bag), Value::Object(extra)) = (&mut data, extra) {
    bag.extend(extra);
  }
  render_page(state, status, page, &data)
}

async fn member_home<S>(
  state:   &AppState<S>,
  session: &CurrentSession,
  role:    Role,
) -> Result<Response, Error>
where
  S: CampusStore + Clone + 'static,
{
  let principal = session.require_role(role)?;
  render_home(state, principal, StatusCode::OK, Value::Null).await
}

/// `GET /student_home`
pub async fn student_home<S>(
  State(state): State<AppState<S>>,
  session: CurrentSession,
) -> Response
where
  S: CampusStore + Clone + 'static,
{
  member_home(&state, &session, Role::Student)
    .await
    .or_error_page(&*state.renderer, Role::Student.login_path())
}

/// `GET /alumni_home`
pub async fn alumni_home<S>(
  State(state): State<AppState<S>>,
  session: CurrentSession,
) -> Response
where
  S: CampusStore + Clone + 'static,
{
  member_home(&state, &session, Role::Alumni)
    .await
    .or_error_page(&*state.renderer, Role::Alumni.login_path())
}

/// `GET /admin_home`
pub async fn admin_home<S>(
  State(state): State<AppState<S>>,
  session: CurrentSession,
) -> Response
where
  S: CampusStore + Clone + 'static,
{
  let result = async {
    let principal = session.require_admin()?;
    render_home(&state, principal, StatusCode::OK, Value::Null).await
  }
  .await;
  result.or_error_page(&*state.renderer, Role::Admin.login_path())
}
