//! HTTP layer for LegacyLink.
//!
//! Exposes an axum [`Router`] serving the pages and JSON endpoints of the
//! alumni network, backed by any [`CampusStore`].

pub mod auth;
pub mod error;
pub mod handlers;
pub mod render;
pub mod session;

pub use error::Error;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Router,
  routing::{delete, get, post},
};
use legacylink_chat::Assistant;
use legacylink_core::store::CampusStore;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use handlers::{admin, chat, events, home, login, posts, profile};
use render::{HtmlRenderer, Renderer};
use session::SessionStore;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `LEGACYLINK_*` environment variables. Every key has a default.
#[derive(Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
  pub host:                String,
  pub port:                u16,
  pub database_path:       PathBuf,
  pub session_ttl_minutes: i64,
  /// Add the `Secure` attribute to the session cookie.
  pub secure_cookies:      bool,
  /// Without a key the assistant answers from its FAQ table only.
  pub gemini_api_key:      Option<String>,
  pub gemini_model:        String,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:                "127.0.0.1".to_string(),
      port:                3000,
      database_path:       PathBuf::from("legacylink.db"),
      session_ttl_minutes: 120,
      secure_cookies:      false,
      gemini_api_key:      None,
      gemini_model:        legacylink_chat::gemini::DEFAULT_MODEL.to_string(),
    }
  }
}

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
#[derive(Clone)]
pub struct AppState<S: CampusStore> {
  pub store:     Arc<S>,
  pub config:    Arc<ServerConfig>,
  pub sessions:  Arc<SessionStore>,
  pub renderer:  Arc<dyn Renderer>,
  pub assistant: Arc<Assistant>,
}

impl<S: CampusStore> AppState<S> {
  /// State with an empty session table and the stock HTML renderer.
  pub fn new(store: S, config: ServerConfig, assistant: Assistant) -> Self {
    Self {
      store:     Arc::new(store),
      sessions:  Arc::new(SessionStore::with_ttl_minutes(config.session_ttl_minutes)),
      config:    Arc::new(config),
      renderer:  Arc::new(HtmlRenderer),
      assistant: Arc::new(assistant),
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the axum [`Router`] for the whole site.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: CampusStore + Clone + 'static,
{
  Router::new()
    // Landing and sessions
    .route("/",              get(login::main_page::<S>))
    .route("/student_login", get(login::student_login_page::<S>).post(login::student_login::<S>))
    .route("/alumni_login",  get(login::alumni_login_page::<S>).post(login::alumni_login::<S>))
    .route("/admin_login",   get(login::admin_login_page::<S>).post(login::admin_login::<S>))
    .route("/logout",        post(login::logout::<S>))
    // Homes
    .route("/home",          get(home::home))
    .route("/student_home",  get(home::student_home::<S>))
    .route("/alumni_home",   get(home::alumni_home::<S>))
    .route("/admin_home",    get(home::admin_home::<S>))
    // Posts
    .route("/create_post",          post(posts::create::<S>))
    .route("/delete_post/{id}",     delete(posts::delete::<S>))
    .route("/like_post/{id}",       post(posts::like::<S>))
    .route("/comment_post/{id}",    post(posts::comment::<S>))
    .route("/delete_comment/{id}",  post(posts::delete_comment::<S>))
    // Events
    .route("/create_event",         post(events::create::<S>))
    .route("/event/{id}",           delete(events::delete::<S>))
    .route("/event/{id}/register",  post(events::register::<S>))
    .route("/event/{id}/unregister", post(events::unregister::<S>))
    // Profile
    .route("/profile",         get(profile::show::<S>))
    .route("/update-password", post(profile::update_password::<S>))
    .route("/update-profile",  post(profile::update_profile::<S>))
    // Admin
    .route("/add_student",    get(admin::add_student_page::<S>).post(admin::add_student::<S>))
    .route("/add_alumni",     get(admin::add_alumni_page::<S>).post(admin::add_alumni::<S>))
    .route("/students_list",  get(admin::students_list::<S>))
    .route("/alumni_list",    get(admin::alumni_list::<S>))
    .route("/remove_student/{prn}", post(admin::remove_student::<S>))
    .route("/remove_alumni/{prn}",  post(admin::remove_alumni::<S>))
    .route("/import_students",           get(admin::import_page::<S>))
    .route("/import_students_to_alumni", post(admin::import_students::<S>))
    // Assistant
    .route("/chat", post(chat::handler::<S>))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

// ─── Integration tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;
  use std::sync::LazyLock;

  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
    response::Response,
  };
  use legacylink_core::account::{NewAdmin, NewAlumnus, NewStudent};
  use legacylink_store_sqlite::SqliteStore;
  use serde_json::Value;
  use tower::ServiceExt as _;

  use crate::auth::hash_password;

  /// Hashing is slow in debug builds; every seeded account shares one hash
  /// of the password `pw`.
  static PW_HASH: LazyLock<String> =
    LazyLock::new(|| hash_password("pw").expect("hash"));

  async fn make_state() -> AppState<SqliteStore> {
    let store = SqliteStore::open_in_memory().await.unwrap();
    store
      .add_student(NewStudent {
        prn:           "S1".into(),
        name:          "Alice".into(),
        email:         "alice@college.example".into(),
        password_hash: PW_HASH.clone(),
        department:    "Computer".into(),
        batch_year:    2025,
      })
      .await
      .unwrap();
    store
      .add_alumnus(NewAlumnus {
        prn:              "A1".into(),
        name:             "Bob".into(),
        email:            "bob@alumni.example".into(),
        password_hash:    PW_HASH.clone(),
        department:       "Mechanical".into(),
        batch_year:       2019,
        current_position: "Engineer".into(),
        company:          "Acme".into(),
        location:         "Pune".into(),
      })
      .await
      .unwrap();
    store
      .add_admin(NewAdmin {
        username:      "root".into(),
        name:          "Root".into(),
        password_hash: PW_HASH.clone(),
      })
      .await
      .unwrap();

    AppState::new(store, ServerConfig::default(), Assistant::faq_only())
  }

  async fn send(
    state:        AppState<SqliteStore>,
    method:       &str,
    uri:          &str,
    cookie:       Option<&str>,
    content_type: Option<&str>,
    body:         &str,
  ) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(c) = cookie {
      builder = builder.header(header::COOKIE, c);
    }
    if let Some(ct) = content_type {
      builder = builder.header(header::CONTENT_TYPE, ct);
    }
    let req = builder.body(Body::from(body.to_string())).unwrap();
    router(state).oneshot(req).await.unwrap()
  }

  async fn get(state: AppState<SqliteStore>, uri: &str, cookie: Option<&str>) -> Response {
    send(state, "GET", uri, cookie, None, "").await
  }

  async fn post_form(
    state:  AppState<SqliteStore>,
    uri:    &str,
    cookie: Option<&str>,
    body:   &str,
  ) -> Response {
    send(
      state,
      "POST",
      uri,
      cookie,
      Some("application/x-www-form-urlencoded"),
      body,
    )
    .await
  }

  async fn post_json(
    state:  AppState<SqliteStore>,
    uri:    &str,
    cookie: Option<&str>,
    body:   &str,
  ) -> Response {
    send(state, "POST", uri, cookie, Some("application/json"), body).await
  }

  /// `name=value` pair from the response's `Set-Cookie` header.
  fn session_cookie_of(resp: &Response) -> Option<String> {
    let raw = resp.headers().get(header::SET_COOKIE)?.to_str().ok()?;
    raw.split(';').next().map(str::to_string)
  }

  fn location(resp: &Response) -> &str {
    resp
      .headers()
      .get(header::LOCATION)
      .and_then(|v| v.to_str().ok())
      .unwrap_or("")
  }

  async fn login_as(state: &AppState<SqliteStore>, path: &str, user: &str) -> String {
    let resp =
      post_form(state.clone(), path, None, &format!("username={user}&password=pw")).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER, "login as {user} failed");
    session_cookie_of(&resp).expect("session cookie")
  }

  async fn alice(state: &AppState<SqliteStore>) -> String {
    login_as(state, "/student_login", "S1").await
  }

  async fn bob(state: &AppState<SqliteStore>) -> String {
    login_as(state, "/alumni_login", "A1").await
  }

  async fn root(state: &AppState<SqliteStore>) -> String {
    login_as(state, "/admin_login", "root").await
  }

  async fn body_text(resp: Response) -> String {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
  }

  async fn body_json(resp: Response) -> Value {
    serde_json::from_str(&body_text(resp).await).unwrap()
  }

  /// The JSON data bag embedded in a rendered page.
  async fn page_data(resp: Response) -> Value {
    let html = body_text(resp).await;
    let marker = "id=\"page-data\">";
    let start = html.find(marker).expect("page data") + marker.len();
    let end = html.rfind("</script>").expect("script end");
    serde_json::from_str(&html[start..end]).unwrap()
  }

  /// Alice posts; returns the new post's id.
  async fn alice_posts(state: &AppState<SqliteStore>, cookie: &str) -> i64 {
    let resp = post_form(
      state.clone(),
      "/create_post",
      Some(cookie),
      "title=Hello&content=First+post",
    )
    .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/student_home");

    let data = page_data(get(state.clone(), "/student_home", Some(cookie)).await).await;
    data["posts"][0]["id"].as_i64().unwrap()
  }

  // ── Pages and login ─────────────────────────────────────────────────────────

  #[tokio::test]
  async fn main_page_renders() {
    let state = make_state().await;
    let resp = get(state, "/", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let ct = resp.headers().get(header::CONTENT_TYPE).unwrap().to_str().unwrap();
    assert!(ct.starts_with("text/html"), "Content-Type: {ct}");
  }

  #[tokio::test]
  async fn student_login_binds_one_principal() {
    let state = make_state().await;
    let resp = post_form(state.clone(), "/student_login", None, "username=S1&password=pw").await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/student_home");
    let raw = resp.headers().get(header::SET_COOKIE).unwrap().to_str().unwrap();
    assert!(raw.contains("HttpOnly"), "Set-Cookie: {raw}");

    let cookie = session_cookie_of(&resp).unwrap();
    let resp = get(state.clone(), "/student_home", Some(&cookie)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let data = page_data(resp).await;
    assert_eq!(data["user"]["role"], "student");
    assert_eq!(data["user"]["prn"], "S1");
    assert_eq!(data["user"]["name"], "Alice");

    // The student session does not open the other homes.
    let resp = get(state, "/alumni_home", Some(&cookie)).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
  }

  #[tokio::test]
  async fn wrong_password_rerenders_the_form() {
    let state = make_state().await;
    let resp = post_form(state, "/student_login", None, "username=S1&password=nope").await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert!(resp.headers().get(header::SET_COOKIE).is_none());
    assert!(body_text(resp).await.contains("Invalid PRN or password."));
  }

  #[tokio::test]
  async fn students_cannot_use_the_alumni_form() {
    let state = make_state().await;
    let resp = post_form(state, "/alumni_login", None, "username=S1&password=pw").await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
  }

  #[tokio::test]
  async fn anonymous_page_requests_redirect() {
    let state = make_state().await;
    for (uri, target) in [
      ("/student_home", "/student_login"),
      ("/alumni_home", "/alumni_login"),
      ("/admin_home", "/admin_login"),
      ("/students_list", "/admin_login"),
      ("/home", "/"),
      ("/profile", "/"),
    ] {
      let resp = get(state.clone(), uri, None).await;
      assert_eq!(resp.status(), StatusCode::SEE_OTHER, "{uri}");
      assert_eq!(location(&resp), target, "{uri}");
    }
  }

  #[tokio::test]
  async fn anonymous_mutations_get_401() {
    let state = make_state().await;
    let resp = post_form(state.clone(), "/like_post/1", None, "").await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(resp).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "unauthorized");

    let resp = send(state.clone(), "DELETE", "/delete_post/1", None, None, "").await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let resp = post_form(state, "/create_post", None, "title=x&content=y").await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
  }

  #[tokio::test]
  async fn home_redirects_to_the_role_home() {
    let state = make_state().await;
    let cookie = bob(&state).await;
    let resp = get(state, "/home", Some(&cookie)).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/alumni_home");
  }

  #[tokio::test]
  async fn logout_ends_the_session() {
    let state = make_state().await;
    let cookie = alice(&state).await;

    let resp = post_form(state.clone(), "/logout", Some(&cookie), "").await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/");
    let raw = resp.headers().get(header::SET_COOKIE).unwrap().to_str().unwrap();
    assert!(raw.contains("Max-Age=0"));

    let resp = post_form(state, "/like_post/1", Some(&cookie), "").await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
  }

  #[tokio::test]
  async fn logging_in_again_replaces_the_session() {
    let state = make_state().await;
    let first = alice(&state).await;

    let resp = post_form(
      state.clone(),
      "/alumni_login",
      Some(&first),
      "username=A1&password=pw",
    )
    .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    let second = session_cookie_of(&resp).unwrap();
    assert_ne!(first, second);

    let resp = get(state.clone(), "/student_home", Some(&first)).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    let resp = get(state.clone(), "/alumni_home", Some(&second)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(state.sessions.len().await, 1);
  }

  // ── Posts ───────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn likes_are_counted_per_viewer() {
    let state = make_state().await;
    let alice = alice(&state).await;
    let bob = bob(&state).await;
    let post = alice_posts(&state, &alice).await;

    let resp = post_form(state.clone(), &format!("/like_post/{post}"), Some(&bob), "").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["userLiked"], true);
    assert_eq!(body["likeCount"], 1);

    let data = page_data(get(state.clone(), "/student_home", Some(&alice)).await).await;
    assert_eq!(data["posts"][0]["like_count"], 1);
    assert_eq!(data["posts"][0]["liked"], false);

    let data = page_data(get(state.clone(), "/alumni_home", Some(&bob)).await).await;
    assert_eq!(data["posts"][0]["liked"], true);

    // Second toggle restores the original state.
    let resp = post_form(state, &format!("/like_post/{post}"), Some(&bob), "").await;
    let body = body_json(resp).await;
    assert_eq!(body["userLiked"], false);
    assert_eq!(body["likeCount"], 0);
  }

  #[tokio::test]
  async fn liking_a_missing_post_is_404() {
    let state = make_state().await;
    let bob = bob(&state).await;
    let resp = post_form(state, "/like_post/999", Some(&bob), "").await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(resp).await["error"], "not_found");
  }

  #[tokio::test]
  async fn rejected_posts_rerender_home_with_the_form() {
    let state = make_state().await;
    let alice = alice(&state).await;
    let resp =
      post_form(state.clone(), "/create_post", Some(&alice), "title=+&content=body").await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let ct = resp.headers().get(header::CONTENT_TYPE).unwrap().to_str().unwrap();
    assert!(ct.starts_with("text/html"), "Content-Type: {ct}");

    let data = page_data(resp).await;
    assert_eq!(data["error"], "Title is required");
    assert_eq!(data["postForm"]["content"], "body");
    assert_eq!(data["user"]["prn"], "S1");
    assert!(data["posts"].as_array().unwrap().is_empty());
  }

  #[tokio::test]
  async fn malformed_ids_and_bodies_get_json_errors() {
    let state = make_state().await;

    // Anonymous callers hear about the session first.
    let resp = send(state.clone(), "DELETE", "/delete_post/abc", None, None, "").await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(resp).await["error"], "unauthorized");

    let bob = bob(&state).await;
    let resp = send(state.clone(), "DELETE", "/delete_post/abc", Some(&bob), None, "").await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let ct = resp.headers().get(header::CONTENT_TYPE).unwrap().to_str().unwrap();
    assert_eq!(ct, "application/json");
    let body = body_json(resp).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "invalid_request");
    assert_eq!(body["message"], "Invalid post ID");

    let resp = send(state.clone(), "DELETE", "/event/abc", Some(&bob), None, "").await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(resp).await["message"], "Invalid event ID");

    let resp = post_form(state.clone(), "/comment_post/1", Some(&bob), "comment=hi").await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(resp).await["error"], "invalid_request");

    let resp = post_json(state, "/chat", None, "not json").await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(resp).await["error"], "invalid_request");
  }

  #[tokio::test]
  async fn denial_looks_the_same_for_missing_and_foreign_posts() {
    let state = make_state().await;
    let alice = alice(&state).await;
    let bob = bob(&state).await;
    let post = alice_posts(&state, &alice).await;

    let foreign = send(
      state.clone(),
      "DELETE",
      &format!("/delete_post/{post}"),
      Some(&bob),
      None,
      "",
    )
    .await;
    let missing =
      send(state.clone(), "DELETE", "/delete_post/999", Some(&bob), None, "").await;

    assert_eq!(foreign.status(), StatusCode::FORBIDDEN);
    assert_eq!(missing.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_text(foreign).await, body_text(missing).await);

    // Still there.
    let data = page_data(get(state, "/student_home", Some(&alice)).await).await;
    assert_eq!(data["posts"].as_array().unwrap().len(), 1);
  }

  #[tokio::test]
  async fn deleting_a_post_removes_its_comments_and_likes() {
    let state = make_state().await;
    let alice = alice(&state).await;
    let bob = bob(&state).await;
    let post = alice_posts(&state, &alice).await;

    let resp = post_json(
      state.clone(),
      &format!("/comment_post/{post}"),
      Some(&bob),
      r#"{"comment":"  Congrats!  "}"#,
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let comment = body_json(resp).await;
    assert_eq!(comment["authorName"], "Bob");
    assert_eq!(comment["comment"], "Congrats!");
    let comment_id = comment["id"].as_i64().unwrap();

    post_form(state.clone(), &format!("/like_post/{post}"), Some(&bob), "").await;

    let resp = send(
      state.clone(),
      "DELETE",
      &format!("/delete_post/{post}"),
      Some(&alice),
      None,
      "",
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["success"], true);

    let data = page_data(get(state.clone(), "/alumni_home", Some(&bob)).await).await;
    assert!(data["posts"].as_array().unwrap().is_empty());

    // The comment went with the post.
    let resp = post_form(
      state,
      &format!("/delete_comment/{comment_id}"),
      Some(&bob),
      "",
    )
    .await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
  }

  #[tokio::test]
  async fn only_the_author_deletes_a_comment() {
    let state = make_state().await;
    let alice = alice(&state).await;
    let bob = bob(&state).await;
    let post = alice_posts(&state, &alice).await;

    let resp = post_json(
      state.clone(),
      &format!("/comment_post/{post}"),
      Some(&bob),
      r#"{"comment":"hi"}"#,
    )
    .await;
    let id = body_json(resp).await["id"].as_i64().unwrap();

    let foreign =
      post_form(state.clone(), &format!("/delete_comment/{id}"), Some(&alice), "").await;
    let missing = post_form(state.clone(), "/delete_comment/999", Some(&alice), "").await;
    assert_eq!(foreign.status(), StatusCode::FORBIDDEN);
    assert_eq!(missing.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_text(foreign).await, body_text(missing).await);

    let resp = post_form(state.clone(), &format!("/delete_comment/{id}"), Some(&bob), "").await;
    assert_eq!(resp.status(), StatusCode::OK);

    let data = page_data(get(state, "/student_home", Some(&alice)).await).await;
    assert_eq!(data["posts"][0]["comment_count"], 0);
  }

  #[tokio::test]
  async fn empty_comments_are_rejected() {
    let state = make_state().await;
    let alice = alice(&state).await;
    let post = alice_posts(&state, &alice).await;
    let resp = post_json(
      state,
      &format!("/comment_post/{post}"),
      Some(&alice),
      r#"{"comment":"   "}"#,
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(resp).await["message"], "Comment cannot be empty!");
  }

  // ── Events ──────────────────────────────────────────────────────────────────

  async fn bob_creates_event(state: &AppState<SqliteStore>, bob: &str) -> i64 {
    let resp = post_form(
      state.clone(),
      "/create_event",
      Some(bob),
      "title=Reunion&description=Annual+meetup&event_date=2030-01-05T18:00&location=Main+hall",
    )
    .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/alumni_home");

    let data = page_data(get(state.clone(), "/alumni_home", Some(bob)).await).await;
    assert_eq!(data["events"][0]["event_date"], "2030-01-05T18:00:00");
    data["events"][0]["id"].as_i64().unwrap()
  }

  #[tokio::test]
  async fn registration_is_idempotent() {
    let state = make_state().await;
    let alice = alice(&state).await;
    let bob = bob(&state).await;
    let event = bob_creates_event(&state, &bob).await;

    for _ in 0..2 {
      let resp = post_form(
        state.clone(),
        &format!("/event/{event}/register"),
        Some(&alice),
        "",
      )
      .await;
      assert_eq!(resp.status(), StatusCode::OK);
      let body = body_json(resp).await;
      assert_eq!(body["success"], true);
      assert_eq!(body["registration_count"], 1);
    }

    let data = page_data(get(state.clone(), "/student_home", Some(&alice)).await).await;
    assert_eq!(data["events"][0]["registered"], true);

    let resp = post_form(
      state,
      &format!("/event/{event}/unregister"),
      Some(&alice),
      "",
    )
    .await;
    let body = body_json(resp).await;
    assert_eq!(body["registered"], false);
    assert_eq!(body["registration_count"], 0);
  }

  #[tokio::test]
  async fn event_rules() {
    let state = make_state().await;
    let alice = alice(&state).await;
    let bob = bob(&state).await;
    let root = root(&state).await;
    let event = bob_creates_event(&state, &bob).await;

    // Admins neither organise nor attend.
    let resp = post_form(state.clone(), &format!("/event/{event}/register"), Some(&root), "").await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let resp = post_form(
      state.clone(),
      "/create_event",
      Some(&root),
      "title=x&description=y&event_date=2030-01-01&location=z",
    )
    .await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    // Bad dates and missing events.
    let resp = post_form(
      state.clone(),
      "/create_event",
      Some(&alice),
      "title=x&description=y&event_date=soon&location=z",
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let data = page_data(resp).await;
    assert!(data["error"].as_str().unwrap().contains("invalid event date"));
    assert_eq!(data["eventForm"]["event_date"], "soon");
    assert_eq!(data["eventForm"]["title"], "x");
    let resp = post_form(state.clone(), "/event/999/register", Some(&alice), "").await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // Only the organiser deletes; a foreign event and a missing one are
    // refused alike.
    let uri = format!("/event/{event}");
    let foreign = send(state.clone(), "DELETE", &uri, Some(&alice), None, "").await;
    let missing = send(state.clone(), "DELETE", "/event/999", Some(&alice), None, "").await;
    assert_eq!(foreign.status(), StatusCode::FORBIDDEN);
    assert_eq!(missing.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_text(foreign).await, body_text(missing).await);

    let resp = send(state.clone(), "DELETE", &uri, Some(&bob), None, "").await;
    assert_eq!(resp.status(), StatusCode::OK);

    let data = page_data(get(state, "/alumni_home", Some(&bob)).await).await;
    assert!(data["events"].as_array().unwrap().is_empty());
  }

  // ── Profile ─────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn password_change_rules() {
    let state = make_state().await;
    let alice = alice(&state).await;

    let resp = post_form(
      state.clone(),
      "/update-password",
      Some(&alice),
      "currentPassword=pw&newPassword=next&confirmPassword=other",
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(page_data(resp).await["error"], "New passwords do not match");

    let resp = post_form(
      state.clone(),
      "/update-password",
      Some(&alice),
      "currentPassword=wrong&newPassword=next&confirmPassword=next",
    )
    .await;
    assert_eq!(page_data(resp).await["error"], "Current password is incorrect");

    let resp = post_form(
      state.clone(),
      "/update-password",
      Some(&alice),
      "currentPassword=pw&newPassword=next&confirmPassword=next",
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(page_data(resp).await["success"], "Password updated successfully");

    let resp = post_form(state.clone(), "/student_login", None, "username=S1&password=pw").await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let resp = post_form(state, "/student_login", None, "username=S1&password=next").await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
  }

  #[tokio::test]
  async fn only_alumni_edit_profile_details() {
    let state = make_state().await;
    let alice = alice(&state).await;
    let bob = bob(&state).await;
    let form = "currentPosition=CTO&company=Initech&location=Mumbai&email=bob%40initech.example";

    let resp = post_form(state.clone(), "/update-profile", Some(&alice), form).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let resp = post_form(state.clone(), "/update-profile", Some(&bob), form).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let data = page_data(get(state, "/profile", Some(&bob)).await).await;
    assert_eq!(data["user"]["company"], "Initech");
    assert_eq!(data["user"]["email"], "bob@initech.example");
  }

  // ── Admin ───────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn admin_dashboard() {
    let state = make_state().await;
    let root = root(&state).await;
    let alice = alice(&state).await;
    alice_posts(&state, &alice).await;

    let resp = get(state.clone(), "/admin_home", Some(&root)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let data = page_data(resp).await;
    assert_eq!(data["studentCount"], 1);
    assert_eq!(data["alumniCount"], 1);
    assert_eq!(data["postCount"], 1);
    assert_eq!(data["recentPosts"][0]["title"], "Hello");

    let resp = get(state, "/admin_home", Some(&alice)).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
  }

  #[tokio::test]
  async fn admin_adds_and_removes_students() {
    let state = make_state().await;
    let root = root(&state).await;
    let form = "prn=S2&name=Carol&email=carol%40college.example&password=pw2\
                &department=Civil&batch_year=2026";

    let resp = post_form(state.clone(), "/add_student", Some(&root), form).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/admin_home");

    let resp = post_form(state.clone(), "/add_student", Some(&root), form).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let error = page_data(resp).await["error"].as_str().unwrap().to_string();
    assert!(error.contains("already exists"), "{error}");

    let resp = post_form(
      state.clone(),
      "/add_student",
      Some(&root),
      "prn=S3&name=Dan&email=d&password=pw&department=Civil&batch_year=soon",
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let data = page_data(get(state.clone(), "/students_list", Some(&root)).await).await;
    let prns: Vec<&str> = data["students"]
      .as_array()
      .unwrap()
      .iter()
      .map(|s| s["prn"].as_str().unwrap())
      .collect();
    assert_eq!(prns, vec!["S2", "S1"]);

    let resp = post_form(state.clone(), "/student_login", None, "username=S2&password=pw2").await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    let resp = post_form(state.clone(), "/remove_student/S2", Some(&root), "").await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/students_list");
    let resp = post_form(state, "/remove_student/S2", Some(&root), "").await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn import_moves_a_batch_into_the_alumni_roster() {
    let state = make_state().await;
    let root = root(&state).await;

    let resp = post_form(
      state.clone(),
      "/import_students_to_alumni",
      Some(&root),
      "batch_year=2025&current_position=Graduate&company=TBD&location=Pune",
    )
    .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    let data = page_data(get(state.clone(), "/alumni_list", Some(&root)).await).await;
    assert_eq!(data["alumni"].as_array().unwrap().len(), 2);

    // The imported student keeps their password.
    let resp = post_form(state.clone(), "/alumni_login", None, "username=S1&password=pw").await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    let resp = post_form(
      state,
      "/import_students_to_alumni",
      Some(&root),
      "batch_year=1999&current_position=x&company=x&location=x",
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(
      page_data(resp).await["error"],
      "No students found for the given batch year."
    );
  }

  // ── Assistant ───────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn chat_answers_from_the_faq() {
    let state = make_state().await;
    let resp = post_json(state, "/chat", None, r#"{"message":"Hello"}"#).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["reply"], "Hi! I'm LegacyLink Assistant. How can I help?");
    assert_eq!(body["source"], "faq");
  }

  #[tokio::test]
  async fn chat_errors() {
    let state = make_state().await;
    let resp = post_json(state.clone(), "/chat", None, r#"{"message":"  "}"#).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = post_json(state, "/chat", None, r#"{"message":"what is the fee?"}"#).await;
    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    let body = body_json(resp).await;
    assert_eq!(body["error"], "upstream_unavailable");
    assert!(body.get("message").is_none());
  }
}
