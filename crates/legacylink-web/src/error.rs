//! Error types and axum `IntoResponse` implementation.
//!
//! JSON endpoints render an [`Error`] directly. Page endpoints go through
//! [`PageResult::or_error_page`], which redirects anonymous visitors to a
//! login page and renders everything else as an HTML error page.

use axum::{
  Json,
  http::StatusCode,
  response::{Html, IntoResponse, Redirect, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::render::{Page, RenderError, Renderer};

#[derive(Debug, Error)]
pub enum Error {
  #[error("unauthorized")]
  Unauthenticated,
  #[error("forbidden")]
  Forbidden,
  #[error("{0}")]
  Validation(String),
  #[error("{0}")]
  NotFound(String),
  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
  #[error("render error: {0}")]
  Render(#[from] RenderError),
  #[error("assistant error: {0}")]
  Chat(#[from] legacylink_chat::Error),
  #[error("internal error: {0}")]
  Internal(String),
}

impl Error {
  pub fn store<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Error::Store(Box::new(e))
  }

  pub fn status(&self) -> StatusCode {
    match self {
      Error::Unauthenticated => StatusCode::UNAUTHORIZED,
      Error::Forbidden => StatusCode::FORBIDDEN,
      Error::Validation(_) => StatusCode::BAD_REQUEST,
      Error::NotFound(_) => StatusCode::NOT_FOUND,
      Error::Chat(_) => StatusCode::BAD_GATEWAY,
      Error::Store(_) | Error::Render(_) | Error::Internal(_) => {
        StatusCode::INTERNAL_SERVER_ERROR
      }
    }
  }

  pub fn code(&self) -> &'static str {
    match self {
      Error::Unauthenticated => "unauthorized",
      Error::Forbidden => "forbidden",
      Error::Validation(_) => "invalid_request",
      Error::NotFound(_) => "not_found",
      Error::Chat(_) => "upstream_unavailable",
      Error::Store(_) | Error::Render(_) | Error::Internal(_) => "internal_error",
    }
  }

  /// Text safe to show to the caller. Internal causes are never echoed.
  pub fn public_message(&self) -> Option<String> {
    match self {
      Error::Validation(m) | Error::NotFound(m) => Some(m.clone()),
      _ => None,
    }
  }

  fn log(&self) {
    match self {
      Error::Store(_) | Error::Render(_) | Error::Internal(_) => {
        tracing::error!(error = %self, "request failed");
      }
      Error::Chat(_) => tracing::error!(error = %self, "assistant upstream failed"),
      Error::Forbidden => tracing::warn!("mutation denied"),
      _ => {}
    }
  }
}

impl From<legacylink_core::Error> for Error {
  fn from(e: legacylink_core::Error) -> Self {
    use legacylink_core::Error as Core;
    match e {
      Core::AuthenticationRequired => Error::Unauthenticated,
      Core::Forbidden => Error::Forbidden,
      Core::Validation(m) => Error::Validation(m),
      Core::NotFound(what) => Error::NotFound(format!("{what} not found")),
      other @ (Core::NoDirectory(_) | Core::UnknownRole(_)) => Error::store(other),
    }
  }
}

impl IntoResponse for Error {
  fn into_response(self) -> Response {
    self.log();
    let mut body = json!({ "success": false, "error": self.code() });
    if let Some(message) = self.public_message() {
      body["message"] = json!(message);
    }
    (self.status(), Json(body)).into_response()
  }
}

// ─── Page failures ───────────────────────────────────────────────────────────

pub(crate) trait PageResult {
  fn or_error_page(self, renderer: &dyn Renderer, login_path: &str) -> Response;

  /// For form posts that redirect on success: anonymous callers get the
  /// JSON 401, every other failure the error page.
  fn or_form_error(self, renderer: &dyn Renderer) -> Response;
}

impl PageResult for Result<Response, Error> {
  fn or_error_page(self, renderer: &dyn Renderer, login_path: &str) -> Response {
    match self {
      Ok(r) => r,
      Err(Error::Unauthenticated) => Redirect::to(login_path).into_response(),
      Err(e) => error_page(renderer, e),
    }
  }

  fn or_form_error(self, renderer: &dyn Renderer) -> Response {
    match self {
      Ok(r) => r,
      Err(e @ Error::Unauthenticated) => e.into_response(),
      Err(e) => error_page(renderer, e),
    }
  }
}

pub(crate) fn error_page(renderer: &dyn Renderer, err: Error) -> Response {
  err.log();
  let status = err.status();
  let message = err.public_message().unwrap_or_else(|| {
    status.canonical_reason().unwrap_or("Error").to_string()
  });
  let data = json!({ "error": message, "status": status.as_u16() });

  match renderer.render(Page::Error, &data) {
    Ok(html) => (status, Html(html)).into_response(),
    Err(e) => {
      tracing::error!(error = %e, "failed to render error page");
      (status, message).into_response()
    }
  }
}
