pub mod admin;
pub mod chat;
pub mod events;
pub mod home;
pub mod login;
pub mod posts;
pub mod profile;

use axum::{
  Json,
  extract::{
    Path,
    rejection::{JsonRejection, PathRejection},
  },
  http::StatusCode,
  response::{Html, IntoResponse, Response},
};
use legacylink_core::store::CampusStore;
use serde_json::Value;

use crate::{AppState, error::Error, render::Page};

/// Render `page` with `data` and the given status.
pub(crate) fn render_page<S>(
  state:  &AppState<S>,
  status: StatusCode,
  page:   Page,
  data:   &Value,
) -> Result<Response, Error>
where
  S: CampusStore + Clone + Send + Sync + 'static,
{
  let html = state.renderer.render(page, data)?;
  Ok((status, Html(html)).into_response())
}

/// Trim a form field; empty after trimming counts as missing.
pub(crate) fn required(field: &str, value: &str) -> Result<String, Error> {
  let value = value.trim();
  if value.is_empty() {
    return Err(Error::Validation(format!("{field} is required")));
  }
  Ok(value.to_owned())
}

pub(crate) fn parse_batch_year(value: &str) -> Result<i32, Error> {
  required("Batch year", value)?
    .parse()
    .map_err(|_| Error::Validation("Batch year must be a number".into()))
}

/// Numeric id from the URL. Framework rejection text is never echoed.
pub(crate) fn path_id(
  id:   Result<Path<i64>, PathRejection>,
  what: &str,
) -> Result<i64, Error> {
  id.map(|Path(id)| id)
    .map_err(|_| Error::Validation(format!("Invalid {what} ID")))
}

/// JSON request body; a missing content type or malformed body is a
/// validation error.
pub(crate) fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, Error> {
  body
    .map(|Json(body)| body)
    .map_err(|_| Error::Validation("Request body must be a JSON object".into()))
}
