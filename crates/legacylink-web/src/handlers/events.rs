//! Events and registrations. Only students and alumni organise or attend.

use axum::{
  Form, Json,
  extract::{Path, State, rejection::PathRejection},
  response::{IntoResponse, Redirect, Response},
};
use legacylink_core::{
  authz::authorize_owner,
  event::{NewEvent, Registration, parse_event_date},
  principal::Principal,
  store::CampusStore,
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::{
  AppState,
  error::{Error, PageResult as _},
  handlers::{home::render_home, path_id, required},
  session::CurrentSession,
};

#[derive(Debug, Deserialize)]
pub struct EventForm {
  #[serde(default)]
  pub title:       String,
  #[serde(default)]
  pub description: String,
  #[serde(default)]
  pub event_date:  String,
  #[serde(default)]
  pub location:    String,
}

#[derive(Debug, Serialize)]
pub struct RegistrationBody {
  pub success:      bool,
  #[serde(flatten)]
  pub registration: Registration,
}

fn new_event(principal: &Principal, form: &EventForm) -> Result<NewEvent, Error> {
  let title = required("Title", &form.title)?;
  let description = required("Description", &form.description)?;
  let location = required("Location", &form.location)?;
  let event_date = parse_event_date(&required("Event date", &form.event_date)?)?;

  Ok(NewEvent {
    title,
    description,
    event_date,
    location,
    organizer: principal.owner(),
    organizer_name: principal.display_name().to_owned(),
    organizer_batch_year: principal.batch_year().unwrap_or(0),
  })
}

/// `POST /create_event`
pub async fn create<S>(
  State(state): State<AppState<S>>,
  session: CurrentSession,
  Form(form): Form<EventForm>,
) -> Response
where
  S: CampusStore + Clone + 'static,
{
  let result = async {
    let principal = session.require_member()?;
    let input = match new_event(principal, &form) {
      Ok(input) => input,
      Err(e @ Error::Validation(_)) => {
        let extra = json!({
          "error": e.to_string(),
          "eventForm": {
            "title": &form.title,
            "description": &form.description,
            "event_date": &form.event_date,
            "location": &form.location,
          },
        });
        return render_home(&state, principal, e.status(), extra).await;
      }
      Err(e) => return Err(e),
    };

    let event = state.store.create_event(input).await.map_err(Error::store)?;
    tracing::debug!(event_id = event.id, "event created");
    Ok(Redirect::to(principal.role().home_path()).into_response())
  }
  .await;
  result.or_form_error(&*state.renderer)
}

/// `DELETE /event/{id}`
pub async fn delete<S>(
  State(state): State<AppState<S>>,
  session: CurrentSession,
  id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Value>, Error>
where
  S: CampusStore + Clone + 'static,
{
  let principal = session.require()?;
  let id = path_id(id, "event")?;
  let owner = state.store.event_owner(id).await.map_err(Error::store)?;
  authorize_owner(principal, owner.as_ref())?;

  state.store.delete_event(id).await.map_err(Error::store)?;
  tracing::info!(event_id = id, key = principal.key(), "event deleted");
  Ok(Json(json!({ "success": true })))
}

async fn ensure_event<S>(state: &AppState<S>, id: i64) -> Result<(), Error>
where
  S: CampusStore + Clone + 'static,
{
  match state.store.event_owner(id).await.map_err(Error::store)? {
    Some(_) => Ok(()),
    None => Err(Error::NotFound("Event not found".into())),
  }
}

/// `POST /event/{id}/register`
pub async fn register<S>(
  State(state): State<AppState<S>>,
  session: CurrentSession,
  id: Result<Path<i64>, PathRejection>,
) -> Result<Json<RegistrationBody>, Error>
where
  S: CampusStore + Clone + 'static,
{
  let principal = session.require_member()?;
  let id = path_id(id, "event")?;
  ensure_event(&state, id).await?;

  let registration = state
    .store
    .register(id, &principal.owner())
    .await
    .map_err(Error::store)?;
  Ok(Json(RegistrationBody { success: true, registration }))
}

/// `POST /event/{id}/unregister`
pub async fn unregister<S>(
  State(state): State<AppState<S>>,
  session: CurrentSession,
  id: Result<Path<i64>, PathRejection>,
) -> Result<Json<RegistrationBody>, Error>
where
  S: CampusStore + Clone + 'static,
{
  let principal = session.require_member()?;
  let id = path_id(id, "event")?;
  ensure_event(&state, id).await?;

  let registration = state
    .store
    .unregister(id, &principal.owner())
    .await
    .map_err(Error::store)?;
  Ok(Json(RegistrationBody { success: true, registration }))
}
