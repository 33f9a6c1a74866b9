//! Roster administration: add, list, remove and batch import.
//!
//! Every route here requires an admin session; anonymous visitors are sent
//! to `/admin_login`.

use axum::{
  Form,
  extract::{Path, State},
  http::StatusCode,
  response::{IntoResponse, Redirect, Response},
};
use legacylink_core::{
  account::{ImportBatch, NewAlumnus, NewStudent},
  principal::{Directory, Role},
  store::CampusStore,
};
use serde::Deserialize;
use serde_json::json;

use crate::{
  AppState, auth,
  error::{Error, PageResult as _},
  handlers::{parse_batch_year, render_page, required},
  render::Page,
  session::CurrentSession,
};

fn login() -> &'static str { Role::Admin.login_path() }

/// Run a form submission; validation and duplicate errors re-render `page`
/// with the message inline.
async fn submit_form<S, F>(state: &AppState<S>, page: Page, work: F) -> Response
where
  S: CampusStore + Clone + 'static,
  F: Future<Output = Result<Response, Error>>,
{
  match work.await {
    Err(e @ (Error::Validation(_) | Error::NotFound(_))) => {
      let status = e.status();
      render_page(state, status, page, &json!({ "error": e.to_string() }))
        .or_error_page(&*state.renderer, login())
    }
    other => other.or_error_page(&*state.renderer, login()),
  }
}

async fn show_form<S>(state: &AppState<S>, session: &CurrentSession, page: Page) -> Response
where
  S: CampusStore + Clone + 'static,
{
  session
    .require_admin()
    .and_then(|_| render_page(state, StatusCode::OK, page, &json!({ "error": null })))
    .or_error_page(&*state.renderer, login())
}

/// Reject a PRN that already exists in `directory`.
async fn ensure_new_member<S>(
  state: &AppState<S>,
  directory: Directory,
  prn: &str,
) -> Result<(), Error>
where
  S: CampusStore + Clone + 'static,
{
  let existing = state
    .store
    .find_member(directory, prn)
    .await
    .map_err(Error::store)?;
  if existing.is_some() {
    return Err(Error::Validation(format!(
      "PRN {prn} already exists in the {} roster",
      directory.role()
    )));
  }
  Ok(())
}

// ─── Students ────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct StudentForm {
  #[serde(default)]
  pub prn:        String,
  #[serde(default)]
  pub name:       String,
  #[serde(default)]
  pub email:      String,
  #[serde(default)]
  pub password:   String,
  #[serde(default)]
  pub department: String,
  #[serde(default)]
  pub batch_year: String,
}

/// `GET /add_student`
pub async fn add_student_page<S>(
  State(state): State<AppState<S>>,
  session: CurrentSession,
) -> Response
where
  S: CampusStore + Clone + 'static,
{
  show_form(&state, &session, Page::AddStudent).await
}

/// `POST /add_student`
pub async fn add_student<S>(
  State(state): State<AppState<S>>,
  session: CurrentSession,
  Form(form): Form<StudentForm>,
) -> Response
where
  S: CampusStore + Clone + 'static,
{
  submit_form(&state, Page::AddStudent, async {
    session.require_admin()?;
    let prn = required("PRN", &form.prn)?;
    let name = required("Name", &form.name)?;
    let email = required("Email", &form.email)?;
    let department = required("Department", &form.department)?;
    let batch_year = parse_batch_year(&form.batch_year)?;
    if form.password.is_empty() {
      return Err(Error::Validation("Password is required".into()));
    }
    ensure_new_member(&state, Directory::Students, &prn).await?;

    state
      .store
      .add_student(NewStudent {
        prn,
        name,
        email,
        password_hash: auth::hash_password(&form.password)?,
        department,
        batch_year,
      })
      .await
      .map_err(Error::store)?;
    tracing::info!(prn = form.prn.trim(), "student added");
    Ok(Redirect::to("/admin_home").into_response())
  })
  .await
}

// ─── Alumni ──────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AlumnusForm {
  #[serde(default)]
  pub prn:              String,
  #[serde(default)]
  pub name:             String,
  #[serde(default)]
  pub email:            String,
  #[serde(default)]
  pub password:         String,
  #[serde(default)]
  pub department:       String,
  #[serde(default)]
  pub batch_year:       String,
  #[serde(default)]
  pub current_position: String,
  #[serde(default)]
  pub company:          String,
  #[serde(default)]
  pub location:         String,
}

/// `GET /add_alumni`
pub async fn add_alumni_page<S>(
  State(state): State<AppState<S>>,
  session: CurrentSession,
) -> Response
where
  S: CampusStore + Clone + 'static,
{
  show_form(&state, &session, Page::AddAlumni).await
}

/// `POST /add_alumni`
pub async fn add_alumni<S>(
  State(state): State<AppState<S>>,
  session: CurrentSession,
  Form(form): Form<AlumnusForm>,
) -> Response
where
  S: CampusStore + Clone + 'static,
{
  submit_form(&state, Page::AddAlumni, async {
    session.require_admin()?;
    let prn = required("PRN", &form.prn)?;
    let name = required("Name", &form.name)?;
    let email = required("Email", &form.email)?;
    let department = required("Department", &form.department)?;
    let batch_year = parse_batch_year(&form.batch_year)?;
    let current_position = required("Current position", &form.current_position)?;
    let company = required("Company", &form.company)?;
    let location = required("Location", &form.location)?;
    if form.password.is_empty() {
      return Err(Error::Validation("Password is required".into()));
    }
    ensure_new_member(&state, Directory::Alumni, &prn).await?;

    state
      .store
      .add_alumnus(NewAlumnus {
        prn,
        name,
        email,
        password_hash: auth::hash_password(&form.password)?,
        department,
        batch_year,
        current_position,
        company,
        location,
      })
      .await
      .map_err(Error::store)?;
    tracing::info!(prn = form.prn.trim(), "alumnus added");
    Ok(Redirect::to("/admin_home").into_response())
  })
  .await
}

// ─── Lists ───────────────────────────────────────────────────────────────────

/// `GET /students_list`
pub async fn students_list<S>(
  State(state): State<AppState<S>>,
  session: CurrentSession,
) -> Response
where
  S: CampusStore + Clone + 'static,
{
  let result = async {
    session.require_admin()?;
    let students = state.store.list_students().await.map_err(Error::store)?;
    render_page(&state, StatusCode::OK, Page::StudentsList, &json!({ "students": students }))
  }
  .await;
  result.or_error_page(&*state.renderer, login())
}

/// `GET /alumni_list`
pub async fn alumni_list<S>(
  State(state): State<AppState<S>>,
  session: CurrentSession,
) -> Response
where
  S: CampusStore + Clone + 'static,
{
  let result = async {
    session.require_admin()?;
    let alumni = state.store.list_alumni().await.map_err(Error::store)?;
    render_page(&state, StatusCode::OK, Page::AlumniList, &json!({ "alumni": alumni }))
  }
  .await;
  result.or_error_page(&*state.renderer, login())
}

// ─── Removal ─────────────────────────────────────────────────────────────────

async fn remove_member<S>(
  state: &AppState<S>,
  session: &CurrentSession,
  directory: Directory,
  prn: &str,
) -> Response
where
  S: CampusStore + Clone + 'static,
{
  let result = async {
    session.require_admin()?;
    let removed = state
      .store
      .remove_member(directory, prn)
      .await
      .map_err(Error::store)?;
    if !removed {
      return Err(Error::NotFound(format!("No {} with PRN {prn}", directory.role())));
    }

    tracing::info!(%prn, directory = ?directory, "member removed");
    let list = match directory {
      Directory::Students => "/students_list",
      Directory::Alumni => "/alumni_list",
    };
    Ok(Redirect::to(list).into_response())
  }
  .await;
  result.or_error_page(&*state.renderer, login())
}

/// `POST /remove_student/{prn}`
pub async fn remove_student<S>(
  State(state): State<AppState<S>>,
  session: CurrentSession,
  Path(prn): Path<String>,
) -> Response
where
  S: CampusStore + Clone + 'static,
{
  remove_member(&state, &session, Directory::Students, &prn).await
}

/// `POST /remove_alumni/{prn}`
pub async fn remove_alumni<S>(
  State(state): State<AppState<S>>,
  session: CurrentSession,
  Path(prn): Path<String>,
) -> Response
where
  S: CampusStore + Clone + 'static,
{
  remove_member(&state, &session, Directory::Alumni, &prn).await
}

// ─── Import ──────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ImportForm {
  #[serde(default)]
  pub batch_year:       String,
  #[serde(default)]
  pub current_position: String,
  #[serde(default)]
  pub company:          String,
  #[serde(default)]
  pub location:         String,
}

/// `GET /import_students`
pub async fn import_page<S>(
  State(state): State<AppState<S>>,
  session: CurrentSession,
) -> Response
where
  S: CampusStore + Clone + 'static,
{
  show_form(&state, &session, Page::Import).await
}

/// `POST /import_students_to_alumni`
pub async fn import_students<S>(
  State(state): State<AppState<S>>,
  session: CurrentSession,
  Form(form): Form<ImportForm>,
) -> Response
where
  S: CampusStore + Clone + 'static,
{
  submit_form(&state, Page::Import, async {
    session.require_admin()?;
    let batch = ImportBatch {
      batch_year:       parse_batch_year(&form.batch_year)?,
      current_position: required("Current position", &form.current_position)?,
      company:          required("Company", &form.company)?,
      location:         required("Location", &form.location)?,
    };
    let batch_year = batch.batch_year;

    let report = state
      .store
      .import_students_to_alumni(batch)
      .await
      .map_err(Error::store)?;
    if report.matched == 0 {
      return Err(Error::NotFound(
        "No students found for the given batch year.".into(),
      ));
    }

    tracing::info!(
      batch_year,
      imported = report.imported,
      skipped = report.skipped,
      "students imported to alumni"
    );
    Ok(Redirect::to("/admin_home").into_response())
  })
  .await
}

