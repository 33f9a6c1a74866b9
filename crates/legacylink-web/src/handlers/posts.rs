//! Posts, likes and comments.
//!
//! | Method   | Path                    | Response |
//! |----------|-------------------------|----------|
//! | `POST`   | `/create_post`          | redirect to the author's home |
//! | `DELETE` | `/delete_post/{id}`     | `{"success":true}` |
//! | `POST`   | `/like_post/{id}`       | `{"userLiked":..,"likeCount":..}` |
//! | `POST`   | `/comment_post/{id}`    | `{"id":..,"authorName":..,"comment":..}` |
//! | `POST`   | `/delete_comment/{id}`  | `{"success":true}` |

use axum::{
  Form, Json,
  extract::{
    Path, State,
    rejection::{JsonRejection, PathRejection},
  },
  response::{IntoResponse, Redirect, Response},
};
use legacylink_core::{
  authz::authorize_owner,
  feed::{LikeToggle, NewComment, NewPost},
  principal::Principal,
  store::CampusStore,
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::{
  AppState,
  error::{Error, PageResult as _},
  handlers::{home::render_home, json_body, path_id, required},
  session::CurrentSession,
};

// ─── Create ──────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct PostForm {
  #[serde(default)]
  pub title:   String,
  #[serde(default)]
  pub content: String,
}

fn new_post(principal: &Principal, form: &PostForm) -> Result<NewPost, Error> {
  Ok(NewPost {
    owner:       principal.owner(),
    author_name: principal.display_name().to_owned(),
    batch_year:  principal.batch_year().unwrap_or(0),
    title:       required("Title", &form.title)?,
    content:     required("Content", &form.content)?,
  })
}

/// `POST /create_post`
///
/// A rejected post re-renders the author's home with the message and the
/// submitted fields.
pub async fn create<S>(
  State(state): State<AppState<S>>,
  session: CurrentSession,
  Form(form): Form<PostForm>,
) -> Response
where
  S: CampusStore + Clone + 'static,
{
  let result = async {
    let principal = session.require()?;
    let input = match new_post(principal, &form) {
      Ok(input) => input,
      Err(e @ Error::Validation(_)) => {
        let extra = json!({
          "error": e.to_string(),
          "postForm": { "title": &form.title, "content": &form.content },
        });
        return render_home(&state, principal, e.status(), extra).await;
      }
      Err(e) => return Err(e),
    };

    let post = state.store.create_post(input).await.map_err(Error::store)?;
    tracing::debug!(post_id = post.id, "post created");
    Ok(Redirect::to(principal.role().home_path()).into_response())
  }
  .await;
  result.or_form_error(&*state.renderer)
}

// ─── Delete ──────────────────────────────────────────────────────────────────

/// `DELETE /delete_post/{id}`
pub async fn delete<S>(
  State(state): State<AppState<S>>,
  session: CurrentSession,
  id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Value>, Error>
where
  S: CampusStore + Clone + 'static,
{
  let principal = session.require()?;
  let id = path_id(id, "post")?;
  let owner = state.store.post_owner(id).await.map_err(Error::store)?;
  authorize_owner(principal, owner.as_ref())?;

  state.store.delete_post(id).await.map_err(Error::store)?;
  tracing::info!(post_id = id, key = principal.key(), "post deleted");
  Ok(Json(json!({ "success": true })))
}

// ─── Like ────────────────────────────────────────────────────────────────────

/// `POST /like_post/{id}`
pub async fn like<S>(
  State(state): State<AppState<S>>,
  session: CurrentSession,
  id: Result<Path<i64>, PathRejection>,
) -> Result<Json<LikeToggle>, Error>
where
  S: CampusStore + Clone + 'static,
{
  let principal = session.require()?;
  let id = path_id(id, "post")?;
  if state.store.post_owner(id).await.map_err(Error::store)?.is_none() {
    return Err(Error::NotFound("Post not found".into()));
  }

  let toggled = state
    .store
    .toggle_like(id, &principal.owner())
    .await
    .map_err(Error::store)?;
  Ok(Json(toggled))
}

// ─── Comments ────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CommentBody {
  #[serde(default)]
  pub comment: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentCreated {
  pub id:          i64,
  pub author_name: String,
  pub comment:     String,
}

/// `POST /comment_post/{id}`, body `{"comment":"..."}`
pub async fn comment<S>(
  State(state): State<AppState<S>>,
  session: CurrentSession,
  id: Result<Path<i64>, PathRejection>,
  body: Result<Json<CommentBody>, JsonRejection>,
) -> Result<Json<CommentCreated>, Error>
where
  S: CampusStore + Clone + 'static,
{
  let principal = session.require()?;
  let id = path_id(id, "post")?;
  let body = json_body(body)?;
  let text = body.comment.trim();
  if text.is_empty() {
    return Err(Error::Validation("Comment cannot be empty!".into()));
  }
  if state.store.post_owner(id).await.map_err(Error::store)?.is_none() {
    return Err(Error::NotFound("Post not found".into()));
  }

  let comment = state
    .store
    .add_comment(NewComment {
      post_id:     id,
      owner:       principal.owner(),
      author_name: principal.display_name().to_owned(),
      comment:     text.to_owned(),
    })
    .await
    .map_err(Error::store)?;

  Ok(Json(CommentCreated {
    id:          comment.id,
    author_name: comment.author_name,
    comment:     comment.comment,
  }))
}

/// `POST /delete_comment/{id}`
pub async fn delete_comment<S>(
  State(state): State<AppState<S>>,
  session: CurrentSession,
  id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Value>, Error>
where
  S: CampusStore + Clone + 'static,
{
  let principal = session.require()?;
  let id = path_id(id, "comment")?;
  let owner = state.store.comment_owner(id).await.map_err(Error::store)?;
  authorize_owner(principal, owner.as_ref())?;

  state.store.delete_comment(id).await.map_err(Error::store)?;
  tracing::info!(comment_id = id, key = principal.key(), "comment deleted");
  Ok(Json(json!({ "success": true })))
}
