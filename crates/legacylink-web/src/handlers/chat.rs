//! `POST /chat`: the assistant endpoint. Open to anonymous visitors.

use axum::{
  Json,
  extract::{State, rejection::JsonRejection},
};
use legacylink_chat::ReplySource;
use legacylink_core::store::CampusStore;
use serde::{Deserialize, Serialize};

use crate::{AppState, error::Error, handlers::json_body};

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
  #[serde(default)]
  pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
  pub reply:  String,
  pub source: ReplySource,
}

pub async fn handler<S>(
  State(state): State<AppState<S>>,
  req: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, Error>
where
  S: CampusStore + Clone + 'static,
{
  let req = json_body(req)?;
  match state.assistant.reply(&req.message).await {
    Ok(reply) => Ok(Json(ChatResponse { reply: reply.text, source: reply.source })),
    Err(legacylink_chat::Error::EmptyMessage) => {
      Err(Error::Validation("Message cannot be empty".into()))
    }
    Err(e) => Err(Error::Chat(e)),
  }
}
