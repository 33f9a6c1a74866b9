//! Error types for `legacylink-chat`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("message is empty")]
  EmptyMessage,

  /// No completion service is configured.
  #[error("assistant unavailable")]
  Unavailable,

  #[error("http error: {0}")]
  Http(#[from] reqwest::Error),

  #[error("completion service returned status {0}")]
  Status(u16),

  #[error("completion service returned no text")]
  EmptyCompletion,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
