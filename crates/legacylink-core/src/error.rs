//! Error types for `legacylink-core`.

use thiserror::Error;

use crate::principal::Role;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
  /// No principal is attached to the request.
  #[error("authentication required")]
  AuthenticationRequired,

  /// A principal is present but may not perform the operation. Also used for
  /// targets that do not exist, so callers cannot probe for ids.
  #[error("forbidden")]
  Forbidden,

  #[error("{0}")]
  Validation(String),

  #[error("{0} not found")]
  NotFound(String),

  #[error("role {0} has no member directory")]
  NoDirectory(Role),

  #[error("unknown role: {0:?}")]
  UnknownRole(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
