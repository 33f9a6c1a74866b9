//! Error type for `legacylink-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] legacylink_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  #[error("negative count in column {0}")]
  NegativeCount(&'static str),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
