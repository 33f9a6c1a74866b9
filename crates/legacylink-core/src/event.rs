//! Events and registrations.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result, principal::Owner};

/// Storage and display format for event dates.
pub const EVENT_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
  pub id:                   i64,
  pub title:                String,
  pub description:          String,
  pub event_date:           NaiveDateTime,
  pub location:             String,
  pub organizer:            Owner,
  pub organizer_name:       String,
  pub organizer_batch_year: i32,
  pub created_at:           DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewEvent {
  pub title:                String,
  pub description:          String,
  pub event_date:           NaiveDateTime,
  pub location:             String,
  pub organizer:            Owner,
  pub organizer_name:       String,
  pub organizer_batch_year: i32,
}

/// An event as seen by one viewer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventView {
  #[serde(flatten)]
  pub event:              Event,
  pub registration_count: u64,
  pub registered:         bool,
}

/// Result of a register/unregister call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
  pub registered:         bool,
  pub registration_count: u64,
}

/// Parse an event date as submitted by a browser form.
///
/// Accepts `datetime-local` values with or without seconds, and bare dates
/// (taken as midnight).
pub fn parse_event_date(input: &str) -> Result<NaiveDateTime> {
  let input = input.trim();
  for fmt in ["%Y-%m-%dT%H:%M", EVENT_DATE_FORMAT, "%Y-%m-%d %H:%M"] {
    if let Ok(dt) = NaiveDateTime::parse_from_str(input, fmt) {
      return Ok(dt);
    }
  }
  NaiveDate::parse_from_str(input, "%Y-%m-%d")
    .ok()
    .and_then(|d| d.and_hms_opt(0, 0, 0))
    .ok_or_else(|| Error::Validation(format!("invalid event date: {input:?}")))
}
