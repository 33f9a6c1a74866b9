//! Encoding and decoding helpers between domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as fixed-width RFC 3339 strings (microseconds, `Z`
//! suffix) so that `ORDER BY` on the text column is chronological. Event
//! dates are naive `YYYY-MM-DDTHH:MM:SS` strings. Roles are lowercase words.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use legacylink_core::{
  account::{Admin, Alumnus, Student},
  event::{EVENT_DATE_FORMAT, Event},
  feed::{Comment, Post},
  principal::{Directory, Owner, Role},
};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

/// Current time truncated to the stored precision, so values handed back to
/// callers compare equal to what a later read returns.
pub fn now() -> DateTime<Utc> {
  let now = Utc::now();
  DateTime::from_timestamp_micros(now.timestamp_micros()).unwrap_or(now)
}

// ─── Event dates ─────────────────────────────────────────────────────────────

pub fn encode_event_date(dt: NaiveDateTime) -> String {
  dt.format(EVENT_DATE_FORMAT).to_string()
}

pub fn decode_event_date(s: &str) -> Result<NaiveDateTime> {
  NaiveDateTime::parse_from_str(s, EVENT_DATE_FORMAT)
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Roles and directories ───────────────────────────────────────────────────

pub fn encode_role(role: Role) -> &'static str { role.as_str() }

pub fn decode_role(s: &str) -> Result<Role> { Ok(s.parse()?) }

pub fn decode_owner(role: &str, key: String) -> Result<Owner> {
  Ok(Owner { role: decode_role(role)?, key })
}

/// The table backing each member directory. Table names only ever come from
/// this match.
pub fn directory_table(directory: Directory) -> &'static str {
  match directory {
    Directory::Students => "students",
    Directory::Alumni => "alumni",
  }
}

// ─── Counts ──────────────────────────────────────────────────────────────────

pub fn decode_count(n: i64, column: &'static str) -> Result<u64> {
  u64::try_from(n).map_err(|_| Error::NegativeCount(column))
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw values read directly from a `students` row.
pub struct RawStudent {
  pub prn:        String,
  pub name:       String,
  pub email:      String,
  pub department: String,
  pub batch_year: i32,
  pub created_at: String,
}

impl RawStudent {
  pub const COLUMNS: &'static str =
    "prn, name, email, department, batch_year, created_at";

  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      prn:        row.get(0)?,
      name:       row.get(1)?,
      email:      row.get(2)?,
      department: row.get(3)?,
      batch_year: row.get(4)?,
      created_at: row.get(5)?,
    })
  }

  pub fn into_student(self) -> Result<Student> {
    Ok(Student {
      prn:        self.prn,
      name:       self.name,
      department: self.department,
      batch_year: self.batch_year,
      email:      self.email,
      created_at: decode_dt(&self.created_at)?,
    })
  }
}

/// Raw values read directly from an `alumni` row.
pub struct RawAlumnus {
  pub prn:              String,
  pub name:             String,
  pub email:            String,
  pub department:       String,
  pub batch_year:       i32,
  pub current_position: String,
  pub company:          String,
  pub location:         String,
  pub created_at:       String,
}

impl RawAlumnus {
  pub const COLUMNS: &'static str = "prn, name, email, department, batch_year, \
                                     current_position, company, location, created_at";

  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      prn:              row.get(0)?,
      name:             row.get(1)?,
      email:            row.get(2)?,
      department:       row.get(3)?,
      batch_year:       row.get(4)?,
      current_position: row.get(5)?,
      company:          row.get(6)?,
      location:         row.get(7)?,
      created_at:       row.get(8)?,
    })
  }

  pub fn into_alumnus(self) -> Result<Alumnus> {
    Ok(Alumnus {
      prn:              self.prn,
      name:             self.name,
      department:       self.department,
      batch_year:       self.batch_year,
      current_position: self.current_position,
      company:          self.company,
      location:         self.location,
      email:            self.email,
      created_at:       decode_dt(&self.created_at)?,
    })
  }
}

pub struct RawAdmin {
  pub username:   String,
  pub name:       String,
  pub created_at: String,
}

impl RawAdmin {
  pub fn into_admin(self) -> Result<Admin> {
    Ok(Admin {
      username:   self.username,
      name:       self.name,
      created_at: decode_dt(&self.created_at)?,
    })
  }
}

/// Raw values read from a `posts` row, plus the optional per-viewer
/// aggregates selected alongside it.
pub struct RawPost {
  pub id:          i64,
  pub user_type:   String,
  pub user_prn:    String,
  pub author_name: String,
  pub batch_year:  i32,
  pub title:       String,
  pub content:     String,
  pub created_at:  String,
}

impl RawPost {
  pub const COLUMNS: &'static str = "p.id, p.user_type, p.user_prn, p.author_name, \
                                     p.batch_year, p.title, p.content, p.created_at";

  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:          row.get(0)?,
      user_type:   row.get(1)?,
      user_prn:    row.get(2)?,
      author_name: row.get(3)?,
      batch_year:  row.get(4)?,
      title:       row.get(5)?,
      content:     row.get(6)?,
      created_at:  row.get(7)?,
    })
  }

  pub fn into_post(self) -> Result<Post> {
    Ok(Post {
      id:          self.id,
      owner:       decode_owner(&self.user_type, self.user_prn)?,
      author_name: self.author_name,
      batch_year:  self.batch_year,
      title:       self.title,
      content:     self.content,
      created_at:  decode_dt(&self.created_at)?,
    })
  }
}

pub struct RawComment {
  pub id:          i64,
  pub post_id:     i64,
  pub user_type:   String,
  pub user_prn:    String,
  pub author_name: String,
  pub comment:     String,
  pub created_at:  String,
}

impl RawComment {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:          row.get(0)?,
      post_id:     row.get(1)?,
      user_type:   row.get(2)?,
      user_prn:    row.get(3)?,
      author_name: row.get(4)?,
      comment:     row.get(5)?,
      created_at:  row.get(6)?,
    })
  }

  pub fn into_comment(self) -> Result<Comment> {
    Ok(Comment {
      id:          self.id,
      post_id:     self.post_id,
      owner:       decode_owner(&self.user_type, self.user_prn)?,
      author_name: self.author_name,
      comment:     self.comment,
      created_at:  decode_dt(&self.created_at)?,
    })
  }
}

pub struct RawEvent {
  pub id:                   i64,
  pub title:                String,
  pub description:          String,
  pub event_date:           String,
  pub location:             String,
  pub organizer_type:       String,
  pub organizer_prn:        String,
  pub organizer_name:       String,
  pub organizer_batch_year: i32,
  pub created_at:           String,
}

impl RawEvent {
  pub const COLUMNS: &'static str = "e.id, e.title, e.description, e.event_date, \
                                     e.location, e.organizer_type, e.organizer_prn, \
                                     e.organizer_name, e.organizer_batch_year, e.created_at";

  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:                   row.get(0)?,
      title:                row.get(1)?,
      description:          row.get(2)?,
      event_date:           row.get(3)?,
      location:             row.get(4)?,
      organizer_type:       row.get(5)?,
      organizer_prn:        row.get(6)?,
      organizer_name:       row.get(7)?,
      organizer_batch_year: row.get(8)?,
      created_at:           row.get(9)?,
    })
  }

  pub fn into_event(self) -> Result<Event> {
    Ok(Event {
      id:                   self.id,
      title:                self.title,
      description:          self.description,
      event_date:           decode_event_date(&self.event_date)?,
      location:             self.location,
      organizer:            decode_owner(&self.organizer_type, self.organizer_prn)?,
      organizer_name:       self.organizer_name,
      organizer_batch_year: self.organizer_batch_year,
      created_at:           decode_dt(&self.created_at)?,
    })
  }
}
