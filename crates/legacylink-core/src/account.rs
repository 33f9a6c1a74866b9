//! Account rows: students, alumni and admins.
//!
//! Password hashes never leave the store through these types; credential
//! checks go through the dedicated `*_password_hash` store methods.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::principal::{Member, Principal, Staff};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
  pub prn:        String,
  pub name:       String,
  pub department: String,
  pub batch_year: i32,
  pub email:      String,
  pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alumnus {
  pub prn:              String,
  pub name:             String,
  pub department:       String,
  pub batch_year:       i32,
  pub current_position: String,
  pub company:          String,
  pub location:         String,
  pub email:            String,
  pub created_at:       DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Admin {
  pub username:   String,
  pub name:       String,
  pub created_at: DateTime<Utc>,
}

/// A member row read through a role's directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum Profile {
  Student(Student),
  Alumni(Alumnus),
}

impl Profile {
  pub fn prn(&self) -> &str {
    match self {
      Self::Student(s) => &s.prn,
      Self::Alumni(a) => &a.prn,
    }
  }

  /// The session principal for this row.
  pub fn principal(&self) -> Principal {
    match self {
      Self::Student(s) => Principal::Student(Member {
        prn:        s.prn.clone(),
        name:       s.name.clone(),
        batch_year: s.batch_year,
      }),
      Self::Alumni(a) => Principal::Alumni(Member {
        prn:        a.prn.clone(),
        name:       a.name.clone(),
        batch_year: a.batch_year,
      }),
    }
  }
}

impl Admin {
  pub fn principal(&self) -> Principal {
    Principal::Admin(Staff {
      username: self.username.clone(),
      name:     self.name.clone(),
    })
  }
}

// ─── Inputs ──────────────────────────────────────────────────────────────────

/// Input to [`crate::store::CampusStore::add_student`]. The password must
/// already be hashed.
#[derive(Debug, Clone)]
pub struct NewStudent {
  pub prn:           String,
  pub name:          String,
  pub email:         String,
  pub password_hash: String,
  pub department:    String,
  pub batch_year:    i32,
}

#[derive(Debug, Clone)]
pub struct NewAlumnus {
  pub prn:              String,
  pub name:             String,
  pub email:            String,
  pub password_hash:    String,
  pub department:       String,
  pub batch_year:       i32,
  pub current_position: String,
  pub company:          String,
  pub location:         String,
}

#[derive(Debug, Clone)]
pub struct NewAdmin {
  pub username:      String,
  pub name:          String,
  pub password_hash: String,
}

/// Editable alumni profile fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlumniProfileUpdate {
  pub current_position: String,
  pub company:          String,
  pub location:         String,
  pub email:            String,
}

/// Promote every student of `batch_year` into the alumni roster.
#[derive(Debug, Clone)]
pub struct ImportBatch {
  pub batch_year:       i32,
  pub current_position: String,
  pub company:          String,
  pub location:         String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportReport {
  /// Students of the batch found in the student roster.
  pub matched:  usize,
  pub imported: usize,
  /// Students already present in the alumni roster.
  pub skipped:  usize,
}
