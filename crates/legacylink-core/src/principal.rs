//! Roles, principals and ownership.
//!
//! A principal is the resolved acting identity of a request. It is exactly
//! one of student, alumnus or admin, identified by the pair (role, natural
//! key). Rows that belong to somebody record that same pair as an [`Owner`].

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

// ─── Role ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
  Student,
  Alumni,
  Admin,
}

impl Role {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Student => "student",
      Self::Alumni => "alumni",
      Self::Admin => "admin",
    }
  }

  /// Landing page after a successful login.
  pub fn home_path(self) -> &'static str {
    match self {
      Self::Student => "/student_home",
      Self::Alumni => "/alumni_home",
      Self::Admin => "/admin_home",
    }
  }

  pub fn login_path(self) -> &'static str {
    match self {
      Self::Student => "/student_login",
      Self::Alumni => "/alumni_login",
      Self::Admin => "/admin_login",
    }
  }

  /// The member roster backing this role.
  ///
  /// Admins have no roster beyond their own account row, so asking for one is
  /// a programming error surfaced as [`Error::NoDirectory`].
  pub fn directory(self) -> Result<Directory> {
    match self {
      Self::Student => Ok(Directory::Students),
      Self::Alumni => Ok(Directory::Alumni),
      Self::Admin => Err(Error::NoDirectory(self)),
    }
  }
}

impl fmt::Display for Role {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for Role {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    match s {
      "student" => Ok(Self::Student),
      "alumni" => Ok(Self::Alumni),
      "admin" => Ok(Self::Admin),
      other => Err(Error::UnknownRole(other.to_owned())),
    }
  }
}

// ─── Directory ───────────────────────────────────────────────────────────────

/// The closed set of member rosters. Storage backends map each variant to a
/// fixed collection; nothing derived from request input selects a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Directory {
  Students,
  Alumni,
}

impl Directory {
  pub fn role(self) -> Role {
    match self {
      Self::Students => Role::Student,
      Self::Alumni => Role::Alumni,
    }
  }
}

// ─── Principal ───────────────────────────────────────────────────────────────

/// Identity carried by a student or alumnus session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
  pub prn:        String,
  pub name:       String,
  pub batch_year: i32,
}

/// Identity carried by an admin session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Staff {
  pub username: String,
  pub name:     String,
}

/// The resolved acting identity for a request. Anonymous requests have no
/// principal at all (`Option<Principal>::None`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum Principal {
  Student(Member),
  Alumni(Member),
  Admin(Staff),
}

impl Principal {
  pub fn role(&self) -> Role {
    match self {
      Self::Student(_) => Role::Student,
      Self::Alumni(_) => Role::Alumni,
      Self::Admin(_) => Role::Admin,
    }
  }

  /// The natural key: PRN for members, username for admins.
  pub fn key(&self) -> &str {
    match self {
      Self::Student(m) | Self::Alumni(m) => &m.prn,
      Self::Admin(s) => &s.username,
    }
  }

  pub fn display_name(&self) -> &str {
    match self {
      Self::Student(m) | Self::Alumni(m) => &m.name,
      Self::Admin(s) => &s.name,
    }
  }

  pub fn batch_year(&self) -> Option<i32> {
    match self {
      Self::Student(m) | Self::Alumni(m) => Some(m.batch_year),
      Self::Admin(_) => None,
    }
  }

  pub fn is_member(&self) -> bool { !matches!(self, Self::Admin(_)) }

  /// The ownership record written on rows this principal creates.
  pub fn owner(&self) -> Owner {
    Owner { role: self.role(), key: self.key().to_owned() }
  }
}

// ─── Owner ───────────────────────────────────────────────────────────────────

/// The (role, natural key) pair recorded on an owned row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Owner {
  pub role: Role,
  pub key:  String,
}

impl Owner {
  pub fn new(role: Role, key: impl Into<String>) -> Self {
    Self { role, key: key.into() }
  }
}
