//! The authorization gate.
//!
//! Every mutating operation on an owned row goes through
//! [`authorize_owner`]. A missing row and a row owned by somebody else are
//! indistinguishable to the caller.

use crate::{
  Error, Result,
  principal::{Owner, Principal},
};

/// Allow iff `owner` exists and is exactly the principal's (role, key) pair.
pub fn authorize_owner(principal: &Principal, owner: Option<&Owner>) -> Result<()> {
  match owner {
    Some(o) if o.role == principal.role() && o.key == principal.key() => Ok(()),
    _ => Err(Error::Forbidden),
  }
}

/// Validate a password change once the current credential has been checked
/// against the principal's own stored hash.
pub fn authorize_password_change(
  current_verified: bool,
  new_password: &str,
  confirm_password: &str,
) -> Result<()> {
  if !current_verified {
    return Err(Error::Validation("Current password is incorrect".into()));
  }
  if new_password.is_empty() {
    return Err(Error::Validation("New password cannot be empty".into()));
  }
  if new_password.as_bytes() != confirm_password.as_bytes() {
    return Err(Error::Validation("New passwords do not match".into()));
  }
  Ok(())
}
