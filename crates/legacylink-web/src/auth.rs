//! Password hashing and credential checks.

use argon2::{
  Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
  password_hash::SaltString,
};
use legacylink_core::{
  principal::{Directory, Principal},
  store::CampusStore,
};
use rand_core::OsRng;

use crate::error::Error;

/// Hash `password` into an argon2id PHC string.
pub fn hash_password(password: &str) -> Result<String, Error> {
  let salt = SaltString::generate(&mut OsRng);
  Argon2::default()
    .hash_password(password.as_bytes(), &salt)
    .map(|h| h.to_string())
    .map_err(|e| Error::Internal(format!("argon2 error: {e}")))
}

/// Constant-time check of `password` against a stored PHC string. A
/// malformed hash never verifies.
pub fn verify_password(password: &str, phc: &str) -> bool {
  PasswordHash::new(phc)
    .map(|parsed| {
      Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
    })
    .unwrap_or(false)
}

/// Check a student or alumnus login against the directory's roster.
pub async fn authenticate_member<S>(
  store: &S,
  directory: Directory,
  prn: &str,
  password: &str,
) -> Result<Option<Principal>, Error>
where
  S: CampusStore,
{
  let Some(hash) = store
    .member_password_hash(directory, prn)
    .await
    .map_err(Error::store)?
  else {
    return Ok(None);
  };
  if !verify_password(password, &hash) {
    return Ok(None);
  }

  let profile = store
    .find_member(directory, prn)
    .await
    .map_err(Error::store)?;
  Ok(profile.map(|p| p.principal()))
}

pub async fn authenticate_admin<S>(
  store: &S,
  username: &str,
  password: &str,
) -> Result<Option<Principal>, Error>
where
  S: CampusStore,
{
  let Some(hash) = store
    .admin_password_hash(username)
    .await
    .map_err(Error::store)?
  else {
    return Ok(None);
  };
  if !verify_password(password, &hash) {
    return Ok(None);
  }

  let admin = store.find_admin(username).await.map_err(Error::store)?;
  Ok(admin.map(|a| a.principal()))
}
