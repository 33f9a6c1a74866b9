//! Cookie sessions.
//!
//! A session token is 32 random bytes, hex encoded, carried in the
//! `legacylink_session` cookie. Each token maps to exactly one [`Principal`].
//! Records live in process memory only and expire `ttl` after login.

use std::{collections::HashMap, convert::Infallible};

use axum::{
  extract::FromRequestParts,
  http::{HeaderMap, header, request::Parts},
};
use chrono::{DateTime, Duration, Utc};
use legacylink_core::{
  principal::{Principal, Role},
  store::CampusStore,
};
use rand_core::{OsRng, RngCore};
use tokio::sync::RwLock;

use crate::{AppState, error::Error};

pub const SESSION_COOKIE: &str = "legacylink_session";

// ─── Store ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
struct SessionRecord {
  principal:  Principal,
  expires_at: DateTime<Utc>,
}

impl SessionRecord {
  fn is_live(&self, now: DateTime<Utc>) -> bool { self.expires_at > now }
}

pub struct SessionStore {
  ttl:     Duration,
  records: RwLock<HashMap<String, SessionRecord>>,
}

impl SessionStore {
  pub fn new(ttl: Duration) -> Self {
    Self { ttl, records: RwLock::new(HashMap::new()) }
  }

  pub fn with_ttl_minutes(minutes: i64) -> Self {
    Self::new(Duration::minutes(minutes))
  }

  /// Bind `principal` to a fresh token. The session named by `previous`, if
  /// any, is destroyed and expired records are swept.
  pub async fn establish(&self, principal: Principal, previous: Option<&str>) -> String {
    let token = new_token();
    let now = Utc::now();

    let mut records = self.records.write().await;
    sweep(&mut records, now);
    if let Some(old) = previous {
      records.remove(old);
    }
    records.insert(token.clone(), SessionRecord {
      principal,
      expires_at: now + self.ttl,
    });
    token
  }

  /// The principal bound to `token`, unless the record is missing or expired.
  pub async fn resolve(&self, token: &str) -> Option<Principal> {
    let now = Utc::now();
    {
      let records = self.records.read().await;
      match records.get(token) {
        None => return None,
        Some(r) if r.is_live(now) => return Some(r.principal.clone()),
        Some(_) => {}
      }
    }
    self.records.write().await.remove(token);
    None
  }

  /// Remove the record for `token`. Expired records are swept as well.
  pub async fn destroy(&self, token: &str) -> bool {
    let mut records = self.records.write().await;
    let removed = records.remove(token).is_some();
    sweep(&mut records, Utc::now());
    removed
  }

  pub async fn len(&self) -> usize { self.records.read().await.len() }
}

/// Records are only dropped on login, logout or a lookup of the dead token
/// itself; there is no background reaper.
fn sweep(records: &mut HashMap<String, SessionRecord>, now: DateTime<Utc>) {
  records.retain(|_, r| r.is_live(now));
}

fn new_token() -> String {
  let mut bytes = [0u8; 32];
  OsRng.fill_bytes(&mut bytes);
  hex::encode(bytes)
}

// ─── Cookies ─────────────────────────────────────────────────────────────────

/// Value of the session cookie, if the request carries one.
pub fn session_token(headers: &HeaderMap) -> Option<String> {
  headers
    .get_all(header::COOKIE)
    .iter()
    .filter_map(|v| v.to_str().ok())
    .flat_map(|s| s.split(';'))
    .filter_map(|pair| pair.trim().split_once('='))
    .find(|(k, _)| *k == SESSION_COOKIE)
    .map(|(_, v)| v.to_owned())
    .filter(|v| !v.is_empty())
}

pub fn session_cookie(token: &str, secure: bool) -> String {
  let secure = if secure { "; Secure" } else { "" };
  format!("{SESSION_COOKIE}={token}; HttpOnly; SameSite=Lax; Path=/{secure}")
}

pub fn clear_session_cookie(secure: bool) -> String {
  let secure = if secure { "; Secure" } else { "" };
  format!(
    "{SESSION_COOKIE}=; Expires=Thu, 01 Jan 1970 00:00:00 GMT; Max-Age=0; \
     HttpOnly; SameSite=Lax; Path=/{secure}"
  )
}

// ─── Extractor ───────────────────────────────────────────────────────────────

/// The session attached to a request. Never rejects: anonymous requests
/// simply carry no principal.
#[derive(Debug, Clone, Default)]
pub struct CurrentSession {
  pub token:     Option<String>,
  pub principal: Option<Principal>,
}

impl CurrentSession {
  pub fn require(&self) -> Result<&Principal, Error> {
    self.principal.as_ref().ok_or(Error::Unauthenticated)
  }

  /// A student or alumnus.
  pub fn require_member(&self) -> Result<&Principal, Error> {
    let p = self.require()?;
    if p.is_member() { Ok(p) } else { Err(Error::Forbidden) }
  }

  pub fn require_role(&self, role: Role) -> Result<&Principal, Error> {
    let p = self.require()?;
    if p.role() == role { Ok(p) } else { Err(Error::Forbidden) }
  }

  pub fn require_admin(&self) -> Result<&Principal, Error> {
    self.require_role(Role::Admin)
  }
}

impl<S> FromRequestParts<AppState<S>> for CurrentSession
where
  S: CampusStore + Clone + Send + Sync + 'static,
{
  type Rejection = Infallible;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &AppState<S>,
  ) -> Result<Self, Self::Rejection> {
    let Some(token) = session_token(&parts.headers) else {
      return Ok(Self::default());
    };
    let principal = state.sessions.resolve(&token).await;
    Ok(Self { token: Some(token), principal })
  }
}

#[cfg(test)]
mod tests {
  use axum::http::HeaderValue;
  use legacylink_core::principal::{Member, Staff};

  use super::*;

  fn alice() -> Principal {
    Principal::Student(Member {
      prn:        "S1".into(),
      name:       "Alice".into(),
      batch_year: 2025,
    })
  }

  #[tokio::test]
  async fn established_session_resolves_to_its_principal() {
    let store = SessionStore::with_ttl_minutes(120);
    let token = store.establish(alice(), None).await;
    assert_eq!(token.len(), 64);
    assert_eq!(store.resolve(&token).await, Some(alice()));
    assert_eq!(store.resolve("not-a-token").await, None);
  }

  #[tokio::test]
  async fn expired_sessions_resolve_to_nobody_and_are_dropped() {
    let store = SessionStore::new(Duration::zero());
    let token = store.establish(alice(), None).await;
    assert_eq!(store.resolve(&token).await, None);
    assert_eq!(store.len().await, 0);
  }

  #[tokio::test]
  async fn new_login_replaces_the_previous_session() {
    let store = SessionStore::with_ttl_minutes(120);
    let first = store.establish(alice(), None).await;
    let admin = Principal::Admin(Staff { username: "root".into(), name: "Root".into() });
    let second = store.establish(admin.clone(), Some(&first)).await;

    assert_ne!(first, second);
    assert_eq!(store.resolve(&first).await, None);
    assert_eq!(store.resolve(&second).await, Some(admin));
    assert_eq!(store.len().await, 1);
  }

  #[tokio::test]
  async fn destroy_removes_the_record() {
    let store = SessionStore::with_ttl_minutes(120);
    let token = store.establish(alice(), None).await;
    assert!(store.destroy(&token).await);
    assert!(!store.destroy(&token).await);
    assert_eq!(store.resolve(&token).await, None);
  }

  #[tokio::test]
  async fn logout_sweeps_other_expired_records() {
    let store = SessionStore::new(Duration::zero());
    store.establish(alice(), None).await;
    store.establish(alice(), None).await;
    assert_eq!(store.len().await, 1);

    assert!(!store.destroy("unknown").await);
    assert_eq!(store.len().await, 0);
  }

  #[test]
  fn cookie_is_found_among_others() {
    let mut headers = HeaderMap::new();
    headers.insert(
      header::COOKIE,
      HeaderValue::from_static("theme=dark; legacylink_session=abc123; lang=en"),
    );
    assert_eq!(session_token(&headers).as_deref(), Some("abc123"));

    headers.insert(header::COOKIE, HeaderValue::from_static("legacylink_session="));
    assert_eq!(session_token(&headers), None);
  }

  #[test]
  fn cookie_attributes() {
    let c = session_cookie("abc", false);
    assert!(c.starts_with("legacylink_session=abc;"));
    assert!(c.contains("HttpOnly"));
    assert!(c.contains("SameSite=Lax"));
    assert!(!c.contains("Secure"));
    assert!(session_cookie("abc", true).ends_with("; Secure"));
    assert!(clear_session_cookie(false).contains("Max-Age=0"));
  }
}
