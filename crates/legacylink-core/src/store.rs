//! The `CampusStore` trait: the data gateway every handler talks to.
//!
//! Implemented by storage backends (e.g. `legacylink-store-sqlite`). The web
//! layer depends on this abstraction, not on a concrete backend.
//!
//! Existence and ownership checks are the caller's job (see
//! [`crate::authz`]); mutating methods assume they have already passed.
//! Methods that touch more than one row run as a single unit of work.

use std::future::Future;

use crate::{
  account::{
    Admin, AlumniProfileUpdate, Alumnus, ImportBatch, ImportReport, NewAdmin,
    NewAlumnus, NewStudent, Profile, Student,
  },
  event::{Event, EventView, NewEvent, Registration},
  feed::{Comment, Dashboard, FeedPost, LikeToggle, NewComment, NewPost, Post},
  principal::{Directory, Owner},
};

/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait CampusStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Accounts ──────────────────────────────────────────────────────────

  /// Read a member row from the roster selected by `directory`.
  fn find_member<'a>(
    &'a self,
    directory: Directory,
    prn: &'a str,
  ) -> impl Future<Output = Result<Option<Profile>, Self::Error>> + Send + 'a;

  /// The stored PHC hash for a member, if the member exists.
  fn member_password_hash<'a>(
    &'a self,
    directory: Directory,
    prn: &'a str,
  ) -> impl Future<Output = Result<Option<String>, Self::Error>> + Send + 'a;

  /// Replace a member's password hash. Returns `false` if no row matched.
  fn set_member_password<'a>(
    &'a self,
    directory: Directory,
    prn: &'a str,
    password_hash: String,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + 'a;

  fn add_student(
    &self,
    input: NewStudent,
  ) -> impl Future<Output = Result<Student, Self::Error>> + Send + '_;

  fn add_alumnus(
    &self,
    input: NewAlumnus,
  ) -> impl Future<Output = Result<Alumnus, Self::Error>> + Send + '_;

  /// Students ordered by batch year (newest first), then PRN.
  fn list_students(
    &self,
  ) -> impl Future<Output = Result<Vec<Student>, Self::Error>> + Send + '_;

  /// Alumni ordered by batch year (newest first), then PRN.
  fn list_alumni(
    &self,
  ) -> impl Future<Output = Result<Vec<Alumnus>, Self::Error>> + Send + '_;

  /// Delete a member row. Returns `false` if no row matched.
  fn remove_member<'a>(
    &'a self,
    directory: Directory,
    prn: &'a str,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + 'a;

  /// Returns `false` if no alumni row matched.
  fn update_alumni_profile<'a>(
    &'a self,
    prn: &'a str,
    update: AlumniProfileUpdate,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + 'a;

  /// Copy every student of the batch into the alumni roster, skipping PRNs
  /// already present there. All-or-nothing.
  fn import_students_to_alumni(
    &self,
    batch: ImportBatch,
  ) -> impl Future<Output = Result<ImportReport, Self::Error>> + Send + '_;

  fn find_admin<'a>(
    &'a self,
    username: &'a str,
  ) -> impl Future<Output = Result<Option<Admin>, Self::Error>> + Send + 'a;

  fn admin_password_hash<'a>(
    &'a self,
    username: &'a str,
  ) -> impl Future<Output = Result<Option<String>, Self::Error>> + Send + 'a;

  fn add_admin(
    &self,
    input: NewAdmin,
  ) -> impl Future<Output = Result<Admin, Self::Error>> + Send + '_;

  // ── Posts ─────────────────────────────────────────────────────────────

  fn create_post(
    &self,
    input: NewPost,
  ) -> impl Future<Output = Result<Post, Self::Error>> + Send + '_;

  /// The owner of a post, or `None` if the post does not exist.
  fn post_owner(
    &self,
    post_id: i64,
  ) -> impl Future<Output = Result<Option<Owner>, Self::Error>> + Send + '_;

  /// Delete a post together with its comments and likes.
  fn delete_post(
    &self,
    post_id: i64,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// All posts newest first, projected for `viewer`.
  fn feed<'a>(
    &'a self,
    viewer: &'a Owner,
  ) -> impl Future<Output = Result<Vec<FeedPost>, Self::Error>> + Send + 'a;

  /// Like the post if `viewer` has not, otherwise remove the like.
  fn toggle_like<'a>(
    &'a self,
    post_id: i64,
    viewer: &'a Owner,
  ) -> impl Future<Output = Result<LikeToggle, Self::Error>> + Send + 'a;

  fn add_comment(
    &self,
    input: NewComment,
  ) -> impl Future<Output = Result<Comment, Self::Error>> + Send + '_;

  fn comment_owner(
    &self,
    comment_id: i64,
  ) -> impl Future<Output = Result<Option<Owner>, Self::Error>> + Send + '_;

  fn delete_comment(
    &self,
    comment_id: i64,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  fn dashboard(
    &self,
    recent: usize,
  ) -> impl Future<Output = Result<Dashboard, Self::Error>> + Send + '_;

  // ── Events ────────────────────────────────────────────────────────────

  fn create_event(
    &self,
    input: NewEvent,
  ) -> impl Future<Output = Result<Event, Self::Error>> + Send + '_;

  fn event_owner(
    &self,
    event_id: i64,
  ) -> impl Future<Output = Result<Option<Owner>, Self::Error>> + Send + '_;

  /// Delete an event together with its registrations.
  fn delete_event(
    &self,
    event_id: i64,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// All events soonest first, projected for `viewer`.
  fn events<'a>(
    &'a self,
    viewer: &'a Owner,
  ) -> impl Future<Output = Result<Vec<EventView>, Self::Error>> + Send + 'a;

  /// Idempotent: registering twice leaves a single registration.
  fn register<'a>(
    &'a self,
    event_id: i64,
    viewer: &'a Owner,
  ) -> impl Future<Output = Result<Registration, Self::Error>> + Send + 'a;

  fn unregister<'a>(
    &'a self,
    event_id: i64,
    viewer: &'a Owner,
  ) -> impl Future<Output = Result<Registration, Self::Error>> + Send + 'a;
}
