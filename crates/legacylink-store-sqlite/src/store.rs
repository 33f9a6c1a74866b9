//! [`SqliteStore`] — the SQLite implementation of [`CampusStore`].

use std::{collections::HashMap, path::Path};

use rusqlite::OptionalExtension as _;

use legacylink_core::{
  account::{
    Admin, AlumniProfileUpdate, Alumnus, ImportBatch, ImportReport, NewAdmin,
    NewAlumnus, NewStudent, Profile, Student,
  },
  event::{Event, EventView, NewEvent, Registration},
  feed::{Comment, Dashboard, FeedPost, LikeToggle, NewComment, NewPost, Post},
  principal::{Directory, Owner},
  store::CampusStore,
};

use crate::{
  Result,
  encode::{
    RawAdmin, RawAlumnus, RawComment, RawEvent, RawPost, RawStudent,
    decode_count, decode_owner, directory_table, encode_dt, encode_event_date,
    encode_role, now,
  },
  schema::SCHEMA,
};

const COMMENT_COLUMNS: &str =
  "id, post_id, user_type, user_prn, author_name, comment, created_at";

// ─── Store ───────────────────────────────────────────────────────────────────

/// A LegacyLink data gateway backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Read the (type, prn) owner columns of a single row.
  async fn owner_of(
    &self,
    sql: &'static str,
    id: i64,
  ) -> Result<Option<Owner>> {
    let raw: Option<(String, String)> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(sql, rusqlite::params![id], |r| Ok((r.get(0)?, r.get(1)?)))
          .optional()?)
      })
      .await?;

    raw.map(|(role, key)| decode_owner(&role, key)).transpose()
  }
}

// ─── CampusStore impl ────────────────────────────────────────────────────────

impl CampusStore for SqliteStore {
  type Error = crate::Error;

  // ── Accounts ──────────────────────────────────────────────────────────────

  async fn find_member<'a>(
    &'a self,
    directory: Directory,
    prn: &'a str,
  ) -> Result<Option<Profile>> {
    let prn = prn.to_owned();

    match directory {
      Directory::Students => {
        let raw: Option<RawStudent> = self
          .conn
          .call(move |conn| {
            let sql = format!(
              "SELECT {} FROM students WHERE prn = ?1",
              RawStudent::COLUMNS
            );
            Ok(
              conn
                .query_row(&sql, rusqlite::params![prn], RawStudent::from_row)
                .optional()?,
            )
          })
          .await?;
        raw
          .map(|r| r.into_student().map(Profile::Student))
          .transpose()
      }
      Directory::Alumni => {
        let raw: Option<RawAlumnus> = self
          .conn
          .call(move |conn| {
            let sql = format!(
              "SELECT {} FROM alumni WHERE prn = ?1",
              RawAlumnus::COLUMNS
            );
            Ok(
              conn
                .query_row(&sql, rusqlite::params![prn], RawAlumnus::from_row)
                .optional()?,
            )
          })
          .await?;
        raw
          .map(|r| r.into_alumnus().map(Profile::Alumni))
          .transpose()
      }
    }
  }

  async fn member_password_hash<'a>(
    &'a self,
    directory: Directory,
    prn: &'a str,
  ) -> Result<Option<String>> {
    let prn = prn.to_owned();
    let sql = format!(
      "SELECT password_hash FROM {} WHERE prn = ?1",
      directory_table(directory)
    );

    let hash: Option<String> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(&sql, rusqlite::params![prn], |r| r.get(0))
            .optional()?,
        )
      })
      .await?;
    Ok(hash)
  }

  async fn set_member_password<'a>(
    &'a self,
    directory: Directory,
    prn: &'a str,
    password_hash: String,
  ) -> Result<bool> {
    let prn = prn.to_owned();
    let sql = format!(
      "UPDATE {} SET password_hash = ?1 WHERE prn = ?2",
      directory_table(directory)
    );

    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(&sql, rusqlite::params![password_hash, prn])?)
      })
      .await?;
    Ok(changed > 0)
  }

  async fn add_student(&self, input: NewStudent) -> Result<Student> {
    let student = Student {
      prn:        input.prn,
      name:       input.name,
      department: input.department,
      batch_year: input.batch_year,
      email:      input.email,
      created_at: now(),
    };

    let row = (
      student.prn.clone(),
      student.name.clone(),
      student.email.clone(),
      input.password_hash,
      student.department.clone(),
      student.batch_year,
      encode_dt(student.created_at),
    );

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO students (
             prn, name, email, password_hash, department, batch_year, created_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
          rusqlite::params![row.0, row.1, row.2, row.3, row.4, row.5, row.6],
        )?;
        Ok(())
      })
      .await?;

    Ok(student)
  }

  async fn add_alumnus(&self, input: NewAlumnus) -> Result<Alumnus> {
    let alumnus = Alumnus {
      prn:              input.prn,
      name:             input.name,
      department:       input.department,
      batch_year:       input.batch_year,
      current_position: input.current_position,
      company:          input.company,
      location:         input.location,
      email:            input.email,
      created_at:       now(),
    };

    let a = alumnus.clone();
    let password_hash = input.password_hash;
    let at_str = encode_dt(a.created_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO alumni (
             prn, name, email, password_hash, department, batch_year,
             current_position, company, location, created_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
          rusqlite::params![
            a.prn,
            a.name,
            a.email,
            password_hash,
            a.department,
            a.batch_year,
            a.current_position,
            a.company,
            a.location,
            at_str,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(alumnus)
  }

  async fn list_students(&self) -> Result<Vec<Student>> {
    let raws: Vec<RawStudent> = self
      .conn
      .call(|conn| {
        let sql = format!(
          "SELECT {} FROM students ORDER BY batch_year DESC, prn ASC",
          RawStudent::COLUMNS
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map([], RawStudent::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawStudent::into_student).collect()
  }

  async fn list_alumni(&self) -> Result<Vec<Alumnus>> {
    let raws: Vec<RawAlumnus> = self
      .conn
      .call(|conn| {
        let sql = format!(
          "SELECT {} FROM alumni ORDER BY batch_year DESC, prn ASC",
          RawAlumnus::COLUMNS
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map([], RawAlumnus::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawAlumnus::into_alumnus).collect()
  }

  async fn remove_member<'a>(
    &'a self,
    directory: Directory,
    prn: &'a str,
  ) -> Result<bool> {
    let prn = prn.to_owned();
    let sql = format!("DELETE FROM {} WHERE prn = ?1", directory_table(directory));

    let changed = self
      .conn
      .call(move |conn| Ok(conn.execute(&sql, rusqlite::params![prn])?))
      .await?;
    Ok(changed > 0)
  }

  async fn update_alumni_profile<'a>(
    &'a self,
    prn: &'a str,
    update: AlumniProfileUpdate,
  ) -> Result<bool> {
    let prn = prn.to_owned();

    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE alumni
             SET current_position = ?1, company = ?2, location = ?3, email = ?4
           WHERE prn = ?5",
          rusqlite::params![
            update.current_position,
            update.company,
            update.location,
            update.email,
            prn,
          ],
        )?)
      })
      .await?;
    Ok(changed > 0)
  }

  async fn import_students_to_alumni(
    &self,
    batch: ImportBatch,
  ) -> Result<ImportReport> {
    let at_str = encode_dt(now());

    let (matched, imported): (i64, usize) = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        let matched: i64 = tx.query_row(
          "SELECT COUNT(*) FROM students WHERE batch_year = ?1",
          rusqlite::params![batch.batch_year],
          |r| r.get(0),
        )?;

        // Existing alumni rows win; their PRNs are skipped.
        let imported = tx.execute(
          "INSERT OR IGNORE INTO alumni (
             prn, name, email, password_hash, department, batch_year,
             current_position, company, location, created_at
           )
           SELECT prn, name, email, password_hash, department, batch_year,
                  ?2, ?3, ?4, ?5
             FROM students
            WHERE batch_year = ?1",
          rusqlite::params![
            batch.batch_year,
            batch.current_position,
            batch.company,
            batch.location,
            at_str,
          ],
        )?;

        tx.commit()?;
        Ok((matched, imported))
      })
      .await?;

    let matched = decode_count(matched, "students.count")? as usize;
    Ok(ImportReport {
      matched,
      imported,
      skipped: matched.saturating_sub(imported),
    })
  }

  async fn find_admin<'a>(&'a self, username: &'a str) -> Result<Option<Admin>> {
    let username = username.to_owned();

    let raw: Option<RawAdmin> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT username, name, created_at FROM admins WHERE username = ?1",
              rusqlite::params![username],
              |row| {
                Ok(RawAdmin {
                  username:   row.get(0)?,
                  name:       row.get(1)?,
                  created_at: row.get(2)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawAdmin::into_admin).transpose()
  }

  async fn admin_password_hash<'a>(
    &'a self,
    username: &'a str,
  ) -> Result<Option<String>> {
    let username = username.to_owned();

    let hash: Option<String> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT password_hash FROM admins WHERE username = ?1",
              rusqlite::params![username],
              |r| r.get(0),
            )
            .optional()?,
        )
      })
      .await?;
    Ok(hash)
  }

  async fn add_admin(&self, input: NewAdmin) -> Result<Admin> {
    let admin = Admin {
      username:   input.username,
      name:       input.name,
      created_at: now(),
    };

    let username = admin.username.clone();
    let name = admin.name.clone();
    let at_str = encode_dt(admin.created_at);
    let password_hash = input.password_hash;

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO admins (username, name, password_hash, created_at)
           VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![username, name, password_hash, at_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(admin)
  }

  // ── Posts ─────────────────────────────────────────────────────────────────

  async fn create_post(&self, input: NewPost) -> Result<Post> {
    let created_at = now();
    let role_str = encode_role(input.owner.role);
    let key = input.owner.key.clone();
    let author_name = input.author_name.clone();
    let title = input.title.clone();
    let content = input.content.clone();
    let at_str = encode_dt(created_at);
    let batch_year = input.batch_year;

    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO posts (
             user_type, user_prn, author_name, batch_year, title, content, created_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
          rusqlite::params![
            role_str, key, author_name, batch_year, title, content, at_str
          ],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(Post {
      id,
      owner: input.owner,
      author_name: input.author_name,
      batch_year: input.batch_year,
      title: input.title,
      content: input.content,
      created_at,
    })
  }

  async fn post_owner(&self, post_id: i64) -> Result<Option<Owner>> {
    self
      .owner_of("SELECT user_type, user_prn FROM posts WHERE id = ?1", post_id)
      .await
  }

  async fn delete_post(&self, post_id: i64) -> Result<bool> {
    let deleted = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute(
          "DELETE FROM comments WHERE post_id = ?1",
          rusqlite::params![post_id],
        )?;
        tx.execute(
          "DELETE FROM likes WHERE post_id = ?1",
          rusqlite::params![post_id],
        )?;
        let n = tx.execute(
          "DELETE FROM posts WHERE id = ?1",
          rusqlite::params![post_id],
        )?;
        tx.commit()?;
        Ok(n)
      })
      .await?;
    Ok(deleted > 0)
  }

  async fn feed<'a>(&'a self, viewer: &'a Owner) -> Result<Vec<FeedPost>> {
    let role_str = encode_role(viewer.role);
    let key = viewer.key.clone();

    let (posts, comments) = self
      .conn
      .call(move |conn| {
        let sql = format!(
          "SELECT {},
             (SELECT COUNT(*) FROM likes l WHERE l.post_id = p.id),
             (SELECT COUNT(*) FROM comments c WHERE c.post_id = p.id),
             EXISTS (
               SELECT 1 FROM likes l
                WHERE l.post_id = p.id AND l.user_type = ?1 AND l.user_prn = ?2
             )
           FROM posts p
           ORDER BY p.created_at DESC, p.id DESC",
          RawPost::COLUMNS
        );
        let mut stmt = conn.prepare(&sql)?;
        let posts = stmt
          .query_map(rusqlite::params![role_str, key], |row| {
            Ok((
              RawPost::from_row(row)?,
              row.get::<_, i64>(8)?,
              row.get::<_, i64>(9)?,
              row.get::<_, bool>(10)?,
            ))
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        let sql = format!(
          "SELECT {COMMENT_COLUMNS} FROM comments ORDER BY created_at ASC, id ASC"
        );
        let mut stmt = conn.prepare(&sql)?;
        let comments = stmt
          .query_map([], RawComment::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok((posts, comments))
      })
      .await?;

    let mut by_post: HashMap<i64, Vec<Comment>> = HashMap::new();
    for raw in comments {
      let comment = raw.into_comment()?;
      by_post.entry(comment.post_id).or_default().push(comment);
    }

    posts
      .into_iter()
      .map(|(raw, likes, comment_count, liked)| {
        let post = raw.into_post()?;
        let comments = by_post.remove(&post.id).unwrap_or_default();
        Ok(FeedPost {
          post,
          like_count: decode_count(likes, "like_count")?,
          comment_count: decode_count(comment_count, "comment_count")?,
          liked,
          comments,
        })
      })
      .collect()
  }

  async fn toggle_like<'a>(
    &'a self,
    post_id: i64,
    viewer: &'a Owner,
  ) -> Result<LikeToggle> {
    let role_str = encode_role(viewer.role);
    let key = viewer.key.clone();

    let (user_liked, count): (bool, i64) = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        let removed = tx.execute(
          "DELETE FROM likes WHERE post_id = ?1 AND user_type = ?2 AND user_prn = ?3",
          rusqlite::params![post_id, role_str, key],
        )?;
        if removed == 0 {
          tx.execute(
            "INSERT INTO likes (post_id, user_type, user_prn) VALUES (?1, ?2, ?3)",
            rusqlite::params![post_id, role_str, key],
          )?;
        }

        let count: i64 = tx.query_row(
          "SELECT COUNT(*) FROM likes WHERE post_id = ?1",
          rusqlite::params![post_id],
          |r| r.get(0),
        )?;

        tx.commit()?;
        Ok((removed == 0, count))
      })
      .await?;

    Ok(LikeToggle {
      user_liked,
      like_count: decode_count(count, "like_count")?,
    })
  }

  async fn add_comment(&self, input: NewComment) -> Result<Comment> {
    let created_at = now();
    let post_id = input.post_id;
    let role_str = encode_role(input.owner.role);
    let key = input.owner.key.clone();
    let author_name = input.author_name.clone();
    let text = input.comment.clone();
    let at_str = encode_dt(created_at);

    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO comments (
             post_id, user_type, user_prn, author_name, comment, created_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
          rusqlite::params![post_id, role_str, key, author_name, text, at_str],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(Comment {
      id,
      post_id: input.post_id,
      owner: input.owner,
      author_name: input.author_name,
      comment: input.comment,
      created_at,
    })
  }

  async fn comment_owner(&self, comment_id: i64) -> Result<Option<Owner>> {
    self
      .owner_of(
        "SELECT user_type, user_prn FROM comments WHERE id = ?1",
        comment_id,
      )
      .await
  }

  async fn delete_comment(&self, comment_id: i64) -> Result<bool> {
    let deleted = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM comments WHERE id = ?1",
          rusqlite::params![comment_id],
        )?)
      })
      .await?;
    Ok(deleted > 0)
  }

  async fn dashboard(&self, recent: usize) -> Result<Dashboard> {
    let limit = i64::try_from(recent).unwrap_or(i64::MAX);

    let (students, alumni, posts, raws) = self
      .conn
      .call(move |conn| {
        let count = |sql: &str| -> rusqlite::Result<i64> {
          conn.query_row(sql, [], |r| r.get(0))
        };
        let students = count("SELECT COUNT(*) FROM students")?;
        let alumni = count("SELECT COUNT(*) FROM alumni")?;
        let posts = count("SELECT COUNT(*) FROM posts")?;

        let sql = format!(
          "SELECT {} FROM posts p ORDER BY p.created_at DESC, p.id DESC LIMIT ?1",
          RawPost::COLUMNS
        );
        let mut stmt = conn.prepare(&sql)?;
        let raws = stmt
          .query_map(rusqlite::params![limit], RawPost::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok((students, alumni, posts, raws))
      })
      .await?;

    Ok(Dashboard {
      student_count: decode_count(students, "students.count")?,
      alumni_count:  decode_count(alumni, "alumni.count")?,
      post_count:    decode_count(posts, "posts.count")?,
      recent_posts:  raws
        .into_iter()
        .map(RawPost::into_post)
        .collect::<Result<_>>()?,
    })
  }

  // ── Events ────────────────────────────────────────────────────────────────

  async fn create_event(&self, input: NewEvent) -> Result<Event> {
    let created_at = now();
    let event = Event {
      id: 0,
      title: input.title,
      description: input.description,
      event_date: input.event_date,
      location: input.location,
      organizer: input.organizer,
      organizer_name: input.organizer_name,
      organizer_batch_year: input.organizer_batch_year,
      created_at,
    };

    let e = event.clone();
    let date_str = encode_event_date(e.event_date);
    let role_str = encode_role(e.organizer.role);
    let at_str = encode_dt(created_at);

    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO events (
             title, description, event_date, location, organizer_type,
             organizer_prn, organizer_name, organizer_batch_year, created_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
          rusqlite::params![
            e.title,
            e.description,
            date_str,
            e.location,
            role_str,
            e.organizer.key,
            e.organizer_name,
            e.organizer_batch_year,
            at_str,
          ],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(Event { id, ..event })
  }

  async fn event_owner(&self, event_id: i64) -> Result<Option<Owner>> {
    self
      .owner_of(
        "SELECT organizer_type, organizer_prn FROM events WHERE id = ?1",
        event_id,
      )
      .await
  }

  async fn delete_event(&self, event_id: i64) -> Result<bool> {
    let deleted = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute(
          "DELETE FROM event_registrations WHERE event_id = ?1",
          rusqlite::params![event_id],
        )?;
        let n = tx.execute(
          "DELETE FROM events WHERE id = ?1",
          rusqlite::params![event_id],
        )?;
        tx.commit()?;
        Ok(n)
      })
      .await?;
    Ok(deleted > 0)
  }

  async fn events<'a>(&'a self, viewer: &'a Owner) -> Result<Vec<EventView>> {
    let role_str = encode_role(viewer.role);
    let key = viewer.key.clone();

    let raws = self
      .conn
      .call(move |conn| {
        let sql = format!(
          "SELECT {},
             (SELECT COUNT(*) FROM event_registrations r WHERE r.event_id = e.id),
             EXISTS (
               SELECT 1 FROM event_registrations r
                WHERE r.event_id = e.id AND r.user_type = ?1 AND r.user_prn = ?2
             )
           FROM events e
           ORDER BY e.event_date ASC, e.id ASC",
          RawEvent::COLUMNS
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params![role_str, key], |row| {
            Ok((
              RawEvent::from_row(row)?,
              row.get::<_, i64>(10)?,
              row.get::<_, bool>(11)?,
            ))
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws
      .into_iter()
      .map(|(raw, count, registered)| {
        Ok(EventView {
          event: raw.into_event()?,
          registration_count: decode_count(count, "registration_count")?,
          registered,
        })
      })
      .collect()
  }

  async fn register<'a>(
    &'a self,
    event_id: i64,
    viewer: &'a Owner,
  ) -> Result<Registration> {
    let role_str = encode_role(viewer.role);
    let key = viewer.key.clone();
    let at_str = encode_dt(now());

    let count: i64 = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute(
          "INSERT OR IGNORE INTO event_registrations (
             event_id, user_type, user_prn, registered_at
           ) VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![event_id, role_str, key, at_str],
        )?;
        let count: i64 = tx.query_row(
          "SELECT COUNT(*) FROM event_registrations WHERE event_id = ?1",
          rusqlite::params![event_id],
          |r| r.get(0),
        )?;
        tx.commit()?;
        Ok(count)
      })
      .await?;

    Ok(Registration {
      registered:         true,
      registration_count: decode_count(count, "registration_count")?,
    })
  }

  async fn unregister<'a>(
    &'a self,
    event_id: i64,
    viewer: &'a Owner,
  ) -> Result<Registration> {
    let role_str = encode_role(viewer.role);
    let key = viewer.key.clone();

    let count: i64 = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute(
          "DELETE FROM event_registrations
            WHERE event_id = ?1 AND user_type = ?2 AND user_prn = ?3",
          rusqlite::params![event_id, role_str, key],
        )?;
        let count: i64 = tx.query_row(
          "SELECT COUNT(*) FROM event_registrations WHERE event_id = ?1",
          rusqlite::params![event_id],
          |r| r.get(0),
        )?;
        tx.commit()?;
        Ok(count)
      })
      .await?;

    Ok(Registration {
      registered:         false,
      registration_count: decode_count(count, "registration_count")?,
    })
  }
}
