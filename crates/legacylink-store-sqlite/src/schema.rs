//! SQL schema for the LegacyLink SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS students (
    prn           TEXT PRIMARY KEY,
    name          TEXT NOT NULL,
    email         TEXT NOT NULL,
    password_hash TEXT NOT NULL,   -- argon2 PHC string
    department    TEXT NOT NULL,
    batch_year    INTEGER NOT NULL,
    created_at    TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS alumni (
    prn              TEXT PRIMARY KEY,
    name             TEXT NOT NULL,
    email            TEXT NOT NULL,
    password_hash    TEXT NOT NULL,
    department       TEXT NOT NULL,
    batch_year       INTEGER NOT NULL,
    current_position TEXT NOT NULL,
    company          TEXT NOT NULL,
    location         TEXT NOT NULL,
    created_at       TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS admins (
    username      TEXT PRIMARY KEY,
    name          TEXT NOT NULL,
    password_hash TEXT NOT NULL,
    created_at    TEXT NOT NULL
);

-- Owner columns hold the (role, natural key) pair of the author.
CREATE TABLE IF NOT EXISTS posts (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    user_type   TEXT NOT NULL,     -- 'student' | 'alumni' | 'admin'
    user_prn    TEXT NOT NULL,
    author_name TEXT NOT NULL,
    batch_year  INTEGER NOT NULL DEFAULT 0,
    title       TEXT NOT NULL,
    content     TEXT NOT NULL,
    created_at  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS comments (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    post_id     INTEGER NOT NULL REFERENCES posts(id),
    user_type   TEXT NOT NULL,
    user_prn    TEXT NOT NULL,
    author_name TEXT NOT NULL,
    comment     TEXT NOT NULL,
    created_at  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS likes (
    post_id   INTEGER NOT NULL REFERENCES posts(id),
    user_type TEXT NOT NULL,
    user_prn  TEXT NOT NULL,
    UNIQUE (post_id, user_type, user_prn)
);

CREATE TABLE IF NOT EXISTS events (
    id                   INTEGER PRIMARY KEY AUTOINCREMENT,
    title                TEXT NOT NULL,
    description          TEXT NOT NULL,
    event_date           TEXT NOT NULL,   -- naive YYYY-MM-DDTHH:MM:SS
    location             TEXT NOT NULL,
    organizer_type       TEXT NOT NULL,
    organizer_prn        TEXT NOT NULL,
    organizer_name       TEXT NOT NULL,
    organizer_batch_year INTEGER NOT NULL DEFAULT 0,
    created_at           TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS event_registrations (
    event_id      INTEGER NOT NULL REFERENCES events(id),
    user_type     TEXT NOT NULL,
    user_prn      TEXT NOT NULL,
    registered_at TEXT NOT NULL,
    UNIQUE (event_id, user_type, user_prn)
);

CREATE INDEX IF NOT EXISTS posts_created_idx    ON posts(created_at);
CREATE INDEX IF NOT EXISTS comments_post_idx    ON comments(post_id);
CREATE INDEX IF NOT EXISTS events_date_idx      ON events(event_date);
CREATE INDEX IF NOT EXISTS students_batch_idx   ON students(batch_year);

PRAGMA user_version = 1;
";
