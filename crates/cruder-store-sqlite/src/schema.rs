//! SQL schema for the cruder SQLite store.
//!
//! Executed once at connection startup. The two named UNIQUE constraints are
//! what the classifier keys on; renaming a column means updating
//! [`crate::classify`] as well.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS users (
    id          TEXT PRIMARY KEY,   -- hyphenated v4 UUID
    username    TEXT NOT NULL,      -- lower-cased by the service layer
    email       TEXT NOT NULL,      -- lower-cased by the service layer
    full_name   TEXT NOT NULL,
    created_at  TEXT NOT NULL,      -- RFC 3339 UTC, nanosecond precision
    updated_at  TEXT NOT NULL,
    CONSTRAINT users_username_key UNIQUE (username),
    CONSTRAINT users_email_key    UNIQUE (email)
);

CREATE INDEX IF NOT EXISTS users_created_idx ON users(created_at);

PRAGMA user_version = 1;
";
