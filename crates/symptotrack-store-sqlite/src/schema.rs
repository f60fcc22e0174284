//! SQL schema for the SymptoTrack SQLite store.
//!
//! Executed once at connection startup. Later migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- One row per storage key; the value is the whole serialised list.
CREATE TABLE IF NOT EXISTS local_storage (
    key         TEXT PRIMARY KEY,
    value       TEXT NOT NULL,
    updated_at  TEXT NOT NULL   -- RFC 3339 UTC
);

PRAGMA user_version = 1;
";
