//! SQL schema for the QR-AR SQLite store.
//!
//! Executed once at connection startup via `PRAGMA user_version`. Future
//! migrations will be gated on that version number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS experiences (
    experience_id TEXT PRIMARY KEY,
    title         TEXT NOT NULL,
    kind          TEXT NOT NULL,      -- 'Video' | 'Model3D' | 'Image' | 'Message'
    media_url     TEXT NOT NULL,
    thumbnail_url TEXT,
    is_active     INTEGER NOT NULL DEFAULT 1,
    created_at    TEXT NOT NULL       -- RFC 3339 UTC; server-assigned
);

-- Events are strictly append-only.
-- No UPDATE or DELETE is ever issued against this table.
-- experience_id is deliberately not a foreign key: events must survive
-- deletion of the experience they reference.
CREATE TABLE IF NOT EXISTS events (
    event_id      INTEGER PRIMARY KEY AUTOINCREMENT,
    experience_id TEXT NOT NULL,
    event_name    TEXT NOT NULL,
    created_at    TEXT NOT NULL
);

-- Listing sorts by recency; the summary query groups within a window.
CREATE INDEX IF NOT EXISTS experiences_created_idx ON experiences(created_at);
CREATE INDEX IF NOT EXISTS events_summary_idx
    ON events(experience_id, event_name, created_at);

PRAGMA user_version = 1;
";
