//! Encoding and decoding helpers between Rust domain types and the
//! plain-text representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 UTC strings, which keeps their
//! lexicographic order chronological. Kinds are stored under their wire
//! names.

use chrono::{DateTime, Utc};
use qrar_core::experience::{Experience, ExperienceKind};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── ExperienceKind ──────────────────────────────────────────────────────────

pub fn encode_kind(k: ExperienceKind) -> &'static str { k.as_str() }

pub fn decode_kind(s: &str) -> Result<ExperienceKind> {
  ExperienceKind::parse(s).ok_or_else(|| Error::UnknownKind(s.to_owned()))
}

// ─── Raw rows ────────────────────────────────────────────────────────────────

/// An experience row as read from SQLite, before decoding the typed
/// columns.
pub struct RawExperience {
  pub experience_id: String,
  pub title:         String,
  pub kind:          String,
  pub media_url:     String,
  pub thumbnail_url: Option<String>,
  pub is_active:     bool,
  pub created_at:    String,
}

impl RawExperience {
  pub fn into_experience(self) -> Result<Experience> {
    Ok(Experience {
      id:             self.experience_id,
      title:          self.title,
      kind:           decode_kind(&self.kind)?,
      media_url:      self.media_url,
      thumbnail_url:  self.thumbnail_url,
      is_active:      self.is_active,
      created_at_utc: decode_dt(&self.created_at)?,
    })
  }
}

/// Row mapper for the full experience column list:
/// `experience_id, title, kind, media_url, thumbnail_url, is_active,
/// created_at`.
pub fn raw_experience_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawExperience> {
  Ok(RawExperience {
    experience_id: row.get(0)?,
    title:         row.get(1)?,
    kind:          row.get(2)?,
    media_url:     row.get(3)?,
    thumbnail_url: row.get(4)?,
    is_active:     row.get(5)?,
    created_at:    row.get(6)?,
  })
}
