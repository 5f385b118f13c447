//! Experience — the unit of AR content addressed by a QR code.
//!
//! An experience owns an opaque string id (caller-assigned or generated)
//! and points at the media the viewer renders. All payload validation
//! lives here so the storage and HTTP layers stay mechanical.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

use crate::error::ValidationErrors;

// ─── Kind ────────────────────────────────────────────────────────────────────

/// The kind of content an experience renders in the AR viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExperienceKind {
  Video,
  Model3D,
  Image,
  Message,
}

impl ExperienceKind {
  pub fn as_str(self) -> &'static str {
    match self {
      ExperienceKind::Video => "Video",
      ExperienceKind::Model3D => "Model3D",
      ExperienceKind::Image => "Image",
      ExperienceKind::Message => "Message",
    }
  }

  /// Parse the wire representation. Returns `None` for anything outside
  /// the four known kinds; callers decide how to report that.
  pub fn parse(s: &str) -> Option<Self> {
    match s {
      "Video" => Some(ExperienceKind::Video),
      "Model3D" => Some(ExperienceKind::Model3D),
      "Image" => Some(ExperienceKind::Image),
      "Message" => Some(ExperienceKind::Message),
      _ => None,
    }
  }
}

// ─── Entity ──────────────────────────────────────────────────────────────────

/// A stored experience record.
///
/// `id` and `created_at_utc` are immutable once persisted; everything else
/// may be overwritten by an update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
  pub id:             String,
  pub title:          String,
  #[serde(rename = "type")]
  pub kind:           ExperienceKind,
  pub media_url:      String,
  pub thumbnail_url:  Option<String>,
  pub is_active:      bool,
  pub created_at_utc: DateTime<Utc>,
}

// ─── Create payload ──────────────────────────────────────────────────────────

/// Payload for creating an experience. A blank or absent `id` means the
/// store assigns one.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewExperience {
  #[serde(default)]
  pub id:            Option<String>,
  pub title:         String,
  #[serde(rename = "type")]
  pub kind:          ExperienceKind,
  pub media_url:     String,
  #[serde(default)]
  pub thumbnail_url: Option<String>,
  #[serde(default = "default_true")]
  pub is_active:     bool,
}

fn default_true() -> bool { true }

impl NewExperience {
  /// Materialize a stored record, generating a fresh id when the caller
  /// did not supply a usable one. Generated ids use the non-hyphenated
  /// UUIDv4 form so they stay QR-friendly.
  pub fn into_experience(self, created_at_utc: DateTime<Utc>) -> Experience {
    let id = match self.id {
      Some(id) if !id.trim().is_empty() => id,
      _ => Uuid::new_v4().simple().to_string(),
    };

    Experience {
      id,
      title: self.title,
      kind: self.kind,
      media_url: self.media_url,
      thumbnail_url: self.thumbnail_url,
      is_active: self.is_active,
      created_at_utc,
    }
  }
}

// ─── Update payload ──────────────────────────────────────────────────────────

/// Raw update payload as received on the wire.
///
/// `type` is kept as a plain string so an unknown kind surfaces as a
/// field-level validation error rather than a deserialization failure.
/// Missing fields deserialize to their defaults and fail validation the
/// same way blank ones do.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceUpdate {
  #[serde(default)]
  pub title:         String,
  #[serde(default, rename = "type")]
  pub kind:          String,
  #[serde(default)]
  pub media_url:     String,
  #[serde(default)]
  pub thumbnail_url: Option<String>,
  #[serde(default)]
  pub is_active:     bool,
}

/// A fully-validated update, ready to overwrite the mutable fields of an
/// existing experience.
#[derive(Debug, Clone)]
pub struct ExperiencePatch {
  pub title:         String,
  pub kind:          ExperienceKind,
  pub media_url:     String,
  pub thumbnail_url: Option<String>,
  pub is_active:     bool,
}

impl ExperienceUpdate {
  /// Validate every field and collect all failures before returning.
  pub fn validate(self) -> Result<ExperiencePatch, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    if self.title.trim().is_empty() {
      errors.push("title", "must not be blank");
    }

    let kind = ExperienceKind::parse(self.kind.trim());
    if kind.is_none() {
      errors.push("type", "must be one of Video | Model3D | Image | Message");
    }

    if !is_absolute_url(&self.media_url) {
      errors.push("mediaUrl", "must be a well-formed absolute URL");
    }

    match (kind, errors.is_empty()) {
      (Some(kind), true) => Ok(ExperiencePatch {
        title: self.title,
        kind,
        media_url: self.media_url,
        thumbnail_url: self.thumbnail_url,
        is_active: self.is_active,
      }),
      _ => Err(errors),
    }
  }
}

/// `true` when `s` parses as an absolute URL (scheme included).
pub fn is_absolute_url(s: &str) -> bool { Url::parse(s).is_ok() }

// ─── Tests ───────────────────────────────────────────────────────────────────
