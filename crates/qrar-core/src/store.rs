//! The `ExperienceStore` and `EventStore` traits and the pagination
//! envelope.
//!
//! The traits are implemented by storage backends (e.g.
//! `qrar-store-sqlite`). Higher layers (`qrar-api`, `qrar-server`)
//! depend on these abstractions, not on any concrete backend.

use std::future::Future;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{
  event::{AnalyticsEvent, EventCount, NewEvent},
  experience::{Experience, ExperiencePatch, NewExperience},
  query::ExperienceQuery,
};

// ─── Pagination envelope ─────────────────────────────────────────────────────

/// One page of a filtered listing. `total` is the full filtered count
/// before pagination, so clients can compute the page count.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperiencePage {
  pub total:     i64,
  pub page:      i64,
  pub page_size: i64,
  pub items:     Vec<Experience>,
}

// ─── Experience store ────────────────────────────────────────────────────────

/// Abstraction over durable experience storage.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait ExperienceStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Persist a new experience. The store stamps `created_at_utc` and
  /// assigns an id when the payload carries none; the stored entity is
  /// returned.
  fn create(
    &self,
    input: NewExperience,
  ) -> impl Future<Output = Result<Experience, Self::Error>> + Send + '_;

  /// Retrieve an experience by id. Returns `None` if not found.
  fn get<'a>(
    &'a self,
    id: &'a str,
  ) -> impl Future<Output = Result<Option<Experience>, Self::Error>> + Send + 'a;

  /// Filtered, paginated listing sorted by `created_at_utc` descending.
  /// An out-of-range page yields an empty `items` with the same `total`.
  fn list<'a>(
    &'a self,
    query: &'a ExperienceQuery,
  ) -> impl Future<Output = Result<ExperiencePage, Self::Error>> + Send + 'a;

  /// All active experiences, `created_at_utc` descending, unpaginated.
  fn list_active(
    &self,
  ) -> impl Future<Output = Result<Vec<Experience>, Self::Error>> + Send + '_;

  /// Overwrite the mutable fields of an existing experience. `id` and
  /// `created_at_utc` are never altered. Returns the updated entity, or
  /// `None` if the id does not exist.
  fn update<'a>(
    &'a self,
    id: &'a str,
    patch: ExperiencePatch,
  ) -> impl Future<Output = Result<Option<Experience>, Self::Error>> + Send + 'a;

  /// Physically delete an experience. Returns `false` if the id does
  /// not exist. Analytics events referencing it are left in place.
  fn delete<'a>(
    &'a self,
    id: &'a str,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + 'a;
}

// ─── Event store ─────────────────────────────────────────────────────────────

/// Abstraction over append-only analytics event storage.
pub trait EventStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Append an event stamped with the current time. Events are never
  /// deduplicated; repeated identical events are valid.
  fn record_event(
    &self,
    input: NewEvent,
  ) -> impl Future<Output = Result<AnalyticsEvent, Self::Error>> + Send + '_;

  /// Count events recorded at or after `since`, grouped by
  /// `(experience_id, event_name)`.
  fn summarize(
    &self,
    since: DateTime<Utc>,
  ) -> impl Future<Output = Result<Vec<EventCount>, Self::Error>> + Send + '_;
}
