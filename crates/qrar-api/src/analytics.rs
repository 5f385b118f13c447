//! Handlers for `/analytics` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/analytics/:eventName/:id` | 202; 400 when either segment is blank |
//! | `GET`  | `/analytics/summary?days=` | nested `{experienceId: {eventName: count}}` |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
};
use chrono::{Duration, Utc};
use qrar_core::{
  event::NewEvent,
  store::EventStore,
  summary::{self, Summary},
};
use serde::Deserialize;

use crate::error::ApiError;

// ─── Record ──────────────────────────────────────────────────────────────────

/// `POST /analytics/:event_name/:id`
///
/// Appends one event stamped with the current time. The stored entity
/// is not echoed back.
pub async fn record<S>(
  State(store): State<Arc<S>>,
  Path((event_name, id)): Path<(String, String)>,
) -> Result<StatusCode, ApiError>
where
  S: EventStore,
{
  if event_name.trim().is_empty() || id.trim().is_empty() {
    return Err(ApiError::BadRequest(
      "eventName and experienceId are required".to_owned(),
    ));
  }

  store
    .record_event(NewEvent { experience_id: id, event_name })
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  Ok(StatusCode::ACCEPTED)
}

// ─── Summary ─────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, Default)]
pub struct SummaryParams {
  pub days: Option<i64>,
}

/// `GET /analytics/summary[?days=N]` — grouped event counts within the
/// window, pivoted per experience.
pub async fn summary<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<SummaryParams>,
) -> Result<Json<Summary>, ApiError>
where
  S: EventStore,
{
  let days = summary::normalize_days(params.days);
  let since = Utc::now() - Duration::days(days);

  let rows = store
    .summarize(since)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  Ok(Json(summary::pivot(rows)))
}
