//! Analytics events — append-only observations tied to an experience id.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored analytics event. Rows are never updated or deleted, and the
/// `experience_id` is deliberately not a foreign key: events may outlive
/// the experience they reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsEvent {
  pub id:             i64,
  pub experience_id:  String,
  pub event_name:     String,
  pub created_at_utc: DateTime<Utc>,
}

/// Input for recording an event. The store stamps the timestamp.
///
/// `event_name` is free text; observed values are `scan`, `view-started`
/// and `view-completed`, but nothing is enforced beyond non-blankness.
#[derive(Debug, Clone)]
pub struct NewEvent {
  pub experience_id: String,
  pub event_name:    String,
}

/// One grouped row of the analytics summary query:
/// how many `event_name` events a single experience received.
#[derive(Debug, Clone, PartialEq)]
pub struct EventCount {
  pub experience_id: String,
  pub event_name:    String,
  pub count:         u64,
}
