//! Analytics summary shaping: window normalization and the pivot from
//! grouped `(experience_id, event_name, count)` rows into the nested
//! per-experience map served to clients.

use std::collections::HashMap;

use crate::event::EventCount;

pub const DEFAULT_SUMMARY_DAYS: i64 = 30;
pub const MAX_SUMMARY_DAYS: i64 = 365;

/// Nested summary map: outer key is the experience id, inner key the
/// event name, value the count within the window.
pub type Summary = HashMap<String, HashMap<String, u64>>;

/// Clamp the summary window: anything outside (0, 365] becomes 30 days.
pub fn normalize_days(days: Option<i64>) -> i64 {
  match days {
    Some(d) if d > 0 && d <= MAX_SUMMARY_DAYS => d,
    _ => DEFAULT_SUMMARY_DAYS,
  }
}

/// Pivot grouped count rows into the nested summary map. Experiences
/// with no rows simply do not appear; key order is not significant.
pub fn pivot(rows: Vec<EventCount>) -> Summary {
  let mut summary = Summary::new();
  for row in rows {
    summary
      .entry(row.experience_id)
      .or_default()
      .insert(row.event_name, row.count);
  }
  summary
}

// ─── Tests ───────────────────────────────────────────────────────────────────
