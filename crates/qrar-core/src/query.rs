//! Query parameters for the paginated experience listing.
//!
//! Normalization happens once, at construction, so every store backend
//! sees the same clamped values and the rules are testable without a
//! database.

use crate::experience::ExperienceKind;

pub const DEFAULT_PAGE_SIZE: i64 = 20;
pub const MAX_PAGE_SIZE: i64 = 100;

/// Normalized parameters for a filtered, paginated experience listing.
///
/// All filters are conjunctive. `search` matches as a case-insensitive
/// substring against the title or the id.
#[derive(Debug, Clone)]
pub struct ExperienceQuery {
  pub search:      Option<String>,
  pub kind:        Option<ExperienceKind>,
  /// 1-based page number; always >= 1 after construction.
  pub page:        i64,
  /// Always within [1, 100] after construction.
  pub page_size:   i64,
  pub only_active: bool,
}

impl ExperienceQuery {
  /// Build a query, clamping `page` to >= 1 and replacing any
  /// `page_size` outside [1, 100] with the default of 20. Blank search
  /// strings are treated as absent.
  pub fn new(
    search:      Option<String>,
    kind:        Option<ExperienceKind>,
    page:        Option<i64>,
    page_size:   Option<i64>,
    only_active: Option<bool>,
  ) -> Self {
    let page = match page {
      Some(p) if p > 0 => p,
      _ => 1,
    };
    let page_size = match page_size {
      Some(s) if (1..=MAX_PAGE_SIZE).contains(&s) => s,
      _ => DEFAULT_PAGE_SIZE,
    };
    let search = search.filter(|s| !s.trim().is_empty());

    Self {
      search,
      kind,
      page,
      page_size,
      only_active: only_active.unwrap_or(false),
    }
  }

  /// Number of rows to skip before the current page.
  pub fn offset(&self) -> i64 { (self.page - 1) * self.page_size }
}

impl Default for ExperienceQuery {
  fn default() -> Self { Self::new(None, None, None, None, None) }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
