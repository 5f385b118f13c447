//! [`SqliteStore`] — the SQLite implementation of [`ExperienceStore`]
//! and [`EventStore`].

use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::OptionalExtension as _;

use qrar_core::{
  event::{AnalyticsEvent, EventCount, NewEvent},
  experience::{Experience, ExperiencePatch, NewExperience},
  query::ExperienceQuery,
  store::{EventStore, ExperiencePage, ExperienceStore},
};

use crate::{
  Error, Result,
  encode::{RawExperience, encode_dt, encode_kind, raw_experience_row},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// Experience and event storage backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Total number of stored experiences, ignoring all filters. Used by
  /// the server to decide whether to seed demo content.
  pub async fn experience_count(&self) -> Result<i64> {
    let count = self
      .conn
      .call(|conn| {
        Ok(conn.query_row("SELECT COUNT(*) FROM experiences", [], |row| row.get(0))?)
      })
      .await?;
    Ok(count)
  }

  /// Append an event with an explicit timestamp. Production writes go
  /// through [`EventStore::record_event`], which always stamps now.
  #[cfg(test)]
  pub(crate) async fn record_event_at(
    &self,
    experience_id: &str,
    event_name: &str,
    at: DateTime<Utc>,
  ) -> Result<()> {
    let experience_id = experience_id.to_owned();
    let event_name = event_name.to_owned();
    let at_str = encode_dt(at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO events (experience_id, event_name, created_at)
           VALUES (?1, ?2, ?3)",
          rusqlite::params![experience_id, event_name, at_str],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── ExperienceStore impl ────────────────────────────────────────────────────

impl ExperienceStore for SqliteStore {
  type Error = Error;

  async fn create(&self, input: NewExperience) -> Result<Experience> {
    let experience = input.into_experience(Utc::now());

    let id_str        = experience.id.clone();
    let title         = experience.title.clone();
    let kind_str      = encode_kind(experience.kind).to_owned();
    let media_url     = experience.media_url.clone();
    let thumbnail_url = experience.thumbnail_url.clone();
    let is_active     = experience.is_active;
    let at_str        = encode_dt(experience.created_at_utc);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO experiences (
             experience_id, title, kind, media_url, thumbnail_url,
             is_active, created_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
          rusqlite::params![
            id_str,
            title,
            kind_str,
            media_url,
            thumbnail_url,
            is_active,
            at_str,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(experience)
  }

  async fn get(&self, id: &str) -> Result<Option<Experience>> {
    let id_str = id.to_owned();

    let raw: Option<RawExperience> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            "SELECT experience_id, title, kind, media_url, thumbnail_url,
                    is_active, created_at
             FROM experiences WHERE experience_id = ?1",
            rusqlite::params![id_str],
            raw_experience_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawExperience::into_experience).transpose()
  }

  async fn list(&self, query: &ExperienceQuery) -> Result<ExperiencePage> {
    let search_pat  = query.search.as_deref().map(|s| format!("%{s}%"));
    let kind_str    = query.kind.map(|k| encode_kind(k).to_owned());
    let only_active = query.only_active;
    let page        = query.page;
    let page_size   = query.page_size;
    let offset      = query.offset();

    let (total, raws): (i64, Vec<RawExperience>) = self
      .conn
      .call(move |conn| {
        // Build WHERE clause dynamically; all filters are conjunctive.
        // SQLite LIKE is case-insensitive for ASCII, which is the
        // matching discipline we document for `search`.
        let mut conds: Vec<&'static str> = vec![];
        let mut args: Vec<Box<dyn rusqlite::ToSql>> = vec![];

        if let Some(pat) = search_pat {
          conds.push("(title LIKE ? OR experience_id LIKE ?)");
          args.push(Box::new(pat.clone()));
          args.push(Box::new(pat));
        }
        if let Some(kind) = kind_str {
          conds.push("kind = ?");
          args.push(Box::new(kind));
        }
        if only_active {
          conds.push("is_active = 1");
        }

        let where_clause = if conds.is_empty() {
          String::new()
        } else {
          format!("WHERE {}", conds.join(" AND "))
        };

        // Full filtered count, before pagination.
        let total: i64 = conn.query_row(
          &format!("SELECT COUNT(*) FROM experiences {where_clause}"),
          rusqlite::params_from_iter(args.iter().map(|a| a.as_ref())),
          |row| row.get(0),
        )?;

        let sql = format!(
          "SELECT experience_id, title, kind, media_url, thumbnail_url,
                  is_active, created_at
           FROM experiences {where_clause}
           ORDER BY created_at DESC
           LIMIT ? OFFSET ?"
        );
        args.push(Box::new(page_size));
        args.push(Box::new(offset));

        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(
            rusqlite::params_from_iter(args.iter().map(|a| a.as_ref())),
            raw_experience_row,
          )?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok((total, rows))
      })
      .await?;

    let items = raws
      .into_iter()
      .map(RawExperience::into_experience)
      .collect::<Result<_>>()?;

    Ok(ExperiencePage { total, page, page_size, items })
  }

  async fn list_active(&self) -> Result<Vec<Experience>> {
    let raws: Vec<RawExperience> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT experience_id, title, kind, media_url, thumbnail_url,
                  is_active, created_at
           FROM experiences
           WHERE is_active = 1
           ORDER BY created_at DESC",
        )?;
        let rows = stmt
          .query_map([], raw_experience_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawExperience::into_experience).collect()
  }

  async fn update(&self, id: &str, patch: ExperiencePatch) -> Result<Option<Experience>> {
    let id_str        = id.to_owned();
    let title         = patch.title;
    let kind_str      = encode_kind(patch.kind).to_owned();
    let media_url     = patch.media_url;
    let thumbnail_url = patch.thumbnail_url;
    let is_active     = patch.is_active;

    let changed = self
      .conn
      .call(move |conn| {
        // experience_id and created_at are never touched.
        Ok(conn.execute(
          "UPDATE experiences
           SET title = ?1, kind = ?2, media_url = ?3,
               thumbnail_url = ?4, is_active = ?5
           WHERE experience_id = ?6",
          rusqlite::params![
            title,
            kind_str,
            media_url,
            thumbnail_url,
            is_active,
            id_str,
          ],
        )?)
      })
      .await?;

    if changed == 0 {
      return Ok(None);
    }
    self.get(id).await
  }

  async fn delete(&self, id: &str) -> Result<bool> {
    let id_str = id.to_owned();

    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM experiences WHERE experience_id = ?1",
          rusqlite::params![id_str],
        )?)
      })
      .await?;

    Ok(changed > 0)
  }
}

// ─── EventStore impl ─────────────────────────────────────────────────────────

impl EventStore for SqliteStore {
  type Error = Error;

  async fn record_event(&self, input: NewEvent) -> Result<AnalyticsEvent> {
    let created_at_utc = Utc::now();
    let at_str = encode_dt(created_at_utc);
    let experience_id = input.experience_id;
    let event_name = input.event_name;

    let (id, experience_id, event_name) = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO events (experience_id, event_name, created_at)
           VALUES (?1, ?2, ?3)",
          rusqlite::params![experience_id, event_name, at_str],
        )?;
        Ok((conn.last_insert_rowid(), experience_id, event_name))
      })
      .await?;

    Ok(AnalyticsEvent { id, experience_id, event_name, created_at_utc })
  }

  async fn summarize(&self, since: DateTime<Utc>) -> Result<Vec<EventCount>> {
    let since_str = encode_dt(since);

    let rows: Vec<(String, String, i64)> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT experience_id, event_name, COUNT(*)
           FROM events
           WHERE created_at >= ?1
           GROUP BY experience_id, event_name",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![since_str], |row| {
            Ok((row.get(0)?, row.get(1)?, row.get(2)?))
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(
      rows
        .into_iter()
        .map(|(experience_id, event_name, count)| EventCount {
          experience_id,
          event_name,
          count: count as u64,
        })
        .collect(),
    )
  }
}
