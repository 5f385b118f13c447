//! Integration tests for `SqliteStore` against an in-memory database.

use chrono::{Duration, Utc};
use qrar_core::{
  event::NewEvent,
  experience::{ExperienceKind, ExperiencePatch, NewExperience},
  query::ExperienceQuery,
  store::{EventStore, ExperienceStore},
  summary,
};

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn new_experience(title: &str, kind: ExperienceKind) -> NewExperience {
  NewExperience {
    id:            None,
    title:         title.into(),
    kind,
    media_url:     "https://cdn.example/media/a.mp4".into(),
    thumbnail_url: None,
    is_active:     true,
  }
}

fn patch_from(e: &qrar_core::experience::Experience) -> ExperiencePatch {
  ExperiencePatch {
    title:         e.title.clone(),
    kind:          e.kind,
    media_url:     e.media_url.clone(),
    thumbnail_url: e.thumbnail_url.clone(),
    is_active:     e.is_active,
  }
}

// ─── Create / get ────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_and_get_round_trip() {
  let s = store().await;

  let created = s
    .create(new_experience("Highlight MJ", ExperienceKind::Video))
    .await
    .unwrap();

  let fetched = s.get(&created.id).await.unwrap().unwrap();
  assert_eq!(fetched, created);
  assert_eq!(fetched.title, "Highlight MJ");
  assert_eq!(fetched.kind, ExperienceKind::Video);
  assert!(fetched.is_active);
}

#[tokio::test]
async fn get_missing_returns_none() {
  let s = store().await;
  assert!(s.get("nope").await.unwrap().is_none());
}

#[tokio::test]
async fn create_generates_id_when_absent() {
  let s = store().await;
  let created = s
    .create(new_experience("T", ExperienceKind::Image))
    .await
    .unwrap();
  assert_eq!(created.id.len(), 32);
}

#[tokio::test]
async fn create_keeps_caller_id() {
  let s = store().await;
  let created = s
    .create(NewExperience {
      id: Some("demo_video_01".into()),
      ..new_experience("Demo", ExperienceKind::Video)
    })
    .await
    .unwrap();
  assert_eq!(created.id, "demo_video_01");
  assert!(s.get("demo_video_01").await.unwrap().is_some());
}

// ─── Listing ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn list_sorts_newest_first() {
  let s = store().await;
  let first = s.create(new_experience("old", ExperienceKind::Video)).await.unwrap();
  let second = s.create(new_experience("new", ExperienceKind::Video)).await.unwrap();

  let page = s.list(&ExperienceQuery::default()).await.unwrap();
  assert_eq!(page.total, 2);
  assert_eq!(page.items[0].id, second.id);
  assert_eq!(page.items[1].id, first.id);
}

#[tokio::test]
async fn list_paginates_and_keeps_total() {
  let s = store().await;
  for i in 0..5 {
    s.create(new_experience(&format!("exp {i}"), ExperienceKind::Video))
      .await
      .unwrap();
  }

  let q = ExperienceQuery::new(None, None, Some(2), Some(2), None);
  let page = s.list(&q).await.unwrap();
  assert_eq!(page.total, 5);
  assert_eq!(page.page, 2);
  assert_eq!(page.page_size, 2);
  assert_eq!(page.items.len(), 2);
}

#[tokio::test]
async fn list_beyond_last_page_is_empty_with_same_total() {
  let s = store().await;
  for i in 0..3 {
    s.create(new_experience(&format!("exp {i}"), ExperienceKind::Video))
      .await
      .unwrap();
  }

  let q = ExperienceQuery::new(None, None, Some(9), Some(20), None);
  let page = s.list(&q).await.unwrap();
  assert_eq!(page.total, 3);
  assert!(page.items.is_empty());
}

#[tokio::test]
async fn list_search_matches_title_case_insensitively() {
  let s = store().await;
  s.create(new_experience("Highlight MJ", ExperienceKind::Video)).await.unwrap();
  s.create(new_experience("Museum tour", ExperienceKind::Model3D)).await.unwrap();

  let q = ExperienceQuery::new(Some("highlight".into()), None, None, None, None);
  let page = s.list(&q).await.unwrap();
  assert_eq!(page.total, 1);
  assert_eq!(page.items[0].title, "Highlight MJ");
}

#[tokio::test]
async fn list_search_matches_id_substring() {
  let s = store().await;
  s.create(NewExperience {
    id: Some("demo_video_01".into()),
    ..new_experience("T", ExperienceKind::Video)
  })
  .await
  .unwrap();
  s.create(new_experience("Other", ExperienceKind::Video)).await.unwrap();

  let q = ExperienceQuery::new(Some("demo_".into()), None, None, None, None);
  let page = s.list(&q).await.unwrap();
  assert_eq!(page.total, 1);
  assert_eq!(page.items[0].id, "demo_video_01");
}

#[tokio::test]
async fn list_filters_are_conjunctive() {
  let s = store().await;
  s.create(new_experience("AR statue", ExperienceKind::Model3D)).await.unwrap();
  s.create(new_experience("AR trailer", ExperienceKind::Video)).await.unwrap();
  s.create(NewExperience {
    is_active: false,
    ..new_experience("AR statue retired", ExperienceKind::Model3D)
  })
  .await
  .unwrap();

  let q = ExperienceQuery::new(
    Some("statue".into()),
    Some(ExperienceKind::Model3D),
    None,
    None,
    Some(true),
  );
  let page = s.list(&q).await.unwrap();
  assert_eq!(page.total, 1);
  assert_eq!(page.items[0].title, "AR statue");
}

#[tokio::test]
async fn list_total_is_pre_pagination_count() {
  let s = store().await;
  for i in 0..4 {
    s.create(new_experience(&format!("statue {i}"), ExperienceKind::Model3D))
      .await
      .unwrap();
  }
  s.create(new_experience("trailer", ExperienceKind::Video)).await.unwrap();

  let q = ExperienceQuery::new(
    Some("statue".into()),
    None,
    Some(1),
    Some(2),
    None,
  );
  let page = s.list(&q).await.unwrap();
  assert_eq!(page.total, 4);
  assert_eq!(page.items.len(), 2);
}

#[tokio::test]
async fn list_active_excludes_inactive() {
  let s = store().await;
  s.create(new_experience("live", ExperienceKind::Video)).await.unwrap();
  s.create(NewExperience {
    is_active: false,
    ..new_experience("retired", ExperienceKind::Video)
  })
  .await
  .unwrap();

  let active = s.list_active().await.unwrap();
  assert_eq!(active.len(), 1);
  assert_eq!(active[0].title, "live");
}

// ─── Update ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn update_overwrites_mutable_fields_only() {
  let s = store().await;
  let created = s
    .create(new_experience("before", ExperienceKind::Video))
    .await
    .unwrap();

  let updated = s
    .update(&created.id, ExperiencePatch {
      title:         "after".into(),
      kind:          ExperienceKind::Message,
      media_url:     "https://cdn.example/msg".into(),
      thumbnail_url: Some("https://cdn.example/thumb.jpg".into()),
      is_active:     false,
    })
    .await
    .unwrap()
    .unwrap();

  assert_eq!(updated.id, created.id);
  assert_eq!(updated.created_at_utc, created.created_at_utc);
  assert_eq!(updated.title, "after");
  assert_eq!(updated.kind, ExperienceKind::Message);
  assert!(!updated.is_active);
}

#[tokio::test]
async fn update_is_idempotent() {
  let s = store().await;
  let created = s
    .create(new_experience("T", ExperienceKind::Video))
    .await
    .unwrap();

  let patch = ExperiencePatch {
    title:         "stable".into(),
    kind:          ExperienceKind::Image,
    media_url:     "https://cdn.example/a.png".into(),
    thumbnail_url: None,
    is_active:     true,
  };

  let once = s.update(&created.id, patch.clone()).await.unwrap().unwrap();
  let twice = s.update(&created.id, patch).await.unwrap().unwrap();
  assert_eq!(once, twice);
}

#[tokio::test]
async fn update_missing_returns_none() {
  let s = store().await;
  let e = s.create(new_experience("T", ExperienceKind::Video)).await.unwrap();
  let result = s.update("missing", patch_from(&e)).await.unwrap();
  assert!(result.is_none());
}

// ─── Delete ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn delete_removes_row() {
  let s = store().await;
  let created = s.create(new_experience("T", ExperienceKind::Video)).await.unwrap();

  assert!(s.delete(&created.id).await.unwrap());
  assert!(s.get(&created.id).await.unwrap().is_none());
}

#[tokio::test]
async fn delete_missing_returns_false() {
  let s = store().await;
  assert!(!s.delete("missing").await.unwrap());
}

#[tokio::test]
async fn delete_leaves_events_orphaned() {
  let s = store().await;
  let created = s.create(new_experience("T", ExperienceKind::Video)).await.unwrap();
  s.record_event(NewEvent {
    experience_id: created.id.clone(),
    event_name:    "scan".into(),
  })
  .await
  .unwrap();

  s.delete(&created.id).await.unwrap();

  let rows = s.summarize(Utc::now() - Duration::days(1)).await.unwrap();
  assert_eq!(rows.len(), 1);
  assert_eq!(rows[0].experience_id, created.id);
}

// ─── Events ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn record_event_stamps_and_returns_entity() {
  let s = store().await;
  let event = s
    .record_event(NewEvent {
      experience_id: "E1".into(),
      event_name:    "scan".into(),
    })
    .await
    .unwrap();

  assert!(event.id > 0);
  assert_eq!(event.experience_id, "E1");
  assert_eq!(event.event_name, "scan");
}

#[tokio::test]
async fn duplicate_events_are_all_kept() {
  let s = store().await;
  for _ in 0..3 {
    s.record_event(NewEvent {
      experience_id: "E1".into(),
      event_name:    "scan".into(),
    })
    .await
    .unwrap();
  }

  let rows = s.summarize(Utc::now() - Duration::days(1)).await.unwrap();
  assert_eq!(rows.len(), 1);
  assert_eq!(rows[0].count, 3);
}

#[tokio::test]
async fn summarize_respects_window() {
  let s = store().await;
  let now = Utc::now();

  s.record_event_at("E1", "scan", now - Duration::days(31)).await.unwrap();
  s.record_event_at("E1", "scan", now - Duration::days(1)).await.unwrap();

  let rows = s.summarize(now - Duration::days(30)).await.unwrap();
  assert_eq!(rows.len(), 1);
  assert_eq!(rows[0].count, 1);
}

#[tokio::test]
async fn summary_scenario_pivots_per_experience() {
  let s = store().await;
  let e1 = s
    .create(NewExperience {
      id: None,
      title: "T".into(),
      kind: ExperienceKind::Video,
      media_url: "https://x/a.mp4".into(),
      thumbnail_url: None,
      is_active: true,
    })
    .await
    .unwrap();

  for _ in 0..3 {
    s.record_event(NewEvent {
      experience_id: e1.id.clone(),
      event_name:    "scan".into(),
    })
    .await
    .unwrap();
  }
  s.record_event(NewEvent {
    experience_id: e1.id.clone(),
    event_name:    "view-started".into(),
  })
  .await
  .unwrap();

  let rows = s.summarize(Utc::now() - Duration::days(30)).await.unwrap();
  let pivoted = summary::pivot(rows);

  assert_eq!(pivoted.len(), 1);
  assert_eq!(pivoted[&e1.id]["scan"], 3);
  assert_eq!(pivoted[&e1.id]["view-started"], 1);
}
