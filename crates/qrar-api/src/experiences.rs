//! Handlers for `/experiences` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/experiences` | `?search=&type=&page=&pageSize=&onlyActive=` |
//! | `GET`    | `/experiences/all` | active only, unpaginated |
//! | `GET`    | `/experiences/:id` | 404 if not found |
//! | `POST`   | `/experiences` | 201 + Location header |
//! | `PUT`    | `/experiences/:id` | 404 before validation; 400 with field errors |
//! | `DELETE` | `/experiences/:id` | 204, or 404 if not found |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
  http::{StatusCode, header},
  response::IntoResponse,
};
use qrar_core::{
  experience::{Experience, ExperienceKind, ExperienceUpdate, NewExperience},
  query::ExperienceQuery,
  store::{ExperiencePage, ExperienceStore},
};
use serde::Deserialize;

use crate::error::ApiError;

// ─── List ────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
  pub search:      Option<String>,
  /// Kept as a raw string: an unknown kind filters to zero matches
  /// rather than failing the request.
  #[serde(rename = "type")]
  pub kind:        Option<String>,
  pub page:        Option<i64>,
  pub page_size:   Option<i64>,
  pub only_active: Option<bool>,
}

/// `GET /experiences?search=&type=&page=&pageSize=&onlyActive=`
pub async fn list<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<ExperiencePage>, ApiError>
where
  S: ExperienceStore,
{
  let kind = match params.kind.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
    None => None,
    Some(s) => match ExperienceKind::parse(s) {
      Some(kind) => Some(kind),
      // No row can carry an unknown kind, so skip the query entirely.
      None => {
        let q = ExperienceQuery::new(
          params.search,
          None,
          params.page,
          params.page_size,
          params.only_active,
        );
        return Ok(Json(ExperiencePage {
          total:     0,
          page:      q.page,
          page_size: q.page_size,
          items:     vec![],
        }));
      }
    },
  };

  let query = ExperienceQuery::new(
    params.search,
    kind,
    params.page,
    params.page_size,
    params.only_active,
  );

  let page = store
    .list(&query)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(page))
}

/// `GET /experiences/all` — every active experience, newest first.
pub async fn list_active<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<Experience>>, ApiError>
where
  S: ExperienceStore,
{
  let experiences = store
    .list_active()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(experiences))
}

// ─── Get one ─────────────────────────────────────────────────────────────────

/// `GET /experiences/:id`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
) -> Result<Json<Experience>, ApiError>
where
  S: ExperienceStore,
{
  let experience = store
    .get(&id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound(format!("experience {id} not found")))?;
  Ok(Json(experience))
}

// ─── Create ──────────────────────────────────────────────────────────────────

/// `POST /experiences`
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<NewExperience>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ExperienceStore,
{
  let experience = store
    .create(body)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  let location = format!("/experiences/{}", experience.id);
  Ok((
    StatusCode::CREATED,
    [(header::LOCATION, location)],
    Json(experience),
  ))
}

// ─── Update ──────────────────────────────────────────────────────────────────

/// `PUT /experiences/:id`
pub async fn update<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
  Json(body): Json<ExperienceUpdate>,
) -> Result<Json<Experience>, ApiError>
where
  S: ExperienceStore,
{
  // An unknown id is reported as NotFound, not as validation errors.
  if store
    .get(&id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .is_none()
  {
    return Err(ApiError::NotFound(format!("experience {id} not found")));
  }

  let patch = body.validate().map_err(ApiError::Validation)?;

  let updated = store
    .update(&id, patch)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound(format!("experience {id} not found")))?;
  Ok(Json(updated))
}

// ─── Delete ──────────────────────────────────────────────────────────────────

/// `DELETE /experiences/:id`
pub async fn delete_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
) -> Result<StatusCode, ApiError>
where
  S: ExperienceStore,
{
  let deleted = store
    .delete(&id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  if deleted {
    Ok(StatusCode::NO_CONTENT)
  } else {
    Err(ApiError::NotFound(format!("experience {id} not found")))
  }
}
