//! JSON REST API for the QR-AR experience service.
//!
//! Exposes an axum [`Router`] backed by any store implementing
//! [`qrar_core::store::ExperienceStore`] and
//! [`qrar_core::store::EventStore`]. CORS, tracing, and transport
//! concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! axum::serve(listener, qrar_api::api_router(store.clone())).await?;
//! ```

pub mod analytics;
pub mod error;
pub mod experiences;

use std::sync::Arc;

use axum::{
  Json,
  Router,
  routing::{get, post},
};
use qrar_core::store::{EventStore, ExperienceStore};
use serde_json::json;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router
/// regardless of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: ExperienceStore + EventStore + Clone + Send + Sync + 'static,
{
  Router::new()
    // Experiences
    .route(
      "/experiences",
      get(experiences::list::<S>).post(experiences::create::<S>),
    )
    .route("/experiences/all", get(experiences::list_active::<S>))
    .route(
      "/experiences/{id}",
      get(experiences::get_one::<S>)
        .put(experiences::update::<S>)
        .delete(experiences::delete_one::<S>),
    )
    // Analytics
    .route("/analytics/{event_name}/{id}", post(analytics::record::<S>))
    .route("/analytics/summary", get(analytics::summary::<S>))
    // Liveness
    .route("/health", get(health))
    .with_state(store)
}

async fn health() -> Json<serde_json::Value> { Json(json!({ "status": "ok" })) }

// ─── Tests ───────────────────────────────────────────────────────────────────
