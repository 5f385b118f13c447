//! qrar-server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), opens an
//! in-process SQLite store, and serves the experience and analytics API
//! over HTTP. CORS origins come from configuration; no ambient globals.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use anyhow::Context as _;
use axum::http::HeaderValue;
use clap::Parser;
use qrar_core::{
  experience::{ExperienceKind, NewExperience},
  store::ExperienceStore as _,
};
use qrar_store_sqlite::SqliteStore;
use serde::Deserialize;
use tokio::net::TcpListener;
use tower_http::{
  cors::{Any, AllowOrigin, CorsLayer},
  trace::TraceLayer,
};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── Configuration ───────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` layered
/// with `QRAR_*` environment variables.
#[derive(Deserialize, Clone)]
struct ServerConfig {
  host:       String,
  port:       u16,
  store_path: PathBuf,
  /// Origins allowed to call the API cross-origin (admin UI, AR viewer).
  #[serde(default)]
  allowed_origins: Vec<String>,
  /// Insert a demo experience when the store is empty.
  #[serde(default)]
  seed_demo: bool,
}

#[derive(Parser)]
#[command(author, version, about = "QR-AR experience API server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  // Load configuration.
  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("QRAR"))
    .build()
    .context("failed to read config file")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  // Expand `~` in store path.
  let store_path = expand_tilde(&server_cfg.store_path);

  // Open SQLite store.
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  if server_cfg.seed_demo {
    seed_demo(&store).await?;
  }

  let cors = cors_layer(&server_cfg.allowed_origins)?;

  let app = qrar_api::api_router(Arc::new(store))
    .layer(TraceLayer::new_for_http())
    .layer(cors);

  let address = format!("{}:{}", server_cfg.host, server_cfg.port);

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}

/// Build the CORS layer from the configured origin list. An empty list
/// means no cross-origin access is granted.
fn cors_layer(origins: &[String]) -> anyhow::Result<CorsLayer> {
  let parsed = origins
    .iter()
    .map(|o| {
      o.parse::<HeaderValue>()
        .with_context(|| format!("invalid allowed origin {o:?}"))
    })
    .collect::<anyhow::Result<Vec<_>>>()?;

  Ok(
    CorsLayer::new()
      .allow_origin(AllowOrigin::list(parsed))
      .allow_methods(Any)
      .allow_headers(Any),
  )
}

/// Insert one demo Video experience when the store holds nothing yet,
/// so a fresh install has something to render.
async fn seed_demo(store: &SqliteStore) -> anyhow::Result<()> {
  if store.experience_count().await? > 0 {
    return Ok(());
  }

  let demo = NewExperience {
    id:            Some("demo_video_01".to_owned()),
    title:         "Highlight MJ".to_owned(),
    kind:          ExperienceKind::Video,
    media_url:     "https://cdn.example/video/highlight.mp4".to_owned(),
    thumbnail_url: Some("https://cdn.example/thumbs/highlight.jpg".to_owned()),
    is_active:     true,
  };

  let seeded = store.create(demo).await?;
  tracing::info!("seeded demo experience {}", seeded.id);
  Ok(())
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
