//! Server wiring for the Rankboard dashboard.
//!
//! Loads the profile snapshot handed over by the session provider, holds it
//! in an [`InMemorySession`], and mounts the JSON API under `/api`.

pub mod dashboard;
pub mod error;

pub use error::{Error, Result};

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use axum::Router;
use rankboard_api::{ApiSettings, InMemorySession, api_router};
use rankboard_core::{
  history::DEFAULT_HISTORY_LIMIT,
  profile::{GameMode, Profile},
};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

// ─── Configuration ───────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `rankboard.toml` and
/// `RANKBOARD_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:          String,
  #[serde(default = "default_port")]
  pub port:          u16,
  /// JSON profile snapshot to serve.
  pub profile_path:  PathBuf,
  #[serde(default = "default_history_limit")]
  pub history_limit: usize,
  #[serde(default = "default_history_mode")]
  pub history_mode:  GameMode,
}

fn default_host() -> String { "127.0.0.1".to_owned() }
fn default_port() -> u16 { 5240 }
fn default_history_limit() -> usize { DEFAULT_HISTORY_LIMIT }
fn default_history_mode() -> GameMode { GameMode::Ranked }

impl ServerConfig {
  /// Read `path` (optional) layered under `RANKBOARD_*` environment
  /// variables.
  pub fn load(path: &Path) -> Result<Self> {
    Self::from_source(config::File::from(path).required(false))
  }

  fn from_source<S>(file: S) -> Result<Self>
  where
    S: config::Source + Send + Sync + 'static,
  {
    let settings = config::Config::builder()
      .add_source(file)
      .add_source(config::Environment::with_prefix("RANKBOARD"))
      .build()?;
    Ok(settings.try_deserialize()?)
  }

  pub fn api_settings(&self) -> ApiSettings {
    ApiSettings {
      history_limit: self.history_limit,
      history_mode:  self.history_mode,
    }
  }
}

// ─── Snapshot ────────────────────────────────────────────────────────────────

/// Read a JSON [`Profile`] from disk. A leading `~/` is expanded.
pub fn load_profile(path: &Path) -> Result<Profile> {
  let path = expand_tilde(path);
  let raw = std::fs::read_to_string(&path)
    .map_err(|source| Error::Io { path, source })?;
  Ok(serde_json::from_str(&raw)?)
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

// ─── Router ──────────────────────────────────────────────────────────────────

/// Build the top-level router: the JSON API under `/api`, with request
/// tracing.
pub fn router(session: Arc<InMemorySession>, settings: ApiSettings) -> Router {
  Router::new()
    .nest("/api", api_router(session, settings))
    .layer(TraceLayer::new_for_http())
}
