//! JSON API for the Rankboard profile dashboard.
//!
//! Exposes an axum [`Router`] backed by any
//! [`rankboard_core::session::ProfileSession`]. Auth, TLS, and transport
//! concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", rankboard_api::api_router(session.clone(), settings))
//! ```

pub mod error;
pub mod profile;
pub mod session;

use std::sync::Arc;

use axum::{Router, routing::get};
use rankboard_core::{
  history::DEFAULT_HISTORY_LIMIT,
  profile::GameMode,
  session::ProfileSession,
};
use tokio::sync::Mutex;

pub use error::ApiError;
pub use session::InMemorySession;

// ─── Settings ────────────────────────────────────────────────────────────────

/// Defaults applied when a request leaves history parameters out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApiSettings {
  pub history_limit: usize,
  pub history_mode:  GameMode,
}

impl Default for ApiSettings {
  fn default() -> Self {
    Self {
      history_limit: DEFAULT_HISTORY_LIMIT,
      history_mode:  GameMode::Ranked,
    }
  }
}

// ─── State ───────────────────────────────────────────────────────────────────

/// Shared state threaded through all handlers.
pub struct ApiState<S> {
  pub session:   Arc<S>,
  pub settings:  ApiSettings,
  /// Held for the duration of an edit so there is a single writer.
  pub edit_lock: Arc<Mutex<()>>,
}

// Manual impl: `S` itself need not be `Clone`.
impl<S> Clone for ApiState<S> {
  fn clone(&self) -> Self {
    Self {
      session:   self.session.clone(),
      settings:  self.settings,
      edit_lock: self.edit_lock.clone(),
    }
  }
}

// ─── Router ──────────────────────────────────────────────────────────────────

/// Build a fully-materialised API router for `session`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(session: Arc<S>, settings: ApiSettings) -> Router<()>
where
  S: ProfileSession + 'static,
{
  let state = ApiState {
    session,
    settings,
    edit_lock: Arc::new(Mutex::new(())),
  };

  Router::new()
    .route(
      "/profile",
      get(profile::get_profile::<S>).patch(profile::edit_profile::<S>),
    )
    .route("/profile/progress", get(profile::get_progress::<S>))
    .route("/profile/history", get(profile::get_history::<S>))
    .with_state(state)
}
