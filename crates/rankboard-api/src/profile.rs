//! Handlers for `/profile` endpoints.
//!
//! | Method  | Path | Notes |
//! |---------|------|-------|
//! | `GET`   | `/profile` | Canonical profile |
//! | `PATCH` | `/profile` | Body: [`ProfileEdit`]; 422 on a failing field |
//! | `GET`   | `/profile/progress` | [`ProgressView`]; 422 on bad counters |
//! | `GET`   | `/profile/history` | Optional `mode`, `limit`, `order` |

use axum::{
  Json,
  extract::{
    Query, State,
    rejection::{JsonRejection, QueryRejection},
  },
  response::{IntoResponse, Response},
};
use rankboard_core::{
  ProgressView,
  apply_edit,
  compute_progress,
  edit::ProfileEdit,
  history::{HistoryOrder, HistoryQuery, HistoryView, MatchRecord},
  profile::{GameMode, Profile},
  session::ProfileSession,
};
use serde::{Deserialize, Serialize};

use crate::{ApiState, error::ApiError};

fn session_error<E>(e: E) -> ApiError
where
  E: std::error::Error + Send + Sync + 'static,
{
  ApiError::Session(Box::new(e))
}

// ─── Get ─────────────────────────────────────────────────────────────────────

/// `GET /profile`
pub async fn get_profile<S>(
  State(state): State<ApiState<S>>,
) -> Result<Json<Profile>, ApiError>
where
  S: ProfileSession,
{
  let profile = state.session.current().await.map_err(session_error)?;
  Ok(Json(profile))
}

// ─── Edit ────────────────────────────────────────────────────────────────────

/// `PATCH /profile` — returns the updated profile.
///
/// Edits are serialised so a read-modify-write never interleaves with
/// another one.
pub async fn edit_profile<S>(
  State(state): State<ApiState<S>>,
  body: Result<Json<ProfileEdit>, JsonRejection>,
) -> Result<Json<Profile>, ApiError>
where
  S: ProfileSession,
{
  let Json(edit) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;

  let _writer = state.edit_lock.lock().await;
  let current = state.session.current().await.map_err(session_error)?;
  let updated = apply_edit(&current, &edit)?;
  tracing::info!(
    profile_id = %current.id,
    changed = ?edit.changes_from(&current).fields(),
    "profile edit accepted"
  );
  if updated != current {
    state
      .session
      .replace(updated.clone())
      .await
      .map_err(session_error)?;
  }

  Ok(Json(updated))
}

// ─── Progress ────────────────────────────────────────────────────────────────

/// `GET /profile/progress`
pub async fn get_progress<S>(
  State(state): State<ApiState<S>>,
) -> Result<Json<ProgressView>, ApiError>
where
  S: ProfileSession,
{
  let profile = state.session.current().await.map_err(session_error)?;
  let view = compute_progress(profile.progression.as_ref())?;
  Ok(Json(view))
}

// ─── History ─────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, Default)]
pub struct HistoryParams {
  /// `ranked`, `unranked` or `local`; defaults to the configured mode.
  pub mode:  Option<String>,
  pub limit: Option<usize>,
  pub order: Option<HistoryOrder>,
}

#[derive(Serialize)]
struct HistoryResponse<'a> {
  #[serde(flatten)]
  view:   HistoryView<'a>,
  record: MatchRecord,
}

/// `GET /profile/history[?mode=ranked][&limit=5][&order=most_recent_first]`
pub async fn get_history<S>(
  State(state): State<ApiState<S>>,
  params: Result<Query<HistoryParams>, QueryRejection>,
) -> Result<Response, ApiError>
where
  S: ProfileSession,
{
  let Query(params) =
    params.map_err(|e| ApiError::BadRequest(e.body_text()))?;

  let mode = match params.mode.as_deref() {
    Some(raw) => raw
      .parse::<GameMode>()
      .map_err(|_| ApiError::BadRequest(format!("unknown mode {raw:?}")))?,
    None => state.settings.history_mode,
  };

  let profile = state.session.current().await.map_err(session_error)?;
  let view = HistoryQuery::new(mode)
    .limit(params.limit.unwrap_or(state.settings.history_limit))
    .order(params.order.unwrap_or_default())
    .run(&profile.history);
  let record = view.record();

  Ok(Json(HistoryResponse { view, record }).into_response())
}
