//! Level/XP progress projection.
//!
//! [`compute_progress`] is the single place where absent progression is
//! defaulted and where the display ratio is bounded. Presentation code should
//! never read [`Progression`] fields directly.

use serde::Serialize;

use crate::{error::InvalidProgressionError, profile::Progression};

/// A throwaway projection of a player's progression for display. Never fed
/// back into a [`Profile`](crate::profile::Profile).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressView {
  /// Fill of the level bar, always within `[0, 1]`.
  pub ratio:         f64,
  pub level:         u32,
  /// Exact counters, since `ratio` alone is lossy.
  pub current_xp:    i64,
  pub next_level_xp: i64,
}

impl ProgressView {
  /// The view shown when upstream counters are unusable: the given level with
  /// an empty bar.
  pub fn fallback(level: u32) -> Self {
    Self {
      ratio:         0.0,
      level:         level.max(1),
      current_xp:    0,
      next_level_xp: Progression::DEFAULT_NEXT_LEVEL_XP,
    }
  }

  /// Whole percentage of the bar, rounded down.
  pub fn percent(&self) -> u8 { (self.ratio * 100.0).floor() as u8 }

  pub fn xp_remaining(&self) -> i64 {
    self.next_level_xp.saturating_sub(self.current_xp).max(0)
  }

  pub fn badge(&self) -> String { format!("Lv. {}", self.level) }
}

/// Project raw progression counters into a [`ProgressView`].
///
/// Absent progression is a level-1 player with an empty bar. A non-positive
/// `next_level_xp` is refused rather than divided by. `current_xp` may run
/// ahead of `next_level_xp` until the level-up lands upstream, so the ratio is
/// clamped.
pub fn compute_progress(
  progression: Option<&Progression>,
) -> Result<ProgressView, InvalidProgressionError> {
  let p = progression.copied().unwrap_or_default();

  if p.next_level_xp <= 0 {
    return Err(InvalidProgressionError {
      next_level_xp: p.next_level_xp,
    });
  }

  let ratio = (p.current_xp as f64 / p.next_level_xp as f64).clamp(0.0, 1.0);

  Ok(ProgressView {
    ratio,
    level: p.level.max(1),
    current_xp: p.current_xp,
    next_level_xp: p.next_level_xp,
  })
}

/// Like [`compute_progress`], but logs a corrupt progression block and falls
/// back to [`ProgressView::fallback`] instead of failing.
pub fn compute_progress_or_fallback(
  progression: Option<&Progression>,
) -> ProgressView {
  match compute_progress(progression) {
    Ok(view) => view,
    Err(e) => {
      let level = progression.map_or(1, |p| p.level);
      tracing::warn!(
        error = %e,
        level,
        "progression counters rejected, showing empty bar"
      );
      ProgressView::fallback(level)
    }
  }
}
