//! The canonical profile record and its embedded match history.
//!
//! A [`Profile`] is owned by the session layer. The core reads it and hands
//! back new values; `progression`, `rank`, `league_points` and `history` are
//! written only by game-result processing upstream.

use std::{fmt, sync::Arc};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use uuid::Uuid;

// ─── Progression ─────────────────────────────────────────────────────────────

/// Raw level/XP counters as reported by the progression system.
///
/// The counters are signed so that corrupt upstream values surface as an
/// [`InvalidProgressionError`](crate::InvalidProgressionError) instead of
/// wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Progression {
  pub level:         u32,
  pub current_xp:    i64,
  /// XP needed to complete the current level; must be positive.
  pub next_level_xp: i64,
}

impl Progression {
  pub const DEFAULT_NEXT_LEVEL_XP: i64 = 1000;
}

impl Default for Progression {
  /// A player with no progression history: level 1, empty bar.
  fn default() -> Self {
    Self {
      level:         1,
      current_xp:    0,
      next_level_xp: Self::DEFAULT_NEXT_LEVEL_XP,
    }
  }
}

// ─── Rank ────────────────────────────────────────────────────────────────────

/// Position on the ranked ladder. Serialised as a bare string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Rank {
  Unranked,
  /// A ladder tier, e.g. `"Gold II"`.
  Tier(String),
}

impl Rank {
  const UNRANKED: &'static str = "Unranked";

  pub fn is_ranked(&self) -> bool { matches!(self, Self::Tier(_)) }
}

impl From<String> for Rank {
  fn from(s: String) -> Self {
    if s == Self::UNRANKED {
      Self::Unranked
    } else {
      Self::Tier(s)
    }
  }
}

impl From<Rank> for String {
  fn from(rank: Rank) -> Self {
    match rank {
      Rank::Unranked => Rank::UNRANKED.to_owned(),
      Rank::Tier(tier) => tier,
    }
  }
}

impl fmt::Display for Rank {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Unranked => f.write_str(Self::UNRANKED),
      Self::Tier(tier) => f.write_str(tier),
    }
  }
}

// ─── Match history ───────────────────────────────────────────────────────────

/// Outcome of a completed match from the profile owner's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum MatchResult {
  Win,
  Loss,
  Draw,
}

/// Match category. Only [`GameMode::Ranked`] matches move league points.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display,
  EnumString,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum GameMode {
  #[serde(alias = "ranked")]
  Ranked,
  #[serde(alias = "unranked")]
  Unranked,
  #[serde(alias = "local")]
  Local,
}

/// One completed match. Entries are immutable once recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchHistoryEntry {
  /// Unique within the owning profile; assigned in increasing order.
  pub id:                  u64,
  pub opponent:            String,
  pub result:              MatchResult,
  pub occurred_at:         DateTime<Utc>,
  pub mode:                GameMode,
  /// League point delta. Usually absent outside ranked play.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub league_point_change: Option<i32>,
}

// ─── Profile ─────────────────────────────────────────────────────────────────

/// The canonical identity and progression record for one player.
///
/// `history` is shared behind an [`Arc`]; cloning a profile (as every edit
/// does) never copies match entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
  /// Assigned by the identity provider; never changes.
  pub id:            Uuid,
  pub username:      String,
  #[serde(default)]
  pub first_name:    String,
  #[serde(default)]
  pub last_name:     String,
  pub email:         String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub phone_number:  Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub progression:   Option<Progression>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub rank:          Option<Rank>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub league_points: Option<i32>,
  /// Newest first, by convention of the game-result system.
  #[serde(default = "empty_history")]
  pub history:       Arc<[MatchHistoryEntry]>,
}

fn empty_history() -> Arc<[MatchHistoryEntry]> { Arc::from(Vec::new()) }

impl Profile {
  /// Convenience constructor with every optional field absent and an empty
  /// history.
  pub fn new(
    id: Uuid,
    username: impl Into<String>,
    email: impl Into<String>,
  ) -> Self {
    Self {
      id,
      username: username.into(),
      first_name: String::new(),
      last_name: String::new(),
      email: email.into(),
      phone_number: None,
      progression: None,
      rank: None,
      league_points: None,
      history: empty_history(),
    }
  }

  /// `"First Last"`, or the username when both name parts are blank.
  pub fn display_name(&self) -> String {
    let full = format!("{} {}", self.first_name.trim(), self.last_name.trim());
    let full = full.trim();
    if full.is_empty() {
      self.username.clone()
    } else {
      full.to_owned()
    }
  }
}
