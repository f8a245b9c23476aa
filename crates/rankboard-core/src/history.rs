//! Mode-filtered, bounded views over a profile's match history.

use std::cmp::Reverse;

use serde::{Deserialize, Serialize};

use crate::profile::{GameMode, MatchHistoryEntry, MatchResult};

/// How many entries a history panel shows when the caller does not say.
pub const DEFAULT_HISTORY_LIMIT: usize = 5;

// ─── Reward sign ─────────────────────────────────────────────────────────────

/// Direction of a league point change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RewardSign {
  Positive,
  Negative,
  Neutral,
}

impl RewardSign {
  /// A missing change counts as zero.
  pub fn of(league_point_change: Option<i32>) -> Self {
    match league_point_change.unwrap_or(0) {
      c if c > 0 => Self::Positive,
      c if c < 0 => Self::Negative,
      _ => Self::Neutral,
    }
  }
}

// ─── Query ───────────────────────────────────────────────────────────────────

/// Ordering applied before the view is bounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryOrder {
  /// Newest `occurred_at` first; ties go to the higher entry id.
  #[default]
  MostRecentFirst,
  /// Trust the caller's order as-is.
  AsSupplied,
}

/// Parameters for building a [`HistoryView`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryQuery {
  pub mode:  GameMode,
  pub limit: usize,
  pub order: HistoryOrder,
}

impl HistoryQuery {
  pub fn new(mode: GameMode) -> Self {
    Self {
      mode,
      limit: DEFAULT_HISTORY_LIMIT,
      order: HistoryOrder::default(),
    }
  }

  pub fn limit(mut self, limit: usize) -> Self {
    self.limit = limit;
    self
  }

  pub fn order(mut self, order: HistoryOrder) -> Self {
    self.order = order;
    self
  }

  /// Filter `history` to this query's mode, order it, and keep at most
  /// `limit` entries. The input is only read.
  pub fn run<'a>(&self, history: &'a [MatchHistoryEntry]) -> HistoryView<'a> {
    let mut selected: Vec<&'a MatchHistoryEntry> =
      history.iter().filter(|e| e.mode == self.mode).collect();

    if self.order == HistoryOrder::MostRecentFirst {
      // Stable, so identical (occurred_at, id) pairs keep input order.
      selected.sort_by_key(|e| Reverse((e.occurred_at, e.id)));
    }
    selected.truncate(self.limit);

    HistoryView {
      mode:    self.mode,
      entries: selected
        .into_iter()
        .map(|entry| AnnotatedEntry {
          entry,
          reward_sign: RewardSign::of(entry.league_point_change),
        })
        .collect(),
    }
  }
}

/// Filter, order, and bound `history` to at most `limit` entries of `mode`,
/// newest first.
///
/// An empty result is an ordinary view, not an error.
pub fn aggregate(
  history: &[MatchHistoryEntry],
  mode: GameMode,
  limit: usize,
) -> HistoryView<'_> {
  HistoryQuery::new(mode).limit(limit).run(history)
}

// ─── View ────────────────────────────────────────────────────────────────────

/// A history entry with its derived reward sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotatedEntry<'a> {
  #[serde(flatten)]
  pub entry:       &'a MatchHistoryEntry,
  pub reward_sign: RewardSign,
}

/// Win/loss/draw totals over a view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRecord {
  pub wins:              u32,
  pub losses:            u32,
  pub draws:             u32,
  pub net_league_points: i64,
}

/// The computed history panel for one mode. Borrows from the history it was
/// built from and is discarded after rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryView<'a> {
  pub mode:    GameMode,
  pub entries: Vec<AnnotatedEntry<'a>>,
}

impl HistoryView<'_> {
  pub fn len(&self) -> usize { self.entries.len() }

  pub fn is_empty(&self) -> bool { self.entries.is_empty() }

  pub fn record(&self) -> MatchRecord {
    self
      .entries
      .iter()
      .fold(MatchRecord::default(), |mut acc, annotated| {
        let e = annotated.entry;
        match e.result {
          MatchResult::Win => acc.wins += 1,
          MatchResult::Loss => acc.losses += 1,
          MatchResult::Draw => acc.draws += 1,
        }
        acc.net_league_points += i64::from(e.league_point_change.unwrap_or(0));
        acc
      })
  }
}
