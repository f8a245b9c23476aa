//! Plain-text rendering of a profile, for `--print`.

use std::fmt;

use rankboard_api::ApiSettings;
use rankboard_core::{
  history::{HistoryView, RewardSign, aggregate},
  profile::{MatchHistoryEntry, Profile},
  progression::{ProgressView, compute_progress_or_fallback},
};

const BAR_WIDTH: usize = 20;

/// Renders identity, the level bar, ladder standing, and recent matches.
pub struct Dashboard<'a> {
  profile:  &'a Profile,
  progress: ProgressView,
  history:  HistoryView<'a>,
}

impl<'a> Dashboard<'a> {
  pub fn new(profile: &'a Profile, settings: &ApiSettings) -> Self {
    Self {
      profile,
      progress: compute_progress_or_fallback(profile.progression.as_ref()),
      history: aggregate(
        &profile.history,
        settings.history_mode,
        settings.history_limit,
      ),
    }
  }
}

fn bar(progress: &ProgressView) -> String {
  let filled =
    ((progress.ratio * BAR_WIDTH as f64).round() as usize).min(BAR_WIDTH);
  format!("[{}{}]", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}

fn match_line(
  f: &mut fmt::Formatter<'_>,
  entry: &MatchHistoryEntry,
  sign: RewardSign,
) -> fmt::Result {
  write!(f, "  {:<5} vs {:<16}", entry.result.to_string(), entry.opponent)?;
  if let Some(lp) = entry.league_point_change {
    let marker = match sign {
      RewardSign::Positive => "+",
      RewardSign::Negative => "-",
      RewardSign::Neutral => "±",
    };
    write!(f, " {marker}{} LP", lp.unsigned_abs())?;
  }
  writeln!(f, "  {}", entry.occurred_at.format("%Y-%m-%d %H:%M UTC"))
}

impl fmt::Display for Dashboard<'_> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let p = self.profile;

    writeln!(f, "{} (@{})", p.display_name(), p.username)?;
    match &p.phone_number {
      Some(phone) if !phone.is_empty() => writeln!(f, "{} | {phone}", p.email)?,
      _ => writeln!(f, "{}", p.email)?,
    }

    let pv = &self.progress;
    writeln!(
      f,
      "{}  {}  {:>3}%  {} / {} XP",
      pv.badge(),
      bar(pv),
      pv.percent(),
      pv.current_xp,
      pv.next_level_xp,
    )?;

    match (&p.rank, p.league_points) {
      (Some(rank), Some(lp)) if rank.is_ranked() => {
        writeln!(f, "Rank: {rank} | {lp} LP")?
      }
      (Some(rank), _) => writeln!(f, "Rank: {rank}")?,
      (None, _) => writeln!(f, "Rank: Unranked")?,
    }

    writeln!(f)?;
    if self.history.is_empty() {
      return writeln!(f, "No {} matches yet.", self.history.mode);
    }
    writeln!(f, "Recent {} matches:", self.history.mode)?;
    for annotated in &self.history.entries {
      match_line(f, annotated.entry, annotated.reward_sign)?;
    }
    let record = self.history.record();
    writeln!(
      f,
      "  {}W {}L {}D, net {:+} LP",
      record.wins, record.losses, record.draws, record.net_league_points
    )
  }
}

#[cfg(test)]
mod tests {
  use std::sync::Arc;

  use chrono::{TimeZone, Utc};
  use rankboard_core::profile::{
    GameMode, MatchResult, Progression, Rank,
  };
  use uuid::Uuid;

  use super::*;

  fn profile() -> Profile {
    let mut p = Profile::new(Uuid::new_v4(), "kestrel", "ada@example.com");
    p.first_name = "Ada".into();
    p.last_name = "Byrne".into();
    p.progression = Some(Progression {
      level:         7,
      current_xp:    300,
      next_level_xp: 1200,
    });
    p.rank = Some(Rank::Tier("Gold II".into()));
    p.league_points = Some(64);
    p
  }

  #[test]
  fn renders_identity_progress_and_rank() {
    let p = profile();
    let text = Dashboard::new(&p, &ApiSettings::default()).to_string();
    assert!(text.starts_with("Ada Byrne (@kestrel)\n"), "{text}");
    assert!(
      text.contains("Lv. 7  [#####---------------]   25%  300 / 1200 XP"),
      "{text}"
    );
    assert!(text.contains("Rank: Gold II | 64 LP"), "{text}");
  }

  #[test]
  fn empty_history_renders_explicit_notice() {
    let p = profile();
    let text = Dashboard::new(&p, &ApiSettings::default()).to_string();
    assert!(text.contains("No ranked matches yet."), "{text}");
  }

  #[test]
  fn ranked_matches_show_signed_league_points() {
    let mut p = profile();
    let at = Utc.with_ymd_and_hms(2026, 10, 1, 18, 30, 0).unwrap();
    p.history = Arc::from(vec![
      MatchHistoryEntry {
        id:                  2,
        opponent:            "Vireo".into(),
        result:              MatchResult::Loss,
        occurred_at:         at,
        mode:                GameMode::Ranked,
        league_point_change: Some(-18),
      },
      MatchHistoryEntry {
        id:                  1,
        opponent:            "Rook".into(),
        result:              MatchResult::Win,
        occurred_at:         at - chrono::Duration::hours(1),
        mode:                GameMode::Unranked,
        league_point_change: None,
      },
    ]);
    let text = Dashboard::new(&p, &ApiSettings::default()).to_string();
    assert!(text.contains("Recent ranked matches:"), "{text}");
    assert!(text.contains("-18 LP"), "{text}");
    assert!(text.contains("2026-10-01 18:30 UTC"), "{text}");
    assert!(!text.contains("Rook"), "{text}");
    assert!(text.contains("0W 1L 0D, net -18 LP"), "{text}");
  }

  #[test]
  fn corrupt_progression_renders_empty_bar() {
    let mut p = profile();
    p.progression = Some(Progression {
      level:         4,
      current_xp:    10,
      next_level_xp: 0,
    });
    let text = Dashboard::new(&p, &ApiSettings::default()).to_string();
    assert!(text.contains("Lv. 4  [--------------------]    0%"), "{text}");
  }
}
