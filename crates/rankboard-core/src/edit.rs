//! Profile edits: validate every supplied field, then build the new profile.
//!
//! An edit either lands completely or not at all. Fields owned by the
//! game-result system (`progression`, `rank`, `leaguePoints`, `history`) and
//! the profile `id` are not part of [`ProfileEdit`] and cannot be touched.

use serde::{Deserialize, Serialize};

use crate::{
  error::{EditField, ValidationError, ValidationReason},
  profile::Profile,
};

// ─── Payload ─────────────────────────────────────────────────────────────────

/// A partial set of user-editable fields. Absent fields are left as they are;
/// present fields overwrite, even when the value is unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ProfileEdit {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub username:     Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub first_name:   Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub last_name:    Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub email:        Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub phone_number: Option<String>,
}

impl ProfileEdit {
  pub fn is_empty(&self) -> bool { self.fields().is_empty() }

  /// The fields present in this edit, in a fixed order.
  pub fn fields(&self) -> Vec<EditField> {
    [
      (EditField::Username, self.username.is_some()),
      (EditField::FirstName, self.first_name.is_some()),
      (EditField::LastName, self.last_name.is_some()),
      (EditField::Email, self.email.is_some()),
      (EditField::PhoneNumber, self.phone_number.is_some()),
    ]
    .into_iter()
    .filter_map(|(field, present)| present.then_some(field))
    .collect()
  }

  /// Reduce a full-form submission to the fields that actually differ from
  /// `current`.
  pub fn changes_from(&self, current: &Profile) -> Self {
    fn changed(new: &Option<String>, old: &str) -> Option<String> {
      new.as_ref().filter(|v| v.as_str() != old).cloned()
    }

    Self {
      username:     changed(&self.username, &current.username),
      first_name:   changed(&self.first_name, &current.first_name),
      last_name:    changed(&self.last_name, &current.last_name),
      email:        changed(&self.email, &current.email),
      phone_number: self
        .phone_number
        .as_ref()
        .filter(|v| current.phone_number.as_ref() != Some(*v))
        .cloned(),
    }
  }
}

// ─── Validation ──────────────────────────────────────────────────────────────

fn validate(edit: &ProfileEdit) -> Result<(), ValidationError> {
  if let Some(username) = &edit.username
    && username.trim().is_empty()
  {
    return Err(ValidationError::new(
      EditField::Username,
      ValidationReason::Empty,
    ));
  }
  if let Some(email) = &edit.email
    && !is_plausible_email(email)
  {
    return Err(ValidationError::new(
      EditField::Email,
      ValidationReason::Malformed,
    ));
  }
  Ok(())
}

/// Syntactic shape only: `local@domain.tld`. Deliverability and uniqueness
/// are checked elsewhere.
fn is_plausible_email(email: &str) -> bool {
  if email.chars().any(char::is_whitespace) {
    return false;
  }
  let Some((local, domain)) = email.split_once('@') else {
    return false;
  };
  if local.is_empty() || domain.contains('@') {
    return false;
  }
  let labels: Vec<&str> = domain.split('.').collect();
  labels.len() >= 2 && labels.iter().all(|l| !l.is_empty())
}

// ─── Merge ───────────────────────────────────────────────────────────────────

/// Apply `edit` to `current`, returning the updated profile.
///
/// Every supplied field is validated before anything is merged; on failure
/// the first offending field is reported and `current` is untouched. The
/// returned profile shares `current`'s history.
pub fn apply_edit(
  current: &Profile,
  edit: &ProfileEdit,
) -> Result<Profile, ValidationError> {
  validate(edit)?;

  if edit.is_empty() {
    return Ok(current.clone());
  }

  let pick = |new: &Option<String>, old: &String| {
    new.as_ref().unwrap_or(old).clone()
  };

  let updated = Profile {
    id:            current.id,
    username:      pick(&edit.username, &current.username),
    first_name:    pick(&edit.first_name, &current.first_name),
    last_name:     pick(&edit.last_name, &current.last_name),
    email:         pick(&edit.email, &current.email),
    phone_number:  edit
      .phone_number
      .clone()
      .or_else(|| current.phone_number.clone()),
    progression:   current.progression,
    rank:          current.rank.clone(),
    league_points: current.league_points,
    history:       current.history.clone(),
  };

  tracing::debug!(
    profile_id = %current.id,
    fields = ?edit.fields(),
    "applied profile edit"
  );

  Ok(updated)
}

#[cfg(test)]
mod tests {
  use std::sync::Arc;

  use chrono::{TimeZone, Utc};
  use uuid::Uuid;

  use super::*;
  use crate::profile::{
    GameMode, MatchHistoryEntry, MatchResult, Progression, Rank,
  };

  fn profile() -> Profile {
    let ts = Utc.with_ymd_and_hms(2026, 10, 1, 18, 0, 0).unwrap();
    Profile {
      id:            Uuid::new_v4(),
      username:      "kestrel".into(),
      first_name:    "Ada".into(),
      last_name:     "Byrne".into(),
      email:         "ada@example.com".into(),
      phone_number:  Some("555-0100".into()),
      progression:   Some(Progression {
        level:         7,
        current_xp:    420,
        next_level_xp: 1200,
      }),
      rank:          Some(Rank::Tier("Gold II".into())),
      league_points: Some(64),
      history:       Arc::from(vec![MatchHistoryEntry {
        id:                  1,
        opponent:            "Vireo".into(),
        result:              MatchResult::Win,
        occurred_at:         ts,
        mode:                GameMode::Ranked,
        league_point_change: Some(21),
      }]),
    }
  }

  #[test]
  fn empty_edit_returns_equal_profile() {
    let p = profile();
    let result = apply_edit(&p, &ProfileEdit::default()).unwrap();
    assert_eq!(result, p);
  }

  #[test]
  fn present_fields_overwrite_and_absent_fields_survive() {
    let p = profile();
    let edit = ProfileEdit {
      first_name: Some("Ida".into()),
      phone_number: Some(String::new()),
      ..Default::default()
    };
    let result = apply_edit(&p, &edit).unwrap();

    assert_eq!(result.first_name, "Ida");
    assert_eq!(result.phone_number.as_deref(), Some(""));
    assert_eq!(result.username, p.username);
    assert_eq!(result.last_name, p.last_name);
    assert_eq!(result.email, p.email);
  }

  #[test]
  fn identity_and_game_owned_fields_are_carried_over() {
    let p = profile();
    let edit = ProfileEdit {
      username: Some("osprey".into()),
      email: Some("a@b.co".into()),
      ..Default::default()
    };
    let result = apply_edit(&p, &edit).unwrap();

    assert_eq!(result.id, p.id);
    assert_eq!(result.email, "a@b.co");
    assert_eq!(result.progression, p.progression);
    assert_eq!(result.rank, p.rank);
    assert_eq!(result.league_points, p.league_points);
    assert!(Arc::ptr_eq(&result.history, &p.history));
  }

  #[test]
  fn empty_username_is_rejected() {
    let p = profile();
    let before = p.clone();
    let edit = ProfileEdit {
      username: Some(String::new()),
      ..Default::default()
    };
    let err = apply_edit(&p, &edit).unwrap_err();
    assert_eq!(err.field, EditField::Username);
    assert_eq!(err.reason, ValidationReason::Empty);
    assert_eq!(p, before);
  }

  #[test]
  fn whitespace_username_is_rejected() {
    let edit = ProfileEdit {
      username: Some("   \t".into()),
      ..Default::default()
    };
    let err = apply_edit(&profile(), &edit).unwrap_err();
    assert_eq!(err.field, EditField::Username);
  }

  #[test]
  fn malformed_email_is_rejected() {
    for bad in [
      "not-an-email",
      "@example.com",
      "ada@",
      "ada@example",
      "ada@.com",
      "ada@example.",
      "ada@@example.com",
      "a b@example.com",
      "",
    ] {
      let edit = ProfileEdit {
        email: Some(bad.into()),
        ..Default::default()
      };
      let err = apply_edit(&profile(), &edit).unwrap_err();
      assert_eq!(err.field, EditField::Email, "accepted {bad:?}");
      assert_eq!(err.reason, ValidationReason::Malformed);
    }
  }

  #[test]
  fn plausible_emails_are_accepted() {
    for good in ["a@b.co", "ada.byrne+ladder@mail.example.org"] {
      assert!(is_plausible_email(good), "rejected {good:?}");
    }
  }

  #[test]
  fn failing_field_blocks_valid_ones() {
    let p = profile();
    let edit = ProfileEdit {
      first_name: Some("Ida".into()),
      email: Some("broken".into()),
      ..Default::default()
    };
    let err = apply_edit(&p, &edit).unwrap_err();
    assert_eq!(err.field, EditField::Email);
    // The valid first name was not merged anywhere.
    assert_eq!(p.first_name, "Ada");
  }

  #[test]
  fn free_form_fields_accept_empty_strings() {
    let edit = ProfileEdit {
      first_name: Some(String::new()),
      last_name: Some(String::new()),
      phone_number: Some("call me maybe".into()),
      ..Default::default()
    };
    let result = apply_edit(&profile(), &edit).unwrap();
    assert_eq!(result.first_name, "");
    assert_eq!(result.last_name, "");
    assert_eq!(result.phone_number.as_deref(), Some("call me maybe"));
  }

  #[test]
  fn full_form_and_changed_subset_agree() {
    let p = profile();
    let full = ProfileEdit {
      username:     Some(p.username.clone()),
      first_name:   Some("Ida".into()),
      last_name:    Some(p.last_name.clone()),
      email:        Some(p.email.clone()),
      phone_number: p.phone_number.clone(),
    };
    let subset = full.changes_from(&p);

    assert_eq!(subset.fields(), vec![EditField::FirstName]);
    assert_eq!(
      apply_edit(&p, &full).unwrap(),
      apply_edit(&p, &subset).unwrap()
    );
  }

  #[test]
  fn unchanged_full_form_reduces_to_empty_edit() {
    let p = profile();
    let full = ProfileEdit {
      username:     Some(p.username.clone()),
      first_name:   Some(p.first_name.clone()),
      last_name:    Some(p.last_name.clone()),
      email:        Some(p.email.clone()),
      phone_number: p.phone_number.clone(),
    };
    assert!(full.changes_from(&p).is_empty());
  }

  #[test]
  fn payload_touching_owned_fields_is_refused() {
    let json =
      serde_json::json!({ "username": "osprey", "leaguePoints": 9000 });
    assert!(serde_json::from_value::<ProfileEdit>(json).is_err());

    let json = serde_json::json!({ "id": Uuid::new_v4() });
    assert!(serde_json::from_value::<ProfileEdit>(json).is_err());
  }

  #[test]
  fn payload_uses_camel_case_keys() {
    let json = serde_json::json!({ "firstName": "Ida", "phoneNumber": "555" });
    let edit: ProfileEdit = serde_json::from_value(json).unwrap();
    assert_eq!(
      edit.fields(),
      vec![EditField::FirstName, EditField::PhoneNumber]
    );
  }
}
