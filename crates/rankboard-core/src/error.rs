//! Error types for `rankboard-core`.

use serde::Serialize;
use strum::Display;
use thiserror::Error;

// ─── Progression ─────────────────────────────────────────────────────────────

/// Progression counters that cannot describe a level bar. Signals a
/// data-integrity fault upstream, not a user mistake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error(
  "invalid progression: next_level_xp must be positive, got {next_level_xp}"
)]
pub struct InvalidProgressionError {
  pub next_level_xp: i64,
}

// ─── Edit validation ─────────────────────────────────────────────────────────

/// The editable profile fields, named as they appear on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum EditField {
  Username,
  FirstName,
  LastName,
  Email,
  PhoneNumber,
}

/// Why a supplied edit field was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ValidationReason {
  /// Blank after trimming.
  Empty,
  /// Does not have the required shape.
  Malformed,
}

/// A single edit field failed its format check. No part of the edit was
/// applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize)]
#[error("invalid {field}: {reason}")]
pub struct ValidationError {
  pub field:  EditField,
  pub reason: ValidationReason,
}

impl ValidationError {
  pub fn new(field: EditField, reason: ValidationReason) -> Self {
    Self { field, reason }
  }
}

// ─── Umbrella ────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum Error {
  #[error(transparent)]
  InvalidProgression(#[from] InvalidProgressionError),

  #[error(transparent)]
  Validation(#[from] ValidationError),

  /// A session refused to swap in a profile with a different identity.
  #[error("profile id mismatch: expected {expected}, got {actual}")]
  IdentityMismatch {
    expected: uuid::Uuid,
    actual:   uuid::Uuid,
  },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
