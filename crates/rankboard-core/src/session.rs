//! The `ProfileSession` trait: the hand-off point with whatever layer owns
//! the canonical profile.
//!
//! Higher layers (`rankboard-api`) read the profile through this trait and
//! write back the result of [`apply_edit`](crate::edit::apply_edit). The core
//! operations themselves never hold on to a session.

use std::future::Future;

use crate::profile::Profile;

/// A single-writer cell holding one canonical [`Profile`].
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait ProfileSession: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// A snapshot of the canonical profile.
  fn current(
    &self,
  ) -> impl Future<Output = Result<Profile, Self::Error>> + Send + '_;

  /// Swap in an updated profile.
  ///
  /// Returns an error if `profile.id` differs from the current profile's id;
  /// identity never changes within a session.
  fn replace(
    &self,
    profile: Profile,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}
