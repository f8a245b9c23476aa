//! [`InMemorySession`] — a process-local [`ProfileSession`].

use rankboard_core::{Error, profile::Profile, session::ProfileSession};
use tokio::sync::RwLock;

/// Holds the canonical profile for the lifetime of the process. Nothing is
/// written to disk.
#[derive(Debug)]
pub struct InMemorySession {
  profile: RwLock<Profile>,
}

impl InMemorySession {
  pub fn new(profile: Profile) -> Self {
    Self {
      profile: RwLock::new(profile),
    }
  }
}

impl ProfileSession for InMemorySession {
  type Error = Error;

  async fn current(&self) -> Result<Profile, Error> {
    Ok(self.profile.read().await.clone())
  }

  async fn replace(&self, profile: Profile) -> Result<(), Error> {
    let mut slot = self.profile.write().await;
    if slot.id != profile.id {
      return Err(Error::IdentityMismatch {
        expected: slot.id,
        actual:   profile.id,
      });
    }
    *slot = profile;
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use uuid::Uuid;

  use super::*;

  #[tokio::test]
  async fn replace_swaps_in_same_identity() {
    let id = Uuid::new_v4();
    let session =
      InMemorySession::new(Profile::new(id, "kestrel", "k@example.com"));

    let mut edited = session.current().await.unwrap();
    edited.username = "osprey".into();
    session.replace(edited).await.unwrap();

    assert_eq!(session.current().await.unwrap().username, "osprey");
  }

  #[tokio::test]
  async fn replace_refuses_a_different_identity() {
    let session = InMemorySession::new(Profile::new(
      Uuid::new_v4(),
      "kestrel",
      "k@example.com",
    ));
    let stranger = Profile::new(Uuid::new_v4(), "osprey", "o@example.com");

    let err = session.replace(stranger).await.unwrap_err();
    assert!(matches!(err, Error::IdentityMismatch { .. }));
    assert_eq!(session.current().await.unwrap().username, "kestrel");
  }
}
