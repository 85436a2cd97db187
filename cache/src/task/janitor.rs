use crate::shared::CacheShared;
use crate::task::cancel::CancelToken;

use std::hash::Hash;
use std::io;
use std::sync::Weak;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Name given to every janitor thread.
const JANITOR_THREAD_NAME: &str = "polycache-janitor";

/// The background task that periodically reclaims expired entries.
///
/// It waits on its token for one interval at a time; a tick runs
/// `delete_expired` on the cache, a cancel ends the thread for good. The
/// thread only holds a weak reference, so it also ends once the last cache
/// handle is gone.
pub(crate) struct Janitor {
  handle: JoinHandle<()>,
  token: CancelToken,
}

impl Janitor {
  /// Spawns a new janitor thread.
  pub(crate) fn spawn<K, V>(
    shared: Weak<CacheShared<K, V>>,
    tick_interval: Duration,
    token: CancelToken,
  ) -> io::Result<Self>
  where
    K: Eq + Hash + Clone + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
  {
    let thread_token = token.clone();

    let handle = thread::Builder::new()
      .name(JANITOR_THREAD_NAME.to_string())
      .spawn(move || {
        tracing::debug!(interval = ?tick_interval, "janitor started");

        while !thread_token.wait_timeout(tick_interval) {
          let Some(shared) = shared.upgrade() else {
            break;
          };
          let reclaimed = shared.delete_expired();
          if reclaimed > 0 {
            tracing::trace!(reclaimed, "janitor reclaimed expired entries");
          }
        }

        tracing::debug!("janitor stopped");
      })?;

    Ok(Self { handle, token })
  }

  /// Signals the janitor thread to stop. Takes effect at its next wake-up.
  pub(crate) fn stop(&self) {
    self.token.cancel();
  }

  pub(crate) fn is_running(&self) -> bool {
    !self.handle.is_finished()
  }
}
