use parking_lot::{Condvar, Mutex};
use std::fmt;
use std::sync::{Arc, Weak};
use std::time::{Duration, Instant};

struct Inner {
  cancelled: Mutex<bool>,
  condvar: Condvar,
  children: Mutex<Vec<Weak<Inner>>>,
}

impl Inner {
  fn new() -> Self {
    Self {
      cancelled: Mutex::new(false),
      condvar: Condvar::new(),
      children: Mutex::new(Vec::new()),
    }
  }

  fn cancel(&self) {
    {
      let mut cancelled = self.cancelled.lock();
      if *cancelled {
        return;
      }
      *cancelled = true;
    }
    self.condvar.notify_all();

    let children = std::mem::take(&mut *self.children.lock());
    for child in children.iter().filter_map(Weak::upgrade) {
      child.cancel();
    }
  }
}

/// A cancellation signal that can be shared between threads.
///
/// Cancelling is final: once [`cancel`](Self::cancel) has been called the
/// token stays cancelled. Clones observe the same state. A
/// [`child_token`](Self::child_token) is cancelled together with its parent
/// but can also be cancelled on its own without touching the parent.
#[derive(Clone)]
pub struct CancelToken {
  inner: Arc<Inner>,
}

impl CancelToken {
  pub fn new() -> Self {
    Self {
      inner: Arc::new(Inner::new()),
    }
  }

  /// Cancels this token and every child derived from it.
  pub fn cancel(&self) {
    self.inner.cancel();
  }

  pub fn is_cancelled(&self) -> bool {
    *self.inner.cancelled.lock()
  }

  /// Creates a token that is cancelled whenever this one is.
  pub fn child_token(&self) -> CancelToken {
    let child = CancelToken::new();
    {
      let mut children = self.inner.children.lock();
      if self.is_cancelled() {
        child.cancel();
      } else {
        children.retain(|weak| weak.strong_count() > 0);
        children.push(Arc::downgrade(&child.inner));
      }
    }
    child
  }

  /// Blocks for up to `timeout`, returning early if the token is cancelled.
  ///
  /// Returns `true` if the token is cancelled.
  pub fn wait_timeout(&self, timeout: Duration) -> bool {
    let mut cancelled = self.inner.cancelled.lock();
    match Instant::now().checked_add(timeout) {
      Some(deadline) => {
        while !*cancelled {
          if self.inner.condvar.wait_until(&mut cancelled, deadline).timed_out() {
            break;
          }
        }
      }
      None => {
        while !*cancelled {
          self.inner.condvar.wait(&mut cancelled);
        }
      }
    }
    *cancelled
  }
}

impl Default for CancelToken {
  fn default() -> Self {
    Self::new()
  }
}

impl fmt::Debug for CancelToken {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("CancelToken")
      .field("cancelled", &self.is_cancelled())
      .finish()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::thread;

  #[test]
  fn test_cancel_is_sticky_and_shared_by_clones() {
    let token = CancelToken::new();
    let clone = token.clone();
    assert!(!clone.is_cancelled());

    token.cancel();
    token.cancel();
    assert!(clone.is_cancelled());
    assert!(clone.wait_timeout(Duration::from_secs(5)), "Should not block once cancelled");
  }

  #[test]
  fn test_wait_timeout_elapses_without_cancel() {
    let token = CancelToken::new();
    let start = Instant::now();
    assert!(!token.wait_timeout(Duration::from_millis(20)));
    assert!(start.elapsed() >= Duration::from_millis(20));
  }

  #[test]
  fn test_cancel_wakes_waiter() {
    let token = CancelToken::new();
    let waiter = {
      let token = token.clone();
      thread::spawn(move || token.wait_timeout(Duration::from_secs(30)))
    };

    thread::sleep(Duration::from_millis(20));
    let start = Instant::now();
    token.cancel();
    assert!(waiter.join().unwrap());
    assert!(start.elapsed() < Duration::from_secs(30));
  }

  #[test]
  fn test_child_follows_parent_but_not_reverse() {
    let parent = CancelToken::new();
    let child = parent.child_token();
    let sibling = parent.child_token();

    child.cancel();
    assert!(child.is_cancelled());
    assert!(!parent.is_cancelled(), "Child must not cancel its parent");
    assert!(!sibling.is_cancelled());

    parent.cancel();
    assert!(sibling.is_cancelled());
    assert!(parent.child_token().is_cancelled(), "Late child starts cancelled");
  }
}
