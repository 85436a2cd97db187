use std::{fmt, io};

/// Errors that can occur when building a cache.
///
/// Once built, no cache operation can fail.
#[derive(Debug)]
pub enum BuildError {
  /// The operating system refused to start the janitor thread.
  JanitorSpawn(io::Error),
}

impl fmt::Display for BuildError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      BuildError::JanitorSpawn(err) => write!(f, "failed to spawn the janitor thread: {}", err),
    }
  }
}

impl std::error::Error for BuildError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      BuildError::JanitorSpawn(err) => Some(err),
    }
  }
}
