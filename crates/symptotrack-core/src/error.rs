//! Error types for `symptotrack-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// The key-value backend failed to read, write or remove an entry.
  #[error("storage error: {0}")]
  Storage(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

impl Error {
  /// Box a backend error at the [`KeyValueStore`](crate::storage::KeyValueStore)
  /// seam.
  pub fn storage<E>(err: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Storage(Box::new(err))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
