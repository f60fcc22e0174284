//! The `KeyValueStore` trait and an in-memory implementation.
//!
//! Each persisted collection is one serialised list stored under a fixed
//! string key, read and written as a whole. Backends (e.g.
//! `symptotrack-store-sqlite`) implement the trait; the journal and the goal
//! book depend only on this abstraction.

use std::{
  collections::HashMap,
  convert::Infallible,
  future::Future,
  sync::{Arc, Mutex, PoisonError},
};

// ─── Keys ────────────────────────────────────────────────────────────────────

pub const SYMPTOM_LOGS_KEY: &str = "symptomLogs";
pub const HABIT_LOGS_KEY: &str = "habitLogs";
pub const QUIZ_RESULTS_KEY: &str = "quizResults";
pub const GOALS_KEY: &str = "healthGoals";

// ─── Trait ───────────────────────────────────────────────────────────────────

/// A string-to-string persistent map, in the manner of browser local storage.
///
/// Writes are whole-value replacements; there are no partial updates and no
/// transactions spanning several keys.
pub trait KeyValueStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Read the value stored under `key`, or `None` if the key is absent.
  fn get_item<'a>(
    &'a self,
    key: &'a str,
  ) -> impl Future<Output = Result<Option<String>, Self::Error>> + Send + 'a;

  /// Store `value` under `key`, replacing any previous value.
  fn set_item<'a>(
    &'a self,
    key: &'a str,
    value: String,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// Delete `key`. Removing an absent key is not an error.
  fn remove_item<'a>(
    &'a self,
    key: &'a str,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;
}

// ─── In-memory backend ───────────────────────────────────────────────────────

/// A [`KeyValueStore`] that lives only as long as the process.
///
/// Cloning is cheap and clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
  items: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
  pub fn new() -> Self { Self::default() }

  pub fn len(&self) -> usize {
    self.items.lock().unwrap_or_else(PoisonError::into_inner).len()
  }

  pub fn is_empty(&self) -> bool { self.len() == 0 }
}

impl KeyValueStore for MemoryStorage {
  type Error = Infallible;

  async fn get_item(&self, key: &str) -> Result<Option<String>, Infallible> {
    let items = self.items.lock().unwrap_or_else(PoisonError::into_inner);
    Ok(items.get(key).cloned())
  }

  async fn set_item(&self, key: &str, value: String) -> Result<(), Infallible> {
    let mut items = self.items.lock().unwrap_or_else(PoisonError::into_inner);
    items.insert(key.to_owned(), value);
    Ok(())
  }

  async fn remove_item(&self, key: &str) -> Result<(), Infallible> {
    let mut items = self.items.lock().unwrap_or_else(PoisonError::into_inner);
    items.remove(key);
    Ok(())
  }
}
