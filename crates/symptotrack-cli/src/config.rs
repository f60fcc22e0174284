//! Configuration: an optional TOML file layered under `SYMPTOTRACK_*`
//! environment variables.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::Deserialize;
use symptotrack_core::trends::Period;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
  /// SQLite database file; a leading `~/` is expanded.
  #[serde(default = "default_store_path")]
  pub store_path:     PathBuf,
  /// Period used by `trends` when none is given.
  #[serde(default)]
  pub default_period: Period,
}

fn default_store_path() -> PathBuf { PathBuf::from("~/.local/share/symptotrack/symptotrack.db") }

impl Default for AppConfig {
  fn default() -> Self {
    Self { store_path: default_store_path(), default_period: Period::default() }
  }
}

impl AppConfig {
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    let settings = config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("SYMPTOTRACK"))
      .build()
      .with_context(|| format!("failed to read config file {}", path.display()))?;

    let mut cfg: AppConfig = settings
      .try_deserialize()
      .context("failed to deserialise AppConfig")?;
    cfg.store_path = expand_tilde(&cfg.store_path);
    Ok(cfg)
  }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn missing_file_gives_defaults() {
    let cfg = AppConfig::load(Path::new("/nonexistent/symptotrack.toml")).unwrap();
    assert_eq!(cfg.default_period, Period::Week);
    assert!(cfg.store_path.ends_with("symptotrack.db"));
  }

  #[test]
  fn plain_paths_are_untouched() {
    assert_eq!(expand_tilde(Path::new("/tmp/x.db")), PathBuf::from("/tmp/x.db"));
    assert_eq!(expand_tilde(Path::new("rel/x.db")), PathBuf::from("rel/x.db"));
  }
}
