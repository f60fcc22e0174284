//! `symptotrack`: track symptoms, habits and health goals from the terminal.
//!
//! # Usage
//!
//! ```
//! symptotrack check fever cough "sore throat" --age adult --severity moderate
//! symptotrack log habits --water 8 --sleep 7 --steps 9000
//! symptotrack trends --period month
//! symptotrack --store ~/health.db goals list
//! ```

mod cli;
mod commands;
mod config;
mod prompt;

use anyhow::Context as _;
use chrono::Local;
use clap::Parser;
use cli::{Cli, Command};
use commands::App;
use config::{AppConfig, expand_tilde};
use symptotrack_core::catalog::Catalog;
use symptotrack_store_sqlite::SqliteStorage;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  let cli = Cli::parse();

  // Diagnostics go to stderr so command output stays clean.
  let default_level = if cli.verbose { LevelFilter::DEBUG } else { LevelFilter::WARN };
  tracing_subscriber::fmt()
    .with_writer(std::io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy(),
    )
    .init();

  let mut config = AppConfig::load(&cli.config)?;
  if let Some(store) = &cli.store {
    config.store_path = expand_tilde(store);
  }

  let catalog = Catalog::builtin();

  // The catalog needs no storage.
  if let Command::Symptoms { search } = &cli.command {
    App::print_symptoms(&catalog, search.as_deref());
    return Ok(());
  }

  if let Some(parent) = config.store_path.parent()
    && !parent.as_os_str().is_empty()
  {
    std::fs::create_dir_all(parent)
      .with_context(|| format!("failed to create {}", parent.display()))?;
  }

  let storage = SqliteStorage::open(&config.store_path)
    .await
    .with_context(|| format!("failed to open store at {:?}", config.store_path))?;
  tracing::debug!(path = ?config.store_path, "store opened");

  let app = App {
    storage,
    config,
    today: Local::now().date_naive(),
    catalog,
  };

  match cli.command {
    Command::Symptoms { .. } => {}
    Command::Check(args) => app.check(args),
    Command::Log(command) => app.log(command).await?,
    Command::Today => app.today().await?,
    Command::Quiz(args) => app.quiz(args).await?,
    Command::QuizHistory => app.quiz_history().await?,
    Command::Trends { period } => app.trends(period).await?,
    Command::Insights => app.insights().await?,
    Command::Achievements => app.achievements().await?,
    Command::Goals(command) => app.goals(command).await?,
    Command::Status => app.status().await?,
    Command::Clear { yes } => app.clear(yes).await?,
  }
  Ok(())
}
