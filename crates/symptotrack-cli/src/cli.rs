//! Command-line arguments.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use symptotrack_core::{
  goal::GoalCategory,
  matcher::{AgeBracket, ReportedSeverity, SymptomDuration},
  trends::Period,
};

#[derive(Parser, Debug)]
#[command(name = "symptotrack", author, version, about = "Personal symptom and habit tracker")]
pub struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, global = true, default_value = "symptotrack.toml")]
  pub config: PathBuf,

  /// SQLite database to use instead of the configured one.
  #[arg(long, global = true, env = "SYMPTOTRACK_STORE", value_name = "FILE")]
  pub store: Option<PathBuf>,

  /// Log debug output to stderr.
  #[arg(short, long, global = true)]
  pub verbose: bool,

  #[command(subcommand)]
  pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
  /// List the symptom catalog, grouped by category.
  Symptoms {
    /// Only show symptoms whose name contains this text.
    #[arg(short, long)]
    search: Option<String>,
  },

  /// Rank possible conditions for a set of symptoms.
  Check(CheckArgs),

  /// Record today's symptoms or habits.
  #[command(subcommand)]
  Log(LogCommand),

  /// Show what has been logged today.
  Today,

  /// Take the health-awareness quiz.
  Quiz(QuizArgs),

  /// List past quiz results.
  QuizHistory,

  /// Symptom frequency, habit averages and advisories for a period.
  Trends {
    /// week, month or quarter; defaults to the configured period.
    #[arg(short, long)]
    period: Option<Period>,
  },

  /// Overall health score and insights from the latest week of entries.
  Insights,

  /// Achievements and experience level.
  Achievements,

  /// Manage health goals.
  #[command(subcommand)]
  Goals(GoalCommand),

  /// Show what the database holds.
  Status,

  /// Delete every symptom log, habit log and quiz result.
  Clear {
    /// Confirm the deletion.
    #[arg(long)]
    yes: bool,
  },
}

#[derive(Args, Debug)]
pub struct CheckArgs {
  /// Symptom names; close spellings are resolved against the catalog.
  #[arg(value_name = "SYMPTOM")]
  pub symptoms: Vec<String>,

  /// child, teen, adult or senior.
  #[arg(long)]
  pub age: Option<AgeBracket>,

  /// acute or chronic.
  #[arg(long)]
  pub duration: Option<SymptomDuration>,

  /// mild, moderate or severe.
  #[arg(long)]
  pub severity: Option<ReportedSeverity>,

  /// Free-text medical history, e.g. "asthma, smoker".
  #[arg(long)]
  pub history: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum LogCommand {
  /// Record symptoms, mood and notes.
  Symptoms {
    /// A symptom name; repeat for several.
    #[arg(short, long = "symptom", value_name = "SYMPTOM")]
    symptoms: Vec<String>,

    /// 1 (poor), 2 (fair) or 3 (good).
    #[arg(short, long, default_value_t = 3, value_parser = clap::value_parser!(u8).range(1..=3))]
    mood: u8,

    #[arg(short, long, default_value = "")]
    notes: String,

    /// Entry date; defaults to today.
    #[arg(long)]
    date: Option<NaiveDate>,
  },

  /// Record water, sleep, steps and medication.
  Habits {
    /// Glasses of water.
    #[arg(long, default_value_t = 0)]
    water: u32,

    /// Hours of sleep.
    #[arg(long, default_value_t = 0)]
    sleep: u32,

    #[arg(long, default_value_t = 0)]
    steps: u32,

    /// Medication was taken.
    #[arg(long)]
    medication: bool,

    /// Entry date; defaults to today.
    #[arg(long)]
    date: Option<NaiveDate>,
  },
}

#[derive(Args, Debug)]
pub struct QuizArgs {
  /// Comma-separated option numbers (1-based) in question order; leave a
  /// slot empty to skip it. Prompts interactively when absent.
  #[arg(long, value_delimiter = ',')]
  pub answers: Option<Vec<String>>,

  /// Write an HTML certificate to this file.
  #[arg(long, value_name = "FILE")]
  pub certificate: Option<PathBuf>,

  /// Name printed on the certificate.
  #[arg(long, default_value = "")]
  pub name: String,
}

#[derive(Subcommand, Debug)]
pub enum GoalCommand {
  /// List goals with their progress.
  List,

  /// List the built-in goal templates.
  Templates,

  /// Add a goal, from scratch or from a template.
  Add {
    /// 1-based template number; other flags override its fields.
    #[arg(long)]
    template: Option<usize>,

    #[arg(long)]
    title: Option<String>,

    #[arg(long)]
    description: Option<String>,

    /// fitness, nutrition, mental, sleep or habits.
    #[arg(long)]
    category: Option<GoalCategory>,

    #[arg(long)]
    target: Option<f64>,

    #[arg(long)]
    unit: Option<String>,

    /// Defaults to 30 days from today.
    #[arg(long)]
    deadline: Option<NaiveDate>,
  },

  /// Set the current progress of a goal.
  Progress { id: String, current: f64 },

  /// Delete a goal.
  Delete { id: String },
}
