//! One handler per subcommand. Output goes to stdout; diagnostics go
//! through `tracing` to stderr.

use std::{
  collections::BTreeSet,
  io::{self, BufRead},
};

use anyhow::{Context as _, bail};
use chrono::NaiveDate;
use symptotrack_core::{
  achievements::{Level, achievements, total_xp},
  catalog::{Catalog, Symptom},
  goal::{GOAL_TEMPLATES, GoalBook, NewGoal},
  journal::Journal,
  log::{Mood, NewHabitLog, NewSymptomLog},
  matcher::{DISCLAIMER, PatientProfile, analyze},
  quiz::{QUESTIONS, QuizOutcome, render_certificate},
  trends::{
    Period, average_habits, average_mood, health_insights, health_score, symptom_frequency,
    trend_insights, window,
  },
};
use symptotrack_store_sqlite::SqliteStorage;
use tracing::warn;

use crate::{
  cli::{CheckArgs, GoalCommand, LogCommand, QuizArgs},
  config::AppConfig,
  prompt,
};

/// Everything a handler needs.
pub struct App {
  pub storage: SqliteStorage,
  pub config:  AppConfig,
  pub today:   NaiveDate,
  pub catalog: Catalog,
}

impl App {
  async fn journal(&self) -> anyhow::Result<Journal<SqliteStorage>> {
    Journal::load(self.storage.clone()).await.context("loading journal")
  }

  async fn goal_book(&self) -> anyhow::Result<GoalBook<SqliteStorage>> {
    GoalBook::load(self.storage.clone()).await.context("loading goals")
  }

  // ─── Catalog ─────────────────────────────────────────────────────────────

  pub fn print_symptoms(catalog: &Catalog, search: Option<&str>) {
    let print = |s: &Symptom| {
      println!("  {:<22} {:<10} {}", s.name, s.severity, s.body_part);
    };

    match search {
      Some(term) => {
        let hits = catalog.search_symptoms(term);
        if hits.is_empty() {
          println!("No symptoms match {term:?}.");
        }
        hits.into_iter().for_each(print);
      }
      None => {
        for (category, members) in catalog.symptoms_by_category() {
          println!("{category}");
          members.into_iter().for_each(print);
        }
      }
    }
  }

  /// Resolve free-text names to catalog symptoms for analysis. Substitutions
  /// and names that match nothing are reported to the user.
  fn resolve(&self, inputs: &[String]) -> BTreeSet<String> {
    let mut selection = BTreeSet::new();
    for input in inputs {
      let input = input.trim();
      match self.catalog.resolve_symptom(input) {
        Some(symptom) => {
          if !symptom.name.eq_ignore_ascii_case(input) {
            warn!(input, resolved = symptom.name, "substituted symptom name");
            println!("Interpreting {input:?} as {:?}.", symptom.name);
          }
          selection.insert(symptom.name.to_owned());
        }
        None if input.is_empty() => {}
        None => {
          warn!(input, "unknown symptom, ignoring");
          println!("Unknown symptom {input:?} ignored.");
        }
      }
    }
    selection
  }

  /// Names for a symptom log, as entered. Only the catalog's spelling is
  /// applied, and only on a case-insensitive exact match.
  fn symptom_names(&self, inputs: &[String]) -> Vec<String> {
    let mut names: Vec<String> = Vec::with_capacity(inputs.len());
    for name in inputs.iter().filter_map(|input| self.catalog.canonical_name(input)) {
      if !names.contains(&name) {
        names.push(name);
      }
    }
    names
  }

  pub fn check(&self, args: CheckArgs) {
    let selection = self.resolve(&args.symptoms);
    if selection.is_empty() {
      println!("Select at least one symptom to analyze.");
      return;
    }

    let profile = PatientProfile {
      age:             args.age,
      duration:        args.duration,
      severity:        args.severity,
      medical_history: args.history,
    };
    let matches = analyze(self.catalog.diseases, &selection, &profile);

    let names: Vec<_> = selection.iter().map(String::as_str).collect();
    println!("Symptoms: {}\n", names.join(", "));

    if matches.is_empty() {
      println!("No matching conditions found.");
    }
    for (rank, m) in matches.iter().enumerate() {
      let d = m.disease;
      println!(
        "{}. {}  confidence {}%  ({}/{} symptoms, {}% match)  risk: {}",
        rank + 1,
        d.name,
        m.confidence,
        m.match_count,
        selection.len(),
        m.match_percentage,
        m.risk_level,
      );
      println!("   {}", d.description);
      println!(
        "   prevalence: {}  contagious: {}  specialist: {}",
        d.prevalence,
        if d.contagious { "yes" } else { "no" },
        d.specialist,
      );
      if let Some(first) = d.when_to_see_doctor.first() {
        println!("   see a doctor if: {first}");
      }
      if let Some(first) = d.home_remedies.first() {
        println!("   home care: {first}");
      }
    }
    println!("\n{DISCLAIMER}");
  }

  // ─── Logging ─────────────────────────────────────────────────────────────

  pub async fn log(&self, command: LogCommand) -> anyhow::Result<()> {
    let mut journal = self.journal().await?;

    match command {
      LogCommand::Symptoms { symptoms, mood, notes, date } => {
        let date = date.unwrap_or(self.today);
        if journal.todays_logs(date).symptom.is_some() {
          bail!("symptoms are already logged for {date}");
        }
        let mood = Mood::try_from(mood).map_err(anyhow::Error::msg)?;
        let symptoms = self.symptom_names(&symptoms);
        let log = journal
          .add_symptom_log(NewSymptomLog { date, symptoms, mood, notes })
          .await
          .context("saving symptom log")?;
        println!("Logged {} symptom(s) for {} (id {}).", log.symptoms.len(), log.date, log.id);
      }
      LogCommand::Habits { water, sleep, steps, medication, date } => {
        let date = date.unwrap_or(self.today);
        if journal.todays_logs(date).habit.is_some() {
          bail!("habits are already logged for {date}");
        }
        let log = journal
          .add_habit_log(NewHabitLog { date, water, sleep, steps, medication })
          .await
          .context("saving habit log")?;
        println!("Logged habits for {} (id {}).", log.date, log.id);
      }
    }
    Ok(())
  }

  pub async fn today(&self) -> anyhow::Result<()> {
    let journal = self.journal().await?;
    let today = journal.todays_logs(self.today);

    println!("{}", self.today.format("%A, %B %-d, %Y"));
    match today.symptom {
      Some(log) => {
        let symptoms =
          if log.symptoms.is_empty() { "none".to_owned() } else { log.symptoms.join(", ") };
        println!("  symptoms: {symptoms}");
        println!("  mood:     {} ({}/3)", log.mood, log.mood.score());
        if !log.notes.is_empty() {
          println!("  notes:    {}", log.notes);
        }
      }
      None => println!("  symptoms: not logged yet"),
    }
    match today.habit {
      Some(log) => println!(
        "  habits:   {} glasses, {} h sleep, {} steps, medication {}",
        log.water,
        log.sleep,
        log.steps,
        if log.medication { "taken" } else { "not taken" },
      ),
      None => println!("  habits:   not logged yet"),
    }
    Ok(())
  }

  // ─── Quiz ────────────────────────────────────────────────────────────────

  pub async fn quiz(&self, args: QuizArgs) -> anyhow::Result<()> {
    self.quiz_from(args, io::stdin().lock()).await
  }

  /// Run the quiz, reading interactive answers from `input` unless they were
  /// given with `--answers`. An unfinished quiz records nothing.
  async fn quiz_from<R: BufRead>(&self, args: QuizArgs, input: R) -> anyhow::Result<()> {
    let answers = match &args.answers {
      Some(raw) => Some(prompt::answers_from_args(QUESTIONS, raw)?),
      None => prompt::ask_from(QUESTIONS, input, io::stdout().lock())?,
    };
    let Some(answers) = answers else {
      println!("\nQuiz aborted; nothing recorded.");
      return Ok(());
    };
    let outcome = QuizOutcome::grade(QUESTIONS, &answers);

    println!();
    for (i, (q, answer)) in QUESTIONS.iter().zip(&answers).enumerate() {
      let mark = if *answer == Some(q.correct) { "correct" } else { "wrong" };
      println!("{}. {} [{mark}]", i + 1, q.question);
      println!("   answer: {}", q.options[q.correct]);
      println!("   {}", q.explanation);
    }

    let tier = outcome.tier();
    println!(
      "\nScore: {}/{} ({}%)  {tier}: {}",
      outcome.score,
      outcome.total,
      outcome.percentage(),
      tier.message()
    );

    let mut journal = self.journal().await?;
    journal
      .add_quiz_result(outcome.to_result(self.today))
      .await
      .context("saving quiz result")?;

    if let Some(path) = &args.certificate {
      let html = render_certificate(&args.name, &outcome, self.today);
      std::fs::write(path, html)
        .with_context(|| format!("writing certificate to {}", path.display()))?;
      println!("Certificate written to {}", path.display());
    }
    Ok(())
  }

  pub async fn quiz_history(&self) -> anyhow::Result<()> {
    let journal = self.journal().await?;
    let results = journal.quiz_results();
    if results.is_empty() {
      println!("No quiz results yet.");
    }
    for r in results.iter().rev() {
      println!(
        "{}  {}/{} ({}%)  {}",
        r.date,
        r.score,
        r.total_questions,
        r.percentage(),
        r.category
      );
    }
    Ok(())
  }

  // ─── Analytics ───────────────────────────────────────────────────────────

  pub async fn trends(&self, period: Option<Period>) -> anyhow::Result<()> {
    let period = period.unwrap_or(self.config.default_period);
    let journal = self.journal().await?;
    let symptoms = window(journal.symptom_logs(), period, self.today);
    let habits = window(journal.habit_logs(), period, self.today);

    if symptoms.is_empty() && habits.is_empty() {
      println!("No entries in the last {} days.", period.days());
      return Ok(());
    }

    println!("Trends for the last {period} ({} days)", period.days());
    println!("  symptom logs: {}  habit logs: {}", symptoms.len(), habits.len());
    println!("  average mood: {}/3", average_mood(&symptoms));

    let frequency = symptom_frequency(&symptoms);
    if !frequency.is_empty() {
      println!("\nMost frequent symptoms");
      for (name, count) in &frequency {
        println!("  {name:<22} {count}");
      }
    }

    if !habits.is_empty() {
      let avg = average_habits(&habits);
      println!("\nDaily averages");
      println!("  water: {} glasses", avg.water);
      println!("  sleep: {} hours", avg.sleep);
      println!("  steps: {}", avg.steps);
    }

    let insights = trend_insights(&symptoms, &habits);
    if !insights.is_empty() {
      println!("\nInsights");
      for insight in insights {
        let tag = if insight.is_warning() { "!" } else { "-" };
        println!("  {tag} {insight}");
      }
    }
    Ok(())
  }

  pub async fn insights(&self) -> anyhow::Result<()> {
    let journal = self.journal().await?;
    let (symptoms, habits) = (journal.symptom_logs(), journal.habit_logs());

    println!("Health score: {}/100", health_score(symptoms, habits));
    let insights = health_insights(symptoms, habits);
    if insights.is_empty() {
      println!("Keep logging symptoms and habits to unlock insights.");
    }
    for insight in insights {
      println!("\n[{}] {} ({}% confidence)", insight.kind, insight.title, insight.confidence);
      println!("  {}", insight.description);
      println!("  {}", insight.recommendation);
    }
    Ok(())
  }

  pub async fn achievements(&self) -> anyhow::Result<()> {
    let journal = self.journal().await?;
    let list = achievements(journal.symptom_logs(), journal.habit_logs());
    let xp = total_xp(&list);
    let level = Level::from_xp(xp);

    println!("Level {} - {}", level.level, level.title());
    println!("  {} XP total, {} XP to next level", xp, level.xp_to_next);
    let unlocked = list.iter().filter(|a| a.unlocked()).count();
    println!("  {unlocked}/{} achievements unlocked\n", list.len());

    for a in &list {
      let mark = if a.unlocked() { "x" } else { " " };
      println!(
        "[{mark}] {:<18} {:>4} pts  {:<9} {}/{}  {}",
        a.title, a.points, a.rarity, a.progress, a.max_progress, a.description
      );
    }
    Ok(())
  }

  // ─── Goals ───────────────────────────────────────────────────────────────

  pub async fn goals(&self, command: GoalCommand) -> anyhow::Result<()> {
    let mut book = self.goal_book().await?;

    match command {
      GoalCommand::List => {
        let stats = book.stats();
        println!("{}/{} goals completed", stats.completed, stats.total);
        for g in book.goals() {
          let mark = if g.completed { "x" } else { " " };
          println!(
            "[{mark}] {}  {}  ({})\n    {}/{} {} ({:.0}%), due {}",
            g.id,
            g.title,
            g.category,
            g.current,
            g.target,
            g.unit,
            g.progress_percent(),
            g.deadline
          );
        }
      }
      GoalCommand::Templates => {
        for (i, t) in GOAL_TEMPLATES.iter().enumerate() {
          println!("{}. {} ({}: {} {})", i + 1, t.title, t.category, t.target, t.unit);
        }
      }
      GoalCommand::Add { template, title, description, category, target, unit, deadline } => {
        let mut input = match template {
          Some(n) => {
            let template = n
              .checked_sub(1)
              .and_then(|i| GOAL_TEMPLATES.get(i))
              .with_context(|| format!("no goal template {n}"))?;
            NewGoal::from_template(template, self.today)
          }
          None => NewGoal::blank(self.today),
        };
        if let Some(title) = title {
          input.title = title;
        }
        if let Some(description) = description {
          input.description = description;
        }
        if let Some(category) = category {
          input.category = category;
        }
        if let Some(target) = target {
          input.target = target;
        }
        if let Some(unit) = unit {
          input.unit = unit;
        }
        if let Some(deadline) = deadline {
          input.deadline = deadline;
        }

        match book.add_goal(input).await.context("saving goal")? {
          Some(goal) => println!("Added goal {} ({}).", goal.id, goal.title),
          None => println!("A goal needs a title and a positive target; nothing added."),
        }
      }
      GoalCommand::Progress { id, current } => {
        match book.update_progress(&id, current).await.context("saving goal")? {
          Some(goal) if goal.completed => println!("Goal {} completed.", goal.title),
          Some(goal) => println!("{}: {:.0}%", goal.title, goal.progress_percent()),
          None => bail!("no goal with id {id}"),
        }
      }
      GoalCommand::Delete { id } => {
        if !book.delete_goal(&id).await.context("saving goals")? {
          bail!("no goal with id {id}");
        }
        println!("Deleted goal {id}.");
      }
    }
    Ok(())
  }

  // ─── Maintenance ─────────────────────────────────────────────────────────

  pub async fn status(&self) -> anyhow::Result<()> {
    println!("store: {}", self.config.store_path.display());
    let entries = self.storage.entries().await.context("listing stored keys")?;
    if entries.is_empty() {
      println!("  (empty)");
    }
    for (key, updated_at) in entries {
      println!("  {key:<14} updated {}", updated_at.format("%Y-%m-%d %H:%M:%S UTC"));
    }
    Ok(())
  }

  pub async fn clear(&self, yes: bool) -> anyhow::Result<()> {
    if !yes {
      bail!("refusing to delete all logs without --yes");
    }
    let mut journal = self.journal().await?;
    journal.clear_all().await.context("clearing journal")?;
    println!("All symptom logs, habit logs and quiz results deleted.");
    Ok(())
  }
}
