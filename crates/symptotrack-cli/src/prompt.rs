//! Reading quiz answers, either from `--answers` or from stdin.

use std::io::{self, BufRead, Write};

use anyhow::{Context as _, bail};
use symptotrack_core::quiz::QuizQuestion;

/// Parse one 1-based answer slot. Empty means skipped.
fn parse_slot(raw: &str, question: &QuizQuestion) -> anyhow::Result<Option<usize>> {
  let raw = raw.trim();
  if raw.is_empty() {
    return Ok(None);
  }
  let n: usize = raw
    .parse()
    .with_context(|| format!("answer {raw:?} is not a number"))?;
  if n == 0 || n > question.options.len() {
    bail!("answer {n} is out of range 1-{}", question.options.len());
  }
  Ok(Some(n - 1))
}

/// Answers given up front on the command line.
pub fn answers_from_args(
  questions: &[QuizQuestion],
  raw: &[String],
) -> anyhow::Result<Vec<Option<usize>>> {
  questions
    .iter()
    .zip(raw.iter().map(String::as_str).chain(std::iter::repeat("")))
    .enumerate()
    .map(|(i, (q, slot))| {
      parse_slot(slot, q).with_context(|| format!("question {}", i + 1))
    })
    .collect()
}

/// Ask every question on stdout and read answers from stdin. See [`ask_from`].
pub fn ask(questions: &[QuizQuestion]) -> anyhow::Result<Option<Vec<Option<usize>>>> {
  ask_from(questions, io::stdin().lock(), io::stdout().lock())
}

/// Ask every question on `out` and read one answer per line from `input`.
/// A blank line skips the question and an invalid one is asked again.
/// Running out of input before the last question aborts with `None`.
pub fn ask_from<R: BufRead, W: Write>(
  questions: &[QuizQuestion],
  input: R,
  mut out: W,
) -> anyhow::Result<Option<Vec<Option<usize>>>> {
  let mut lines = input.lines();
  let mut answers = Vec::with_capacity(questions.len());

  for (i, q) in questions.iter().enumerate() {
    writeln!(out, "\nQuestion {} of {} [{}]", i + 1, questions.len(), q.category)?;
    writeln!(out, "{}", q.question)?;
    for (n, option) in q.options.iter().enumerate() {
      writeln!(out, "  {}. {option}", n + 1)?;
    }

    loop {
      write!(out, "> ")?;
      out.flush()?;
      let Some(line) = lines.next() else {
        tracing::debug!(answered = answers.len(), "input closed before the quiz finished");
        return Ok(None);
      };
      match parse_slot(&line.context("reading answer")?, q) {
        Ok(answer) => {
          answers.push(answer);
          break;
        }
        Err(err) => writeln!(out, "{err:#}")?,
      }
    }
  }
  Ok(Some(answers))
}

#[cfg(test)]
mod tests {
  use std::io::Cursor;

  use symptotrack_core::quiz::QUESTIONS;

  use super::*;

  #[test]
  fn args_are_one_based_and_padded() {
    let raw = vec!["3".to_owned(), "".to_owned(), "1".to_owned()];
    let answers = answers_from_args(QUESTIONS, &raw).unwrap();
    assert_eq!(answers.len(), QUESTIONS.len());
    assert_eq!(&answers[..3], &[Some(2), None, Some(0)]);
    assert!(answers[3..].iter().all(Option::is_none));
  }

  #[test]
  fn out_of_range_answer_is_rejected() {
    assert!(answers_from_args(QUESTIONS, &["5".to_owned()]).is_err());
    assert!(answers_from_args(QUESTIONS, &["0".to_owned()]).is_err());
    assert!(answers_from_args(QUESTIONS, &["x".to_owned()]).is_err());
  }

  #[test]
  fn interactive_answers_are_read_per_line() {
    let input = "1\n\n2\n3\n4\n1\n2\n3\n";
    let mut out = Vec::new();
    let answers = ask_from(QUESTIONS, Cursor::new(input), &mut out)
      .unwrap()
      .unwrap();
    assert_eq!(answers, vec![
      Some(0),
      None,
      Some(1),
      Some(2),
      Some(3),
      Some(0),
      Some(1),
      Some(2)
    ]);
    let shown = String::from_utf8(out).unwrap();
    assert!(shown.contains("Question 8 of 8"));
  }

  #[test]
  fn invalid_line_is_asked_again() {
    let input = format!("9\n1\n{}", "1\n".repeat(QUESTIONS.len() - 1));
    let mut out = Vec::new();
    let answers = ask_from(QUESTIONS, Cursor::new(input), &mut out)
      .unwrap()
      .unwrap();
    assert_eq!(answers[0], Some(0));
    assert!(String::from_utf8(out).unwrap().contains("out of range"));
  }

  #[test]
  fn early_end_of_input_aborts() {
    let answers = ask_from(QUESTIONS, Cursor::new("1\n2\n"), io::sink()).unwrap();
    assert!(answers.is_none());
    assert!(ask_from(QUESTIONS, Cursor::new(""), io::sink()).unwrap().is_none());
  }
}
