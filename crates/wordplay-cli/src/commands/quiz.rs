//! The `wordplay quiz` command.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rand::Rng;

use wordplay_core::quiz::{QuizDirection, QuizSession, QuizSummary, MIN_QUIZ_WORDS, OPTION_COUNT};

use super::AppContext;

pub fn execute(
    book: Option<String>,
    direction: Option<QuizDirection>,
    weak: bool,
    words: Option<Vec<String>>,
    config_path: Option<&Path>,
    data: Option<PathBuf>,
) -> Result<()> {
    let mut ctx = AppContext::open(config_path, data)?;
    let name = ctx.book_name(book.as_deref())?;
    let direction = direction.unwrap_or(ctx.config.default_direction);
    let weak_threshold = ctx.config.weak_threshold;
    let book = ctx
        .library
        .book_mut(&name)
        .with_context(|| format!("word book not found: {name}"))?;

    let subset: Option<Vec<String>> = if weak {
        let weak_words: Vec<String> = book
            .words_below_accuracy(weak_threshold)
            .into_iter()
            .map(|e| e.word().to_string())
            .collect();
        anyhow::ensure!(!weak_words.is_empty(), "no weak words in {name}");
        Some(weak_words)
    } else {
        words
    };

    let mut rng = rand::rng();
    let mut session = match subset {
        Some(words) => {
            let session = QuizSession::with_words(book, &words, direction, &mut rng);
            anyhow::ensure!(!session.is_empty(), "none of the given words are in {name}");
            session
        }
        None => {
            anyhow::ensure!(
                book.get_word_count() >= MIN_QUIZ_WORDS,
                "a quiz needs at least {MIN_QUIZ_WORDS} words, {name} has {}",
                book.get_word_count()
            );
            QuizSession::new(book, direction, &mut rng)
        }
    };

    let summary = run(&mut session, &mut rng, io::stdin().lock(), io::stdout().lock())?;
    tracing::debug!(
        questions = summary.questions,
        correct = summary.correct,
        "quiz finished"
    );
    drop(session);
    ctx.close()
}

/// Drive a session from line-based input until it ends, the input runs out,
/// or the player enters `q`.
pub fn run<R: Rng + ?Sized, I: BufRead, O: Write>(
    session: &mut QuizSession<'_>,
    rng: &mut R,
    mut input: I,
    mut out: O,
) -> Result<QuizSummary> {
    writeln!(
        out,
        "Quiz: {} question(s), {}",
        session.len(),
        session.direction()
    )?;
    let total = session.len();

    'questions: while let Some(question) = session.next_question(rng) {
        writeln!(out, "\nQ{}/{}: {}", question.number, total, question.prompt)?;
        for (i, option) in question.choices.options.iter().enumerate() {
            writeln!(out, "  {}) {}", i + 1, option)?;
        }

        loop {
            write!(out, "Answer (1-{OPTION_COUNT}, q to quit): ")?;
            out.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                break 'questions;
            }
            let line = line.trim();
            if line.eq_ignore_ascii_case("q") {
                break 'questions;
            }

            let choice = line
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .and_then(|i| session.answer(i));
            match choice {
                Some(outcome) if outcome.correct => {
                    writeln!(out, "Correct!")?;
                    break;
                }
                Some(outcome) => {
                    writeln!(out, "Wrong. The answer was: {}", outcome.correct_answer)?;
                    break;
                }
                None => writeln!(out, "Please enter a number from 1 to {OPTION_COUNT}.")?,
            }
        }
    }

    let summary = session.summary();
    writeln!(
        out,
        "\nQuiz finished: {}/{} correct ({:.1}%)",
        summary.correct,
        summary.questions,
        summary.accuracy()
    )?;
    Ok(summary)
}
