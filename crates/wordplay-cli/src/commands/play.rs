//! The `wordplay match` command.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use wordplay_core::matching::{MatchGame, MatchSummary, SelectOutcome, MIN_MATCH_WORDS};

use super::AppContext;

pub fn execute(book: Option<String>, config_path: Option<&Path>, data: Option<PathBuf>) -> Result<()> {
    let mut ctx = AppContext::open(config_path, data)?;
    let name = ctx.book_name(book.as_deref())?;
    let max_pairs = ctx.config.match_pairs;
    let book = ctx
        .library
        .book_mut(&name)
        .with_context(|| format!("word book not found: {name}"))?;
    anyhow::ensure!(
        book.get_word_count() >= MIN_MATCH_WORDS,
        "a matching game needs at least {MIN_MATCH_WORDS} words, {name} has {}",
        book.get_word_count()
    );

    let mut game = MatchGame::new(book, max_pairs, &mut rand::rng());
    let summary = run(&mut game, io::stdin().lock(), io::stdout().lock())?;
    tracing::debug!(
        matched = summary.matched_pairs,
        attempts = summary.attempts,
        elapsed_secs = summary.elapsed.as_secs(),
        "match game finished"
    );
    drop(game);
    ctx.close()
}

fn print_board<O: Write>(game: &MatchGame<'_>, out: &mut O) -> io::Result<()> {
    writeln!(out)?;
    for (i, tile) in game.tiles().iter().enumerate() {
        let marker = if game.selected() == Some(i) { ">" } else { " " };
        if tile.matched {
            writeln!(out, "{marker}{:>3}) --", i + 1)?;
        } else {
            writeln!(out, "{marker}{:>3}) {}", i + 1, tile.text)?;
        }
    }
    Ok(())
}

/// Play a game from line-based input until every pair is matched, the input
/// runs out, or the player enters `q`.
pub fn run<I: BufRead, O: Write>(
    game: &mut MatchGame<'_>,
    mut input: I,
    mut out: O,
) -> Result<MatchSummary> {
    writeln!(
        out,
        "Match each word with its meaning ({} pairs).",
        game.summary().total_pairs
    )?;
    print_board(game, &mut out)?;

    while !game.is_complete() {
        write!(out, "Tile (q to quit): ")?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        if line.eq_ignore_ascii_case("q") {
            break;
        }

        let outcome = line
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .map_or(SelectOutcome::Ignored, |i| game.select(i));
        match outcome {
            SelectOutcome::Ignored => {
                writeln!(out, "Pick the number of an unmatched tile.")?;
                continue;
            }
            SelectOutcome::Selected | SelectOutcome::Reselected | SelectOutcome::Deselected => {}
            SelectOutcome::Matched | SelectOutcome::Completed => writeln!(out, "Match!")?,
            SelectOutcome::Mismatched => writeln!(out, "Not a pair.")?,
        }
        print_board(game, &mut out)?;
    }

    let summary = game.summary();
    writeln!(
        out,
        "\nMatched {}/{} pairs in {} attempt(s) ({:.1}% success)",
        summary.matched_pairs,
        summary.total_pairs,
        summary.attempts,
        summary.success_rate()
    )?;
    writeln!(out, "Time: {}s", summary.elapsed.as_secs())?;
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use wordplay_core::matching::Side;
    use wordplay_core::WordBook;

    fn book() -> WordBook {
        let mut book = WordBook::new("Animals");
        book.add_word("cat", "고양이");
        book.add_word("dog", "개");
        book.add_word("bird", "새");
        book
    }

    #[test]
    fn solving_the_board_completes() {
        let mut b = book();
        let mut rng = StdRng::seed_from_u64(11);
        let mut game = MatchGame::new(&mut b, 8, &mut rng);

        let mut script = String::new();
        for word in ["bird", "cat", "dog"] {
            for side in [Side::Word, Side::Meaning] {
                let i = game
                    .tiles()
                    .iter()
                    .position(|t| t.word == word && t.side == side)
                    .unwrap();
                script.push_str(&format!("{}\n", i + 1));
            }
        }

        let mut out = Vec::new();
        let summary = run(&mut game, script.as_bytes(), &mut out).unwrap();
        assert!(summary.is_complete());
        assert_eq!(summary.attempts, 3);
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Matched 3/3 pairs in 3 attempt(s) (100.0% success)"));
        assert!(text.contains("Time: "));
    }

    #[test]
    fn bad_input_is_ignored_and_q_quits() {
        let mut b = book();
        let mut rng = StdRng::seed_from_u64(12);
        let mut game = MatchGame::new(&mut b, 8, &mut rng);
        let mut out = Vec::new();
        let summary = run(&mut game, "abc\n0\n99\nq\n".as_bytes(), &mut out).unwrap();
        assert_eq!(summary.attempts, 0);
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches("Pick the number of an unmatched tile.").count(), 3);
        assert!(text.contains("Matched 0/3 pairs"));
    }
}
