//! Pair-matching game: find each word's meaning among shuffled tiles.

use std::time::{Duration, Instant};

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

use crate::model::WordBook;

/// Smallest book a matching game can be played on.
pub const MIN_MATCH_WORDS: usize = 3;

/// Default number of pairs laid out in one game.
pub const DEFAULT_MATCH_PAIRS: usize = 8;

/// Which half of a pair a tile shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Word,
    Meaning,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    /// Key of the entry this tile belongs to.
    pub word: String,
    pub side: Side,
    /// Text printed on the tile.
    pub text: String,
    pub matched: bool,
}

/// What a tile selection did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    /// Out of range or already matched; nothing changed.
    Ignored,
    /// First tile of a pair picked.
    Selected,
    /// The selected tile was picked again and released.
    Deselected,
    /// A tile of the same side was picked; it replaces the selection.
    Reselected,
    /// The two tiles belong together.
    Matched,
    /// The last pair was matched.
    Completed,
    /// The two tiles belong to different words.
    Mismatched,
}

/// Game totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MatchSummary {
    pub matched_pairs: usize,
    pub total_pairs: usize,
    pub attempts: usize,
    /// Time since the board was laid out.
    pub elapsed: Duration,
}

impl MatchSummary {
    /// Matched pairs as a percentage of attempts.
    pub fn success_rate(&self) -> f64 {
        if self.attempts == 0 {
            return 0.0;
        }
        self.matched_pairs as f64 / self.attempts as f64 * 100.0
    }

    pub fn is_complete(&self) -> bool {
        self.matched_pairs == self.total_pairs
    }
}

/// A running matching game.
///
/// A match records one exposure and one correct answer for the word. A
/// mismatch records one exposure for the word of the tile picked first.
pub struct MatchGame<'a> {
    book: &'a mut WordBook,
    tiles: Vec<Tile>,
    selected: Option<usize>,
    matched_pairs: usize,
    total_pairs: usize,
    attempts: usize,
    started: Instant,
}

impl<'a> MatchGame<'a> {
    /// Lay out up to `max_pairs` random words from the book.
    pub fn new<R: Rng + ?Sized>(book: &'a mut WordBook, max_pairs: usize, rng: &mut R) -> Self {
        let mut entries = book.get_all_word_data();
        entries.shuffle(rng);
        entries.truncate(max_pairs);

        let mut tiles: Vec<Tile> = Vec::with_capacity(entries.len() * 2);
        for entry in &entries {
            tiles.push(Tile {
                word: entry.word().to_string(),
                side: Side::Word,
                text: entry.word().to_string(),
                matched: false,
            });
            tiles.push(Tile {
                word: entry.word().to_string(),
                side: Side::Meaning,
                text: entry.meaning().to_string(),
                matched: false,
            });
        }
        tiles.shuffle(rng);
        let total_pairs = entries.len();

        Self {
            book,
            tiles,
            selected: None,
            matched_pairs: 0,
            total_pairs,
            attempts: 0,
            started: Instant::now(),
        }
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn is_complete(&self) -> bool {
        self.matched_pairs == self.total_pairs
    }

    /// Pick a tile by index.
    pub fn select(&mut self, index: usize) -> SelectOutcome {
        match self.tiles.get(index) {
            Some(tile) if !tile.matched => {}
            _ => return SelectOutcome::Ignored,
        }

        let Some(first) = self.selected else {
            self.selected = Some(index);
            return SelectOutcome::Selected;
        };
        if first == index {
            self.selected = None;
            return SelectOutcome::Deselected;
        }
        if self.tiles[first].side == self.tiles[index].side {
            self.selected = Some(index);
            return SelectOutcome::Reselected;
        }

        self.attempts += 1;
        self.selected = None;
        let word = self.tiles[first].word.clone();

        if word == self.tiles[index].word {
            self.tiles[first].matched = true;
            self.tiles[index].matched = true;
            self.book.record_exposure(&word);
            self.book.record_correct(&word);
            self.matched_pairs += 1;
            tracing::debug!(word = %word, "pair matched");
            if self.is_complete() {
                SelectOutcome::Completed
            } else {
                SelectOutcome::Matched
            }
        } else {
            self.book.record_exposure(&word);
            SelectOutcome::Mismatched
        }
    }

    pub fn summary(&self) -> MatchSummary {
        MatchSummary {
            matched_pairs: self.matched_pairs,
            total_pairs: self.total_pairs,
            attempts: self.attempts,
            elapsed: self.started.elapsed(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn book(n: usize) -> WordBook {
        let mut book = WordBook::new("Match");
        for i in 0..n {
            assert!(book.add_word(&format!("word{i}"), &format!("meaning{i}")));
        }
        book
    }

    fn find(game: &MatchGame<'_>, word: &str, side: Side) -> usize {
        game.tiles()
            .iter()
            .position(|t| t.word == word && t.side == side)
            .unwrap()
    }

    #[test]
    fn layout_caps_pairs() {
        let mut b = book(10);
        let mut rng = StdRng::seed_from_u64(1);
        let game = MatchGame::new(&mut b, DEFAULT_MATCH_PAIRS, &mut rng);
        assert_eq!(game.tiles().len(), 16);
        assert_eq!(game.summary().total_pairs, 8);
        let words = game.tiles().iter().filter(|t| t.side == Side::Word).count();
        assert_eq!(words, 8);
    }

    #[test]
    fn matching_every_pair_completes() {
        let mut b = book(3);
        let mut rng = StdRng::seed_from_u64(2);
        let mut game = MatchGame::new(&mut b, DEFAULT_MATCH_PAIRS, &mut rng);
        let mut last = SelectOutcome::Ignored;
        for i in 0..3 {
            let w = find(&game, &format!("word{i}"), Side::Word);
            let m = find(&game, &format!("word{i}"), Side::Meaning);
            assert_eq!(game.select(m), SelectOutcome::Selected);
            last = game.select(w);
        }
        assert_eq!(last, SelectOutcome::Completed);
        let summary = game.summary();
        assert!(summary.is_complete());
        assert_eq!(summary.attempts, 3);
        assert!((summary.success_rate() - 100.0).abs() < 1e-9);
        drop(game);
        for entry in b.get_all_word_data() {
            assert_eq!((entry.exposure_count(), entry.correct_count()), (1, 1));
        }
    }

    #[test]
    fn mismatch_charges_first_selection() {
        let mut b = book(3);
        let mut rng = StdRng::seed_from_u64(3);
        let mut game = MatchGame::new(&mut b, DEFAULT_MATCH_PAIRS, &mut rng);
        let w0 = find(&game, "word0", Side::Word);
        let m1 = find(&game, "word1", Side::Meaning);
        game.select(w0);
        assert_eq!(game.select(m1), SelectOutcome::Mismatched);
        assert!(game.selected().is_none());
        assert_eq!(game.summary().attempts, 1);
        assert_eq!(game.summary().success_rate(), 0.0);
        drop(game);
        assert_eq!(b.get_word_data("word0").unwrap().exposure_count(), 1);
        assert_eq!(b.get_word_data("word1").unwrap().exposure_count(), 0);
        assert_eq!(b.get_word_data("word0").unwrap().correct_count(), 0);
    }

    #[test]
    fn same_tile_and_same_side_selection() {
        let mut b = book(3);
        let mut rng = StdRng::seed_from_u64(4);
        let mut game = MatchGame::new(&mut b, DEFAULT_MATCH_PAIRS, &mut rng);
        let w0 = find(&game, "word0", Side::Word);
        let w1 = find(&game, "word1", Side::Word);
        assert_eq!(game.select(w0), SelectOutcome::Selected);
        assert_eq!(game.select(w0), SelectOutcome::Deselected);
        game.select(w0);
        assert_eq!(game.select(w1), SelectOutcome::Reselected);
        assert_eq!(game.selected(), Some(w1));
        assert_eq!(game.summary().attempts, 0);
        assert_eq!(game.select(999), SelectOutcome::Ignored);
    }

    #[test]
    fn matched_tiles_are_ignored() {
        let mut b = book(3);
        let mut rng = StdRng::seed_from_u64(5);
        let mut game = MatchGame::new(&mut b, DEFAULT_MATCH_PAIRS, &mut rng);
        let w0 = find(&game, "word0", Side::Word);
        let m0 = find(&game, "word0", Side::Meaning);
        game.select(w0);
        assert_eq!(game.select(m0), SelectOutcome::Matched);
        assert_eq!(game.select(w0), SelectOutcome::Ignored);
        assert!(game.tiles()[m0].matched);
    }

    #[test]
    fn elapsed_time_moves_forward() {
        let mut b = book(3);
        let mut rng = StdRng::seed_from_u64(6);
        let game = MatchGame::new(&mut b, DEFAULT_MATCH_PAIRS, &mut rng);
        let first = game.summary().elapsed;
        std::thread::sleep(Duration::from_millis(5));
        assert!(game.summary().elapsed > first);
    }
}
