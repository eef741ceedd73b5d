//! Core data model types for wordplay.
//!
//! A [`WordBook`] is a named set of [`WordEntry`] values keyed by their
//! trimmed word text. Entries are only ever changed through the book's own
//! methods, which keep the key/word agreement and the counter invariant.

use std::collections::HashMap;
use std::fmt;

use rand::seq::IndexedRandom;
use rand::Rng;

/// Accuracy (percent) below which an exposed word counts as weak.
pub const WEAK_ACCURACY_THRESHOLD: f64 = 50.0;

/// A single word/meaning pair with its exposure and correctness counters.
///
/// Invariant: `correct_count <= exposure_count`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordEntry {
    word: String,
    meaning: String,
    exposure_count: u32,
    correct_count: u32,
}

impl WordEntry {
    pub(crate) fn new(word: String, meaning: String) -> Self {
        Self {
            word,
            meaning,
            exposure_count: 0,
            correct_count: 0,
        }
    }

    /// Rebuild an entry with existing counters, rejecting impossible ones.
    pub(crate) fn with_counts(
        word: String,
        meaning: String,
        exposure_count: u32,
        correct_count: u32,
    ) -> Option<Self> {
        (correct_count <= exposure_count).then_some(Self {
            word,
            meaning,
            exposure_count,
            correct_count,
        })
    }

    pub fn word(&self) -> &str {
        &self.word
    }

    pub fn meaning(&self) -> &str {
        &self.meaning
    }

    /// How many times this word has been shown as a question.
    pub fn exposure_count(&self) -> u32 {
        self.exposure_count
    }

    /// How many of those exposures were answered correctly.
    pub fn correct_count(&self) -> u32 {
        self.correct_count
    }

    /// Correct answers as a percentage of exposures, 0 when never exposed.
    pub fn accuracy(&self) -> f64 {
        if self.exposure_count == 0 {
            return 0.0;
        }
        self.correct_count as f64 / self.exposure_count as f64 * 100.0
    }

    /// Whether the word has been shown at least once.
    pub fn is_tested(&self) -> bool {
        self.exposure_count > 0
    }

    pub(crate) fn record_exposure(&mut self) {
        self.exposure_count = self.exposure_count.saturating_add(1);
    }

    pub(crate) fn record_correct(&mut self) -> bool {
        if self.correct_count >= self.exposure_count {
            return false;
        }
        self.correct_count += 1;
        true
    }
}

impl fmt::Display for WordEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} : {} (accuracy: {:.1}%, shown: {})",
            self.word,
            self.meaning,
            self.accuracy(),
            self.exposure_count
        )
    }
}

/// A named collection of word entries.
#[derive(Debug, Clone, PartialEq)]
pub struct WordBook {
    name: String,
    entries: HashMap<String, WordEntry>,
}

impl WordBook {
    /// Create an empty word book.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: HashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn set_name(&mut self, name: String) {
        self.name = name;
    }

    /// Add a new word with zeroed counters.
    ///
    /// Fails without mutating when either argument is blank after trimming
    /// or the trimmed word is already present.
    pub fn add_word(&mut self, word: &str, meaning: &str) -> bool {
        let word = word.trim();
        let meaning = meaning.trim();
        if word.is_empty() || meaning.is_empty() || self.entries.contains_key(word) {
            return false;
        }
        self.entries.insert(
            word.to_string(),
            WordEntry::new(word.to_string(), meaning.to_string()),
        );
        tracing::debug!(book = %self.name, word, "added word");
        true
    }

    /// Insert a fully-formed entry. Used when restoring snapshots.
    pub(crate) fn insert_entry(&mut self, entry: WordEntry) -> bool {
        if self.entries.contains_key(entry.word()) {
            return false;
        }
        self.entries.insert(entry.word.clone(), entry);
        true
    }

    pub fn remove_word(&mut self, word: &str) -> bool {
        let removed = self.entries.remove(word.trim()).is_some();
        if removed {
            tracing::debug!(book = %self.name, word = word.trim(), "removed word");
        }
        removed
    }

    /// Replace the meaning of an existing word. Counters are kept.
    pub fn update_word(&mut self, word: &str, new_meaning: &str) -> bool {
        let new_meaning = new_meaning.trim();
        if new_meaning.is_empty() {
            return false;
        }
        match self.entries.get_mut(word.trim()) {
            Some(entry) => {
                entry.meaning = new_meaning.to_string();
                true
            }
            None => false,
        }
    }

    pub fn get_word_data(&self, word: &str) -> Option<&WordEntry> {
        self.entries.get(word.trim())
    }

    /// All entries, sorted by word.
    pub fn get_all_word_data(&self) -> Vec<&WordEntry> {
        let mut all: Vec<&WordEntry> = self.entries.values().collect();
        all.sort_by(|a, b| a.word.cmp(&b.word));
        all
    }

    /// All word keys, sorted.
    pub fn words(&self) -> Vec<&str> {
        let mut words: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        words.sort_unstable();
        words
    }

    pub fn contains(&self, word: &str) -> bool {
        self.entries.contains_key(word.trim())
    }

    /// A uniformly random word, or `None` when the book is empty.
    pub fn get_random_word<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&str> {
        let keys: Vec<&String> = self.entries.keys().collect();
        keys.choose(rng).map(|w| w.as_str())
    }

    /// Exposed words whose accuracy is below [`WEAK_ACCURACY_THRESHOLD`].
    pub fn get_low_accuracy_words(&self) -> Vec<&WordEntry> {
        self.words_below_accuracy(WEAK_ACCURACY_THRESHOLD)
    }

    /// Exposed words whose accuracy is strictly below `threshold`, sorted by
    /// word. Never-shown words are not weak.
    pub fn words_below_accuracy(&self, threshold: f64) -> Vec<&WordEntry> {
        self.get_all_word_data()
            .into_iter()
            .filter(|e| e.is_tested() && e.accuracy() < threshold)
            .collect()
    }

    pub fn get_word_count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Count one presentation of `word` as a question.
    pub fn record_exposure(&mut self, word: &str) -> bool {
        match self.entries.get_mut(word.trim()) {
            Some(entry) => {
                entry.record_exposure();
                true
            }
            None => false,
        }
    }

    /// Count one correct answer for `word`.
    ///
    /// Refuses when the word is unknown or when there is no unanswered
    /// exposure left to credit.
    pub fn record_correct(&mut self, word: &str) -> bool {
        self.entries
            .get_mut(word.trim())
            .is_some_and(WordEntry::record_correct)
    }
}

impl fmt::Display for WordBook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} words)", self.name, self.entries.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn demo_book() -> WordBook {
        let mut book = WordBook::new("Demo");
        assert!(book.add_word("apple", "사과"));
        assert!(book.add_word("pear", "배"));
        for _ in 0..10 {
            book.record_exposure("apple");
        }
        for _ in 0..8 {
            book.record_correct("apple");
        }
        for _ in 0..4 {
            book.record_exposure("pear");
        }
        book.record_correct("pear");
        book
    }

    #[test]
    fn add_trims_and_starts_at_zero() {
        let mut book = WordBook::new("Basics");
        assert!(book.add_word("  cat ", " 고양이  "));
        let entry = book.get_word_data("cat").unwrap();
        assert_eq!(entry.word(), "cat");
        assert_eq!(entry.meaning(), "고양이");
        assert_eq!(entry.exposure_count(), 0);
        assert_eq!(entry.accuracy(), 0.0);
    }

    #[test]
    fn add_rejects_blank_and_duplicate() {
        let mut book = WordBook::new("Basics");
        assert!(!book.add_word("   ", "x"));
        assert!(!book.add_word("x", "\t"));
        assert!(book.add_word("dog", "개"));
        assert!(!book.add_word(" dog ", "강아지"));
        assert_eq!(book.get_word_data("dog").unwrap().meaning(), "개");
        assert_eq!(book.get_word_count(), 1);
    }

    #[test]
    fn duplicate_check_is_case_sensitive() {
        let mut book = WordBook::new("Basics");
        assert!(book.add_word("Dog", "개"));
        assert!(book.add_word("dog", "개"));
        assert_eq!(book.get_word_count(), 2);
    }

    #[test]
    fn update_keeps_counters() {
        let mut book = demo_book();
        assert!(book.update_word("apple", "  사과나무 열매 "));
        let apple = book.get_word_data("apple").unwrap();
        assert_eq!(apple.meaning(), "사과나무 열매");
        assert_eq!(apple.exposure_count(), 10);
        assert_eq!(apple.correct_count(), 8);
        assert!(!book.update_word("missing", "x"));
        assert!(!book.update_word("apple", "  "));
    }

    #[test]
    fn remove_word() {
        let mut book = demo_book();
        assert!(book.remove_word("pear"));
        assert!(!book.remove_word("pear"));
        assert!(book.get_word_data("pear").is_none());
    }

    #[test]
    fn correct_cannot_outrun_exposure() {
        let mut book = WordBook::new("Basics");
        book.add_word("cat", "고양이");
        assert!(!book.record_correct("cat"));
        assert!(book.record_exposure("cat"));
        assert!(book.record_correct("cat"));
        assert!(!book.record_correct("cat"));
        let cat = book.get_word_data("cat").unwrap();
        assert_eq!((cat.exposure_count(), cat.correct_count()), (1, 1));
        assert!(!book.record_exposure("missing"));
    }

    #[test]
    fn low_accuracy_words_excludes_untested() {
        let mut book = demo_book();
        book.add_word("plum", "자두");
        let weak: Vec<&str> = book
            .get_low_accuracy_words()
            .iter()
            .map(|e| e.word())
            .collect();
        assert_eq!(weak, vec!["pear"]);
        assert!((book.get_word_data("pear").unwrap().accuracy() - 25.0).abs() < 1e-9);
    }

    #[test]
    fn threshold_is_strict() {
        let mut book = WordBook::new("Edge");
        book.add_word("half", "반");
        book.record_exposure("half");
        book.record_exposure("half");
        book.record_correct("half");
        assert!(book.words_below_accuracy(50.0).is_empty());
        assert_eq!(book.words_below_accuracy(60.0).len(), 1);
    }

    #[test]
    fn random_word_comes_from_book() {
        let mut rng = StdRng::seed_from_u64(7);
        assert!(WordBook::new("Empty").get_random_word(&mut rng).is_none());
        let book = demo_book();
        for _ in 0..20 {
            let word = book.get_random_word(&mut rng).unwrap();
            assert!(book.contains(word));
        }
    }

    #[test]
    fn listing_is_sorted() {
        let book = demo_book();
        assert_eq!(book.words(), vec!["apple", "pear"]);
        let all: Vec<&str> = book.get_all_word_data().iter().map(|e| e.word()).collect();
        assert_eq!(all, vec!["apple", "pear"]);
        assert_eq!(book.to_string(), "Demo (2 words)");
    }
}
