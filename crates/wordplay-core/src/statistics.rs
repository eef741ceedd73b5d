//! Learning statistics for a word book.
//!
//! Everything here is a pure fold over the book's entries; computing the
//! statistics never changes the book.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::{WordBook, WordEntry, WEAK_ACCURACY_THRESHOLD};

/// Accuracy (percent) at or above which a word counts as strong.
pub const STRONG_ACCURACY_THRESHOLD: f64 = 80.0;

/// Accuracy cut-offs used to classify words.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatusThresholds {
    /// Exposed words below this are weak.
    pub weak: f64,
    /// Words at or above this are strong.
    pub strong: f64,
}

impl Default for StatusThresholds {
    fn default() -> Self {
        Self {
            weak: WEAK_ACCURACY_THRESHOLD,
            strong: STRONG_ACCURACY_THRESHOLD,
        }
    }
}

impl StatusThresholds {
    pub fn classify(&self, entry: &WordEntry) -> WordStatus {
        if !entry.is_tested() {
            return WordStatus::NotTested;
        }
        self.classify_accuracy(entry.accuracy())
    }

    /// Band for an accuracy value of something that has been tested.
    pub fn classify_accuracy(&self, accuracy: f64) -> WordStatus {
        if accuracy >= self.strong {
            WordStatus::Strong
        } else if accuracy >= self.weak {
            WordStatus::Average
        } else {
            WordStatus::Weak
        }
    }
}

/// Learning status of one word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WordStatus {
    NotTested,
    Strong,
    Average,
    Weak,
}

impl fmt::Display for WordStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WordStatus::NotTested => write!(f, "not yet tested"),
            WordStatus::Strong => write!(f, "strong"),
            WordStatus::Average => write!(f, "average"),
            WordStatus::Weak => write!(f, "weak"),
        }
    }
}

/// One row of the per-word table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordStats {
    pub word: String,
    pub meaning: String,
    pub exposure_count: u32,
    pub correct_count: u32,
    /// Percent; 0 when never exposed.
    pub accuracy: f64,
    pub status: WordStatus,
}

impl WordStats {
    fn from_entry(entry: &WordEntry, thresholds: &StatusThresholds) -> Self {
        Self {
            word: entry.word().to_string(),
            meaning: entry.meaning().to_string(),
            exposure_count: entry.exposure_count(),
            correct_count: entry.correct_count(),
            accuracy: entry.accuracy(),
            status: thresholds.classify(entry),
        }
    }
}

/// Summary metrics and per-word rows for one book.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookStatistics {
    pub book_name: String,
    pub total_words: usize,
    pub total_exposures: u64,
    pub total_correct: u64,
    /// `total_correct / total_exposures * 100`, 0 when nothing was shown.
    pub average_accuracy: f64,
    pub thresholds: StatusThresholds,
    /// Every word, sorted.
    pub words: Vec<WordStats>,
    /// Exposed words below the weak threshold, sorted.
    pub weak_words: Vec<WordStats>,
}

impl BookStatistics {
    /// Fold a book's entries into statistics.
    pub fn compute(book: &WordBook, thresholds: &StatusThresholds) -> Self {
        let entries = book.get_all_word_data();

        let total_exposures: u64 = entries.iter().map(|e| e.exposure_count() as u64).sum();
        let total_correct: u64 = entries.iter().map(|e| e.correct_count() as u64).sum();
        let average_accuracy = if total_exposures > 0 {
            total_correct as f64 / total_exposures as f64 * 100.0
        } else {
            0.0
        };

        let words: Vec<WordStats> = entries
            .iter()
            .map(|e| WordStats::from_entry(e, thresholds))
            .collect();
        let weak_words = book
            .words_below_accuracy(thresholds.weak)
            .into_iter()
            .map(|e| WordStats::from_entry(e, thresholds))
            .collect();

        Self {
            book_name: book.name().to_string(),
            total_words: entries.len(),
            total_exposures,
            total_correct,
            average_accuracy,
            thresholds: *thresholds,
            words,
            weak_words,
        }
    }

    /// Band of the book-wide average, or `None` if nothing was shown yet.
    pub fn overall_status(&self) -> Option<WordStatus> {
        (self.total_exposures > 0)
            .then(|| self.thresholds.classify_accuracy(self.average_accuracy))
    }

    /// Number of words in each status.
    pub fn status_counts(&self) -> StatusCounts {
        let mut counts = StatusCounts::default();
        for w in &self.words {
            match w.status {
                WordStatus::NotTested => counts.not_tested += 1,
                WordStatus::Strong => counts.strong += 1,
                WordStatus::Average => counts.average += 1,
                WordStatus::Weak => counts.weak += 1,
            }
        }
        counts
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub not_tested: usize,
    pub strong: usize,
    pub average: usize,
    pub weak: usize,
}
