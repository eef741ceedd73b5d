//! Multiple-choice quiz: option generation and question sessions.

use std::fmt;
use std::str::FromStr;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::model::{WordBook, WordEntry};

/// Number of choices shown for every question.
pub const OPTION_COUNT: usize = 4;

/// Smallest book a full quiz can be run on.
pub const MIN_QUIZ_WORDS: usize = 4;

/// Which side of an entry is shown and which side is picked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuizDirection {
    /// Show the meaning, pick the word.
    #[default]
    MeaningToWord,
    /// Show the word, pick the meaning.
    WordToMeaning,
}

impl QuizDirection {
    /// The text shown as the question.
    pub fn prompt_text(self, entry: &WordEntry) -> &str {
        match self {
            QuizDirection::MeaningToWord => entry.meaning(),
            QuizDirection::WordToMeaning => entry.word(),
        }
    }

    /// The text of the correct choice.
    pub fn answer_text(self, entry: &WordEntry) -> &str {
        match self {
            QuizDirection::MeaningToWord => entry.word(),
            QuizDirection::WordToMeaning => entry.meaning(),
        }
    }
}

impl fmt::Display for QuizDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuizDirection::MeaningToWord => write!(f, "meaning-to-word"),
            QuizDirection::WordToMeaning => write!(f, "word-to-meaning"),
        }
    }
}

impl FromStr for QuizDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "meaning-to-word" | "m2w" | "meaning" => Ok(QuizDirection::MeaningToWord),
            "word-to-meaning" | "w2m" | "word" => Ok(QuizDirection::WordToMeaning),
            other => Err(format!("unknown quiz direction: {other}")),
        }
    }
}

/// The choices for one question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizOptions {
    /// Exactly [`OPTION_COUNT`] distinct texts.
    pub options: Vec<String>,
    /// Position of the correct text in `options`.
    pub correct_index: usize,
}

impl QuizOptions {
    pub fn correct_text(&self) -> &str {
        &self.options[self.correct_index]
    }
}

fn placeholder(n: usize) -> String {
    format!("(choice {n})")
}

/// Build the choices for `target`.
///
/// Distractors are the other entries of `book` in random order, skipping any
/// whose text repeats a choice already taken. When the book runs out, the
/// set is padded with placeholder labels that never repeat an existing
/// choice. The four choices are then shuffled. Counters are not touched.
pub fn generate_options<R: Rng + ?Sized>(
    book: &WordBook,
    target: &WordEntry,
    direction: QuizDirection,
    rng: &mut R,
) -> QuizOptions {
    let correct = direction.answer_text(target);

    let mut candidates: Vec<&WordEntry> = book
        .get_all_word_data()
        .into_iter()
        .filter(|e| e.word() != target.word())
        .collect();
    candidates.shuffle(rng);

    let mut options: Vec<String> = Vec::with_capacity(OPTION_COUNT);
    options.push(correct.to_string());
    for candidate in candidates {
        if options.len() == OPTION_COUNT {
            break;
        }
        let text = direction.answer_text(candidate);
        if !options.iter().any(|o| o == text) {
            options.push(text.to_string());
        }
    }

    let mut n = options.len();
    while options.len() < OPTION_COUNT {
        let label = placeholder(n);
        n += 1;
        if !options.contains(&label) {
            options.push(label);
        }
    }

    options.shuffle(rng);
    let correct_index = options.iter().position(|o| o == correct).unwrap_or(0);

    QuizOptions {
        options,
        correct_index,
    }
}

/// A question currently on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    /// Key of the entry being asked about.
    pub word: String,
    /// Text shown to the learner.
    pub prompt: String,
    pub choices: QuizOptions,
    /// 1-based position in the session.
    pub number: usize,
    answered: bool,
}

impl Question {
    pub fn is_answered(&self) -> bool {
        self.answered
    }
}

/// The judgement for one answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub correct: bool,
    pub chosen: String,
    pub correct_answer: String,
}

/// Running totals of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuizSummary {
    /// Questions shown so far.
    pub questions: usize,
    /// Questions answered correctly.
    pub correct: usize,
}

impl QuizSummary {
    pub fn accuracy(&self) -> f64 {
        if self.questions == 0 {
            return 0.0;
        }
        self.correct as f64 / self.questions as f64 * 100.0
    }
}

/// One pass over a set of words in random order.
///
/// Showing a question records one exposure for its word; a correct answer
/// records one correct answer. Each question is judged at most once.
pub struct QuizSession<'a> {
    book: &'a mut WordBook,
    direction: QuizDirection,
    queue: Vec<String>,
    position: usize,
    current: Option<Question>,
    asked: usize,
    correct: usize,
}

impl<'a> QuizSession<'a> {
    /// Quiz every word in the book.
    pub fn new<R: Rng + ?Sized>(
        book: &'a mut WordBook,
        direction: QuizDirection,
        rng: &mut R,
    ) -> Self {
        let words: Vec<String> = book.words().into_iter().map(str::to_string).collect();
        Self::from_queue(book, words, direction, rng)
    }

    /// Quiz only the given words. Unknown and repeated words are dropped;
    /// distractors are still drawn from the whole book.
    pub fn with_words<R: Rng + ?Sized, W: AsRef<str>>(
        book: &'a mut WordBook,
        words: &[W],
        direction: QuizDirection,
        rng: &mut R,
    ) -> Self {
        let mut queue: Vec<String> = Vec::new();
        for w in words {
            let w = w.as_ref().trim();
            if book.contains(w) && !queue.iter().any(|q| q == w) {
                queue.push(w.to_string());
            }
        }
        Self::from_queue(book, queue, direction, rng)
    }

    fn from_queue<R: Rng + ?Sized>(
        book: &'a mut WordBook,
        mut queue: Vec<String>,
        direction: QuizDirection,
        rng: &mut R,
    ) -> Self {
        queue.shuffle(rng);
        Self {
            book,
            direction,
            queue,
            position: 0,
            current: None,
            asked: 0,
            correct: 0,
        }
    }

    pub fn direction(&self) -> QuizDirection {
        self.direction
    }

    /// Number of questions in the whole session.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn is_finished(&self) -> bool {
        self.position >= self.queue.len()
    }

    pub fn current(&self) -> Option<&Question> {
        self.current.as_ref()
    }

    /// Move to the next question and record its exposure.
    ///
    /// An unanswered current question is abandoned and counts as wrong.
    pub fn next_question<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<&Question> {
        self.current = None;
        while self.position < self.queue.len() {
            let word = self.queue[self.position].clone();
            self.position += 1;

            let Some(entry) = self.book.get_word_data(&word) else {
                continue;
            };
            let prompt = self.direction.prompt_text(entry).to_string();
            let choices = generate_options(&*self.book, entry, self.direction, rng);

            self.book.record_exposure(&word);
            self.asked += 1;
            self.current = Some(Question {
                word,
                prompt,
                choices,
                number: self.position,
                answered: false,
            });
            break;
        }
        self.current.as_ref()
    }

    /// Judge a choice (0-based) for the current question.
    ///
    /// Returns `None` when there is no open question or the index is out of
    /// range.
    pub fn answer(&mut self, choice: usize) -> Option<AnswerOutcome> {
        let question = self.current.as_mut()?;
        if question.answered || choice >= question.choices.options.len() {
            return None;
        }
        question.answered = true;

        let correct = choice == question.choices.correct_index;
        if correct {
            self.book.record_correct(&question.word);
            self.correct += 1;
        }
        Some(AnswerOutcome {
            correct,
            chosen: question.choices.options[choice].clone(),
            correct_answer: question.choices.correct_text().to_string(),
        })
    }

    pub fn summary(&self) -> QuizSummary {
        QuizSummary {
            questions: self.asked,
            correct: self.correct,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn book_with(pairs: &[(&str, &str)]) -> WordBook {
        let mut book = WordBook::new("Quiz");
        for (w, m) in pairs {
            assert!(book.add_word(w, m));
        }
        book
    }

    fn five_words() -> WordBook {
        book_with(&[
            ("apple", "사과"),
            ("pear", "배"),
            ("cat", "고양이"),
            ("dog", "개"),
            ("ox", "소"),
        ])
    }

    #[test]
    fn direction_display_and_parse() {
        assert_eq!(QuizDirection::MeaningToWord.to_string(), "meaning-to-word");
        assert_eq!(
            "W2M".parse::<QuizDirection>().unwrap(),
            QuizDirection::WordToMeaning
        );
        assert_eq!(
            "meaning".parse::<QuizDirection>().unwrap(),
            QuizDirection::MeaningToWord
        );
        assert!("sideways".parse::<QuizDirection>().is_err());
    }

    #[test]
    fn options_have_four_distinct_with_correct_once() {
        let book = five_words();
        let mut rng = StdRng::seed_from_u64(1);
        for direction in [QuizDirection::MeaningToWord, QuizDirection::WordToMeaning] {
            for word in book.words() {
                let target = book.get_word_data(word).unwrap();
                let opts = generate_options(&book, target, direction, &mut rng);
                assert_eq!(opts.options.len(), OPTION_COUNT);
                let correct = direction.answer_text(target);
                assert_eq!(opts.options.iter().filter(|o| *o == correct).count(), 1);
                assert_eq!(opts.correct_text(), correct);
                let mut sorted = opts.options.clone();
                sorted.sort();
                sorted.dedup();
                assert_eq!(sorted.len(), OPTION_COUNT);
            }
        }
    }

    #[test]
    fn duplicate_meanings_are_skipped() {
        let book = book_with(&[
            ("big", "크다"),
            ("large", "크다"),
            ("huge", "크다"),
            ("small", "작다"),
        ]);
        let mut rng = StdRng::seed_from_u64(3);
        let target = book.get_word_data("big").unwrap();
        let opts = generate_options(&book, target, QuizDirection::WordToMeaning, &mut rng);
        assert_eq!(opts.options.iter().filter(|o| *o == "크다").count(), 1);
        assert!(opts.options.contains(&"작다".to_string()));
        assert_eq!(
            opts.options.iter().filter(|o| o.starts_with("(choice")).count(),
            2
        );
    }

    #[test]
    fn small_book_is_padded() {
        let book = book_with(&[("cat", "고양이")]);
        let mut rng = StdRng::seed_from_u64(5);
        let target = book.get_word_data("cat").unwrap();
        let opts = generate_options(&book, target, QuizDirection::MeaningToWord, &mut rng);
        assert_eq!(opts.options.len(), OPTION_COUNT);
        assert_eq!(opts.correct_text(), "cat");
    }

    #[test]
    fn padded_choices_are_shuffled_together() {
        let book = book_with(&[("cat", "a"), ("dog", "b")]);
        let target = book.get_word_data("cat").unwrap().clone();
        let mut rng = StdRng::seed_from_u64(17);
        let mut dog_after_placeholder = false;
        for _ in 0..200 {
            let opts = generate_options(&book, &target, QuizDirection::MeaningToWord, &mut rng);
            assert_eq!(opts.correct_text(), "cat");
            let dog = opts.options.iter().position(|o| o == "dog").unwrap();
            let first_placeholder = opts
                .options
                .iter()
                .position(|o| o.starts_with("(choice"))
                .unwrap();
            dog_after_placeholder |= dog > first_placeholder;
        }
        assert!(dog_after_placeholder);
    }

    #[test]
    fn placeholders_never_collide_with_real_text() {
        let book = book_with(&[("(choice 1)", "one"), ("(choice 2)", "two")]);
        let mut rng = StdRng::seed_from_u64(9);
        let target = book.get_word_data("(choice 1)").unwrap();
        let opts = generate_options(&book, target, QuizDirection::MeaningToWord, &mut rng);
        let mut sorted = opts.options.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), OPTION_COUNT);
        assert_eq!(opts.correct_text(), "(choice 1)");
    }

    #[test]
    fn correct_position_varies() {
        let book = five_words();
        let target = book.get_word_data("apple").unwrap().clone();
        let mut rng = StdRng::seed_from_u64(11);
        let mut seen = [false; OPTION_COUNT];
        for _ in 0..200 {
            let opts = generate_options(&book, &target, QuizDirection::MeaningToWord, &mut rng);
            seen[opts.correct_index] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn generating_options_does_not_touch_counters() {
        let book = five_words();
        let before = book.clone();
        let mut rng = StdRng::seed_from_u64(2);
        let target = book.get_word_data("dog").unwrap();
        generate_options(&book, target, QuizDirection::WordToMeaning, &mut rng);
        assert_eq!(book, before);
    }

    #[test]
    fn session_records_exposure_and_correct() {
        let mut book = five_words();
        let mut rng = StdRng::seed_from_u64(21);
        let mut session = QuizSession::new(&mut book, QuizDirection::MeaningToWord, &mut rng);
        assert_eq!(session.len(), 5);

        let mut answered_right = 0;
        let mut i = 0;
        while let Some(q) = session.next_question(&mut rng) {
            let pick = if i % 2 == 0 {
                q.choices.correct_index
            } else {
                (q.choices.correct_index + 1) % OPTION_COUNT
            };
            let outcome = session.answer(pick).unwrap();
            if outcome.correct {
                answered_right += 1;
            }
            assert!(session.answer(pick).is_none());
            i += 1;
        }
        assert!(session.is_finished());
        let summary = session.summary();
        assert_eq!(summary.questions, 5);
        assert_eq!(summary.correct, answered_right);
        assert_eq!(answered_right, 3);
        assert!((summary.accuracy() - 60.0).abs() < 1e-9);
        drop(session);

        let exposures: u32 = book.get_all_word_data().iter().map(|e| e.exposure_count()).sum();
        let corrects: u32 = book.get_all_word_data().iter().map(|e| e.correct_count()).sum();
        assert_eq!(exposures, 5);
        assert_eq!(corrects, 3);
    }

    #[test]
    fn answer_without_question_is_none() {
        let mut book = five_words();
        let mut rng = StdRng::seed_from_u64(4);
        let mut session = QuizSession::new(&mut book, QuizDirection::WordToMeaning, &mut rng);
        assert!(session.answer(0).is_none());
        assert!(session.current().is_none());
        session.next_question(&mut rng).unwrap();
        assert!(!session.current().unwrap().is_answered());
        assert!(session.answer(OPTION_COUNT).is_none());
        assert!(session.answer(0).is_some());
        assert!(session.current().unwrap().is_answered());
        assert_eq!(session.summary().questions, 1);
    }

    #[test]
    fn subset_session_uses_only_given_words() {
        let mut book = five_words();
        let mut rng = StdRng::seed_from_u64(8);
        let mut session = QuizSession::with_words(
            &mut book,
            &["pear", "ghost", "pear", " cat "],
            QuizDirection::WordToMeaning,
            &mut rng,
        );
        assert_eq!(session.len(), 2);
        let mut asked = Vec::new();
        while let Some(q) = session.next_question(&mut rng) {
            asked.push(q.word.clone());
        }
        asked.sort();
        assert_eq!(asked, vec!["cat", "pear"]);
        drop(session);
        assert_eq!(book.get_word_data("apple").unwrap().exposure_count(), 0);
        assert_eq!(book.get_word_data("pear").unwrap().exposure_count(), 1);
    }
}
