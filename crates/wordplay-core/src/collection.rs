//! The set of word books a user owns, plus the currently selected one.

use std::collections::HashMap;

use crate::model::WordBook;

/// Named word books with an optional selection.
///
/// Invariant: `selected`, when set, names a book present in `books`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WordBookCollection {
    books: HashMap<String, WordBook>,
    selected: Option<String>,
}

impl WordBookCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty book. Fails on a blank name or an existing name.
    pub fn create_word_book(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() || self.books.contains_key(name) {
            return false;
        }
        self.books.insert(name.to_string(), WordBook::new(name));
        true
    }

    /// Insert a restored book. Fails if the name is already taken.
    pub(crate) fn insert_book(&mut self, book: WordBook) -> bool {
        if self.books.contains_key(book.name()) {
            return false;
        }
        self.books.insert(book.name().to_string(), book);
        true
    }

    /// Delete a book, clearing the selection if it pointed at it.
    pub fn delete_word_book(&mut self, name: &str) -> bool {
        let name = name.trim();
        if self.books.remove(name).is_none() {
            return false;
        }
        if self.selected.as_deref() == Some(name) {
            self.selected = None;
        }
        true
    }

    /// Move a book under a new name.
    ///
    /// Fails when the new name is blank, already used by any book, or when
    /// `old_name` does not exist. A selected book stays selected.
    pub fn rename_word_book(&mut self, old_name: &str, new_name: &str) -> bool {
        let old_name = old_name.trim();
        let new_name = new_name.trim();
        if new_name.is_empty() || self.books.contains_key(new_name) {
            return false;
        }
        let Some(mut book) = self.books.remove(old_name) else {
            return false;
        };
        book.set_name(new_name.to_string());
        self.books.insert(new_name.to_string(), book);
        if self.selected.as_deref() == Some(old_name) {
            self.selected = Some(new_name.to_string());
        }
        true
    }

    pub fn select_word_book(&mut self, name: &str) -> bool {
        let name = name.trim();
        if !self.books.contains_key(name) {
            return false;
        }
        self.selected = Some(name.to_string());
        true
    }

    pub fn selected_name(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn selected(&self) -> Option<&WordBook> {
        self.selected.as_ref().and_then(|name| self.books.get(name))
    }

    pub fn get(&self, name: &str) -> Option<&WordBook> {
        self.books.get(name.trim())
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut WordBook> {
        self.books.get_mut(name.trim())
    }

    /// Book names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.books.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Books, sorted by name.
    pub fn books(&self) -> Vec<&WordBook> {
        let mut books: Vec<&WordBook> = self.books.values().collect();
        books.sort_by(|a, b| a.name().cmp(b.name()));
        books
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}
