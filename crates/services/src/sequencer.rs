use thiserror::Error;

use drill_core::model::{items_from_words, Word, WordItem, WordKey};

//
// ─── SELECTION ─────────────────────────────────────────────────────────────────
//

/// How the next target word is chosen.
///
/// Both variants share one sequencing contract; they differ only in who
/// picks the word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionMode {
    /// Tests: strictly index order, no skipping, no going back.
    Sequential,
    /// Exercises: the learner picks any not-yet-captured word, any order.
    LearnerChoice,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SequencerError {
    #[error("word key {0} is outside the session word list")]
    UnknownKey(WordKey),

    #[error("word {0} has already been captured")]
    AlreadyCaptured(WordKey),

    #[error("words are chosen automatically in sequential mode")]
    SequentialOnly,
}

//
// ─── WORD SEQUENCER ────────────────────────────────────────────────────────────
//

/// Holds the ordered target-word list for one session, tracks the current
/// word, and advances as words resolve.
///
/// An empty word list starts exhausted: `current()` and `advance()` return
/// `None` and the session is trivially complete.
#[derive(Debug, Clone)]
pub struct WordSequencer {
    mode: SelectionMode,
    items: Vec<WordItem>,
    cursor: Option<usize>,
}

impl WordSequencer {
    #[must_use]
    pub fn new(words: Vec<Word>, mode: SelectionMode) -> Self {
        let items = items_from_words(words);
        let cursor = if items.is_empty() { None } else { Some(0) };
        Self {
            mode,
            items,
            cursor,
        }
    }

    #[must_use]
    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    #[must_use]
    pub fn items(&self) -> &[WordItem] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.items.iter().filter(|item| item.is_pending()).count()
    }

    /// Whether every word has been captured (vacuously true when empty).
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.pending_count() == 0
    }

    /// The word currently up for capture, if it is still pending.
    #[must_use]
    pub fn current(&self) -> Option<&WordItem> {
        self.cursor
            .map(|index| &self.items[index])
            .filter(|item| item.is_pending())
    }

    /// Move to the next unresolved word, or `None` when the list is
    /// exhausted.
    ///
    /// Sequential mode scans forward from the cursor; learner-choice mode
    /// falls back to the first pending word in list order as a suggestion.
    pub fn advance(&mut self) -> Option<&WordItem> {
        let start = match self.mode {
            SelectionMode::Sequential => self.cursor.map_or(0, |index| index + 1),
            SelectionMode::LearnerChoice => 0,
        };
        self.cursor = (start..self.items.len()).find(|&index| self.items[index].is_pending());
        self.cursor.map(|index| &self.items[index])
    }

    /// Learner-directed selection of a pending word.
    ///
    /// # Errors
    ///
    /// Returns `SequencerError::SequentialOnly` in sequential mode,
    /// `UnknownKey` for keys outside the list, and `AlreadyCaptured` when
    /// re-selecting a resolved word (first-write-wins policy).
    pub fn select(&mut self, key: WordKey) -> Result<&WordItem, SequencerError> {
        if self.mode != SelectionMode::LearnerChoice {
            return Err(SequencerError::SequentialOnly);
        }
        let index = key.index() as usize;
        let Some(item) = self.items.get(index) else {
            return Err(SequencerError::UnknownKey(key));
        };
        if !item.is_pending() {
            return Err(SequencerError::AlreadyCaptured(key));
        }
        self.cursor = Some(index);
        Ok(&self.items[index])
    }

    /// Mark a word as resolved by a capture verdict.
    ///
    /// # Errors
    ///
    /// Returns `UnknownKey` or `AlreadyCaptured` as for `select`.
    pub fn mark_captured(&mut self, key: WordKey) -> Result<(), SequencerError> {
        let index = key.index() as usize;
        let Some(item) = self.items.get_mut(index) else {
            return Err(SequencerError::UnknownKey(key));
        };
        if !item.is_pending() {
            return Err(SequencerError::AlreadyCaptured(key));
        }
        item.mark_captured();
        Ok(())
    }

    /// Return every word to pending and the cursor to the list head.
    pub fn reset(&mut self) {
        for item in &mut self.items {
            item.reset();
        }
        self.cursor = if self.items.is_empty() { None } else { Some(0) };
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
