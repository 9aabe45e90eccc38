use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::{WordId, WordKey};

//
// ─── WORD TYPES ────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum WordError {
    #[error("word text is empty")]
    EmptyText,
}

/// A vocabulary word with its target pronunciation text.
///
/// Immutable once fetched for a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
    id: WordId,
    text: String,
}

impl Word {
    /// Create a word from backend data.
    ///
    /// # Errors
    ///
    /// Returns `WordError::EmptyText` if the text is empty or whitespace-only.
    pub fn new(id: WordId, text: impl Into<String>) -> Result<Self, WordError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(WordError::EmptyText);
        }
        Ok(Self { id, text })
    }

    #[must_use]
    pub fn id(&self) -> WordId {
        self.id
    }

    /// The target pronunciation string, exactly as authored.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Capture state of a word within one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordState {
    Pending,
    Captured,
}

/// A `Word` scoped to a session: keyed by its list index and tracking
/// whether a capture has resolved for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordItem {
    key: WordKey,
    word: Word,
    state: WordState,
}

impl WordItem {
    #[must_use]
    pub fn new(key: WordKey, word: Word) -> Self {
        Self {
            key,
            word,
            state: WordState::Pending,
        }
    }

    #[must_use]
    pub fn key(&self) -> WordKey {
        self.key
    }

    #[must_use]
    pub fn word(&self) -> &Word {
        &self.word
    }

    #[must_use]
    pub fn state(&self) -> WordState {
        self.state
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.state == WordState::Pending
    }

    /// Mark the item as resolved by a capture verdict.
    pub fn mark_captured(&mut self) {
        self.state = WordState::Captured;
    }

    /// Reset the item to pending, discarding the captured flag.
    ///
    /// Used when an exercise session is restarted from scratch.
    pub fn reset(&mut self) {
        self.state = WordState::Pending;
    }
}

/// Build session items from a fetched word list, keyed by list index.
#[must_use]
pub fn items_from_words(words: Vec<Word>) -> Vec<WordItem> {
    words
        .into_iter()
        .enumerate()
        .map(|(index, word)| {
            let index = u32::try_from(index).unwrap_or(u32::MAX);
            WordItem::new(WordKey::new(index), word)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_rejects_blank_text() {
        let err = Word::new(WordId::new(1), "   ").unwrap_err();
        assert_eq!(err, WordError::EmptyText);
    }

    #[test]
    fn items_are_keyed_by_list_order() {
        let words = vec![
            Word::new(WordId::new(7), "แมว").unwrap(),
            Word::new(WordId::new(3), "หมา").unwrap(),
        ];
        let items = items_from_words(words);

        assert_eq!(items[0].key(), WordKey::new(0));
        assert_eq!(items[0].word().id(), WordId::new(7));
        assert_eq!(items[1].key(), WordKey::new(1));
        assert!(items.iter().all(WordItem::is_pending));
    }
}
