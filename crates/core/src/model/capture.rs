use chrono::{DateTime, Utc};

use crate::judge;
use crate::model::ids::{WordId, WordKey};
use crate::model::word::WordItem;

/// Outcome of one speech capture for one word.
///
/// Created exactly once per `WordItem` per session and immutable afterwards.
/// A recognizer error that is absorbed (no speech, aborted, network) becomes
/// a result with an empty transcript and `is_correct == false`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureResult {
    key: WordKey,
    word_id: WordId,
    transcript: String,
    is_correct: bool,
    captured_at: DateTime<Utc>,
}

impl CaptureResult {
    /// Judge a transcript against the item's target word.
    ///
    /// Both sides are whitespace-trimmed and case-folded before exact
    /// equality comparison; see [`judge::matches`].
    #[must_use]
    pub fn judged(item: &WordItem, transcript: impl Into<String>, captured_at: DateTime<Utc>) -> Self {
        let transcript = transcript.into();
        let is_correct = judge::matches(item.word().text(), &transcript);
        Self {
            key: item.key(),
            word_id: item.word().id(),
            transcript,
            is_correct,
            captured_at,
        }
    }

    /// Result for a capture the recognizer could not resolve: empty
    /// transcript, incorrect.
    #[must_use]
    pub fn unrecognized(item: &WordItem, captured_at: DateTime<Utc>) -> Self {
        Self {
            key: item.key(),
            word_id: item.word().id(),
            transcript: String::new(),
            is_correct: false,
            captured_at,
        }
    }

    #[must_use]
    pub fn key(&self) -> WordKey {
        self.key
    }

    #[must_use]
    pub fn word_id(&self) -> WordId {
        self.word_id
    }

    /// The raw transcript as heard, possibly empty.
    #[must_use]
    pub fn transcript(&self) -> &str {
        &self.transcript
    }

    #[must_use]
    pub fn is_correct(&self) -> bool {
        self.is_correct
    }

    #[must_use]
    pub fn captured_at(&self) -> DateTime<Utc> {
        self.captured_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::word::Word;
    use crate::time::fixed_now;

    fn item(text: &str) -> WordItem {
        WordItem::new(WordKey::new(0), Word::new(WordId::new(1), text).unwrap())
    }

    #[test]
    fn judged_accepts_normalized_match() {
        let result = CaptureResult::judged(&item("แมว"), "แมว ", fixed_now());
        assert!(result.is_correct());
        assert_eq!(result.transcript(), "แมว ");
    }

    #[test]
    fn judged_rejects_different_text() {
        let result = CaptureResult::judged(&item("แมว"), "แมว๑", fixed_now());
        assert!(!result.is_correct());
    }

    #[test]
    fn unrecognized_is_empty_and_incorrect() {
        let result = CaptureResult::unrecognized(&item("แมว"), fixed_now());
        assert_eq!(result.transcript(), "");
        assert!(!result.is_correct());
    }
}
