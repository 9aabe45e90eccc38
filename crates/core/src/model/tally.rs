use std::collections::BTreeMap;
use thiserror::Error;

use crate::model::capture::CaptureResult;
use crate::model::ids::{WordId, WordKey};

//
// ─── TALLY ─────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TallyError {
    #[error("a result for word key {0} is already recorded")]
    DuplicateKey(WordKey),

    #[error("word key {0} is outside the session word list")]
    UnknownKey(WordKey),

    #[error("tally has {recorded} of {total} results")]
    Incomplete { recorded: usize, total: usize },
}

/// Running per-session tally of capture results, keyed by word-list index.
///
/// Grows monotonically: one entry per word, never removed or overwritten.
/// Iteration order is word-list order, not insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionTally {
    total: usize,
    entries: BTreeMap<WordKey, CaptureResult>,
}

impl SessionTally {
    /// Empty tally for a word list of the given length.
    #[must_use]
    pub fn new(total: usize) -> Self {
        Self {
            total,
            entries: BTreeMap::new(),
        }
    }

    /// Number of words in the session.
    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    /// Number of recorded results.
    #[must_use]
    pub fn recorded(&self) -> usize {
        self.entries.len()
    }

    /// A session is complete once every word has a recorded result.
    ///
    /// A zero-length word list is complete from the start.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.entries.len() == self.total
    }

    #[must_use]
    pub fn get(&self, key: WordKey) -> Option<&CaptureResult> {
        self.entries.get(&key)
    }

    /// Results in word-list order.
    pub fn results(&self) -> impl Iterator<Item = &CaptureResult> {
        self.entries.values()
    }

    /// Record a capture result. First-write-wins: a second result for the
    /// same key is rejected and the tally is unchanged.
    ///
    /// # Errors
    ///
    /// Returns `TallyError::DuplicateKey` if the key already has a result,
    /// `TallyError::UnknownKey` if the key is outside the word list.
    pub fn record(&mut self, result: CaptureResult) -> Result<(), TallyError> {
        let key = result.key();
        if key.index() as usize >= self.total {
            return Err(TallyError::UnknownKey(key));
        }
        if self.entries.contains_key(&key) {
            return Err(TallyError::DuplicateKey(key));
        }
        self.entries.insert(key, result);
        Ok(())
    }

    /// Running score.
    #[must_use]
    pub fn summary(&self) -> ScoreSummary {
        ScoreSummary {
            correct: self.entries.values().filter(|r| r.is_correct()).count(),
            total: self.total,
        }
    }

    /// Derive the submission payload from a complete tally.
    ///
    /// # Errors
    ///
    /// Returns `TallyError::Incomplete` if any word still lacks a result.
    pub fn submission(&self) -> Result<SubmissionRecord, TallyError> {
        if !self.is_complete() {
            return Err(TallyError::Incomplete {
                recorded: self.entries.len(),
                total: self.total,
            });
        }
        let summary = self.summary();
        Ok(SubmissionRecord {
            total: summary.total,
            correct: summary.correct,
            answers: self
                .entries
                .values()
                .map(|result| AnswerRecord {
                    word_id: result.word_id(),
                    transcript: result.transcript().to_owned(),
                    is_correct: result.is_correct(),
                })
                .collect(),
        })
    }

    /// Discard all recorded results, returning the tally to empty.
    ///
    /// Used when an exercise session is restarted.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Correct/total counts for display and scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreSummary {
    pub correct: usize,
    pub total: usize,
}

/// One graded answer inside a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerRecord {
    pub word_id: WordId,
    pub transcript: String,
    pub is_correct: bool,
}

/// Payload derived from a complete tally, submitted at most once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionRecord {
    pub total: usize,
    pub correct: usize,
    /// Answers in word-list order.
    pub answers: Vec<AnswerRecord>,
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
