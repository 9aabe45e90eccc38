use chrono::{DateTime, Utc};
use std::fmt;

use drill_core::model::{
    CaptureResult, ExerciseId, ScoreSummary, SessionId, SessionPhase, SubmissionRecord, TestId,
    Word, WordItem, WordKey,
};

use crate::aggregator::ResultAggregator;
use crate::error::SessionError;
use crate::progress::SessionProgress;
use crate::sequencer::{SelectionMode, WordSequencer};

//
// ─── SESSION MODE ──────────────────────────────────────────────────────────────
//

/// What kind of session this is, and which backend entity it grades.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionMode {
    /// Learner-directed practice; words may be attempted in any order.
    Exercise(ExerciseId),
    /// Strictly sequential, scored assessment.
    Test(TestId),
}

impl SessionMode {
    #[must_use]
    pub fn selection(self) -> SelectionMode {
        match self {
            SessionMode::Exercise(_) => SelectionMode::LearnerChoice,
            SessionMode::Test(_) => SelectionMode::Sequential,
        }
    }
}

//
// ─── PRACTICE SESSION ──────────────────────────────────────────────────────────
//

/// In-memory state for one practice or test run over a fetched word list.
///
/// Composes the word sequencer (ordering) with the result aggregator
/// (tally, completion, submission guard). Created by `PracticeService`
/// once the word list has arrived; discarded on close.
pub struct PracticeSession {
    id: SessionId,
    mode: SessionMode,
    sequencer: WordSequencer,
    aggregator: ResultAggregator,
    started_at: DateTime<Utc>,
}

impl PracticeSession {
    #[must_use]
    pub fn new(mode: SessionMode, words: Vec<Word>, started_at: DateTime<Utc>) -> Self {
        let sequencer = WordSequencer::new(words, mode.selection());
        let aggregator = ResultAggregator::new(sequencer.len());
        Self {
            id: SessionId::generate(),
            mode,
            sequencer,
            aggregator,
            started_at,
        }
    }

    #[must_use]
    pub fn id(&self) -> SessionId {
        self.id
    }

    #[must_use]
    pub fn mode(&self) -> SessionMode {
        self.mode
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.aggregator.phase()
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// The session word list in display order.
    #[must_use]
    pub fn words(&self) -> &[WordItem] {
        self.sequencer.items()
    }

    /// The word currently up for capture.
    #[must_use]
    pub fn current_word(&self) -> Option<&WordItem> {
        self.sequencer.current()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.aggregator.is_complete()
    }

    #[must_use]
    pub fn summary(&self) -> ScoreSummary {
        self.aggregator.summary()
    }

    /// Recorded verdicts in word-list order.
    pub fn results(&self) -> impl Iterator<Item = &CaptureResult> {
        self.aggregator.tally().results()
    }

    /// Returns a summary of the current session progress.
    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        let total = self.sequencer.len();
        let captured = self.aggregator.tally().recorded();
        SessionProgress {
            total,
            captured,
            remaining: total.saturating_sub(captured),
            is_complete: self.is_complete(),
        }
    }

    /// Learner-directed word selection (exercise mode only).
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Closed` after close and sequencer errors for
    /// sequential mode, unknown keys, or already-captured words.
    pub fn select_word(&mut self, key: WordKey) -> Result<&WordItem, SessionError> {
        if self.phase().is_closed() {
            return Err(SessionError::Closed);
        }
        Ok(self.sequencer.select(key)?)
    }

    /// Move to the next unresolved word.
    pub fn advance_word(&mut self) -> Option<&WordItem> {
        self.sequencer.advance()
    }

    /// Record a capture verdict and keep sequencer state in sync.
    ///
    /// Returns whether this record completed the session.
    ///
    /// # Errors
    ///
    /// See [`ResultAggregator::record`].
    pub(crate) fn record(&mut self, result: CaptureResult) -> Result<bool, SessionError> {
        let key = result.key();
        let newly_complete = self.aggregator.record(result)?;
        // A duplicate was already absorbed by the aggregator as a no-op, so
        // an AlreadyCaptured outcome here carries no new information.
        let _ = self.sequencer.mark_captured(key);
        Ok(newly_complete)
    }

    pub(crate) fn begin_submission(&mut self) -> Result<bool, SessionError> {
        self.aggregator.begin_submission()
    }

    pub(crate) fn submission(&self) -> Result<SubmissionRecord, SessionError> {
        self.aggregator.submission()
    }

    pub(crate) fn mark_submitted(&mut self) {
        self.aggregator.mark_submitted();
    }

    pub(crate) fn mark_submission_failed(&mut self) {
        self.aggregator.mark_submission_failed();
    }

    /// Dismiss the session; pending captures are the workflow's to cancel.
    pub fn close(&mut self) {
        self.aggregator.close();
    }

    /// Start the exercise over: all words pending, tally empty, submission
    /// guard re-armed.
    ///
    /// # Errors
    ///
    /// Returns `RestartUnsupported` for tests, `Closed` after close, and
    /// `SubmissionInFlight` while a submission is running.
    pub fn restart(&mut self) -> Result<(), SessionError> {
        if matches!(self.mode, SessionMode::Test(_)) {
            return Err(SessionError::RestartUnsupported);
        }
        match self.phase() {
            SessionPhase::Closed => return Err(SessionError::Closed),
            SessionPhase::Submitting => return Err(SessionError::SubmissionInFlight),
            _ => {}
        }
        self.sequencer.reset();
        self.aggregator.reset();
        Ok(())
    }
}

impl fmt::Debug for PracticeSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PracticeSession")
            .field("id", &self.id)
            .field("mode", &self.mode)
            .field("phase", &self.phase())
            .field("words_len", &self.sequencer.len())
            .field("captured", &self.aggregator.tally().recorded())
            .field("started_at", &self.started_at)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use drill_core::model::WordId;
    use drill_core::time::fixed_now;

    fn words(texts: &[&str]) -> Vec<Word> {
        texts
            .iter()
            .enumerate()
            .map(|(i, text)| Word::new(WordId::new(i as u64 + 1), *text).unwrap())
            .collect()
    }

    fn judged(session: &PracticeSession, key: u32, transcript: &str) -> CaptureResult {
        let item = &session.words()[key as usize];
        CaptureResult::judged(item, transcript, fixed_now())
    }

    #[test]
    fn empty_word_list_is_immediately_complete() {
        let session = PracticeSession::new(
            SessionMode::Exercise(ExerciseId::new(1)),
            Vec::new(),
            fixed_now(),
        );
        assert!(session.is_complete());
        assert_eq!(session.phase(), SessionPhase::Complete);
        assert!(session.current_word().is_none());
        assert_eq!(session.summary().total, 0);
    }

    #[test]
    fn test_session_advances_and_completes() {
        let mut session = PracticeSession::new(
            SessionMode::Test(TestId::new(1)),
            words(&["a", "b"]),
            fixed_now(),
        );
        assert_eq!(session.current_word().unwrap().word().text(), "a");

        let first = judged(&session, 0, "a");
        assert!(!session.record(first).unwrap());
        session.advance_word();
        assert_eq!(session.current_word().unwrap().word().text(), "b");

        let second = judged(&session, 1, "x");
        assert!(session.record(second).unwrap());
        assert!(session.is_complete());
        assert_eq!(session.summary().correct, 1);
        assert_eq!(session.summary().total, 2);
    }

    #[test]
    fn exercise_session_rejects_reselecting_captured_word() {
        let mut session = PracticeSession::new(
            SessionMode::Exercise(ExerciseId::new(1)),
            words(&["a", "b"]),
            fixed_now(),
        );
        session.select_word(WordKey::new(1)).unwrap();
        let result = judged(&session, 1, "b");
        session.record(result).unwrap();

        let err = session.select_word(WordKey::new(1)).unwrap_err();
        assert!(matches!(err, SessionError::Sequencer(_)));
    }

    #[test]
    fn progress_tracks_captured_counts() {
        let mut session = PracticeSession::new(
            SessionMode::Test(TestId::new(1)),
            words(&["a", "b", "c"]),
            fixed_now(),
        );
        let first = judged(&session, 0, "a");
        session.record(first).unwrap();

        assert_eq!(
            session.progress(),
            SessionProgress {
                total: 3,
                captured: 1,
                remaining: 2,
                is_complete: false,
            }
        );
    }

    #[test]
    fn restart_is_exercise_only() {
        let mut test_session = PracticeSession::new(
            SessionMode::Test(TestId::new(1)),
            words(&["a"]),
            fixed_now(),
        );
        assert!(matches!(
            test_session.restart(),
            Err(SessionError::RestartUnsupported)
        ));

        let mut exercise = PracticeSession::new(
            SessionMode::Exercise(ExerciseId::new(1)),
            words(&["a"]),
            fixed_now(),
        );
        let result = judged(&exercise, 0, "a");
        exercise.record(result).unwrap();
        assert!(exercise.is_complete());

        exercise.restart().unwrap();
        assert!(!exercise.is_complete());
        assert_eq!(exercise.progress().captured, 0);
        assert!(exercise.words().iter().all(WordItem::is_pending));
    }

    #[test]
    fn closed_session_rejects_selection_and_restart() {
        let mut session = PracticeSession::new(
            SessionMode::Exercise(ExerciseId::new(1)),
            words(&["a"]),
            fixed_now(),
        );
        session.close();

        assert!(matches!(
            session.select_word(WordKey::new(0)),
            Err(SessionError::Closed)
        ));
        assert!(matches!(session.restart(), Err(SessionError::Closed)));
    }
}
