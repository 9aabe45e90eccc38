use std::sync::Arc;

use client::{AnswerEntry, ExerciseReport, ResultSink, TestReport, WordSource};
use drill_core::model::{CaptureResult, ExerciseId, SessionPhase, TestId, WordKey};
use drill_core::Clock;
use speech::SpeechJudge;

use crate::error::SessionError;
use crate::session::{PracticeSession, SessionMode};

/// Result of one capture step in a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureOutcome {
    pub result: CaptureResult,
    pub is_complete: bool,
    pub phase: SessionPhase,
}

/// Orchestrates the practice workflow: word-list fetch, per-word capture
/// and grading, and the one-shot result submission.
///
/// Tests drive `capture_current` (automatic sequential order); exercises
/// drive `capture_word` (learner-selected). Both auto-submit when the last
/// word resolves.
pub struct PracticeService {
    clock: Clock,
    words: Arc<dyn WordSource>,
    results: Arc<dyn ResultSink>,
    judge: SpeechJudge,
}

impl PracticeService {
    #[must_use]
    pub fn new(
        clock: Clock,
        words: Arc<dyn WordSource>,
        results: Arc<dyn ResultSink>,
        judge: SpeechJudge,
    ) -> Self {
        Self {
            clock,
            words,
            results,
            judge,
        }
    }

    /// Start a practice session for an exercise.
    ///
    /// An empty word list yields an immediately-complete session whose
    /// zero score is submitted right away.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Api` if the word-list fetch fails (session
    /// start is blocked) or if the zero-length submission fails.
    pub async fn start_exercise(&self, id: ExerciseId) -> Result<PracticeSession, SessionError> {
        let words = self.words.exercise_words(id).await?;
        let mut session =
            PracticeSession::new(SessionMode::Exercise(id), words, self.clock.now());
        tracing::info!(
            session = %session.id(),
            exercise = %id,
            total = session.progress().total,
            "exercise session started"
        );
        if session.is_complete() {
            self.submit(&mut session).await?;
        }
        Ok(session)
    }

    /// Start a test session.
    ///
    /// # Errors
    ///
    /// As for `start_exercise`.
    pub async fn start_test(&self, id: TestId) -> Result<PracticeSession, SessionError> {
        let words = self.words.test_words(id).await?;
        let mut session = PracticeSession::new(SessionMode::Test(id), words, self.clock.now());
        tracing::info!(
            session = %session.id(),
            test = %id,
            total = session.progress().total,
            "test session started"
        );
        if session.is_complete() {
            self.submit(&mut session).await?;
        }
        Ok(session)
    }

    /// Capture the current word, record its verdict, and advance.
    ///
    /// Recognizer errors resolve as an incorrect empty-transcript result
    /// and the sequence continues. When the last word resolves, the score
    /// is submitted automatically.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Completed` when no word is left,
    /// `SessionError::Capture` if recognition is unavailable or the capture
    /// was cancelled, and `SessionError::Api` if the auto-submission fails
    /// (the session moves to `SubmissionFailed`; retry via `submit`).
    pub async fn capture_current(
        &self,
        session: &mut PracticeSession,
    ) -> Result<CaptureOutcome, SessionError> {
        if session.phase().is_closed() {
            return Err(SessionError::Closed);
        }
        let item = match session.current_word() {
            Some(item) => item.clone(),
            None => session
                .advance_word()
                .cloned()
                .ok_or(SessionError::Completed)?,
        };
        let result = self.judge.capture(&item).await?;
        self.apply(session, result).await
    }

    /// Learner-directed capture of a chosen pending word (exercise mode).
    ///
    /// # Errors
    ///
    /// As for `capture_current`, plus sequencer errors when the key is
    /// unknown, already captured, or the session is sequential.
    pub async fn capture_word(
        &self,
        session: &mut PracticeSession,
        key: WordKey,
    ) -> Result<CaptureOutcome, SessionError> {
        let item = session.select_word(key)?.clone();
        let result = self.judge.capture(&item).await?;
        self.apply(session, result).await
    }

    /// Submit the session score. Idempotent: a submission already in
    /// flight or finished makes this a no-op; a previously failed one is
    /// retried.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotComplete` while words are pending,
    /// `SessionError::Closed` after close, and `SessionError::Api` when the
    /// backend rejects the report (the computed score is kept and the
    /// session stays retryable).
    pub async fn submit(&self, session: &mut PracticeSession) -> Result<(), SessionError> {
        if !session.begin_submission()? {
            return Ok(());
        }
        let record = session.submission()?;

        let outcome = match session.mode() {
            SessionMode::Exercise(id) => {
                let report = ExerciseReport {
                    exercise_id: id,
                    score: record.correct,
                    total_score: record.total,
                };
                self.results.submit_exercise(&report).await
            }
            SessionMode::Test(id) => {
                let report = TestReport {
                    test_id: id,
                    score: record.correct,
                    total_score: record.total,
                    answers: record
                        .answers
                        .into_iter()
                        .map(|answer| AnswerEntry {
                            word_id: answer.word_id,
                            answer: answer.transcript,
                            is_correct: answer.is_correct,
                        })
                        .collect(),
                };
                self.results.submit_test(&report).await
            }
        };

        match outcome {
            Ok(()) => {
                session.mark_submitted();
                tracing::info!(
                    session = %session.id(),
                    score = record.correct,
                    total = record.total,
                    "result submitted"
                );
                Ok(())
            }
            Err(err) => {
                session.mark_submission_failed();
                tracing::warn!(session = %session.id(), error = %err, "submission failed");
                Err(err.into())
            }
        }
    }

    /// Restart an exercise from scratch, cancelling any in-flight capture.
    ///
    /// # Errors
    ///
    /// See [`PracticeSession::restart`].
    pub async fn restart(&self, session: &mut PracticeSession) -> Result<(), SessionError> {
        self.judge.cancel_active().await;
        session.restart()
    }

    /// Dismiss the session: cancel any in-flight capture so the recognizer
    /// is released, and discard late results.
    pub async fn close(&self, session: &mut PracticeSession) {
        self.judge.cancel_active().await;
        session.close();
        tracing::info!(session = %session.id(), "session closed");
    }

    async fn apply(
        &self,
        session: &mut PracticeSession,
        result: CaptureResult,
    ) -> Result<CaptureOutcome, SessionError> {
        tracing::debug!(
            session = %session.id(),
            key = %result.key(),
            correct = result.is_correct(),
            "capture recorded"
        );
        session.record(result.clone())?;
        session.advance_word();

        if session.is_complete() {
            self.submit(session).await?;
        }

        Ok(CaptureOutcome {
            result,
            is_complete: session.is_complete(),
            phase: session.phase(),
        })
    }
}
