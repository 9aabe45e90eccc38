use drill_core::model::{
    CaptureResult, ScoreSummary, SessionPhase, SessionTally, SubmissionRecord, TallyError,
};

use crate::error::SessionError;

//
// ─── RESULT AGGREGATOR ─────────────────────────────────────────────────────────
//

/// Accumulates per-word verdicts, detects completion, and owns the session
/// phase machine including the one-shot submission guard.
///
/// Duplicate results are a logged no-op (first-write-wins); the guard flips
/// to `Submitting` before any network call starts, so re-entrant submit
/// attempts are no-ops, while a failed submission stays retryable.
#[derive(Debug, Clone)]
pub struct ResultAggregator {
    tally: SessionTally,
    phase: SessionPhase,
}

impl ResultAggregator {
    /// Aggregator for a word list of the given length.
    ///
    /// A zero-length list is complete from the start and skips straight to
    /// the submission phase.
    #[must_use]
    pub fn new(total: usize) -> Self {
        Self {
            tally: SessionTally::new(total),
            phase: initial_phase(total),
        }
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    #[must_use]
    pub fn tally(&self) -> &SessionTally {
        &self.tally
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.tally.is_complete()
    }

    #[must_use]
    pub fn summary(&self) -> ScoreSummary {
        self.tally.summary()
    }

    /// Record one verdict. Returns whether this record completed the
    /// session.
    ///
    /// A second result for an already-recorded key is ignored with a
    /// warning and changes nothing.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Closed` after close, `SessionError::Completed`
    /// once the session stopped accepting results, and propagates
    /// `TallyError::UnknownKey` for keys outside the word list.
    pub fn record(&mut self, result: CaptureResult) -> Result<bool, SessionError> {
        if self.phase.is_closed() {
            return Err(SessionError::Closed);
        }
        if !self.phase.accepts_results() {
            return Err(SessionError::Completed);
        }

        match self.tally.record(result) {
            Ok(()) => {}
            Err(TallyError::DuplicateKey(key)) => {
                tracing::warn!(%key, "duplicate capture result ignored");
                return Ok(false);
            }
            Err(err) => return Err(err.into()),
        }

        if self.tally.is_complete() {
            self.phase = SessionPhase::Complete;
            return Ok(true);
        }
        Ok(false)
    }

    /// Arm the one-shot submission guard.
    ///
    /// Returns `true` if the caller should perform the network call now,
    /// `false` if a submission is already in flight or done (no-op).
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Closed` after close and
    /// `SessionError::NotComplete` while words are still pending.
    pub fn begin_submission(&mut self) -> Result<bool, SessionError> {
        if self.phase.is_closed() {
            return Err(SessionError::Closed);
        }
        if self.phase.submission_settled() {
            return Ok(false);
        }
        if !self.phase.can_begin_submission() {
            return Err(SessionError::NotComplete);
        }
        self.phase = SessionPhase::Submitting;
        Ok(true)
    }

    /// Payload for the armed submission.
    ///
    /// # Errors
    ///
    /// Returns `TallyError::Incomplete` if any word still lacks a result.
    pub fn submission(&self) -> Result<SubmissionRecord, SessionError> {
        Ok(self.tally.submission()?)
    }

    /// Settle the in-flight submission as succeeded. Further submissions
    /// are locked out.
    pub fn mark_submitted(&mut self) {
        if self.phase == SessionPhase::Submitting {
            self.phase = SessionPhase::Submitted;
        }
    }

    /// Settle the in-flight submission as failed. A manual retry may arm
    /// the guard again.
    pub fn mark_submission_failed(&mut self) {
        if self.phase == SessionPhase::Submitting {
            self.phase = SessionPhase::SubmissionFailed;
        }
    }

    /// Dismiss the session. Terminal: no further records or submissions.
    pub fn close(&mut self) {
        self.phase = SessionPhase::Closed;
    }

    /// Discard all results and re-open the session (exercise restart).
    pub fn reset(&mut self) {
        self.tally.clear();
        self.phase = initial_phase(self.tally.total());
    }
}

fn initial_phase(total: usize) -> SessionPhase {
    if total == 0 {
        SessionPhase::Complete
    } else {
        SessionPhase::InProgress
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
