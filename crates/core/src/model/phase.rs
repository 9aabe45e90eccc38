use std::fmt;

/// Lifecycle of one practice/test session.
///
/// ```text
/// AwaitingWords -> InProgress -> Complete -> Submitting -> Submitted
///                                    ^            |
///                                    |            v
///                                    +---- SubmissionFailed
/// ```
///
/// `InProgress` self-loops on each recorded result and moves to `Complete`
/// exactly when the tally reaches the word-list length. `SubmissionFailed`
/// permits a manual retry back through `Submitting`. `Closed` is terminal
/// and reachable from any phase when the session is dismissed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Word-list fetch in flight; no results can be recorded yet.
    AwaitingWords,
    InProgress,
    Complete,
    Submitting,
    Submitted,
    SubmissionFailed,
    Closed,
}

impl SessionPhase {
    /// Whether results may still be recorded.
    #[must_use]
    pub fn accepts_results(self) -> bool {
        self == SessionPhase::InProgress
    }

    /// Whether a submission attempt may start from this phase.
    #[must_use]
    pub fn can_begin_submission(self) -> bool {
        matches!(self, SessionPhase::Complete | SessionPhase::SubmissionFailed)
    }

    /// Whether a submission has started or finished; further submit calls
    /// are no-ops.
    #[must_use]
    pub fn submission_settled(self) -> bool {
        matches!(self, SessionPhase::Submitting | SessionPhase::Submitted)
    }

    #[must_use]
    pub fn is_closed(self) -> bool {
        self == SessionPhase::Closed
    }
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionPhase::AwaitingWords => "awaiting-words",
            SessionPhase::InProgress => "in-progress",
            SessionPhase::Complete => "complete",
            SessionPhase::Submitting => "submitting",
            SessionPhase::Submitted => "submitted",
            SessionPhase::SubmissionFailed => "submission-failed",
            SessionPhase::Closed => "closed",
        };
        write!(f, "{name}")
    }
}
