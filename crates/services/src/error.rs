//! Shared error types for the services crate.

use thiserror::Error;

use client::ApiError;
use drill_core::model::TallyError;
use speech::CaptureError;

use crate::sequencer::SequencerError;

/// Errors emitted by practice sessions and the workflow around them.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("session is already complete")]
    Completed,

    #[error("session is not yet complete")]
    NotComplete,

    #[error("session has been closed")]
    Closed,

    #[error("a submission is currently in flight")]
    SubmissionInFlight,

    #[error("only exercise sessions can be restarted")]
    RestartUnsupported,

    #[error(transparent)]
    Sequencer(#[from] SequencerError),

    #[error(transparent)]
    Tally(#[from] TallyError),

    #[error(transparent)]
    Capture(#[from] CaptureError),

    #[error(transparent)]
    Api(#[from] ApiError),
}
