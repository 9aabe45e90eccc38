use thiserror::Error;

/// Per-capture recognizer failures.
///
/// These are non-fatal to the session: the judge absorbs them into a
/// `CaptureResult` with an empty transcript and a false verdict, and the
/// word sequence continues.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RecognitionError {
    #[error("no speech was detected")]
    NoSpeech,

    #[error("recognition was aborted")]
    Aborted,

    #[error("recognition network failure: {0}")]
    Network(String),

    #[error("audio capture failure: {0}")]
    Audio(String),

    #[error("no result within the configured capture timeout")]
    Timeout,
}

/// Failures that end a capture without producing a verdict.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CaptureError {
    /// The recognition facility does not exist on this host. Fatal to the
    /// session: no partial grading happens and the caller must surface it.
    #[error("speech recognition is not available on this platform")]
    CapabilityUnavailable,

    /// A newer capture or a session close cancelled this one. The word
    /// stays pending; nothing is recorded.
    #[error("capture was cancelled")]
    Cancelled,
}
