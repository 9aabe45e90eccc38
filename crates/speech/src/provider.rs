use async_trait::async_trait;

use crate::config::CaptureConfig;
use crate::error::RecognitionError;

/// Capability boundary over the host speech-recognition facility.
///
/// Implementations wrap a real device recognizer or a scripted double for
/// tests. The judge guarantees at most one `recognize` call is in flight
/// per judge at a time.
#[async_trait]
pub trait SpeechCaptureProvider: Send + Sync {
    /// Whether a recognition facility exists on this host. When false,
    /// captures fail fast with `CaptureError::CapabilityUnavailable` and no
    /// verdict is produced.
    fn is_available(&self) -> bool;

    /// Listen for one utterance and return the recognized transcript.
    ///
    /// Suspends until the recognizer yields a final transcript or reports
    /// an error; the judge layers cancellation and the optional timeout on
    /// top.
    ///
    /// # Errors
    ///
    /// Returns `RecognitionError` for per-utterance failures (no speech,
    /// abort, network, audio).
    async fn recognize(&self, config: &CaptureConfig) -> Result<String, RecognitionError>;
}
