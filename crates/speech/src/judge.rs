use std::fmt;
use std::sync::Arc;

use tokio::sync::{oneshot, Mutex};

use drill_core::model::{CaptureResult, WordItem};
use drill_core::Clock;

use crate::config::CaptureConfig;
use crate::error::{CaptureError, RecognitionError};
use crate::provider::SpeechCaptureProvider;

//
// ─── SPEECH JUDGE ──────────────────────────────────────────────────────────────
//

/// Tracks the single in-flight capture so a newer capture (or a session
/// close) can cancel it. The sequence number lets a finished capture clear
/// only its own slot entry.
#[derive(Default)]
struct ActiveSlot {
    seq: u64,
    cancel: Option<oneshot::Sender<()>>,
}

/// Wraps one speech-capture attempt per word: starts a recognition session,
/// waits for a transcript or an error, and judges it against the target.
///
/// Exactly one capture is active at a time; starting a new capture cancels
/// the in-flight one, which resolves as `CaptureError::Cancelled` and
/// produces no verdict.
pub struct SpeechJudge {
    provider: Arc<dyn SpeechCaptureProvider>,
    config: CaptureConfig,
    clock: Clock,
    active: Mutex<ActiveSlot>,
}

impl SpeechJudge {
    #[must_use]
    pub fn new(provider: Arc<dyn SpeechCaptureProvider>, config: CaptureConfig) -> Self {
        Self {
            provider,
            config,
            clock: Clock::default(),
            active: Mutex::new(ActiveSlot::default()),
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn config(&self) -> &CaptureConfig {
        &self.config
    }

    /// Capture one utterance for the given word and judge it.
    ///
    /// Recognizer errors (no speech, abort, network, audio, elapsed
    /// timeout) are absorbed: they resolve as a `CaptureResult` with an
    /// empty transcript and a false verdict, and the session continues.
    ///
    /// # Errors
    ///
    /// Returns `CaptureError::CapabilityUnavailable` if the host has no
    /// recognition facility, `CaptureError::Cancelled` if a newer capture
    /// or a close superseded this one. Neither produces a verdict.
    pub async fn capture(&self, item: &WordItem) -> Result<CaptureResult, CaptureError> {
        if !self.provider.is_available() {
            return Err(CaptureError::CapabilityUnavailable);
        }

        let (cancel_tx, mut cancel_rx) = oneshot::channel();
        let my_seq = {
            let mut slot = self.active.lock().await;
            if let Some(prior) = slot.cancel.take() {
                let _ = prior.send(());
            }
            slot.seq += 1;
            slot.cancel = Some(cancel_tx);
            slot.seq
        };

        let outcome = tokio::select! {
            _ = &mut cancel_rx => Err(CaptureError::Cancelled),
            heard = self.listen() => Ok(heard),
        };

        {
            let mut slot = self.active.lock().await;
            if slot.seq == my_seq {
                slot.cancel = None;
            }
        }

        let captured_at = self.clock.now();
        match outcome? {
            Ok(transcript) => Ok(CaptureResult::judged(item, transcript, captured_at)),
            Err(err) => {
                tracing::debug!(key = %item.key(), error = %err, "recognizer error, marking incorrect");
                Ok(CaptureResult::unrecognized(item, captured_at))
            }
        }
    }

    /// Cancel the in-flight capture, if any, releasing the recognizer.
    ///
    /// Called on session close so a dismissed session never leaks a
    /// listening microphone or applies a late verdict.
    pub async fn cancel_active(&self) {
        let mut slot = self.active.lock().await;
        if let Some(prior) = slot.cancel.take() {
            let _ = prior.send(());
        }
    }

    async fn listen(&self) -> Result<String, RecognitionError> {
        match self.config.timeout {
            Some(limit) => {
                match tokio::time::timeout(limit, self.provider.recognize(&self.config)).await {
                    Ok(heard) => heard,
                    Err(_) => Err(RecognitionError::Timeout),
                }
            }
            None => self.provider.recognize(&self.config).await,
        }
    }
}

impl fmt::Debug for SpeechJudge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpeechJudge")
            .field("config", &self.config)
            .field("clock", &self.clock)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{ScriptedProvider, UnavailableProvider};
    use drill_core::model::{Word, WordId, WordKey};
    use drill_core::time::fixed_clock;
    use std::time::Duration;

    fn item(index: u32, text: &str) -> WordItem {
        WordItem::new(
            WordKey::new(index),
            Word::new(WordId::new(u64::from(index) + 1), text).unwrap(),
        )
    }

    fn judge(provider: Arc<dyn SpeechCaptureProvider>) -> SpeechJudge {
        SpeechJudge::new(provider, CaptureConfig::default()).with_clock(fixed_clock())
    }

    #[tokio::test]
    async fn matching_transcript_is_correct() {
        let provider = Arc::new(ScriptedProvider::new());
        provider.push_transcript("แมว ");
        let judge = judge(provider);

        let result = judge.capture(&item(0, "แมว")).await.unwrap();
        assert!(result.is_correct());
    }

    #[tokio::test]
    async fn recognizer_error_is_absorbed_as_incorrect() {
        let provider = Arc::new(ScriptedProvider::new());
        provider.push_error(RecognitionError::NoSpeech);
        let judge = judge(provider);

        let result = judge.capture(&item(0, "แมว")).await.unwrap();
        assert_eq!(result.transcript(), "");
        assert!(!result.is_correct());
    }

    #[tokio::test]
    async fn unavailable_facility_fails_without_verdict() {
        let judge = judge(Arc::new(UnavailableProvider));

        let err = judge.capture(&item(0, "แมว")).await.unwrap_err();
        assert_eq!(err, CaptureError::CapabilityUnavailable);
    }

    #[tokio::test]
    async fn elapsed_timeout_resolves_as_incorrect() {
        let provider = Arc::new(ScriptedProvider::new());
        provider.push_hang();
        let judge = SpeechJudge::new(
            provider,
            CaptureConfig::default().with_timeout(Duration::from_millis(20)),
        )
        .with_clock(fixed_clock());

        let result = judge.capture(&item(0, "แมว")).await.unwrap();
        assert_eq!(result.transcript(), "");
        assert!(!result.is_correct());
    }

    #[tokio::test]
    async fn new_capture_cancels_the_in_flight_one() {
        let provider = Arc::new(ScriptedProvider::new());
        provider.push_hang();
        provider.push_transcript("แมว");
        let judge = Arc::new(judge(provider));

        let first = tokio::spawn({
            let judge = Arc::clone(&judge);
            let hung = item(0, "หมา");
            async move { judge.capture(&hung).await }
        });
        tokio::task::yield_now().await;

        let second = judge.capture(&item(1, "แมว")).await.unwrap();
        assert!(second.is_correct());

        let first = first.await.unwrap();
        assert_eq!(first.unwrap_err(), CaptureError::Cancelled);
    }

    #[tokio::test]
    async fn cancel_active_discards_pending_capture() {
        let provider = Arc::new(ScriptedProvider::new());
        provider.push_hang();
        let judge = Arc::new(judge(provider));

        let pending = tokio::spawn({
            let judge = Arc::clone(&judge);
            let hung = item(0, "แมว");
            async move { judge.capture(&hung).await }
        });
        tokio::task::yield_now().await;

        judge.cancel_active().await;
        let outcome = pending.await.unwrap();
        assert_eq!(outcome.unwrap_err(), CaptureError::Cancelled);
    }

    #[tokio::test]
    async fn cancel_active_without_capture_is_a_no_op() {
        let judge = judge(Arc::new(ScriptedProvider::new()));
        judge.cancel_active().await;
    }
}
