//! Deterministic providers for tests: scripted transcripts/errors and a
//! host with no recognition facility.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::config::CaptureConfig;
use crate::error::RecognitionError;
use crate::provider::SpeechCaptureProvider;

enum ScriptedReply {
    Transcript(String),
    Error(RecognitionError),
    /// Never resolves; used to exercise cancellation and timeouts.
    Hang,
}

/// A provider that replays a queue of scripted outcomes in order.
///
/// An exhausted script reports `RecognitionError::NoSpeech`, mirroring a
/// recognizer that heard nothing.
#[derive(Default)]
pub struct ScriptedProvider {
    replies: Mutex<VecDeque<ScriptedReply>>,
}

impl ScriptedProvider {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a transcript for the next capture.
    pub fn push_transcript(&self, transcript: impl Into<String>) {
        self.push(ScriptedReply::Transcript(transcript.into()));
    }

    /// Queue a recognizer error for the next capture.
    pub fn push_error(&self, error: RecognitionError) {
        self.push(ScriptedReply::Error(error));
    }

    /// Queue a capture that never resolves.
    pub fn push_hang(&self) {
        self.push(ScriptedReply::Hang);
    }

    fn push(&self, reply: ScriptedReply) {
        self.replies
            .lock()
            .expect("scripted replies lock poisoned")
            .push_back(reply);
    }
}

#[async_trait]
impl SpeechCaptureProvider for ScriptedProvider {
    fn is_available(&self) -> bool {
        true
    }

    async fn recognize(&self, _config: &CaptureConfig) -> Result<String, RecognitionError> {
        let reply = self
            .replies
            .lock()
            .expect("scripted replies lock poisoned")
            .pop_front();

        match reply {
            Some(ScriptedReply::Transcript(text)) => Ok(text),
            Some(ScriptedReply::Error(err)) => Err(err),
            Some(ScriptedReply::Hang) => std::future::pending().await,
            None => Err(RecognitionError::NoSpeech),
        }
    }
}

/// A host without any speech-recognition facility.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableProvider;

#[async_trait]
impl SpeechCaptureProvider for UnavailableProvider {
    fn is_available(&self) -> bool {
        false
    }

    async fn recognize(&self, _config: &CaptureConfig) -> Result<String, RecognitionError> {
        Err(RecognitionError::Aborted)
    }
}
