use std::time::Duration;

/// Configuration for one recognition attempt.
///
/// Mirrors the recognizer settings the product uses: single final result,
/// one alternative, Thai by default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureConfig {
    /// BCP-47 language tag passed to the recognizer.
    pub language: String,
    /// Whether partial hypotheses are requested. The judge only consumes
    /// final transcripts, so this stays off.
    pub interim_results: bool,
    /// How many alternative transcripts the recognizer may return.
    pub max_alternatives: u8,
    /// Optional cap on how long a capture may stay pending. `None` matches
    /// the recognizer's own behavior of waiting indefinitely; when set, an
    /// elapsed capture resolves as `RecognitionError::Timeout`.
    pub timeout: Option<Duration>,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            language: "th-TH".to_owned(),
            interim_results: false,
            max_alternatives: 1,
            timeout: None,
        }
    }
}

impl CaptureConfig {
    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}
