#![forbid(unsafe_code)]

//! Speech-capture boundary: a capability trait over the host recognition
//! facility, one-capture-at-a-time judging against target words, and
//! scripted providers for deterministic tests.

pub mod config;
pub mod error;
pub mod judge;
pub mod mock;
pub mod provider;

pub use config::CaptureConfig;
pub use error::{CaptureError, RecognitionError};
pub use judge::SpeechJudge;
pub use mock::{ScriptedProvider, UnavailableProvider};
pub use provider::SpeechCaptureProvider;
