#![forbid(unsafe_code)]

pub mod aggregator;
pub mod error;
pub mod progress;
pub mod sequencer;
pub mod session;
pub mod workflow;

pub use drill_core::Clock;

pub use aggregator::ResultAggregator;
pub use error::SessionError;
pub use progress::SessionProgress;
pub use sequencer::{SelectionMode, SequencerError, WordSequencer};
pub use session::{PracticeSession, SessionMode};
pub use workflow::{CaptureOutcome, PracticeService};
