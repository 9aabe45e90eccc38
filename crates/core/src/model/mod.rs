mod capture;
mod ids;
mod phase;
mod tally;
mod word;

pub use capture::CaptureResult;
pub use ids::{ExerciseId, SessionId, TestId, WordId, WordKey};
pub use phase::SessionPhase;
pub use tally::{AnswerRecord, ScoreSummary, SessionTally, SubmissionRecord, TallyError};
pub use word::{items_from_words, Word, WordError, WordItem, WordState};
