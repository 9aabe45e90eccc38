#![forbid(unsafe_code)]

//! Backend API boundary for the student practice flow: word-list fetching
//! and result submission, behind trait seams so the services crate can run
//! against the HTTP client or the in-memory double.

pub mod api;
pub mod http;
pub mod memory;

pub use api::{AnswerEntry, ApiError, ExerciseReport, ResultSink, TestReport, WordSource};
pub use http::{ApiConfig, StudentApi};
pub use memory::InMemoryBackend;
