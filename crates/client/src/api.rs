use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use drill_core::model::{ExerciseId, TestId, Word, WordId};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

/// Errors surfaced by backend adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ApiError {
    #[error("not found")]
    NotFound,

    #[error("backend request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("invalid backend response: {0}")]
    InvalidResponse(String),
}

//
// ─── WIRE TYPES ────────────────────────────────────────────────────────────────
//

/// Score report for a completed exercise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseReport {
    pub exercise_id: ExerciseId,
    pub score: usize,
    pub total_score: usize,
}

/// One graded answer inside a test report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerEntry {
    pub word_id: WordId,
    pub answer: String,
    pub is_correct: bool,
}

/// Score report for a completed test, including per-word answers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestReport {
    pub test_id: TestId,
    pub score: usize,
    pub total_score: usize,
    pub answers: Vec<AnswerEntry>,
}

/// Row shape of the word-list endpoints.
#[derive(Debug, Deserialize)]
pub(crate) struct WordRow {
    pub id: u64,
    pub text: String,
}

impl WordRow {
    pub(crate) fn into_word(self) -> Result<Word, ApiError> {
        Word::new(WordId::new(self.id), self.text)
            .map_err(|err| ApiError::InvalidResponse(err.to_string()))
    }
}

//
// ─── BOUNDARY TRAITS ───────────────────────────────────────────────────────────
//

/// Source of ordered word lists for exercises and tests.
#[async_trait]
pub trait WordSource: Send + Sync {
    /// Fetch the ordered word list for an exercise.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the backend is unreachable or responds with an
    /// error; a failed fetch blocks session start.
    async fn exercise_words(&self, id: ExerciseId) -> Result<Vec<Word>, ApiError>;

    /// Fetch the ordered word list for a test.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the backend is unreachable or responds with an
    /// error; a failed fetch blocks session start.
    async fn test_words(&self, id: TestId) -> Result<Vec<Word>, ApiError>;
}

/// Sink for completed-session score reports.
#[async_trait]
pub trait ResultSink: Send + Sync {
    /// Submit an exercise score.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on network failure or a non-success status. The
    /// caller keeps the computed score and may retry.
    async fn submit_exercise(&self, report: &ExerciseReport) -> Result<(), ApiError>;

    /// Submit a test score with per-word answers.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on network failure or a non-success status. The
    /// caller keeps the computed score and may retry.
    async fn submit_test(&self, report: &TestReport) -> Result<(), ApiError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_serialize_with_camel_case_fields() {
        let report = TestReport {
            test_id: TestId::new(4),
            score: 1,
            total_score: 2,
            answers: vec![AnswerEntry {
                word_id: WordId::new(9),
                answer: "แมว".to_owned(),
                is_correct: true,
            }],
        };

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["testId"], 4);
        assert_eq!(json["totalScore"], 2);
        assert_eq!(json["answers"][0]["wordId"], 9);
        assert_eq!(json["answers"][0]["isCorrect"], true);
    }

    #[test]
    fn exercise_report_omits_answers() {
        let report = ExerciseReport {
            exercise_id: ExerciseId::new(7),
            score: 0,
            total_score: 0,
        };

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["exerciseId"], 7);
        assert_eq!(json["score"], 0);
        assert!(json.get("answers").is_none());
    }

    #[test]
    fn word_row_rejects_blank_text() {
        let row = WordRow {
            id: 1,
            text: "  ".to_owned(),
        };
        assert!(matches!(
            row.into_word(),
            Err(ApiError::InvalidResponse(_))
        ));
    }
}
