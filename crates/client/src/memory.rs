use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use drill_core::model::{ExerciseId, TestId, Word};

use crate::api::{ApiError, ExerciseReport, ResultSink, TestReport, WordSource};

#[derive(Default)]
struct Inner {
    exercise_words: HashMap<ExerciseId, Vec<Word>>,
    test_words: HashMap<TestId, Vec<Word>>,
    exercise_reports: Vec<ExerciseReport>,
    test_reports: Vec<TestReport>,
    fail_submissions: bool,
}

/// In-memory backend double for tests and offline development.
///
/// Seed word lists per exercise/test id, then inspect the reports the
/// services layer submitted. `set_fail_submissions` makes submissions fail
/// with a server error to exercise the retry path.
#[derive(Clone, Default)]
pub struct InMemoryBackend {
    inner: Arc<Mutex<Inner>>,
}

impl InMemoryBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed_exercise(&self, id: ExerciseId, words: Vec<Word>) {
        self.lock().exercise_words.insert(id, words);
    }

    pub fn seed_test(&self, id: TestId, words: Vec<Word>) {
        self.lock().test_words.insert(id, words);
    }

    pub fn set_fail_submissions(&self, fail: bool) {
        self.lock().fail_submissions = fail;
    }

    #[must_use]
    pub fn exercise_reports(&self) -> Vec<ExerciseReport> {
        self.lock().exercise_reports.clone()
    }

    #[must_use]
    pub fn test_reports(&self) -> Vec<TestReport> {
        self.lock().test_reports.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().expect("in-memory backend lock poisoned")
    }
}

#[async_trait]
impl WordSource for InMemoryBackend {
    async fn exercise_words(&self, id: ExerciseId) -> Result<Vec<Word>, ApiError> {
        self.lock()
            .exercise_words
            .get(&id)
            .cloned()
            .ok_or(ApiError::NotFound)
    }

    async fn test_words(&self, id: TestId) -> Result<Vec<Word>, ApiError> {
        self.lock()
            .test_words
            .get(&id)
            .cloned()
            .ok_or(ApiError::NotFound)
    }
}

#[async_trait]
impl ResultSink for InMemoryBackend {
    async fn submit_exercise(&self, report: &ExerciseReport) -> Result<(), ApiError> {
        let mut inner = self.lock();
        if inner.fail_submissions {
            return Err(ApiError::HttpStatus(
                reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            ));
        }
        inner.exercise_reports.push(report.clone());
        Ok(())
    }

    async fn submit_test(&self, report: &TestReport) -> Result<(), ApiError> {
        let mut inner = self.lock();
        if inner.fail_submissions {
            return Err(ApiError::HttpStatus(
                reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            ));
        }
        inner.test_reports.push(report.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drill_core::model::WordId;

    fn word(id: u64, text: &str) -> Word {
        Word::new(WordId::new(id), text).unwrap()
    }

    #[tokio::test]
    async fn seeded_words_come_back_in_order() {
        let backend = InMemoryBackend::new();
        backend.seed_exercise(
            ExerciseId::new(1),
            vec![word(1, "แมว"), word(2, "หมา")],
        );

        let words = backend.exercise_words(ExerciseId::new(1)).await.unwrap();
        assert_eq!(words.len(), 2);
        assert_eq!(words[0].text(), "แมว");
    }

    #[tokio::test]
    async fn unknown_ids_are_not_found() {
        let backend = InMemoryBackend::new();
        assert!(matches!(
            backend.test_words(TestId::new(9)).await,
            Err(ApiError::NotFound)
        ));
    }

    #[tokio::test]
    async fn failing_submissions_record_nothing() {
        let backend = InMemoryBackend::new();
        backend.set_fail_submissions(true);

        let report = ExerciseReport {
            exercise_id: ExerciseId::new(1),
            score: 1,
            total_score: 1,
        };
        assert!(backend.submit_exercise(&report).await.is_err());
        assert!(backend.exercise_reports().is_empty());
    }
}
