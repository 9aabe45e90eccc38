use std::sync::Arc;

use client::InMemoryBackend;
use drill_core::model::{ExerciseId, SessionPhase, TestId, Word, WordId, WordKey};
use drill_core::time::fixed_clock;
use services::{PracticeService, SessionError};
use speech::{CaptureConfig, RecognitionError, ScriptedProvider, SpeechJudge};

fn words(texts: &[&str]) -> Vec<Word> {
    texts
        .iter()
        .enumerate()
        .map(|(i, text)| Word::new(WordId::new(i as u64 + 1), *text).unwrap())
        .collect()
}

fn service(backend: &InMemoryBackend, provider: Arc<ScriptedProvider>) -> PracticeService {
    let judge = SpeechJudge::new(provider, CaptureConfig::default()).with_clock(fixed_clock());
    PracticeService::new(
        fixed_clock(),
        Arc::new(backend.clone()),
        Arc::new(backend.clone()),
        judge,
    )
}

#[tokio::test]
async fn test_session_grades_sequentially_and_submits_once() {
    let backend = InMemoryBackend::new();
    backend.seed_test(TestId::new(5), words(&["แมว", "หมา"]));

    let provider = Arc::new(ScriptedProvider::new());
    provider.push_transcript("แมว ");
    provider.push_error(RecognitionError::NoSpeech);

    let svc = service(&backend, provider);
    let mut session = svc.start_test(TestId::new(5)).await.unwrap();
    assert_eq!(session.current_word().unwrap().word().text(), "แมว");

    let first = svc.capture_current(&mut session).await.unwrap();
    assert!(first.result.is_correct());
    assert!(!first.is_complete);

    let second = svc.capture_current(&mut session).await.unwrap();
    assert!(!second.result.is_correct());
    assert_eq!(second.result.transcript(), "");
    assert!(second.is_complete);
    assert_eq!(second.phase, SessionPhase::Submitted);

    let reports = backend.test_reports();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].test_id, TestId::new(5));
    assert_eq!(reports[0].score, 1);
    assert_eq!(reports[0].total_score, 2);
    assert_eq!(reports[0].answers.len(), 2);
    assert_eq!(reports[0].answers[0].word_id, WordId::new(1));
    assert!(reports[0].answers[0].is_correct);
    assert!(!reports[0].answers[1].is_correct);

    // capturing past the end is rejected
    assert!(matches!(
        svc.capture_current(&mut session).await,
        Err(SessionError::Completed)
    ));
}

#[tokio::test]
async fn exercise_session_accepts_learner_order() {
    let backend = InMemoryBackend::new();
    backend.seed_exercise(ExerciseId::new(9), words(&["a", "b", "c"]));

    let provider = Arc::new(ScriptedProvider::new());
    provider.push_transcript("c");
    provider.push_transcript("wrong");
    provider.push_transcript("b");

    let svc = service(&backend, provider);
    let mut session = svc.start_exercise(ExerciseId::new(9)).await.unwrap();

    svc.capture_word(&mut session, WordKey::new(2)).await.unwrap();
    svc.capture_word(&mut session, WordKey::new(0)).await.unwrap();
    let last = svc.capture_word(&mut session, WordKey::new(1)).await.unwrap();
    assert!(last.is_complete);

    let reports = backend.exercise_reports();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].exercise_id, ExerciseId::new(9));
    assert_eq!(reports[0].score, 2);
    assert_eq!(reports[0].total_score, 3);
}

#[tokio::test]
async fn reselecting_a_captured_word_is_rejected() {
    let backend = InMemoryBackend::new();
    backend.seed_exercise(ExerciseId::new(1), words(&["a", "b"]));

    let provider = Arc::new(ScriptedProvider::new());
    provider.push_transcript("a");

    let svc = service(&backend, provider);
    let mut session = svc.start_exercise(ExerciseId::new(1)).await.unwrap();
    svc.capture_word(&mut session, WordKey::new(0)).await.unwrap();

    let err = svc
        .capture_word(&mut session, WordKey::new(0))
        .await
        .unwrap_err();
    assert!(matches!(err, SessionError::Sequencer(_)));
    assert_eq!(session.summary().correct, 1);
}

#[tokio::test]
async fn empty_word_list_completes_and_submits_zero() {
    let backend = InMemoryBackend::new();
    backend.seed_exercise(ExerciseId::new(2), Vec::new());

    let svc = service(&backend, Arc::new(ScriptedProvider::new()));
    let session = svc.start_exercise(ExerciseId::new(2)).await.unwrap();

    assert!(session.is_complete());
    assert_eq!(session.phase(), SessionPhase::Submitted);
    assert_eq!(session.summary().correct, 0);
    assert_eq!(session.summary().total, 0);

    let reports = backend.exercise_reports();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].score, 0);
    assert_eq!(reports[0].total_score, 0);
}

#[tokio::test]
async fn fetch_failure_blocks_session_start() {
    let backend = InMemoryBackend::new();
    let svc = service(&backend, Arc::new(ScriptedProvider::new()));

    let err = svc.start_test(TestId::new(404)).await.unwrap_err();
    assert!(matches!(err, SessionError::Api(_)));
    assert!(backend.test_reports().is_empty());
}
