use std::sync::Arc;

use async_trait::async_trait;
use quiz_core::model::{AnswerMap, ChoiceId, QuestionId, QuestionList, QuizId, ScoreResult};
use dioxus::prelude::ReadableExt;
use services::{ApiError, InMemoryQuizApi, QuizApi, QuizDefinition, QuizPhase};

use super::test_harness::{
    ViewHarness, drive_dom, in_memory_api, sample_quiz, setup_view_harness,
};
use crate::vm::QuizIntent;

fn select(harness: &mut ViewHarness, question: &str, choice: &str) {
    send(
        harness,
        QuizIntent::Select {
            question: QuestionId::new(question).unwrap(),
            choice: ChoiceId::new(choice).unwrap(),
        },
    );
}

fn send(harness: &mut ViewHarness, intent: QuizIntent) {
    let dispatch = harness.handles.dispatch();
    harness.dom.in_runtime(|| dispatch.call(intent));
    drive_dom(&mut harness.dom);
}

fn phase(harness: &ViewHarness) -> QuizPhase {
    let session = harness.handles.session();
    harness.dom.in_runtime(|| session.read().phase())
}

/// Serves questions, refuses every submit.
struct RejectingSubmitApi {
    inner: InMemoryQuizApi,
}

#[async_trait]
impl QuizApi for RejectingSubmitApi {
    async fn load_questions(&self, quiz_id: &QuizId) -> Result<QuestionList, ApiError> {
        self.inner.load_questions(quiz_id).await
    }

    async fn submit_answers(
        &self,
        _quiz_id: &QuizId,
        _answers: &AnswerMap,
    ) -> Result<ScoreResult, ApiError> {
        Err(ApiError::Unavailable("server busy".to_string()))
    }
}

#[tokio::test(flavor = "current_thread")]
async fn first_question_renders_with_next_only() {
    let mut harness = setup_view_harness(Arc::new(in_memory_api(sample_quiz())));
    harness.start().await;

    let html = harness.render();
    assert!(html.contains("Question 1 / 3"), "missing heading in {html}");
    assert!(html.contains("2 + 2?"), "missing text in {html}");
    assert!(html.contains("q_0"), "missing radio group in {html}");
    assert!(html.contains("quiz-next"), "missing next in {html}");
    assert!(!html.contains("quiz-prev"), "unexpected previous in {html}");
    assert!(!html.contains("quiz-submit"), "unexpected submit in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn navigation_moves_between_questions() {
    let mut harness = setup_view_harness(Arc::new(in_memory_api(sample_quiz())));
    harness.start().await;

    select(&mut harness, "0", "1");
    send(&mut harness, QuizIntent::Next);
    let html = harness.render();
    assert!(html.contains("Question 2 / 3"), "missing heading in {html}");
    assert!(html.contains("quiz-prev"), "missing previous in {html}");
    assert!(html.contains("Answered 1 of 3"), "missing answered count in {html}");

    send(&mut harness, QuizIntent::Next);
    let html = harness.render();
    assert!(html.contains("Question 3 / 3"), "missing heading in {html}");
    assert!(html.contains("quiz-submit"), "missing submit in {html}");
    assert!(!html.contains("quiz-next"), "unexpected next in {html}");
    assert!(html.contains("H<sub>2</sub>O is?"), "markup not kept in {html}");

    send(&mut harness, QuizIntent::Previous);
    let html = harness.render();
    assert!(html.contains("Question 2 / 3"), "missing heading in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn submit_renders_result_with_unanswered_marker() {
    let api = in_memory_api(sample_quiz());
    let mut harness = setup_view_harness(Arc::new(api.clone()));
    harness.start().await;

    select(&mut harness, "0", "1");
    send(&mut harness, QuizIntent::Next);
    send(&mut harness, QuizIntent::Next);
    select(&mut harness, "2", "0");
    send(&mut harness, QuizIntent::Submit);
    harness.drive_async().await;
    harness.drive_async().await;

    assert_eq!(phase(&harness), QuizPhase::Completed);
    let html = harness.render();
    assert!(html.contains("Your score: 2 / 3"), "missing score in {html}");
    assert!(html.contains("<em>Not answered</em>"), "missing marker in {html}");
    assert!(html.contains("Time taken: 0:00"), "missing time in {html}");
    assert!(!html.contains("quiz-submit"), "controls still visible in {html}");

    let submitted = api.submissions().unwrap();
    assert_eq!(submitted.len(), 1);
    assert_eq!(submitted[0].1.len(), 2);
}

#[tokio::test(flavor = "current_thread")]
async fn submit_before_last_question_is_ignored() {
    let api = in_memory_api(sample_quiz());
    let mut harness = setup_view_harness(Arc::new(api.clone()));
    harness.start().await;

    send(&mut harness, QuizIntent::Submit);
    harness.drive_async().await;

    assert_eq!(phase(&harness), QuizPhase::Active);
    assert!(api.submissions().unwrap().is_empty());
}

#[tokio::test(flavor = "current_thread")]
async fn empty_quiz_renders_informational_state() {
    let mut harness = setup_view_harness(Arc::new(in_memory_api(QuizDefinition::new())));
    harness.start().await;

    let html = harness.render();
    assert!(html.contains("This quiz has no questions."), "missing empty state in {html}");
    assert_eq!(phase(&harness), QuizPhase::Empty);
}

#[tokio::test(flavor = "current_thread")]
async fn missing_quiz_renders_load_error() {
    let mut harness = setup_view_harness(Arc::new(InMemoryQuizApi::new()));
    harness.start().await;

    let html = harness.render();
    assert!(html.contains("Could not load this quiz."), "missing error in {html}");
    assert!(html.contains("not found"), "missing detail in {html}");
    assert_eq!(phase(&harness), QuizPhase::LoadFailed);
}

#[tokio::test(flavor = "current_thread")]
async fn failed_submit_shows_error_and_keeps_submit() {
    let inner = in_memory_api(
        QuizDefinition::new().with_question("Only question", &["Yes", "No"], Some(0)),
    );
    let mut harness = setup_view_harness(Arc::new(RejectingSubmitApi { inner }));
    harness.start().await;

    select(&mut harness, "0", "0");
    send(&mut harness, QuizIntent::Submit);
    harness.drive_async().await;
    harness.drive_async().await;

    assert_eq!(phase(&harness), QuizPhase::Active);
    let html = harness.render();
    assert!(html.contains("Could not submit your answers"), "missing error in {html}");
    assert!(html.contains("server busy"), "missing detail in {html}");
    assert!(html.contains("quiz-submit"), "submit hidden after failure in {html}");

    let session = harness.handles.session();
    let answered = harness.dom.in_runtime(|| session.read().answers().len());
    assert_eq!(answered, 1);
}
