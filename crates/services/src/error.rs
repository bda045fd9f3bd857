//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::{ChoiceId, QuestionId, QuizId};

use crate::sessions::QuizPhase;

/// Failures talking to a quiz backend.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ApiError {
    #[error("invalid quiz server url: {0}")]
    InvalidBaseUrl(String),
    #[error("quiz {0} not found")]
    QuizNotFound(QuizId),
    #[error("quiz server responded with {status}{}", server_message(.message))]
    HttpStatus {
        status: reqwest::StatusCode,
        message: Option<String>,
    },
    #[error("malformed response: {0}")]
    Malformed(#[source] serde_json::Error),
    #[error("invalid quiz data: {0}")]
    Model(#[from] quiz_core::Error),
    #[error("quiz backend unavailable: {0}")]
    Unavailable(String),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

fn server_message(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|text| format!(": {text}"))
        .unwrap_or_default()
}

/// A collaborator call failed, tagged with which call it was.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizError {
    #[error("could not load questions: {0}")]
    Load(#[source] ApiError),
    #[error("could not submit answers: {0}")]
    Submit(#[source] ApiError),
}

/// Errors emitted by the quiz session state machine.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("expected session to be {expected:?}, but it is {actual:?}")]
    InvalidPhase {
        expected: QuizPhase,
        actual: QuizPhase,
    },
    #[error("question {actual} is not the current question ({expected})")]
    WrongQuestion {
        expected: QuestionId,
        actual: QuestionId,
    },
    #[error("choice {choice} does not belong to question {question}")]
    UnknownChoice {
        question: QuestionId,
        choice: ChoiceId,
    },
    #[error("already at the first question")]
    AtFirstQuestion,
    #[error("already at the last question")]
    AtLastQuestion,
    #[error("answers can only be submitted from the last question (at {position} of {total})")]
    NotOnLastQuestion { position: usize, total: usize },
    #[error("result covers {actual} questions but the quiz has {expected}")]
    ResultMismatch { expected: usize, actual: u32 },
    #[error(transparent)]
    Quiz(#[from] QuizError),
}
