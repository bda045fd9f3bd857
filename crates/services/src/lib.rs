#![forbid(unsafe_code)]

pub mod api;
pub mod error;
pub mod sessions;

pub use quiz_core::Clock;

pub use api::{HttpQuizApi, HttpQuizConfig, InMemoryQuizApi, QuizApi, QuizDefinition};
pub use error::{ApiError, QuizError, SessionError};
pub use sessions::{QuizPhase, QuizSession, QuizSessionService, QuizView};
