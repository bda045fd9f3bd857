//! Collaborators that supply questions and score submissions.

mod http;
mod memory;
mod wire;

use async_trait::async_trait;

use quiz_core::model::{AnswerMap, QuestionList, QuizId, ScoreResult};

use crate::error::ApiError;

pub use http::{DEFAULT_BASE_URL, HttpQuizApi, HttpQuizConfig};
pub use memory::{ChoiceDefinition, InMemoryQuizApi, QuestionDefinition, QuizDefinition};

/// Backend for one quiz: question loading and answer scoring.
///
/// Implementations must treat any malformed payload as an error rather than
/// returning partial data.
#[async_trait]
pub trait QuizApi: Send + Sync {
    /// Fetch the ordered question list for `quiz_id`.
    async fn load_questions(&self, quiz_id: &QuizId) -> Result<QuestionList, ApiError>;

    /// Score `answers` for `quiz_id`. Unanswered questions are absent from the map.
    async fn submit_answers(
        &self,
        quiz_id: &QuizId,
        answers: &AnswerMap,
    ) -> Result<ScoreResult, ApiError>;
}
