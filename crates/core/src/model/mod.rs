mod answers;
mod ids;
mod question;
mod score;

pub use answers::AnswerMap;
pub use ids::{ChoiceId, IdError, QuestionId, QuizId};
pub use question::{Choice, Question, QuestionError, QuestionList};
pub use score::{ResultDetail, ScoreError, ScoreResult};
