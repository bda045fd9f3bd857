use thiserror::Error;

use crate::model::{IdError, QuestionError, ScoreError};

/// Any validation failure raised while building domain values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Id(#[from] IdError),
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Score(#[from] ScoreError),
}
