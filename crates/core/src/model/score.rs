use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ScoreError {
    #[error("score ({score}) exceeds total ({total})")]
    ScoreExceedsTotal { score: u32, total: u32 },

    #[error("total ({total}) does not match detail count ({details})")]
    DetailCountMismatch { total: u32, details: usize },

    #[error("score ({score}) does not match correct details ({flagged})")]
    ScoreMismatch { score: u32, flagged: usize },

    #[error("detail {index} is marked correct but has no chosen answer")]
    CorrectWithoutAnswer { index: usize },
}

/// Outcome for one question after scoring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultDetail {
    question: String,
    chosen: Option<String>,
    correct: Option<String>,
    is_correct: bool,
}

impl ResultDetail {
    /// `chosen` is `None` when the question was not answered. `correct` is `None`
    /// when the quiz has no choice flagged correct for this question.
    #[must_use]
    pub fn new(
        question: impl Into<String>,
        chosen: Option<String>,
        correct: Option<String>,
        is_correct: bool,
    ) -> Self {
        Self {
            question: question.into(),
            chosen,
            correct,
            is_correct,
        }
    }

    #[must_use]
    pub fn question(&self) -> &str {
        &self.question
    }

    #[must_use]
    pub fn chosen(&self) -> Option<&str> {
        self.chosen.as_deref()
    }

    #[must_use]
    pub fn correct(&self) -> Option<&str> {
        self.correct.as_deref()
    }

    #[must_use]
    pub fn is_correct(&self) -> bool {
        self.is_correct
    }

    #[must_use]
    pub fn is_answered(&self) -> bool {
        self.chosen.is_some()
    }
}

/// Scored result for a whole submission, details in question order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreResult {
    score: u32,
    total: u32,
    details: Vec<ResultDetail>,
}

impl ScoreResult {
    /// # Errors
    ///
    /// Returns `ScoreError` when the totals and details disagree.
    pub fn new(score: u32, total: u32, details: Vec<ResultDetail>) -> Result<Self, ScoreError> {
        if score > total {
            return Err(ScoreError::ScoreExceedsTotal { score, total });
        }
        if usize::try_from(total).ok() != Some(details.len()) {
            return Err(ScoreError::DetailCountMismatch {
                total,
                details: details.len(),
            });
        }
        if let Some(index) = details
            .iter()
            .position(|detail| detail.is_correct && !detail.is_answered())
        {
            return Err(ScoreError::CorrectWithoutAnswer { index });
        }
        let flagged = details.iter().filter(|detail| detail.is_correct).count();
        if usize::try_from(score).ok() != Some(flagged) {
            return Err(ScoreError::ScoreMismatch { score, flagged });
        }

        Ok(Self {
            score,
            total,
            details,
        })
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.total
    }

    #[must_use]
    pub fn details(&self) -> &[ResultDetail] {
        &self.details
    }
}
