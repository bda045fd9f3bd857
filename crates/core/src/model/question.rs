use std::collections::HashSet;

use thiserror::Error;

use crate::model::{ChoiceId, QuestionId};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question {question} lists choice {choice} more than once")]
    DuplicateChoice {
        question: QuestionId,
        choice: ChoiceId,
    },

    #[error("question {0} appears more than once")]
    DuplicateQuestion(QuestionId),
}

/// One selectable answer of a question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    id: ChoiceId,
    text: String,
}

impl Choice {
    #[must_use]
    pub fn new(id: ChoiceId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
        }
    }

    #[must_use]
    pub fn id(&self) -> &ChoiceId {
        &self.id
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// A single-select question with its ordered choices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id: QuestionId,
    text: String,
    choices: Vec<Choice>,
}

impl Question {
    /// Build a question, checking that choice ids are unique.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::DuplicateChoice` if two choices share an id.
    pub fn new(
        id: QuestionId,
        text: impl Into<String>,
        choices: Vec<Choice>,
    ) -> Result<Self, QuestionError> {
        let mut seen = HashSet::with_capacity(choices.len());
        for choice in &choices {
            if !seen.insert(choice.id()) {
                return Err(QuestionError::DuplicateChoice {
                    question: id,
                    choice: choice.id().clone(),
                });
            }
        }

        Ok(Self {
            id,
            text: text.into(),
            choices,
        })
    }

    #[must_use]
    pub fn id(&self) -> &QuestionId {
        &self.id
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn choices(&self) -> &[Choice] {
        &self.choices
    }

    #[must_use]
    pub fn choice(&self, id: &ChoiceId) -> Option<&Choice> {
        self.choices.iter().find(|choice| choice.id() == id)
    }

    #[must_use]
    pub fn has_choice(&self, id: &ChoiceId) -> bool {
        self.choice(id).is_some()
    }
}

/// Ordered, read-only list of questions for one quiz.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionList {
    questions: Vec<Question>,
}

impl QuestionList {
    /// Build a list, checking that question ids are unique.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::DuplicateQuestion` if two questions share an id.
    pub fn new(questions: Vec<Question>) -> Result<Self, QuestionError> {
        let mut seen = HashSet::with_capacity(questions.len());
        for question in &questions {
            if !seen.insert(question.id()) {
                return Err(QuestionError::DuplicateQuestion(question.id().clone()));
            }
        }
        Ok(Self { questions })
    }

    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    /// Index of the question with the given id.
    #[must_use]
    pub fn position_of(&self, id: &QuestionId) -> Option<usize> {
        self.questions.iter().position(|question| question.id() == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Question] {
        &self.questions
    }
}
