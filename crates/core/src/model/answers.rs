use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::model::{ChoiceId, QuestionId};

/// The user's in-progress selections, keyed by question.
///
/// A question only gains an entry once a choice is picked for it. Serializes as a
/// flat object mapping question ids to choice ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerMap {
    selections: HashMap<QuestionId, ChoiceId>,
}

impl AnswerMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `choice` for `question`, returning the previous selection.
    pub fn select(&mut self, question: QuestionId, choice: ChoiceId) -> Option<ChoiceId> {
        self.selections.insert(question, choice)
    }

    #[must_use]
    pub fn get(&self, question: &QuestionId) -> Option<&ChoiceId> {
        self.selections.get(question)
    }

    #[must_use]
    pub fn is_selected(&self, question: &QuestionId, choice: &ChoiceId) -> bool {
        self.get(question) == Some(choice)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.selections.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&QuestionId, &ChoiceId)> {
        self.selections.iter()
    }
}

impl FromIterator<(QuestionId, ChoiceId)> for AnswerMap {
    fn from_iter<I: IntoIterator<Item = (QuestionId, ChoiceId)>>(iter: I) -> Self {
        Self {
            selections: iter.into_iter().collect(),
        }
    }
}
