//! JSON shapes exchanged with the quiz server.

use serde::{Deserialize, Serialize};

use quiz_core::model::{
    AnswerMap, Choice, ChoiceId, Question, QuestionId, QuestionList, ResultDetail, ScoreResult,
};

#[derive(Debug, Deserialize)]
pub(crate) struct QuestionsPayload {
    questions: Vec<QuestionPayload>,
}

#[derive(Debug, Deserialize)]
struct QuestionPayload {
    id: QuestionId,
    text: String,
    choices: Vec<ChoicePayload>,
}

#[derive(Debug, Deserialize)]
struct ChoicePayload {
    id: ChoiceId,
    text: String,
}

impl QuestionsPayload {
    pub(crate) fn into_question_list(self) -> Result<QuestionList, quiz_core::Error> {
        let questions = self
            .questions
            .into_iter()
            .map(|question| {
                let choices = question
                    .choices
                    .into_iter()
                    .map(|choice| Choice::new(choice.id, choice.text))
                    .collect();
                Question::new(question.id, question.text, choices)
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(QuestionList::new(questions)?)
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct SubmitPayload<'a> {
    pub answers: &'a AnswerMap,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ScorePayload {
    score: u32,
    total: u32,
    details: Vec<DetailPayload>,
}

#[derive(Debug, Deserialize)]
struct DetailPayload {
    question: String,
    chosen: Option<String>,
    correct: Option<String>,
    is_correct: bool,
}

impl ScorePayload {
    pub(crate) fn into_score_result(self) -> Result<ScoreResult, quiz_core::Error> {
        let details = self
            .details
            .into_iter()
            .map(|detail| {
                ResultDetail::new(
                    detail.question,
                    detail.chosen,
                    detail.correct,
                    detail.is_correct,
                )
            })
            .collect();
        Ok(ScoreResult::new(self.score, self.total, details)?)
    }
}

/// Body the server sends alongside non-success statuses.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorPayload {
    pub error: String,
}
