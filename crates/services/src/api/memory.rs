use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use log::debug;

use quiz_core::model::{
    AnswerMap, Choice, ChoiceId, Question, QuestionId, QuestionList, QuizId, ResultDetail,
    ScoreResult,
};

use super::QuizApi;
use crate::error::ApiError;

/// Authoring shape of a choice, including whether it is the right answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceDefinition {
    pub text: String,
    pub is_correct: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionDefinition {
    pub text: String,
    pub choices: Vec<ChoiceDefinition>,
}

impl QuestionDefinition {
    /// Text of the first choice flagged correct, if any.
    #[must_use]
    pub fn correct_text(&self) -> Option<&str> {
        self.choices
            .iter()
            .find(|choice| choice.is_correct)
            .map(|choice| choice.text.as_str())
    }
}

/// A quiz as stored server-side: questions plus their answer key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuizDefinition {
    pub questions: Vec<QuestionDefinition>,
}

impl QuizDefinition {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a question. `correct` is the index of the right choice.
    #[must_use]
    pub fn with_question(mut self, text: &str, choices: &[&str], correct: Option<usize>) -> Self {
        let choices = choices
            .iter()
            .enumerate()
            .map(|(idx, text)| ChoiceDefinition {
                text: (*text).to_string(),
                is_correct: Some(idx) == correct,
            })
            .collect();
        self.questions.push(QuestionDefinition {
            text: text.to_string(),
            choices,
        });
        self
    }

    /// Client-facing view: ordinal ids (`"0"`, `"1"`, ...) and no answer key.
    ///
    /// # Errors
    ///
    /// Returns `quiz_core::Error` if the generated ids fail validation.
    pub fn question_list(&self) -> Result<QuestionList, quiz_core::Error> {
        let mut questions = Vec::with_capacity(self.questions.len());
        for (q_idx, question) in self.questions.iter().enumerate() {
            let choices = question
                .choices
                .iter()
                .enumerate()
                .map(|(c_idx, choice)| {
                    Ok(Choice::new(ChoiceId::new(c_idx.to_string())?, &choice.text))
                })
                .collect::<Result<Vec<_>, quiz_core::Error>>()?;
            questions.push(Question::new(
                QuestionId::new(q_idx.to_string())?,
                &question.text,
                choices,
            )?);
        }
        Ok(QuestionList::new(questions)?)
    }

    /// Score `answers` against the answer key.
    ///
    /// A chosen id that is not a valid choice ordinal counts as unanswered.
    ///
    /// # Errors
    ///
    /// Returns `quiz_core::Error` if the quiz is too large to count in `u32`.
    pub fn score(&self, answers: &AnswerMap) -> Result<ScoreResult, quiz_core::Error> {
        let mut details = Vec::with_capacity(self.questions.len());
        let mut correct_count = 0_u32;

        for (q_idx, question) in self.questions.iter().enumerate() {
            let chosen = QuestionId::new(q_idx.to_string())
                .ok()
                .and_then(|id| answers.get(&id))
                .and_then(|choice_id| choice_id.as_str().parse::<usize>().ok())
                .and_then(|c_idx| question.choices.get(c_idx));

            let is_correct = chosen.is_some_and(|choice| choice.is_correct);
            if is_correct {
                correct_count = correct_count.saturating_add(1);
            }

            details.push(ResultDetail::new(
                &question.text,
                chosen.map(|choice| choice.text.clone()),
                question.correct_text().map(str::to_string),
                is_correct,
            ));
        }

        let total = u32::try_from(self.questions.len()).unwrap_or(u32::MAX);
        Ok(ScoreResult::new(correct_count, total, details)?)
    }
}

/// `QuizApi` that keeps quizzes in memory and scores locally.
///
/// Quizzes are fixed once the value is built; clones share the submission log.
#[derive(Clone, Default)]
pub struct InMemoryQuizApi {
    quizzes: Arc<HashMap<QuizId, QuizDefinition>>,
    submissions: Arc<Mutex<Vec<(QuizId, AnswerMap)>>>,
}

impl InMemoryQuizApi {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_quiz(mut self, quiz_id: QuizId, quiz: QuizDefinition) -> Self {
        Arc::make_mut(&mut self.quizzes).insert(quiz_id, quiz);
        self
    }

    /// Every answer set received so far, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Unavailable` if the submission log lock is poisoned.
    pub fn submissions(&self) -> Result<Vec<(QuizId, AnswerMap)>, ApiError> {
        let guard = self
            .submissions
            .lock()
            .map_err(|e| ApiError::Unavailable(e.to_string()))?;
        Ok(guard.clone())
    }

    fn quiz(&self, quiz_id: &QuizId) -> Result<&QuizDefinition, ApiError> {
        self.quizzes
            .get(quiz_id)
            .ok_or_else(|| ApiError::QuizNotFound(quiz_id.clone()))
    }
}

#[async_trait]
impl QuizApi for InMemoryQuizApi {
    async fn load_questions(&self, quiz_id: &QuizId) -> Result<QuestionList, ApiError> {
        let quiz = self.quiz(quiz_id)?;
        debug!("serving {} in-memory questions for {quiz_id}", quiz.questions.len());
        Ok(quiz.question_list()?)
    }

    async fn submit_answers(
        &self,
        quiz_id: &QuizId,
        answers: &AnswerMap,
    ) -> Result<ScoreResult, ApiError> {
        let quiz = self.quiz(quiz_id)?;
        self.submissions
            .lock()
            .map_err(|e| ApiError::Unavailable(e.to_string()))?
            .push((quiz_id.clone(), answers.clone()));
        Ok(quiz.score(answers)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiz_id() -> QuizId {
        QuizId::new("quiz-1").unwrap()
    }

    fn answers(pairs: &[(&str, &str)]) -> AnswerMap {
        pairs
            .iter()
            .map(|(q, c)| (QuestionId::new(*q).unwrap(), ChoiceId::new(*c).unwrap()))
            .collect()
    }

    fn sample() -> QuizDefinition {
        QuizDefinition::new()
            .with_question("2 + 2?", &["3", "4"], Some(1))
            .with_question("Sky colour?", &["Blue", "Green"], Some(0))
            .with_question("Opinion?", &["Yes", "No"], None)
    }

    #[test]
    fn question_list_uses_ordinal_ids() {
        let list = sample().question_list().unwrap();
        let second = list.get(1).unwrap();
        assert_eq!(second.id().as_str(), "1");
        assert_eq!(second.choices()[1].id().as_str(), "1");
        assert_eq!(second.choices()[1].text(), "Green");
    }

    #[test]
    fn scores_like_the_server() {
        let result = sample()
            .score(&answers(&[("0", "1"), ("1", "1"), ("2", "0")]))
            .unwrap();

        assert_eq!(result.score(), 1);
        assert_eq!(result.total(), 3);
        let details = result.details();
        assert!(details[0].is_correct());
        assert_eq!(details[1].chosen(), Some("Green"));
        assert_eq!(details[1].correct(), Some("Blue"));
        assert_eq!(details[2].correct(), None);
        assert!(!details[2].is_correct());
    }

    #[test]
    fn out_of_range_choice_counts_as_unanswered() {
        let result = sample()
            .score(&answers(&[("0", "7"), ("1", "x")]))
            .unwrap();
        assert_eq!(result.details()[0].chosen(), None);
        assert_eq!(result.details()[1].chosen(), None);
        assert_eq!(result.score(), 0);
    }

    #[tokio::test]
    async fn unknown_quiz_is_not_found() {
        let api = InMemoryQuizApi::new();
        let err = api.load_questions(&quiz_id()).await.unwrap_err();
        assert!(matches!(err, ApiError::QuizNotFound(_)));
    }

    #[tokio::test]
    async fn records_submissions() {
        let api = InMemoryQuizApi::new().with_quiz(quiz_id(), sample());
        let submitted = answers(&[("0", "1")]);
        let result = api.submit_answers(&quiz_id(), &submitted).await.unwrap();

        assert_eq!(result.score(), 1);
        assert_eq!(api.submissions().unwrap(), vec![(quiz_id(), submitted)]);
    }

    #[tokio::test]
    async fn poisoned_submission_log_is_unavailable() {
        let api = InMemoryQuizApi::new().with_quiz(quiz_id(), sample());
        let shared = api.clone();
        let crashed = std::thread::spawn(move || {
            let _guard = shared.submissions.lock().unwrap();
            panic!("writer crashed while holding the log");
        })
        .join();
        assert!(crashed.is_err());

        assert!(matches!(api.submissions(), Err(ApiError::Unavailable(_))));
        let err = api
            .submit_answers(&quiz_id(), &answers(&[("0", "1")]))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Unavailable(_)));
    }

    #[test]
    fn clones_keep_quizzes_added_before_cloning() {
        let api = InMemoryQuizApi::new().with_quiz(quiz_id(), sample());
        let other = api.clone().with_quiz(QuizId::new("quiz-2").unwrap(), QuizDefinition::new());

        assert!(api.quiz(&QuizId::new("quiz-2").unwrap()).is_err());
        assert_eq!(other.quiz(&quiz_id()).unwrap(), &sample());
    }
}
