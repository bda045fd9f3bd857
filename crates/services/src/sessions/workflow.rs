use std::sync::Arc;

use log::info;

use quiz_core::model::{AnswerMap, QuestionList, QuizId, ScoreResult};

use super::service::QuizSession;
use crate::Clock;
use crate::api::QuizApi;
use crate::error::{QuizError, SessionError};

/// Connects a `QuizSession` to the backend that serves and scores it.
///
/// The network calls and the state transitions are separate steps so a UI can
/// keep `Submitting` on screen while a request is in flight. `start` and
/// `submit` chain both halves for callers that don't need that.
#[derive(Clone)]
pub struct QuizSessionService {
    clock: Clock,
    api: Arc<dyn QuizApi>,
    quiz_id: QuizId,
}

impl QuizSessionService {
    #[must_use]
    pub fn new(clock: Clock, api: Arc<dyn QuizApi>, quiz_id: QuizId) -> Self {
        Self {
            clock,
            api,
            quiz_id,
        }
    }

    #[must_use]
    pub fn quiz_id(&self) -> &QuizId {
        &self.quiz_id
    }

    /// Fresh session in `Loading`.
    #[must_use]
    pub fn new_session(&self) -> QuizSession {
        QuizSession::new(self.quiz_id.clone())
    }

    /// # Errors
    ///
    /// Returns `QuizError::Load` if the backend call fails.
    pub async fn fetch_questions(&self) -> Result<QuestionList, QuizError> {
        self.api
            .load_questions(&self.quiz_id)
            .await
            .map_err(QuizError::Load)
    }

    /// # Errors
    ///
    /// Returns `QuizError::Submit` if the backend call fails.
    pub async fn send_answers(&self, answers: &AnswerMap) -> Result<ScoreResult, QuizError> {
        self.api
            .submit_answers(&self.quiz_id, answers)
            .await
            .map_err(QuizError::Submit)
    }

    /// Feed a load outcome into `session`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidPhase` if the session already left `Loading`.
    pub fn apply_load(
        &self,
        session: &mut QuizSession,
        outcome: Result<QuestionList, QuizError>,
    ) -> Result<(), SessionError> {
        match outcome {
            Ok(questions) => session.load_succeeded(questions, self.clock.now()),
            Err(err) => session.load_failed(&err),
        }
    }

    /// Feed a submit outcome into `session`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidPhase` unless the session is `Submitting`,
    /// and `SessionError::ResultMismatch` for a score that doesn't fit the quiz.
    pub fn apply_submit(
        &self,
        session: &mut QuizSession,
        outcome: Result<ScoreResult, QuizError>,
    ) -> Result<(), SessionError> {
        match outcome {
            Ok(result) => session
                .submit_succeeded(result, self.clock.now())
                .map(|_| ()),
            Err(err) => session.submit_failed(&err),
        }
    }

    /// Load questions into a `Loading` session.
    ///
    /// A backend failure is not an error here: the session lands in `LoadFailed`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidPhase` if the session already left `Loading`.
    pub async fn start(&self, session: &mut QuizSession) -> Result<(), SessionError> {
        let outcome = self.fetch_questions().await;
        self.apply_load(session, outcome)?;
        info!(
            "quiz {} started as {:?} with {} questions",
            self.quiz_id,
            session.phase(),
            session.total_questions()
        );
        Ok(())
    }

    /// Submit from the last question and wait for the score.
    ///
    /// On backend failure the session is back in `Active` and the error is returned.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if the session cannot submit, `SessionError::Quiz`
    /// if the backend fails, and `SessionError::ResultMismatch` for a bad score.
    pub async fn submit(&self, session: &mut QuizSession) -> Result<ScoreResult, SessionError> {
        let answers = session.begin_submit()?;
        match self.send_answers(&answers).await {
            Ok(result) => {
                let stored = session.submit_succeeded(result, self.clock.now())?;
                info!(
                    "quiz {} submitted: {} / {}",
                    self.quiz_id,
                    stored.score(),
                    stored.total()
                );
                Ok(stored.clone())
            }
            Err(err) => {
                session.submit_failed(&err)?;
                Err(SessionError::Quiz(err))
            }
        }
    }
}
