use chrono::{DateTime, Duration, Utc};
use log::{debug, warn};

use quiz_core::model::{AnswerMap, ChoiceId, Question, QuestionId, QuestionList, QuizId, ScoreResult};

use crate::error::{QuizError, SessionError};

//
// ─── PHASE ─────────────────────────────────────────────────────────────────────
//

/// Where a quiz session is in its lifecycle.
///
/// `Loading → Active ⇄ Submitting → Completed`, with `Empty` and `LoadFailed`
/// as the two terminal outcomes of loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizPhase {
    Loading,
    Empty,
    LoadFailed,
    Active,
    Submitting,
    Completed,
}

/// Last collaborator failure, kept for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionNotice {
    LoadFailed(String),
    SubmitFailed(String),
}

impl SessionNotice {
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::LoadFailed(message) | Self::SubmitFailed(message) => message,
        }
    }
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// Navigation and answer collection for one quiz attempt.
///
/// Every mutation goes through a transition method that checks the current phase
/// first; a rejected call returns `SessionError` and leaves the session untouched.
/// The one exception is `submit_succeeded` with a mismatched score, which is
/// recorded as a failed submit.
pub struct QuizSession {
    quiz_id: QuizId,
    phase: QuizPhase,
    questions: QuestionList,
    position: usize,
    answers: AnswerMap,
    result: Option<ScoreResult>,
    notice: Option<SessionNotice>,
    started_at: Option<DateTime<Utc>>,
    completed_at: Option<DateTime<Utc>>,
}

impl QuizSession {
    /// A session waiting for its questions.
    #[must_use]
    pub fn new(quiz_id: QuizId) -> Self {
        Self {
            quiz_id,
            phase: QuizPhase::Loading,
            questions: QuestionList::empty(),
            position: 0,
            answers: AnswerMap::new(),
            result: None,
            notice: None,
            started_at: None,
            completed_at: None,
        }
    }

    #[must_use]
    pub fn quiz_id(&self) -> &QuizId {
        &self.quiz_id
    }

    #[must_use]
    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    #[must_use]
    pub fn questions(&self) -> &QuestionList {
        &self.questions
    }

    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    #[must_use]
    pub fn answers(&self) -> &AnswerMap {
        &self.answers
    }

    #[must_use]
    pub fn result(&self) -> Option<&ScoreResult> {
        self.result.as_ref()
    }

    #[must_use]
    pub fn notice(&self) -> Option<&SessionNotice> {
        self.notice.as_ref()
    }

    #[must_use]
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Time between questions arriving and the score arriving.
    #[must_use]
    pub fn elapsed(&self) -> Option<Duration> {
        Some(self.completed_at? - self.started_at?)
    }

    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        match self.phase {
            QuizPhase::Active | QuizPhase::Submitting => self.questions.get(self.position),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_last_question(&self) -> bool {
        self.position + 1 == self.questions.len()
    }

    #[must_use]
    pub fn can_go_previous(&self) -> bool {
        self.phase == QuizPhase::Active && self.position > 0
    }

    #[must_use]
    pub fn can_go_next(&self) -> bool {
        self.phase == QuizPhase::Active && self.position + 1 < self.questions.len()
    }

    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.phase == QuizPhase::Active && self.is_last_question()
    }

    //
    // ─── LOADING ───────────────────────────────────────────────────────────────
    //

    /// Accept the loaded questions. An empty list ends in `Empty`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidPhase` unless the session is `Loading`.
    pub fn load_succeeded(
        &mut self,
        questions: QuestionList,
        now: DateTime<Utc>,
    ) -> Result<(), SessionError> {
        self.expect_phase(QuizPhase::Loading)?;

        self.phase = if questions.is_empty() {
            QuizPhase::Empty
        } else {
            QuizPhase::Active
        };
        self.questions = questions;
        self.position = 0;
        self.answers = AnswerMap::new();
        self.notice = None;
        self.started_at = Some(now);

        debug!(
            "quiz {} loaded {} questions -> {:?}",
            self.quiz_id,
            self.questions.len(),
            self.phase
        );
        Ok(())
    }

    /// Record a load failure. The session never becomes `Active` afterwards.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidPhase` unless the session is `Loading`.
    pub fn load_failed(&mut self, error: &QuizError) -> Result<(), SessionError> {
        self.expect_phase(QuizPhase::Loading)?;
        warn!("quiz {} failed to load: {error}", self.quiz_id);
        self.phase = QuizPhase::LoadFailed;
        self.notice = Some(SessionNotice::LoadFailed(error.to_string()));
        Ok(())
    }

    //
    // ─── NAVIGATION ────────────────────────────────────────────────────────────
    //

    /// Record `choice` for the current question. Position does not change.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidPhase` outside `Active`,
    /// `SessionError::WrongQuestion` if `question` is not the current one, and
    /// `SessionError::UnknownChoice` if `choice` is not one of its choices.
    pub fn select_answer(
        &mut self,
        question: &QuestionId,
        choice: &ChoiceId,
    ) -> Result<(), SessionError> {
        self.expect_phase(QuizPhase::Active)?;
        let current = self
            .questions
            .get(self.position)
            .ok_or(SessionError::InvalidPhase {
                expected: QuizPhase::Active,
                actual: self.phase,
            })?;

        if current.id() != question {
            return Err(SessionError::WrongQuestion {
                expected: current.id().clone(),
                actual: question.clone(),
            });
        }
        if !current.has_choice(choice) {
            return Err(SessionError::UnknownChoice {
                question: question.clone(),
                choice: choice.clone(),
            });
        }

        self.answers.select(question.clone(), choice.clone());
        debug!("quiz {} answered {question} -> {choice}", self.quiz_id);
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `SessionError::InvalidPhase` outside `Active` and
    /// `SessionError::AtFirstQuestion` at position 0.
    pub fn go_previous(&mut self) -> Result<usize, SessionError> {
        self.expect_phase(QuizPhase::Active)?;
        if self.position == 0 {
            return Err(SessionError::AtFirstQuestion);
        }
        self.position -= 1;
        Ok(self.position)
    }

    /// # Errors
    ///
    /// Returns `SessionError::InvalidPhase` outside `Active` and
    /// `SessionError::AtLastQuestion` on the final question.
    pub fn go_next(&mut self) -> Result<usize, SessionError> {
        self.expect_phase(QuizPhase::Active)?;
        if self.is_last_question() {
            return Err(SessionError::AtLastQuestion);
        }
        self.position += 1;
        Ok(self.position)
    }

    //
    // ─── SUBMISSION ────────────────────────────────────────────────────────────
    //

    /// Freeze the answers and enter `Submitting`, returning the snapshot to send.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidPhase` outside `Active` and
    /// `SessionError::NotOnLastQuestion` before the final question.
    pub fn begin_submit(&mut self) -> Result<AnswerMap, SessionError> {
        self.expect_phase(QuizPhase::Active)?;
        if !self.is_last_question() {
            return Err(SessionError::NotOnLastQuestion {
                position: self.position,
                total: self.questions.len(),
            });
        }

        self.phase = QuizPhase::Submitting;
        self.notice = None;
        debug!(
            "quiz {} submitting {} of {} answers",
            self.quiz_id,
            self.answers.len(),
            self.questions.len()
        );
        Ok(self.answers.clone())
    }

    /// Store the score and enter the terminal `Completed` phase.
    ///
    /// A result that does not cover every question is treated as a failed submit.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidPhase` unless `Submitting`, leaving the
    /// session as it was. Returns `SessionError::ResultMismatch` when the
    /// result's total disagrees with the quiz; unlike other errors this one
    /// moves the session back to `Active` with a `SubmitFailed` notice, as
    /// `submit_failed` would.
    pub fn submit_succeeded(
        &mut self,
        result: ScoreResult,
        now: DateTime<Utc>,
    ) -> Result<&ScoreResult, SessionError> {
        self.expect_phase(QuizPhase::Submitting)?;

        let expected = self.questions.len();
        if usize::try_from(result.total()).ok() != Some(expected) {
            let err = SessionError::ResultMismatch {
                expected,
                actual: result.total(),
            };
            warn!("quiz {} rejected score: {err}", self.quiz_id);
            self.phase = QuizPhase::Active;
            self.notice = Some(SessionNotice::SubmitFailed(err.to_string()));
            return Err(err);
        }

        self.phase = QuizPhase::Completed;
        self.completed_at = Some(now);
        self.notice = None;
        debug!(
            "quiz {} completed with {} / {}",
            self.quiz_id,
            result.score(),
            result.total()
        );
        Ok(&*self.result.insert(result))
    }

    /// Return to `Active` with position and answers intact so the user can retry.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidPhase` unless `Submitting`.
    pub fn submit_failed(&mut self, error: &QuizError) -> Result<(), SessionError> {
        self.expect_phase(QuizPhase::Submitting)?;
        warn!("quiz {} submit failed: {error}", self.quiz_id);
        self.phase = QuizPhase::Active;
        self.notice = Some(SessionNotice::SubmitFailed(error.to_string()));
        Ok(())
    }

    fn expect_phase(&self, expected: QuizPhase) -> Result<(), SessionError> {
        if self.phase == expected {
            Ok(())
        } else {
            debug!(
                "quiz {} rejected transition: expected {expected:?}, was {:?}",
                self.quiz_id, self.phase
            );
            Err(SessionError::InvalidPhase {
                expected,
                actual: self.phase,
            })
        }
    }
}

impl std::fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuizSession")
            .field("quiz_id", &self.quiz_id)
            .field("phase", &self.phase)
            .field("questions_len", &self.questions.len())
            .field("position", &self.position)
            .field("answers_len", &self.answers.len())
            .field("completed_at", &self.completed_at)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
