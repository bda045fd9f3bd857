use chrono::Duration;

use quiz_core::model::{ChoiceId, QuestionId, ResultDetail};

use super::service::{QuizPhase, QuizSession};

/// Which navigation controls are visible.
///
/// Presentation-agnostic: the UI decides how "hidden" is expressed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControlsView {
    pub show_previous: bool,
    pub show_next: bool,
    pub show_submit: bool,
}

impl ControlsView {
    /// Controls for the transitions `session` would accept right now.
    ///
    /// Everything is hidden outside `Active`, so `Submitting` shows no controls.
    #[must_use]
    pub fn for_session(session: &QuizSession) -> Self {
        Self {
            show_previous: session.can_go_previous(),
            show_next: session.can_go_next(),
            show_submit: session.can_submit(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceView {
    pub id: ChoiceId,
    pub text: String,
    pub checked: bool,
}

/// The current question as it should be drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveView {
    /// 1-based.
    pub ordinal: usize,
    pub total: usize,
    pub question_id: QuestionId,
    pub text: String,
    /// Radio group name, unique per question.
    pub group_name: String,
    pub choices: Vec<ChoiceView>,
    pub controls: ControlsView,
    pub answered: usize,
    pub submitting: bool,
    /// Message from the last failed submit, if any.
    pub notice: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedView {
    pub score: u32,
    pub total: u32,
    pub details: Vec<ResultDetail>,
    pub elapsed: Option<Duration>,
}

/// Render model computed from session state alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizView {
    Loading,
    Empty,
    LoadFailed { message: String },
    Active(ActiveView),
    Completed(CompletedView),
}

impl QuizView {
    #[must_use]
    pub fn from_session(session: &QuizSession) -> Self {
        match session.phase() {
            QuizPhase::Loading => Self::Loading,
            QuizPhase::Empty => Self::Empty,
            QuizPhase::LoadFailed => Self::LoadFailed {
                message: session
                    .notice()
                    .map(|notice| notice.message().to_string())
                    .unwrap_or_default(),
            },
            QuizPhase::Active | QuizPhase::Submitting => {
                active_view(session).map_or(Self::Empty, Self::Active)
            }
            QuizPhase::Completed => match session.result() {
                Some(result) => Self::Completed(CompletedView {
                    score: result.score(),
                    total: result.total(),
                    details: result.details().to_vec(),
                    elapsed: session.elapsed(),
                }),
                None => Self::Empty,
            },
        }
    }
}

impl QuizSession {
    /// Pure render model for the current state.
    #[must_use]
    pub fn view(&self) -> QuizView {
        QuizView::from_session(self)
    }
}

/// Radio group name for a question, e.g. `q_3`.
#[must_use]
pub fn group_name(question: &QuestionId) -> String {
    format!("q_{question}")
}

fn active_view(session: &QuizSession) -> Option<ActiveView> {
    let question = session.current_question()?;
    let answers = session.answers();
    let submitting = session.phase() == QuizPhase::Submitting;

    let choices = question
        .choices()
        .iter()
        .map(|choice| ChoiceView {
            id: choice.id().clone(),
            text: choice.text().to_string(),
            checked: answers.is_selected(question.id(), choice.id()),
        })
        .collect();

    Some(ActiveView {
        ordinal: session.position() + 1,
        total: session.total_questions(),
        question_id: question.id().clone(),
        text: question.text().to_string(),
        group_name: group_name(question.id()),
        choices,
        controls: ControlsView::for_session(session),
        answered: answers.len(),
        submitting,
        notice: session.notice().map(|notice| notice.message().to_string()),
    })
}
