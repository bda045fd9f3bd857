mod service;
mod view;
mod workflow;

// Public API of the quiz session subsystem.
pub use crate::error::SessionError;
pub use service::{QuizPhase, QuizSession, SessionNotice};
pub use view::{ActiveView, ChoiceView, CompletedView, ControlsView, QuizView, group_name};
pub use workflow::QuizSessionService;
