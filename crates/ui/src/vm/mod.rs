mod html;
mod quiz_vm;
mod time_fmt;

pub use html::sanitize_html;
pub use quiz_vm::{
    ChoiceVm, QuestionVm, QuizIntent, QuizScreen, ResultItemVm, ResultVm, map_quiz_view,
};
pub use time_fmt::format_elapsed;
