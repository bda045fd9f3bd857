use quiz_core::model::{ChoiceId, QuestionId, ResultDetail};
use services::sessions::{ActiveView, CompletedView, QuizView};

use super::html::sanitize_html;
use super::time_fmt::format_elapsed;

const NOT_ANSWERED_HTML: &str = "<em>Not answered</em>";
const NO_CORRECT_ANSWER_HTML: &str = "<em>No correct answer set</em>";

/// User input on the quiz page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuizIntent {
    Select {
        question: QuestionId,
        choice: ChoiceId,
    },
    Previous,
    Next,
    Submit,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChoiceVm {
    pub id: ChoiceId,
    pub input_id: String,
    pub text_html: String,
    pub checked: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionVm {
    pub question_id: QuestionId,
    pub heading: String,
    pub text_html: String,
    pub group_name: String,
    pub choices: Vec<ChoiceVm>,
    pub answered_label: String,
    pub show_previous: bool,
    pub show_next: bool,
    pub show_submit: bool,
    pub submitting: bool,
    pub notice: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultItemVm {
    pub question_html: String,
    pub chosen_html: String,
    pub correct_html: String,
    pub verdict: &'static str,
    pub verdict_class: &'static str,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultVm {
    pub score_label: String,
    pub time_label: Option<String>,
    pub items: Vec<ResultItemVm>,
}

/// Everything the quiz page can show.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuizScreen {
    Loading,
    Empty,
    LoadFailed { detail: String },
    Question(QuestionVm),
    Result(ResultVm),
}

#[must_use]
pub fn map_quiz_view(view: &QuizView) -> QuizScreen {
    match view {
        QuizView::Loading => QuizScreen::Loading,
        QuizView::Empty => QuizScreen::Empty,
        QuizView::LoadFailed { message } => QuizScreen::LoadFailed {
            detail: message.clone(),
        },
        QuizView::Active(active) => QuizScreen::Question(map_active(active)),
        QuizView::Completed(completed) => QuizScreen::Result(map_completed(completed)),
    }
}

fn map_active(active: &ActiveView) -> QuestionVm {
    let choices = active
        .choices
        .iter()
        .map(|choice| ChoiceVm {
            id: choice.id.clone(),
            input_id: format!("{}_{}", active.group_name, choice.id),
            text_html: sanitize_html(&choice.text),
            checked: choice.checked,
        })
        .collect();

    QuestionVm {
        question_id: active.question_id.clone(),
        heading: format!("Question {} / {}", active.ordinal, active.total),
        text_html: sanitize_html(&active.text),
        group_name: active.group_name.clone(),
        choices,
        answered_label: format!("Answered {} of {}", active.answered, active.total),
        show_previous: active.controls.show_previous,
        show_next: active.controls.show_next,
        show_submit: active.controls.show_submit,
        submitting: active.submitting,
        notice: active.notice.clone(),
    }
}

fn map_completed(completed: &CompletedView) -> ResultVm {
    ResultVm {
        score_label: format!("Your score: {} / {}", completed.score, completed.total),
        time_label: completed
            .elapsed
            .map(|elapsed| format!("Time taken: {}", format_elapsed(elapsed))),
        items: completed.details.iter().map(map_detail).collect(),
    }
}

fn map_detail(detail: &ResultDetail) -> ResultItemVm {
    let (verdict, verdict_class) = if detail.is_correct() {
        ("Correct", "ok")
    } else {
        ("Wrong", "bad")
    };
    ResultItemVm {
        question_html: sanitize_html(detail.question()),
        chosen_html: detail
            .chosen()
            .map_or_else(|| NOT_ANSWERED_HTML.to_string(), sanitize_html),
        correct_html: detail
            .correct()
            .map_or_else(|| NO_CORRECT_ANSWER_HTML.to_string(), sanitize_html),
        verdict,
        verdict_class,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use services::sessions::{ChoiceView, ControlsView};

    fn active_view() -> ActiveView {
        ActiveView {
            ordinal: 2,
            total: 3,
            question_id: QuestionId::new("7").unwrap(),
            text: "Pick <b>one</b>".to_string(),
            group_name: "q_7".to_string(),
            choices: vec![
                ChoiceView {
                    id: ChoiceId::new("0").unwrap(),
                    text: "Red".to_string(),
                    checked: false,
                },
                ChoiceView {
                    id: ChoiceId::new("1").unwrap(),
                    text: "Blue".to_string(),
                    checked: true,
                },
            ],
            controls: ControlsView {
                show_previous: true,
                show_next: true,
                show_submit: false,
            },
            answered: 1,
            submitting: false,
            notice: None,
        }
    }

    #[test]
    fn question_heading_is_one_based() {
        let QuizScreen::Question(vm) = map_quiz_view(&QuizView::Active(active_view())) else {
            panic!("expected question screen");
        };
        assert_eq!(vm.heading, "Question 2 / 3");
        assert_eq!(vm.text_html, "Pick <b>one</b>");
        assert_eq!(vm.choices[1].input_id, "q_7_1");
        assert!(vm.choices[1].checked);
        assert!(vm.show_previous && vm.show_next && !vm.show_submit);
        assert_eq!(vm.answered_label, "Answered 1 of 3");
    }

    #[test]
    fn result_marks_unanswered_and_missing_key() {
        let completed = CompletedView {
            score: 1,
            total: 2,
            details: vec![
                ResultDetail::new("Q1", Some("A".into()), Some("A".into()), true),
                ResultDetail::new("Q2", None, None, false),
            ],
            elapsed: Some(Duration::seconds(83)),
        };
        let QuizScreen::Result(vm) = map_quiz_view(&QuizView::Completed(completed)) else {
            panic!("expected result screen");
        };

        assert_eq!(vm.score_label, "Your score: 1 / 2");
        assert_eq!(vm.time_label.as_deref(), Some("Time taken: 1:23"));
        assert_eq!(vm.items[0].verdict, "Correct");
        assert_eq!(vm.items[1].chosen_html, "<em>Not answered</em>");
        assert_eq!(vm.items[1].correct_html, "<em>No correct answer set</em>");
        assert_eq!(vm.items[1].verdict_class, "bad");
    }

    #[test]
    fn load_failure_keeps_detail() {
        let screen = map_quiz_view(&QuizView::LoadFailed {
            message: "quiz abc not found".to_string(),
        });
        assert_eq!(
            screen,
            QuizScreen::LoadFailed {
                detail: "quiz abc not found".to_string()
            }
        );
    }
}
