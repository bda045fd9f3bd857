use dioxus::prelude::*;
use log::warn;

use quiz_core::model::QuestionId;

use crate::context::AppContext;
use crate::views::ViewError;
use crate::vm::{ChoiceVm, QuestionVm, QuizIntent, QuizScreen, ResultVm, map_quiz_view};

#[cfg(test)]
use services::QuizSession;
#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;

#[component]
pub fn QuizPage() -> Element {
    let ctx = use_context::<AppContext>();
    let quiz_service = ctx.quiz_service();

    let session = {
        let quiz_service = quiz_service.clone();
        use_signal(move || quiz_service.new_session())
    };

    let _loader = {
        let quiz_service = quiz_service.clone();
        use_resource(move || {
            let quiz_service = quiz_service.clone();
            let mut session = session;
            async move {
                let outcome = quiz_service.fetch_questions().await;
                if let Err(err) = quiz_service.apply_load(&mut session.write(), outcome) {
                    warn!("dropping load outcome: {err}");
                }
            }
        })
    };

    let dispatch_intent = {
        let quiz_service = quiz_service.clone();
        use_callback(move |intent: QuizIntent| {
            let mut session = session;

            let outcome = match intent {
                QuizIntent::Select { question, choice } => {
                    session.write().select_answer(&question, &choice)
                }
                QuizIntent::Previous => session.write().go_previous().map(|_| ()),
                QuizIntent::Next => session.write().go_next().map(|_| ()),
                QuizIntent::Submit => {
                    let begun = session.write().begin_submit();
                    begun.map(|answers| {
                        let quiz_service = quiz_service.clone();
                        spawn(async move {
                            let mut session = session;
                            let outcome = quiz_service.send_answers(&answers).await;
                            if let Err(err) =
                                quiz_service.apply_submit(&mut session.write(), outcome)
                            {
                                warn!("submit not applied: {err}");
                            }
                        });
                    })
                }
            };

            if let Err(err) = outcome {
                warn!("ignored quiz input: {err}");
            }
        })
    };

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<QuizTestHandles>() {
                handles.register(dispatch_intent, session);
            }
        }
    }

    let screen = map_quiz_view(&session.read().view());
    let load_message = ViewError::Load.message();

    rsx! {
        div { class: "page quiz-page",
            match screen {
                QuizScreen::Loading => rsx! {
                    p { class: "quiz-status", "Loading..." }
                },
                QuizScreen::Empty => rsx! {
                    p { class: "quiz-status", "This quiz has no questions." }
                },
                QuizScreen::LoadFailed { detail } => rsx! {
                    div { class: "quiz-error", role: "alert",
                        p { class: "quiz-error__title", "{load_message}" }
                        p { class: "quiz-error__detail", "{detail}" }
                    }
                },
                QuizScreen::Question(question) => rsx! {
                    QuestionCard { question, on_intent: dispatch_intent }
                },
                QuizScreen::Result(result) => rsx! {
                    ResultView { result }
                },
            }
        }
    }
}

#[component]
fn QuestionCard(question: QuestionVm, on_intent: Callback<QuizIntent>) -> Element {
    let notice = question.notice.clone().unwrap_or_default();
    let submit_message = ViewError::Submit.message();
    let disabled = question.submitting;

    rsx! {
        div { class: "qcard",
            h3 { class: "qcard__heading", "{question.heading}" }
            div { class: "qcard__text", dangerous_inner_html: "{question.text_html}" }
            ul { class: "choices",
                for choice in question.choices.iter() {
                    ChoiceOption {
                        key: "{choice.input_id}",
                        group_name: question.group_name.clone(),
                        question_id: question.question_id.clone(),
                        choice: choice.clone(),
                        disabled,
                        on_intent,
                    }
                }
            }
            p { class: "qcard__answered", "{question.answered_label}" }
            if question.submitting {
                p { class: "quiz-status", "Submitting..." }
            }
            if !notice.is_empty() {
                div { class: "quiz-error", role: "alert",
                    p { class: "quiz-error__title", "{submit_message}" }
                    p { class: "quiz-error__detail", "{notice}" }
                }
            }
            div { class: "quiz-controls",
                if question.show_previous {
                    button {
                        id: "quiz-prev",
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| on_intent.call(QuizIntent::Previous),
                        "Previous"
                    }
                }
                if question.show_next {
                    button {
                        id: "quiz-next",
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| on_intent.call(QuizIntent::Next),
                        "Next"
                    }
                }
                if question.show_submit {
                    button {
                        id: "quiz-submit",
                        class: "btn btn-primary",
                        r#type: "button",
                        onclick: move |_| on_intent.call(QuizIntent::Submit),
                        "Submit"
                    }
                }
            }
        }
    }
}

#[component]
fn ChoiceOption(
    group_name: String,
    question_id: QuestionId,
    choice: ChoiceVm,
    disabled: bool,
    on_intent: Callback<QuizIntent>,
) -> Element {
    let ChoiceVm {
        id,
        input_id,
        text_html,
        checked,
    } = choice;
    let value = id.to_string();

    rsx! {
        li {
            label { r#for: "{input_id}",
                input {
                    id: "{input_id}",
                    r#type: "radio",
                    name: "{group_name}",
                    value: "{value}",
                    checked,
                    disabled,
                    onchange: move |_| {
                        on_intent.call(QuizIntent::Select {
                            question: question_id.clone(),
                            choice: id.clone(),
                        });
                    },
                }
                span { class: "choice-text", dangerous_inner_html: "{text_html}" }
            }
        }
    }
}

#[component]
fn ResultView(result: ResultVm) -> Element {
    let time_label = result.time_label.clone().unwrap_or_default();

    rsx! {
        div { class: "quiz-result",
            h3 { class: "quiz-result__score", "{result.score_label}" }
            if !time_label.is_empty() {
                p { class: "quiz-result__time", "{time_label}" }
            }
            for (idx, item) in result.items.iter().cloned().enumerate() {
                div { key: "{idx}", class: "result-item",
                    p {
                        strong { dangerous_inner_html: "{item.question_html}" }
                    }
                    p {
                        "Your answer: "
                        span { dangerous_inner_html: "{item.chosen_html}" }
                    }
                    p {
                        "Correct: "
                        span { dangerous_inner_html: "{item.correct_html}" }
                    }
                    p {
                        span { class: "{item.verdict_class}", "{item.verdict}" }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct QuizTestHandles {
    dispatch: Rc<RefCell<Option<Callback<QuizIntent>>>>,
    session: Rc<RefCell<Option<Signal<QuizSession>>>>,
}

#[cfg(test)]
impl QuizTestHandles {
    pub(crate) fn register(&self, dispatch: Callback<QuizIntent>, session: Signal<QuizSession>) {
        *self.dispatch.borrow_mut() = Some(dispatch);
        *self.session.borrow_mut() = Some(session);
    }

    pub(crate) fn dispatch(&self) -> Callback<QuizIntent> {
        (*self.dispatch.borrow()).expect("quiz dispatch registered")
    }

    pub(crate) fn session(&self) -> Signal<QuizSession> {
        (*self.session.borrow()).expect("quiz session registered")
    }
}
