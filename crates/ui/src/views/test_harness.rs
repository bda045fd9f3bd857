use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use quiz_core::model::QuizId;
use quiz_core::time::fixed_clock;
use services::{InMemoryQuizApi, QuizApi, QuizDefinition, QuizSessionService};

use crate::context::{UiApp, build_app_context};
use crate::views::QuizPage;
use crate::views::quiz::QuizTestHandles;

#[derive(Clone)]
struct TestApp {
    quiz_service: Arc<QuizSessionService>,
}

impl UiApp for TestApp {
    fn source_label(&self) -> String {
        "test".to_string()
    }

    fn quiz_service(&self) -> Arc<QuizSessionService> {
        Arc::clone(&self.quiz_service)
    }
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    handles: QuizTestHandles,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.handles.clone());
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    rsx! { QuizPage {} }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub handles: QuizTestHandles,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Rebuild and let the initial question load settle.
    pub async fn start(&mut self) {
        self.rebuild();
        self.drive_async().await;
        self.drive_async().await;
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn quiz_id() -> QuizId {
    QuizId::new("demo").expect("valid quiz id")
}

pub fn sample_quiz() -> QuizDefinition {
    QuizDefinition::new()
        .with_question("2 + 2?", &["3", "4"], Some(1))
        .with_question("Capital of France?", &["Paris", "Rome"], Some(0))
        .with_question("H<sub>2</sub>O is?", &["Water", "Salt"], Some(0))
}

pub fn in_memory_api(quiz: QuizDefinition) -> InMemoryQuizApi {
    InMemoryQuizApi::new().with_quiz(quiz_id(), quiz)
}

pub fn setup_view_harness(api: Arc<dyn QuizApi>) -> ViewHarness {
    let quiz_service = Arc::new(QuizSessionService::new(fixed_clock(), api, quiz_id()));
    let handles = QuizTestHandles::default();
    let app = Arc::new(TestApp { quiz_service });

    let dom = VirtualDom::new_with_props(
        ViewRouterHarness,
        ViewHarnessProps {
            app,
            handles: handles.clone(),
        },
    );

    ViewHarness { dom, handles }
}
