use dioxus::prelude::*;
use dioxus_router::{Outlet, Routable};

use crate::context::AppContext;
use crate::views::QuizPage;

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", QuizPage)] Quiz {},
}

#[component]
fn Layout() -> Element {
    let ctx = use_context::<AppContext>();
    let source = ctx.source_label().to_string();

    rsx! {
        div { class: "app",
            header { class: "app-header",
                h1 { "Quiz" }
                span { class: "app-header__source", "{source}" }
            }
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}
