use std::sync::Arc;

use services::QuizSessionService;

pub trait UiApp: Send + Sync {
    /// Where questions come from, shown in the header.
    fn source_label(&self) -> String;

    fn quiz_service(&self) -> Arc<QuizSessionService>;
}

#[derive(Clone)]
pub struct AppContext {
    source_label: String,
    quiz_service: Arc<QuizSessionService>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            source_label: app.source_label(),
            quiz_service: app.quiz_service(),
        }
    }

    #[must_use]
    pub fn source_label(&self) -> &str {
        &self.source_label
    }

    #[must_use]
    pub fn quiz_service(&self) -> Arc<QuizSessionService> {
        Arc::clone(&self.quiz_service)
    }
}

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
