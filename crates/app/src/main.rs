use std::fmt;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use log::info;
use quiz_core::model::QuizId;
use services::api::DEFAULT_BASE_URL;
use services::{
    Clock, HttpQuizApi, HttpQuizConfig, InMemoryQuizApi, QuizApi, QuizDefinition,
    QuizSessionService,
};
use ui::{App, UiApp, build_app_context};

const DEMO_QUIZ_ID: &str = "demo";

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    MissingQuizId,
    InvalidQuizId { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::MissingQuizId => write!(f, "--quiz-id (or QUIZ_ID) is required without --demo"),
            ArgsError::InvalidQuizId { raw } => write!(f, "invalid --quiz-id value: {raw:?}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

struct DesktopApp {
    source_label: String,
    quiz_service: Arc<QuizSessionService>,
}

impl UiApp for DesktopApp {
    fn source_label(&self) -> String {
        self.source_label.clone()
    }

    fn quiz_service(&self) -> Arc<QuizSessionService> {
        Arc::clone(&self.quiz_service)
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- --quiz-id <id> [--base-url <url>]");
    eprintln!("  cargo run -p app -- --demo");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --base-url {DEFAULT_BASE_URL}");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_BASE_URL, QUIZ_ID, RUST_LOG");
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Source {
    Server { base_url: String, quiz_id: QuizId },
    Demo,
}

/// Values read from the environment before flags are applied.
#[derive(Debug, Default)]
struct EnvDefaults {
    base_url: Option<String>,
    quiz_id: Option<String>,
}

impl EnvDefaults {
    fn from_env() -> Self {
        Self {
            base_url: std::env::var("QUIZ_BASE_URL").ok(),
            quiz_id: std::env::var("QUIZ_ID").ok(),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
struct Args {
    source: Source,
}

impl Args {
    /// `Ok(None)` means help was requested.
    fn parse(
        args: &mut impl Iterator<Item = String>,
        defaults: EnvDefaults,
    ) -> Result<Option<Self>, ArgsError> {
        let mut base_url = defaults
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let mut quiz_id = defaults.quiz_id;
        let mut demo = false;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--base-url" => base_url = require_value(args, "--base-url")?,
                "--quiz-id" => quiz_id = Some(require_value(args, "--quiz-id")?),
                "--demo" => demo = true,
                "--help" | "-h" => return Ok(None),
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        if demo {
            return Ok(Some(Self {
                source: Source::Demo,
            }));
        }

        let raw = quiz_id.ok_or(ArgsError::MissingQuizId)?;
        let quiz_id = QuizId::new(raw.clone()).map_err(|_| ArgsError::InvalidQuizId { raw })?;
        Ok(Some(Self {
            source: Source::Server { base_url, quiz_id },
        }))
    }
}

fn demo_quiz() -> QuizDefinition {
    QuizDefinition::new()
        .with_question("What is 7 &times; 6?", &["36", "42", "48"], Some(1))
        .with_question(
            "Which planet is known as the Red Planet?",
            &["Venus", "Mars", "Jupiter"],
            Some(1),
        )
        .with_question("H<sub>2</sub>O is the formula for?", &["Salt", "Water"], Some(1))
        .with_question(
            "Which keyword declares an immutable binding in Rust?",
            &["let", "var", "const fn"],
            Some(0),
        )
}

fn build_service(source: &Source) -> Result<(String, QuizSessionService), Box<dyn std::error::Error>> {
    let clock = Clock::default_clock();
    match source {
        Source::Demo => {
            let quiz_id = QuizId::new(DEMO_QUIZ_ID)?;
            let api: Arc<dyn QuizApi> =
                Arc::new(InMemoryQuizApi::new().with_quiz(quiz_id.clone(), demo_quiz()));
            info!("running bundled demo quiz");
            Ok((
                "Demo quiz".to_string(),
                QuizSessionService::new(clock, api, quiz_id),
            ))
        }
        Source::Server { base_url, quiz_id } => {
            let config = HttpQuizConfig::new(base_url)?;
            let label = format!("{} · quiz {quiz_id}", config.base_url);
            info!("using quiz {quiz_id} from {}", config.base_url);
            let api: Arc<dyn QuizApi> = Arc::new(HttpQuizApi::new(config));
            Ok((label, QuizSessionService::new(clock, api, quiz_id.clone())))
        }
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let parsed = Args::parse(&mut argv, EnvDefaults::from_env()).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;
    let Some(parsed) = parsed else {
        print_usage();
        return Ok(());
    };

    let (source_label, quiz_service) = build_service(&parsed.source)?;
    let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
        source_label,
        quiz_service: Arc::new(quiz_service),
    });
    let context = build_app_context(&app);

    // On macOS, Dioxus/tao can default to an always-on-top window in some dev setups.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Quiz")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
