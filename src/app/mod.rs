use crate::config::{ContextSource, QuizConfig};
use crate::data::hydrate_selections;
use crate::model::{AppState, Question, QuizContext, SelectionMap};
use crate::remote::{ContextOutcome, SubmitOutcome, load_context};
use crate::view_models::QuestionCard;
use std::sync::mpsc::Receiver;

// Submódulos
pub mod actions;
pub mod progress;
pub mod selection;
pub mod submission;
pub mod view_models;

pub use progress::compute_progress;
pub use selection::SelectionError;
pub use submission::{SubmitButton, SubmitEffect, SubmitState};

pub const THEME_KEY: &str = "quiz_session_dark_mode";

/// Estado de una sesión de quiz, sin nada de UI.
///
/// Las preguntas no cambian tras la carga; la selección sólo cambia por
/// clics del usuario y queda congelada cuando el quiz está enviado.
#[derive(Debug, Clone, Default)]
pub struct QuizSession {
    questions: Vec<Question>,
    selections: SelectionMap,
    submitted: bool,
    score: Option<u32>,
    submit_state: SubmitState,
}

impl QuizSession {
    pub fn from_context(ctx: QuizContext) -> Self {
        let selections = hydrate_selections(&ctx);
        log::info!(
            "quiz cargado: {} preguntas, {} respuestas previas, enviado={}",
            ctx.quiz_data.len(),
            selections.len(),
            ctx.is_submitted
        );
        Self {
            questions: ctx.quiz_data,
            selections,
            submitted: ctx.is_submitted,
            score: ctx.score,
            submit_state: SubmitState::Idle,
        }
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn selections(&self) -> &SelectionMap {
        &self.selections
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    pub fn score(&self) -> Option<u32> {
        self.score
    }

    pub fn phase(&self) -> AppState {
        if self.questions.is_empty() {
            AppState::Empty
        } else if self.submitted {
            AppState::Results
        } else {
            AppState::Quiz
        }
    }
}

/// Por qué se está recargando el contexto
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ReloadReason {
    Graded,
    StartOver,
}

pub struct QuizApp {
    pub session: QuizSession,
    pub cards: Vec<QuestionCard>,
    pub config: QuizConfig,
    pub message: String,
    pub dark_mode: bool,
    pub(crate) submit_rx: Option<Receiver<SubmitOutcome>>,
    pub(crate) reload_rx: Option<(ReloadReason, Receiver<ContextOutcome>)>,
}

impl QuizApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let dark_mode = cc
            .storage
            .and_then(|s| eframe::get_value::<bool>(s, THEME_KEY))
            .unwrap_or(false);

        let config = QuizConfig::resolve();
        let (ctx, message) = initial_context(&config);

        let mut app = Self::with_context(config, ctx);
        app.dark_mode = dark_mode;
        app.message = message;
        app
    }

    pub fn with_context(config: QuizConfig, ctx: QuizContext) -> Self {
        let mut app = Self {
            session: QuizSession::from_context(ctx),
            cards: Vec::new(),
            config,
            message: String::new(),
            dark_mode: false,
            submit_rx: None,
            reload_rx: None,
        };
        app.render();
        app
    }
}

fn initial_context(config: &QuizConfig) -> (QuizContext, String) {
    match load_context(&config.context_source) {
        Ok(ctx) => (ctx, String::new()),
        Err(err) if matches!(config.context_source, ContextSource::Remote(_)) => {
            // Sin servidor: enseñamos el quiz de ejemplo
            log::warn!("{err}; se usa el quiz de ejemplo");
            let ctx = load_context(&ContextSource::Demo).unwrap_or_default();
            (ctx, "Server unavailable: showing the demo quiz.".to_owned())
        }
        Err(err) => {
            log::error!("{err}");
            (QuizContext::default(), String::new())
        }
    }
}
