use super::*;
use crate::data::ContextError;
use crate::remote::{SubmitError, spawn_submission};
use std::sync::mpsc::TryRecvError;

impl QuizApp {
    pub fn seleccionar_opcion(&mut self, question_index: usize, option_text: &str) {
        match self.session.record_selection(question_index, option_text) {
            Ok(_) => self.render(),
            Err(err) => log::warn!("selección ignorada: {err}"),
        }
    }

    /// Botón principal: envía, o reintenta la recarga si el envío ya se aceptó.
    pub fn enviar_respuestas(&mut self) {
        if self.session.begin_reload() {
            self.message.clear();
            self.recargar();
            return;
        }
        let Some(request) = self.session.begin_submission() else {
            return;
        };
        self.message.clear();
        self.submit_rx = Some(spawn_submission(
            self.config.submit_endpoint.clone(),
            request,
        ));
    }

    pub fn is_submission_pending(&self) -> bool {
        self.submit_rx.is_some()
    }

    pub fn is_reload_pending(&self) -> bool {
        self.reload_rx.is_some()
    }

    /// Hay trabajo de red en curso; la UI sigue repintando para recogerlo.
    pub fn is_busy(&self) -> bool {
        self.is_submission_pending() || self.is_reload_pending()
    }

    pub fn poll_submission(&mut self) {
        let outcome = match self.submit_rx.as_ref().map(|rx| rx.try_recv()) {
            None | Some(Err(TryRecvError::Empty)) => return,
            Some(Ok(outcome)) => outcome,
            Some(Err(TryRecvError::Disconnected)) => Err(SubmitError::Network(
                "la tarea de envío terminó sin respuesta".into(),
            )),
        };
        self.submit_rx = None;

        match self.session.finish_submission(outcome) {
            SubmitEffect::Reload => self.recargar(),
            SubmitEffect::Retry => {
                self.message = "Submission failed. Please try again.".to_owned();
            }
        }
    }

    pub fn poll_reload(&mut self) {
        let Some((reason, rx)) = self.reload_rx.as_ref() else {
            return;
        };
        let reason = *reason;
        let outcome = match rx.try_recv() {
            Err(TryRecvError::Empty) => return,
            Ok(outcome) => outcome,
            Err(TryRecvError::Disconnected) => Err(ContextError::Unavailable(
                "la carga terminó sin respuesta".into(),
            )),
        };
        self.reload_rx = None;
        self.apply_reload(reason, outcome);
    }

    pub(crate) fn apply_reload(&mut self, reason: ReloadReason, outcome: ContextOutcome) {
        match (outcome, reason) {
            (Ok(ctx), ReloadReason::Graded) if !ctx.is_submitted => {
                // La fuente no guarda la corrección (fichero o demo)
                log::warn!("envío aceptado pero el contexto recargado no está corregido");
                self.session = QuizSession::from_context(ctx);
                self.message =
                    "Answers were accepted, but the reloaded quiz has no graded results.".to_owned();
                self.render();
            }
            (Ok(ctx), _) => {
                self.session = QuizSession::from_context(ctx);
                self.message.clear();
                self.render();
            }
            (Err(err), ReloadReason::Graded) => {
                log::error!("no se pudo recargar el resultado: {err}");
                self.session.mark_reload_failed();
                self.message = "Could not load the results. Please reload.".to_owned();
            }
            (Err(err), ReloadReason::StartOver) => {
                log::error!("no se pudo reiniciar el quiz: {err}");
                self.message = "Could not start over. Please try again.".to_owned();
            }
        }
    }

    /// El servidor manda: tras enviar se vuelve a pedir el contexto.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn recargar(&mut self) {
        let rx = crate::remote::spawn_context_load(self.config.context_source.clone());
        self.reload_rx = Some((ReloadReason::Graded, rx));
    }

    #[cfg(target_arch = "wasm32")]
    pub fn recargar(&mut self) {
        if let Err(err) = crate::remote::context_remote::reload_page() {
            self.apply_reload(ReloadReason::Graded, Err(err));
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn empezar_de_nuevo(&mut self) {
        if self.is_busy() {
            return;
        }
        self.message.clear();
        let rx = crate::remote::spawn_reset(
            self.config.reset_endpoint.clone(),
            self.config.context_source.clone(),
        );
        self.reload_rx = Some((ReloadReason::StartOver, rx));
    }

    /// En la web la navegación ya recarga la página
    #[cfg(target_arch = "wasm32")]
    pub fn empezar_de_nuevo(&mut self) {
        if let Err(err) = crate::remote::request_reset(&self.config.reset_endpoint) {
            self.apply_reload(ReloadReason::StartOver, Err(err));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::submission::{IN_FLIGHT_LABEL, RELOAD_LABEL, RETRY_LABEL};
    use crate::remote::SubmitResponse;
    use std::sync::mpsc::channel;
    use std::time::Duration;

    fn app_with_source(context_source: ContextSource) -> QuizApp {
        let config = QuizConfig {
            submit_endpoint: "http://127.0.0.1:9/submit_quiz".into(),
            reset_endpoint: "http://127.0.0.1:9/reset_quiz".into(),
            context_source,
        };
        let ctx = load_context(&ContextSource::Demo).unwrap();
        QuizApp::with_context(config, ctx)
    }

    fn app() -> QuizApp {
        app_with_source(ContextSource::Demo)
    }

    fn accept_submission(app: &mut QuizApp) {
        app.session.begin_submission().unwrap();
        let (tx, rx) = channel();
        tx.send(Ok(SubmitResponse {
            success: true,
            error: None,
            score: Some(1),
        }))
        .unwrap();
        app.submit_rx = Some(rx);
        app.poll_submission();
    }

    /// Como el bucle de la UI: sondea hasta que llega la carga.
    fn wait_for_reload(app: &mut QuizApp) {
        for _ in 0..500 {
            app.poll_reload();
            if !app.is_reload_pending() {
                return;
            }
            std::thread::sleep(Duration::from_millis(10));
        }
        panic!("la recarga no terminó");
    }

    #[test]
    fn clicking_an_option_rerenders_cards() {
        let mut app = app();
        let text = app.cards[0].options[1].text.clone();
        app.seleccionar_opcion(0, &text);
        assert_eq!(
            app.cards[0].options[1].mark,
            crate::view_models::OptionMark::Selected
        );
        assert_eq!(app.session.compute_progress().unwrap().answered, 1);
    }

    #[test]
    fn accepted_submission_reloads_in_background() {
        let mut app = app();
        app.seleccionar_opcion(0, "Paris");
        accept_submission(&mut app);

        assert!(!app.is_submission_pending());
        assert!(app.is_reload_pending());
        assert!(app.is_busy());
        assert_eq!(app.session.submit_button().label, IN_FLIGHT_LABEL);
    }

    #[test]
    fn ungraded_reload_after_acceptance_is_reported() {
        let mut app = app();
        app.seleccionar_opcion(0, "Paris");
        accept_submission(&mut app);
        wait_for_reload(&mut app);

        // la fuente demo no guarda nada: la sesión vuelve limpia y se avisa
        assert!(app.session.selections().is_empty());
        assert!(app.session.submit_button().enabled);
        assert!(app.message.contains("no graded results"));
    }

    #[test]
    fn failed_reload_after_acceptance_can_be_retried() {
        let missing = ContextSource::File("/nonexistent/quiz_context.json".into());
        let mut app = app_with_source(missing);
        app.seleccionar_opcion(0, "Paris");
        accept_submission(&mut app);
        wait_for_reload(&mut app);

        assert_eq!(app.session.submit_state(), SubmitState::ReloadFailed);
        assert_eq!(
            app.session.submit_button(),
            SubmitButton {
                enabled: true,
                label: RELOAD_LABEL
            }
        );
        assert!(!app.message.is_empty());
        assert_eq!(app.session.selections().get(0), Some("Paris"));

        // el botón reintenta la recarga, no un segundo envío
        app.enviar_respuestas();
        assert!(app.is_reload_pending());
        assert!(!app.is_submission_pending());
        assert!(!app.session.submit_button().enabled);

        wait_for_reload(&mut app);
        assert_eq!(app.session.submit_state(), SubmitState::ReloadFailed);
    }

    #[test]
    fn graded_reload_shows_results() {
        let mut app = app();
        accept_submission(&mut app);
        app.reload_rx = None;

        let mut ctx = load_context(&ContextSource::Demo).unwrap();
        ctx.is_submitted = true;
        ctx.score = Some(3);
        app.apply_reload(ReloadReason::Graded, Ok(ctx));

        assert_eq!(app.session.phase(), AppState::Results);
        assert!(app.message.is_empty());
        assert!(app.cards.iter().all(|c| !c.interactive));
    }

    #[test]
    fn failed_start_over_keeps_session() {
        let mut app = app();
        app.seleccionar_opcion(0, "Paris");
        app.empezar_de_nuevo();
        assert!(app.is_reload_pending());

        // sin reinicios solapados
        app.empezar_de_nuevo();
        wait_for_reload(&mut app);

        assert_eq!(app.message, "Could not start over. Please try again.");
        assert_eq!(app.session.selections().get(0), Some("Paris"));
        assert_eq!(app.session.submit_state(), SubmitState::Idle);
    }

    #[test]
    fn failed_response_keeps_selections_and_offers_retry() {
        let mut app = app();
        app.seleccionar_opcion(0, "Paris");
        app.session.begin_submission().unwrap();

        let (tx, rx) = channel();
        tx.send(Ok(SubmitResponse {
            success: false,
            error: Some("x".into()),
            score: None,
        }))
        .unwrap();
        app.submit_rx = Some(rx);
        app.poll_submission();

        assert_eq!(app.session.selections().get(0), Some("Paris"));
        assert_eq!(app.session.submit_button().label, RETRY_LABEL);
        assert!(!app.message.is_empty());
        assert!(!app.is_reload_pending());
    }

    #[test]
    fn dropped_sender_counts_as_network_failure() {
        let mut app = app();
        app.session.begin_submission().unwrap();
        let (tx, rx) = channel::<crate::remote::SubmitOutcome>();
        drop(tx);
        app.submit_rx = Some(rx);
        app.poll_submission();
        assert_eq!(app.session.submit_state(), SubmitState::Failed);
    }

    #[test]
    fn dropped_reload_sender_marks_reload_failed() {
        let mut app = app();
        accept_submission(&mut app);
        let (tx, rx) = channel::<ContextOutcome>();
        drop(tx);
        app.reload_rx = Some((ReloadReason::Graded, rx));
        app.poll_reload();
        assert!(!app.is_reload_pending());
        assert_eq!(app.session.submit_state(), SubmitState::ReloadFailed);
    }
}
