use super::*;
use crate::remote::{SubmitOutcome, SubmitRequest};

pub const SUBMIT_LABEL: &str = "Submit Answers";
pub const IN_FLIGHT_LABEL: &str = "Processing Results...";
pub const RETRY_LABEL: &str = "Retry Submission";
pub const GRADED_LABEL: &str = "Quiz Graded";
pub const RELOAD_LABEL: &str = "Reload Results";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitState {
    #[default]
    Idle,
    InFlight,
    Failed,
    /// El servidor ya corrigió pero no se pudo traer el resultado
    ReloadFailed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitButton {
    pub enabled: bool,
    pub label: &'static str,
}

/// Qué debe hacer la página tras la respuesta del servidor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitEffect {
    /// El servidor ya tiene la nota: recargar para pintar el modo corregido
    Reload,
    /// Se reactiva el botón; el usuario decide si reintenta
    Retry,
}

impl QuizSession {
    pub fn submit_state(&self) -> SubmitState {
        self.submit_state
    }

    pub fn submit_button(&self) -> SubmitButton {
        if self.submitted {
            return SubmitButton {
                enabled: false,
                label: GRADED_LABEL,
            };
        }
        match self.submit_state {
            SubmitState::Idle => SubmitButton {
                enabled: true,
                label: SUBMIT_LABEL,
            },
            SubmitState::InFlight => SubmitButton {
                enabled: false,
                label: IN_FLIGHT_LABEL,
            },
            SubmitState::Failed => SubmitButton {
                enabled: true,
                label: RETRY_LABEL,
            },
            SubmitState::ReloadFailed => SubmitButton {
                enabled: true,
                label: RELOAD_LABEL,
            },
        }
    }

    /// Deshabilita el envío y devuelve el cuerpo a mandar. `None` si el quiz ya
    /// está corregido, hay otro envío en vuelo o sólo falta recargar.
    pub fn begin_submission(&mut self) -> Option<SubmitRequest> {
        if self.submitted
            || matches!(
                self.submit_state,
                SubmitState::InFlight | SubmitState::ReloadFailed
            )
        {
            return None;
        }
        self.submit_state = SubmitState::InFlight;
        Some(SubmitRequest {
            answers: self.selections.clone(),
        })
    }

    pub fn finish_submission(&mut self, outcome: SubmitOutcome) -> SubmitEffect {
        match outcome {
            Ok(resp) if resp.success => {
                if let Some(score) = resp.score {
                    log::info!("envío aceptado, nota provisional {score}");
                }
                // Sigue deshabilitado: el estado "enviado" lo trae la recarga
                SubmitEffect::Reload
            }
            Ok(resp) => {
                log::error!(
                    "el servidor rechazó el envío: {}",
                    resp.error.as_deref().unwrap_or("sin detalle")
                );
                self.submit_state = SubmitState::Failed;
                SubmitEffect::Retry
            }
            Err(err) => {
                log::error!("fallo enviando respuestas: {err}");
                self.submit_state = SubmitState::Failed;
                SubmitEffect::Retry
            }
        }
    }

    /// La recarga tras un envío aceptado falló: el botón pasa a reintentarla.
    pub fn mark_reload_failed(&mut self) {
        if self.submit_state == SubmitState::InFlight {
            self.submit_state = SubmitState::ReloadFailed;
        }
    }

    /// Vuelve a `InFlight` para reintentar la recarga. `false` si no tocaba.
    pub fn begin_reload(&mut self) -> bool {
        if self.submit_state != SubmitState::ReloadFailed {
            return false;
        }
        self.submit_state = SubmitState::InFlight;
        true
    }
}
