use super::*;
use crate::view_models::{ProgressInfo, rounded_percentage};

/// `None` cuando no hay preguntas: no se muestra progreso.
pub fn compute_progress(total: usize, selections: &SelectionMap) -> Option<ProgressInfo> {
    if total == 0 {
        return None;
    }
    let answered = selections.len();
    Some(ProgressInfo {
        answered,
        total,
        percentage: rounded_percentage(answered, total),
    })
}

impl QuizSession {
    pub fn compute_progress(&self) -> Option<ProgressInfo> {
        compute_progress(self.questions.len(), &self.selections)
    }
}
