use super::*;
use crate::view_models::ProgressInfo;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("la pregunta {index} no existe (hay {total})")]
    OutOfRange { index: usize, total: usize },
    #[error("el quiz ya está enviado")]
    Locked,
}

impl QuizSession {
    /// Registra (o sustituye) la opción elegida para una pregunta y devuelve
    /// el progreso recalculado.
    pub fn record_selection(
        &mut self,
        question_index: usize,
        option_text: &str,
    ) -> Result<Option<ProgressInfo>, SelectionError> {
        if self.submitted {
            return Err(SelectionError::Locked);
        }
        let total = self.questions.len();
        if question_index >= total {
            return Err(SelectionError::OutOfRange {
                index: question_index,
                total,
            });
        }

        self.selections.insert(question_index, option_text);
        Ok(self.compute_progress())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::parse_context_json;

    fn session(submitted: bool) -> QuizSession {
        let raw = format!(
            r#"{{"quiz_data": [
                {{"question": "Capital?", "answerOptions": [
                    {{"text": "Paris", "isCorrect": true}},
                    {{"text": "Lyon", "isCorrect": false}}]}},
                {{"question": "Answer?", "answerOptions": [
                    {{"text": "42", "isCorrect": true}},
                    {{"text": "7", "isCorrect": false}}]}}
            ], "is_submitted": {submitted}}}"#
        );
        QuizSession::from_context(parse_context_json(&raw).unwrap())
    }

    #[test]
    fn later_choice_replaces_earlier_one() {
        let mut s = session(false);
        s.record_selection(0, "Lyon").unwrap();
        let progress = s.record_selection(0, "Paris").unwrap().unwrap();
        assert_eq!(s.selections().len(), 1);
        assert_eq!(s.selections().get(0), Some("Paris"));
        assert_eq!(progress.answered, 1);
        assert_eq!(progress.percentage, 50);
    }

    #[test]
    fn index_must_exist() {
        let mut s = session(false);
        assert_eq!(
            s.record_selection(2, "42"),
            Err(SelectionError::OutOfRange { index: 2, total: 2 })
        );
        assert!(s.selections().is_empty());
    }

    #[test]
    fn submitted_session_is_locked() {
        let mut s = session(true);
        assert_eq!(s.record_selection(0, "Paris"), Err(SelectionError::Locked));
        assert!(s.selections().is_empty());
    }
}
