use super::*;
use crate::view_models::{ResultsSummary, render_questions, render_summary};

impl QuizSession {
    pub fn question_cards(&self) -> Vec<QuestionCard> {
        render_questions(&self.questions, &self.selections, self.submitted)
    }

    /// Sólo hay resumen con el quiz enviado y con nota.
    pub fn results_summary(&self) -> Option<ResultsSummary> {
        if !self.submitted {
            return None;
        }
        render_summary(self.score?, self.questions.len())
    }
}

impl QuizApp {
    /// Rehace todas las tarjetas; nunca se añaden sobre las anteriores.
    pub fn render(&mut self) {
        self.cards = self.session.question_cards();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::parse_context_json;
    use crate::view_models::{OptionMark, ScoreTier};

    const GRADED: &str = r#"{
        "quiz_data": [
            {"question": "2+2?", "answerOptions": [
                {"text": "4", "isCorrect": true, "rationale": "sum"},
                {"text": "5", "isCorrect": false, "rationale": "no"}
            ]}
        ],
        "user_answers": {"0": 1},
        "is_submitted": true,
        "score": 0
    }"#;

    #[test]
    fn graded_context_renders_marks_and_summary() {
        let session = QuizSession::from_context(parse_context_json(GRADED).unwrap());
        assert_eq!(session.phase(), AppState::Results);

        let cards = session.question_cards();
        assert_eq!(cards[0].options[0].mark, OptionMark::Correct);
        assert_eq!(cards[0].options[1].mark, OptionMark::Incorrect);

        let summary = session.results_summary().unwrap();
        assert_eq!(summary.percentage, 0);
        assert_eq!(summary.tier, ScoreTier::NeedsFocus);
    }

    #[test]
    fn no_summary_before_submission() {
        let raw = GRADED.replace("\"is_submitted\": true", "\"is_submitted\": false");
        let session = QuizSession::from_context(parse_context_json(&raw).unwrap());
        assert_eq!(session.phase(), AppState::Quiz);
        assert!(session.results_summary().is_none());
    }

    #[test]
    fn empty_context_renders_nothing() {
        let session = QuizSession::from_context(QuizContext::default());
        assert_eq!(session.phase(), AppState::Empty);
        assert!(session.question_cards().is_empty());
        assert!(session.compute_progress().is_none());
    }
}
