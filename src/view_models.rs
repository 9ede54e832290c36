// src/view_models.rs

use crate::model::{Question, SelectionMap};

pub const FALLBACK_HINT: &str = "Carefully analyze the context of the question.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OptionMark {
    Plain,
    Selected,  // elegida, antes de enviar
    Correct,   // la correcta, tras enviar (haya elegido lo que haya elegido)
    Incorrect, // la elegida por el usuario cuando no es la correcta
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionPill {
    pub label: String, // A, B, C...
    pub text: String,
    pub mark: OptionMark,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Disclosure {
    pub button_label: &'static str,
    pub rationale: Option<String>,
    pub hint: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionCard {
    pub index: usize,  // índice 0-based en el quiz
    pub number: usize, // número "humano" (1,2,3…)
    pub title: String,
    pub options: Vec<OptionPill>,
    pub interactive: bool,
    pub disclosure: Disclosure,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProgressInfo {
    pub answered: usize,
    pub total: usize,
    pub percentage: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum ScoreTier {
    NeedsFocus,
    Strong,
    Mastery,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResultsSummary {
    pub score: u32,
    pub total: usize,
    pub percentage: u32,
    pub tier: ScoreTier,
}

/// A, B, ..., Z, AA, AB, ...
pub fn option_label(index: usize) -> String {
    let mut n = index + 1;
    let mut label = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        label.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    label.reverse();
    String::from_utf8(label).unwrap_or_default()
}

/// Redondeo "mitad hacia arriba" de `part / whole * 100`. `whole` debe ser > 0.
pub fn rounded_percentage(part: usize, whole: usize) -> u32 {
    ((part * 200 + whole) / (whole * 2)) as u32
}

/// Construye desde cero una tarjeta por pregunta. Llamarla otra vez con la
/// misma entrada da exactamente el mismo resultado.
pub fn render_questions(
    questions: &[Question],
    selections: &SelectionMap,
    submitted: bool,
) -> Vec<QuestionCard> {
    questions
        .iter()
        .enumerate()
        .map(|(qi, q)| {
            let options = q
                .options
                .iter()
                .enumerate()
                .map(|(oi, opt)| {
                    let selected = selections.is_selected(qi, &opt.text);
                    let mark = match (submitted, opt.is_correct, selected) {
                        (true, true, _) => OptionMark::Correct,
                        (true, false, true) => OptionMark::Incorrect,
                        (true, false, false) => OptionMark::Plain,
                        (false, _, true) => OptionMark::Selected,
                        (false, _, false) => OptionMark::Plain,
                    };
                    OptionPill {
                        label: option_label(oi),
                        text: opt.text.clone(),
                        mark,
                    }
                })
                .collect();

            let hint = q
                .hint
                .as_deref()
                .filter(|h| !h.trim().is_empty())
                .unwrap_or(FALLBACK_HINT)
                .to_string();

            let disclosure = if submitted {
                Disclosure {
                    button_label: "View Expert Rationale",
                    rationale: q.correct_option().map(|o| o.rationale.clone()),
                    hint,
                }
            } else {
                Disclosure {
                    button_label: "Reveal a Hint",
                    rationale: None,
                    hint,
                }
            };

            QuestionCard {
                index: qi,
                number: qi + 1,
                title: q.text.clone(),
                options,
                interactive: !submitted,
                disclosure,
            }
        })
        .collect()
}

pub fn render_summary(score: u32, total: usize) -> Option<ResultsSummary> {
    if total == 0 {
        return None;
    }
    let percentage = rounded_percentage(score as usize, total);
    Some(ResultsSummary {
        score,
        total,
        percentage,
        tier: ScoreTier::for_percentage(percentage),
    })
}

impl ScoreTier {
    pub fn for_percentage(percentage: u32) -> Self {
        if percentage >= 80 {
            ScoreTier::Mastery
        } else if percentage >= 60 {
            ScoreTier::Strong
        } else {
            ScoreTier::NeedsFocus
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScoreTier::Mastery => "Mastery Achieved! 🏆",
            ScoreTier::Strong => "Strong Progress",
            ScoreTier::NeedsFocus => "Needs Focus",
        }
    }

    pub fn rgb(&self) -> [u8; 3] {
        match self {
            ScoreTier::Mastery => [0x10, 0xb9, 0x81],
            ScoreTier::Strong => [0xf5, 0x9e, 0x0b],
            ScoreTier::NeedsFocus => [0xef, 0x44, 0x44],
        }
    }
}

impl ProgressInfo {
    pub fn completed_label(&self) -> String {
        format!("{}% Completed", self.percentage)
    }

    pub fn counter_label(&self) -> String {
        format!("{} / {}", self.answered, self.total)
    }

    pub fn fraction(&self) -> f32 {
        self.percentage as f32 / 100.0
    }
}

impl ResultsSummary {
    pub fn accuracy_label(&self) -> String {
        format!("{}% Accurate", self.percentage)
    }

    pub fn score_label(&self) -> String {
        format!("{}/{}", self.score, self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AnswerOption;

    fn opt(text: &str, is_correct: bool) -> AnswerOption {
        AnswerOption {
            text: text.into(),
            is_correct,
            rationale: format!("because {text}"),
        }
    }

    fn two_plus_two() -> Vec<Question> {
        vec![Question {
            text: "2+2?".into(),
            hint: None,
            options: vec![opt("4", true), opt("5", false)],
        }]
    }

    #[test]
    fn labels_continue_after_z() {
        assert_eq!(option_label(0), "A");
        assert_eq!(option_label(3), "D");
        assert_eq!(option_label(25), "Z");
        assert_eq!(option_label(26), "AA");
        assert_eq!(option_label(27), "AB");
    }

    #[test]
    fn percentage_rounds_half_up() {
        assert_eq!(rounded_percentage(1, 8), 13); // 12.5
        assert_eq!(rounded_percentage(1, 3), 33);
        assert_eq!(rounded_percentage(2, 3), 67);
        assert_eq!(rounded_percentage(0, 5), 0);
        assert_eq!(rounded_percentage(5, 5), 100);
    }

    #[test]
    fn submitted_marks_correct_and_wrong_choice() {
        let mut sel = SelectionMap::new();
        sel.insert(0, "5");
        let cards = render_questions(&two_plus_two(), &sel, true);
        let marks: Vec<_> = cards[0].options.iter().map(|o| o.mark).collect();
        assert_eq!(marks, vec![OptionMark::Correct, OptionMark::Incorrect]);
        assert!(!cards[0].interactive);
        assert_eq!(cards[0].disclosure.button_label, "View Expert Rationale");
        assert_eq!(cards[0].disclosure.rationale.as_deref(), Some("because 4"));
    }

    #[test]
    fn submitted_without_answer_only_marks_correct() {
        let cards = render_questions(&two_plus_two(), &SelectionMap::new(), true);
        let marks: Vec<_> = cards[0].options.iter().map(|o| o.mark).collect();
        assert_eq!(marks, vec![OptionMark::Correct, OptionMark::Plain]);
    }

    #[test]
    fn active_mode_marks_only_selection() {
        let mut sel = SelectionMap::new();
        sel.insert(0, "4");
        let cards = render_questions(&two_plus_two(), &sel, false);
        let marks: Vec<_> = cards[0].options.iter().map(|o| o.mark).collect();
        assert_eq!(marks, vec![OptionMark::Selected, OptionMark::Plain]);
        assert!(cards[0].interactive);
        assert_eq!(cards[0].disclosure.rationale, None);
        assert_eq!(cards[0].disclosure.hint, FALLBACK_HINT);
    }

    #[test]
    fn render_is_idempotent() {
        let mut sel = SelectionMap::new();
        sel.insert(0, "5");
        let first = render_questions(&two_plus_two(), &sel, true);
        let second = render_questions(&two_plus_two(), &sel, true);
        assert_eq!(first, second);
    }

    #[test]
    fn summary_tiers_are_monotonic() {
        let s = render_summary(8, 10).unwrap();
        assert_eq!(s.percentage, 80);
        assert_eq!(s.tier, ScoreTier::Mastery);
        assert_eq!(render_summary(6, 10).unwrap().tier, ScoreTier::Strong);
        assert_eq!(render_summary(5, 10).unwrap().tier, ScoreTier::NeedsFocus);
        assert!(render_summary(0, 0).is_none());

        let mut prev = ScoreTier::NeedsFocus;
        for p in 0..=100 {
            let t = ScoreTier::for_percentage(p);
            assert!(t >= prev);
            prev = t;
        }
    }
}
