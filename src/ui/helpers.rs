// src/ui/helpers.rs
use crate::app::SubmitButton;
use crate::view_models::{OptionMark, OptionPill, ScoreTier};
use egui::{Button, Color32, RichText, Ui, Vec2};

const SELECTED_FILL: Color32 = Color32::from_rgb(0x3b, 0x82, 0xf6);
const CORRECT_FILL: Color32 = Color32::from_rgb(0x10, 0xb9, 0x81);
const INCORRECT_FILL: Color32 = Color32::from_rgb(0xef, 0x44, 0x44);

pub fn tier_color(tier: ScoreTier) -> Color32 {
    let [r, g, b] = tier.rgb();
    Color32::from_rgb(r, g, b)
}

fn pill_text(pill: &OptionPill) -> String {
    match pill.mark {
        OptionMark::Correct => format!("{}   {}   ✔", pill.label, pill.text),
        OptionMark::Incorrect => format!("{}   {}   ✖", pill.label, pill.text),
        OptionMark::Plain | OptionMark::Selected => format!("{}   {}", pill.label, pill.text),
    }
}

/// Opción a ancho completo. Devuelve true si se ha pulsado.
pub fn option_pill(ui: &mut Ui, pill: &OptionPill, width: f32, enabled: bool) -> bool {
    let fill = match pill.mark {
        OptionMark::Plain => None,
        OptionMark::Selected => Some(SELECTED_FILL),
        OptionMark::Correct => Some(CORRECT_FILL),
        OptionMark::Incorrect => Some(INCORRECT_FILL),
    };

    let mut text = RichText::new(pill_text(pill));
    if fill.is_some() {
        text = text.color(Color32::WHITE).strong();
    }

    let mut button = Button::new(text).min_size(Vec2::new(width, 32.0));
    if let Some(color) = fill {
        button = button.fill(color);
    }

    ui.add_enabled(enabled, button).clicked()
}

pub fn submit_button(ui: &mut Ui, state: SubmitButton, width: f32) -> bool {
    ui.add_enabled(
        state.enabled,
        Button::new(RichText::new(state.label).strong()).min_size(Vec2::new(width, 40.0)),
    )
    .clicked()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn graded_pills_carry_status_icon() {
        let pill = |mark| OptionPill {
            label: "B".into(),
            text: "5".into(),
            mark,
        };
        assert_eq!(pill_text(&pill(OptionMark::Incorrect)), "B   5   ✖");
        assert_eq!(pill_text(&pill(OptionMark::Correct)), "B   5   ✔");
        assert_eq!(pill_text(&pill(OptionMark::Selected)), "B   5");
    }
}
