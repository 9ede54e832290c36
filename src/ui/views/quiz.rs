use crate::QuizApp;
use crate::model::AppState;
use crate::ui::helpers::{option_pill, submit_button};
use crate::ui::layout::scroll_panel;
use crate::ui::views::summary::results_banner;
use crate::view_models::{ProgressInfo, QuestionCard};
use egui::{CollapsingHeader, Context, ProgressBar, RichText, Ui};

pub fn ui_quiz(app: &mut QuizApp, ctx: &Context) {
    scroll_panel(ctx, 760.0, |ui| {
        let panel_width = ui.available_width();

        if app.session.phase() == AppState::Results {
            if let Some(summary) = app.session.results_summary() {
                results_banner(ui, &summary);
            }
        } else if let Some(progress) = app.session.compute_progress() {
            progress_header(ui, &progress);
        }

        let mut clicked: Option<(usize, String)> = None;
        for card in &app.cards {
            if let Some(text) = question_card(ui, card, panel_width) {
                clicked = Some((card.index, text));
            }
            ui.add_space(12.0);
        }
        if let Some((qi, text)) = clicked {
            app.seleccionar_opcion(qi, &text);
        }

        if app.session.phase() == AppState::Quiz {
            ui.add_space(8.0);
            if submit_button(ui, app.session.submit_button(), panel_width) {
                app.enviar_respuestas();
            }
        }

        if !app.message.is_empty() {
            ui.add_space(8.0);
            ui.label(&app.message);
        }
    });
}

fn progress_header(ui: &mut Ui, progress: &ProgressInfo) {
    ui.horizontal(|ui| {
        ui.label(RichText::new(progress.completed_label()).strong());
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(progress.counter_label());
        });
    });
    ui.add(ProgressBar::new(progress.fraction()).desired_height(8.0));
    ui.add_space(16.0);
}

/// Pinta una pregunta; devuelve el texto de la opción pulsada, si la hay.
fn question_card(ui: &mut Ui, card: &QuestionCard, width: f32) -> Option<String> {
    let mut clicked = None;

    egui::Frame::group(ui.style())
        .inner_margin(egui::Margin::symmetric(16, 16))
        .show(ui, |ui| {
            ui.set_width(width - 32.0);
            ui.label(RichText::new(format!("{}. {}", card.number, card.title)).strong());
            ui.add_space(10.0);

            for pill in &card.options {
                if option_pill(ui, pill, width - 32.0, card.interactive) {
                    clicked = Some(pill.text.clone());
                }
                ui.add_space(4.0);
            }

            ui.add_space(6.0);
            ui.separator();

            // Plegado al pintarse por primera vez
            CollapsingHeader::new(card.disclosure.button_label)
                .id_salt(("disclosure", card.index, card.interactive))
                .default_open(false)
                .show(ui, |ui| {
                    if let Some(rationale) = &card.disclosure.rationale {
                        ui.label(format!("Rationale: {rationale}"));
                        ui.add_space(4.0);
                    }
                    ui.label(format!("Hint: {}", card.disclosure.hint));
                });
        });

    clicked
}
