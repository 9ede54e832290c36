use crate::QuizApp;
use crate::ui::layout::centered_panel;
use egui::{Context, RichText};

/// Sin preguntas no hay nada que pintar; sólo el aviso del servidor si lo hay.
pub fn ui_empty(app: &mut QuizApp, ctx: &Context) {
    centered_panel(ctx, 120.0, 480.0, |ui| {
        ui.label(RichText::new("No quiz loaded").heading());
        ui.add_space(10.0);
        ui.label("Generate a quiz on the server and reload this page.");
        if !app.message.is_empty() {
            ui.add_space(10.0);
            ui.label(&app.message);
        }
    });
}
