use crate::QuizApp;
use egui::{CentralPanel, Context, Frame, Ui, Visuals};

pub fn top_panel(app: &mut QuizApp, ctx: &Context) {
    egui::TopBottomPanel::top("menu_panel").show(ctx, |ui| {
        ui.horizontal_centered(|ui| {
            ui.heading("Quiz");
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                // No se reinicia con trabajo de red en vuelo
                let enabled = !app.is_busy();
                if ui
                    .add_enabled(enabled, egui::Button::new("🔄 Start over"))
                    .clicked()
                {
                    app.empezar_de_nuevo();
                }
            });
        });
    });
}

pub fn bottom_panel(app: &mut QuizApp, ctx: &Context) {
    egui::TopBottomPanel::bottom("bottom_panel").show(ctx, |ui| {
        // ----------- BOTONES DE TEMA -----------
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("🌙 Dark mode").clicked() {
                app.dark_mode = true;
            }
            if ui.button("☀ Light mode").clicked() {
                app.dark_mode = false;
            }
        });
    });

    ctx.set_visuals(if app.dark_mode {
        Visuals::dark()
    } else {
        Visuals::light()
    });
}

/// Panel central con ancho máximo y scroll vertical.
pub fn scroll_panel(ctx: &Context, max_width: f32, inner: impl FnOnce(&mut Ui)) {
    CentralPanel::default().show(ctx, |ui| {
        egui::ScrollArea::vertical()
            .auto_shrink([false; 2])
            .show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    let w = ui.available_width().min(max_width);
                    ui.set_max_width(w);
                    Frame::default()
                        .fill(ui.visuals().window_fill())
                        .inner_margin(egui::Margin::symmetric(16, 16))
                        .show(ui, |ui| {
                            ui.set_width(w);
                            inner(ui);
                        });
                });
            });
    });
}

/// Panel centrado tanto vertical como horizontalmente
pub fn centered_panel(ctx: &Context, est_height: f32, max_width: f32, inner: impl FnOnce(&mut Ui)) {
    CentralPanel::default().show(ctx, |ui| {
        let extra = ((ui.available_height() - est_height) / 2.0).max(0.0);
        ui.add_space(extra);
        ui.vertical_centered(|ui| {
            let w = ui.available_width().min(max_width);
            ui.set_max_width(w);
            inner(ui);
        });
        ui.add_space(extra);
    });
}
