use crate::ui::helpers::tier_color;
use crate::view_models::ResultsSummary;
use egui::{ProgressBar, RichText, Ui};

/// Cabecera con la nota; se pinta encima de las preguntas corregidas.
pub fn results_banner(ui: &mut Ui, summary: &ResultsSummary) {
    let color = tier_color(summary.tier);

    egui::Frame::group(ui.style())
        .inner_margin(egui::Margin::symmetric(24, 20))
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.vertical(|ui| {
                    ui.label(
                        RichText::new(summary.score_label())
                            .size(48.0)
                            .strong()
                            .color(color),
                    );
                    ui.label(RichText::new(summary.accuracy_label()).strong());
                });
                ui.add_space(24.0);
                ui.vertical(|ui| {
                    ui.label(RichText::new(summary.tier.label()).heading().strong());
                    ui.add_space(6.0);
                    ui.label(
                        "Review the detailed assessment below. Focus on the expert rationales to bridge your knowledge gaps.",
                    );
                    ui.add_space(10.0);
                    ui.add(
                        ProgressBar::new(summary.percentage as f32 / 100.0)
                            .fill(color)
                            .desired_height(12.0),
                    );
                });
            });
        });
    ui.add_space(16.0);
}
