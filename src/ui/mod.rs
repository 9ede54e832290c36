mod helpers;
pub mod layout;
pub mod views;

use crate::app::{QuizApp, THEME_KEY};
use crate::model::AppState;
use eframe::{App, Frame, set_value};
use egui::Context;
use layout::{bottom_panel, top_panel};
use std::time::Duration;

impl App for QuizApp {
    fn update(&mut self, ctx: &Context, _frame: &mut Frame) {
        self.poll_submission();
        self.poll_reload();
        if self.is_busy() {
            // Sin eventos de usuario hay que seguir mirando el canal
            ctx.request_repaint_after(Duration::from_millis(100));
        }

        top_panel(self, ctx);
        bottom_panel(self, ctx);

        match self.session.phase() {
            AppState::Empty => views::empty::ui_empty(self, ctx),
            AppState::Quiz | AppState::Results => views::quiz::ui_quiz(self, ctx),
        }
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        set_value(storage, THEME_KEY, &self.dark_mode);
    }
}
