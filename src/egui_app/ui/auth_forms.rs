use super::style;
use super::*;
use crate::egui_app::state::AuthMode;
use eframe::egui::{RichText, TextEdit, Ui};

impl EguiApp {
    pub(super) fn render_auth_form(&mut self, ui: &mut Ui) {
        let palette = style::palette();
        let mode = self.controller.ui.auth.mode;
        let submitting = self.controller.ui.auth.submitting;
        ui.vertical(|ui| {
            ui.label(RichText::new(mode.title()).size(22.0).strong());
            ui.add_space(12.0);

            let username = ui.add_enabled(
                !submitting,
                TextEdit::singleline(&mut self.controller.ui.auth.username)
                    .hint_text("Username")
                    .desired_width(f32::INFINITY),
            );
            if self.controller.ui.auth.focus_username_requested {
                username.request_focus();
                self.controller.ui.auth.focus_username_requested = false;
            }
            ui.add_space(8.0);
            let password = ui.add_enabled(
                !submitting,
                TextEdit::singleline(&mut self.controller.ui.auth.password)
                    .hint_text("Password")
                    .password(true)
                    .desired_width(f32::INFINITY),
            );
            let enter_pressed = (username.lost_focus() || password.lost_focus())
                && ui.input(|i| i.key_pressed(egui::Key::Enter));
            ui.add_space(14.0);

            let ready = self.controller.ui.auth.is_complete() && !submitting;
            let label = match (mode, submitting) {
                (AuthMode::Login, true) => "Logging in…",
                (AuthMode::Register, true) => "Registering…",
                (mode, false) => mode.title(),
            };
            let button = egui::Button::new(RichText::new(label).strong())
                .min_size(egui::vec2(ui.available_width(), 32.0));
            let clicked = ui.add_enabled(ready, button).clicked();
            if clicked || (enter_pressed && ready) {
                match mode {
                    AuthMode::Login => self.controller.submit_login(),
                    AuthMode::Register => self.controller.submit_register(),
                }
            }

            ui.add_space(10.0);
            ui.horizontal(|ui| {
                ui.label(RichText::new(mode.switch_prompt()).color(palette.text_muted));
                let other = mode.other();
                if ui
                    .add_enabled(!submitting, egui::Link::new(other.title()))
                    .clicked()
                {
                    match other {
                        AuthMode::Login => self.controller.show_login_form(),
                        AuthMode::Register => self.controller.show_register_form(),
                    }
                }
            });
        });
    }
}
