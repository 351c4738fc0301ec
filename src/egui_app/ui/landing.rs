use super::style;
use super::*;
use eframe::egui::{CornerRadius, Frame, Margin, RichText};

const CARD_WIDTH: f32 = 360.0;

impl EguiApp {
    /// Header plus the login or register card, centered.
    pub(super) fn render_landing(&mut self, ctx: &egui::Context) {
        let palette = style::palette();
        egui::CentralPanel::default()
            .frame(Frame::new().fill(palette.bg_primary))
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.add_space((ui.available_height() * 0.12).max(24.0));
                    ui.label(
                        RichText::new("Deeptone AI")
                            .size(32.0)
                            .strong()
                            .color(palette.accent_teal),
                    );
                    ui.label(
                        RichText::new("Detect AI-generated and deepfake audio")
                            .color(palette.text_muted),
                    );
                    ui.add_space(28.0);
                    Frame::new()
                        .fill(style::card_fill())
                        .stroke(style::section_stroke())
                        .corner_radius(CornerRadius::same(10))
                        .inner_margin(Margin::same(20))
                        .show(ui, |ui| {
                            ui.set_width(CARD_WIDTH);
                            self.render_auth_form(ui);
                        });
                });
            });
    }
}
