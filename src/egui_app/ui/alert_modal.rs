use super::style;
use super::*;
use eframe::egui::RichText;

impl EguiApp {
    /// Blocking modal for the oldest queued alert.
    pub(super) fn render_alert_modal(&mut self, ctx: &egui::Context) {
        let Some(message) = self.controller.ui.alerts.current().map(str::to_string) else {
            return;
        };
        let palette = style::palette();
        let pending = self.controller.ui.alerts.len();
        let mut dismissed = ctx.input(|i| i.key_pressed(egui::Key::Enter));
        let modal = egui::Modal::new(egui::Id::new("alert_modal")).show(ctx, |ui| {
            ui.set_max_width(380.0);
            ui.label(RichText::new(&message).color(palette.text_primary));
            if pending > 1 {
                ui.label(
                    RichText::new(format!("{} more", pending - 1))
                        .small()
                        .color(palette.text_muted),
                );
            }
            ui.add_space(12.0);
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("OK").clicked() {
                    dismissed = true;
                }
            });
        });
        if dismissed || modal.should_close() {
            self.controller.dismiss_alert();
        }
    }
}
