use super::style;
use super::*;
use eframe::egui::{Frame, Margin, RichText, StrokeKind};

impl EguiApp {
    pub(super) fn render_status(&mut self, ctx: &egui::Context) {
        let palette = style::palette();
        egui::TopBottomPanel::bottom("status_bar")
            .frame(
                Frame::new()
                    .fill(palette.bg_primary)
                    .stroke(style::section_stroke())
                    .inner_margin(Margin::symmetric(8, 4)),
            )
            .show(ctx, |ui| {
                let status = &self.controller.ui.status;
                ui.horizontal(|ui| {
                    ui.add_space(6.0);
                    let (badge_rect, _) =
                        ui.allocate_exact_size(egui::vec2(16.0, 16.0), egui::Sense::hover());
                    ui.painter().rect_filled(badge_rect, 0.0, status.badge_color);
                    ui.painter().rect_stroke(
                        badge_rect,
                        0.0,
                        style::inner_border(),
                        StrokeKind::Inside,
                    );
                    ui.add_space(8.0);
                    ui.label(RichText::new(&status.badge_label).color(palette.text_primary));
                    ui.separator();
                    ui.label(RichText::new(&status.text).color(palette.text_primary));
                    if let Some(username) = self.controller.current_user() {
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            ui.label(
                                RichText::new(format!("Signed in as {username}"))
                                    .color(palette.text_muted),
                            );
                        });
                    }
                });
            });
    }
}
