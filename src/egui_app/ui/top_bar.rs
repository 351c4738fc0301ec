use super::style;
use super::*;
use eframe::egui::{Frame, Margin, RichText};

impl EguiApp {
    pub(super) fn render_top_bar(&mut self, ctx: &egui::Context) {
        let palette = style::palette();
        let username = self.controller.current_user().unwrap_or_default().to_string();
        egui::TopBottomPanel::top("top_bar")
            .frame(
                Frame::new()
                    .fill(palette.bg_secondary)
                    .stroke(style::section_stroke())
                    .inner_margin(Margin::symmetric(12, 8)),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(
                        RichText::new("Deeptone AI")
                            .size(18.0)
                            .strong()
                            .color(palette.accent_teal),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let avatar = RichText::new(avatar_initial(&username))
                            .strong()
                            .color(palette.bg_primary)
                            .background_color(palette.accent_ice);
                        ui.menu_button(avatar, |ui| {
                            ui.label(RichText::new(&username).color(palette.text_muted));
                            ui.separator();
                            if ui.button("Logout").clicked() {
                                self.controller.logout();
                                ui.close();
                            }
                        });
                    });
                });
            });
    }
}

/// First character of the username, uppercased, for the avatar button.
fn avatar_initial(username: &str) -> String {
    username
        .trim()
        .chars()
        .next()
        .map(|ch| ch.to_uppercase().collect())
        .unwrap_or_else(|| "?".to_string())
}

#[cfg(test)]
mod tests {
    use super::avatar_initial;

    #[test]
    fn avatar_uses_uppercase_first_letter() {
        assert_eq!(avatar_initial("alice"), "A");
        assert_eq!(avatar_initial("  émile"), "É");
        assert_eq!(avatar_initial(""), "?");
    }
}
