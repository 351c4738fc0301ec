use super::style;
use super::*;
use eframe::egui::{CornerRadius, Frame, Margin, RichText, Ui};

impl EguiApp {
    /// Central panel: file picker, analysis trigger and result cards.
    pub(super) fn render_uploader(&mut self, ctx: &egui::Context) {
        let palette = style::palette();
        egui::CentralPanel::default()
            .frame(
                Frame::new()
                    .fill(palette.bg_primary)
                    .inner_margin(Margin::same(16)),
            )
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .id_salt("uploader_scroll")
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        card_frame().show(ui, |ui| {
                            ui.set_width(ui.available_width());
                            self.render_upload_card(ui);
                        });
                        if let Some(record) = self.controller.ui.upload.result.clone() {
                            ui.add_space(12.0);
                            card_frame().show(ui, |ui| {
                                ui.set_width(ui.available_width());
                                ui.label(RichText::new("Analysis result").strong());
                                ui.add_space(6.0);
                                self.render_result_card(ui, &record);
                            });
                        }
                        if let Some(record) = self.controller.ui.history.selected.clone() {
                            ui.add_space(12.0);
                            card_frame().show(ui, |ui| {
                                ui.set_width(ui.available_width());
                                ui.horizontal(|ui| {
                                    ui.label(RichText::new("Selected result").strong());
                                    ui.with_layout(
                                        egui::Layout::right_to_left(egui::Align::Center),
                                        |ui| {
                                            if ui.button("Clear Result").clicked() {
                                                self.controller.clear_selected_result();
                                            }
                                        },
                                    );
                                });
                                ui.add_space(6.0);
                                self.render_result_card(ui, &record);
                            });
                        }
                    });
            });
    }

    fn render_upload_card(&mut self, ui: &mut Ui) {
        let palette = style::palette();
        let analyzing = self.controller.ui.upload.analyzing;
        ui.label(RichText::new("Analyze audio").size(18.0).strong());
        ui.label(
            RichText::new("Choose or drop a WAV, MP3 or M4A file up to 100 MB.")
                .color(palette.text_muted),
        );
        ui.add_space(10.0);
        ui.horizontal(|ui| {
            if ui
                .add_enabled(!analyzing, egui::Button::new("Choose file…"))
                .clicked()
            {
                self.controller.pick_audio_file_via_dialog();
            }
            match self.controller.ui.upload.selected.as_ref() {
                Some(selected) => {
                    ui.label(RichText::new(&selected.file_name).color(palette.text_primary));
                    ui.label(RichText::new(selected.size_label()).color(palette.text_muted));
                }
                None => {
                    ui.label(RichText::new("No file selected").color(palette.text_muted));
                }
            }
        });
        ui.add_space(10.0);
        ui.horizontal(|ui| {
            let has_file = self.controller.ui.upload.selected.is_some();
            let preview_label = if self.controller.ui.upload.previewing {
                "Stop preview"
            } else {
                "Preview"
            };
            if ui
                .add_enabled(has_file, egui::Button::new(preview_label))
                .clicked()
            {
                self.controller.toggle_preview();
            }
            let label = if analyzing { "Analyzing..." } else { "Analyze" };
            let analyze = egui::Button::new(RichText::new(label).strong())
                .fill(palette.accent_teal.gamma_multiply(0.35));
            if ui
                .add_enabled(self.controller.can_submit_analysis(), analyze)
                .clicked()
            {
                self.controller.submit_analysis();
            }
            if analyzing {
                ui.add(egui::Spinner::new());
            }
        });
    }
}

fn card_frame() -> Frame {
    Frame::new()
        .fill(style::card_fill())
        .stroke(style::section_stroke())
        .corner_radius(CornerRadius::same(8))
        .inner_margin(Margin::same(14))
}
