use super::style;
use super::*;
use eframe::egui::{Frame, Margin, RichText};

impl EguiApp {
    /// Left sidebar listing past predictions, newest first.
    pub(super) fn render_history_panel(&mut self, ctx: &egui::Context) {
        let palette = style::palette();
        egui::SidePanel::left("history_panel")
            .resizable(true)
            .default_width(260.0)
            .min_width(200.0)
            .frame(
                Frame::new()
                    .fill(palette.bg_secondary)
                    .stroke(style::section_stroke())
                    .inner_margin(Margin::same(10)),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(RichText::new("History").strong().color(palette.text_primary));
                    if self.controller.ui.history.loading {
                        ui.add(egui::Spinner::new().size(12.0));
                    }
                });
                ui.add_space(6.0);
                if self.controller.ui.history.records.is_empty() {
                    ui.label(RichText::new("No history yet").color(palette.text_muted));
                    return;
                }
                let mut clicked = None;
                egui::ScrollArea::vertical()
                    .id_salt("history_scroll")
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        let history = &self.controller.ui.history;
                        for (index, record) in history.records.iter().enumerate() {
                            let selected = history.is_selected(record);
                            let fill = if selected {
                                style::selected_row_fill()
                            } else {
                                palette.bg_secondary
                            };
                            let timestamp = record
                                .display_timestamp(self.local_offset)
                                .unwrap_or_default();
                            let response = ui
                                .push_id(("history_row", index), |ui| {
                                    Frame::new()
                                        .fill(fill)
                                        .inner_margin(Margin::symmetric(8, 6))
                                        .show(ui, |ui| {
                                            ui.set_width(ui.available_width());
                                            ui.label(
                                                RichText::new(&record.filename)
                                                    .color(palette.text_primary),
                                            );
                                            ui.horizontal(|ui| {
                                                ui.label(
                                                    RichText::new(&record.prediction).strong().color(
                                                        style::prediction_color(record.is_fake()),
                                                    ),
                                                );
                                                ui.label(
                                                    RichText::new(timestamp)
                                                        .small()
                                                        .color(palette.text_muted),
                                                );
                                            });
                                        })
                                        .response
                                })
                                .inner
                                .interact(egui::Sense::click());
                            if response.clicked() {
                                clicked = Some(index);
                            }
                            ui.add_space(4.0);
                        }
                    });
                if let Some(index) = clicked {
                    self.controller.select_history_entry(index);
                }
            });
    }
}
