use super::style;
use super::*;
use crate::prediction::{MetricBar, PredictionRecord, chart_bars};
use eframe::egui::{Align2, Color32, FontId, RichText, Stroke, StrokeKind, Ui};

const CHART_HEIGHT: f32 = 220.0;
const AXIS_GUTTER: f32 = 36.0;
const LABEL_GUTTER: f32 = 22.0;
const GRID_STEPS: usize = 4;

impl EguiApp {
    /// Prediction label, file name and the metric bar chart.
    pub(super) fn render_result_card(&self, ui: &mut Ui, record: &PredictionRecord) {
        let palette = style::palette();
        ui.horizontal(|ui| {
            ui.label(RichText::new("Prediction:").color(palette.text_muted));
            ui.label(
                RichText::new(&record.prediction)
                    .size(18.0)
                    .strong()
                    .color(style::prediction_color(record.is_fake())),
            );
        });
        ui.horizontal(|ui| {
            ui.label(RichText::new("File:").color(palette.text_muted));
            ui.label(&record.filename);
            if let Some(timestamp) = record.display_timestamp(self.local_offset) {
                ui.separator();
                ui.label(RichText::new(timestamp).color(palette.text_muted));
            }
        });
        ui.add_space(8.0);
        paint_metric_chart(ui, &chart_bars(record));
    }
}

/// Bar chart on a fixed 0..1 axis, one bar per metric.
fn paint_metric_chart(ui: &mut Ui, bars: &[MetricBar]) {
    let palette = style::palette();
    let desired = egui::vec2(ui.available_width(), CHART_HEIGHT);
    let (response, painter) = ui.allocate_painter(desired, egui::Sense::hover());
    let rect = response.rect;
    painter.rect_filled(rect, 6.0, style::chart_fill());

    let plot = egui::Rect::from_min_max(
        egui::pos2(rect.left() + AXIS_GUTTER, rect.top() + 10.0),
        egui::pos2(rect.right() - 10.0, rect.bottom() - LABEL_GUTTER),
    );
    let small = FontId::proportional(11.0);
    for step in 0..=GRID_STEPS {
        let fraction = step as f32 / GRID_STEPS as f32;
        let y = plot.bottom() - plot.height() * fraction;
        painter.line_segment(
            [egui::pos2(plot.left(), y), egui::pos2(plot.right(), y)],
            style::inner_border(),
        );
        painter.text(
            egui::pos2(plot.left() - 6.0, y),
            Align2::RIGHT_CENTER,
            format!("{fraction:.2}"),
            small.clone(),
            palette.text_muted,
        );
    }

    if bars.is_empty() {
        return;
    }
    let slot = plot.width() / bars.len() as f32;
    let bar_width = slot * 0.55;
    for (index, bar) in bars.iter().enumerate() {
        let center = plot.left() + slot * (index as f32 + 0.5);
        let top = plot.bottom() - plot.height() * bar.height_fraction();
        let bar_rect = egui::Rect::from_min_max(
            egui::pos2(center - bar_width / 2.0, top),
            egui::pos2(center + bar_width / 2.0, plot.bottom()),
        );
        let [r, g, b] = bar.color;
        let fill = Color32::from_rgb(r, g, b);
        painter.rect_filled(bar_rect, 2.0, fill);
        painter.rect_stroke(
            bar_rect,
            2.0,
            Stroke::new(1.0, fill.gamma_multiply(0.6)),
            StrokeKind::Inside,
        );
        painter.text(
            egui::pos2(center, top - 2.0),
            Align2::CENTER_BOTTOM,
            format!("{:.2}", bar.value),
            small.clone(),
            palette.text_primary,
        );
        painter.text(
            egui::pos2(center, plot.bottom() + 4.0),
            Align2::CENTER_TOP,
            bar.label,
            small.clone(),
            palette.text_muted,
        );
    }
    response.on_hover_text(
        bars.iter()
            .map(|bar| format!("{}: {:.4}", bar.label, bar.value))
            .collect::<Vec<_>>()
            .join("\n"),
    );
}
