use eframe::egui::{
    Color32, Stroke, Visuals,
    epaint::{CornerRadius, Shadow},
    style::WidgetVisuals,
};

#[derive(Clone, Copy)]
pub struct Palette {
    pub bg_primary: Color32,
    pub bg_secondary: Color32,
    pub bg_tertiary: Color32,
    pub panel_outline: Color32,
    pub grid_soft: Color32,
    pub text_primary: Color32,
    pub text_muted: Color32,
    pub accent_teal: Color32,
    pub accent_ice: Color32,
    pub warning: Color32,
    pub success: Color32,
}

pub fn palette() -> Palette {
    Palette {
        bg_primary: Color32::from_rgb(8, 10, 14),
        bg_secondary: Color32::from_rgb(15, 23, 42),
        bg_tertiary: Color32::from_rgb(30, 41, 59),
        panel_outline: Color32::from_rgb(51, 65, 85),
        grid_soft: Color32::from_rgb(51, 65, 85),
        text_primary: Color32::from_rgb(226, 232, 240),
        text_muted: Color32::from_rgb(148, 163, 184),
        accent_teal: Color32::from_rgb(45, 212, 191),
        accent_ice: Color32::from_rgb(167, 217, 255),
        warning: Color32::from_rgb(200, 128, 96),
        success: Color32::from_rgb(102, 176, 136),
    }
}

/// Tone of the footer status badge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusTone {
    Idle,
    Busy,
    Info,
    Warning,
    Error,
}

impl StatusTone {
    pub fn label(self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Busy => "Working",
            Self::Info => "Info",
            Self::Warning => "Warning",
            Self::Error => "Error",
        }
    }
}

pub fn status_badge_color(tone: StatusTone) -> Color32 {
    let palette = palette();
    match tone {
        StatusTone::Idle => palette.text_muted,
        StatusTone::Busy => palette.accent_ice,
        StatusTone::Info => palette.success,
        StatusTone::Warning => palette.warning,
        StatusTone::Error => Color32::from_rgb(220, 80, 80),
    }
}

pub fn apply_visuals(visuals: &mut Visuals) {
    let palette = palette();
    visuals.window_fill = palette.bg_secondary;
    visuals.panel_fill = palette.bg_primary;
    visuals.override_text_color = Some(palette.text_primary);
    visuals.hyperlink_color = palette.accent_teal;
    visuals.extreme_bg_color = palette.bg_tertiary;
    visuals.faint_bg_color = palette.bg_secondary;
    visuals.error_fg_color = palette.warning;
    visuals.warn_fg_color = palette.warning;
    visuals.selection.bg_fill = palette.bg_tertiary;
    visuals.selection.stroke = Stroke::new(1.0, palette.accent_teal);
    visuals.widgets.noninteractive.bg_fill = palette.bg_secondary;
    visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, palette.text_primary);
    set_rounded(&mut visuals.widgets.inactive, palette);
    set_rounded(&mut visuals.widgets.hovered, palette);
    set_rounded(&mut visuals.widgets.active, palette);
    set_rounded(&mut visuals.widgets.open, palette);
    visuals.window_corner_radius = CornerRadius::same(8);
    visuals.menu_corner_radius = CornerRadius::same(6);
    visuals.popup_shadow = Shadow::NONE;
    visuals.button_frame = true;
}

fn set_rounded(vis: &mut WidgetVisuals, palette: Palette) {
    vis.corner_radius = CornerRadius::same(6);
    vis.bg_fill = palette.bg_tertiary;
    vis.weak_bg_fill = palette.bg_tertiary;
    vis.bg_stroke = Stroke::new(1.0, palette.panel_outline);
    vis.fg_stroke = Stroke::new(1.0, palette.text_primary);
}

/// Fill for raised cards (auth form, results).
pub fn card_fill() -> Color32 {
    palette().bg_secondary
}

/// Fill behind the result chart.
pub fn chart_fill() -> Color32 {
    palette().bg_tertiary
}

pub fn inner_border() -> Stroke {
    Stroke::new(1.0, palette().grid_soft)
}

pub fn section_stroke() -> Stroke {
    Stroke::new(1.0, palette().panel_outline)
}

/// Row fill for the selected history entry.
pub fn selected_row_fill() -> Color32 {
    palette().bg_tertiary
}

/// Label color for a predicted class.
pub fn prediction_color(is_fake: bool) -> Color32 {
    if is_fake {
        Color32::from_rgb(239, 68, 68)
    } else {
        palette().success
    }
}
