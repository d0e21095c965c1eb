//! Theme - dark workbench look for the builder window

use egui::{Color32, CornerRadius, Stroke, Style, Visuals};

/// Color palette.
pub struct Colors;

impl Colors {
    pub const BG_DARK: Color32 = Color32::from_rgb(16, 18, 22);
    pub const BG_CARD: Color32 = Color32::from_rgb(26, 30, 38);
    pub const BG_HOVER: Color32 = Color32::from_rgb(38, 44, 56);
    pub const ACCENT: Color32 = Color32::from_rgb(64, 186, 170);
    pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(235, 238, 242);
    pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(148, 160, 178);
    pub const SUCCESS: Color32 = Color32::from_rgb(110, 212, 130);
    pub const WARNING: Color32 = Color32::from_rgb(236, 186, 90);
    pub const ERROR: Color32 = Color32::from_rgb(240, 110, 110);
    pub const BORDER: Color32 = Color32::from_rgb(52, 60, 74);
}

/// Dark theme style for the whole application.
pub fn dark_theme() -> Style {
    let mut style = Style::default();
    let mut visuals = Visuals::dark();

    visuals.panel_fill = Colors::BG_DARK;
    visuals.window_fill = Colors::BG_CARD;
    visuals.extreme_bg_color = Colors::BG_DARK;
    visuals.faint_bg_color = Colors::BG_CARD;

    let rounding = CornerRadius::same(6);

    visuals.widgets.noninteractive.bg_fill = Colors::BG_CARD;
    visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, Colors::TEXT_SECONDARY);
    visuals.widgets.noninteractive.corner_radius = rounding;

    visuals.widgets.inactive.bg_fill = Colors::BG_CARD;
    visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, Colors::TEXT_PRIMARY);
    visuals.widgets.inactive.corner_radius = rounding;

    visuals.widgets.hovered.bg_fill = Colors::BG_HOVER;
    visuals.widgets.hovered.fg_stroke = Stroke::new(1.0, Colors::TEXT_PRIMARY);
    visuals.widgets.hovered.corner_radius = rounding;

    visuals.widgets.active.bg_fill = Colors::ACCENT;
    visuals.widgets.active.fg_stroke = Stroke::new(1.0, Colors::BG_DARK);
    visuals.widgets.active.corner_radius = rounding;

    visuals.selection.bg_fill = Colors::ACCENT.gamma_multiply(0.4);
    visuals.selection.stroke = Stroke::new(1.0, Colors::ACCENT);

    style.visuals = visuals;
    style
}
