//! Application style configuration

use eframe::egui;
use egui::Color32;

use crate::state::SessionState;

/// Accent for the cutting plane in panels, matching the viewport widget
pub const PLANE_ACCENT: Color32 = Color32::from_rgb(240, 150, 40);

/// Configure the dark theme with the given font size
pub fn configure_styles(ctx: &egui::Context, font_size: f32) {
    let mut style = (*ctx.style()).clone();
    style.visuals = egui::Visuals::dark();

    let small = egui::CornerRadius::same(3);
    style.visuals.window_corner_radius = egui::CornerRadius::same(6);
    style.visuals.menu_corner_radius = egui::CornerRadius::same(4);
    for widget in [
        &mut style.visuals.widgets.noninteractive,
        &mut style.visuals.widgets.inactive,
        &mut style.visuals.widgets.hovered,
        &mut style.visuals.widgets.active,
    ] {
        widget.corner_radius = small;
    }

    style.spacing.item_spacing = egui::vec2(6.0, 4.0);
    style.spacing.button_padding = egui::vec2(8.0, 4.0);
    style.spacing.menu_margin = egui::Margin::same(4);

    style.visuals.panel_fill = Color32::from_rgb(30, 30, 34);
    style.visuals.window_fill = Color32::from_rgb(35, 35, 40);
    style.visuals.selection.bg_fill = Color32::from_rgb(40, 80, 140);

    apply_text_styles(&mut style, font_size);
    ctx.set_style(style);
}

/// Apply font size to all text styles
pub fn apply_font_size(ctx: &egui::Context, font_size: f32) {
    let mut style = (*ctx.style()).clone();
    apply_text_styles(&mut style, font_size);
    ctx.set_style(style);
}

fn apply_text_styles(style: &mut egui::Style, font_size: f32) {
    use egui::{FontId, TextStyle};

    for (text_style, font) in [
        (TextStyle::Body, FontId::proportional(font_size)),
        (TextStyle::Button, FontId::proportional(font_size)),
        (TextStyle::Small, FontId::proportional(font_size * 0.85)),
        (TextStyle::Heading, FontId::proportional(font_size * 1.3)),
        (TextStyle::Monospace, FontId::monospace(font_size)),
    ] {
        style.text_styles.insert(text_style, font);
    }
}

/// Status bar color for each session state
pub fn state_color(state: SessionState) -> Color32 {
    match state {
        SessionState::Empty => Color32::from_rgb(130, 130, 140),
        SessionState::Loaded => Color32::from_rgb(150, 200, 150),
        SessionState::Clipping => PLANE_ACCENT,
        SessionState::Committed => Color32::from_rgb(120, 170, 240),
    }
}
