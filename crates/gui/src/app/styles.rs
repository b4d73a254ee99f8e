//! Application style derived from the viewer color theme

use eframe::egui;
use polyview_lib::state::ColorTheme;
use shared::Rgba;

const FONT_SIZE: f32 = 14.0;

fn color(c: Rgba) -> egui::Color32 {
    egui::Color32::from_rgb(c.r(), c.g(), c.b())
}

fn lighten(c: Rgba, amount: u8) -> egui::Color32 {
    egui::Color32::from_rgb(
        c.r().saturating_add(amount),
        c.g().saturating_add(amount),
        c.b().saturating_add(amount),
    )
}

/// Dark visuals with panels a shade lighter than the viewport
pub fn configure_styles(ctx: &egui::Context, theme: &ColorTheme) {
    let mut style = (*ctx.style()).clone();
    style.visuals = egui::Visuals::dark();

    style.visuals.window_corner_radius = egui::CornerRadius::same(6);
    style.visuals.menu_corner_radius = egui::CornerRadius::same(4);
    for widget in [
        &mut style.visuals.widgets.noninteractive,
        &mut style.visuals.widgets.inactive,
        &mut style.visuals.widgets.hovered,
        &mut style.visuals.widgets.active,
    ] {
        widget.corner_radius = egui::CornerRadius::same(3);
    }

    style.spacing.item_spacing = egui::vec2(6.0, 4.0);
    style.spacing.button_padding = egui::vec2(6.0, 3.0);
    style.spacing.menu_margin = egui::Margin::same(4);

    style.visuals.panel_fill = lighten(theme.background, 8);
    style.visuals.window_fill = lighten(theme.background, 12);
    style.visuals.extreme_bg_color = color(theme.background);
    style.visuals.selection.bg_fill = color(theme.vertex_selected).gamma_multiply(0.5);
    style.visuals.hyperlink_color = color(theme.measure_path);

    for (text_style, font) in [
        (egui::TextStyle::Body, egui::FontId::proportional(FONT_SIZE)),
        (egui::TextStyle::Button, egui::FontId::proportional(FONT_SIZE)),
        (egui::TextStyle::Small, egui::FontId::proportional(FONT_SIZE * 0.85)),
        (egui::TextStyle::Heading, egui::FontId::proportional(FONT_SIZE * 1.2)),
        (egui::TextStyle::Monospace, egui::FontId::monospace(FONT_SIZE * 0.9)),
    ] {
        style.text_styles.insert(text_style, font);
    }

    ctx.set_style(style);
}
