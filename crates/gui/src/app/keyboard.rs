//! Keyboard shortcut handling

use eframe::egui;

use super::AppState;

/// Handle keyboard shortcuts for the application
pub fn handle_keyboard(ctx: &egui::Context, state: &mut AppState) {
    // Don't handle shortcuts when a text field is focused
    if ctx.memory(|m| m.focused().is_some()) {
        return;
    }

    ctx.input(|i| {
        if i.modifiers.command {
            return;
        }
        // R: reset camera
        if i.key_pressed(egui::Key::R) {
            state.viewer.reset_view();
        }
        // F: fit payload into view
        if i.key_pressed(egui::Key::F) {
            state.viewer.fit_to_view();
        }
        // M: toggle measurement mode
        if i.key_pressed(egui::Key::M) {
            let enabled = !state.viewer.measurement_mode();
            state.viewer.set_measurement_mode(enabled);
        }
        // Escape: clear measurement
        if i.key_pressed(egui::Key::Escape) {
            state.viewer.clear_measurement();
            state.last_segment = None;
        }
        // +/-: zoom
        if i.key_pressed(egui::Key::Plus) || i.key_pressed(egui::Key::Equals) {
            state.viewer.zoom_in();
        }
        if i.key_pressed(egui::Key::Minus) {
            state.viewer.zoom_out();
        }
    });
}
