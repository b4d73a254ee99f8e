//! Application menu bar

use eframe::egui;
use polyview_lib::export::write_svg;
use shared::MeshPayload;

use super::AppState;
use crate::fixtures::FIXTURE_NAMES;
use crate::i18n::{lang, set_lang, t, Lang};

/// Show the file menu
pub fn file_menu(ui: &mut egui::Ui, state: &mut AppState) {
    ui.menu_button(t("menu.file"), |ui| {
        if ui.button(t("menu.open")).clicked() {
            ui.close_menu();
            if let Some(path) = rfd::FileDialog::new()
                .set_title(t("menu.open_title"))
                .add_filter("JSON", &["json"])
                .pick_file()
            {
                match std::fs::read_to_string(&path) {
                    Ok(json) => match MeshPayload::from_json(&json) {
                        Ok(payload) => {
                            state.load_payload(payload);
                            tracing::info!("Loaded payload from {}", path.display());
                        }
                        Err(e) => tracing::error!("Failed to parse payload: {e}"),
                    },
                    Err(e) => tracing::error!("Failed to read file: {e}"),
                }
            }
        }
        if ui.button(t("menu.snapshot")).clicked() {
            ui.close_menu();
            if let Some(path) = rfd::FileDialog::new()
                .set_title(t("menu.snapshot_title"))
                .add_filter("SVG", &["svg"])
                .set_file_name("polyview.svg")
                .save_file()
            {
                let viewport = state.viewer.viewport();
                let svg = state.viewer.render_to_image(viewport);
                if let Err(e) = write_svg(&path, &svg) {
                    tracing::error!("{e}");
                }
            }
        }
        ui.separator();
        if ui.button(t("menu.quit")).clicked() {
            ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
        }
    });
}

/// Built-in shapes
pub fn shapes_menu(ui: &mut egui::Ui, state: &mut AppState) {
    ui.menu_button(t("menu.shapes"), |ui| {
        for name in FIXTURE_NAMES {
            if ui.button(name.replace('_', " ")).clicked() {
                state.load_fixture(name);
                ui.close_menu();
            }
        }
    });
}

/// Show the view menu
pub fn view_menu(ui: &mut egui::Ui, state: &mut AppState) {
    ui.menu_button(t("menu.view"), |ui| {
        ui.checkbox(&mut state.panels.display, t("menu.display_panel"));

        let mut measuring = state.viewer.measurement_mode();
        if ui.checkbox(&mut measuring, t("measure.mode")).changed() {
            state.viewer.set_measurement_mode(measuring);
        }
        ui.separator();

        if ui.button(t("menu.reset_camera")).clicked() {
            state.viewer.reset_view();
            ui.close_menu();
        }
        if ui.button(t("menu.fit")).clicked() {
            state.viewer.fit_to_view();
            ui.close_menu();
        }
        if ui.button(t("menu.zoom_in")).clicked() {
            state.viewer.zoom_in();
        }
        if ui.button(t("menu.zoom_out")).clicked() {
            state.viewer.zoom_out();
        }
    });
}

/// Interface language
pub fn language_menu(ui: &mut egui::Ui) {
    ui.menu_button(t("menu.language"), |ui| {
        if ui.selectable_label(lang() == Lang::En, "English").clicked() {
            set_lang(Lang::En);
            ui.close_menu();
        }
        if ui.selectable_label(lang() == Lang::Ru, "Русский").clicked() {
            set_lang(Lang::Ru);
            ui.close_menu();
        }
    });
}
