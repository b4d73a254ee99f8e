use egui::Ui;
use polyview_lib::input::ViewerEvent;

use crate::app::AppState;
use crate::i18n::t;

pub fn show(ui: &mut Ui, state: &AppState) {
    ui.horizontal(|ui| {
        let payload = state.viewer.payload();
        ui.weak(format!("{}: {}", t("status.vertices"), payload.vertex_count()));
        ui.weak(format!("{}: {}", t("status.faces"), payload.faces.len()));

        ui.separator();

        if state.viewer.measurement_mode() {
            let selected = state.viewer.selected_vertices().len();
            if selected > 0 {
                ui.label(format!("{}: {selected}", t("status.selected")));
                if let Some(ViewerEvent::MeasurementCompleted { from, to, distance }) =
                    &state.last_segment
                {
                    let precision = state.viewer.settings().interaction.precision;
                    ui.separator();
                    ui.label(format!(
                        "{} {from}-{to}: {distance:.precision$}",
                        t("measure.last")
                    ));
                }
            } else {
                ui.colored_label(egui::Color32::from_rgb(255, 200, 50), t("hint.measure"));
            }
        } else {
            ui.weak(t("hint.nav"));
        }

        // Right-aligned version
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.weak(concat!("polyview v", env!("CARGO_PKG_VERSION")));
        });
    });
}
