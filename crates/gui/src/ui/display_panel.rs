//! Layer toggles, measurement controls and the measurement readout

use egui::Ui;
use polyview_lib::state::Layer;
use polyview_lib::viewport::overlays::summary_lines;

use crate::app::AppState;
use crate::i18n::t;

fn layer_label(layer: Layer) -> &'static str {
    match layer {
        Layer::Faces => t("layer.faces"),
        Layer::Edges => t("layer.edges"),
        Layer::Vertices => t("layer.vertices"),
        Layer::Labels => t("layer.labels"),
        Layer::Axes => t("layer.axes"),
        Layer::Insphere => t("layer.insphere"),
        Layer::Midsphere => t("layer.midsphere"),
        Layer::Circumsphere => t("layer.circumsphere"),
        Layer::Dual => t("layer.dual"),
    }
}

pub fn show(ui: &mut Ui, state: &mut AppState) {
    shape_section(ui, state);
    ui.separator();
    layers_section(ui, state);
    ui.separator();
    measurement_section(ui, state);
}

fn shape_section(ui: &mut Ui, state: &AppState) {
    let payload = state.viewer.payload();
    ui.heading(t("panel.shape"));
    if let Some(name) = &payload.metadata.name {
        ui.label(name);
    }
    egui::Grid::new("shape_info").num_columns(2).show(ui, |ui| {
        ui.weak(t("status.vertices"));
        ui.label(payload.vertex_count().to_string());
        ui.end_row();
        ui.weak(t("status.faces"));
        ui.label(payload.faces.len().to_string());
        ui.end_row();
        for (key, value) in &payload.metadata.scalars {
            ui.weak(key);
            ui.monospace(format!("{value:.4}"));
            ui.end_row();
        }
    });
}

fn layers_section(ui: &mut Ui, state: &mut AppState) {
    ui.heading(t("panel.display"));
    let has_dual = state.viewer.payload().dual.is_some();
    for &layer in Layer::all() {
        let mut visible = state.viewer.layers().get(layer);
        let enabled = layer != Layer::Dual || has_dual;
        if ui
            .add_enabled(enabled, egui::Checkbox::new(&mut visible, layer_label(layer)))
            .changed()
        {
            state.viewer.set_layer(layer, visible);
        }
    }
}

fn measurement_section(ui: &mut Ui, state: &mut AppState) {
    ui.heading(t("panel.measurement"));

    let mut measuring = state.viewer.measurement_mode();
    if ui.checkbox(&mut measuring, t("measure.mode")).changed() {
        state.viewer.set_measurement_mode(measuring);
    }
    if ui
        .add_enabled(
            !state.viewer.selected_vertices().is_empty(),
            egui::Button::new(t("measure.clear")),
        )
        .clicked()
    {
        state.viewer.clear_measurement();
        state.last_segment = None;
    }

    if !measuring && state.viewer.selected_vertices().is_empty() {
        return;
    }

    let summary = state.viewer.measurement_summary();
    let precision = state.viewer.settings().interaction.precision;
    ui.add_space(4.0);
    for line in summary_lines(&summary, state.viewer.selection(), precision) {
        ui.monospace(line);
    }

    if !summary.angles.is_empty() {
        ui.add_space(4.0);
        ui.label(t("measure.angles"));
        for angle in &summary.angles {
            ui.monospace(format!("  {}: {:.2}°", angle.vertex, angle.degrees));
        }
    }
}
