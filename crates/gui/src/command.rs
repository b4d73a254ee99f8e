//! JSON command protocol for scripted viewer sessions.
//!
//! Commands run against a [`TestHarness`], so a script sees exactly what
//! the interactive viewer would do with the same pointer input.

use serde::{Deserialize, Serialize};
use shared::MeshPayload;

use crate::harness::TestHarness;
use crate::input::PointerButton;
use crate::state::measurement::VertexRef;
use crate::state::settings::Layer;

fn primary() -> PointerButton {
    PointerButton::Primary
}

/// A command a script can execute.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum ViewerCommand {
    /// Load a built-in fixture by name
    LoadFixture {
        name: String,
    },
    /// Replace the payload
    LoadPayload {
        payload: MeshPayload,
    },
    /// Set camera angles, and optionally the distance
    SetCamera {
        yaw: f64,
        pitch: f64,
        #[serde(default)]
        distance: Option<f64>,
    },
    /// Wheel zoom by a number of notches (positive zooms in)
    Zoom {
        notches: f64,
    },
    /// Drag in the viewport by a pixel delta
    Drag {
        dx: f64,
        dy: f64,
        #[serde(default = "primary")]
        button: PointerButton,
        #[serde(default)]
        shift: bool,
    },
    ResetView,
    FitView,
    SetLayer {
        layer: Layer,
        visible: bool,
    },
    SetMeasurementMode {
        enabled: bool,
    },
    /// Click on a vertex (-1 is the centroid)
    ClickVertex {
        index: VertexRef,
    },
    /// Primary click at a viewport position
    ClickAt {
        x: f64,
        y: f64,
    },
    /// Undo the last measurement step
    RightClick,
    ClearMeasurement,
    /// Report payload, camera and measurement state
    Inspect,
    /// Render the current view as SVG
    Snapshot,
    /// Current payload as pretty JSON
    ExportPayload,
}

/// Response from executing a command.
#[derive(Debug, Serialize, Deserialize)]
pub struct CommandResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl CommandResponse {
    fn ok() -> Self {
        Self {
            success: true,
            error: None,
            data: None,
        }
    }

    fn ok_with_data(data: serde_json::Value) -> Self {
        Self {
            success: true,
            error: None,
            data: Some(data),
        }
    }

    fn err(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(msg.into()),
            data: None,
        }
    }
}

/// Selection state plus the events queued by a click
fn click_response(harness: &mut TestHarness, changed: bool) -> CommandResponse {
    match serde_json::to_value(harness.take_events()) {
        Ok(events) => CommandResponse::ok_with_data(serde_json::json!({
            "changed": changed,
            "selected": harness.selected(),
            "events": events,
        })),
        Err(e) => {
            tracing::warn!("failed to serialize viewer events: {e}");
            CommandResponse::err(format!("Failed to serialize events: {e}"))
        }
    }
}

/// Execute a single command on the harness.
pub fn execute_command(harness: &mut TestHarness, cmd: ViewerCommand) -> CommandResponse {
    match cmd {
        ViewerCommand::LoadFixture { name } => match harness.load_fixture(&name) {
            Ok(()) => CommandResponse::ok_with_data(serde_json::json!({
                "vertices": harness.vertex_count(),
            })),
            Err(e) => CommandResponse::err(e),
        },

        ViewerCommand::LoadPayload { payload } => {
            harness.load_payload(payload);
            CommandResponse::ok_with_data(serde_json::json!({
                "vertices": harness.vertex_count(),
            }))
        }

        ViewerCommand::SetCamera {
            yaw,
            pitch,
            distance,
        } => {
            harness.viewer.set_camera_angles(yaw, pitch);
            if let Some(d) = distance {
                harness.viewer.set_distance(d);
            }
            CommandResponse::ok_with_data(serde_json::json!({ "camera": harness.viewer.camera() }))
        }

        ViewerCommand::Zoom { notches } => {
            harness.wheel(notches);
            CommandResponse::ok_with_data(serde_json::json!({
                "distance": harness.viewer.camera().distance,
            }))
        }

        ViewerCommand::Drag {
            dx,
            dy,
            button,
            shift,
        } => {
            harness.drag(dx, dy, button, shift);
            CommandResponse::ok_with_data(serde_json::json!({ "camera": harness.viewer.camera() }))
        }

        ViewerCommand::ResetView => {
            harness.viewer.reset_view();
            CommandResponse::ok()
        }

        ViewerCommand::FitView => {
            harness.viewer.fit_to_view();
            CommandResponse::ok()
        }

        ViewerCommand::SetLayer { layer, visible } => {
            harness.viewer.set_layer(layer, visible);
            CommandResponse::ok()
        }

        ViewerCommand::SetMeasurementMode { enabled } => {
            harness.set_measurement_mode(enabled);
            CommandResponse::ok()
        }

        ViewerCommand::ClickVertex { index } => match harness.click_vertex(index) {
            Ok(outcome) => click_response(harness, outcome.redraw),
            Err(e) => CommandResponse::err(e),
        },

        ViewerCommand::ClickAt { x, y } => {
            let outcome = harness.click_at(x, y);
            click_response(harness, outcome.redraw)
        }

        ViewerCommand::RightClick => {
            let outcome = harness.right_click();
            CommandResponse::ok_with_data(serde_json::json!({
                "changed": outcome.redraw,
                "selected": harness.selected(),
            }))
        }

        ViewerCommand::ClearMeasurement => {
            harness.viewer.clear_measurement();
            CommandResponse::ok()
        }

        ViewerCommand::Inspect => {
            let viewer = &harness.viewer;
            let payload = viewer.payload();
            CommandResponse::ok_with_data(serde_json::json!({
                "name": payload.metadata.name,
                "vertex_count": payload.vertex_count(),
                "edge_count": payload.render_edges().len(),
                "face_count": payload.faces.len(),
                "has_dual": payload.dual.is_some(),
                "camera": viewer.camera(),
                "layers": viewer.layers(),
                "measuring": viewer.measurement_mode(),
                "selected": harness.selected(),
                "loop_closed": viewer.selection().loop_closed(),
                "apex": viewer.apex_vertex(),
                "measurement": viewer.measurement_summary(),
            }))
        }

        ViewerCommand::Snapshot => {
            let svg = harness.snapshot_svg();
            CommandResponse::ok_with_data(serde_json::json!({ "svg": svg }))
        }

        ViewerCommand::ExportPayload => match harness.viewer.payload().to_json_pretty() {
            Ok(json) => CommandResponse::ok_with_data(serde_json::json!({ "payload": json })),
            Err(e) => CommandResponse::err(e.to_string()),
        },
    }
}

/// Parse and execute a single JSON command string.
pub fn execute_json(harness: &mut TestHarness, json: &str) -> Result<CommandResponse, String> {
    let cmd: ViewerCommand =
        serde_json::from_str(json).map_err(|e| format!("Invalid command JSON: {e}"))?;
    Ok(execute_command(harness, cmd))
}

/// Parse and execute multiple JSON commands (array).
pub fn execute_json_batch(
    harness: &mut TestHarness,
    json: &str,
) -> Result<Vec<CommandResponse>, String> {
    let cmds: Vec<ViewerCommand> =
        serde_json::from_str(json).map_err(|e| format!("Invalid commands JSON: {e}"))?;
    Ok(cmds
        .into_iter()
        .map(|cmd| execute_command(harness, cmd))
        .collect())
}
