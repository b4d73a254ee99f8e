//! The viewer facade: owns payload, camera, settings and measurement state,
//! and is the only entry point the host (or a test) talks to.

use shared::{Bounds, MeshPayload};

use crate::export::{frame_to_svg, SvgOptions};
use crate::input::{handle_input, InputContext, InputEvent, InputOutcome, ViewerEvent};
use crate::math::vec3;
use crate::measure::MeasurementSummary;
use crate::state::measurement::{MeasurementSelection, VertexRef};
use crate::state::settings::{Layer, LayerVisibility, ViewerSettings};
use crate::viewport::camera::{CameraState, Viewport};
use crate::viewport::frame::Frame;
use crate::viewport::renderer::{render_frame, RenderInput};

/// Viewport assumed until the host reports a real size
pub const DEFAULT_VIEWPORT: Viewport = Viewport {
    width: 800.0,
    height: 600.0,
};

pub struct Viewer {
    payload: MeshPayload,
    camera: CameraState,
    settings: ViewerSettings,
    selection: MeasurementSelection,
    measuring: bool,
    viewport: Viewport,
    last_frame: Option<Frame>,
    events: Vec<ViewerEvent>,
}

impl Default for Viewer {
    fn default() -> Self {
        Self::new(ViewerSettings::default())
    }
}

impl Viewer {
    pub fn new(settings: ViewerSettings) -> Self {
        Self {
            payload: MeshPayload::default(),
            camera: CameraState::default(),
            settings,
            selection: MeasurementSelection::default(),
            measuring: false,
            viewport: DEFAULT_VIEWPORT,
            last_frame: None,
            events: Vec::new(),
        }
    }

    // ── Payload ─────────────────────────────────────────────

    /// Replace the payload and fit the camera to it.
    ///
    /// Invalid payloads are accepted with a warning; bad indices are skipped
    /// at draw time. A different vertex count invalidates the selection.
    pub fn set_payload(&mut self, payload: MeshPayload) {
        if let Err(e) = payload.validate() {
            tracing::warn!("payload has invalid geometry: {e}");
        }

        if payload.vertex_count() != self.payload.vertex_count() && !self.selection.is_empty() {
            tracing::debug!("vertex count changed, clearing measurement");
            self.selection.clear();
        }
        // Hover may point at a vertex that no longer exists
        self.selection.set_hovered(None);

        tracing::info!(
            name = payload.metadata.name.as_deref().unwrap_or("unnamed"),
            vertices = payload.vertex_count(),
            faces = payload.faces.len(),
            "payload loaded"
        );
        self.payload = payload;
        self.last_frame = None;
        self.fit_to_view();
    }

    pub fn payload(&self) -> &MeshPayload {
        &self.payload
    }

    // ── Camera ──────────────────────────────────────────────

    pub fn camera(&self) -> &CameraState {
        &self.camera
    }

    pub fn set_camera_angles(&mut self, yaw_deg: f64, pitch_deg: f64) {
        self.camera.set_angles(yaw_deg, pitch_deg);
    }

    pub fn set_distance(&mut self, distance: f64) {
        self.camera.set_distance(distance);
    }

    pub fn zoom_in(&mut self) {
        self.camera.zoom(self.settings.interaction.zoom_step);
    }

    pub fn zoom_out(&mut self) {
        self.camera.zoom(1.0 / self.settings.interaction.zoom_step);
    }

    /// Default angles, no pan, orbiting the payload's box center
    pub fn reset_view(&mut self) {
        self.camera.reset(self.fit_bounds().as_ref());
        tracing::info!(distance = self.camera.distance, "view reset");
    }

    /// Keep the angles, fit distance to the payload and recenter on it
    pub fn fit_to_view(&mut self) {
        match self.fit_bounds() {
            Some(b) => self.camera.fit_to_bounds(&b),
            None => self.camera.reset(None),
        }
    }

    fn fit_bounds(&self) -> Option<Bounds> {
        self.payload
            .bounds()
            .filter(|b| b.diagonal().is_finite() && b.diagonal() > 0.0)
    }

    // ── Layers / settings ───────────────────────────────────

    pub fn set_layer(&mut self, layer: Layer, visible: bool) {
        self.settings.layers.set(layer, visible);
    }

    pub fn layers(&self) -> &LayerVisibility {
        &self.settings.layers
    }

    pub fn settings(&self) -> &ViewerSettings {
        &self.settings
    }

    // ── Measurement ─────────────────────────────────────────

    /// Leaving measurement mode drops the selection
    pub fn set_measurement_mode(&mut self, enabled: bool) {
        if self.measuring == enabled {
            return;
        }
        tracing::debug!(enabled, "measurement mode");
        self.measuring = enabled;
        if !enabled {
            self.selection.clear();
        }
    }

    pub fn measurement_mode(&self) -> bool {
        self.measuring
    }

    pub fn clear_measurement(&mut self) {
        self.selection.clear();
    }

    pub fn selection(&self) -> &MeasurementSelection {
        &self.selection
    }

    pub fn selected_vertices(&self) -> &[VertexRef] {
        self.selection.selected_vertices()
    }

    pub fn apex_vertex(&self) -> Option<VertexRef> {
        self.selection.apex()
    }

    pub fn hovered_vertex(&self) -> Option<VertexRef> {
        self.selection.hovered()
    }

    pub fn measurement_summary(&self) -> MeasurementSummary {
        MeasurementSummary::compute(&self.payload, vec3(self.payload.centroid()), &self.selection)
    }

    // ── Input / rendering ───────────────────────────────────

    /// Apply one input event against the last rendered frame.
    ///
    /// Emitted events are also queued for [`Viewer::take_events`].
    pub fn handle_input(&mut self, event: InputEvent) -> InputOutcome {
        let ctx = InputContext {
            payload: &self.payload,
            frame: self.last_frame.as_ref(),
            viewport: self.viewport,
            interaction: &self.settings.interaction,
            measuring: self.measuring,
        };
        let outcome = handle_input(event, &ctx, &mut self.camera, &mut self.selection);
        self.events.extend(outcome.events.iter().cloned());
        outcome
    }

    /// Render a frame and keep it for picking
    pub fn render(&mut self, viewport: Viewport) -> &Frame {
        self.viewport = viewport;
        let frame = render_frame(&RenderInput {
            payload: &self.payload,
            camera: &self.camera,
            viewport,
            settings: &self.settings,
            selection: &self.selection,
            measuring: self.measuring,
        });
        self.last_frame.insert(frame)
    }

    pub fn last_frame(&self) -> Option<&Frame> {
        self.last_frame.as_ref()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Render and serialise the frame as a standalone SVG document
    pub fn render_to_image(&mut self, viewport: Viewport) -> String {
        let background = self.settings.theme.background;
        let frame = self.render(viewport);
        frame_to_svg(frame, &SvgOptions { background: Some(background) })
    }

    pub fn take_events(&mut self) -> Vec<ViewerEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use crate::input::PointerButton;
    use crate::math::DVec2;

    fn click(viewer: &mut Viewer, i: usize) {
        let pos = viewer.camera().project(viewer.payload().vertices[i], viewer.viewport());
        viewer.render(DEFAULT_VIEWPORT);
        viewer.handle_input(InputEvent::Click {
            pos,
            button: PointerButton::Primary,
        });
    }

    #[test]
    fn test_set_payload_fits_camera() {
        let mut viewer = Viewer::default();
        viewer.set_camera_angles(10.0, 10.0);
        viewer.set_payload(fixtures::unit_cube());
        assert!((viewer.camera().distance - 3f64.sqrt()).abs() < 1e-9);
        assert_eq!(viewer.camera().yaw_deg, 10.0);
    }

    #[test]
    fn test_reset_view() {
        let mut viewer = Viewer::default();
        viewer.set_payload(fixtures::octahedron());
        viewer.set_camera_angles(100.0, -40.0);
        viewer.zoom_in();
        viewer.reset_view();
        let cam = viewer.camera();
        assert_eq!(cam.yaw_deg, CameraState::default().yaw_deg);
        assert!((cam.distance - 6f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn test_off_origin_payload_fits_on_screen() {
        let mut cube = fixtures::unit_cube();
        for v in &mut cube.vertices {
            v[0] += 50.0;
        }
        let mut viewer = Viewer::default();
        viewer.set_payload(cube);
        let frame = viewer.render(DEFAULT_VIEWPORT);
        for p in &frame.screen_points.vertices {
            assert!(p.x > 0.0 && p.x < DEFAULT_VIEWPORT.width, "{p:?}");
            assert!(p.y > 0.0 && p.y < DEFAULT_VIEWPORT.height, "{p:?}");
        }
        let centroid = frame.screen_points.centroid;
        assert!((centroid - DEFAULT_VIEWPORT.center()).length() < 1e-9);
    }

    #[test]
    fn test_zoom_in_out_inverse() {
        let mut viewer = Viewer::default();
        viewer.set_payload(fixtures::unit_cube());
        let d = viewer.camera().distance;
        viewer.zoom_in();
        assert!(viewer.camera().distance < d);
        viewer.zoom_out();
        assert!((viewer.camera().distance - d).abs() < 1e-9);
    }

    #[test]
    fn test_payload_swap_clears_selection() {
        let mut viewer = Viewer::default();
        viewer.set_payload(fixtures::unit_cube());
        viewer.set_measurement_mode(true);
        click(&mut viewer, 0);
        click(&mut viewer, 1);
        assert_eq!(viewer.selected_vertices().len(), 2);

        viewer.set_payload(fixtures::tetrahedron());
        assert!(viewer.selected_vertices().is_empty());
    }

    #[test]
    fn test_payload_swap_same_count_keeps_selection() {
        let mut viewer = Viewer::default();
        viewer.set_payload(fixtures::unit_cube());
        viewer.set_measurement_mode(true);
        click(&mut viewer, 0);
        viewer.set_payload(fixtures::unit_cube());
        assert_eq!(viewer.selected_vertices(), &[VertexRef::Mesh(0)]);
    }

    #[test]
    fn test_leaving_measure_mode_clears_selection() {
        let mut viewer = Viewer::default();
        viewer.set_payload(fixtures::unit_cube());
        viewer.set_measurement_mode(true);
        click(&mut viewer, 0);
        click(&mut viewer, 1);
        viewer.set_measurement_mode(true);
        assert_eq!(viewer.selected_vertices().len(), 2);

        viewer.set_measurement_mode(false);
        assert!(viewer.selected_vertices().is_empty());
        assert_eq!(viewer.hovered_vertex(), None);
    }

    #[test]
    fn test_events_queued() {
        let mut viewer = Viewer::default();
        viewer.set_payload(fixtures::unit_cube());
        viewer.set_measurement_mode(true);
        click(&mut viewer, 0);
        click(&mut viewer, 1);
        let events = viewer.take_events();
        assert_eq!(events.len(), 1);
        assert!(viewer.take_events().is_empty());
    }

    #[test]
    fn test_input_before_first_render() {
        let mut viewer = Viewer::default();
        viewer.set_payload(fixtures::unit_cube());
        viewer.set_measurement_mode(true);
        let out = viewer.handle_input(InputEvent::Click {
            pos: DVec2::new(400.0, 300.0),
            button: PointerButton::Primary,
        });
        assert!(!out.redraw);
    }

    #[test]
    fn test_render_to_image() {
        let mut viewer = Viewer::default();
        viewer.set_payload(fixtures::unit_cube());
        let svg = viewer.render_to_image(DEFAULT_VIEWPORT);
        assert!(svg.starts_with("<svg"));
        assert!(viewer.last_frame().is_some());
    }
}
