//! Headless test harness: drives a [`Viewer`] with synthetic input at a
//! fixed viewport, no window required.
//!
//! Every input goes through a fresh render first, the same order the host
//! follows (paint, then handle the next pointer event).

use shared::MeshPayload;

use crate::fixtures;
use crate::input::{InputEvent, InputOutcome, Modifiers, PointerButton, ViewerEvent};
use crate::math::DVec2;
use crate::measure::MeasurementSummary;
use crate::state::measurement::VertexRef;
use crate::state::settings::ViewerSettings;
use crate::viewer::{Viewer, DEFAULT_VIEWPORT};
use crate::viewport::camera::Viewport;
use crate::viewport::frame::Frame;

/// Headless test harness: owns a viewer and the viewport it renders into
pub struct TestHarness {
    pub viewer: Viewer,
    viewport: Viewport,
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

impl TestHarness {
    /// Create a harness with default settings and an empty payload.
    pub fn new() -> Self {
        Self {
            viewer: Viewer::new(ViewerSettings::default()),
            viewport: DEFAULT_VIEWPORT,
        }
    }

    /// Create a harness with a built-in fixture loaded
    pub fn with_fixture(name: &str) -> Result<Self, String> {
        let mut h = Self::new();
        h.load_fixture(name)?;
        Ok(h)
    }

    pub fn set_viewport(&mut self, width: f64, height: f64) {
        self.viewport = Viewport::new(width, height);
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    // ── Payload ───────────────────────────────────────────────

    pub fn load_fixture(&mut self, name: &str) -> Result<(), String> {
        let payload = fixtures::by_name(name).ok_or_else(|| format!("Unknown fixture: {name}"))?;
        self.viewer.set_payload(payload);
        Ok(())
    }

    pub fn load_payload(&mut self, payload: MeshPayload) {
        self.viewer.set_payload(payload);
    }

    pub fn load_payload_json(&mut self, json: &str) -> Result<(), String> {
        let payload = MeshPayload::from_json(json).map_err(|e| e.to_string())?;
        self.viewer.set_payload(payload);
        Ok(())
    }

    pub fn vertex_count(&self) -> usize {
        self.viewer.payload().vertex_count()
    }

    // ── Rendering ─────────────────────────────────────────────

    pub fn render(&mut self) -> &Frame {
        self.viewer.render(self.viewport)
    }

    pub fn snapshot_svg(&mut self) -> String {
        self.viewer.render_to_image(self.viewport)
    }

    /// Screen position of a vertex in a freshly rendered frame
    pub fn screen_pos(&mut self, v: VertexRef) -> Option<DVec2> {
        self.render().screen_points.get(v)
    }

    // ── Input ─────────────────────────────────────────────────

    pub fn send(&mut self, event: InputEvent) -> InputOutcome {
        self.render();
        self.viewer.handle_input(event)
    }

    pub fn click_at(&mut self, x: f64, y: f64) -> InputOutcome {
        self.send(InputEvent::Click {
            pos: DVec2::new(x, y),
            button: PointerButton::Primary,
        })
    }

    /// Click exactly on a vertex's projected position
    pub fn click_vertex(&mut self, v: VertexRef) -> Result<InputOutcome, String> {
        let pos = self
            .screen_pos(v)
            .ok_or_else(|| format!("Vertex {v} not found"))?;
        Ok(self.send(InputEvent::Click {
            pos,
            button: PointerButton::Primary,
        }))
    }

    /// Click a sequence of mesh vertices, returning all emitted events
    pub fn click_vertices(&mut self, indices: &[usize]) -> Result<Vec<ViewerEvent>, String> {
        let mut events = Vec::new();
        for &i in indices {
            events.extend(self.click_vertex(VertexRef::Mesh(i))?.events);
        }
        Ok(events)
    }

    pub fn right_click(&mut self) -> InputOutcome {
        self.send(InputEvent::Click {
            pos: DVec2::ZERO,
            button: PointerButton::Secondary,
        })
    }

    pub fn hover(&mut self, x: f64, y: f64) -> InputOutcome {
        self.send(InputEvent::PointerMoved {
            pos: DVec2::new(x, y),
        })
    }

    pub fn drag(&mut self, dx: f64, dy: f64, button: PointerButton, shift: bool) -> InputOutcome {
        self.send(InputEvent::Drag {
            delta: DVec2::new(dx, dy),
            button,
            modifiers: Modifiers { shift },
        })
    }

    pub fn wheel(&mut self, notches: f64) -> InputOutcome {
        self.send(InputEvent::Wheel { notches })
    }

    // ── Measurement ───────────────────────────────────────────

    pub fn set_measurement_mode(&mut self, enabled: bool) {
        self.viewer.set_measurement_mode(enabled);
    }

    pub fn selected(&self) -> Vec<i64> {
        self.viewer
            .selected_vertices()
            .iter()
            .map(|&v| i64::from(v))
            .collect()
    }

    pub fn summary(&self) -> MeasurementSummary {
        self.viewer.measurement_summary()
    }

    pub fn take_events(&mut self) -> Vec<ViewerEvent> {
        self.viewer.take_events()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_fixture() {
        let mut h = TestHarness::new();
        assert!(h.load_fixture("klein_bottle").is_err());
    }

    #[test]
    fn test_click_vertex_out_of_range() {
        let mut h = TestHarness::with_fixture("cube").unwrap();
        h.set_measurement_mode(true);
        assert!(h.click_vertex(VertexRef::Mesh(99)).is_err());
    }

    #[test]
    fn test_click_vertices_collects_events() {
        let mut h = TestHarness::with_fixture("cube").unwrap();
        h.set_measurement_mode(true);
        let events = h.click_vertices(&[0, 1, 5]).unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(h.selected(), vec![0, 1, 5]);
    }

    #[test]
    fn test_centroid_pickable_with_broken_vertex() {
        let mut cube = fixtures::unit_cube();
        cube.vertices.push([f64::NAN, 0.0, 0.0]);
        let mut h = TestHarness::new();
        h.load_payload(cube);
        h.set_measurement_mode(true);

        let out = h.click_vertex(VertexRef::Centroid).unwrap();
        assert!(out.redraw);
        assert_eq!(h.selected(), vec![-1]);
    }

    #[test]
    fn test_load_payload_json() {
        let mut h = TestHarness::new();
        let json = r#"{"vertices": [[0,0,0],[1,0,0],[0,1,0]], "faces": [[0,1,2]]}"#;
        h.load_payload_json(json).unwrap();
        assert_eq!(h.vertex_count(), 3);
        assert!(h.load_payload_json("{not json").is_err());
    }
}
