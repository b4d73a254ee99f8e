//! Integration tests for the headless harness: camera, layers, rendering.

use polyview_lib::harness::TestHarness;
use polyview_lib::input::PointerButton;
use polyview_lib::state::{Layer, VertexRef};
use polyview_lib::viewport::frame::{Pass, Shape};

#[test]
fn test_default_fixture_frame() {
    let mut h = TestHarness::with_fixture("cube").unwrap();
    let frame = h.render();
    assert_eq!(frame.count(Pass::Faces), 6);
    assert_eq!(frame.count(Pass::Edges), 12);
    assert_eq!(frame.screen_points.len(), 8);
}

#[test]
fn test_projection_deterministic() {
    let mut h = TestHarness::with_fixture("octahedron").unwrap();
    let a = h.render().clone();
    let b = h.render().clone();
    assert_eq!(a, b);
}

#[test]
fn test_full_yaw_turn_restores_view() {
    let mut h = TestHarness::with_fixture("tetrahedron").unwrap();
    let before = h.render().screen_points.clone();

    let yaw = h.viewer.camera().yaw_deg;
    let pitch = h.viewer.camera().pitch_deg;
    h.viewer.set_camera_angles(yaw + 360.0, pitch);
    let after = h.render().screen_points.clone();

    for (p, q) in before.vertices.iter().zip(&after.vertices) {
        assert!((*p - *q).length() < 1e-9);
    }
}

#[test]
fn test_wheel_and_drag() {
    let mut h = TestHarness::with_fixture("cube").unwrap();
    let d = h.viewer.camera().distance;

    assert!(h.wheel(1.0).redraw);
    assert!(h.viewer.camera().distance < d);

    let yaw = h.viewer.camera().yaw_deg;
    h.drag(10.0, 0.0, PointerButton::Primary, false);
    assert!(h.viewer.camera().yaw_deg != yaw);

    h.drag(10.0, 0.0, PointerButton::Primary, true);
    assert!(h.viewer.camera().pan_x > 0.0);

    h.viewer.fit_to_view();
    assert_eq!(h.viewer.camera().pan_x, 0.0);
    assert!((h.viewer.camera().distance - d).abs() < 1e-9);
}

#[test]
fn test_pan_moves_model_with_pointer() {
    let mut h = TestHarness::with_fixture("cube").unwrap();
    let before = h.screen_pos(VertexRef::Mesh(0)).unwrap();
    h.drag(25.0, -15.0, PointerButton::Middle, false);
    let after = h.screen_pos(VertexRef::Mesh(0)).unwrap();
    assert!((after.x - before.x - 25.0).abs() < 1e-9);
    assert!((after.y - before.y + 15.0).abs() < 1e-9);
}

#[test]
fn test_sphere_layers() {
    let mut h = TestHarness::with_fixture("cube").unwrap();
    assert_eq!(h.render().count(Pass::Spheres), 0);

    h.viewer.set_layer(Layer::Insphere, true);
    h.viewer.set_layer(Layer::Circumsphere, true);
    let frame = h.render();
    assert_eq!(frame.count(Pass::Spheres), 2);

    let radii: Vec<f64> = frame
        .in_pass(Pass::Spheres)
        .filter_map(|s| match s {
            Shape::DashedCircle { radius, .. } => Some(*radius / frame.scale),
            _ => None,
        })
        .collect();
    assert!((radii[0] - 0.5).abs() < 1e-9);
    assert!((radii[1] - 3f64.sqrt() / 2.0).abs() < 1e-9);
}

#[test]
fn test_dense_sphere_skips_plain_markers() {
    let mut h = TestHarness::with_fixture("point_sphere").unwrap();
    assert_eq!(h.render().count(Pass::Vertices), 0);

    h.set_measurement_mode(true);
    let pos = h.screen_pos(VertexRef::Mesh(0)).unwrap();
    h.hover(pos.x, pos.y);
    // Hovered marker and centroid marker only
    assert_eq!(h.render().count(Pass::Vertices), 2);
}

#[test]
fn test_measure_overlay_only_when_relevant() {
    let mut h = TestHarness::with_fixture("cube").unwrap();
    assert_eq!(h.render().count(Pass::Measurement), 0);

    h.set_measurement_mode(true);
    assert!(h.render().count(Pass::Measurement) > 0);
}

#[test]
fn test_snapshot_svg() {
    let mut h = TestHarness::with_fixture("cube_dual").unwrap();
    let svg = h.snapshot_svg();
    assert!(svg.starts_with("<svg"));
    assert_eq!(svg.matches("<polygon").count(), 6 + 8);
}

#[test]
fn test_viewport_resize() {
    let mut h = TestHarness::with_fixture("cube").unwrap();
    h.set_viewport(400.0, 1000.0);
    let frame = h.render();
    assert_eq!(frame.viewport.width, 400.0);
    // Scale follows the shorter side
    assert!((frame.scale - 400.0 / (2.0 * 3f64.sqrt())).abs() < 1e-9);
}
