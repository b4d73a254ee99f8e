//! Software renderer: composes one frame of the viewer as a display list.
//!
//! Layer order is fixed: faces, edges, vertex markers, constructional
//! spheres, labels, axis gizmo, dual ghost, then the measurement overlay and
//! camera HUD. Every layer except the overlays can be toggled through
//! [`LayerVisibility`].

use shared::{MeshPayload, Rgba, CIRCUMRADIUS, INRADIUS, MIDRADIUS};

use super::camera::{CameraState, Projector, Viewport};
use super::frame::{Anchor, Frame, Pass, Shape, ScreenPoints, Stroke};
use super::gizmo::draw_axis_gizmo;
use super::overlays;
use super::shading::sort_faces;
use crate::math::{vec3, DVec2, DVec3};
use crate::state::measurement::{MeasurementSelection, VertexRef};
use crate::state::settings::{ColorTheme, Layer, LayerVisibility, ViewerSettings};

const VERTEX_RADIUS: f64 = 3.0;
const SELECTED_RADIUS: f64 = 5.0;
const HOVERED_RADIUS: f64 = 6.0;
const APEX_RADIUS: f64 = 7.0;
const CENTROID_RADIUS: f64 = 4.0;
const GHOST_VERTEX_RADIUS: f64 = 2.0;
const SPHERE_DASH: f64 = 6.0;

/// Everything one render pass reads
pub struct RenderInput<'a> {
    pub payload: &'a MeshPayload,
    pub camera: &'a CameraState,
    pub viewport: Viewport,
    pub settings: &'a ViewerSettings,
    pub selection: &'a MeasurementSelection,
    pub measuring: bool,
}

/// How a mesh is painted: the primary payload is shaded, the dual is a
/// flat translucent ghost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MeshStyle {
    Shaded,
    Ghost,
}

impl MeshStyle {
    fn face_pass(self) -> Pass {
        match self {
            MeshStyle::Shaded => Pass::Faces,
            MeshStyle::Ghost => Pass::Dual,
        }
    }

    fn edge_pass(self) -> Pass {
        match self {
            MeshStyle::Shaded => Pass::Edges,
            MeshStyle::Ghost => Pass::Dual,
        }
    }

    fn face_fill(self, mesh: &MeshPayload, face: usize, intensity: f64, theme: &ColorTheme) -> Rgba {
        match self {
            MeshStyle::Shaded => mesh
                .face_colors
                .get(&face)
                .copied()
                .unwrap_or(theme.face)
                .shaded(intensity),
            MeshStyle::Ghost => theme.ghost_face,
        }
    }

    fn face_outline(self, theme: &ColorTheme) -> Option<Stroke> {
        match self {
            MeshStyle::Shaded => Some(Stroke::new(0.5, theme.face_outline)),
            MeshStyle::Ghost => None,
        }
    }

    fn edge_stroke(self, theme: &ColorTheme) -> Stroke {
        match self {
            MeshStyle::Shaded => Stroke::new(1.2, theme.edge),
            MeshStyle::Ghost => Stroke::new(1.0, theme.ghost_edge),
        }
    }
}

/// Render one frame.
///
/// The returned frame carries the screen position of every vertex and of
/// the centroid, which the input controller uses for hit-testing until the
/// next render.
pub fn render_frame(input: &RenderInput) -> Frame {
    let projector = input.camera.projector(input.viewport);
    let mut frame = Frame::new(input.viewport, projector.scale);
    let theme = &input.settings.theme;
    let layers = &input.settings.layers;

    frame.screen_points = project_points(input.payload, &projector);

    if layers.faces || layers.edges {
        draw_mesh(&mut frame, input.payload, &projector, MeshStyle::Shaded, layers, theme);
    }
    draw_vertex_markers(&mut frame, input);
    draw_spheres(&mut frame, input.payload, &projector, layers, theme);
    if layers.labels {
        draw_labels(&mut frame, input.payload, &projector, theme);
    }
    if layers.axes {
        draw_axis_gizmo(&mut frame, &projector.rotation, theme);
    }
    if layers.dual {
        if let Some(dual) = input.payload.dual.as_deref() {
            draw_mesh(&mut frame, dual, &projector, MeshStyle::Ghost, layers, theme);
        }
    }

    if input.measuring || !input.selection.is_empty() {
        overlays::draw_measurement(
            &mut frame,
            input.payload,
            input.selection,
            theme,
            input.settings.interaction.precision,
        );
    }
    overlays::draw_camera_info(&mut frame, input.camera, theme);

    frame
}

/// Project every payload vertex and the vertex centroid.
pub fn project_points(mesh: &MeshPayload, projector: &Projector) -> ScreenPoints {
    ScreenPoints {
        vertices: mesh
            .vertices
            .iter()
            .map(|&p| projector.project(vec3(p)))
            .collect(),
        centroid: projector.project(vec3(mesh.centroid())),
    }
}

fn draw_mesh(
    frame: &mut Frame,
    mesh: &MeshPayload,
    projector: &Projector,
    style: MeshStyle,
    layers: &LayerVisibility,
    theme: &ColorTheme,
) {
    let ghost = style == MeshStyle::Ghost;

    if ghost || layers.faces {
        for face in sort_faces(mesh, projector) {
            let points: Vec<DVec2> = face
                .rotated
                .iter()
                .map(|&r| projector.project_rotated(r))
                .collect();
            if !points.iter().all(|p| p.is_finite()) {
                continue;
            }
            frame.push(
                style.face_pass(),
                Shape::Polygon {
                    points,
                    fill: style.face_fill(mesh, face.face_index, face.intensity, theme),
                    stroke: style.face_outline(theme),
                },
            );
        }
    }

    // Primary mesh reuses the cached points; the dual is projected here
    let screen: Vec<DVec2> = if ghost {
        project_points(mesh, projector).vertices
    } else {
        frame.screen_points.vertices.clone()
    };

    if ghost || layers.edges {
        let stroke = style.edge_stroke(theme);
        let lines: Vec<Shape> = mesh
            .render_edges()
            .into_iter()
            .filter_map(|[a, b]| {
                let from = *screen.get(a)?;
                let to = *screen.get(b)?;
                (from.is_finite() && to.is_finite()).then_some(Shape::Line { from, to, stroke })
            })
            .collect();
        for line in lines {
            frame.push(style.edge_pass(), line);
        }
    }

    if ghost {
        for center in screen.into_iter().filter(|p| p.is_finite()) {
            frame.push(
                Pass::Dual,
                Shape::Circle {
                    center,
                    radius: GHOST_VERTEX_RADIUS,
                    fill: Some(theme.ghost_vertex),
                    stroke: None,
                },
            );
        }
    }
}

/// Marker radius and color for a vertex in a non-default state.
///
/// Priority: apex, hovered, first selected, selected.
fn marker_style(
    v: VertexRef,
    selection: &MeasurementSelection,
    theme: &ColorTheme,
) -> Option<(f64, Rgba)> {
    if selection.apex() == Some(v) {
        Some((APEX_RADIUS, theme.vertex_apex))
    } else if selection.hovered() == Some(v) {
        Some((HOVERED_RADIUS, theme.vertex_hovered))
    } else if selection.selected_vertices().first() == Some(&v) {
        Some((HOVERED_RADIUS, theme.vertex_first))
    } else if selection.is_selected(v) {
        Some((SELECTED_RADIUS, theme.vertex_selected))
    } else {
        None
    }
}

fn draw_vertex_markers(frame: &mut Frame, input: &RenderInput) {
    let theme = &input.settings.theme;
    let selection = input.selection;
    let dense = input.payload.vertex_count() > input.settings.interaction.dense_vertex_threshold;
    let plain = input.settings.layers.vertices && !dense;

    let mut markers: Vec<Shape> = Vec::new();
    for (i, &center) in frame.screen_points.vertices.iter().enumerate() {
        if !center.is_finite() {
            continue;
        }
        let (radius, color) = match marker_style(VertexRef::Mesh(i), selection, theme) {
            Some(style) => style,
            None if plain => (VERTEX_RADIUS, theme.vertex),
            None => continue,
        };
        markers.push(Shape::Circle {
            center,
            radius,
            fill: Some(color),
            stroke: None,
        });
    }

    // Centroid is painted last so it sits on top of any coincident vertex
    let centroid = VertexRef::Centroid;
    let centroid_style = marker_style(centroid, selection, theme);
    if !input.payload.is_empty() && (input.measuring || centroid_style.is_some()) {
        let (radius, color) = centroid_style.unwrap_or((CENTROID_RADIUS, theme.centroid));
        markers.push(Shape::Circle {
            center: frame.screen_points.centroid,
            radius,
            fill: Some(color),
            stroke: Some(Stroke::new(1.0, theme.centroid)),
        });
    }

    for marker in markers {
        frame.push(Pass::Vertices, marker);
    }
}

fn draw_spheres(
    frame: &mut Frame,
    mesh: &MeshPayload,
    projector: &Projector,
    layers: &LayerVisibility,
    theme: &ColorTheme,
) {
    let center = projector.project(DVec3::ZERO);
    let spheres = [
        (Layer::Insphere, INRADIUS, theme.insphere),
        (Layer::Midsphere, MIDRADIUS, theme.midsphere),
        (Layer::Circumsphere, CIRCUMRADIUS, theme.circumsphere),
    ];

    for (layer, key, color) in spheres {
        if !layers.get(layer) {
            continue;
        }
        if let Some(r) = mesh.metadata.positive_radius(key) {
            frame.push(
                Pass::Spheres,
                Shape::DashedCircle {
                    center,
                    radius: r * projector.scale,
                    stroke: Stroke::new(1.2, color),
                    dash: SPHERE_DASH,
                },
            );
        }
    }
}

fn draw_labels(frame: &mut Frame, mesh: &MeshPayload, projector: &Projector, theme: &ColorTheme) {
    for label in &mesh.labels {
        let pos = projector.project(vec3(label.position));
        if !pos.is_finite() || label.text.is_empty() {
            continue;
        }
        frame.push(
            Pass::Labels,
            Shape::Text {
                pos,
                anchor: Anchor::Center,
                text: label.text.clone(),
                size: 12.0,
                color: theme.label,
                plate: Some(theme.text_plate),
            },
        );
    }
}
