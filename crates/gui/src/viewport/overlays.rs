//! Viewport overlays: measurement annotations and the camera readout.

use shared::MeshPayload;

use super::camera::CameraState;
use super::frame::{Anchor, Frame, Pass, Shape, Stroke};
use crate::i18n::t;
use crate::math::{vec3, DVec2};
use crate::measure::MeasurementSummary;
use crate::state::measurement::MeasurementSelection;
use crate::state::settings::ColorTheme;

const PANEL_MARGIN: f64 = 10.0;
const LINE_HEIGHT: f64 = 16.0;

fn fmt(value: f64, precision: usize) -> String {
    format!("{value:.precision$}")
}

fn text(pos: DVec2, anchor: Anchor, text: String, size: f64, theme: &ColorTheme) -> Shape {
    Shape::Text {
        pos,
        anchor,
        text,
        size,
        color: theme.measure_text,
        plate: Some(theme.text_plate),
    }
}

/// Draw the current measurement on top of the mesh.
///
/// Uses the frame's screen points, so it must run after they are filled.
pub fn draw_measurement(
    frame: &mut Frame,
    mesh: &MeshPayload,
    selection: &MeasurementSelection,
    theme: &ColorTheme,
    precision: usize,
) {
    let summary = MeasurementSummary::compute(mesh, vec3(mesh.centroid()), selection);
    let closed = selection.loop_closed();

    let base: Vec<DVec2> = selection
        .selected_vertices()
        .iter()
        .filter_map(|&v| frame.screen_points.get(v))
        .collect();
    let apex = selection.apex().and_then(|v| frame.screen_points.get(v));

    if closed && base.len() >= 3 {
        frame.push(
            Pass::Measurement,
            Shape::Polygon {
                points: base.clone(),
                fill: theme.measure_fill,
                stroke: None,
            },
        );
    }

    if let Some(apex) = apex {
        for &p in &base {
            frame.push(
                Pass::Measurement,
                Shape::Line {
                    from: apex,
                    to: p,
                    stroke: Stroke::new(1.5, theme.measure_apex),
                },
            );
        }
    }

    // Segments in pick order, then the closing edge
    let mut segments: Vec<(DVec2, DVec2, Stroke)> = base
        .windows(2)
        .map(|w| (w[0], w[1], Stroke::new(2.0, theme.measure_path)))
        .collect();
    if closed && base.len() >= 3 {
        if let (Some(&first), Some(&last)) = (base.first(), base.last()) {
            segments.push((last, first, Stroke::new(2.0, theme.measure_closing)));
        }
    }
    for ((from, to, stroke), length) in segments.into_iter().zip(&summary.segments) {
        frame.push(Pass::Measurement, Shape::Line { from, to, stroke });
        frame.push(
            Pass::Measurement,
            text((from + to) * 0.5, Anchor::Center, fmt(*length, precision), 11.0, theme),
        );
    }

    // Rubber band from the last picked point to the hovered one
    if !closed {
        let last = selection.selected_vertices().last().copied();
        if let (Some(last), Some(hovered)) = (last, selection.hovered()) {
            if last != hovered {
                if let (Some(from), Some(to)) =
                    (frame.screen_points.get(last), frame.screen_points.get(hovered))
                {
                    frame.push(
                        Pass::Measurement,
                        Shape::Line {
                            from,
                            to,
                            stroke: Stroke::new(1.0, theme.measure_path.with_alpha(120)),
                        },
                    );
                }
            }
        }
    }

    for angle in &summary.angles {
        if let Some(p) = frame.screen_points.get(angle.vertex) {
            frame.push(
                Pass::Measurement,
                text(
                    p + DVec2::new(10.0, -12.0),
                    Anchor::LeftBottom,
                    format!("{:.1}°", angle.degrees),
                    11.0,
                    theme,
                ),
            );
        }
    }

    let mut pos = DVec2::new(PANEL_MARGIN, PANEL_MARGIN);
    for line in summary_lines(&summary, selection, precision) {
        frame.push(Pass::Measurement, text(pos, Anchor::LeftTop, line, 12.0, theme));
        pos.y += LINE_HEIGHT;
    }
}

/// Text lines of the top-left summary plate
pub fn summary_lines(
    summary: &MeasurementSummary,
    selection: &MeasurementSelection,
    precision: usize,
) -> Vec<String> {
    if selection.is_empty() {
        return vec![t("hint.measure").to_string()];
    }

    let mut lines = Vec::new();
    if selection.loop_closed() {
        lines.push(format!("{}: {}", t("measure.perimeter"), fmt(summary.perimeter, precision)));
    } else {
        lines.push(format!("{}: {}", t("measure.length"), fmt(summary.perimeter, precision)));
        if let Some(last) = summary.segments.last() {
            lines.push(format!("{}: {}", t("measure.last"), fmt(*last, precision)));
        }
    }

    let quantities = [
        ("measure.area", summary.area),
        ("measure.volume", summary.volume),
        ("measure.lateral", summary.lateral_area),
        ("measure.total", summary.total_area),
    ];
    for (key, value) in quantities {
        if let Some(v) = value {
            lines.push(format!("{}: {}", t(key), fmt(v, precision)));
        }
    }

    if selection.loop_closed() && selection.apex().is_none() {
        lines.push(t("hint.apex").to_string());
    }
    lines
}

/// Distance and angles of the camera in the top-right corner
pub fn draw_camera_info(frame: &mut Frame, camera: &CameraState, theme: &ColorTheme) {
    let pos = DVec2::new(frame.viewport.width - PANEL_MARGIN, PANEL_MARGIN);
    frame.push(
        Pass::Hud,
        Shape::Text {
            pos,
            anchor: Anchor::RightTop,
            text: format!(
                "d {:.2}  yaw {:.1}°  pitch {:.1}°",
                camera.distance, camera.yaw_deg, camera.pitch_deg
            ),
            size: 11.0,
            color: theme.hud_text,
            plate: None,
        },
    );
}
