//! Orientation gizmo pinned to the bottom-left corner of the viewport.
//!
//! Only the camera rotation is used, so the gizmo ignores pan, zoom and
//! mesh data.

use shared::Rgba;

use super::frame::{Anchor, Frame, Pass, Shape, Stroke};
use crate::math::{DMat3, DVec2, DVec3};
use crate::state::settings::ColorTheme;

/// Which axis a gizmo arm belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GizmoAxis {
    X,
    Y,
    Z,
}

impl GizmoAxis {
    fn direction(self) -> DVec3 {
        match self {
            GizmoAxis::X => DVec3::X,
            GizmoAxis::Y => DVec3::Y,
            GizmoAxis::Z => DVec3::Z,
        }
    }

    fn label(self) -> &'static str {
        match self {
            GizmoAxis::X => "X",
            GizmoAxis::Y => "Y",
            GizmoAxis::Z => "Z",
        }
    }

    fn color(self, theme: &ColorTheme) -> Rgba {
        match self {
            GizmoAxis::X => theme.axis_x,
            GizmoAxis::Y => theme.axis_y,
            GizmoAxis::Z => theme.axis_z,
        }
    }
}

const GIZMO_MARGIN: f64 = 48.0;
const GIZMO_LENGTH: f64 = 32.0;

/// Screen origin of the gizmo for a viewport of the given height
pub fn gizmo_origin(viewport_height: f64) -> DVec2 {
    DVec2::new(GIZMO_MARGIN, viewport_height - GIZMO_MARGIN)
}

/// Screen-space arm tips, ordered back-to-front
pub fn gizmo_arms(rotation: &DMat3, origin: DVec2) -> Vec<(GizmoAxis, DVec2, f64)> {
    let mut arms: Vec<(GizmoAxis, DVec2, f64)> = [GizmoAxis::X, GizmoAxis::Y, GizmoAxis::Z]
        .into_iter()
        .map(|axis| {
            let r = *rotation * axis.direction();
            let tip = DVec2::new(origin.x + r.x * GIZMO_LENGTH, origin.y - r.y * GIZMO_LENGTH);
            (axis, tip, r.z)
        })
        .collect();
    arms.sort_by(|a, b| a.2.total_cmp(&b.2));
    arms
}

pub fn draw_axis_gizmo(frame: &mut Frame, rotation: &DMat3, theme: &ColorTheme) {
    let origin = gizmo_origin(frame.viewport.height);

    for (axis, tip, depth) in gizmo_arms(rotation, origin) {
        // Arms pointing away from the viewer are faded
        let color = if depth < 0.0 {
            axis.color(theme).with_alpha(110)
        } else {
            axis.color(theme)
        };
        frame.push(
            Pass::Axes,
            Shape::Line {
                from: origin,
                to: tip,
                stroke: Stroke::new(2.0, color),
            },
        );
        frame.push(
            Pass::Axes,
            Shape::Text {
                pos: tip + (tip - origin).normalize_or_zero() * 8.0,
                anchor: Anchor::Center,
                text: axis.label().to_string(),
                size: 10.0,
                color,
                plate: None,
            },
        );
    }
}
