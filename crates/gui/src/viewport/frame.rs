//! Display list produced by one render pass.
//!
//! The renderer never paints directly: it emits `DrawCommand`s that the host
//! replays with egui (or serialises to SVG), plus the projected vertex
//! positions used for picking on the next input event.

use shared::Rgba;

use super::camera::Viewport;
use crate::math::DVec2;
use crate::state::measurement::VertexRef;

/// Which part of the frame a command belongs to, in paint order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pass {
    Faces,
    Edges,
    Vertices,
    Spheres,
    Labels,
    Axes,
    Dual,
    Measurement,
    Hud,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub width: f64,
    pub color: Rgba,
}

impl Stroke {
    pub fn new(width: f64, color: Rgba) -> Self {
        Self { width, color }
    }
}

/// Text anchor relative to `pos`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Center,
    LeftTop,
    RightTop,
    LeftBottom,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// Filled convex polygon
    Polygon {
        points: Vec<DVec2>,
        fill: Rgba,
        stroke: Option<Stroke>,
    },
    Line {
        from: DVec2,
        to: DVec2,
        stroke: Stroke,
    },
    Circle {
        center: DVec2,
        radius: f64,
        fill: Option<Rgba>,
        stroke: Option<Stroke>,
    },
    DashedCircle {
        center: DVec2,
        radius: f64,
        stroke: Stroke,
        dash: f64,
    },
    /// Text, optionally on a plate sized to the laid-out text by the backend
    Text {
        pos: DVec2,
        anchor: Anchor,
        text: String,
        size: f64,
        color: Rgba,
        plate: Option<Rgba>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct DrawCommand {
    pub pass: Pass,
    pub shape: Shape,
}

/// Screen positions of every payload vertex plus the centroid sentinel
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScreenPoints {
    pub vertices: Vec<DVec2>,
    pub centroid: DVec2,
}

impl ScreenPoints {
    pub fn get(&self, v: VertexRef) -> Option<DVec2> {
        match v {
            VertexRef::Mesh(i) => self.vertices.get(i).copied(),
            VertexRef::Centroid => Some(self.centroid),
        }
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

/// Result of one render: draw commands plus the picking cache
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub viewport: Viewport,
    pub commands: Vec<DrawCommand>,
    pub screen_points: ScreenPoints,
    /// Pixels per world unit used for this frame
    pub scale: f64,
}

impl Frame {
    pub fn new(viewport: Viewport, scale: f64) -> Self {
        Self {
            viewport,
            commands: Vec::new(),
            screen_points: ScreenPoints::default(),
            scale,
        }
    }

    pub fn push(&mut self, pass: Pass, shape: Shape) {
        self.commands.push(DrawCommand { pass, shape });
    }

    pub fn in_pass(&self, pass: Pass) -> impl Iterator<Item = &Shape> {
        self.commands
            .iter()
            .filter(move |c| c.pass == pass)
            .map(|c| &c.shape)
    }

    pub fn count(&self, pass: Pass) -> usize {
        self.in_pass(pass).count()
    }

    /// All text strings of a pass, in paint order
    pub fn texts(&self, pass: Pass) -> Vec<&str> {
        self.in_pass(pass)
            .filter_map(|s| match s {
                Shape::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}
