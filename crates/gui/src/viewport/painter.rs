//! egui backend for the display list

use std::f32::consts::TAU;

use egui::{Align2, Color32, FontId, Painter, Pos2, Rect};
use polyview_lib::math::DVec2;
use polyview_lib::viewport::frame::{Anchor, Frame, Shape, Stroke};
use shared::Rgba;

const PLATE_PADDING: f32 = 3.0;
const CIRCLE_SEGMENTS: usize = 96;

fn color(c: Rgba) -> Color32 {
    Color32::from_rgba_unmultiplied(c.r(), c.g(), c.b(), c.a())
}

fn stroke(s: Stroke) -> egui::Stroke {
    egui::Stroke::new(s.width as f32, color(s.color))
}

fn align(anchor: Anchor) -> Align2 {
    match anchor {
        Anchor::Center => Align2::CENTER_CENTER,
        Anchor::LeftTop => Align2::LEFT_TOP,
        Anchor::RightTop => Align2::RIGHT_TOP,
        Anchor::LeftBottom => Align2::LEFT_BOTTOM,
    }
}

/// Paint a frame into `rect`; frame coordinates are relative to its corner
pub fn paint_frame(painter: &Painter, rect: Rect, frame: &Frame, background: Rgba) {
    let to_screen = |p: DVec2| Pos2::new(rect.min.x + p.x as f32, rect.min.y + p.y as f32);

    painter.rect_filled(rect, 0.0, color(background));

    for cmd in &frame.commands {
        match &cmd.shape {
            Shape::Polygon {
                points,
                fill,
                stroke: outline,
            } => {
                let points: Vec<Pos2> = points.iter().map(|&p| to_screen(p)).collect();
                let outline = outline.map(stroke).unwrap_or(egui::Stroke::NONE);
                painter.add(egui::Shape::convex_polygon(points, color(*fill), outline));
            }
            Shape::Line { from, to, stroke: s } => {
                painter.line_segment([to_screen(*from), to_screen(*to)], stroke(*s));
            }
            Shape::Circle {
                center,
                radius,
                fill,
                stroke: outline,
            } => {
                painter.circle(
                    to_screen(*center),
                    *radius as f32,
                    fill.map(color).unwrap_or(Color32::TRANSPARENT),
                    outline.map(stroke).unwrap_or(egui::Stroke::NONE),
                );
            }
            Shape::DashedCircle {
                center,
                radius,
                stroke: s,
                dash,
            } => {
                let c = to_screen(*center);
                let r = *radius as f32;
                let path: Vec<Pos2> = (0..=CIRCLE_SEGMENTS)
                    .map(|i| {
                        let a = TAU * i as f32 / CIRCLE_SEGMENTS as f32;
                        c + egui::vec2(a.cos(), a.sin()) * r
                    })
                    .collect();
                let dash = *dash as f32;
                painter.extend(egui::Shape::dashed_line(&path, stroke(*s), dash, dash));
            }
            Shape::Text {
                pos,
                anchor,
                text,
                size,
                color: text_color,
                plate,
            } => {
                let galley = painter.layout_no_wrap(
                    text.clone(),
                    FontId::monospace(*size as f32),
                    color(*text_color),
                );
                let text_rect = align(*anchor).anchor_size(to_screen(*pos), galley.size());
                if let Some(plate) = plate {
                    painter.rect_filled(text_rect.expand(PLATE_PADDING), 3.0, color(*plate));
                }
                painter.galley(text_rect.min, galley, color(*text_color));
            }
        }
    }
}
