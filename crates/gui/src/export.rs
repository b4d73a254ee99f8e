//! SVG snapshot of a rendered frame.
//!
//! The display list maps one-to-one onto SVG elements, so the snapshot
//! matches what the egui host paints without rasterising anything.

use std::path::{Path, PathBuf};

use shared::Rgba;

use crate::math::DVec2;
use crate::viewport::frame::{Anchor, Frame, Shape, Stroke};

/// Approximate glyph advance as a fraction of the font size
const GLYPH_WIDTH: f64 = 0.6;
const PLATE_PADDING: f64 = 3.0;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, Default)]
pub struct SvgOptions {
    /// Fill the whole canvas first
    pub background: Option<Rgba>,
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

fn paint(attr: &str, color: Rgba) -> String {
    let mut s = format!(r#"{attr}="rgb({},{},{})""#, color.r(), color.g(), color.b());
    if color.a() < 255 {
        s.push_str(&format!(r#" {attr}-opacity="{:.3}""#, color.a() as f64 / 255.0));
    }
    s
}

fn stroke_attrs(stroke: Option<Stroke>) -> String {
    match stroke {
        Some(s) => format!(r#"{} stroke-width="{:.2}""#, paint("stroke", s.color), s.width),
        None => r#"stroke="none""#.to_string(),
    }
}

fn fill_attrs(fill: Option<Rgba>) -> String {
    match fill {
        Some(c) => paint("fill", c),
        None => r#"fill="none""#.to_string(),
    }
}

/// Top-left corner of the text box for an anchor
fn text_box(pos: DVec2, anchor: Anchor, width: f64, height: f64) -> DVec2 {
    match anchor {
        Anchor::Center => pos - DVec2::new(width, height) * 0.5,
        Anchor::LeftTop => pos,
        Anchor::RightTop => pos - DVec2::new(width, 0.0),
        Anchor::LeftBottom => pos - DVec2::new(0.0, height),
    }
}

fn shape_to_svg(shape: &Shape) -> String {
    match shape {
        Shape::Polygon {
            points,
            fill,
            stroke,
        } => {
            let pts: Vec<String> = points.iter().map(|p| format!("{:.2},{:.2}", p.x, p.y)).collect();
            format!(
                r#"<polygon points="{}" {} {}/>"#,
                pts.join(" "),
                fill_attrs(Some(*fill)),
                stroke_attrs(*stroke)
            )
        }
        Shape::Line { from, to, stroke } => format!(
            r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" {} stroke-linecap="round"/>"#,
            from.x,
            from.y,
            to.x,
            to.y,
            stroke_attrs(Some(*stroke))
        ),
        Shape::Circle {
            center,
            radius,
            fill,
            stroke,
        } => format!(
            r#"<circle cx="{:.2}" cy="{:.2}" r="{:.2}" {} {}/>"#,
            center.x,
            center.y,
            radius,
            fill_attrs(*fill),
            stroke_attrs(*stroke)
        ),
        Shape::DashedCircle {
            center,
            radius,
            stroke,
            dash,
        } => format!(
            r#"<circle cx="{:.2}" cy="{:.2}" r="{:.2}" fill="none" {} stroke-dasharray="{dash:.1} {dash:.1}"/>"#,
            center.x,
            center.y,
            radius,
            stroke_attrs(Some(*stroke))
        ),
        Shape::Text {
            pos,
            anchor,
            text,
            size,
            color,
            plate,
        } => {
            let width = text.chars().count() as f64 * size * GLYPH_WIDTH;
            let corner = text_box(*pos, *anchor, width, *size);
            let mut out = String::new();
            if let Some(plate) = plate {
                out.push_str(&format!(
                    r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" rx="3" {}/>"#,
                    corner.x - PLATE_PADDING,
                    corner.y - PLATE_PADDING,
                    width + 2.0 * PLATE_PADDING,
                    size + 2.0 * PLATE_PADDING,
                    paint("fill", *plate)
                ));
            }
            out.push_str(&format!(
                r#"<text x="{:.2}" y="{:.2}" font-family="monospace" font-size="{size:.1}" dominant-baseline="hanging" {}>{}</text>"#,
                corner.x,
                corner.y,
                paint("fill", *color),
                escape(text)
            ));
            out
        }
    }
}

/// Serialise a frame as a standalone SVG document
pub fn frame_to_svg(frame: &Frame, options: &SvgOptions) -> String {
    let (w, h) = (frame.viewport.width, frame.viewport.height);
    let mut svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w:.0}" height="{h:.0}" viewBox="0 0 {w:.0} {h:.0}">"#
    );
    svg.push('\n');

    if let Some(bg) = options.background {
        svg.push_str(&format!(r#"<rect width="100%" height="100%" {}/>"#, paint("fill", bg)));
        svg.push('\n');
    }

    for cmd in &frame.commands {
        svg.push_str(&shape_to_svg(&cmd.shape));
        svg.push('\n');
    }

    svg.push_str("</svg>\n");
    svg
}

pub fn write_svg(path: &Path, svg: &str) -> Result<(), ExportError> {
    std::fs::write(path, svg).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), bytes = svg.len(), "snapshot saved");
    Ok(())
}
