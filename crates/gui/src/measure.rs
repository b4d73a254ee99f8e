//! Derived measurement quantities.
//!
//! All functions work on resolved 3D points (the centroid sentinel already
//! substituted) and are recomputed from the selection on every redraw.
//! Area and volume fan-triangulate from the first point, which is exact for
//! planar loops that are convex or star-shaped from that point.

use serde::Serialize;
use shared::MeshPayload;

use crate::math::{angle_between, signed_tetra_volume, triangle_area, vec3, DVec3};
use crate::state::measurement::{MeasurementSelection, VertexRef};

/// Resolve a selection index to a world position
pub fn resolve(mesh: &MeshPayload, centroid: DVec3, v: VertexRef) -> Option<DVec3> {
    match v {
        VertexRef::Mesh(i) => mesh.vertex(i).map(vec3),
        VertexRef::Centroid => Some(centroid),
    }
}

pub fn distance(a: DVec3, b: DVec3) -> f64 {
    a.distance(b)
}

/// Lengths of consecutive segments, plus the closing one when `closed`
pub fn segment_lengths(points: &[DVec3], closed: bool) -> Vec<f64> {
    let mut lengths: Vec<f64> = points.windows(2).map(|w| w[0].distance(w[1])).collect();
    if closed && points.len() >= 3 {
        if let (Some(first), Some(last)) = (points.first(), points.last()) {
            lengths.push(last.distance(*first));
        }
    }
    lengths
}

pub fn perimeter(points: &[DVec3], closed: bool) -> f64 {
    segment_lengths(points, closed).iter().sum()
}

/// Fan-triangulated polygon area
pub fn polygon_area(points: &[DVec3]) -> f64 {
    let Some((&origin, rest)) = points.split_first() else {
        return 0.0;
    };
    rest.windows(2)
        .map(|w| triangle_area(origin, w[0], w[1]))
        .sum()
}

/// Pyramid volume: sum of |tetra volume| between each fan triangle and the apex
pub fn pyramid_volume(base: &[DVec3], apex: DVec3) -> f64 {
    let Some((&origin, rest)) = base.split_first() else {
        return 0.0;
    };
    rest.windows(2)
        .map(|w| signed_tetra_volume(origin, w[0], w[1], apex).abs())
        .sum()
}

/// Sum of the side triangles between the apex and each (cyclic) base edge
pub fn lateral_area(base: &[DVec3], apex: DVec3) -> f64 {
    let n = base.len();
    if n < 2 {
        return 0.0;
    }
    (0..n)
        .map(|i| triangle_area(apex, base[i], base[(i + 1) % n]))
        .sum()
}

/// Angle (degrees) at every loop vertex between its cyclic neighbours.
///
/// Vertices with a degenerate neighbour vector yield `None`.
pub fn loop_angles(points: &[DVec3]) -> Vec<Option<f64>> {
    let n = points.len();
    if n < 3 {
        return vec![None; n];
    }
    (0..n)
        .map(|i| {
            let prev = points[(i + n - 1) % n];
            let next = points[(i + 1) % n];
            angle_between(prev - points[i], next - points[i])
        })
        .collect()
}

/// Angles at the interior vertices of an open path (angle tool)
pub fn path_angles(points: &[DVec3]) -> Vec<Option<f64>> {
    points
        .windows(3)
        .map(|w| angle_between(w[0] - w[1], w[2] - w[1]))
        .collect()
}

/// An angle annotation at a selection vertex
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VertexAngle {
    pub vertex: VertexRef,
    pub degrees: f64,
}

/// Everything derived from the current selection
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct MeasurementSummary {
    pub segments: Vec<f64>,
    pub perimeter: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lateral_area: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_area: Option<f64>,
    pub angles: Vec<VertexAngle>,
}

impl MeasurementSummary {
    pub fn compute(mesh: &MeshPayload, centroid: DVec3, sel: &MeasurementSelection) -> Self {
        let refs: Vec<(VertexRef, DVec3)> = sel
            .selected_vertices()
            .iter()
            .filter_map(|&v| resolve(mesh, centroid, v).map(|p| (v, p)))
            .collect();
        let points: Vec<DVec3> = refs.iter().map(|(_, p)| *p).collect();
        let closed = sel.loop_closed();

        let segments = segment_lengths(&points, closed);
        let perimeter = segments.iter().sum();

        let angles = if closed {
            refs.iter()
                .zip(loop_angles(&points))
                .filter_map(|((v, _), a)| a.map(|degrees| VertexAngle { vertex: *v, degrees }))
                .collect()
        } else {
            refs.iter()
                .skip(1)
                .zip(path_angles(&points))
                .filter_map(|((v, _), a)| a.map(|degrees| VertexAngle { vertex: *v, degrees }))
                .collect()
        };

        let area = closed.then(|| polygon_area(&points));
        let apex = sel.apex().and_then(|v| resolve(mesh, centroid, v));
        let volume = apex.map(|a| pyramid_volume(&points, a));
        let lateral_area = apex.map(|a| lateral_area(&points, a));
        let total_area = area.zip(lateral_area).map(|(b, l)| b + l);

        Self {
            segments,
            perimeter,
            area,
            volume,
            lateral_area,
            total_area,
            angles,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty() && self.area.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square() -> Vec<DVec3> {
        vec![
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(1.0, 0.0, 0.0),
            DVec3::new(1.0, 0.0, 1.0),
            DVec3::new(0.0, 0.0, 1.0),
        ]
    }

    #[test]
    fn test_perimeter_open_and_closed() {
        let sq = unit_square();
        assert!((perimeter(&sq, false) - 3.0).abs() < 1e-12);
        assert!((perimeter(&sq, true) - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_closing_edge_needs_three_points() {
        let two = &unit_square()[..2];
        assert_eq!(segment_lengths(two, true).len(), 1);
    }

    #[test]
    fn test_square_area() {
        assert!((polygon_area(&unit_square()) - 1.0).abs() < 1e-12);
        assert_eq!(polygon_area(&[]), 0.0);
    }

    #[test]
    fn test_pyramid_volume_and_lateral() {
        let apex = DVec3::new(0.5, 1.0, 0.5);
        let v = pyramid_volume(&unit_square(), apex);
        assert!((v - 1.0 / 3.0).abs() < 1e-12);

        // Four isosceles sides with slant height sqrt(1.25)
        let expected = 4.0 * 0.5 * 1.25_f64.sqrt();
        assert!((lateral_area(&unit_square(), apex) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_volume_independent_of_winding() {
        let mut sq = unit_square();
        sq.reverse();
        let v = pyramid_volume(&sq, DVec3::new(0.5, -2.0, 0.5));
        assert!((v - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_square_angles() {
        for a in loop_angles(&unit_square()) {
            assert!((a.unwrap() - 90.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_degenerate_angle_skipped() {
        let pts = vec![DVec3::ZERO, DVec3::ZERO, DVec3::X];
        let angles = loop_angles(&pts);
        assert!(angles[0].is_none());
        assert!(angles[1].is_none());
        assert!(angles.iter().all(|a| a.is_none_or(|d| d.is_finite())));
    }

    #[test]
    fn test_path_angle() {
        let pts = vec![DVec3::X, DVec3::ZERO, DVec3::new(1.0, 1.0, 0.0)];
        let angles = path_angles(&pts);
        assert_eq!(angles.len(), 1);
        assert!((angles[0].unwrap() - 45.0).abs() < 1e-9);
    }

    #[test]
    fn test_summary_uses_centroid() {
        let mesh = MeshPayload {
            vertices: vec![[0.0, 0.0, 0.0], [2.0, 0.0, 0.0]],
            ..Default::default()
        };
        let centroid = DVec3::new(1.0, 0.0, 0.0);
        let mut sel = MeasurementSelection::default();
        sel.pick(VertexRef::Mesh(0));
        sel.pick(VertexRef::Centroid);
        let s = MeasurementSummary::compute(&mesh, centroid, &sel);
        assert_eq!(s.segments, vec![1.0]);
        assert!(s.area.is_none());
    }

    #[test]
    fn test_summary_skips_stale_indices() {
        let mesh = MeshPayload {
            vertices: vec![[0.0, 0.0, 0.0], [3.0, 4.0, 0.0]],
            ..Default::default()
        };
        let mut sel = MeasurementSelection::default();
        sel.pick(VertexRef::Mesh(0));
        sel.pick(VertexRef::Mesh(9));
        sel.pick(VertexRef::Mesh(1));
        let s = MeasurementSummary::compute(&mesh, DVec3::ZERO, &sel);
        assert_eq!(s.segments, vec![5.0]);
    }
}
