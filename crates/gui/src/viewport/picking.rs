//! Screen-space vertex picking against the last frame's projected points.

use super::frame::ScreenPoints;
use crate::math::DVec2;
use crate::state::measurement::VertexRef;

/// Default snap radius in pixels
pub const DEFAULT_PICK_RADIUS: f64 = 10.0;

/// Find the vertex nearest to `pos` within `threshold` pixels.
///
/// Mesh vertices tie-break on the lowest index. The centroid is drawn on top
/// of everything, so it wins whenever it is at least as close as the best
/// mesh vertex.
pub fn hit_test(points: &ScreenPoints, pos: DVec2, threshold: f64) -> Option<VertexRef> {
    let mut best: Option<(usize, f64)> = None;

    for (i, p) in points.vertices.iter().enumerate() {
        let dist = p.distance(pos);
        if dist <= threshold && best.is_none_or(|(_, d)| dist < d) {
            best = Some((i, dist));
        }
    }

    let centroid_dist = points.centroid.distance(pos);
    match best {
        Some((_, d)) if centroid_dist <= d => Some(VertexRef::Centroid),
        Some((i, _)) => Some(VertexRef::Mesh(i)),
        None if centroid_dist <= threshold => Some(VertexRef::Centroid),
        None => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points() -> ScreenPoints {
        ScreenPoints {
            vertices: vec![
                DVec2::new(10.0, 10.0),
                DVec2::new(50.0, 50.0),
                DVec2::new(54.0, 50.0),
            ],
            centroid: DVec2::new(200.0, 200.0),
        }
    }

    #[test]
    fn test_miss_beyond_threshold() {
        assert_eq!(hit_test(&points(), DVec2::new(100.0, 100.0), 10.0), None);
    }

    #[test]
    fn test_nearest_wins() {
        let hit = hit_test(&points(), DVec2::new(53.0, 50.0), 10.0);
        assert_eq!(hit, Some(VertexRef::Mesh(2)));
    }

    #[test]
    fn test_equal_distance_prefers_lower_index() {
        let hit = hit_test(&points(), DVec2::new(52.0, 50.0), 10.0);
        assert_eq!(hit, Some(VertexRef::Mesh(1)));
    }

    #[test]
    fn test_exactly_on_threshold_hits() {
        let hit = hit_test(&points(), DVec2::new(10.0, 20.0), 10.0);
        assert_eq!(hit, Some(VertexRef::Mesh(0)));
    }

    #[test]
    fn test_centroid_wins_tie() {
        let mut p = points();
        p.centroid = DVec2::new(10.0, 10.0);
        let hit = hit_test(&p, DVec2::new(12.0, 10.0), 10.0);
        assert_eq!(hit, Some(VertexRef::Centroid));
    }

    #[test]
    fn test_vertex_closer_than_centroid() {
        let mut p = points();
        p.centroid = DVec2::new(16.0, 10.0);
        let hit = hit_test(&p, DVec2::new(11.0, 10.0), 10.0);
        assert_eq!(hit, Some(VertexRef::Mesh(0)));
    }

    #[test]
    fn test_centroid_alone() {
        let hit = hit_test(&points(), DVec2::new(195.0, 200.0), 10.0);
        assert_eq!(hit, Some(VertexRef::Centroid));
    }
}
