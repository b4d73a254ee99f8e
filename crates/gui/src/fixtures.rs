//! Built-in payloads for the host's shape menu, the harness and tests.
//!
//! Solids are centered at the origin (except the square pyramid) with unit
//! edge length, and carry their in/mid/circumradius in the metadata.

use std::collections::BTreeSet;

use shared::{Label, MeshPayload, Metadata, Rgba, CIRCUMRADIUS, INRADIUS, MIDRADIUS};

/// Names accepted by [`by_name`]
pub const FIXTURE_NAMES: &[&str] = &[
    "cube",
    "tetrahedron",
    "octahedron",
    "square_pyramid",
    "cube_dual",
    "point_sphere",
];

/// Point count of the `point_sphere` fixture, above the default marker threshold
pub const POINT_SPHERE_COUNT: usize = 2500;

pub fn by_name(name: &str) -> Option<MeshPayload> {
    match name {
        "cube" => Some(unit_cube()),
        "tetrahedron" => Some(tetrahedron()),
        "octahedron" => Some(octahedron()),
        "square_pyramid" => Some(square_pyramid()),
        "cube_dual" => Some(cube_with_dual()),
        "point_sphere" => Some(point_sphere(POINT_SPHERE_COUNT)),
        _ => None,
    }
}

fn metadata(name: &str, radii: [f64; 3]) -> Metadata {
    let mut meta = Metadata {
        name: Some(name.to_string()),
        ..Default::default()
    };
    for (key, r) in [INRADIUS, MIDRADIUS, CIRCUMRADIUS].into_iter().zip(radii) {
        meta.scalars.insert(key.to_string(), r);
    }
    meta
}

fn label(text: &str, position: [f64; 3]) -> Label {
    Label {
        text: text.to_string(),
        position,
    }
}

// ── Solids ──────────────────────────────────────────────────────

/// Unit cube centered at the origin.
///
/// Vertex `i` has coordinate bit `k` of `i` along axis `k`, so vertices
/// 0, 1, 5, 4 form the bottom (y = -0.5) square.
pub fn unit_cube() -> MeshPayload {
    let vertices: Vec<[f64; 3]> = (0..8)
        .map(|i| {
            [
                (i & 1) as f64 - 0.5,
                ((i >> 1) & 1) as f64 - 0.5,
                ((i >> 2) & 1) as f64 - 0.5,
            ]
        })
        .collect();

    let mut edges = Vec::new();
    for i in 0..8usize {
        for bit in [1, 2, 4] {
            if i & bit == 0 {
                edges.push([i, i | bit]);
            }
        }
    }

    let faces = vec![
        vec![0, 2, 3, 1],
        vec![4, 5, 7, 6],
        vec![0, 1, 5, 4],
        vec![2, 6, 7, 3],
        vec![0, 4, 6, 2],
        vec![1, 3, 7, 5],
    ];

    MeshPayload {
        vertices,
        edges,
        faces,
        metadata: metadata(
            "Cube",
            [0.5, std::f64::consts::FRAC_1_SQRT_2, 3f64.sqrt() / 2.0],
        ),
        ..Default::default()
    }
}

/// Regular tetrahedron with per-face colors and labelled vertices.
pub fn tetrahedron() -> MeshPayload {
    let s = 1.0 / (2.0 * 2f64.sqrt());
    let vertices = vec![
        [s, s, s],
        [s, -s, -s],
        [-s, s, -s],
        [-s, -s, s],
    ];
    let faces = vec![vec![0, 1, 2], vec![0, 3, 1], vec![0, 2, 3], vec![1, 3, 2]];

    let colors = [
        Rgba::rgb(230, 110, 90),
        Rgba::rgb(110, 200, 120),
        Rgba::rgb(100, 140, 230),
        Rgba::rgb(230, 200, 90),
    ];
    let labels = ["A", "B", "C", "D"]
        .iter()
        .zip(&vertices)
        .map(|(text, p)| label(text, p.map(|c| c * 1.25)))
        .collect();

    let sqrt6 = 6f64.sqrt();
    MeshPayload {
        vertices,
        faces,
        face_colors: colors.into_iter().enumerate().collect(),
        metadata: metadata("Tetrahedron", [sqrt6 / 12.0, 2f64.sqrt() / 4.0, sqrt6 / 4.0]),
        labels,
        ..Default::default()
    }
}

/// Octahedron with vertices on the axes at distance `h`.
///
/// Vertex order: +X, -X, +Y, -Y, +Z, -Z. Edges are left to be derived from
/// the faces.
fn octahedron_with_extent(h: f64) -> MeshPayload {
    let vertices = vec![
        [h, 0.0, 0.0],
        [-h, 0.0, 0.0],
        [0.0, h, 0.0],
        [0.0, -h, 0.0],
        [0.0, 0.0, h],
        [0.0, 0.0, -h],
    ];

    let mut faces = Vec::new();
    for sx in [1, -1] {
        for sy in [1, -1] {
            for sz in [1, -1] {
                let x = if sx > 0 { 0 } else { 1 };
                let y = if sy > 0 { 2 } else { 3 };
                let z = if sz > 0 { 4 } else { 5 };
                // An odd number of flipped axes reverses the winding
                faces.push(if sx * sy * sz > 0 {
                    vec![x, y, z]
                } else {
                    vec![x, z, y]
                });
            }
        }
    }

    MeshPayload {
        vertices,
        faces,
        ..Default::default()
    }
}

/// Regular octahedron with unit edges.
pub fn octahedron() -> MeshPayload {
    let h = std::f64::consts::FRAC_1_SQRT_2;
    MeshPayload {
        metadata: metadata("Octahedron", [6f64.sqrt() / 6.0, 0.5, h]),
        ..octahedron_with_extent(h)
    }
}

/// Square pyramid: unit square base on y = 0, apex (0.5, 1, 0.5).
///
/// Base vertices 0..4, apex 4. Volume is 1/3.
pub fn square_pyramid() -> MeshPayload {
    let vertices = vec![
        [0.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [1.0, 0.0, 1.0],
        [0.0, 0.0, 1.0],
        [0.5, 1.0, 0.5],
    ];
    let faces = vec![
        vec![0, 1, 2, 3],
        vec![0, 4, 1],
        vec![1, 4, 2],
        vec![2, 4, 3],
        vec![3, 4, 0],
    ];
    let labels = vec![
        label("A", [-0.1, -0.1, -0.1]),
        label("B", [1.1, -0.1, -0.1]),
        label("C", [1.1, -0.1, 1.1]),
        label("D", [-0.1, -0.1, 1.1]),
        label("S", [0.5, 1.15, 0.5]),
    ];

    MeshPayload {
        vertices,
        faces,
        metadata: Metadata {
            name: Some("Square pyramid".to_string()),
            ..Default::default()
        },
        labels,
        ..Default::default()
    }
}

/// Unit cube with its dual octahedron (vertices at the face centers).
pub fn cube_with_dual() -> MeshPayload {
    let mut cube = unit_cube();
    cube.metadata.name = Some("Cube + dual".to_string());
    cube.dual = Some(Box::new(octahedron_with_extent(0.5)));
    cube
}

/// Unit sphere sampled with a Fibonacci spiral; points only.
pub fn point_sphere(count: usize) -> MeshPayload {
    let golden = std::f64::consts::PI * (3.0 - 5f64.sqrt());
    let vertices = (0..count)
        .map(|i| {
            let y = 1.0 - 2.0 * (i as f64 + 0.5) / count as f64;
            let r = (1.0 - y * y).max(0.0).sqrt();
            let theta = golden * i as f64;
            [r * theta.cos(), y, r * theta.sin()]
        })
        .collect();

    let mut meta = Metadata {
        name: Some(format!("Point sphere ({count})")),
        ..Default::default()
    };
    meta.scalars.insert(CIRCUMRADIUS.to_string(), 1.0);

    MeshPayload {
        vertices,
        metadata: meta,
        ..Default::default()
    }
}

/// Undirected edge set, for tests comparing against expected adjacency
pub fn edge_set(mesh: &MeshPayload) -> BTreeSet<[usize; 2]> {
    mesh.render_edges().into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{vec3, DVec3};

    fn assert_outward(mesh: &MeshPayload) {
        let center = vec3(mesh.centroid());
        for face in &mesh.faces {
            let p: Vec<DVec3> = face.iter().map(|&i| vec3(mesh.vertices[i])).collect();
            let normal = (p[1] - p[0]).cross(p[2] - p[0]);
            assert!(normal.dot(p[0] - center) > 0.0, "face {face:?} points inward");
        }
    }

    #[test]
    fn test_all_fixtures_valid() {
        for name in FIXTURE_NAMES {
            let mesh = by_name(name).unwrap();
            mesh.validate().unwrap_or_else(|e| panic!("{name}: {e}"));
        }
        assert!(by_name("dodecahedron").is_none());
    }

    #[test]
    fn test_cube_topology() {
        let cube = unit_cube();
        assert_eq!(cube.vertices.len(), 8);
        assert_eq!(cube.edges.len(), 12);
        assert_eq!(cube.faces.len(), 6);
        assert_outward(&cube);
        for [a, b] in &cube.edges {
            let d = vec3(cube.vertices[*a]).distance(vec3(cube.vertices[*b]));
            assert!((d - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_solids_outward_and_unit_edges() {
        for mesh in [tetrahedron(), octahedron(), square_pyramid()] {
            assert_outward(&mesh);
        }
        for mesh in [tetrahedron(), octahedron()] {
            for [a, b] in edge_set(&mesh) {
                let d = vec3(mesh.vertices[a]).distance(vec3(mesh.vertices[b]));
                assert!((d - 1.0).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn test_circumradius_matches_vertices() {
        for mesh in [unit_cube(), tetrahedron(), octahedron()] {
            let r = mesh.metadata.positive_radius(CIRCUMRADIUS).unwrap();
            for v in &mesh.vertices {
                assert!((vec3(*v).length() - r).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn test_octahedron_derived_edges() {
        let oct = octahedron();
        assert!(oct.edges.is_empty());
        assert_eq!(edge_set(&oct).len(), 12);
    }

    #[test]
    fn test_dual_vertices_on_face_centers() {
        let mesh = cube_with_dual();
        let dual = mesh.dual.as_ref().unwrap();
        assert_eq!(dual.vertices.len(), mesh.faces.len());
        assert_outward(dual);
    }

    #[test]
    fn test_point_sphere() {
        let sphere = point_sphere(100);
        assert_eq!(sphere.vertices.len(), 100);
        assert!(sphere.faces.is_empty());
        for v in &sphere.vertices {
            assert!((vec3(*v).length() - 1.0).abs() < 1e-9);
        }
    }
}
