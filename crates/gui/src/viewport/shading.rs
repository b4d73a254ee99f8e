//! Per-face depth key and flat light intensity (painter's algorithm).

use shared::MeshPayload;

use super::camera::Projector;
use crate::math::{clamp01, vec3, DVec3};

/// Lowest brightness a face may get, so nothing renders pure black
pub const MIN_INTENSITY: f64 = 0.1;

/// Fixed light in camera space, coming from the upper-left front
pub fn light_direction() -> DVec3 {
    DVec3::new(-0.4, 0.6, 0.7).normalize()
}

/// One drawable face after sorting
#[derive(Debug, Clone, PartialEq)]
pub struct ShadedFace {
    pub face_index: usize,
    /// Mean camera-space Z of the face vertices
    pub depth: f64,
    /// Flat-light brightness in `[MIN_INTENSITY, 1]`
    pub intensity: f64,
    /// Camera-space (rotated, unprojected) corner positions
    pub rotated: Vec<DVec3>,
}

/// Remap the light cosine from [-1, 1] to [0, 1] brightness.
pub fn intensity_for_normal(normal: DVec3) -> f64 {
    clamp01((normal.dot(light_direction()) + 1.0) * 0.5).max(MIN_INTENSITY)
}

/// Rotate every face into camera space, shade it, and order back-to-front.
///
/// Faces with fewer than three resolvable vertices are skipped. The sort is
/// stable, so faces at equal depth keep their input order.
pub fn sort_faces(mesh: &MeshPayload, projector: &Projector) -> Vec<ShadedFace> {
    let mut shaded: Vec<ShadedFace> = mesh
        .faces
        .iter()
        .enumerate()
        .filter_map(|(face_index, indices)| {
            let rotated: Vec<DVec3> = indices
                .iter()
                .filter_map(|&i| mesh.vertex(i))
                .map(|p| projector.rotate(vec3(p)))
                .collect();
            if rotated.len() < 3 {
                return None;
            }

            let depth = rotated.iter().map(|v| v.z).sum::<f64>() / rotated.len() as f64;
            let normal = (rotated[1] - rotated[0])
                .cross(rotated[2] - rotated[0])
                .normalize_or_zero();

            Some(ShadedFace {
                face_index,
                depth,
                intensity: intensity_for_normal(normal),
                rotated,
            })
        })
        .collect();

    shaded.sort_by(|a, b| a.depth.total_cmp(&b.depth));
    shaded
}
