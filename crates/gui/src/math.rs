//! Small linear-algebra layer over glam's double-precision types.

pub use glam::{DMat3, DVec2, DVec3};

/// Vectors shorter than this are treated as degenerate.
pub const EPSILON: f64 = 1e-12;

/// Camera rotation: yaw about world-up (Y) first, then pitch about the screen X axis.
///
/// Written as `Rx(pitch) * Ry(yaw)` so the yaw always spins around world-up,
/// however far the view is tilted.
pub fn rotation_matrix(yaw_deg: f64, pitch_deg: f64) -> DMat3 {
    DMat3::from_rotation_x(pitch_deg.to_radians()) * DMat3::from_rotation_y(yaw_deg.to_radians())
}

pub fn vec3(p: [f64; 3]) -> DVec3 {
    DVec3::from_array(p)
}

pub fn clamp01(v: f64) -> f64 {
    v.clamp(0.0, 1.0)
}

/// Area of triangle `abc`
pub fn triangle_area(a: DVec3, b: DVec3, c: DVec3) -> f64 {
    0.5 * (b - a).cross(c - a).length()
}

/// Signed volume of the tetrahedron spanned by triangle `abc` and `apex`.
pub fn signed_tetra_volume(a: DVec3, b: DVec3, c: DVec3, apex: DVec3) -> f64 {
    (b - a).cross(c - a).dot(apex - a) / 6.0
}

/// Angle between two vectors in degrees, `None` if either is degenerate.
pub fn angle_between(a: DVec3, b: DVec3) -> Option<f64> {
    let la = a.length();
    let lb = b.length();
    if la < EPSILON || lb < EPSILON {
        return None;
    }
    let cos = (a.dot(b) / (la * lb)).clamp(-1.0, 1.0);
    Some(cos.acos().to_degrees())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_identity() {
        let m = rotation_matrix(0.0, 0.0);
        let v = DVec3::new(1.0, 2.0, 3.0);
        assert!((m * v - v).length() < 1e-12);
    }

    #[test]
    fn test_yaw_rotates_about_world_up() {
        // Pure yaw keeps Y untouched
        let m = rotation_matrix(90.0, 0.0);
        let v = m * DVec3::new(1.0, 5.0, 0.0);
        assert!((v.y - 5.0).abs() < 1e-12);
        assert!((v.x).abs() < 1e-12);
        assert!((v.z + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_pitch_tilts_up_axis() {
        let m = rotation_matrix(0.0, 90.0);
        let v = m * DVec3::Y;
        assert!(v.y.abs() < 1e-12);
        assert!((v.z - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_triangle_area_unit() {
        let a = triangle_area(DVec3::ZERO, DVec3::X, DVec3::Y);
        assert!((a - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_signed_tetra_volume_sign() {
        let v = signed_tetra_volume(DVec3::ZERO, DVec3::X, DVec3::Y, DVec3::Z);
        assert!((v - 1.0 / 6.0).abs() < 1e-12);
        let w = signed_tetra_volume(DVec3::ZERO, DVec3::Y, DVec3::X, DVec3::Z);
        assert!((w + 1.0 / 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_angle_between() {
        assert!((angle_between(DVec3::X, DVec3::Y).unwrap() - 90.0).abs() < 1e-9);
        assert!((angle_between(DVec3::X, DVec3::X * 3.0).unwrap()).abs() < 1e-6);
        assert!(angle_between(DVec3::ZERO, DVec3::Y).is_none());
    }
}
