use serde::{Deserialize, Serialize};
use shared::Bounds;

use crate::math::{rotation_matrix, vec3, DMat3, DVec2, DVec3};

pub const MIN_DISTANCE: f64 = 1.0;
pub const MAX_DISTANCE: f64 = 10_000.0;
pub const PITCH_LIMIT: f64 = 89.0;

const DEFAULT_YAW: f64 = 35.0;
const DEFAULT_PITCH: f64 = 25.0;
const DEFAULT_DISTANCE: f64 = 4.0;

/// Size of the drawing surface in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> DVec2 {
        DVec2::new(self.width * 0.5, self.height * 0.5)
    }

    pub fn min_side(&self) -> f64 {
        self.width.min(self.height).max(1.0)
    }
}

/// Orbit camera around a target point (orthographic)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraState {
    /// Orbit center in world coordinates
    #[serde(default)]
    pub target: [f64; 3],
    /// Distance from the target, never below `MIN_DISTANCE`
    pub distance: f64,
    /// Rotation about world-up (degrees)
    pub yaw_deg: f64,
    /// Tilt (degrees), clamped to ±89 to avoid flipping over the pole
    pub pitch_deg: f64,
    /// Pan offset in world units
    pub pan_x: f64,
    pub pan_y: f64,
}

impl Default for CameraState {
    fn default() -> Self {
        Self {
            target: [0.0; 3],
            distance: DEFAULT_DISTANCE,
            yaw_deg: DEFAULT_YAW,
            pitch_deg: DEFAULT_PITCH,
            pan_x: 0.0,
            pan_y: 0.0,
        }
    }
}

impl CameraState {
    pub fn rotation_matrix(&self) -> DMat3 {
        rotation_matrix(self.yaw_deg, self.pitch_deg)
    }

    /// Pixels per world unit for the given viewport
    pub fn scale(&self, viewport: Viewport) -> f64 {
        viewport.min_side() / (2.0 * self.distance)
    }

    pub fn set_angles(&mut self, yaw_deg: f64, pitch_deg: f64) {
        self.yaw_deg = yaw_deg;
        self.pitch_deg = pitch_deg.clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Orbit by a drag delta already converted to degrees
    pub fn rotate(&mut self, d_yaw: f64, d_pitch: f64) {
        self.yaw_deg = (self.yaw_deg + d_yaw) % 360.0;
        self.pitch_deg = (self.pitch_deg + d_pitch).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Multiply the distance by `factor` (< 1 zooms in)
    pub fn zoom(&mut self, factor: f64) {
        self.set_distance(self.distance * factor);
    }

    pub fn set_distance(&mut self, distance: f64) {
        self.distance = if distance.is_finite() {
            distance.clamp(MIN_DISTANCE, MAX_DISTANCE)
        } else {
            DEFAULT_DISTANCE
        };
    }

    /// Pan by a pixel delta; converted through the current scale so the
    /// model follows the pointer at any distance.
    pub fn pan(&mut self, dx_px: f64, dy_px: f64, viewport: Viewport) {
        let scale = self.scale(viewport);
        self.pan_x += dx_px / scale;
        self.pan_y -= dy_px / scale;
    }

    /// Orbit the box center at a distance equal to its diagonal, no pan
    pub fn fit_to_bounds(&mut self, bounds: &Bounds) {
        self.set_distance(bounds.diagonal());
        let center = bounds.center();
        self.target = if center.iter().all(|c| c.is_finite()) {
            center
        } else {
            [0.0; 3]
        };
        self.pan_x = 0.0;
        self.pan_y = 0.0;
    }

    /// Default angles, then fit to `bounds` if given
    pub fn reset(&mut self, bounds: Option<&Bounds>) {
        *self = Self::default();
        if let Some(b) = bounds {
            self.fit_to_bounds(b);
        }
    }

    pub fn projector(&self, viewport: Viewport) -> Projector {
        Projector {
            rotation: self.rotation_matrix(),
            target: vec3(self.target),
            scale: self.scale(viewport),
            pan: DVec2::new(self.pan_x, self.pan_y),
            center: viewport.center(),
        }
    }

    /// Project a 3D point to 2D screen coords
    pub fn project(&self, point: [f64; 3], viewport: Viewport) -> DVec2 {
        self.projector(viewport).project(vec3(point))
    }
}

/// Precomputed camera transform for one frame.
///
/// Pure function of (camera, viewport): identical inputs give identical
/// screen points, which keeps picking consistent with what was drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projector {
    pub rotation: DMat3,
    pub target: DVec3,
    pub scale: f64,
    pub pan: DVec2,
    pub center: DVec2,
}

impl Projector {
    /// Camera-space position (before projection); larger z is nearer the viewer
    pub fn rotate(&self, p: DVec3) -> DVec3 {
        self.rotation * (p - self.target)
    }

    pub fn project(&self, p: DVec3) -> DVec2 {
        self.project_rotated(self.rotate(p))
    }

    /// Screen Y grows downward, world Y upward.
    pub fn project_rotated(&self, r: DVec3) -> DVec2 {
        DVec2::new(
            self.center.x + (r.x + self.pan.x) * self.scale,
            self.center.y - (r.y + self.pan.y) * self.scale,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vp() -> Viewport {
        Viewport::new(800.0, 600.0)
    }

    #[test]
    fn test_project_is_deterministic() {
        let mut cam = CameraState::default();
        cam.set_angles(17.3, -42.0);
        cam.pan_x = 0.25;
        let p = [0.3, -1.2, 2.5];
        let a = cam.project(p, vp());
        let b = cam.project(p, vp());
        assert_eq!(a, b);
    }

    #[test]
    fn test_full_yaw_turn_is_identity() {
        let mut cam = CameraState::default();
        let p = [1.0, 0.5, -0.75];
        let before = cam.project(p, vp());
        cam.set_angles(cam.yaw_deg + 360.0, cam.pitch_deg);
        let after = cam.project(p, vp());
        assert!((before - after).length() < 1e-9);
    }

    #[test]
    fn test_origin_projects_to_center() {
        let cam = CameraState::default();
        let c = cam.project([0.0, 0.0, 0.0], vp());
        assert!((c - DVec2::new(400.0, 300.0)).length() < 1e-12);
    }

    #[test]
    fn test_vertical_flip() {
        let mut cam = CameraState::default();
        cam.set_angles(0.0, 0.0);
        let up = cam.project([0.0, 1.0, 0.0], vp());
        assert!(up.y < 300.0);
    }

    #[test]
    fn test_scale_uses_min_side() {
        let mut cam = CameraState::default();
        cam.set_distance(2.0);
        assert!((cam.scale(vp()) - 150.0).abs() < 1e-12);
    }

    #[test]
    fn test_pitch_clamped() {
        let mut cam = CameraState::default();
        cam.set_angles(0.0, 120.0);
        assert_eq!(cam.pitch_deg, PITCH_LIMIT);
        cam.rotate(0.0, -500.0);
        assert_eq!(cam.pitch_deg, -PITCH_LIMIT);
    }

    #[test]
    fn test_distance_clamped() {
        let mut cam = CameraState::default();
        cam.zoom(1e-6);
        assert_eq!(cam.distance, MIN_DISTANCE);
        cam.zoom(1e12);
        assert_eq!(cam.distance, MAX_DISTANCE);
    }

    #[test]
    fn test_pan_follows_pointer() {
        let mut cam = CameraState::default();
        cam.set_angles(0.0, 0.0);
        let before = cam.project([0.0, 0.0, 0.0], vp());
        cam.pan(30.0, -12.0, vp());
        let after = cam.project([0.0, 0.0, 0.0], vp());
        assert!((after - before - DVec2::new(30.0, -12.0)).length() < 1e-9);
    }

    #[test]
    fn test_reset_fits_bounds() {
        let mut cam = CameraState::default();
        cam.pan_x = 3.0;
        cam.set_angles(100.0, 10.0);
        let bounds = Bounds {
            min: [0.0, 0.0, 0.0],
            max: [7.5, 0.0, 0.0],
        };
        cam.reset(Some(&bounds));
        assert_eq!(cam.distance, 7.5);
        assert_eq!(cam.target, [3.75, 0.0, 0.0]);
        assert_eq!(cam.pan_x, 0.0);
        assert_eq!(cam.yaw_deg, DEFAULT_YAW);

        cam.reset(None);
        assert_eq!(cam.target, [0.0; 3]);
    }

    #[test]
    fn test_target_projects_to_center() {
        let mut cam = CameraState::default();
        let bounds = Bounds {
            min: [49.5, -0.5, -0.5],
            max: [50.5, 0.5, 0.5],
        };
        cam.fit_to_bounds(&bounds);
        let c = cam.project([50.0, 0.0, 0.0], vp());
        assert!((c - DVec2::new(400.0, 300.0)).length() < 1e-9);
        // Rotation orbits the target, not the world origin
        cam.rotate(73.0, -20.0);
        let c = cam.project([50.0, 0.0, 0.0], vp());
        assert!((c - DVec2::new(400.0, 300.0)).length() < 1e-9);
    }
}
