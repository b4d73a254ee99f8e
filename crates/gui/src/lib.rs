// Library crate: the whole headless viewer core, used by the binary, the
// integration tests and scripted sessions.
// The egui host (app, ui, viewport panel) stays in the binary crate.

pub mod command;
pub mod export;
pub mod fixtures;
pub mod harness;
pub mod i18n;
pub mod input;
pub mod math;
pub mod measure;
pub mod state;
pub mod viewer;

/// Camera, projection and the software renderer.
/// The egui painter backend for `Frame` lives in the binary crate.
pub mod viewport {
    pub mod camera;
    pub mod frame;
    pub mod gizmo;
    pub mod overlays;
    pub mod picking;
    pub mod renderer;
    pub mod shading;
}

pub use viewer::Viewer;
