//! Viewer settings: color theme, layer visibility, interaction tuning

use serde::{Deserialize, Serialize};
use shared::Rgba;

use crate::viewport::picking::DEFAULT_PICK_RADIUS;

/// Named colors for every drawable category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorTheme {
    pub background: Rgba,
    /// Face color when the payload has none
    pub face: Rgba,
    pub face_outline: Rgba,
    pub edge: Rgba,
    pub vertex: Rgba,
    pub vertex_hovered: Rgba,
    pub vertex_selected: Rgba,
    pub vertex_first: Rgba,
    pub vertex_apex: Rgba,
    pub centroid: Rgba,
    pub measure_path: Rgba,
    pub measure_closing: Rgba,
    pub measure_fill: Rgba,
    pub measure_apex: Rgba,
    pub measure_text: Rgba,
    pub text_plate: Rgba,
    pub axis_x: Rgba,
    pub axis_y: Rgba,
    pub axis_z: Rgba,
    pub insphere: Rgba,
    pub midsphere: Rgba,
    pub circumsphere: Rgba,
    pub label: Rgba,
    pub ghost_face: Rgba,
    pub ghost_edge: Rgba,
    pub ghost_vertex: Rgba,
    pub hud_text: Rgba,
}

impl Default for ColorTheme {
    fn default() -> Self {
        Self {
            background: Rgba::rgb(30, 30, 35),
            face: Rgba::rgba(110, 150, 210, 235),
            face_outline: Rgba::rgba(20, 20, 28, 90),
            edge: Rgba::rgb(225, 225, 235),
            vertex: Rgba::rgb(200, 200, 210),
            vertex_hovered: Rgba::rgb(255, 235, 90),
            vertex_selected: Rgba::rgb(0, 220, 255),
            vertex_first: Rgba::rgb(90, 255, 140),
            vertex_apex: Rgba::rgb(255, 120, 60),
            centroid: Rgba::rgb(255, 90, 200),
            measure_path: Rgba::rgb(255, 200, 50),
            measure_closing: Rgba::rgb(255, 160, 40),
            measure_fill: Rgba::rgba(255, 200, 50, 60),
            measure_apex: Rgba::rgba(255, 120, 60, 200),
            measure_text: Rgba::rgb(255, 240, 200),
            text_plate: Rgba::rgba(0, 0, 0, 160),
            axis_x: Rgba::rgb(220, 70, 70),
            axis_y: Rgba::rgb(70, 200, 70),
            axis_z: Rgba::rgb(70, 110, 220),
            insphere: Rgba::rgba(120, 220, 255, 200),
            midsphere: Rgba::rgba(160, 255, 160, 200),
            circumsphere: Rgba::rgba(255, 190, 120, 200),
            label: Rgba::rgb(235, 235, 240),
            ghost_face: Rgba::rgba(200, 160, 255, 40),
            ghost_edge: Rgba::rgba(200, 160, 255, 110),
            ghost_vertex: Rgba::rgba(200, 160, 255, 140),
            hud_text: Rgba::rgb(160, 160, 170),
        }
    }
}

/// Independently toggleable layers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Layer {
    Faces,
    Edges,
    Vertices,
    Labels,
    Axes,
    Insphere,
    Midsphere,
    Circumsphere,
    Dual,
}

impl Layer {
    pub fn all() -> &'static [Layer] {
        &[
            Layer::Faces,
            Layer::Edges,
            Layer::Vertices,
            Layer::Labels,
            Layer::Axes,
            Layer::Insphere,
            Layer::Midsphere,
            Layer::Circumsphere,
            Layer::Dual,
        ]
    }
}

/// Layer visibility flags
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayerVisibility {
    pub faces: bool,
    pub edges: bool,
    pub vertices: bool,
    pub labels: bool,
    pub axes: bool,
    pub insphere: bool,
    pub midsphere: bool,
    pub circumsphere: bool,
    pub dual: bool,
}

impl Default for LayerVisibility {
    fn default() -> Self {
        Self {
            faces: true,
            edges: true,
            vertices: true,
            labels: true,
            axes: true,
            insphere: false,
            midsphere: false,
            circumsphere: false,
            dual: true,
        }
    }
}

impl LayerVisibility {
    pub fn get(&self, layer: Layer) -> bool {
        *self.flag(layer)
    }

    pub fn set(&mut self, layer: Layer, visible: bool) {
        *self.flag_mut(layer) = visible;
    }

    fn flag(&self, layer: Layer) -> &bool {
        match layer {
            Layer::Faces => &self.faces,
            Layer::Edges => &self.edges,
            Layer::Vertices => &self.vertices,
            Layer::Labels => &self.labels,
            Layer::Axes => &self.axes,
            Layer::Insphere => &self.insphere,
            Layer::Midsphere => &self.midsphere,
            Layer::Circumsphere => &self.circumsphere,
            Layer::Dual => &self.dual,
        }
    }

    fn flag_mut(&mut self, layer: Layer) -> &mut bool {
        match layer {
            Layer::Faces => &mut self.faces,
            Layer::Edges => &mut self.edges,
            Layer::Vertices => &mut self.vertices,
            Layer::Labels => &mut self.labels,
            Layer::Axes => &mut self.axes,
            Layer::Insphere => &mut self.insphere,
            Layer::Midsphere => &mut self.midsphere,
            Layer::Circumsphere => &mut self.circumsphere,
            Layer::Dual => &mut self.dual,
        }
    }
}

/// Pointer/wheel tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionSettings {
    /// Snap radius for vertex picking, in pixels
    pub pick_radius: f64,
    /// Degrees of orbit per dragged pixel
    pub rotate_sensitivity: f64,
    /// Distance multiplier per wheel notch (< 1 zooms in)
    pub zoom_step: f64,
    /// Above this vertex count only selected/hovered markers are drawn
    pub dense_vertex_threshold: usize,
    /// Decimal places in measurement readouts
    pub precision: usize,
}

impl Default for InteractionSettings {
    fn default() -> Self {
        Self {
            pick_radius: DEFAULT_PICK_RADIUS,
            rotate_sensitivity: 0.5,
            zoom_step: 0.9,
            dense_vertex_threshold: 2000,
            precision: 3,
        }
    }
}

/// All viewer settings
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ViewerSettings {
    #[serde(default)]
    pub theme: ColorTheme,
    #[serde(default)]
    pub layers: LayerVisibility,
    #[serde(default)]
    pub interaction: InteractionSettings,
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("no config directory on this platform")]
    NoConfigDir,
    #[error("settings io: {0}")]
    Io(#[from] std::io::Error),
    #[error("settings json: {0}")]
    Json(#[from] serde_json::Error),
}

impl ViewerSettings {
    fn config_path() -> Result<std::path::PathBuf, SettingsError> {
        let dirs = directories::ProjectDirs::from("com", "polyview", "polyview")
            .ok_or(SettingsError::NoConfigDir)?;
        Ok(dirs.config_dir().join("settings.json"))
    }

    /// Load settings from file, or return default if not found
    pub fn load() -> Self {
        let loaded = Self::config_path().and_then(|path| {
            let json = std::fs::read_to_string(path)?;
            Ok(serde_json::from_str(&json)?)
        });
        match loaded {
            Ok(settings) => settings,
            Err(SettingsError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                Self::default()
            }
            Err(e) => {
                tracing::warn!("Using default settings: {e}");
                Self::default()
            }
        }
    }

    /// Save settings to file
    pub fn save(&self) -> Result<(), SettingsError> {
        let path = Self::config_path()?;
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pick_radius() {
        let i = InteractionSettings::default();
        assert_eq!(i.pick_radius, DEFAULT_PICK_RADIUS);
        let parsed: InteractionSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed.pick_radius, DEFAULT_PICK_RADIUS);
    }

    #[test]
    fn test_layer_get_set() {
        let mut l = LayerVisibility::default();
        for &layer in Layer::all() {
            l.set(layer, false);
            assert!(!l.get(layer));
            l.set(layer, true);
            assert!(l.get(layer));
        }
    }

    #[test]
    fn test_spheres_hidden_by_default() {
        let l = LayerVisibility::default();
        assert!(!l.insphere && !l.midsphere && !l.circumsphere);
        assert!(l.faces && l.edges && l.vertices);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let s: ViewerSettings =
            serde_json::from_str(r#"{"layers": {"faces": false}, "theme": {"edge": [1, 2, 3, 4]}}"#)
                .unwrap();
        assert!(!s.layers.faces);
        assert!(s.layers.edges);
        assert_eq!(s.theme.edge, Rgba([1, 2, 3, 4]));
        assert_eq!(s.theme.face, ColorTheme::default().face);
        assert_eq!(s.interaction, InteractionSettings::default());
    }

    #[test]
    fn test_layer_serde_name() {
        let json = serde_json::to_string(&Layer::Circumsphere).unwrap();
        assert_eq!(json, "\"circumsphere\"");
    }
}
