pub mod measurement;
pub mod settings;

pub use measurement::{MeasurementSelection, VertexRef};
pub use settings::{ColorTheme, InteractionSettings, Layer, LayerVisibility, ViewerSettings};
