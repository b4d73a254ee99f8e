use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub mod geometry;

pub use geometry::Bounds;

/// Ключ метаданных: радиус вписанной сферы
pub const INRADIUS: &str = "inradius";
/// Ключ метаданных: радиус средней сферы (касается рёбер)
pub const MIDRADIUS: &str = "midradius";
/// Ключ метаданных: радиус описанной сферы
pub const CIRCUMRADIUS: &str = "circumradius";

/// Цвет RGBA (8 бит на канал)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgba(pub [u8; 4]);

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b, 255])
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self([r, g, b, a])
    }

    pub fn r(&self) -> u8 {
        self.0[0]
    }

    pub fn g(&self) -> u8 {
        self.0[1]
    }

    pub fn b(&self) -> u8 {
        self.0[2]
    }

    pub fn a(&self) -> u8 {
        self.0[3]
    }

    /// Умножить RGB на коэффициент яркости, альфа сохраняется
    pub fn shaded(&self, intensity: f64) -> Self {
        let k = intensity.clamp(0.0, 1.0);
        let scale = |c: u8| (c as f64 * k).round().clamp(0.0, 255.0) as u8;
        Self([scale(self.0[0]), scale(self.0[1]), scale(self.0[2]), self.0[3]])
    }

    /// Тот же цвет с другой альфой
    pub fn with_alpha(&self, a: u8) -> Self {
        Self([self.0[0], self.0[1], self.0[2], a])
    }
}

/// Текстовая метка, привязанная к точке в 3D
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Label {
    pub text: String,
    pub position: [f64; 3],
}

/// Метаданные многогранника: именованные скаляры и флаги
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Metadata {
    /// Отображаемое имя (например, «Куб»)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Скаляры: inradius, midradius, circumradius и т.п.
    #[serde(default)]
    pub scalars: BTreeMap<String, f64>,
    /// Флаги производителя (например, `regular`)
    #[serde(default)]
    pub flags: BTreeMap<String, bool>,
}

impl Metadata {
    pub fn scalar(&self, key: &str) -> Option<f64> {
        self.scalars.get(key).copied()
    }

    pub fn flag(&self, key: &str) -> bool {
        self.flags.get(key).copied().unwrap_or(false)
    }

    /// Радиус, пригодный для отрисовки сферы (конечный и положительный)
    pub fn positive_radius(&self, key: &str) -> Option<f64> {
        self.scalar(key).filter(|r| r.is_finite() && *r > 0.0)
    }
}

/// Геометрия многогранника, передаваемая во вьюер целиком.
///
/// Вьюер никогда не изменяет payload: новый payload полностью заменяет старый.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MeshPayload {
    pub vertices: Vec<[f64; 3]>,
    /// Неупорядоченные пары индексов вершин
    #[serde(default)]
    pub edges: Vec<[usize; 2]>,
    /// Плоские грани (≥ 3 индексов каждая)
    #[serde(default)]
    pub faces: Vec<Vec<usize>>,
    /// Цвет грани по её индексу
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub face_colors: BTreeMap<usize, Rgba>,
    #[serde(default)]
    pub metadata: Metadata,
    /// Двойственный многогранник (рисуется полупрозрачным «призраком»)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dual: Option<Box<MeshPayload>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<Label>,
}

/// Ошибки разбора и проверки payload
#[derive(Debug, thiserror::Error)]
pub enum PayloadError {
    #[error("edge {edge} references vertex {index}, but only {len} vertices exist")]
    EdgeIndexOutOfRange { edge: usize, index: usize, len: usize },
    #[error("face {face} references vertex {index}, but only {len} vertices exist")]
    FaceIndexOutOfRange { face: usize, index: usize, len: usize },
    #[error("face {face} has {count} vertices, at least 3 are required")]
    DegenerateFace { face: usize, count: usize },
    #[error("vertex {0} has a non-finite coordinate")]
    NonFiniteVertex(usize),
    #[error("dual mesh: {0}")]
    Dual(Box<PayloadError>),
    #[error("invalid payload JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl MeshPayload {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Позиция вершины, если индекс корректен
    pub fn vertex(&self, index: usize) -> Option<[f64; 3]> {
        self.vertices.get(index).copied()
    }

    /// Проверить индексы рёбер и граней (рекурсивно для dual)
    pub fn validate(&self) -> Result<(), PayloadError> {
        let len = self.vertices.len();

        if let Some(i) = self
            .vertices
            .iter()
            .position(|v| v.iter().any(|c| !c.is_finite()))
        {
            return Err(PayloadError::NonFiniteVertex(i));
        }

        for (edge, pair) in self.edges.iter().enumerate() {
            if let Some(&index) = pair.iter().find(|&&i| i >= len) {
                return Err(PayloadError::EdgeIndexOutOfRange { edge, index, len });
            }
        }

        for (face, indices) in self.faces.iter().enumerate() {
            if indices.len() < 3 {
                return Err(PayloadError::DegenerateFace {
                    face,
                    count: indices.len(),
                });
            }
            if let Some(&index) = indices.iter().find(|&&i| i >= len) {
                return Err(PayloadError::FaceIndexOutOfRange { face, index, len });
            }
        }

        if let Some(dual) = &self.dual {
            dual.validate().map_err(|e| PayloadError::Dual(Box::new(e)))?;
        }

        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self, PayloadError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, PayloadError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> MeshPayload {
        MeshPayload {
            vertices: vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
            edges: vec![[0, 1], [1, 2], [2, 0]],
            faces: vec![vec![0, 1, 2]],
            ..Default::default()
        }
    }

    #[test]
    fn test_validate_ok() {
        assert!(triangle().validate().is_ok());
    }

    #[test]
    fn test_validate_edge_out_of_range() {
        let mut p = triangle();
        p.edges.push([1, 7]);
        match p.validate() {
            Err(PayloadError::EdgeIndexOutOfRange { edge, index, len }) => {
                assert_eq!((edge, index, len), (3, 7, 3));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_validate_degenerate_face() {
        let mut p = triangle();
        p.faces.push(vec![0, 1]);
        assert!(matches!(
            p.validate(),
            Err(PayloadError::DegenerateFace { face: 1, count: 2 })
        ));
    }

    #[test]
    fn test_validate_recurses_into_dual() {
        let mut dual = triangle();
        dual.faces.push(vec![0, 1, 9]);
        let mut p = triangle();
        p.dual = Some(Box::new(dual));
        assert!(matches!(p.validate(), Err(PayloadError::Dual(_))));
    }

    #[test]
    fn test_validate_non_finite() {
        let mut p = triangle();
        p.vertices[1][2] = f64::NAN;
        assert!(matches!(p.validate(), Err(PayloadError::NonFiniteVertex(1))));
    }

    #[test]
    fn test_from_json_minimal() {
        let p = MeshPayload::from_json(r#"{"vertices": [[0,0,0],[1,0,0]], "edges": [[0,1]]}"#)
            .unwrap();
        assert_eq!(p.vertex_count(), 2);
        assert!(p.faces.is_empty());
        assert!(p.dual.is_none());
    }

    #[test]
    fn test_from_json_metadata() {
        let json = r#"{
            "vertices": [[0,0,0]],
            "metadata": {"name": "Dot", "scalars": {"circumradius": 1.5}, "flags": {"regular": true}},
            "face_colors": {"0": [10, 20, 30, 255]}
        }"#;
        let p = MeshPayload::from_json(json).unwrap();
        assert_eq!(p.metadata.name.as_deref(), Some("Dot"));
        assert_eq!(p.metadata.positive_radius(CIRCUMRADIUS), Some(1.5));
        assert!(p.metadata.flag("regular"));
        assert_eq!(p.face_colors.get(&0), Some(&Rgba([10, 20, 30, 255])));
    }

    #[test]
    fn test_from_json_invalid_fails() {
        assert!(matches!(
            MeshPayload::from_json(r#"{"edges": []}"#),
            Err(PayloadError::Json(_))
        ));
    }

    #[test]
    fn test_positive_radius_rejects_zero() {
        let mut m = Metadata::default();
        m.scalars.insert(INRADIUS.into(), 0.0);
        m.scalars.insert(MIDRADIUS.into(), -1.0);
        assert_eq!(m.positive_radius(INRADIUS), None);
        assert_eq!(m.positive_radius(MIDRADIUS), None);
        assert_eq!(m.positive_radius(CIRCUMRADIUS), None);
    }

    #[test]
    fn test_rgba_shaded_keeps_alpha() {
        let c = Rgba::rgba(200, 100, 50, 128).shaded(0.5);
        assert_eq!(c, Rgba([100, 50, 25, 128]));
    }
}
