use std::collections::BTreeSet;

use crate::MeshPayload;

/// Осевой ограничивающий параллелепипед
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: [f64; 3],
    pub max: [f64; 3],
}

impl Bounds {
    /// Длина диагонали
    pub fn diagonal(&self) -> f64 {
        let d: f64 = (0..3).map(|i| (self.max[i] - self.min[i]).powi(2)).sum();
        d.sqrt()
    }

    pub fn center(&self) -> [f64; 3] {
        [
            (self.min[0] + self.max[0]) * 0.5,
            (self.min[1] + self.max[1]) * 0.5,
            (self.min[2] + self.max[2]) * 0.5,
        ]
    }
}

impl MeshPayload {
    /// Вершины с конечными координатами; остальные пропускаются
    fn finite_vertices(&self) -> impl Iterator<Item = &[f64; 3]> {
        self.vertices.iter().filter(|v| v.iter().all(|c| c.is_finite()))
    }

    /// Ограничивающий параллелепипед конечных вершин (None, если таких нет)
    pub fn bounds(&self) -> Option<Bounds> {
        let mut finite = self.finite_vertices();
        let first = *finite.next()?;
        let mut b = Bounds { min: first, max: first };
        for v in finite {
            for i in 0..3 {
                b.min[i] = b.min[i].min(v[i]);
                b.max[i] = b.max[i].max(v[i]);
            }
        }
        Some(b)
    }

    /// Геометрический центр: среднее арифметическое конечных вершин
    pub fn centroid(&self) -> [f64; 3] {
        let mut sum = [0.0; 3];
        let mut n = 0usize;
        for v in self.finite_vertices() {
            for i in 0..3 {
                sum[i] += v[i];
            }
            n += 1;
        }
        if n == 0 {
            return [0.0; 3];
        }
        let n = n as f64;
        [sum[0] / n, sum[1] / n, sum[2] / n]
    }

    /// Рёбра для отрисовки: явные, либо выведенные из контуров граней.
    ///
    /// Пары нормализуются (`a < b`), дубликаты и петли отбрасываются.
    pub fn render_edges(&self) -> Vec<[usize; 2]> {
        let mut set = BTreeSet::new();
        let mut insert = |a: usize, b: usize| {
            if a != b {
                set.insert([a.min(b), a.max(b)]);
            }
        };

        if self.edges.is_empty() {
            for face in &self.faces {
                for (k, &a) in face.iter().enumerate() {
                    insert(a, face[(k + 1) % face.len()]);
                }
            }
        } else {
            for &[a, b] in &self.edges {
                insert(a, b);
            }
        }

        set.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> MeshPayload {
        MeshPayload {
            vertices: vec![[0.0, 0.0, 0.0], [2.0, 0.0, 0.0], [2.0, 2.0, 0.0], [0.0, 2.0, 0.0]],
            faces: vec![vec![0, 1, 2, 3]],
            ..Default::default()
        }
    }

    #[test]
    fn test_bounds_and_diagonal() {
        let b = square().bounds().unwrap();
        assert_eq!(b.min, [0.0, 0.0, 0.0]);
        assert_eq!(b.max, [2.0, 2.0, 0.0]);
        assert!((b.diagonal() - 8.0_f64.sqrt()).abs() < 1e-12);
        assert_eq!(b.center(), [1.0, 1.0, 0.0]);
    }

    #[test]
    fn test_bounds_empty() {
        assert!(MeshPayload::default().bounds().is_none());
    }

    #[test]
    fn test_centroid() {
        assert_eq!(square().centroid(), [1.0, 1.0, 0.0]);
        assert_eq!(MeshPayload::default().centroid(), [0.0; 3]);
    }

    #[test]
    fn test_non_finite_vertices_skipped() {
        let mut p = square();
        p.vertices.push([f64::NAN, 0.0, 0.0]);
        p.vertices.push([0.0, f64::INFINITY, 0.0]);
        assert_eq!(p.centroid(), [1.0, 1.0, 0.0]);
        let b = p.bounds().unwrap();
        assert_eq!(b.max, [2.0, 2.0, 0.0]);

        let broken = MeshPayload {
            vertices: vec![[f64::NAN; 3]],
            ..Default::default()
        };
        assert!(broken.bounds().is_none());
        assert_eq!(broken.centroid(), [0.0; 3]);
    }

    #[test]
    fn test_render_edges_from_faces() {
        let edges = square().render_edges();
        assert_eq!(edges, vec![[0, 1], [0, 3], [1, 2], [2, 3]]);
    }

    #[test]
    fn test_render_edges_dedups_explicit_pairs() {
        let mut p = square();
        p.edges = vec![[1, 0], [0, 1], [2, 2], [3, 2]];
        assert_eq!(p.render_edges(), vec![[0, 1], [2, 3]]);
    }
}
