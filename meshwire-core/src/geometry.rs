//! Indexed triangle geometry

use crate::point::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Indexed triangle geometry: a vertex position buffer plus triangle faces.
///
/// Geometry without faces is treated as a triangle soup, with consecutive
/// position triples forming implicit triangles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeshGeometry {
    pub positions: Vec<Point3f>,
    pub faces: Vec<[usize; 3]>,
}

impl MeshGeometry {
    /// Create a new empty geometry
    pub fn new() -> Self {
        Self {
            positions: Vec::new(),
            faces: Vec::new(),
        }
    }

    /// Create geometry from a position buffer and triangle faces
    pub fn from_positions_and_faces(positions: Vec<Point3f>, faces: Vec<[usize; 3]>) -> Self {
        Self { positions, faces }
    }

    /// Create a triangle soup from positions alone; every consecutive
    /// triple of positions is one triangle
    pub fn from_triangle_soup(positions: Vec<Point3f>) -> Self {
        Self {
            positions,
            faces: Vec::new(),
        }
    }

    /// Get the number of vertex positions
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Get the number of explicit triangle faces
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Check if the geometry holds no positions
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Iterate the triangles of this geometry, resolving the implicit
    /// triangle-soup faces when no explicit faces are present
    pub fn triangles(&self) -> Vec<[usize; 3]> {
        if !self.faces.is_empty() {
            return self.faces.clone();
        }
        (0..self.positions.len() / 3)
            .map(|i| [3 * i, 3 * i + 1, 3 * i + 2])
            .collect()
    }

    /// Collect every unique undirected edge of this geometry.
    ///
    /// Each edge appears exactly once regardless of how many faces share
    /// it, stored low-index-first and returned in sorted order.
    pub fn unique_edges(&self) -> Vec<[u32; 2]> {
        let mut edges = BTreeSet::new();
        for face in self.triangles() {
            for (a, b) in [(face[0], face[1]), (face[1], face[2]), (face[2], face[0])] {
                let (lo, hi) = if a < b { (a, b) } else { (b, a) };
                edges.insert([lo as u32, hi as u32]);
            }
        }
        edges.into_iter().collect()
    }
}

impl Default for MeshGeometry {
    fn default() -> Self {
        Self::new()
    }
}
