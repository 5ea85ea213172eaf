//! Derived renderable primitives and the wireframe scene container

use crate::geometry::MeshGeometry;
use crate::point::Vector3f;
use std::sync::Arc;

/// A flat, lighting-independent material for derived primitives
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatMaterial {
    pub color: [u8; 3],
    pub opacity: f32,
    /// Marks the primitive to be displayed without physically based
    /// shading, carried into the export as `KHR_materials_unlit`
    pub unlit: bool,
}

/// How a derived primitive is rendered
#[derive(Debug, Clone, PartialEq)]
pub enum Topology {
    /// One point per source vertex position
    Points { size: f32 },
    /// One line segment per unique undirected edge
    Lines { edges: Vec<[u32; 2]> },
}

impl Topology {
    pub fn is_points(&self) -> bool {
        matches!(self, Topology::Points { .. })
    }

    pub fn is_lines(&self) -> bool {
        matches!(self, Topology::Lines { .. })
    }
}

/// A renderable primitive derived from a source mesh.
///
/// The position buffer is shared with the source geometry; only the line
/// topology owns derived data.
#[derive(Debug, Clone)]
pub struct RenderPrimitive {
    pub geometry: Arc<MeshGeometry>,
    pub topology: Topology,
    pub material: FlatMaterial,
    pub frustum_culled: bool,
    pub visible: bool,
}

impl RenderPrimitive {
    /// Create a point-cloud primitive sharing the source positions
    pub fn points(geometry: Arc<MeshGeometry>, size: f32, material: FlatMaterial) -> Self {
        Self {
            geometry,
            topology: Topology::Points { size },
            material,
            frustum_culled: true,
            visible: true,
        }
    }

    /// Create a line-segment primitive over the given edge list
    pub fn lines(geometry: Arc<MeshGeometry>, edges: Vec<[u32; 2]>, material: FlatMaterial) -> Self {
        Self {
            geometry,
            topology: Topology::Lines { edges },
            material,
            frustum_culled: true,
            visible: true,
        }
    }
}

/// The output container for derived primitives: a fresh, parent-less
/// group recentered on the origin by a single group-level translation
#[derive(Debug, Clone)]
pub struct WireframeScene {
    pub name: String,
    pub translation: Vector3f,
    pub primitives: Vec<RenderPrimitive>,
}

impl WireframeScene {
    /// Create an empty container with no translation
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            translation: Vector3f::zeros(),
            primitives: Vec::new(),
        }
    }

    /// Append a derived primitive
    pub fn push(&mut self, primitive: RenderPrimitive) {
        self.primitives.push(primitive);
    }

    /// Number of derived primitives
    pub fn primitive_count(&self) -> usize {
        self.primitives.len()
    }

    /// Check if the container holds no primitives
    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    /// Number of point-cloud primitives
    pub fn point_primitive_count(&self) -> usize {
        self.primitives
            .iter()
            .filter(|p| p.topology.is_points())
            .count()
    }

    /// Number of line-segment primitives
    pub fn line_primitive_count(&self) -> usize {
        self.primitives
            .iter()
            .filter(|p| p.topology.is_lines())
            .count()
    }
}
