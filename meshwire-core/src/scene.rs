//! Scene trees of grouping nodes and mesh primitives

use crate::geometry::MeshGeometry;
use crate::transform::Transform3D;
use std::sync::Arc;

/// A node in a mesh hierarchy: either a grouping container or a mesh
/// primitive. Geometry is shared by reference so derived views can reuse
/// vertex buffers without copying.
#[derive(Debug, Clone)]
pub enum SceneNode {
    Group(GroupNode),
    Mesh(MeshNode),
}

/// A grouping container positioning its children relative to itself
#[derive(Debug, Clone)]
pub struct GroupNode {
    pub name: Option<String>,
    pub transform: Transform3D,
    pub children: Vec<SceneNode>,
}

/// A mesh primitive: shared geometry positioned relative to its parent
#[derive(Debug, Clone)]
pub struct MeshNode {
    pub name: Option<String>,
    pub transform: Transform3D,
    pub geometry: Arc<MeshGeometry>,
}

/// One mesh primitive as encountered during traversal, with its
/// accumulated world transform
#[derive(Debug, Clone)]
pub struct MeshInstance<'a> {
    pub geometry: &'a Arc<MeshGeometry>,
    pub world: Transform3D,
}

impl GroupNode {
    /// Create an empty group with an identity transform
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            transform: Transform3D::identity(),
            children: Vec::new(),
        }
    }

    /// Append a child node
    pub fn push(&mut self, child: SceneNode) {
        self.children.push(child);
    }
}

impl MeshNode {
    /// Create a mesh node with an identity transform
    pub fn new(geometry: Arc<MeshGeometry>) -> Self {
        Self {
            name: None,
            transform: Transform3D::identity(),
            geometry,
        }
    }

    /// Create a named mesh node with an identity transform
    pub fn named(name: impl Into<String>, geometry: Arc<MeshGeometry>) -> Self {
        Self {
            name: Some(name.into()),
            transform: Transform3D::identity(),
            geometry,
        }
    }
}

impl SceneNode {
    /// Flatten the hierarchy into its mesh primitives, depth first.
    ///
    /// Parents are visited before children and siblings keep their
    /// original order, so repeated traversals of the same tree are
    /// identical. Each instance carries the accumulated world transform.
    pub fn mesh_instances(&self) -> Vec<MeshInstance<'_>> {
        let mut instances = Vec::new();
        self.collect_meshes(Transform3D::identity(), &mut instances);
        instances
    }

    /// Number of mesh primitives in the hierarchy
    pub fn mesh_count(&self) -> usize {
        self.mesh_instances().len()
    }

    fn collect_meshes<'a>(&'a self, parent: Transform3D, out: &mut Vec<MeshInstance<'a>>) {
        match self {
            SceneNode::Mesh(mesh) => {
                out.push(MeshInstance {
                    geometry: &mesh.geometry,
                    world: parent * mesh.transform,
                });
            }
            SceneNode::Group(group) => {
                let world = parent * group.transform;
                for child in &group.children {
                    child.collect_meshes(world, out);
                }
            }
        }
    }
}

impl From<GroupNode> for SceneNode {
    fn from(group: GroupNode) -> Self {
        SceneNode::Group(group)
    }
}

impl From<MeshNode> for SceneNode {
    fn from(mesh: MeshNode) -> Self {
        SceneNode::Mesh(mesh)
    }
}
