//! Scene bounding-volume and vertex-count analysis

use meshwire_core::{Aabb, Point3f, SceneNode, Vector3f};

/// Diagonal substituted for degenerate or empty bounding volumes, so a
/// zero-size scene never produces a zero visual scale downstream
pub const FALLBACK_DIAGONAL: f32 = 1.0;

/// Summary of a scene hierarchy's world-space geometry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneStats {
    /// Center of the world-space bounding volume
    pub center: Point3f,
    /// Extent of the bounding volume along each axis
    pub size: Vector3f,
    /// Length of the bounding-volume diagonal, never zero
    pub diagonal: f32,
    /// Total vertex positions across every mesh primitive
    pub vertex_count: usize,
}

/// Compute the world-space bounding volume, characteristic diagonal, and
/// total vertex count of a scene hierarchy.
///
/// The input tree is only read. Primitives without position data
/// contribute nothing. An empty or degenerate scene yields a diagonal of
/// [`FALLBACK_DIAGONAL`] with the center at the origin.
pub fn analyze_scene(root: &SceneNode) -> SceneStats {
    let mut bounds: Option<Aabb> = None;
    let mut vertex_count = 0;

    for instance in root.mesh_instances() {
        vertex_count += instance.geometry.vertex_count();
        for position in &instance.geometry.positions {
            let world = instance.world.transform_point(position);
            match bounds.as_mut() {
                Some(aabb) => aabb.grow(world),
                None => bounds = Some(Aabb::from_point(world)),
            }
        }
    }

    let (center, size) = match bounds {
        Some(aabb) => (aabb.center(), aabb.size()),
        None => (Point3f::origin(), Vector3f::zeros()),
    };
    let diagonal = match size.norm() {
        d if d > 0.0 => d,
        _ => FALLBACK_DIAGONAL,
    };

    SceneStats {
        center,
        size,
        diagonal,
        vertex_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use meshwire_core::{GroupNode, MeshGeometry, MeshNode, Transform3D, Vector3};
    use std::sync::Arc;

    fn mesh_with_vertices(count: usize) -> MeshNode {
        let positions = (0..count)
            .map(|i| Point3f::new(i as f32, 0.0, 0.0))
            .collect();
        MeshNode::new(Arc::new(MeshGeometry::from_positions_and_faces(
            positions,
            Vec::new(),
        )))
    }

    #[test]
    fn vertex_count_is_additive() {
        let mut root = GroupNode::new("root");
        for n in [2, 3, 4] {
            root.push(mesh_with_vertices(n).into());
        }
        let stats = analyze_scene(&root.into());
        assert_eq!(stats.vertex_count, 9);
    }

    #[test]
    fn empty_scene_reports_zero_vertices_and_fallback_diagonal() {
        let stats = analyze_scene(&GroupNode::new("empty").into());
        assert_eq!(stats.vertex_count, 0);
        assert_eq!(stats.center, Point3f::origin());
        assert_eq!(stats.size, Vector3f::zeros());
        assert_relative_eq!(stats.diagonal, FALLBACK_DIAGONAL);
    }

    #[test]
    fn degenerate_bounds_fall_back_to_unit_diagonal() {
        // All vertices at the same position: a zero-size box
        let geometry = Arc::new(MeshGeometry::from_positions_and_faces(
            vec![Point3f::new(5.0, 5.0, 5.0); 3],
            vec![[0, 1, 2]],
        ));
        let stats = analyze_scene(&MeshNode::new(geometry).into());
        assert_relative_eq!(stats.diagonal, FALLBACK_DIAGONAL);
        assert!(stats.diagonal.is_finite());
        assert_eq!(stats.center, Point3f::new(5.0, 5.0, 5.0));
    }

    #[test]
    fn bounds_are_measured_in_world_space() {
        let geometry = Arc::new(MeshGeometry::from_positions_and_faces(
            vec![Point3f::new(-1.0, -1.0, -1.0), Point3f::new(1.0, 1.0, 1.0)],
            Vec::new(),
        ));
        let mut mesh = MeshNode::new(geometry);
        mesh.transform = Transform3D::translation(Vector3::new(1.0, 1.0, 1.0));

        let stats = analyze_scene(&mesh.into());
        assert_eq!(stats.center, Point3f::new(1.0, 1.0, 1.0));
        assert_relative_eq!(stats.size.x, 2.0);
        assert_relative_eq!(stats.diagonal, 12.0_f32.sqrt());
    }
}
