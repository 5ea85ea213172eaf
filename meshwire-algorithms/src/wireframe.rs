//! Point-cloud and wireframe derivation

use crate::analysis::SceneStats;
use meshwire_core::{FlatMaterial, RenderPrimitive, SceneNode, WireframeScene};
use std::sync::Arc;

/// Ratio of derived point size to the scene's bounding diagonal. Tuned
/// for legibility across model scales; not derived from geometry.
pub const POINT_SIZE_RATIO: f32 = 0.006;

/// Warm brass accent applied to all derived primitives
pub const ACCENT_COLOR: [u8; 3] = [179, 163, 105];

/// Opacity of derived point clouds
pub const POINT_OPACITY: f32 = 0.95;

/// Opacity of derived line segments
pub const LINE_OPACITY: f32 = 0.90;

/// Name of the derived output container
pub const WIREFRAME_GROUP_NAME: &str = "wireframe-view";

/// Visual style applied to derived primitives
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WireframeStyle {
    pub color: [u8; 3],
    pub point_opacity: f32,
    pub line_opacity: f32,
    pub point_size_ratio: f32,
}

impl Default for WireframeStyle {
    fn default() -> Self {
        Self {
            color: ACCENT_COLOR,
            point_opacity: POINT_OPACITY,
            line_opacity: LINE_OPACITY,
            point_size_ratio: POINT_SIZE_RATIO,
        }
    }
}

impl WireframeStyle {
    /// Set the shared primitive color
    pub fn with_color(mut self, color: [u8; 3]) -> Self {
        self.color = color;
        self
    }

    /// Set the point-size-to-diagonal ratio
    pub fn with_point_size_ratio(mut self, ratio: f32) -> Self {
        self.point_size_ratio = ratio;
        self
    }
}

/// Derive a point-cloud + wireframe view of a scene hierarchy.
///
/// For every mesh primitive, in traversal order, the output container
/// receives exactly one point primitive (sharing the source position
/// buffer) and one line primitive (one segment per unique undirected
/// edge). Frustum culling is disabled on both: after recentering their
/// bounds no longer match the source bounds, and culling against stale
/// bounds would make them vanish. The container is recentered on the
/// origin by a single group-level translation, applied after all
/// primitives are collected.
///
/// A scene with no mesh primitives derives to a valid empty container.
pub fn derive_wireframe(
    root: &SceneNode,
    stats: &SceneStats,
    style: &WireframeStyle,
) -> WireframeScene {
    let point_size = stats.diagonal * style.point_size_ratio;
    let mut scene = WireframeScene::new(WIREFRAME_GROUP_NAME);

    for instance in root.mesh_instances() {
        let point_material = FlatMaterial {
            color: style.color,
            opacity: style.point_opacity,
            unlit: true,
        };
        let mut points =
            RenderPrimitive::points(Arc::clone(instance.geometry), point_size, point_material);
        points.frustum_culled = false;
        scene.push(points);

        let line_material = FlatMaterial {
            color: style.color,
            opacity: style.line_opacity,
            unlit: true,
        };
        let edges = instance.geometry.unique_edges();
        let mut lines = RenderPrimitive::lines(Arc::clone(instance.geometry), edges, line_material);
        lines.frustum_culled = false;
        scene.push(lines);
    }

    scene.translation = -stats.center.coords;
    scene
}
