//! Wavefront OBJ scene reading

use crate::SceneReader;
use meshwire_core::{Error, GroupNode, MeshGeometry, MeshNode, Point3f, Result, SceneNode};
use obj::ObjData;
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;

pub struct ObjReader;

impl SceneReader for ObjReader {
    /// Read an OBJ file into a scene hierarchy.
    ///
    /// Each OBJ object becomes a group node and each of its non-empty
    /// groups a mesh primitive. Polygons are fan-triangulated and the
    /// file-global vertex indices are remapped to a compact per-group
    /// position buffer. A file with vertices but no faces loads as a
    /// scene with zero mesh primitives.
    fn read_scene<P: AsRef<Path>>(path: P) -> Result<SceneNode> {
        let file = File::open(path)?;
        let data = ObjData::load_buf(BufReader::new(file)).map_err(from_obj_error)?;

        let mut root = GroupNode::new("obj-scene");
        for object in &data.objects {
            let mut object_node = GroupNode::new(object.name.clone());
            for group in &object.groups {
                let geometry = group_geometry(&data, group)?;
                if geometry.is_empty() {
                    continue;
                }
                object_node.push(MeshNode::named(group.name.clone(), Arc::new(geometry)).into());
            }
            if !object_node.children.is_empty() {
                root.push(object_node.into());
            }
        }
        Ok(root.into())
    }
}

fn from_obj_error(error: obj::ObjError) -> Error {
    match error {
        obj::ObjError::Io(io) => Error::Io(io),
        other => Error::InvalidData(other.to_string()),
    }
}

/// Build compact indexed geometry for one OBJ group. Vertex indices are
/// remapped in first-use order.
fn group_geometry(data: &ObjData, group: &obj::Group) -> Result<MeshGeometry> {
    let mut remap: HashMap<usize, usize> = HashMap::new();
    let mut positions: Vec<Point3f> = Vec::new();
    let mut faces = Vec::new();

    for poly in &group.polys {
        let corners = &poly.0;
        if corners.len() < 3 {
            continue;
        }
        let mut local = Vec::with_capacity(corners.len());
        for tuple in corners {
            let global = tuple.0;
            let position = data.position.get(global).ok_or_else(|| {
                Error::InvalidData(format!(
                    "face references vertex {} beyond the {} in the file",
                    global + 1,
                    data.position.len()
                ))
            })?;
            let local_index = *remap.entry(global).or_insert_with(|| {
                positions.push(Point3f::new(position[0], position[1], position[2]));
                positions.len() - 1
            });
            local.push(local_index);
        }
        for i in 1..local.len() - 1 {
            faces.push([local[0], local[i], local[i + 1]]);
        }
    }

    Ok(MeshGeometry::from_positions_and_faces(positions, faces))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_groups_become_mesh_primitives() {
        let temp_file = "test_obj_groups.obj";
        let content = "\
v 0.0 0.0 0.0
v 1.0 0.0 0.0
v 0.0 1.0 0.0
v 2.0 0.0 0.0
v 3.0 0.0 0.0
v 2.0 1.0 0.0
g left
f 1 2 3
g right
f 4 5 6
";
        fs::write(temp_file, content).unwrap();

        let scene = ObjReader::read_scene(temp_file).unwrap();
        let instances = scene.mesh_instances();
        assert_eq!(instances.len(), 2);
        // Each group got its own compact position buffer
        assert_eq!(instances[0].geometry.vertex_count(), 3);
        assert_eq!(instances[1].geometry.vertex_count(), 3);

        let _ = fs::remove_file(temp_file);
    }

    #[test]
    fn test_quads_are_fan_triangulated() {
        let temp_file = "test_obj_quad.obj";
        let content = "\
v 0.0 0.0 0.0
v 1.0 0.0 0.0
v 1.0 1.0 0.0
v 0.0 1.0 0.0
f 1 2 3 4
";
        fs::write(temp_file, content).unwrap();

        let scene = ObjReader::read_scene(temp_file).unwrap();
        let instances = scene.mesh_instances();
        assert_eq!(instances.len(), 1);
        assert_eq!(instances[0].geometry.vertex_count(), 4);
        assert_eq!(
            instances[0].geometry.faces,
            vec![[0, 1, 2], [0, 2, 3]]
        );

        let _ = fs::remove_file(temp_file);
    }

    #[test]
    fn test_vertex_only_file_loads_as_empty_scene() {
        let temp_file = "test_obj_points_only.obj";
        fs::write(temp_file, "v 0 0 0\nv 1 1 1\n").unwrap();

        let scene = ObjReader::read_scene(temp_file).unwrap();
        assert_eq!(scene.mesh_count(), 0);

        let _ = fs::remove_file(temp_file);
    }

    #[test]
    fn test_missing_file_is_an_io_error() {
        let result = ObjReader::read_scene("definitely_not_here.obj");
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_malformed_file_is_invalid_data() {
        let temp_file = "test_obj_malformed.obj";
        fs::write(temp_file, "v one two three\nf 1 2 3\n").unwrap();

        let result = ObjReader::read_scene(temp_file);
        assert!(matches!(result, Err(Error::InvalidData(_))));

        let _ = fs::remove_file(temp_file);
    }

    #[test]
    fn test_faces_share_remapped_vertices() {
        let temp_file = "test_obj_shared.obj";
        let content = "\
v 0.0 0.0 0.0
v 1.0 0.0 0.0
v 1.0 1.0 0.0
v 0.0 1.0 0.0
f 1 2 3
f 1 3 4
";
        fs::write(temp_file, content).unwrap();

        let scene = ObjReader::read_scene(temp_file).unwrap();
        let instances = scene.mesh_instances();
        assert_eq!(instances[0].geometry.vertex_count(), 4);
        assert_eq!(instances[0].geometry.face_count(), 2);
        // The shared diagonal is a single unique edge
        assert_eq!(instances[0].geometry.unique_edges().len(), 5);

        let _ = fs::remove_file(temp_file);
    }
}
