//! glTF 2.0 scene export
//!
//! Re-encodes a derived wireframe scene as a self-contained glTF payload:
//! binary GLB by default, or a textual glTF JSON document. Every derived
//! primitive becomes one glTF mesh node (mode `POINTS` or `LINES`) under a
//! single root node carrying the container's recentering translation.
//! Unlit materials are marked with `KHR_materials_unlit`.

use gltf_json as json;
use gltf_json::validation::Checked::Valid;
use meshwire_core::{Error, RenderPrimitive, Result, Topology, WireframeScene};
use std::collections::BTreeMap;
use std::path::Path;

/// Media type of a binary glTF payload
pub const GLB_MEDIA_TYPE: &str = "model/gltf-binary";

/// Media type of a textual glTF payload
pub const GLTF_MEDIA_TYPE: &str = "model/gltf+json";

/// Options passed to the encoder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportOptions {
    /// Emit a GLB container instead of a JSON document
    pub binary: bool,
    /// Skip primitives whose visible flag is unset
    pub only_visible: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            binary: true,
            only_visible: false,
        }
    }
}

impl ExportOptions {
    /// Options for a binary (GLB) export
    pub fn binary() -> Self {
        Self {
            binary: true,
            ..Default::default()
        }
    }

    /// Options for a textual (glTF JSON) export
    pub fn text() -> Self {
        Self {
            binary: false,
            ..Default::default()
        }
    }

    /// Restrict the export to visible primitives
    pub fn with_only_visible(mut self, only_visible: bool) -> Self {
        self.only_visible = only_visible;
        self
    }
}

/// An encoded scene: an opaque binary buffer or a textual document,
/// tagged with its media type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportedPayload {
    Binary(Vec<u8>),
    Json(String),
}

impl ExportedPayload {
    /// The payload's media type
    pub fn media_type(&self) -> &'static str {
        match self {
            ExportedPayload::Binary(_) => GLB_MEDIA_TYPE,
            ExportedPayload::Json(_) => GLTF_MEDIA_TYPE,
        }
    }

    /// The payload's raw bytes
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            ExportedPayload::Binary(bytes) => bytes,
            ExportedPayload::Json(text) => text.as_bytes(),
        }
    }

    /// Consume the payload into its raw bytes
    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            ExportedPayload::Binary(bytes) => bytes,
            ExportedPayload::Json(text) => text.into_bytes(),
        }
    }
}

pub struct GltfExporter;

impl GltfExporter {
    /// Encode a wireframe scene into a glTF payload.
    ///
    /// An empty container encodes to a valid document with a lone root
    /// node and no buffer data.
    pub fn encode(scene: &WireframeScene, options: &ExportOptions) -> Result<ExportedPayload> {
        let mut doc = DocumentState::default();

        let mut children = Vec::new();
        for primitive in &scene.primitives {
            if options.only_visible && !primitive.visible {
                continue;
            }
            children.push(doc.add_primitive_node(primitive));
        }

        let root_index = doc.nodes.len() as u32;
        doc.nodes.push(json::Node {
            camera: None,
            children: if children.is_empty() {
                None
            } else {
                Some(children.iter().map(|c| json::Index::new(*c)).collect())
            },
            extensions: Default::default(),
            extras: Default::default(),
            matrix: None,
            mesh: None,
            name: Some(scene.name.clone()),
            rotation: None,
            scale: None,
            skin: None,
            translation: Some([
                scene.translation.x,
                scene.translation.y,
                scene.translation.z,
            ]),
            weights: None,
        });

        let root = doc.into_root(root_index);
        if options.binary {
            Ok(ExportedPayload::Binary(assemble_glb(&root)?))
        } else {
            let text = json::serialize::to_string(&root.document)
                .map_err(|e| Error::Export(format!("failed to serialize glTF JSON: {e}")))?;
            Ok(ExportedPayload::Json(text))
        }
    }
}

pub struct GltfWriter;

impl GltfWriter {
    /// Encode and write a wireframe scene to disk, dispatching binary or
    /// textual encoding on the `.glb`/`.gltf` extension
    pub fn write_scene<P: AsRef<Path>>(scene: &WireframeScene, path: P) -> Result<()> {
        let path = path.as_ref();
        let options = match path.extension().and_then(|s| s.to_str()) {
            Some("glb") => ExportOptions::binary(),
            Some("gltf") => ExportOptions::text(),
            other => {
                return Err(Error::UnsupportedFormat(format!(
                    "Unsupported export format: {:?}",
                    other
                )))
            }
        };
        let payload = GltfExporter::encode(scene, &options)?;
        std::fs::write(path, payload.as_bytes())?;
        Ok(())
    }
}

/// A root document paired with its packed binary buffer
struct EncodedRoot {
    document: json::Root,
    buffer: Vec<u8>,
}

/// Accumulates glTF arrays while primitives are appended
#[derive(Default)]
struct DocumentState {
    buffer: Vec<u8>,
    views: Vec<json::buffer::View>,
    accessors: Vec<json::Accessor>,
    materials: Vec<json::Material>,
    meshes: Vec<json::Mesh>,
    nodes: Vec<json::Node>,
    unlit_used: bool,
}

impl DocumentState {
    /// Append one derived primitive as a mesh node, returning the node
    /// index. Primitives with no position data become bare nodes.
    fn add_primitive_node(&mut self, primitive: &RenderPrimitive) -> u32 {
        let index = self.nodes.len();
        let (kind, mesh) = match &primitive.topology {
            Topology::Points { .. } => ("points", self.build_mesh(primitive, None)),
            Topology::Lines { edges } => ("lines", self.build_mesh(primitive, Some(edges))),
        };
        self.nodes.push(json::Node {
            camera: None,
            children: None,
            extensions: Default::default(),
            extras: Default::default(),
            matrix: None,
            mesh,
            name: Some(format!("{kind}-{index}")),
            rotation: None,
            scale: None,
            skin: None,
            translation: None,
            weights: None,
        });
        index as u32
    }

    fn build_mesh(
        &mut self,
        primitive: &RenderPrimitive,
        edges: Option<&[[u32; 2]]>,
    ) -> Option<json::Index<json::Mesh>> {
        if primitive.geometry.is_empty() {
            return None;
        }
        // A line mesh with no edges would degenerate to implicit
        // consecutive pairs; emit a bare node instead
        if matches!(edges, Some(e) if e.is_empty()) {
            return None;
        }

        let positions = self.pack_positions(&primitive.geometry.positions);
        let indices = edges.map(|e| self.pack_edge_indices(e));
        let material = self.add_material(primitive);

        let mut attributes = BTreeMap::new();
        attributes.insert(
            Valid(json::mesh::Semantic::Positions),
            json::Index::new(positions),
        );

        let mode = match primitive.topology {
            Topology::Points { .. } => json::mesh::Mode::Points,
            Topology::Lines { .. } => json::mesh::Mode::Lines,
        };

        let mesh_index = self.meshes.len() as u32;
        self.meshes.push(json::Mesh {
            extensions: Default::default(),
            extras: Default::default(),
            name: None,
            primitives: vec![json::mesh::Primitive {
                attributes,
                extensions: Default::default(),
                extras: Default::default(),
                indices: indices.map(json::Index::new),
                material: Some(json::Index::new(material)),
                mode: Valid(mode),
                targets: None,
            }],
            weights: None,
        });
        Some(json::Index::new(mesh_index))
    }

    /// Pack vertex positions as a VEC3/F32 accessor with bounds
    fn pack_positions(&mut self, positions: &[meshwire_core::Point3f]) -> u32 {
        let offset = self.buffer.len();
        let mut min = [f32::MAX; 3];
        let mut max = [f32::MIN; 3];
        for p in positions {
            let coords = [p.x, p.y, p.z];
            for i in 0..3 {
                min[i] = min[i].min(coords[i]);
                max[i] = max[i].max(coords[i]);
            }
            self.buffer.extend_from_slice(bytemuck::cast_slice(&coords));
        }

        self.views.push(json::buffer::View {
            buffer: json::Index::new(0),
            byte_length: (positions.len() * 12).into(),
            byte_offset: Some((offset as u64).into()),
            byte_stride: None,
            extensions: Default::default(),
            extras: Default::default(),
            name: None,
            target: Some(Valid(json::buffer::Target::ArrayBuffer)),
        });

        let accessor_index = self.accessors.len() as u32;
        self.accessors.push(json::Accessor {
            buffer_view: Some(json::Index::new(self.views.len() as u32 - 1)),
            byte_offset: Some(0u64.into()),
            count: positions.len().into(),
            component_type: Valid(json::accessor::GenericComponentType(
                json::accessor::ComponentType::F32,
            )),
            extensions: Default::default(),
            extras: Default::default(),
            type_: Valid(json::accessor::Type::Vec3),
            min: Some(json::Value::Array(
                min.into_iter().map(json::Value::from).collect(),
            )),
            max: Some(json::Value::Array(
                max.into_iter().map(json::Value::from).collect(),
            )),
            name: None,
            normalized: false,
            sparse: None,
        });
        accessor_index
    }

    /// Pack an edge list as a SCALAR/U32 index accessor, two indices per
    /// segment
    fn pack_edge_indices(&mut self, edges: &[[u32; 2]]) -> u32 {
        let offset = self.buffer.len();
        for [a, b] in edges {
            self.buffer.extend_from_slice(&a.to_le_bytes());
            self.buffer.extend_from_slice(&b.to_le_bytes());
        }

        self.views.push(json::buffer::View {
            buffer: json::Index::new(0),
            byte_length: (edges.len() * 8).into(),
            byte_offset: Some((offset as u64).into()),
            byte_stride: None,
            extensions: Default::default(),
            extras: Default::default(),
            name: None,
            target: Some(Valid(json::buffer::Target::ElementArrayBuffer)),
        });

        let accessor_index = self.accessors.len() as u32;
        self.accessors.push(json::Accessor {
            buffer_view: Some(json::Index::new(self.views.len() as u32 - 1)),
            byte_offset: Some(0u64.into()),
            count: (edges.len() * 2).into(),
            component_type: Valid(json::accessor::GenericComponentType(
                json::accessor::ComponentType::U32,
            )),
            extensions: Default::default(),
            extras: Default::default(),
            type_: Valid(json::accessor::Type::Scalar),
            min: None,
            max: None,
            name: None,
            normalized: false,
            sparse: None,
        });
        accessor_index
    }

    /// Append a flat alpha-blended material, marking it unlit when the
    /// primitive asks for lighting-independent display
    fn add_material(&mut self, primitive: &RenderPrimitive) -> u32 {
        let [r, g, b] = primitive.material.color;
        let extensions = if primitive.material.unlit {
            self.unlit_used = true;
            Some(json::extensions::material::Material {
                unlit: Some(json::extensions::material::Unlit {}),
                ..Default::default()
            })
        } else {
            None
        };

        let material_index = self.materials.len() as u32;
        self.materials.push(json::Material {
            alpha_mode: Valid(json::material::AlphaMode::Blend),
            pbr_metallic_roughness: json::material::PbrMetallicRoughness {
                base_color_factor: json::material::PbrBaseColorFactor([
                    r as f32 / 255.0,
                    g as f32 / 255.0,
                    b as f32 / 255.0,
                    primitive.material.opacity,
                ]),
                metallic_factor: json::material::StrengthFactor(0.0),
                roughness_factor: json::material::StrengthFactor(1.0),
                ..Default::default()
            },
            extensions,
            ..Default::default()
        });
        material_index
    }

    fn into_root(self, root_node: u32) -> EncodedRoot {
        let buffers = if self.buffer.is_empty() {
            Vec::new()
        } else {
            vec![json::Buffer {
                byte_length: self.buffer.len().into(),
                extensions: Default::default(),
                extras: Default::default(),
                name: None,
                uri: None,
            }]
        };

        let document = json::Root {
            accessors: self.accessors,
            asset: json::Asset {
                generator: Some(concat!("meshwire ", env!("CARGO_PKG_VERSION")).to_string()),
                ..Default::default()
            },
            buffers,
            buffer_views: self.views,
            extensions_used: if self.unlit_used {
                vec!["KHR_materials_unlit".to_string()]
            } else {
                Vec::new()
            },
            materials: self.materials,
            meshes: self.meshes,
            nodes: self.nodes,
            scene: Some(json::Index::new(0)),
            scenes: vec![json::Scene {
                extensions: Default::default(),
                extras: Default::default(),
                name: Some("Scene".to_string()),
                nodes: vec![json::Index::new(root_node)],
            }],
            ..Default::default()
        };

        EncodedRoot {
            document,
            buffer: self.buffer,
        }
    }
}

/// Assemble a GLB container: 12-byte header, space-padded JSON chunk,
/// zero-padded BIN chunk. The BIN chunk is omitted when there is no
/// buffer data.
fn assemble_glb(root: &EncodedRoot) -> Result<Vec<u8>> {
    let text = json::serialize::to_string(&root.document)
        .map_err(|e| Error::Export(format!("failed to serialize glTF JSON: {e}")))?;
    let mut json_chunk = text.into_bytes();
    while json_chunk.len() % 4 != 0 {
        json_chunk.push(b' ');
    }

    let mut bin_chunk = root.buffer.clone();
    while bin_chunk.len() % 4 != 0 {
        bin_chunk.push(0);
    }

    let mut total = 12 + 8 + json_chunk.len();
    if !bin_chunk.is_empty() {
        total += 8 + bin_chunk.len();
    }

    let mut glb = Vec::with_capacity(total);
    glb.extend_from_slice(b"glTF");
    glb.extend_from_slice(&2u32.to_le_bytes());
    glb.extend_from_slice(&(total as u32).to_le_bytes());

    glb.extend_from_slice(&(json_chunk.len() as u32).to_le_bytes());
    glb.extend_from_slice(b"JSON");
    glb.extend_from_slice(&json_chunk);

    if !bin_chunk.is_empty() {
        glb.extend_from_slice(&(bin_chunk.len() as u32).to_le_bytes());
        glb.extend_from_slice(b"BIN\0");
        glb.extend_from_slice(&bin_chunk);
    }

    Ok(glb)
}

#[cfg(test)]
mod tests {
    use super::*;
    use meshwire_algorithms::{analyze_scene, derive_wireframe, WireframeStyle};
    use meshwire_core::{MeshGeometry, MeshNode, Point3f, SceneNode};
    use std::sync::Arc;

    fn derived_scene() -> WireframeScene {
        let root: SceneNode = MeshNode::new(Arc::new(MeshGeometry::from_positions_and_faces(
            vec![
                Point3f::new(0.0, 0.0, 0.0),
                Point3f::new(2.0, 0.0, 0.0),
                Point3f::new(2.0, 2.0, 0.0),
                Point3f::new(0.0, 2.0, 2.0),
            ],
            vec![[0, 1, 2], [0, 2, 3]],
        )))
        .into();
        let stats = analyze_scene(&root);
        derive_wireframe(&root, &stats, &WireframeStyle::default())
    }

    #[test]
    fn test_glb_roundtrip_structure() {
        let scene = derived_scene();
        let payload = GltfExporter::encode(&scene, &ExportOptions::binary()).unwrap();
        assert_eq!(payload.media_type(), GLB_MEDIA_TYPE);

        let bytes = payload.as_bytes();
        assert_eq!(&bytes[0..4], b"glTF");
        assert_eq!(bytes.len() % 4, 0);

        let gltf = gltf::Gltf::from_slice(bytes).unwrap();
        let doc = &gltf.document;
        assert_eq!(doc.meshes().count(), 2);

        let modes: Vec<_> = doc
            .meshes()
            .flat_map(|m| m.primitives().map(|p| p.mode()).collect::<Vec<_>>())
            .collect();
        assert_eq!(modes, vec![gltf::mesh::Mode::Points, gltf::mesh::Mode::Lines]);

        for material in doc.materials() {
            assert!(material.unlit());
            assert_eq!(material.alpha_mode(), gltf::material::AlphaMode::Blend);
        }
        assert!(doc
            .extensions_used()
            .any(|e| e == "KHR_materials_unlit"));
    }

    #[test]
    fn test_root_node_carries_the_recentering_translation() {
        let scene = derived_scene();
        let payload = GltfExporter::encode(&scene, &ExportOptions::binary()).unwrap();
        let gltf = gltf::Gltf::from_slice(payload.as_bytes()).unwrap();

        let root = gltf
            .document
            .scenes()
            .next()
            .unwrap()
            .nodes()
            .next()
            .unwrap();
        let (translation, _, _) = root.transform().decomposed();
        assert_eq!(
            translation,
            [scene.translation.x, scene.translation.y, scene.translation.z]
        );
        assert_eq!(root.children().count(), 2);
    }

    #[test]
    fn test_text_export_is_parseable_gltf_json() {
        let scene = derived_scene();
        let payload = GltfExporter::encode(&scene, &ExportOptions::text()).unwrap();
        assert_eq!(payload.media_type(), GLTF_MEDIA_TYPE);

        match &payload {
            ExportedPayload::Json(text) => {
                assert!(text.contains("KHR_materials_unlit"));
                let gltf = gltf::Gltf::from_slice(text.as_bytes()).unwrap();
                assert_eq!(gltf.document.meshes().count(), 2);
            }
            ExportedPayload::Binary(_) => panic!("expected a textual payload"),
        }
    }

    #[test]
    fn test_only_visible_filters_primitives() {
        let mut scene = derived_scene();
        scene.primitives[1].visible = false;

        let options = ExportOptions::binary().with_only_visible(true);
        let payload = GltfExporter::encode(&scene, &options).unwrap();
        let gltf = gltf::Gltf::from_slice(payload.as_bytes()).unwrap();
        assert_eq!(gltf.document.meshes().count(), 1);

        // Without the flag both primitives are encoded
        let payload = GltfExporter::encode(&scene, &ExportOptions::binary()).unwrap();
        let gltf = gltf::Gltf::from_slice(payload.as_bytes()).unwrap();
        assert_eq!(gltf.document.meshes().count(), 2);
    }

    #[test]
    fn test_empty_scene_encodes_to_a_valid_document() {
        let scene = WireframeScene::new("wireframe-view");
        let payload = GltfExporter::encode(&scene, &ExportOptions::binary()).unwrap();

        let gltf = gltf::Gltf::from_slice(payload.as_bytes()).unwrap();
        assert_eq!(gltf.document.meshes().count(), 0);
        assert_eq!(gltf.document.buffers().count(), 0);
        assert_eq!(gltf.document.nodes().count(), 1);
    }

    #[test]
    fn test_write_scene_dispatches_on_extension() {
        let scene = derived_scene();

        GltfWriter::write_scene(&scene, "test_export.glb").unwrap();
        let bytes = std::fs::read("test_export.glb").unwrap();
        assert_eq!(&bytes[0..4], b"glTF");

        GltfWriter::write_scene(&scene, "test_export.gltf").unwrap();
        let text = std::fs::read_to_string("test_export.gltf").unwrap();
        assert!(text.starts_with('{'));

        let result = GltfWriter::write_scene(&scene, "test_export.fbx");
        assert!(matches!(result, Err(Error::UnsupportedFormat(_))));

        let _ = std::fs::remove_file("test_export.glb");
        let _ = std::fs::remove_file("test_export.gltf");
    }
}
