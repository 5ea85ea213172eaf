//! Scene I/O for meshwire
//!
//! This crate reads mesh assets into scene hierarchies and re-encodes
//! derived wireframe scenes as glTF 2.0 payloads, binary (GLB) or JSON.

pub mod gltf;
pub mod obj;

pub use self::gltf::{
    ExportOptions, ExportedPayload, GltfExporter, GltfWriter, GLB_MEDIA_TYPE, GLTF_MEDIA_TYPE,
};
pub use self::obj::ObjReader;

use meshwire_core::{Result, SceneNode};
use std::path::Path;

/// Trait for reading scene hierarchies from mesh files
pub trait SceneReader {
    fn read_scene<P: AsRef<Path>>(path: P) -> Result<SceneNode>;
}

/// Auto-detect format and read a scene hierarchy
pub fn read_scene<P: AsRef<Path>>(path: P) -> Result<SceneNode> {
    let path = path.as_ref();
    match path.extension().and_then(|s| s.to_str()) {
        Some("obj") => obj::ObjReader::read_scene(path),
        _ => Err(meshwire_core::Error::UnsupportedFormat(format!(
            "Unsupported mesh format: {:?}",
            path.extension()
        ))),
    }
}
