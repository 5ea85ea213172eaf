//! Display surfaces and the one-shot payload handle

use meshwire_core::{Error, Result};
use meshwire_io::{ExportedPayload, GLB_MEDIA_TYPE, GLTF_MEDIA_TYPE};
use std::path::PathBuf;

/// A one-shot handle over an exported payload's backing memory.
///
/// The handle is acquired at export success and released exactly once;
/// further `release` calls are safe no-ops. The display surface must not
/// be handed a released handle.
#[derive(Debug)]
pub struct PayloadHandle {
    data: Option<Vec<u8>>,
    media_type: &'static str,
}

impl PayloadHandle {
    /// Wrap an exported payload
    pub fn new(payload: ExportedPayload) -> Self {
        Self {
            media_type: payload.media_type(),
            data: Some(payload.into_bytes()),
        }
    }

    /// The wrapped payload's media type
    pub fn media_type(&self) -> &'static str {
        self.media_type
    }

    /// The payload bytes, or `None` once released
    pub fn bytes(&self) -> Option<&[u8]> {
        self.data.as_deref()
    }

    /// Whether the backing memory has been released
    pub fn is_released(&self) -> bool {
        self.data.is_none()
    }

    /// Release the backing memory. Returns `true` only on the call that
    /// actually performed the release.
    pub fn release(&mut self) -> bool {
        self.data.take().is_some()
    }
}

/// Capability accepting an exported payload for display.
///
/// `Ok` is the surface's one-time visibility signal; `Err` is the
/// independent viewer-error channel.
pub trait DisplaySurface {
    fn present(&mut self, handle: &PayloadHandle) -> Result<()>;
}

/// Display surface writing the payload to a file, after checking that
/// the bytes match the declared media type
pub struct FileSurface {
    path: PathBuf,
}

impl FileSurface {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DisplaySurface for FileSurface {
    fn present(&mut self, handle: &PayloadHandle) -> Result<()> {
        let bytes = handle
            .bytes()
            .ok_or_else(|| Error::InvalidData("payload handle already released".to_string()))?;

        let well_formed = match handle.media_type() {
            GLB_MEDIA_TYPE => bytes.starts_with(b"glTF"),
            GLTF_MEDIA_TYPE => bytes.first() == Some(&b'{'),
            _ => false,
        };
        if !well_formed {
            return Err(Error::UnsupportedFormat(format!(
                "payload does not match media type {}",
                handle.media_type()
            )));
        }

        std::fs::write(&self.path, bytes)?;
        Ok(())
    }
}

/// Display surface that accepts every payload without keeping it
pub struct NullSurface;

impl DisplaySurface for NullSurface {
    fn present(&mut self, handle: &PayloadHandle) -> Result<()> {
        handle
            .bytes()
            .ok_or_else(|| Error::InvalidData("payload handle already released".to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handle() -> PayloadHandle {
        PayloadHandle::new(ExportedPayload::Binary(b"glTF\x02\x00\x00\x00".to_vec()))
    }

    #[test]
    fn release_takes_effect_exactly_once() {
        let mut handle = handle();
        assert!(!handle.is_released());

        // The visibility signal firing twice releases only once
        assert!(handle.release());
        assert!(!handle.release());
        assert!(handle.is_released());
        assert!(handle.bytes().is_none());
    }

    #[test]
    fn file_surface_writes_matching_payloads() {
        let temp_file = "test_surface_out.glb";
        let mut surface = FileSurface::new(temp_file);
        surface.present(&handle()).unwrap();
        assert!(std::fs::read(temp_file).unwrap().starts_with(b"glTF"));
        let _ = std::fs::remove_file(temp_file);
    }

    #[test]
    fn file_surface_rejects_mismatched_payloads() {
        let mut surface = FileSurface::new("test_surface_reject.glb");
        let bogus = PayloadHandle::new(ExportedPayload::Binary(b"not a model".to_vec()));
        assert!(matches!(
            surface.present(&bogus),
            Err(Error::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn released_handles_are_not_presentable() {
        let mut surface = NullSurface;
        let mut handle = handle();
        handle.release();
        assert!(surface.present(&handle).is_err());
    }
}
