//! The mesh viewing pipeline

use crate::status::{
    vertex_count_status, StatusSink, STATUS_EXPORT_ERROR, STATUS_LOAD_ERROR, STATUS_VIEWER_ERROR,
};
use crate::surface::{DisplaySurface, PayloadHandle};
use meshwire_algorithms::{analyze_scene, derive_wireframe, WireframeStyle};
use meshwire_io::{read_scene, ExportOptions, GltfExporter};
use std::path::PathBuf;
use thiserror::Error;

/// Pipeline progress, advanced strictly left to right; the bracketed
/// states are terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Idle,
    Loading,
    LoadFailed,
    Analyzed,
    Exporting,
    ExportFailed,
    Displayed,
    ViewerError,
    Released,
}

/// The pipeline's three-way failure taxonomy. Each variant is fatal to
/// the run and has already been surfaced through the status sink when
/// returned.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("error loading mesh: {0}")]
    Load(#[source] meshwire_core::Error),

    #[error("error preparing mesh: {0}")]
    Export(#[source] meshwire_core::Error),

    #[error("viewer rejected payload: {0}")]
    Viewer(#[source] meshwire_core::Error),
}

/// Summary of a completed pipeline run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunReport {
    pub state: PipelineState,
    pub vertex_count: usize,
    pub primitive_count: usize,
}

/// Loads a mesh asset, derives its wireframe view, exports it, and hands
/// the payload to a display surface.
///
/// The status sink and display surface are injected capabilities; status
/// updates are strictly ordered by stage completion. `run` consumes the
/// pipeline, so a run happens at most once per pipeline value.
pub struct ViewerPipeline<'a, S: StatusSink, D: DisplaySurface> {
    asset_path: PathBuf,
    status: &'a mut S,
    surface: &'a mut D,
    style: WireframeStyle,
    state: PipelineState,
}

impl<'a, S: StatusSink, D: DisplaySurface> ViewerPipeline<'a, S, D> {
    pub fn new(asset_path: impl Into<PathBuf>, status: &'a mut S, surface: &'a mut D) -> Self {
        Self {
            asset_path: asset_path.into(),
            status,
            surface,
            style: WireframeStyle::default(),
            state: PipelineState::Idle,
        }
    }

    /// Override the derived wireframe style
    pub fn with_style(mut self, style: WireframeStyle) -> Self {
        self.style = style;
        self
    }

    pub fn state(&self) -> PipelineState {
        self.state
    }

    /// Run the pipeline to completion.
    ///
    /// The vertex count is published as soon as analysis finishes, so it
    /// is visible even if the export subsequently fails. On the
    /// surface's visibility signal the payload handle is released,
    /// exactly once; a surface rejection leaves the handle to drop with
    /// the run instead.
    pub fn run(mut self) -> Result<RunReport, PipelineError> {
        self.state = PipelineState::Loading;
        let scene = match read_scene(&self.asset_path) {
            Ok(scene) => scene,
            Err(e) => {
                log::error!("Error loading mesh: {e}");
                self.status.publish(STATUS_LOAD_ERROR);
                self.state = PipelineState::LoadFailed;
                return Err(PipelineError::Load(e));
            }
        };

        let stats = analyze_scene(&scene);
        self.status.publish(&vertex_count_status(stats.vertex_count));
        self.state = PipelineState::Analyzed;

        let wireframe = derive_wireframe(&scene, &stats, &self.style);

        self.state = PipelineState::Exporting;
        let options = ExportOptions::binary().with_only_visible(true);
        let payload = match GltfExporter::encode(&wireframe, &options) {
            Ok(payload) => payload,
            Err(e) => {
                log::error!("Error exporting mesh to GLB: {e}");
                self.status.publish(STATUS_EXPORT_ERROR);
                self.state = PipelineState::ExportFailed;
                return Err(PipelineError::Export(e));
            }
        };

        let mut handle = PayloadHandle::new(payload);
        self.state = PipelineState::Displayed;
        match self.surface.present(&handle) {
            Ok(()) => {
                handle.release();
                self.state = PipelineState::Released;
                Ok(RunReport {
                    state: self.state,
                    vertex_count: stats.vertex_count,
                    primitive_count: wireframe.primitive_count(),
                })
            }
            Err(e) => {
                log::error!("Viewer rejected payload: {e}");
                self.status.publish(STATUS_VIEWER_ERROR);
                self.state = PipelineState::ViewerError;
                Err(PipelineError::Viewer(e))
            }
        }
    }
}
