use crate::crop::{CropRect, CropSuggestion};
use crate::raster::RasterImage;

/// Pipeline processing stage, used for progress reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PipelineStage {
    Reading,
    RemovingBackground,
    ProposingCrop,
    Compositing,
    Writing,
}

impl std::fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Reading => write!(f, "Reading image"),
            Self::RemovingBackground => write!(f, "Removing background"),
            Self::ProposingCrop => write!(f, "Proposing crop"),
            Self::Compositing => write!(f, "Compositing background"),
            Self::Writing => write!(f, "Writing output"),
        }
    }
}

/// Result of processing one photo.
#[derive(Clone, Debug)]
pub struct PhotoOutput {
    /// Opaque, cropped, composited photo.
    pub image: RasterImage,
    /// Crop actually applied, in source pixels.
    pub crop: CropRect,
    /// Estimator output for this photo, kept even when a manual crop overrode it.
    pub suggestion: CropSuggestion,
    /// True when `crop` came from the caller rather than the estimator.
    pub manual_crop: bool,
}

/// Thread-safe progress reporting for the pipeline.
///
/// Implementors can use this to drive progress bars, logging, or any other
/// UI feedback. All methods have default no-op implementations.
pub trait ProgressReporter: Send + Sync {
    /// A new pipeline stage has started.
    fn begin_stage(&self, _stage: PipelineStage) {}

    /// The current stage is finished.
    fn finish_stage(&self) {}
}

/// Progress reporter that ignores everything.
pub struct NoOpReporter;
impl ProgressReporter for NoOpReporter {}
