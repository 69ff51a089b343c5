use std::path::Path;

use tracing::info;

use crate::crop::CropRect;
use crate::error::{IdPhotoError, Result};
use crate::io::load_image;
use crate::raster::RasterImage;
use crate::session::PhotoSession;

use super::config::PhotoConfig;
use super::types::{NoOpReporter, PhotoOutput, PipelineStage, ProgressReporter};

/// Drive one in-memory photo through removal, crop proposal and compositing.
///
/// The estimator always runs once; `manual_crop`, when given, replaces its
/// proposal the way a user drag in the cropping widget would.
pub fn process_photo(
    image: &RasterImage,
    config: &PhotoConfig,
    manual_crop: Option<CropRect>,
    reporter: &dyn ProgressReporter,
) -> Result<PhotoOutput> {
    let mut session = PhotoSession::new();
    run_session(&mut session, image, config, manual_crop, reporter)?;
    finish(&session, manual_crop.is_some())
}

fn run_session(
    session: &mut PhotoSession,
    image: &RasterImage,
    config: &PhotoConfig,
    manual_crop: Option<CropRect>,
    reporter: &dyn ProgressReporter,
) -> Result<()> {
    let remover = config.removal.build();
    info!(
        width = image.width(),
        height = image.height(),
        remover = remover.name(),
        "Processing photo"
    );

    reporter.begin_stage(PipelineStage::RemovingBackground);
    session.upload(image, remover.as_ref())?;
    reporter.finish_stage();

    reporter.begin_stage(PipelineStage::ProposingCrop);
    session.propose_crop(&config.auto_crop)?;
    if let Some(rect) = manual_crop {
        session.adjust_crop(rect)?;
    }
    reporter.finish_stage();

    reporter.begin_stage(PipelineStage::Compositing);
    session.composite(config.background)?;
    reporter.finish_stage();

    info!(background = %config.background, "Photo composited");
    Ok(())
}

fn finish(session: &PhotoSession, manual_crop: bool) -> Result<PhotoOutput> {
    match (session.output(), session.crop(), session.suggestion()) {
        (Some(image), Some(crop), Some(suggestion)) => Ok(PhotoOutput {
            image: image.clone(),
            crop,
            suggestion: suggestion.clone(),
            manual_crop,
        }),
        _ => Err(IdPhotoError::InvalidTransition {
            from: session.stage().to_string(),
            to: "output".into(),
        }),
    }
}

/// Load `input`, process it and write the PNG to `config.output`.
pub fn process_file_reported(
    input: &Path,
    config: &PhotoConfig,
    manual_crop: Option<CropRect>,
    reporter: &dyn ProgressReporter,
) -> Result<PhotoOutput> {
    reporter.begin_stage(PipelineStage::Reading);
    let image = load_image(input)?;
    reporter.finish_stage();

    let mut session = PhotoSession::new();
    run_session(&mut session, &image, config, manual_crop, reporter)?;

    reporter.begin_stage(PipelineStage::Writing);
    let png = session.export_png()?;
    std::fs::write(&config.output, png)?;
    reporter.finish_stage();

    info!(output = %config.output.display(), "ID photo saved");
    finish(&session, manual_crop.is_some())
}

/// Load `input`, process it and write the PNG to `config.output`.
pub fn process_file(
    input: &Path,
    config: &PhotoConfig,
    manual_crop: Option<CropRect>,
) -> Result<PhotoOutput> {
    process_file_reported(input, config, manual_crop, &NoOpReporter)
}
