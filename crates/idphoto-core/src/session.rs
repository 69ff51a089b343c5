use std::fmt;

use tracing::{debug, warn};

use crate::compose::{render_id_photo, BackgroundColor};
use crate::crop::{suggest_crop_detailed, AutoCropConfig, CropRect, CropSuggestion};
use crate::error::{IdPhotoError, Result};
use crate::io::encode_png;
use crate::raster::RasterImage;
use crate::removal::BackgroundRemover;

/// Where a photo is in the upload -> crop -> composite -> download flow.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Stage {
    #[default]
    Idle,
    Uploading,
    BackgroundRemoved,
    AutoCropProposed,
    UserAdjustableCrop,
    BackgroundComposited,
    Downloadable,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "Idle"),
            Self::Uploading => write!(f, "Uploading"),
            Self::BackgroundRemoved => write!(f, "Background removed"),
            Self::AutoCropProposed => write!(f, "Crop proposed"),
            Self::UserAdjustableCrop => write!(f, "Crop adjusted"),
            Self::BackgroundComposited => write!(f, "Background composited"),
            Self::Downloadable => write!(f, "Ready to download"),
        }
    }
}

impl Stage {
    /// The allowed-edges table for the session.
    pub fn can_transition_to(self, next: Stage) -> bool {
        use Stage::*;
        matches!(
            (self, next),
            (_, Idle)
                | (Idle, Uploading)
                | (BackgroundRemoved, Uploading)
                | (AutoCropProposed, Uploading)
                | (UserAdjustableCrop, Uploading)
                | (BackgroundComposited, Uploading)
                | (Downloadable, Uploading)
                | (Uploading, BackgroundRemoved)
                | (BackgroundRemoved, AutoCropProposed)
                | (AutoCropProposed, UserAdjustableCrop)
                | (UserAdjustableCrop, UserAdjustableCrop)
                | (BackgroundComposited, UserAdjustableCrop)
                | (Downloadable, UserAdjustableCrop)
                | (AutoCropProposed, BackgroundComposited)
                | (UserAdjustableCrop, BackgroundComposited)
                | (BackgroundComposited, BackgroundComposited)
                | (Downloadable, BackgroundComposited)
                | (BackgroundComposited, Downloadable)
                | (Downloadable, Downloadable)
        )
    }
}

/// All state for one photo, moved between stages by [`PhotoSession::transition`].
///
/// Upload and crop-proposal failures reset to [`Stage::Idle`]. A rejected crop
/// adjustment or composite keeps the current stage. Every failure leaves its
/// message in [`PhotoSession::message`].
#[derive(Clone, Debug, Default)]
pub struct PhotoSession {
    stage: Stage,
    cutout: Option<RasterImage>,
    suggestion: Option<CropSuggestion>,
    crop: Option<CropRect>,
    background: BackgroundColor,
    output: Option<RasterImage>,
    message: Option<String>,
}

impl PhotoSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Last status or error message.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Background-removed source image.
    pub fn cutout(&self) -> Option<&RasterImage> {
        self.cutout.as_ref()
    }

    /// Crop suggested by the estimator for the current upload.
    pub fn proposed_crop(&self) -> Option<CropRect> {
        self.suggestion.as_ref().map(|s| s.rect)
    }

    /// Full estimator output for the current upload.
    pub fn suggestion(&self) -> Option<&CropSuggestion> {
        self.suggestion.as_ref()
    }

    /// Crop that will be used for compositing.
    pub fn crop(&self) -> Option<CropRect> {
        self.crop
    }

    pub fn background(&self) -> BackgroundColor {
        self.background
    }

    /// Composited photo, once available.
    pub fn output(&self) -> Option<&RasterImage> {
        self.output.as_ref()
    }

    fn check(&self, to: Stage) -> Result<()> {
        if self.stage.can_transition_to(to) {
            Ok(())
        } else {
            Err(IdPhotoError::InvalidTransition {
                from: self.stage.to_string(),
                to: to.to_string(),
            })
        }
    }

    /// Move to `to` if the edge is allowed; state is unchanged otherwise.
    pub fn transition(&mut self, to: Stage) -> Result<()> {
        self.check(to)?;
        debug!(from = %self.stage, to = %to, "Session transition");
        self.stage = to;
        Ok(())
    }

    /// Drop all images and return to Idle.
    pub fn reset(&mut self) {
        let background = self.background;
        *self = Self {
            background,
            ..Self::default()
        };
    }

    fn fail(&mut self, err: IdPhotoError) -> IdPhotoError {
        warn!(stage = %self.stage, error = %err, "Session reset after failure");
        self.reset();
        self.message = Some(err.to_string());
        err
    }

    /// Start a new photo: run background removal on `image`.
    ///
    /// Any previous photo is discarded first.
    pub fn upload(&mut self, image: &RasterImage, remover: &dyn BackgroundRemover) -> Result<()> {
        self.check(Stage::Uploading)?;
        self.reset();
        self.transition(Stage::Uploading)?;
        self.message = Some("Processing image".into());

        let cutout = match remover.remove_background(image) {
            Ok(cutout) if cutout.is_empty() => {
                return Err(self.fail(IdPhotoError::InvalidImage {
                    width: cutout.width(),
                    height: cutout.height(),
                }))
            }
            Ok(cutout) => cutout,
            Err(e) => return Err(self.fail(e)),
        };

        self.cutout = Some(cutout);
        self.message = Some("Processing complete".into());
        self.transition(Stage::BackgroundRemoved)
    }

    /// Run the crop estimator once for the current upload.
    pub fn propose_crop(&mut self, config: &AutoCropConfig) -> Result<CropSuggestion> {
        self.check(Stage::AutoCropProposed)?;
        let result = match self.cutout.as_ref() {
            Some(cutout) => suggest_crop_detailed(cutout, config),
            None => Err(IdPhotoError::InvalidImage {
                width: 0,
                height: 0,
            }),
        };
        let suggestion = result.map_err(|e| self.fail(e))?;

        self.crop = Some(suggestion.rect);
        self.suggestion = Some(suggestion.clone());
        self.transition(Stage::AutoCropProposed)?;
        Ok(suggestion)
    }

    /// Replace the active crop with a user-adjusted rectangle in natural pixels.
    pub fn adjust_crop(&mut self, rect: CropRect) -> Result<()> {
        self.check(Stage::UserAdjustableCrop)?;
        let validated = match self.cutout.as_ref() {
            Some(cutout) => rect.validated(cutout.width(), cutout.height()),
            None => Err(IdPhotoError::InvalidCrop("no image loaded".into())),
        };
        let rect = validated.inspect_err(|e| self.message = Some(e.to_string()))?;

        self.crop = Some(rect);
        self.output = None;
        self.transition(Stage::UserAdjustableCrop)
    }

    /// Crop the cutout and draw it over `color`. May be repeated to change color.
    pub fn composite(&mut self, color: BackgroundColor) -> Result<&RasterImage> {
        self.check(Stage::BackgroundComposited)?;
        let rendered = match (self.cutout.as_ref(), self.crop.as_ref()) {
            (Some(cutout), Some(crop)) => render_id_photo(cutout, crop, color),
            _ => Err(IdPhotoError::InvalidCrop("no crop selected".into())),
        };
        let output = rendered.inspect_err(|e| self.message = Some(e.to_string()))?;

        self.background = color;
        self.transition(Stage::BackgroundComposited)?;
        Ok(&*self.output.insert(output))
    }

    /// Encode the composited photo as PNG for download.
    pub fn export_png(&mut self) -> Result<Vec<u8>> {
        self.check(Stage::Downloadable)?;
        let encoded = match self.output.as_ref() {
            Some(output) => encode_png(output),
            None => Err(IdPhotoError::InvalidCrop("nothing composited yet".into())),
        };
        let bytes = encoded.inspect_err(|e| self.message = Some(e.to_string()))?;

        self.transition(Stage::Downloadable)?;
        Ok(bytes)
    }
}
