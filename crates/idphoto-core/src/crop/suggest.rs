use tracing::{debug, info};

use crate::consts::{
    FALLBACK_HEIGHT_FRACTION, FALLBACK_LEFT_FRACTION, FALLBACK_TOP_FRACTION,
    FALLBACK_WIDTH_FRACTION, MIN_CROP_SIDE,
};
use crate::detection::{
    estimate_head_shoulder, scan_foreground, ForegroundBounds, ForegroundScan, SilhouetteEstimate,
};
use crate::error::{IdPhotoError, Result};
use crate::raster::RasterImage;

use super::config::AutoCropConfig;
use super::rect::{check_aspect_ratio, CropRect};

/// A crop suggestion together with the measurements that produced it.
#[derive(Clone, Debug, PartialEq)]
pub struct CropSuggestion {
    pub rect: CropRect,
    /// Foreground bounds, `None` when the fallback box was used.
    pub bounds: Option<ForegroundBounds>,
    pub silhouette: Option<SilhouetteEstimate>,
}

impl CropSuggestion {
    /// True when no foreground was found and the fixed fallback box was returned.
    pub fn is_fallback(&self) -> bool {
        self.bounds.is_none()
    }
}

/// Suggest a crop rectangle for a background-removed portrait.
///
/// Pure and deterministic: the same pixels and config always give the same
/// rectangle. The result always lies inside the image and has the configured
/// aspect ratio. Fails only for a zero-area image or an invalid config.
pub fn suggest_crop(image: &RasterImage, config: &AutoCropConfig) -> Result<CropRect> {
    suggest_crop_detailed(image, config).map(|s| s.rect)
}

/// Like [`suggest_crop`], also returning the foreground bounds and the
/// head/shoulder estimate.
pub fn suggest_crop_detailed(
    image: &RasterImage,
    config: &AutoCropConfig,
) -> Result<CropSuggestion> {
    if image.is_empty() {
        return Err(IdPhotoError::InvalidImage {
            width: image.width(),
            height: image.height(),
        });
    }
    let ratio = check_aspect_ratio(config.aspect_ratio)?;
    if !(config.width_fraction.is_finite() && config.width_fraction > 0.0) {
        return Err(IdPhotoError::InvalidCrop(format!(
            "width_fraction must be > 0, got {}",
            config.width_fraction
        )));
    }

    let img_w = image.width() as f64;
    let img_h = image.height() as f64;

    let Some(scan) = scan_foreground(image) else {
        let rect = fallback_rect(img_w, img_h, ratio);
        info!(
            left = rect.left,
            top = rect.top,
            width = rect.width,
            height = rect.height,
            "No foreground detected, using fallback crop"
        );
        return Ok(CropSuggestion {
            rect,
            bounds: None,
            silhouette: None,
        });
    };

    let silhouette = estimate_head_shoulder(&scan);
    let rect = synthesize(&scan, &silhouette, img_w, img_h, ratio, config);

    info!(
        left = rect.left,
        top = rect.top,
        width = rect.width,
        height = rect.height,
        "Suggested crop"
    );

    Ok(CropSuggestion {
        rect,
        bounds: Some(scan.bounds),
        silhouette: Some(silhouette),
    })
}

/// Combine bounds, head estimate and aspect ratio into one rectangle.
fn synthesize(
    scan: &ForegroundScan,
    silhouette: &SilhouetteEstimate,
    img_w: f64,
    img_h: f64,
    ratio: f64,
    config: &AutoCropConfig,
) -> CropRect {
    let bounds = scan.bounds;
    let min_y = bounds.min_y as f64;
    let person_w = bounds.span_x() as f64;
    let person_h = bounds.span_y() as f64;
    let center_x = scan.mean_row_center();

    let (width, height) = candidate_size(person_w, person_h, ratio, config.width_fraction);
    let (width, height) = fit_to_image(width, height, img_w, img_h, ratio);

    // Headroom within [10%, 20%] of crop height, never more than the head itself.
    let headroom = config.clamped_headroom_fraction() * height;
    let buffer = headroom.min(silhouette.head_span(min_y));
    let top = min_y.max(silhouette.head_end_y - buffer);
    let left = center_x - width / 2.0;

    debug!(
        person_w,
        person_h,
        center_x,
        headroom = buffer,
        "Crop synthesis inputs"
    );

    clamp_to_image(CropRect::new(left, top, width, height), img_w, img_h)
}

/// Size the crop from the foreground extent at the requested aspect ratio.
///
/// Prefers deriving height from width; switches to deriving width from height
/// when that is the only way to stay inside the foreground bounds. If neither
/// fits, the smaller box wins.
fn candidate_size(person_w: f64, person_h: f64, ratio: f64, fraction: f64) -> (f64, f64) {
    let base_w = (person_w * fraction).max(MIN_CROP_SIDE);
    let base_h = (person_h * fraction).max(MIN_CROP_SIDE);

    let from_width = (base_w, base_w / ratio);
    let from_height = (base_h * ratio, base_h);

    if from_width.1 <= person_h.max(MIN_CROP_SIDE) {
        from_width
    } else if from_height.0 <= person_w.max(MIN_CROP_SIDE) {
        from_height
    } else if from_width.0 * from_width.1 <= from_height.0 * from_height.1 {
        from_width
    } else {
        from_height
    }
}

/// Shrink `(width, height)` proportionally until it fits the image.
fn fit_to_image(width: f64, height: f64, img_w: f64, img_h: f64, ratio: f64) -> (f64, f64) {
    if width <= img_w && height <= img_h {
        return (width, height);
    }
    if width / img_w >= height / img_h {
        (img_w, (img_w / ratio).min(img_h))
    } else {
        ((img_h * ratio).min(img_w), img_h)
    }
}

/// The fixed fallback box, shrunk to the target aspect ratio around its center.
fn fallback_rect(img_w: f64, img_h: f64, ratio: f64) -> CropRect {
    let box_w = img_w * FALLBACK_WIDTH_FRACTION;
    let box_h = img_h * FALLBACK_HEIGHT_FRACTION;

    let (width, height) = if box_w / box_h > ratio {
        (box_h * ratio, box_h)
    } else {
        (box_w, box_w / ratio)
    };

    let left = img_w * FALLBACK_LEFT_FRACTION + (box_w - width) / 2.0;
    let top = img_h * FALLBACK_TOP_FRACTION + (box_h - height) / 2.0;

    clamp_to_image(CropRect::new(left, top, width, height), img_w, img_h)
}

/// Move the rectangle inside the image. Size must already fit.
fn clamp_to_image(rect: CropRect, img_w: f64, img_h: f64) -> CropRect {
    let left = rect.left.min(img_w - rect.width).max(0.0);
    let top = rect.top.min(img_h - rect.height).max(0.0);
    CropRect::new(left, top, rect.width, rect.height)
}
