use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::compose::BackgroundColor;
use crate::consts::{ALPHA_OFFSET, DEFAULT_COLOR_KEY_TOLERANCE};
use crate::error::{IdPhotoError, Result};
use crate::raster::RasterImage;

/// Turns a photo into a cut-out whose background pixels are transparent.
///
/// The ML model that normally does this lives outside this crate; implement
/// this trait to plug it in.
pub trait BackgroundRemover: Send + Sync {
    /// Short name for logs and summaries.
    fn name(&self) -> &str;

    /// Return a copy of `image` with background alpha set to (near) zero.
    fn remove_background(&self, image: &RasterImage) -> Result<RasterImage>;
}

/// For images already cut out by an external tool: alpha is kept as-is.
#[derive(Clone, Copy, Debug, Default)]
pub struct AlphaPassthrough;

impl BackgroundRemover for AlphaPassthrough {
    fn name(&self) -> &str {
        "passthrough"
    }

    fn remove_background(&self, image: &RasterImage) -> Result<RasterImage> {
        if !image.has_transparency() {
            warn!("Input has no transparent pixels; the whole image is treated as foreground");
        }
        Ok(image.clone())
    }
}

/// Keys out a solid backdrop: pixels whose every RGB channel is within
/// `tolerance` of `key` become fully transparent.
#[derive(Clone, Copy, Debug)]
pub struct ColorKeyRemover {
    pub key: BackgroundColor,
    pub tolerance: u8,
}

impl ColorKeyRemover {
    fn matches(&self, rgb: [u8; 3]) -> bool {
        let key = [self.key.r, self.key.g, self.key.b];
        rgb.iter()
            .zip(key.iter())
            .all(|(&c, &k)| c.abs_diff(k) <= self.tolerance)
    }
}

impl BackgroundRemover for ColorKeyRemover {
    fn name(&self) -> &str {
        "color-key"
    }

    fn remove_background(&self, image: &RasterImage) -> Result<RasterImage> {
        let mut out = image.clone();
        let mut keyed = 0usize;
        for mut pixel in out.data.lanes_mut(ndarray::Axis(2)) {
            if self.matches([pixel[0], pixel[1], pixel[2]]) {
                pixel[ALPHA_OFFSET] = 0;
                keyed += 1;
            }
        }

        let total = image.width() as usize * image.height() as usize;
        debug!(key = %self.key, keyed, total, "Color key applied");
        if total > 0 && keyed == total {
            return Err(IdPhotoError::BackgroundRemoval(format!(
                "every pixel matched key color {}",
                self.key
            )));
        }
        Ok(out)
    }
}

/// Background removal strategy, as stored in config files.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum RemovalMethod {
    /// Input already has a transparent background.
    #[default]
    Passthrough,
    /// Key out a solid backdrop color.
    ColorKey {
        key: BackgroundColor,
        #[serde(default = "default_tolerance")]
        tolerance: u8,
    },
}

fn default_tolerance() -> u8 {
    DEFAULT_COLOR_KEY_TOLERANCE
}

impl RemovalMethod {
    pub fn build(&self) -> Box<dyn BackgroundRemover> {
        match self {
            Self::Passthrough => Box::new(AlphaPassthrough),
            Self::ColorKey { key, tolerance } => Box::new(ColorKeyRemover {
                key: *key,
                tolerance: *tolerance,
            }),
        }
    }
}
