use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_ASPECT_RATIO, DEFAULT_CROP_WIDTH_FRACTION, DEFAULT_HEADROOM_FRACTION,
    HEADROOM_MAX_FRACTION, HEADROOM_MIN_FRACTION,
};

/// Configuration for the foreground-aware crop suggestion.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AutoCropConfig {
    /// Target width / height of the crop box.
    #[serde(default = "default_aspect_ratio")]
    pub aspect_ratio: f64,
    /// Fraction of the detected foreground size used for the crop box.
    #[serde(default = "default_width_fraction")]
    pub width_fraction: f64,
    /// Headroom above the head boundary as a fraction of crop height.
    /// Clamped to [0.1, 0.2] at use.
    #[serde(default = "default_headroom_fraction")]
    pub headroom_fraction: f64,
}

fn default_aspect_ratio() -> f64 {
    DEFAULT_ASPECT_RATIO
}
fn default_width_fraction() -> f64 {
    DEFAULT_CROP_WIDTH_FRACTION
}
fn default_headroom_fraction() -> f64 {
    DEFAULT_HEADROOM_FRACTION
}

impl Default for AutoCropConfig {
    fn default() -> Self {
        Self {
            aspect_ratio: DEFAULT_ASPECT_RATIO,
            width_fraction: DEFAULT_CROP_WIDTH_FRACTION,
            headroom_fraction: DEFAULT_HEADROOM_FRACTION,
        }
    }
}

impl AutoCropConfig {
    /// Default config with a different target aspect ratio.
    pub fn with_aspect_ratio(aspect_ratio: f64) -> Self {
        Self {
            aspect_ratio,
            ..Self::default()
        }
    }

    /// Headroom fraction actually applied, clamped to [0.1, 0.2].
    pub fn clamped_headroom_fraction(&self) -> f64 {
        self.headroom_fraction
            .clamp(HEADROOM_MIN_FRACTION, HEADROOM_MAX_FRACTION)
    }
}
