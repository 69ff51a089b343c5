pub mod colors;
pub mod compose;
pub mod config;
pub mod suggest;

use anyhow::{Context, Result};
use clap::Args;
use idphoto_core::compose::BackgroundColor;
use idphoto_core::consts::DEFAULT_COLOR_KEY_TOLERANCE;
use idphoto_core::crop::{parse_aspect_ratio, AutoCropConfig};
use idphoto_core::removal::RemovalMethod;

/// Options shared by commands that run the crop estimator.
#[derive(Args)]
pub struct CropArgs {
    /// Target aspect ratio as w:h, w/h or a decimal (default 3:4)
    #[arg(long)]
    pub aspect: Option<String>,

    /// Crop size as a fraction of the detected subject size
    #[arg(long)]
    pub width_fraction: Option<f64>,

    /// Headroom above the head as a fraction of crop height (0.1-0.2)
    #[arg(long)]
    pub headroom: Option<f64>,

    /// Key out this backdrop color instead of using the input's alpha
    #[arg(long)]
    pub key_color: Option<String>,

    /// Per-channel tolerance for --key-color
    #[arg(long, default_value_t = DEFAULT_COLOR_KEY_TOLERANCE)]
    pub tolerance: u8,
}

impl CropArgs {
    /// Apply command-line overrides on top of a config.
    pub fn apply(&self, auto_crop: &mut AutoCropConfig, removal: &mut RemovalMethod) -> Result<()> {
        if let Some(ref aspect) = self.aspect {
            auto_crop.aspect_ratio = parse_aspect_ratio(aspect)?;
        }
        if let Some(fraction) = self.width_fraction {
            auto_crop.width_fraction = fraction;
        }
        if let Some(headroom) = self.headroom {
            auto_crop.headroom_fraction = headroom;
        }
        if let Some(ref key) = self.key_color {
            let key: BackgroundColor = key
                .parse()
                .with_context(|| format!("Invalid key color '{key}'"))?;
            *removal = RemovalMethod::ColorKey {
                key,
                tolerance: self.tolerance,
            };
        }
        Ok(())
    }
}
