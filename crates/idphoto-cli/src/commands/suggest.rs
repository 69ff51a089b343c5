use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use idphoto_core::crop::{suggest_crop_detailed, AutoCropConfig};
use idphoto_core::io::load_image;
use idphoto_core::removal::RemovalMethod;

use super::CropArgs;

#[derive(Args)]
pub struct SuggestArgs {
    /// Input image (JPEG, PNG or GIF)
    pub file: PathBuf,

    #[command(flatten)]
    pub crop: CropArgs,
}

pub fn run(args: &SuggestArgs) -> Result<()> {
    let image = load_image(&args.file)
        .with_context(|| format!("Failed to load {}", args.file.display()))?;

    let mut config = AutoCropConfig::default();
    let mut removal = RemovalMethod::default();
    args.crop.apply(&mut config, &mut removal)?;

    let remover = removal.build();
    let cutout = remover
        .remove_background(&image)
        .context("Background removal failed")?;
    let suggestion = suggest_crop_detailed(&cutout, &config)?;
    let pixels = suggestion.rect.to_pixel_rect(image.width(), image.height())?;

    crate::summary::print_suggestion(&args.file, &image, &config, &suggestion, &pixels);
    Ok(())
}
