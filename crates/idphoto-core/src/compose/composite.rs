use image::imageops;
use image::{Rgba, RgbaImage};
use tracing::debug;

use crate::crop::CropRect;
use crate::error::Result;
use crate::raster::RasterImage;

use super::color::BackgroundColor;

/// Cut `rect` out of `image`, rounding to whole pixels and clamping to bounds.
pub fn crop_image(image: &RasterImage, rect: &CropRect) -> Result<RasterImage> {
    let px = rect.to_pixel_rect(image.width(), image.height())?;
    let src = image.to_rgba_image()?;
    let cropped = imageops::crop_imm(&src, px.x, px.y, px.width, px.height).to_image();
    debug!(x = px.x, y = px.y, width = px.width, height = px.height, "Cropped image");
    RasterImage::from_rgba_image(cropped)
}

/// Fill an opaque canvas with `color`, then draw `image` over it (source-over).
///
/// The result is fully opaque and has the same size as `image`.
pub fn composite_on_color(image: &RasterImage, color: BackgroundColor) -> Result<RasterImage> {
    let src = image.to_rgba_image()?;
    let mut canvas = RgbaImage::from_pixel(image.width(), image.height(), Rgba(color.to_rgba()));
    imageops::overlay(&mut canvas, &src, 0, 0);
    RasterImage::from_rgba_image(canvas)
}

/// Crop and composite in one step.
pub fn render_id_photo(
    image: &RasterImage,
    rect: &CropRect,
    color: BackgroundColor,
) -> Result<RasterImage> {
    let cropped = crop_image(image, rect)?;
    composite_on_color(&cropped, color)
}
