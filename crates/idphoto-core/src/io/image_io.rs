use std::io::Cursor;
use std::path::Path;

use image::{DynamicImage, ImageFormat, ImageReader};
use tracing::debug;

use crate::error::{IdPhotoError, Result};
use crate::raster::RasterImage;

/// Upload formats accepted for decoding.
pub const ACCEPTED_FORMATS: &[ImageFormat] = &[ImageFormat::Jpeg, ImageFormat::Png, ImageFormat::Gif];

fn check_format(format: Option<ImageFormat>, source: &str) -> Result<ImageFormat> {
    match format {
        Some(f) if ACCEPTED_FORMATS.contains(&f) => Ok(f),
        Some(f) => Err(IdPhotoError::UnsupportedFormat(format!("{source}: {f:?}"))),
        None => Err(IdPhotoError::UnsupportedFormat(format!(
            "{source}: unrecognized image data"
        ))),
    }
}

fn to_raster(img: DynamicImage) -> Result<RasterImage> {
    RasterImage::from_rgba_image(img.to_rgba8())
}

/// Load a JPEG, PNG or GIF file into an RGBA raster.
///
/// The format is sniffed from the file contents, not the extension.
pub fn load_image(path: &Path) -> Result<RasterImage> {
    let reader = ImageReader::open(path)?.with_guessed_format()?;
    let format = check_format(reader.format(), &path.display().to_string())?;
    let img = reader.decode()?;
    debug!(path = %path.display(), ?format, width = img.width(), height = img.height(), "Decoded image");
    to_raster(img)
}

/// Decode an in-memory JPEG, PNG or GIF into an RGBA raster.
pub fn decode_image(bytes: &[u8]) -> Result<RasterImage> {
    let format = check_format(image::guess_format(bytes).ok(), "input")?;
    let img = image::load_from_memory_with_format(bytes, format)?;
    to_raster(img)
}

/// Encode a raster as PNG bytes.
pub fn encode_png(image: &RasterImage) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    image
        .to_rgba_image()?
        .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)?;
    Ok(buf)
}

/// Save a raster as PNG regardless of the path's extension.
pub fn save_png(image: &RasterImage, path: &Path) -> Result<()> {
    image
        .to_rgba_image()?
        .save_with_format(path, ImageFormat::Png)?;
    Ok(())
}
