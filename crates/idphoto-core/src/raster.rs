use image::RgbaImage;
use ndarray::{Array3, ArrayView2, Axis};

use crate::consts::{ALPHA_OFFSET, RGBA_CHANNELS};
use crate::error::{IdPhotoError, Result};

/// A decoded RGBA8 image.
/// Pixel data is row-major, shape = (height, width, 4), alpha at channel 3.
#[derive(Clone, Debug, PartialEq)]
pub struct RasterImage {
    pub data: Array3<u8>,
}

impl RasterImage {
    /// Wrap a raw RGBA byte buffer. The buffer length must be `width * height * 4`.
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize * RGBA_CHANNELS;
        if pixels.len() != expected {
            return Err(IdPhotoError::InvalidImage { width, height });
        }
        let data = Array3::from_shape_vec((height as usize, width as usize, RGBA_CHANNELS), pixels)?;
        Ok(Self { data })
    }

    /// Image filled with a single RGBA value.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let mut data = Array3::<u8>::zeros((height as usize, width as usize, RGBA_CHANNELS));
        for mut pixel in data.lanes_mut(Axis(2)) {
            for (c, v) in pixel.iter_mut().enumerate() {
                *v = rgba[c];
            }
        }
        Self { data }
    }

    pub fn width(&self) -> u32 {
        self.data.dim().1 as u32
    }

    pub fn height(&self) -> u32 {
        self.data.dim().0 as u32
    }

    /// True when the image has zero area.
    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Alpha value at `(x, y)`.
    pub fn alpha(&self, x: u32, y: u32) -> u8 {
        self.data[[y as usize, x as usize, ALPHA_OFFSET]]
    }

    /// RGBA value at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let (row, col) = (y as usize, x as usize);
        [
            self.data[[row, col, 0]],
            self.data[[row, col, 1]],
            self.data[[row, col, 2]],
            self.data[[row, col, 3]],
        ]
    }

    /// Set the RGBA value at `(x, y)`.
    pub fn set_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        let (row, col) = (y as usize, x as usize);
        for (c, &v) in rgba.iter().enumerate() {
            self.data[[row, col, c]] = v;
        }
    }

    /// View of one row, shape = (width, 4).
    pub fn row(&self, y: usize) -> ArrayView2<'_, u8> {
        self.data.index_axis(Axis(0), y)
    }

    /// True if at least one pixel is not fully opaque.
    pub fn has_transparency(&self) -> bool {
        self.data
            .index_axis(Axis(2), ALPHA_OFFSET)
            .iter()
            .any(|&a| a < u8::MAX)
    }

    /// Copy the pixels out as a flat RGBA byte buffer.
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        self.data.iter().copied().collect()
    }

    /// Convert to an `image` crate buffer for encoding and compositing.
    pub fn to_rgba_image(&self) -> Result<RgbaImage> {
        let (w, h) = (self.width(), self.height());
        RgbaImage::from_raw(w, h, self.to_rgba_bytes())
            .ok_or(IdPhotoError::InvalidImage { width: w, height: h })
    }

    pub fn from_rgba_image(img: RgbaImage) -> Result<Self> {
        let (w, h) = img.dimensions();
        Self::from_rgba(w, h, img.into_raw())
    }
}
