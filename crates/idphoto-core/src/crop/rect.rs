use serde::{Deserialize, Serialize};

use crate::error::{IdPhotoError, Result};

/// A crop rectangle in source-image pixel coordinates, before rounding.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CropRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl CropRect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Width divided by height.
    pub fn aspect_ratio(&self) -> f64 {
        self.width / self.height
    }

    /// True if the rectangle has positive size and lies inside a `w`x`h` image.
    pub fn fits_within(&self, w: u32, h: u32) -> bool {
        self.width > 0.0
            && self.height > 0.0
            && self.left >= 0.0
            && self.top >= 0.0
            && self.right() <= w as f64
            && self.bottom() <= h as f64
    }

    /// Validate against source dimensions.
    pub fn validated(&self, w: u32, h: u32) -> Result<CropRect> {
        if !(self.width > 0.0 && self.height > 0.0) {
            return Err(IdPhotoError::InvalidCrop(
                "Crop width and height must be > 0".into(),
            ));
        }
        if !self.fits_within(w, h) {
            return Err(IdPhotoError::InvalidCrop(format!(
                "Crop region ({:.1},{:.1} {:.1}x{:.1}) exceeds source dimensions ({w}x{h})",
                self.left, self.top, self.width, self.height
            )));
        }
        Ok(*self)
    }

    /// Map from natural pixel coordinates into a display surface scaled by `scale`.
    pub fn to_display(&self, scale: f64) -> CropRect {
        CropRect::new(
            self.left * scale,
            self.top * scale,
            self.width * scale,
            self.height * scale,
        )
    }

    /// Map a rectangle from a display surface scaled by `scale` back to natural pixels.
    pub fn from_display(display: &CropRect, scale: f64) -> Result<CropRect> {
        if !(scale.is_finite() && scale > 0.0) {
            return Err(IdPhotoError::InvalidCrop(format!(
                "Display scale must be > 0, got {scale}"
            )));
        }
        Ok(display.to_display(1.0 / scale))
    }

    /// Round to whole pixels, clamped to a `w`x`h` image.
    ///
    /// Edges are rounded independently so adjacent crops tile without gaps.
    pub fn to_pixel_rect(&self, w: u32, h: u32) -> Result<PixelRect> {
        let x0 = (self.left.round().max(0.0) as u32).min(w);
        let y0 = (self.top.round().max(0.0) as u32).min(h);
        let x1 = (self.right().round().max(0.0) as u32).min(w);
        let y1 = (self.bottom().round().max(0.0) as u32).min(h);

        if x1 <= x0 || y1 <= y0 {
            return Err(IdPhotoError::InvalidCrop(format!(
                "Crop region ({:.1},{:.1} {:.1}x{:.1}) rounds to an empty area",
                self.left, self.top, self.width, self.height
            )));
        }

        Ok(PixelRect {
            x: x0,
            y: y0,
            width: x1 - x0,
            height: y1 - y0,
        })
    }
}

/// A crop rectangle snapped to whole pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Parse an aspect ratio written as `w:h`, `w/h` or a plain decimal.
pub fn parse_aspect_ratio(s: &str) -> Result<f64> {
    let s = s.trim();
    let invalid = || IdPhotoError::Parse(format!("Invalid aspect ratio '{s}'"));
    let ratio = match s.split_once([':', '/']) {
        Some((w, h)) => {
            let w: f64 = w.trim().parse().map_err(|_| invalid())?;
            let h: f64 = h.trim().parse().map_err(|_| invalid())?;
            w / h
        }
        None => s.parse().map_err(|_| invalid())?,
    };
    check_aspect_ratio(ratio)
}

/// Reject ratios that are not finite and positive.
pub fn check_aspect_ratio(ratio: f64) -> Result<f64> {
    if ratio.is_finite() && ratio > 0.0 {
        Ok(ratio)
    } else {
        Err(IdPhotoError::InvalidAspectRatio(ratio))
    }
}
