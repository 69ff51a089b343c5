#![allow(dead_code)]

use idphoto_core::raster::RasterImage;

/// Opaque skin-ish color used for synthetic subjects.
pub const SUBJECT: [u8; 4] = [200, 160, 140, 255];

/// Fully transparent background pixel.
pub const CLEAR: [u8; 4] = [0, 0, 0, 0];

/// Transparent image with an opaque rectangle covering columns `x0..=x1`
/// and rows `y0..=y1`.
pub fn rect_silhouette(width: u32, height: u32, x0: u32, x1: u32, y0: u32, y1: u32) -> RasterImage {
    let mut img = RasterImage::filled(width, height, CLEAR);
    for y in y0..=y1 {
        for x in x0..=x1 {
            img.set_pixel(x, y, SUBJECT);
        }
    }
    img
}

/// Synthetic 200x300 head-and-shoulders cut-out, symmetric about x = 100.
///
/// - head: disk centered at (100, 80), radius 30 -> rows 50..=110
/// - neck: columns 88..=112, rows 105..=129
/// - shoulders: columns 30..=170, rows 130..=299
pub fn portrait() -> RasterImage {
    let (w, h) = (200u32, 300u32);
    let mut img = RasterImage::filled(w, h, CLEAR);
    for y in 0..h {
        for x in 0..w {
            let dx = x as i64 - 100;
            let dy = y as i64 - 80;
            let head = dx * dx + dy * dy <= 30 * 30;
            let neck = (88..=112).contains(&x) && (105..=129).contains(&y);
            let shoulders = (30..=170).contains(&x) && y >= 130;
            if head || neck || shoulders {
                img.set_pixel(x, y, SUBJECT);
            }
        }
    }
    img
}

/// Add a faint halo (alpha at the visibility threshold) around the whole image border.
pub fn with_faint_border(mut img: RasterImage, alpha: u8) -> RasterImage {
    let (w, h) = (img.width(), img.height());
    for x in 0..w {
        img.set_pixel(x, 0, [255, 255, 255, alpha]);
        img.set_pixel(x, h - 1, [255, 255, 255, alpha]);
    }
    for y in 0..h {
        img.set_pixel(0, y, [255, 255, 255, alpha]);
        img.set_pixel(w - 1, y, [255, 255, 255, alpha]);
    }
    img
}

/// Assert the crop has positive size and lies inside a `w`x`h` image.
pub fn assert_within(rect: &idphoto_core::crop::CropRect, w: u32, h: u32) {
    const EPS: f64 = 1e-9;
    assert!(rect.width > 0.0 && rect.height > 0.0, "empty crop {rect:?}");
    assert!(rect.left >= 0.0, "left < 0: {rect:?}");
    assert!(rect.top >= 0.0, "top < 0: {rect:?}");
    assert!(rect.right() <= w as f64 + EPS, "right > {w}: {rect:?}");
    assert!(rect.bottom() <= h as f64 + EPS, "bottom > {h}: {rect:?}");
}
