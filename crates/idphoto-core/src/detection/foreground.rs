use ndarray::ArrayView2;
use rayon::prelude::*;
use tracing::debug;

use crate::consts::{ALPHA_OFFSET, ALPHA_VISIBILITY_THRESHOLD, PARALLEL_PIXEL_THRESHOLD};
use crate::raster::RasterImage;

/// Bounding box of all foreground pixels, inclusive on both ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ForegroundBounds {
    pub min_x: u32,
    pub max_x: u32,
    pub min_y: u32,
    pub max_y: u32,
}

impl ForegroundBounds {
    /// Horizontal extent `max_x - min_x`.
    pub fn span_x(&self) -> u32 {
        self.max_x - self.min_x
    }

    /// Vertical extent `max_y - min_y`.
    pub fn span_y(&self) -> u32 {
        self.max_y - self.min_y
    }
}

/// Horizontal profile of one row that contains foreground.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RowProfile {
    /// Row index in the source image.
    pub y: u32,
    /// Leftmost foreground column.
    pub left: u32,
    /// Rightmost foreground column.
    pub right: u32,
    /// Mean x coordinate of the foreground pixels in this row.
    pub center: f64,
}

impl RowProfile {
    /// `right - left`; zero for a row with a single foreground pixel.
    pub fn width(&self) -> u32 {
        self.right - self.left
    }
}

/// Result of a full-image foreground scan.
#[derive(Clone, Debug, PartialEq)]
pub struct ForegroundScan {
    pub bounds: ForegroundBounds,
    /// Profiles of rows with at least one foreground pixel, top to bottom.
    pub rows: Vec<RowProfile>,
}

impl ForegroundScan {
    /// Unweighted mean of the per-row centers.
    ///
    /// Every row counts once regardless of how many pixels it holds, so a
    /// sparse row pulls the result as hard as a full one.
    pub fn mean_row_center(&self) -> f64 {
        let sum: f64 = self.rows.iter().map(|r| r.center).sum();
        sum / self.rows.len() as f64
    }
}

/// True when an alpha value counts as foreground.
#[inline]
pub fn is_foreground(alpha: u8) -> bool {
    alpha > ALPHA_VISIBILITY_THRESHOLD
}

/// Scan every pixel and collect per-row profiles plus the overall bounds.
///
/// Returns `None` when no pixel has alpha above the visibility threshold.
/// This is a full O(width * height) pass; run it once per loaded image.
pub fn scan_foreground(image: &RasterImage) -> Option<ForegroundScan> {
    let (w, h) = (image.width() as usize, image.height() as usize);
    if w == 0 || h == 0 {
        return None;
    }

    let rows: Vec<RowProfile> = if w * h >= PARALLEL_PIXEL_THRESHOLD {
        (0..h)
            .into_par_iter()
            .filter_map(|y| scan_row(image.row(y), y as u32))
            .collect()
    } else {
        (0..h)
            .filter_map(|y| scan_row(image.row(y), y as u32))
            .collect()
    };

    let first = rows.first()?;
    let last = rows.last()?;

    let mut bounds = ForegroundBounds {
        min_x: first.left,
        max_x: first.right,
        min_y: first.y,
        max_y: last.y,
    };
    for row in &rows[1..] {
        bounds.min_x = bounds.min_x.min(row.left);
        bounds.max_x = bounds.max_x.max(row.right);
    }

    debug!(
        rows = rows.len(),
        min_x = bounds.min_x,
        max_x = bounds.max_x,
        min_y = bounds.min_y,
        max_y = bounds.max_y,
        "Foreground scan complete"
    );

    Some(ForegroundScan { bounds, rows })
}

/// Profile a single row, shape = (width, 4). `None` if the row has no foreground.
fn scan_row(row: ArrayView2<'_, u8>, y: u32) -> Option<RowProfile> {
    let mut left = None;
    let mut right = 0u32;
    let mut sum_x = 0u64;
    let mut count = 0u64;

    for (x, pixel) in row.outer_iter().enumerate() {
        if is_foreground(pixel[ALPHA_OFFSET]) {
            let x = x as u32;
            left.get_or_insert(x);
            right = x;
            sum_x += x as u64;
            count += 1;
        }
    }

    left.map(|left| RowProfile {
        y,
        left,
        right,
        center: sum_x as f64 / count as f64,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image_with(width: u32, height: u32, pixels: &[(u32, u32, u8)]) -> RasterImage {
        let mut img = RasterImage::filled(width, height, [0, 0, 0, 0]);
        for &(x, y, a) in pixels {
            img.set_pixel(x, y, [255, 255, 255, a]);
        }
        img
    }

    #[test]
    fn test_threshold_is_strict() {
        assert!(!is_foreground(10));
        assert!(is_foreground(11));
    }

    #[test]
    fn test_scan_row_profile() {
        let img = image_with(10, 1, &[(2, 0, 255), (3, 0, 255), (7, 0, 200)]);
        let profile = scan_row(img.row(0), 0).unwrap();
        assert_eq!(profile.left, 2);
        assert_eq!(profile.right, 7);
        assert_eq!(profile.width(), 5);
        assert!((profile.center - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_scan_row_ignores_faint_fringe() {
        let img = image_with(6, 1, &[(0, 0, 10), (5, 0, 3)]);
        assert_eq!(scan_row(img.row(0), 0), None);
    }

    #[test]
    fn test_scan_skips_empty_rows() {
        let img = image_with(8, 8, &[(1, 1, 255), (6, 5, 255)]);
        let scan = scan_foreground(&img).unwrap();
        assert_eq!(scan.rows.len(), 2);
        assert_eq!(
            scan.bounds,
            ForegroundBounds {
                min_x: 1,
                max_x: 6,
                min_y: 1,
                max_y: 5
            }
        );
    }

    #[test]
    fn test_mean_row_center_is_unweighted() {
        // Row 0: one pixel at x=0. Row 1: pixels 4..=8 (center 6).
        let mut pixels = vec![(0, 0, 255)];
        pixels.extend((4..=8).map(|x| (x, 1, 255)));
        let img = image_with(10, 2, &pixels);
        let scan = scan_foreground(&img).unwrap();
        assert!((scan.mean_row_center() - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_scan_transparent_is_none() {
        let img = RasterImage::filled(5, 5, [255, 0, 0, 0]);
        assert!(scan_foreground(&img).is_none());
    }
}
