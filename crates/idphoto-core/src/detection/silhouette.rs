use tracing::debug;

use crate::consts::SHOULDER_SPAN_FRACTION;

use super::foreground::ForegroundScan;

/// Head/shoulder split estimated from the row width profile.
///
/// Purely a bias term for vertical crop placement: it has no notion of
/// anatomy and misfires on objects, groups or wide hats.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SilhouetteEstimate {
    /// Row where the silhouette widens the most (head -> shoulder transition).
    pub head_end_y: f64,
    /// Lower edge of the shoulder band.
    pub shoulder_end_y: f64,
}

impl SilhouetteEstimate {
    /// Height of the region above the head/shoulder transition.
    pub fn head_span(&self, min_y: f64) -> f64 {
        (self.head_end_y - min_y).max(0.0)
    }
}

/// Estimate where the head ends and the shoulders begin.
///
/// Takes the row with the largest positive relative width increase over the
/// previous measured row. Rows whose predecessor has zero width are skipped.
/// With no positive increase the whole foreground is treated as head and the
/// transition sits at `min_y`.
pub fn estimate_head_shoulder(scan: &ForegroundScan) -> SilhouetteEstimate {
    let min_y = scan.bounds.min_y as f64;
    let max_y = scan.bounds.max_y as f64;

    let head_end_y = max_width_increase_row(scan)
        .map(|y| y as f64)
        .unwrap_or(min_y);
    let shoulder_end_y = max_y.min(head_end_y + SHOULDER_SPAN_FRACTION * (max_y - min_y));

    debug!(head_end_y, shoulder_end_y, "Head/shoulder estimate");

    SilhouetteEstimate {
        head_end_y,
        shoulder_end_y,
    }
}

/// Row index with the maximum positive relative width change; first wins on ties.
fn max_width_increase_row(scan: &ForegroundScan) -> Option<u32> {
    let mut best: Option<(f64, u32)> = None;

    for pair in scan.rows.windows(2) {
        let prev = pair[0].width();
        if prev == 0 {
            continue;
        }
        let change = (pair[1].width() as f64 - prev as f64) / prev as f64;
        if change <= 0.0 {
            continue;
        }
        match best {
            Some((b, _)) if change <= b => {}
            _ => best = Some((change, pair[1].y)),
        }
    }

    best.map(|(_, y)| y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::foreground::{ForegroundBounds, RowProfile};

    fn scan_from_widths(widths: &[u32]) -> ForegroundScan {
        let rows: Vec<RowProfile> = widths
            .iter()
            .enumerate()
            .map(|(i, &w)| RowProfile {
                y: 10 + i as u32,
                left: 50 - w / 2,
                right: 50 - w / 2 + w,
                center: 50.0,
            })
            .collect();
        let max_w = widths.iter().copied().max().unwrap_or(0);
        ForegroundScan {
            bounds: ForegroundBounds {
                min_x: 50 - max_w / 2,
                max_x: 50 - max_w / 2 + max_w,
                min_y: 10,
                max_y: 10 + widths.len() as u32 - 1,
            },
            rows,
        }
    }

    #[test]
    fn test_transition_at_largest_relative_jump() {
        // Head rows ~10 wide, neck 6, shoulders jump to 30.
        let mut widths = vec![10, 10, 10, 10, 6, 6];
        widths.extend([30; 14]);
        let scan = scan_from_widths(&widths);
        let est = estimate_head_shoulder(&scan);
        assert_eq!(est.head_end_y, 16.0);
        // shoulder_end = min(29, 16 + 0.3 * 19)
        assert!((est.shoulder_end_y - 21.7).abs() < 1e-9);
    }

    #[test]
    fn test_uniform_width_degenerates_to_min_y() {
        let scan = scan_from_widths(&[20; 10]);
        let est = estimate_head_shoulder(&scan);
        assert_eq!(est.head_end_y, 10.0);
        assert_eq!(est.head_span(10.0), 0.0);
    }

    #[test]
    fn test_zero_width_predecessor_is_skipped() {
        // 0 -> 8 would be an infinite change; it must be ignored.
        let scan = scan_from_widths(&[0, 8, 8, 12]);
        let est = estimate_head_shoulder(&scan);
        assert_eq!(est.head_end_y, 13.0);
    }

    #[test]
    fn test_shoulder_end_capped_at_max_y() {
        let scan = scan_from_widths(&[4, 4, 4, 40]);
        let est = estimate_head_shoulder(&scan);
        assert_eq!(est.head_end_y, 13.0);
        assert_eq!(est.shoulder_end_y, 13.0);
    }
}
