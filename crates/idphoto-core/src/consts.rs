/// Minimum pixel count (h*w) to use row-level Rayon parallelism.
pub const PARALLEL_PIXEL_THRESHOLD: usize = 65_536;

/// Minimum number of input files to compose them in parallel.
pub const PARALLEL_FILE_THRESHOLD: usize = 2;

/// A pixel counts as foreground when its alpha is strictly above this value.
/// Excludes near-transparent fringe left behind by background removal.
pub const ALPHA_VISIBILITY_THRESHOLD: u8 = 10;

/// Number of bytes per RGBA pixel.
pub const RGBA_CHANNELS: usize = 4;

/// Offset of the alpha byte within an RGBA pixel.
pub const ALPHA_OFFSET: usize = 3;

/// Default target aspect ratio (width / height) for ID photos: 3:4.
pub const DEFAULT_ASPECT_RATIO: f64 = 3.0 / 4.0;

/// Default fraction of the detected foreground size used for the crop box.
pub const DEFAULT_CROP_WIDTH_FRACTION: f64 = 0.6;

/// Default headroom above the head boundary, as a fraction of crop height.
pub const DEFAULT_HEADROOM_FRACTION: f64 = 0.15;

/// Lower bound for headroom, as a fraction of crop height.
pub const HEADROOM_MIN_FRACTION: f64 = 0.1;

/// Upper bound for headroom, as a fraction of crop height.
pub const HEADROOM_MAX_FRACTION: f64 = 0.2;

/// Shoulders span at most this fraction of the foreground height below the head.
pub const SHOULDER_SPAN_FRACTION: f64 = 0.3;

/// Fallback crop box (no foreground found), as fractions of the image size.
pub const FALLBACK_LEFT_FRACTION: f64 = 0.25;
pub const FALLBACK_TOP_FRACTION: f64 = 0.2;
pub const FALLBACK_WIDTH_FRACTION: f64 = 0.5;
pub const FALLBACK_HEIGHT_FRACTION: f64 = 0.6;

/// Smallest crop side (pixels) synthesized from a degenerate foreground.
pub const MIN_CROP_SIDE: f64 = 1.0;

/// Tolerance used when comparing aspect ratios.
pub const ASPECT_RATIO_TOLERANCE: f64 = 1e-6;

/// Default per-channel tolerance for color-key background removal.
pub const DEFAULT_COLOR_KEY_TOLERANCE: u8 = 24;

/// Suggested filename for the final composited photo.
pub const DEFAULT_OUTPUT_FILENAME: &str = "id-photo.png";

