pub(crate) mod config;
pub mod rect;
mod suggest;

pub use config::AutoCropConfig;
pub use rect::{check_aspect_ratio, parse_aspect_ratio, CropRect, PixelRect};
pub use suggest::{suggest_crop, suggest_crop_detailed, CropSuggestion};
