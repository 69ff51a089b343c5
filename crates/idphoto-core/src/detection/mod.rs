pub mod foreground;
pub mod silhouette;

pub use foreground::{scan_foreground, ForegroundBounds, ForegroundScan, RowProfile};
pub use silhouette::{estimate_head_shoulder, SilhouetteEstimate};
