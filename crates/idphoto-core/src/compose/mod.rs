pub mod color;
pub mod composite;

pub use color::{preset_by_name, BackgroundColor, ColorPreset, PRESET_COLORS};
pub use composite::{composite_on_color, crop_image, render_id_photo};
