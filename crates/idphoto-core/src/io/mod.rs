pub mod image_io;

pub use image_io::{decode_image, encode_png, load_image, save_png, ACCEPTED_FORMATS};
