use thiserror::Error;

#[derive(Error, Debug)]
pub enum IdPhotoError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidImage { width: u32, height: u32 },

    #[error("Invalid aspect ratio: {0} (must be finite and > 0)")]
    InvalidAspectRatio(f64),

    #[error("Invalid crop: {0}")]
    InvalidCrop(String),

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Unsupported file type: {0}")]
    UnsupportedFormat(String),

    #[error("Cannot move from {from} to {to}")]
    InvalidTransition { from: String, to: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Background removal failed: {0}")]
    BackgroundRemoval(String),

    #[error("Image format error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("Pixel buffer shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),
}

pub type Result<T> = std::result::Result<T, IdPhotoError>;
