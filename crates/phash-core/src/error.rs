use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = core::result::Result<T, Error>;

/// Custom error types for the phash library
#[derive(Error, Debug)]
pub enum Error {
    /// Matrix is not square, not the configured size, or a crop exceeds its bounds
    #[error("Shape mismatch: {0}")]
    ShapeMismatch(String),

    /// Invalid configuration error
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// Two fingerprints of different character length were compared
    #[error("Fingerprint length mismatch: {left} != {right}")]
    LengthMismatch { left: usize, right: usize },

    /// Fingerprint is not a valid hexadecimal string
    #[error("Invalid fingerprint format: {0}")]
    Format(String),

    /// Intensity matrix contains a value that is not finite
    #[error("Invalid intensity value: {0}")]
    InvalidIntensity(String),

    /// File not found error
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// I/O operation error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Image decoding or encoding error
    #[error("Image processing error: {0}")]
    Image(#[from] image::ImageError),

    /// Configuration (de)serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
