//! Error types for the parallax photo viewer.

use thiserror::Error;

/// Main error type for the library
#[derive(Error, Debug)]
pub enum Error {
    /// Image decoding or processing failed
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// File I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Head tracker initialization or delivery error
    #[error("Tracker error: {0}")]
    Tracker(String),

    /// Asset loading error
    #[error("Asset error: {0}")]
    Asset(String),

    /// Render backend error
    #[error("Render error: {0}")]
    Render(String),

    /// Invalid input parameters provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Application-specific error type (alias for main Error type)
pub type AppError = Error;

/// Convenience type alias for Results with our Error type
pub type Result<T> = std::result::Result<T, Error>;
