//! Unified error types for the gallery carousel.

use std::fmt;

/// Errors raised by carousel navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CarouselError {
    /// `go_to` was called with an index outside `0..len`.
    OutOfRange { index: usize, len: usize },
    /// No images and no fallback were supplied. Unreachable when seeded from a project.
    EmptyCollection,
}

impl fmt::Display for CarouselError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CarouselError::OutOfRange { index, len } => {
                write!(f, "Gallery index {} out of range (0..{})", index, len)
            }
            CarouselError::EmptyCollection => {
                write!(f, "Gallery has no images and no fallback image")
            }
        }
    }
}

impl std::error::Error for CarouselError {}

/// Errors raised while fetching or decoding a single image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// The image reference did not resolve to a readable file.
    NotFound(String),
    /// The file was read but could not be decoded.
    Decode(String),
    /// The reference does not carry a supported image extension.
    Unsupported(String),
    /// The background worker went away before reporting a result.
    Worker(String),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::NotFound(msg) => write!(f, "Image not found: {}", msg),
            LoadError::Decode(msg) => write!(f, "Image decode failed: {}", msg),
            LoadError::Unsupported(msg) => write!(f, "Unsupported image format: {}", msg),
            LoadError::Worker(msg) => write!(f, "Image worker failed: {}", msg),
        }
    }
}

impl std::error::Error for LoadError {}

impl From<image::ImageError> for LoadError {
    fn from(err: image::ImageError) -> Self {
        LoadError::Decode(err.to_string())
    }
}

impl From<std::io::Error> for LoadError {
    fn from(err: std::io::Error) -> Self {
        LoadError::NotFound(err.to_string())
    }
}

/// Application-level errors.
#[derive(Debug)]
pub enum AppError {
    /// Navigation contract violation
    Carousel(CarouselError),
    /// Primary image fetch failed
    Load(LoadError),
    /// Error reading or writing a file or stream
    Io(String),
    /// Error parsing configuration
    Config(String),
    /// Error reading or validating the project catalog
    Catalog(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Carousel(err) => write!(f, "Carousel error: {}", err),
            AppError::Load(err) => write!(f, "Load error: {}", err),
            AppError::Io(msg) => write!(f, "I/O error: {}", msg),
            AppError::Config(msg) => write!(f, "Config error: {}", msg),
            AppError::Catalog(msg) => write!(f, "Catalog error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Carousel(err) => Some(err),
            AppError::Load(err) => Some(err),
            AppError::Io(_) | AppError::Config(_) | AppError::Catalog(_) => None,
        }
    }
}

impl From<CarouselError> for AppError {
    fn from(err: CarouselError) -> Self {
        AppError::Carousel(err)
    }
}

impl From<LoadError> for AppError {
    fn from(err: LoadError) -> Self {
        AppError::Load(err)
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(err.to_string())
    }
}

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        AppError::Config(err.to_string())
    }
}

/// Type alias for Results in this application.
pub type Result<T> = std::result::Result<T, AppError>;
