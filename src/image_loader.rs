//! Image fetching and decoding.
//!
//! The carousel only issues "ensure loaded" requests; how an [`ImageRef`]
//! becomes pixels is up to the [`ImageLoader`] it is given. Loads are blocking
//! and are expected to run on a worker thread.

use crate::config::SUPPORTED_IMAGE_EXTENSIONS;
use crate::error::LoadError;
use crate::image_cache::CachedImage;
use crate::image_ref::ImageRef;
use std::path::PathBuf;

/// Fetch-and-decode collaborator.
pub trait ImageLoader: Send + Sync {
    /// Loads and decodes one image.
    fn load(&self, image: &ImageRef) -> Result<CachedImage, LoadError>;
}

/// Returns true when the ref carries a supported image extension.
pub fn is_supported_image(image: &ImageRef) -> bool {
    image
        .extension()
        .map(|ext| SUPPORTED_IMAGE_EXTENSIONS.contains(&ext.as_str()))
        .unwrap_or(false)
}

/// Loads images from the local filesystem below an asset root.
#[derive(Debug, Clone)]
pub struct FileImageLoader {
    root: PathBuf,
}

impl FileImageLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl ImageLoader for FileImageLoader {
    fn load(&self, image: &ImageRef) -> Result<CachedImage, LoadError> {
        if !is_supported_image(image) {
            return Err(LoadError::Unsupported(image.to_string()));
        }

        let path = image.resolve(&self.root);
        let decoded = image::ImageReader::open(&path)
            .map_err(|e| LoadError::NotFound(format!("{}: {}", path.display(), e)))?
            .with_guessed_format()?
            .decode()?;

        let rgb = decoded.to_rgb8();
        let (width, height) = rgb.dimensions();
        Ok(CachedImage::new(rgb.into_raw(), width, height))
    }
}
