//! Application configuration constants and the optional `carousel.toml` settings.

use crate::error::Result;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Supported image file extensions.
pub const SUPPORTED_IMAGE_EXTENSIONS: [&str; 6] = ["jpg", "jpeg", "png", "gif", "bmp", "webp"];

/// Default number of decoded images kept in the shared cache.
pub const DEFAULT_CACHE_CAPACITY: usize = 10;

/// Galleries in a visual-only category switch to the marquee layout above this many images.
pub const DEFAULT_SHOWCASE_THRESHOLD: usize = 3;

/// Default slide transition length in milliseconds.
pub const DEFAULT_TRANSITION_MS: u64 = 350;

/// Number of times each showcase row repeats its images so the loop is seamless.
pub const SHOWCASE_REPEAT: usize = 3;

/// Runtime settings for the carousel.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CarouselConfig {
    /// Capacity of the shared image cache (entries).
    pub cache_capacity: usize,
    pub showcase_threshold: usize,
    pub transition_ms: u64,
    /// Directory that site-absolute image refs resolve against.
    pub asset_root: PathBuf,
    pub preload_enabled: bool,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            showcase_threshold: DEFAULT_SHOWCASE_THRESHOLD,
            transition_ms: DEFAULT_TRANSITION_MS,
            asset_root: PathBuf::from("."),
            preload_enabled: true,
        }
    }
}

impl CarouselConfig {
    /// Cache capacity, never zero.
    pub fn cache_capacity(&self) -> usize {
        self.cache_capacity.max(1)
    }

    pub fn transition_duration(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.transition_ms)
    }
}

/// Parses settings from TOML text. Missing keys fall back to defaults.
pub fn parse(content: &str) -> Result<CarouselConfig> {
    Ok(toml::from_str(content)?)
}

/// Loads settings from a file; a missing file yields the defaults.
pub fn load_from_path(path: &Path) -> Result<CarouselConfig> {
    if !path.exists() {
        log::debug!("No config at {}, using defaults", path.display());
        return Ok(CarouselConfig::default());
    }
    let content = fs::read_to_string(path)?;
    parse(&content)
}
