//! State management for the gallery.

use crate::image_cache::{ImageCache, SharedImageCache};
use crate::ui::ScrollLock;
use std::sync::{Arc, Mutex, MutexGuard};

pub mod gallery;

pub use gallery::{Direction, GalleryState};

/// Application-wide state container.
pub struct AppState {
    pub gallery: Arc<Mutex<GalleryState>>,
    /// Decoded images, shared with every other carousel in the process.
    pub image_cache: SharedImageCache,
    /// Page scroll lock held by open overlays.
    pub scroll_lock: ScrollLock,
}

impl AppState {
    /// Wraps an initial gallery and attaches the process-wide cache.
    pub fn new(gallery: GalleryState) -> Self {
        Self::with_cache(gallery, ImageCache::shared())
    }

    pub fn with_cache(gallery: GalleryState, image_cache: SharedImageCache) -> Self {
        Self {
            gallery: Arc::new(Mutex::new(gallery)),
            image_cache,
            scroll_lock: ScrollLock::new(),
        }
    }
}

/// Locks the gallery, recovering from a poisoned lock.
///
/// Every gallery transition is a single assignment pair, so a panic
/// elsewhere cannot leave the state half-updated.
pub fn lock_gallery(gallery: &Mutex<GalleryState>) -> MutexGuard<'_, GalleryState> {
    gallery
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}
