//! Image cache for fast navigation.
//!
//! Caches decoded RGB8 image data keyed by image reference using an LRU policy.
//! One cache is shared by every carousel in the process; content for a given
//! reference never changes, so a repeated insert simply replaces the entry.

use crate::config::DEFAULT_CACHE_CAPACITY;
use crate::image_ref::ImageRef;
use lru::LruCache;
use once_cell::sync::Lazy;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};

/// Decoded RGB8 pixel data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedImage {
    pub data: Arc<Vec<u8>>,
    pub width: u32,
    pub height: u32,
}

impl CachedImage {
    /// Creates a CachedImage from raw RGB8 data.
    pub fn new(data: Vec<u8>, width: u32, height: u32) -> Self {
        Self {
            data: Arc::new(data),
            width,
            height,
        }
    }
}

/// Hit/miss counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub insertions: u64,
}

/// LRU cache for storing decoded images.
#[derive(Debug)]
pub struct ImageCache {
    cache: LruCache<ImageRef, CachedImage>,
    stats: CacheStats,
}

/// Handle to a cache shared between threads.
pub type SharedImageCache = Arc<Mutex<ImageCache>>;

static SHARED: Lazy<SharedImageCache> =
    Lazy::new(|| Arc::new(Mutex::new(ImageCache::new(DEFAULT_CACHE_CAPACITY))));

impl ImageCache {
    /// Creates a new image cache with the specified capacity. Zero is treated as one.
    pub fn new(capacity: usize) -> Self {
        Self {
            cache: LruCache::new(NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN)),
            stats: CacheStats::default(),
        }
    }

    /// The process-wide cache.
    pub fn shared() -> SharedImageCache {
        SHARED.clone()
    }

    /// Retrieves an image from the cache if it exists.
    pub fn get(&mut self, image: &ImageRef) -> Option<CachedImage> {
        let result = self.cache.get(image).cloned();
        if result.is_some() {
            self.stats.hits += 1;
            log::info!("Cache HIT: {}", image);
        } else {
            self.stats.misses += 1;
            log::info!("Cache MISS: {}", image);
        }
        result
    }

    /// Stores an image in the cache.
    pub fn put(&mut self, image: ImageRef, cached_image: CachedImage) {
        log::info!(
            "Cache PUT: {} ({}x{})",
            image,
            cached_image.width,
            cached_image.height
        );
        self.stats.insertions += 1;
        self.cache.put(image, cached_image);
    }

    /// Checks if an image is in the cache without touching LRU order.
    pub fn contains(&self, image: &ImageRef) -> bool {
        self.cache.contains(image)
    }

    /// Looks at an entry without touching LRU order or stats.
    pub fn peek(&self, image: &ImageRef) -> Option<&CachedImage> {
        self.cache.peek(image)
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Changes the capacity, evicting least recently used entries if it shrinks.
    pub fn resize(&mut self, capacity: usize) {
        self.cache
            .resize(NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN));
    }

    pub fn clear(&mut self) {
        self.cache.clear();
    }
}

/// Locks a shared cache, recovering from a poisoned lock.
pub fn lock(cache: &SharedImageCache) -> std::sync::MutexGuard<'_, ImageCache> {
    cache.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
