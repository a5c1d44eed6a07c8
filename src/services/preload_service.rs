//! Background preloading of neighbouring images.
//!
//! Preloads are fire-and-forget `rayon` tasks tagged with the gallery
//! generation they were issued for. A task whose generation is no longer
//! live when it finishes drops its result instead of writing the cache.
//! Failures are logged at debug level and otherwise ignored.

use crate::image_cache::{self, SharedImageCache};
use crate::image_loader::ImageLoader;
use crate::image_ref::ImageRef;
use log::debug;
use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Condvar, Mutex};
use std::time::{Duration, Instant};

/// Preloads currently running, keyed by generation and image.
#[derive(Debug, Default)]
struct InFlight {
    requests: Mutex<HashSet<(u64, ImageRef)>>,
    idle: Condvar,
}

impl InFlight {
    fn requests(&self) -> std::sync::MutexGuard<'_, HashSet<(u64, ImageRef)>> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn begin(&self, generation: u64, image: &ImageRef) -> bool {
        self.requests().insert((generation, image.clone()))
    }

    fn finish(&self, generation: u64, image: &ImageRef) {
        let mut requests = self.requests();
        requests.remove(&(generation, image.clone()));
        if requests.is_empty() {
            self.idle.notify_all();
        }
    }
}

/// Issues and tracks neighbour preloads for one carousel.
#[derive(Clone)]
pub struct PreloadService {
    cache: SharedImageCache,
    loader: Arc<dyn ImageLoader>,
    live_generation: Arc<AtomicU64>,
    in_flight: Arc<InFlight>,
}

impl PreloadService {
    /// Creates a preloader writing into `cache`.
    pub fn new(cache: SharedImageCache, loader: Arc<dyn ImageLoader>) -> Self {
        Self {
            cache,
            loader,
            live_generation: Arc::new(AtomicU64::new(0)),
            in_flight: Arc::new(InFlight::default()),
        }
    }

    /// Marks `generation` as live. Results of earlier generations are discarded from now on.
    ///
    /// Takes the cache lock: once this returns, no task of an older generation can still write.
    pub fn set_generation(&self, generation: u64) {
        let _cache = image_cache::lock(&self.cache);
        let previous = self.live_generation.swap(generation, Ordering::AcqRel);
        if previous != generation {
            debug!("Preload generation {} -> {}", previous, generation);
        }
    }

    pub fn generation(&self) -> u64 {
        self.live_generation.load(Ordering::Acquire)
    }

    /// Starts loading every target that is neither cached nor already in flight.
    ///
    /// Returns the number of tasks spawned.
    pub fn preload(&self, targets: Vec<ImageRef>, generation: u64) -> usize {
        let mut spawned = 0;
        for image in targets {
            if image_cache::lock(&self.cache).contains(&image) {
                continue;
            }
            if !self.in_flight.begin(generation, &image) {
                continue;
            }

            let cache = self.cache.clone();
            let loader = self.loader.clone();
            let live_generation = self.live_generation.clone();
            let in_flight = self.in_flight.clone();
            rayon::spawn(move || {
                let result = loader.load(&image);
                {
                    let mut cache = image_cache::lock(&cache);
                    if live_generation.load(Ordering::Acquire) != generation {
                        debug!(
                            "Discarding stale preload of {} (generation {})",
                            image, generation
                        );
                    } else {
                        match result {
                            Ok(loaded) => cache.put(image.clone(), loaded),
                            // Silently ignore errors during preload
                            Err(e) => debug!("Preload of {} failed: {}", image, e),
                        }
                    }
                }
                in_flight.finish(generation, &image);
            });
            spawned += 1;
        }
        spawned
    }

    /// Number of preloads still running.
    pub fn pending(&self) -> usize {
        self.in_flight.requests().len()
    }

    /// Blocks until no preload is running or `timeout` elapses. Returns true when idle.
    pub fn wait_idle(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        let mut requests = self.in_flight.requests();
        while !requests.is_empty() {
            let now = Instant::now();
            if now >= deadline {
                return false;
            }
            requests = match self.in_flight.idle.wait_timeout(requests, deadline - now) {
                Ok((guard, _)) => guard,
                Err(poisoned) => poisoned.into_inner().0,
            };
        }
        true
    }
}

impl std::fmt::Debug for PreloadService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreloadService")
            .field("generation", &self.generation())
            .field("pending", &self.pending())
            .finish()
    }
}
