//! Service for handling carousel navigation.
//!
//! Coordinates the gallery state, the shared image cache and the preloader:
//! every navigation call updates index and direction under one lock, then
//! schedules neighbour preloads tagged with the current generation.

use crate::catalog::Project;
use crate::config::CarouselConfig;
use crate::error::{CarouselError, LoadError};
use crate::image_cache::{self, CachedImage, SharedImageCache};
use crate::image_loader::ImageLoader;
use crate::image_ref::ImageRef;
use crate::services::PreloadService;
use crate::state::{self, AppState, Direction, GalleryState};
use crate::ui::showcase::{GalleryLayout, ShowcaseLayout};
use log::{debug, info, warn};
use std::sync::{Arc, Mutex};

/// What the view layer needs after every change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarouselUpdate {
    pub index: usize,
    pub direction: Direction,
    pub image: ImageRef,
    pub generation: u64,
}

impl CarouselUpdate {
    fn from_state(state: &GalleryState) -> Self {
        Self {
            index: state.current_index(),
            direction: state.direction(),
            image: state.current_image().clone(),
            generation: state.generation(),
        }
    }
}

/// Service for managing carousel navigation.
#[derive(Clone)]
pub struct CarouselService {
    gallery: Arc<Mutex<GalleryState>>,
    cache: SharedImageCache,
    loader: Arc<dyn ImageLoader>,
    preloader: PreloadService,
    layout: Arc<Mutex<GalleryLayout>>,
    config: CarouselConfig,
}

impl CarouselService {
    /// Creates a new carousel service over the app state.
    pub fn new(state: &AppState, loader: Arc<dyn ImageLoader>, config: CarouselConfig) -> Self {
        let preloader = PreloadService::new(state.image_cache.clone(), loader.clone());
        preloader.set_generation(state::lock_gallery(&state.gallery).generation());
        Self {
            gallery: state.gallery.clone(),
            cache: state.image_cache.clone(),
            loader,
            preloader,
            layout: Arc::new(Mutex::new(GalleryLayout::Carousel)),
            config,
        }
    }

    /// Shows a project: resets the gallery to its images and picks the layout.
    pub fn open_project(&self, project: &Project) -> CarouselUpdate {
        let images = project.gallery_images();
        let layout = GalleryLayout::for_project(
            project.category,
            images.len(),
            self.config.showcase_threshold,
        );
        info!(
            "Opening project '{}' ({} images, {:?} layout)",
            project.id,
            images.len(),
            layout
        );
        self.replace(images, project.image.clone(), layout)
    }

    /// Replaces the images, returning to index 0 and invalidating pending preloads.
    ///
    /// Without a project category the images are always shown as a carousel.
    pub fn reset(&self, images: Vec<ImageRef>, fallback: ImageRef) -> CarouselUpdate {
        self.replace(images, fallback, GalleryLayout::Carousel)
    }

    fn replace(
        &self,
        images: Vec<ImageRef>,
        fallback: ImageRef,
        layout: GalleryLayout,
    ) -> CarouselUpdate {
        let update = {
            let mut gallery = state::lock_gallery(&self.gallery);
            gallery.reset(images, fallback);
            *self.layout.lock().unwrap_or_else(|p| p.into_inner()) = layout;
            self.preloader.set_generation(gallery.generation());
            CarouselUpdate::from_state(&gallery)
        };
        self.preload_neighbors();
        update
    }

    /// Navigates to the next image.
    pub fn next(&self) -> CarouselUpdate {
        self.navigate(|gallery| {
            gallery.next();
        })
    }

    /// Navigates to the previous image.
    pub fn previous(&self) -> CarouselUpdate {
        self.navigate(|gallery| {
            gallery.previous();
        })
    }

    /// Jumps to an indicator position.
    pub fn go_to(&self, index: usize) -> Result<CarouselUpdate, CarouselError> {
        let update = {
            let mut gallery = state::lock_gallery(&self.gallery);
            gallery.go_to(index).inspect_err(|e| warn!("{}", e))?;
            CarouselUpdate::from_state(&gallery)
        };
        self.preload_neighbors();
        Ok(update)
    }

    fn navigate(&self, step: impl FnOnce(&mut GalleryState)) -> CarouselUpdate {
        let update = {
            let mut gallery = state::lock_gallery(&self.gallery);
            step(&mut gallery);
            CarouselUpdate::from_state(&gallery)
        };
        debug!(
            "Navigated to {} ({:+})",
            update.index,
            update.direction.signum()
        );
        self.preload_neighbors();
        update
    }

    /// Current position without changing it.
    pub fn snapshot(&self) -> CarouselUpdate {
        CarouselUpdate::from_state(&state::lock_gallery(&self.gallery))
    }

    /// Indicator dot states, one per image.
    pub fn indicators(&self) -> Vec<bool> {
        state::lock_gallery(&self.gallery).indicators()
    }

    pub fn layout(&self) -> GalleryLayout {
        *self.layout.lock().unwrap_or_else(|p| p.into_inner())
    }

    /// Marquee rows when the current project is shown as a showcase.
    pub fn showcase(&self) -> Option<ShowcaseLayout> {
        match self.layout() {
            GalleryLayout::Showcase => Some(ShowcaseLayout::build(
                state::lock_gallery(&self.gallery).images(),
            )),
            GalleryLayout::Carousel => None,
        }
    }

    /// Fetches the current image, from cache when possible.
    ///
    /// Blocking; errors are for the view layer to turn into a placeholder.
    pub fn load_current(&self) -> Result<CachedImage, LoadError> {
        let image = state::lock_gallery(&self.gallery).current_image().clone();

        let cached = image_cache::lock(&self.cache).get(&image);
        let loaded = match cached {
            Some(cached) => cached,
            None => {
                let loaded = self.loader.load(&image).inspect_err(|e| {
                    warn!("Failed to load {}: {}", image, e);
                })?;
                image_cache::lock(&self.cache).put(image, loaded.clone());
                loaded
            }
        };

        // Trigger preload even on cache hit
        self.preload_neighbors();
        Ok(loaded)
    }

    /// Schedules both circular neighbours of the current image.
    fn preload_neighbors(&self) {
        if !self.config.preload_enabled || !self.layout().is_carousel() {
            return;
        }
        let (targets, generation) = {
            let gallery = state::lock_gallery(&self.gallery);
            (gallery.preload_targets(), gallery.generation())
        };
        if targets.is_empty() {
            return;
        }
        let spawned = self.preloader.preload(targets, generation);
        if spawned > 0 {
            debug!("Preloading {} neighbour(s), generation {}", spawned, generation);
        }
    }

    pub fn preloader(&self) -> &PreloadService {
        &self.preloader
    }
}

impl std::fmt::Debug for CarouselService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CarouselService")
            .field("position", &self.snapshot())
            .field("layout", &self.layout())
            .field("preloader", &self.preloader)
            .finish()
    }
}
