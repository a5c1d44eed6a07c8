//! Gallery state for circular navigation through a project's images.

use crate::error::CarouselError;
use crate::image_ref::ImageRef;
use log::{debug, warn};

/// Most recent navigation direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Nothing has been navigated yet; the first image appears without a slide.
    #[default]
    None,
    Forward,
    Backward,
}

impl Direction {
    /// Signed unit value: `0`, `+1` or `-1`.
    pub fn signum(self) -> i8 {
        match self {
            Direction::None => 0,
            Direction::Forward => 1,
            Direction::Backward => -1,
        }
    }
}

/// Images of the displayed project plus the current position in them.
///
/// `images` is never empty and `current_index` always points into it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryState {
    images: Vec<ImageRef>,
    current_index: usize,
    direction: Direction,
    generation: u64,
}

impl GalleryState {
    /// Creates a state at index 0. An empty list is replaced by `[fallback]`.
    pub fn initialize(images: Vec<ImageRef>, fallback: ImageRef) -> Self {
        Self {
            images: with_fallback(images, fallback),
            current_index: 0,
            direction: Direction::None,
            generation: 0,
        }
    }

    /// Like [`GalleryState::initialize`] but without a guaranteed fallback.
    pub fn try_initialize(
        images: Vec<ImageRef>,
        fallback: Option<ImageRef>,
    ) -> Result<Self, CarouselError> {
        match (images.is_empty(), fallback) {
            (false, _) => Ok(Self {
                images,
                current_index: 0,
                direction: Direction::None,
                generation: 0,
            }),
            (true, Some(fallback)) => Ok(Self::initialize(Vec::new(), fallback)),
            (true, None) => {
                warn!("Gallery initialized with no images and no fallback");
                Err(CarouselError::EmptyCollection)
            }
        }
    }

    /// Advances one image, wrapping to the first. Returns the new index.
    pub fn next(&mut self) -> usize {
        self.current_index = (self.current_index + 1) % self.images.len();
        self.direction = Direction::Forward;
        self.current_index
    }

    /// Steps back one image, wrapping to the last. Returns the new index.
    pub fn previous(&mut self) -> usize {
        let len = self.images.len();
        self.current_index = (self.current_index + len - 1) % len;
        self.direction = Direction::Backward;
        self.current_index
    }

    /// Jumps to `target`, picking the direction of the shorter circular arc.
    ///
    /// Equal arcs resolve to [`Direction::Forward`]. Out-of-range targets are
    /// rejected, never clamped.
    pub fn go_to(&mut self, target: usize) -> Result<usize, CarouselError> {
        let len = self.images.len();
        if target >= len {
            return Err(CarouselError::OutOfRange { index: target, len });
        }

        let forward = (target + len - self.current_index) % len;
        let backward = (len - forward) % len;
        self.direction = if forward <= backward {
            Direction::Forward
        } else {
            Direction::Backward
        };
        self.current_index = target;
        Ok(target)
    }

    /// Replaces the images for a new project and starts a new generation.
    pub fn reset(&mut self, images: Vec<ImageRef>, fallback: ImageRef) {
        self.images = with_fallback(images, fallback);
        self.current_index = 0;
        self.direction = Direction::None;
        self.generation = self.generation.wrapping_add(1);
        debug!(
            "Gallery reset to generation {} with {} images",
            self.generation,
            self.images.len()
        );
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn images(&self) -> &[ImageRef] {
        &self.images
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn current_image(&self) -> &ImageRef {
        &self.images[self.current_index]
    }

    /// Indices of the previous and next images around the current one.
    pub fn neighbors(&self) -> (usize, usize) {
        let len = self.images.len();
        (
            (self.current_index + len - 1) % len,
            (self.current_index + 1) % len,
        )
    }

    /// Images worth warming after the last move: both circular neighbours.
    ///
    /// The image the next move in `direction` would show comes first. The
    /// current image and duplicates are skipped, so single-image galleries
    /// yield nothing.
    pub fn preload_targets(&self) -> Vec<ImageRef> {
        let (prev, next) = self.neighbors();
        let order = match self.direction {
            Direction::Backward => [prev, next],
            Direction::None | Direction::Forward => [next, prev],
        };

        let current = self.current_image();
        let mut targets: Vec<ImageRef> = Vec::with_capacity(2);
        for index in order {
            let image = &self.images[index];
            if image != current && !targets.contains(image) {
                targets.push(image.clone());
            }
        }
        targets
    }

    /// One flag per image, set at the current index. Drives the indicator dots.
    pub fn indicators(&self) -> Vec<bool> {
        (0..self.images.len())
            .map(|index| index == self.current_index)
            .collect()
    }

    /// Prev/next buttons and dots are only shown for multi-image galleries.
    pub fn shows_controls(&self) -> bool {
        self.images.len() > 1
    }
}

fn with_fallback(images: Vec<ImageRef>, fallback: ImageRef) -> Vec<ImageRef> {
    if images.is_empty() {
        debug!("Empty gallery, falling back to {}", fallback);
        vec![fallback]
    } else {
        images
    }
}
