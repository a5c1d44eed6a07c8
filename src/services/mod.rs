//! Service layer for carousel logic.
//!
//! Separates navigation and preloading from the view layer for better testability.

pub mod carousel_service;
pub mod preload_service;

pub use carousel_service::{CarouselService, CarouselUpdate};
pub use preload_service::PreloadService;
