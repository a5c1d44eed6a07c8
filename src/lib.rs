//! Case-study image gallery.
//!
//! A circular carousel over a project's images with directional slide
//! transitions and background preloading of the neighbouring images.
//!
//! Threading model:
//! - navigation is synchronous and runs on the caller's thread
//! - `rayon::spawn`: image decoding for neighbour preloads
//! - the decoded-image cache is shared process-wide behind a mutex

pub mod catalog;
pub mod config;
pub mod error;
pub mod image_cache;
pub mod image_loader;
pub mod image_ref;
pub mod services;
pub mod state;
pub mod ui;

pub use image_ref::ImageRef;
pub use services::{CarouselService, CarouselUpdate};
pub use state::{Direction, GalleryState};
