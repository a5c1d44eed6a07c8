//! View-layer helpers: slide transitions, showcase layout and the scroll lock.
//!
//! Nothing here draws pixels; each type computes what a renderer needs and
//! leaves drawing to it.

pub mod scroll_lock;
pub mod showcase;
pub mod transition;

pub use scroll_lock::{ScrollGuard, ScrollLock};
pub use showcase::{GalleryLayout, ShowcaseLayout};
pub use transition::{SlideFrame, TransitionController};
