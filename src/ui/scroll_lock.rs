//! Page scroll lock held while overlays (service details, mobile menu) are open.

use log::debug;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Viewports wider than this reserve the scrollbar gutter while locked.
pub const GUTTER_MIN_VIEWPORT: u32 = 768;

/// Shared scroll lock. The page is locked while any [`ScrollGuard`] is alive.
#[derive(Debug, Clone, Default)]
pub struct ScrollLock {
    holders: Arc<AtomicUsize>,
}

impl ScrollLock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Locks page scrolling until the returned guard is dropped.
    #[must_use = "the page unlocks as soon as the guard is dropped"]
    pub fn acquire(&self) -> ScrollGuard {
        if self.holders.fetch_add(1, Ordering::AcqRel) == 0 {
            debug!("Page scroll locked");
        }
        ScrollGuard {
            holders: self.holders.clone(),
        }
    }

    pub fn is_locked(&self) -> bool {
        self.holders.load(Ordering::Acquire) > 0
    }

    /// Right padding that keeps content from shifting when the scrollbar disappears.
    pub fn gutter_padding(&self, viewport_width: u32, client_width: u32) -> u32 {
        if self.is_locked() && viewport_width > GUTTER_MIN_VIEWPORT {
            viewport_width.saturating_sub(client_width)
        } else {
            0
        }
    }
}

/// Keeps the page locked while alive.
#[derive(Debug)]
pub struct ScrollGuard {
    holders: Arc<AtomicUsize>,
}

impl Drop for ScrollGuard {
    fn drop(&mut self) {
        if self.holders.fetch_sub(1, Ordering::AcqRel) == 1 {
            debug!("Page scroll unlocked");
        }
    }
}
