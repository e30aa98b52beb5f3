use crate::engine::core::page_surface::{PageSurface, ScrollStyle};
use bevy::prelude::*;

/// Holds the page scroll lock; dropping it restores the style captured at
/// acquisition.
pub struct ScrollLockGuard {
    surface: PageSurface,
    previous: ScrollStyle,
}

impl ScrollLockGuard {
    pub(super) fn acquire(surface: &PageSurface) -> Self {
        let previous = surface.scroll_style();
        surface.apply_scroll_style(&ScrollStyle::locked());
        debug!("Page scroll locked");
        Self {
            surface: surface.clone(),
            previous,
        }
    }
}

impl Drop for ScrollLockGuard {
    fn drop(&mut self) {
        self.surface.apply_scroll_style(&self.previous);
        info!("Page scroll released");
    }
}
