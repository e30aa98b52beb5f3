use bevy::prelude::*;
use std::sync::{Arc, Mutex};

/// Body style properties that control page scrolling.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScrollStyle {
    pub overflow: String,
    pub height: String,
    pub touch_action: String,
}

impl ScrollStyle {
    /// Style applied while the loading overlay blocks the page.
    pub fn locked() -> Self {
        Self {
            overflow: "hidden".to_string(),
            height: "100vh".to_string(),
            touch_action: "none".to_string(),
        }
    }

    pub fn is_locked(&self) -> bool {
        self.overflow == "hidden"
    }
}

/// The page hosting the app: the document body under WASM, an in-memory
/// stand-in on native targets.
pub trait PageHost: Send + Sync + 'static {
    fn scroll_style(&self) -> ScrollStyle;
    fn apply_scroll_style(&self, style: &ScrollStyle);
}

/// Shared handle to the active page host.
#[derive(Resource, Clone)]
pub struct PageSurface(Arc<dyn PageHost>);

impl PageSurface {
    pub fn new(host: impl PageHost) -> Self {
        Self(Arc::new(host))
    }

    pub fn in_memory() -> Self {
        Self::new(MemoryPage::default())
    }

    /// Document body in the browser, in-memory page elsewhere.
    pub fn platform_default() -> Self {
        #[cfg(target_arch = "wasm32")]
        {
            Self::new(DocumentBody)
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            Self::in_memory()
        }
    }

    pub fn scroll_style(&self) -> ScrollStyle {
        self.0.scroll_style()
    }

    pub fn is_scroll_locked(&self) -> bool {
        self.0.scroll_style().is_locked()
    }

    /// Write body scroll properties. Only the loading scroll lock and tests
    /// touch the page style.
    pub(crate) fn apply_scroll_style(&self, style: &ScrollStyle) {
        self.0.apply_scroll_style(style);
    }
}

impl Default for PageSurface {
    fn default() -> Self {
        Self::platform_default()
    }
}

#[derive(Default)]
pub struct MemoryPage {
    style: Mutex<ScrollStyle>,
}

impl PageHost for MemoryPage {
    fn scroll_style(&self) -> ScrollStyle {
        match self.style.lock() {
            Ok(style) => style.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn apply_scroll_style(&self, style: &ScrollStyle) {
        if let Ok(mut current) = self.style.lock() {
            *current = style.clone();
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub struct DocumentBody;

#[cfg(target_arch = "wasm32")]
fn body_style() -> Option<web_sys::CssStyleDeclaration> {
    let body = web_sys::window()?.document()?.body()?;
    Some(body.style())
}

#[cfg(target_arch = "wasm32")]
impl PageHost for DocumentBody {
    fn scroll_style(&self) -> ScrollStyle {
        let Some(style) = body_style() else {
            return ScrollStyle::default();
        };
        ScrollStyle {
            overflow: style.get_property_value("overflow").unwrap_or_default(),
            height: style.get_property_value("height").unwrap_or_default(),
            touch_action: style.get_property_value("touch-action").unwrap_or_default(),
        }
    }

    fn apply_scroll_style(&self, style: &ScrollStyle) {
        let Some(body) = body_style() else {
            warn!("Document body not available, page style left unchanged");
            return;
        };
        for (property, value) in [
            ("overflow", &style.overflow),
            ("height", &style.height),
            ("touch-action", &style.touch_action),
        ] {
            if let Err(e) = body.set_property(property, value) {
                warn!("Failed to set body {}: {:?}", property, e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_page_round_trips_style() {
        let surface = PageSurface::in_memory();
        assert!(!surface.is_scroll_locked());
        surface.apply_scroll_style(&ScrollStyle::locked());
        assert!(surface.is_scroll_locked());
        assert_eq!(surface.scroll_style().touch_action, "none");
    }

    #[test]
    fn clones_share_the_same_page() {
        let surface = PageSurface::in_memory();
        let other = surface.clone();
        other.apply_scroll_style(&ScrollStyle::locked());
        assert!(surface.is_scroll_locked());
    }
}
