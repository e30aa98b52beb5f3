use super::trigger::{ScrollViewport, SectionBounds, TriggerPoint, scrub_progress};
use bevy::prelude::*;

const PARALLAX_START: TriggerPoint = TriggerPoint {
    element_anchor: 0.0,
    element_offset: 0.0,
    viewport_anchor: 1.0,
    viewport_offset: 0.0,
};

const PARALLAX_END: TriggerPoint = TriggerPoint {
    element_anchor: 1.0,
    element_offset: 0.0,
    viewport_anchor: 0.0,
    viewport_offset: 0.0,
};

/// Background that drifts upward while its section crosses the viewport.
#[derive(Component, Debug, Clone)]
pub struct ParallaxLayer {
    pub selector: String,
    pub shift: f32,
}

/// Vertical offset of a parallax background: zero when the section top
/// enters at the viewport bottom, `-viewport * shift` once its bottom leaves
/// at the viewport top.
pub fn parallax_offset(section: SectionBounds, viewport: ScrollViewport, shift: f32) -> f32 {
    let start = PARALLAX_START.scroll_position(section, viewport.height);
    let end = PARALLAX_END.scroll_position(section, viewport.height);
    -viewport.height * shift * scrub_progress(start, end, viewport.scroll)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECTION: SectionBounds = SectionBounds {
        top: 0.0,
        height: 800.0,
    };

    fn at(scroll: f32) -> ScrollViewport {
        ScrollViewport {
            scroll,
            height: 800.0,
        }
    }

    #[test]
    fn tracks_scroll_continuously() {
        // Span runs from -800 (top meets bottom) to 800 (bottom meets top).
        assert_eq!(parallax_offset(SECTION, at(-800.0), 0.5), 0.0);
        assert_eq!(parallax_offset(SECTION, at(0.0), 0.5), -200.0);
        assert_eq!(parallax_offset(SECTION, at(800.0), 0.5), -400.0);
        assert_eq!(parallax_offset(SECTION, at(5000.0), 0.5), -400.0);
    }

    #[test]
    fn offset_never_increases_with_scroll() {
        let mut last = 0.0;
        for step in 0..40 {
            let offset = parallax_offset(SECTION, at(step as f32 * 50.0), 0.5);
            assert!(offset <= last);
            last = offset;
        }
    }
}
