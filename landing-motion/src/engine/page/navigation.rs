use super::scroll::{PageScroll, PageSection};
use crate::engine::core::page_surface::PageSurface;
use crate::engine::reveal::trigger::SectionBounds;
use bevy::prelude::*;
use constants::motion::{NAV_ANCHOR_OFFSET_PX, NAV_GLIDE_SECS};
use std::time::Duration;

/// Header link scrolling to an in-page anchor such as `#about`.
#[derive(Component, Debug, Clone)]
pub struct NavLink {
    pub href: String,
}

/// Scroll offset that puts `href`'s section just below the fixed header.
pub fn anchor_offset<'a>(
    href: &str,
    mut sections: impl Iterator<Item = (&'a PageSection, &'a SectionBounds)>,
) -> Option<f32> {
    let selector = href.strip_prefix('#')?;
    let (_, bounds) = sections.find(|(section, _)| section.selector == selector)?;
    Some((bounds.top - NAV_ANCHOR_OFFSET_PX).max(0.0))
}

pub fn follow_nav_links(
    links: Query<(&Interaction, &NavLink), Changed<Interaction>>,
    sections: Query<(&PageSection, &SectionBounds)>,
    surface: Res<PageSurface>,
    mut scroll: ResMut<PageScroll>,
) {
    for (interaction, link) in &links {
        if *interaction != Interaction::Pressed || surface.is_scroll_locked() {
            continue;
        }
        let Some(offset) = anchor_offset(&link.href, sections.iter()) else {
            warn!("No section for anchor '{}'", link.href);
            continue;
        };
        scroll.glide_to(offset, Duration::from_secs_f32(NAV_GLIDE_SECS));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anchor_lands_below_header() {
        let section = |selector: &str, order| PageSection {
            selector: selector.to_string(),
            order,
            height_vh: 1.0,
        };
        let bounds = |top| SectionBounds { top, height: 800.0 };
        let sections = [
            (section("hero", 0), bounds(0.0)),
            (section("about", 1), bounds(800.0)),
        ];
        let iter = || sections.iter().map(|(s, b)| (s, b));

        assert_eq!(anchor_offset("#about", iter()), Some(720.0));
        assert_eq!(anchor_offset("#hero", iter()), Some(0.0));
        assert_eq!(anchor_offset("#missing", iter()), None);
        assert_eq!(anchor_offset("about", iter()), None);
    }
}
