//! The landing page itself: section layout, scrolling and anchor navigation.
//!
//! Bevy UI stands in for the document. Sections stack vertically inside a
//! root node that is shifted by the scroll offset; the camera follows the
//! same offset across the scene hosts.

use crate::engine::core::app_state::AppState;
use bevy::prelude::*;

/// Header link glide to in-page anchors.
pub mod navigation;

/// Scroll state, section layout and scroll-follow systems.
pub mod scroll;

/// Page UI construction.
pub mod spawn;

/// Systems that move the page or re-lay its sections. Reveal evaluation
/// runs after this set.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct PageLayoutSet;

pub struct PagePlugin;

impl Plugin for PagePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<scroll::PageScroll>()
            .add_systems(Startup, (spawn::spawn_page_camera, spawn::spawn_page))
            .add_systems(
                Update,
                (
                    scroll::track_viewport,
                    (scroll::scroll_with_wheel, navigation::follow_nav_links)
                        .run_if(in_state(AppState::Interactive)),
                    scroll::glide_scroll,
                    scroll::layout_sections,
                    (scroll::apply_page_offset, scroll::follow_scroll_with_camera)
                        .run_if(resource_changed::<scroll::PageScroll>),
                )
                    .chain()
                    .in_set(PageLayoutSet),
            );
    }
}
