//! Pointer-driven rotation of the hero scene object.

use crate::engine::page::PageLayoutSet;
use bevy::prelude::*;

/// Pointer → target angle mapping and eased rotation tracking.
pub mod rotation;

/// Pointer position in window coordinates, from native input or the host page.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct PointerMoved {
    pub position: Vec2,
}

pub struct PointerPlugin;

impl Plugin for PointerPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<PointerMoved>().add_systems(
            Update,
            (
                rotation::forward_cursor_moves,
                rotation::fit_container_rects,
                rotation::aim_pointer_rotation,
                rotation::ease_pointer_rotation,
            )
                .chain()
                .after(PageLayoutSet),
        );
    }
}
