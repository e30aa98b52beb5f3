//! Scroll-driven reveal and parallax animation for page sections.
//!
//! The coordinator decides when a registered reveal plays or reverses; the
//! systems here turn those transitions into per-item staggered fades,
//! counters, allocation bars and the header backdrop.

use crate::engine::animation::tween::PlayDirection;
use bevy::prelude::*;

/// Reveal registrations, enter/exit bookkeeping and scrub progress.
pub mod coordinator;

/// Counters, allocation bars and header effects started by reveals.
pub mod effects;

/// Scroll-tied background drift.
pub mod parallax;

/// Reveal and parallax systems.
pub mod systems;

/// Trigger notation parsing and scroll geometry.
pub mod trigger;

/// A registered reveal crossed its start point.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct SectionRevealed {
    pub key: String,
    pub selector: String,
    pub direction: PlayDirection,
}

/// Element animated by the reveal `key`, staggered by `index`.
#[derive(Component, Debug, Clone)]
pub struct RevealItem {
    pub key: String,
    pub index: usize,
}

/// Current reveal pose of an item.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct RevealStyle {
    pub opacity: f32,
    pub offset: f32,
    /// Opacity of the item's own background when fully revealed.
    pub background_alpha: f32,
}

impl RevealStyle {
    pub fn hidden(distance: f32, background_alpha: f32) -> Self {
        Self {
            opacity: 0.0,
            offset: distance,
            background_alpha,
        }
    }
}
