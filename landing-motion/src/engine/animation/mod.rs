//! Time-based interpolation shared by every motion system.
//!
//! Easing curves come from `bevy::math::curve::EaseFunction`; this module
//! only adds delay, direction and progress bookkeeping on top.

/// One-shot eased tweens and reversible playheads.
pub mod tween;

/// Hover scale-up with reverse on leave, and the hover change event.
pub mod hover;
