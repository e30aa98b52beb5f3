use super::tween::{PlayDirection, Playhead};
use crate::engine::core::app_state::AppState;
use bevy::math::curve::EaseFunction;
use bevy::prelude::*;
use std::time::Duration;

/// Scale-up on hover, replayed backward on leave.
#[derive(Component, Debug, Clone)]
pub struct HoverScale {
    scale_to: f32,
    duration: f32,
    playhead: Playhead,
}

impl HoverScale {
    pub fn new(scale_to: f32, duration: Duration) -> Self {
        Self {
            scale_to,
            duration: duration.as_secs_f32(),
            playhead: Playhead::new(duration),
        }
    }

    pub fn set_hovered(&mut self, hovered: bool) {
        self.playhead.play(if hovered {
            PlayDirection::Forward
        } else {
            PlayDirection::Backward
        });
    }

    /// Returns the new uniform scale while the playhead moves.
    pub fn advance(&mut self, delta: Duration) -> Option<f32> {
        if !self.playhead.advance(delta) {
            return None;
        }
        Some(self.scale())
    }

    pub fn scale(&self) -> f32 {
        let progress = self
            .playhead
            .sample(EaseFunction::CubicOut, 0.0, self.duration);
        1.0 + (self.scale_to - 1.0) * progress
    }
}

/// Hover state change for an interactive element, from UI picking or the host page.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoverChanged {
    pub target: Entity,
    pub entered: bool,
}

pub fn emit_hover_changes(
    interactions: Query<(Entity, &Interaction), (Changed<Interaction>, With<HoverScale>)>,
    mut hover_events: EventWriter<HoverChanged>,
    mut hovered: Local<Vec<Entity>>,
) {
    for (entity, interaction) in &interactions {
        let now_hovered = *interaction != Interaction::None;
        let was_hovered = hovered.contains(&entity);
        if now_hovered == was_hovered {
            continue;
        }
        if now_hovered {
            hovered.push(entity);
        } else {
            hovered.retain(|other| *other != entity);
        }
        hover_events.write(HoverChanged {
            target: entity,
            entered: now_hovered,
        });
    }
}

pub fn apply_hover_changes(
    mut hover_events: EventReader<HoverChanged>,
    mut scales: Query<&mut HoverScale>,
) {
    for event in hover_events.read() {
        if let Ok(mut scale) = scales.get_mut(event.target) {
            scale.set_hovered(event.entered);
        }
    }
}

pub fn animate_hover_scales(time: Res<Time>, mut scales: Query<(&mut HoverScale, &mut Transform)>) {
    for (mut hover, mut transform) in &mut scales {
        if let Some(scale) = hover.advance(time.delta()) {
            transform.scale = Vec3::splat(scale);
        }
    }
}

pub struct HoverPlugin;

impl Plugin for HoverPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<HoverChanged>().add_systems(
            Update,
            (
                emit_hover_changes.run_if(in_state(AppState::Interactive)),
                apply_hover_changes,
                animate_hover_scales,
            )
                .chain(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scales_up_and_back() {
        let mut hover = HoverScale::new(1.2, Duration::from_millis(200));
        assert_eq!(hover.scale(), 1.0);
        hover.set_hovered(true);
        assert_eq!(hover.advance(Duration::from_secs(1)), Some(1.2));
        assert_eq!(hover.advance(Duration::from_millis(16)), None);
        hover.set_hovered(false);
        assert_eq!(hover.advance(Duration::from_secs(1)), Some(1.0));
    }

    #[test]
    fn leave_mid_way_reverses_from_current_scale() {
        let mut hover = HoverScale::new(1.1, Duration::from_millis(300));
        hover.set_hovered(true);
        let mid = hover.advance(Duration::from_millis(150)).unwrap();
        hover.set_hovered(false);
        let back = hover.advance(Duration::from_millis(50)).unwrap();
        assert!(back < mid && back > 1.0);
    }
}
