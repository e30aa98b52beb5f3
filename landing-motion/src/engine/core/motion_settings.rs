use bevy::prelude::*;
use constants::motion::*;
use std::time::Duration;

/// Runtime motion tuning, seeded from constants and optionally overridden by
/// the scene manifest.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct MotionSettings {
    pub max_rotation_deg: f32,
    pub rotation_ease: Duration,
    pub particle_count: usize,
    pub particle_radius: f32,
    pub particle_duration: Duration,
    pub icon_hover_scale: f32,
    pub icon_hover: Duration,
}

impl Default for MotionSettings {
    fn default() -> Self {
        Self {
            max_rotation_deg: MAX_ROTATION_DEG,
            rotation_ease: Duration::from_secs_f32(ROTATION_EASE_SECS),
            particle_count: PARTICLE_COUNT,
            particle_radius: PARTICLE_RADIUS_PX,
            particle_duration: Duration::from_secs_f32(PARTICLE_DURATION_SECS),
            icon_hover_scale: ICON_HOVER_SCALE,
            icon_hover: Duration::from_secs_f32(ICON_HOVER_SECS),
        }
    }
}
