//! Radial particle bursts on icon hover.

/// Particle batches, per-frame decay and batch replacement.
pub mod burst;

use bevy::prelude::*;
use burst::{animate_particles, emit_particle_bursts};

pub struct ParticlePlugin;

impl Plugin for ParticlePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, (emit_particle_bursts, animate_particles).chain());
    }
}
