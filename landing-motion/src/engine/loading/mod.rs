//! Loading gate and scene manifest bootstrapping.
//!
//! The gate locks page scroll, runs the timed progress counter and releases
//! the page once the timer has settled and every gating scene is ready.

use bevy::prelude::*;

/// Gate component, completion events and the systems that drive it.
///
/// Owns the scroll lock guard, so despawning the gate always restores the page.
pub mod gate;

/// Scene manifest loading and scene host spawning.
///
/// Applies motion overrides and reports when every gating scene is ready.
pub mod manifest_loader;

/// Full-screen progress overlay attached to the gate.
pub mod overlay;

/// Timed progress counter and status phrase buckets.
pub mod progress;

/// Page scroll lock held for the lifetime of the gate.
pub mod scroll_lock;

pub struct LoadingPlugin;

impl Plugin for LoadingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<gate::LoadingGateConfig>()
            .init_resource::<manifest_loader::ManifestLoader>()
            .add_event::<gate::LoadingComplete>()
            .add_event::<gate::LoadingProgressChanged>()
            .add_systems(
                Startup,
                (gate::mount_loading_gate, manifest_loader::start_loading).chain(),
            )
            .add_systems(
                Update,
                (
                    manifest_loader::apply_scene_manifest,
                    manifest_loader::update_scene_readiness,
                    overlay::attach_loading_overlay,
                    gate::advance_loading_gate,
                    overlay::update_loading_overlay,
                )
                    .chain(),
            );
    }
}
