//! Externally rendered scene hosts and their readiness contract.
//!
//! Hosts are spawned from the scene manifest; each reports ready once through
//! Bevy's `SceneInstanceReady` and exposes named objects from that point on.

use bevy::prelude::*;

/// Readiness state and named-object lookup for a loaded scene.
pub mod scene_handle;

/// Scene host spawning and ready-signal observer.
pub mod scene_host;

/// Fired once per host when its scene instance is ready.
#[derive(Event, Debug, Clone)]
pub struct SceneReady {
    pub host: Entity,
    pub scene: String,
    pub target_found: bool,
}

/// Whether every scene the loading gate waits on is ready.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScenesReady(pub bool);
