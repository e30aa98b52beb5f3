use crate::engine::assets::scene_manifest::SceneManifest;
use crate::engine::core::motion_settings::MotionSettings;
use crate::engine::loading::gate::LoadingGate;
use crate::engine::scene::ScenesReady;
use crate::engine::scene::scene_handle::SceneHandle;
use crate::engine::scene::scene_host::spawn_scene_host;
use bevy::asset::LoadState;
use bevy::prelude::*;
use constants::loading::SCENE_MANIFEST_PATH;

#[derive(Resource, Default)]
pub struct ManifestLoader {
    handle: Option<Handle<SceneManifest>>,
    /// Gating hosts spawned from the manifest, once it has been applied.
    gating_hosts: Option<usize>,
    failed: bool,
}

impl ManifestLoader {
    pub fn is_applied(&self) -> bool {
        self.gating_hosts.is_some()
    }
}

// Start the loading process
pub fn start_loading(mut manifest_loader: ResMut<ManifestLoader>, asset_server: Res<AssetServer>) {
    manifest_loader.handle = Some(asset_server.load(SCENE_MANIFEST_PATH));
}

// Spawn scene hosts and apply motion overrides once the manifest is available
pub fn apply_scene_manifest(
    mut commands: Commands,
    mut manifest_loader: ResMut<ManifestLoader>,
    asset_server: Res<AssetServer>,
    manifests: Res<Assets<SceneManifest>>,
    mut motion: ResMut<MotionSettings>,
    mut gates: Query<&mut LoadingGate>,
) {
    if manifest_loader.is_applied() || manifest_loader.failed {
        return;
    }
    let Some(handle) = manifest_loader.handle.clone() else {
        return;
    };

    let Some(manifest) = manifests.get(&handle) else {
        if let Some(LoadState::Failed(err)) = asset_server.get_load_state(&handle) {
            error!("Scene manifest failed to load: {}", err);
            manifest_loader.failed = true;
        }
        return;
    };

    println!("✓ Scene manifest loaded ({} scenes)", manifest.scenes.len());
    manifest.motion.apply(&mut motion);
    if let Some(policy) = manifest.motion.stall_policy() {
        for mut gate in &mut gates {
            gate.set_stall_policy(policy);
        }
    }

    for descriptor in &manifest.scenes {
        spawn_scene_host(&mut commands, &asset_server, descriptor);
    }
    manifest_loader.gating_hosts = Some(manifest.gating_scene_count());
}

/// Recompute whether every gating host is ready.
pub fn update_scene_readiness(
    manifest_loader: Res<ManifestLoader>,
    hosts: Query<&SceneHandle>,
    mut scenes_ready: ResMut<ScenesReady>,
) {
    let ready = match manifest_loader.gating_hosts {
        Some(expected) => {
            let ready_hosts = hosts
                .iter()
                .filter(|handle| handle.gates_loading() && handle.is_ready())
                .count();
            ready_hosts >= expected
        }
        None => false,
    };
    scenes_ready.set_if_neq(ScenesReady(ready));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::assets::scene_manifest::SceneDescriptor;
    use crate::engine::scene::scene_handle::SceneContext;

    struct EmptyScene;

    impl SceneContext for EmptyScene {
        fn named_objects(&self) -> Vec<(String, Entity)> {
            Vec::new()
        }
    }

    fn gating_handle() -> SceneHandle {
        SceneHandle::new(&SceneDescriptor {
            id: "hero".to_string(),
            uri: "scenes/hero.glb#Scene0".to_string(),
            section: "hero".to_string(),
            target_object: None,
            zoom: 1.0,
            gates_loading: true,
            pointer_reactive: false,
        })
    }

    fn readiness_app(gating_hosts: Option<usize>) -> App {
        let mut app = App::new();
        app.insert_resource(ManifestLoader {
            handle: None,
            gating_hosts,
            failed: false,
        })
        .init_resource::<ScenesReady>()
        .add_systems(Update, update_scene_readiness);
        app
    }

    #[test]
    fn not_ready_before_manifest_applies() {
        let mut app = readiness_app(None);
        app.update();
        assert!(!app.world().resource::<ScenesReady>().0);
    }

    #[test]
    fn ready_once_all_gating_hosts_resolve() {
        let mut app = readiness_app(Some(1));
        let host = app.world_mut().spawn(gating_handle()).id();
        app.update();
        assert!(!app.world().resource::<ScenesReady>().0);

        app.world_mut()
            .get_mut::<SceneHandle>(host)
            .unwrap()
            .resolve(&EmptyScene);
        app.update();
        assert!(app.world().resource::<ScenesReady>().0);
    }

    #[test]
    fn manifest_without_gating_scenes_is_ready() {
        let mut app = readiness_app(Some(0));
        app.update();
        assert!(app.world().resource::<ScenesReady>().0);
    }
}
