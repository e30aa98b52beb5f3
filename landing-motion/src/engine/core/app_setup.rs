use bevy::asset::AssetMetaCheck;
use bevy::prelude::*;
use bevy_common_assets::json::JsonAssetPlugin;
// Crate engine modules
use crate::engine::animation::hover::HoverPlugin;
use crate::engine::assets::scene_manifest::SceneManifest;
use crate::engine::core::app_state::AppState;
use crate::engine::core::motion_settings::MotionSettings;
use crate::engine::core::page_surface::PageSurface;
use crate::engine::core::window_config::create_window_config;
use crate::engine::loading::LoadingPlugin;
use crate::engine::page::PagePlugin;
use crate::engine::particles::ParticlePlugin;
use crate::engine::pointer::PointerPlugin;
use crate::engine::reveal::systems::RevealPlugin;
use crate::engine::scene::{SceneReady, ScenesReady};
use crate::engine::systems::frontend_sync::FrontendSyncPlugin;
// Create Web RPC modules
use crate::rpc::web_rpc::WebRpcPlugin;

pub fn create_app() -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins())
        .init_state::<AppState>()
        // Registers SceneManifest as a loadable asset type from JSON files.
        .add_plugins(JsonAssetPlugin::<SceneManifest>::new(&["json"]))
        .add_plugins(WebRpcPlugin);

    // Initialise resources early
    app.insert_resource(PageSurface::platform_default())
        .init_resource::<MotionSettings>()
        .init_resource::<ScenesReady>()
        .add_event::<SceneReady>();

    app.add_plugins((
        LoadingPlugin,
        PagePlugin,
        RevealPlugin,
        HoverPlugin,
        ParticlePlugin,
        PointerPlugin,
        FrontendSyncPlugin,
    ));

    app
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    DefaultPlugins.set(window_config).set(asset_config)
}
