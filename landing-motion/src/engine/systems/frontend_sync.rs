use crate::engine::animation::tween::PlayDirection;
use crate::engine::core::app_state::AppState;
use crate::engine::loading::gate::{LoadingComplete, LoadingProgressChanged};
use crate::engine::reveal::SectionRevealed;
use crate::engine::scene::SceneReady;
use crate::rpc::web_rpc::WebRpcInterface;
use bevy::prelude::*;

pub fn direction_label(direction: PlayDirection) -> &'static str {
    match direction {
        PlayDirection::Forward => "forward",
        PlayDirection::Backward => "backward",
    }
}

pub fn loading_notification_system(
    mut rpc_interface: ResMut<WebRpcInterface>,
    mut progress_events: EventReader<LoadingProgressChanged>,
    mut complete_events: EventReader<LoadingComplete>,
) {
    // Only the latest tick matters to the frontend.
    if let Some(update) = progress_events.read().last() {
        rpc_interface.send_notification(
            "loading_progress",
            serde_json::json!({
                "progress": update.progress,
                "status_text": update.status_text
            }),
        );
    }

    for _ in complete_events.read() {
        rpc_interface.send_notification("loading_complete", serde_json::json!({}));
    }
}

pub fn scene_ready_notification_system(
    mut rpc_interface: ResMut<WebRpcInterface>,
    mut ready_events: EventReader<SceneReady>,
) {
    for event in ready_events.read() {
        rpc_interface.send_notification(
            "scene_ready",
            serde_json::json!({
                "scene": event.scene,
                "target_found": event.target_found
            }),
        );
    }
}

pub fn reveal_notification_system(
    mut rpc_interface: ResMut<WebRpcInterface>,
    mut revealed_events: EventReader<SectionRevealed>,
) {
    for event in revealed_events.read() {
        rpc_interface.send_notification(
            "section_revealed",
            serde_json::json!({
                "key": event.key,
                "selector": event.selector,
                "direction": direction_label(event.direction)
            }),
        );
    }
}

fn page_interactive_notification(mut rpc_interface: ResMut<WebRpcInterface>) {
    rpc_interface.send_notification("page_interactive", serde_json::json!({}));
}

pub struct FrontendSyncPlugin;

impl Plugin for FrontendSyncPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                loading_notification_system,
                scene_ready_notification_system,
                reveal_notification_system,
            ),
        )
        .add_systems(OnEnter(AppState::Interactive), page_interactive_notification);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reveal_events_become_notifications() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .init_resource::<WebRpcInterface>()
            .add_event::<SectionRevealed>()
            .add_systems(Update, reveal_notification_system);

        app.world_mut().send_event(SectionRevealed {
            key: "about-text".to_string(),
            selector: "about".to_string(),
            direction: PlayDirection::Backward,
        });
        app.update();

        let notifications = app.world().resource::<WebRpcInterface>().pending_notifications();
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].method, "section_revealed");
        assert_eq!(notifications[0].params["direction"], "backward");
        assert_eq!(notifications[0].params["key"], "about-text");
        assert_eq!(notifications[0].params["selector"], "about");
    }

    #[test]
    fn only_latest_progress_is_sent() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .init_resource::<WebRpcInterface>()
            .add_event::<LoadingProgressChanged>()
            .add_event::<LoadingComplete>()
            .add_systems(Update, loading_notification_system);

        for progress in [1, 2, 3] {
            app.world_mut().send_event(LoadingProgressChanged {
                progress,
                status_text: "Initializing Neural Core",
            });
        }
        app.update();

        let notifications = app.world().resource::<WebRpcInterface>().pending_notifications();
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].params["progress"], 3);
    }
}
