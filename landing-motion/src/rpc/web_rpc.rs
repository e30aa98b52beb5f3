use crate::engine::animation::hover::{HoverChanged, HoverScale};
use crate::engine::core::page_surface::PageSurface;
use crate::engine::loading::gate::LoadingGate;
use crate::engine::loading::progress::LoadingState;
use crate::engine::page::scroll::PageScroll;
use crate::engine::pointer::PointerMoved;
use crate::engine::pointer::rotation::{PointerRotation, RotationState};
use crate::engine::reveal::coordinator::{RevealRecord, ScrollRevealCoordinator};
use crate::engine::scene::scene_handle::SceneHandle;
use bevy::prelude::*;
use constants::content::PAGE_CONTENT;
use constants::loading::LOADING_PHRASES;
use serde::{Deserialize, Serialize};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsValue;

#[cfg(target_arch = "wasm32")]
use web_sys::{MessageEvent, window};

/// JSON-RPC 2.0 request structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcRequest {
    pub jsonrpc: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 response structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcResponse {
    pub jsonrpc: String,
    pub result: Option<serde_json::Value>,
    pub error: Option<RpcError>,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 notification structure for one-way communication.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcNotification {
    pub jsonrpc: String,
    pub method: String,
    pub params: serde_json::Value,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
    pub data: Option<serde_json::Value>,
}

/// Outgoing notification and response queues, flushed once per frame.
#[derive(Resource, Default)]
pub struct WebRpcInterface {
    outgoing_notifications: Vec<RpcNotification>,
    outgoing_responses: Vec<RpcResponse>,
}

impl WebRpcInterface {
    /// Send notification to the host page without expecting a response.
    pub fn send_notification(&mut self, method: &str, params: serde_json::Value) {
        self.outgoing_notifications.push(RpcNotification {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
        });
    }

    /// Notifications queued since the last flush.
    pub fn pending_notifications(&self) -> &[RpcNotification] {
        &self.outgoing_notifications
    }

    fn queue_response(&mut self, response: RpcResponse) {
        self.outgoing_responses.push(response);
    }
}

pub struct WebRpcPlugin;

impl Plugin for WebRpcPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WebRpcInterface>()
            .add_event::<IncomingRpcMessage>()
            .add_systems(
                Update,
                (
                    process_incoming_messages,
                    handle_rpc_messages,
                    send_outgoing_messages,
                )
                    .chain(),
            );

        #[cfg(target_arch = "wasm32")]
        app.add_systems(Startup, setup_message_listener);
    }
}

/// The registered `message` listener. Dropping it unregisters the callback.
#[cfg(target_arch = "wasm32")]
struct MessageListener {
    closure: Closure<dyn FnMut(MessageEvent)>,
}

#[cfg(target_arch = "wasm32")]
impl Drop for MessageListener {
    fn drop(&mut self) {
        let Some(window) = window() else {
            return;
        };
        if let Err(err) = window
            .remove_event_listener_with_callback("message", self.closure.as_ref().unchecked_ref())
        {
            warn!("Failed to remove message listener: {:?}", err);
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn setup_message_listener(world: &mut World) {
    use std::sync::{Arc, Mutex};

    let message_queue: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let queue_clone = message_queue.clone();

    let closure = Closure::wrap(Box::new(move |event: MessageEvent| {
        if let Ok(data) = event.data().dyn_into::<js_sys::JsString>() {
            let message_str: String = data.into();
            if message_str.contains("jsonrpc") {
                if let Ok(mut queue) = queue_clone.lock() {
                    queue.push(message_str);
                }
            }
        }
    }) as Box<dyn FnMut(MessageEvent)>);

    let Some(window) = window() else {
        error!("Window object not available, host messages disabled");
        return;
    };
    if let Err(err) =
        window.add_event_listener_with_callback("message", closure.as_ref().unchecked_ref())
    {
        error!("Failed to register message listener: {:?}", err);
        return;
    }

    world.insert_non_send_resource(MessageListener { closure });
    world.insert_resource(MessageQueue(message_queue));
}

/// Messages received by the listener, drained each frame.
#[derive(Resource)]
struct MessageQueue(std::sync::Arc<std::sync::Mutex<Vec<String>>>);

#[derive(Event)]
struct IncomingRpcMessage {
    content: String,
}

fn process_incoming_messages(
    message_queue: Option<Res<MessageQueue>>,
    mut message_events: EventWriter<IncomingRpcMessage>,
) {
    let Some(queue_res) = message_queue else {
        return;
    };

    let messages = if let Ok(mut queue) = queue_res.0.lock() {
        std::mem::take(&mut *queue)
    } else {
        Vec::new()
    };

    for message_str in messages {
        message_events.write(IncomingRpcMessage {
            content: message_str,
        });
    }
}

/// Host input carried by notifications.
#[derive(Debug, Clone, PartialEq)]
pub enum RpcCommand {
    PointerMove(Vec2),
    Scroll {
        scroll_y: f32,
        viewport_height: Option<f32>,
    },
    /// `target` is the element's `Name`.
    Hover { target: String, entered: bool },
}

/// Parse host input methods. `None` when `request` is not one of them.
pub fn parse_command(request: &RpcRequest) -> Option<Result<RpcCommand, RpcError>> {
    #[derive(Deserialize)]
    struct PointerParams {
        client_x: f32,
        client_y: f32,
    }

    #[derive(Deserialize)]
    struct ScrollParams {
        scroll_y: f32,
        viewport_height: Option<f32>,
    }

    #[derive(Deserialize)]
    struct HoverParams {
        target: String,
        entered: bool,
    }

    let params = request.params.clone();
    let command = match request.method.as_str() {
        "pointer_move" => serde_json::from_value::<PointerParams>(params)
            .map(|p| RpcCommand::PointerMove(Vec2::new(p.client_x, p.client_y)))
            .map_err(|_| RpcError::invalid_params("Expected 'client_x' and 'client_y' parameters")),
        "scroll_update" => serde_json::from_value::<ScrollParams>(params)
            .map(|p| RpcCommand::Scroll {
                scroll_y: p.scroll_y,
                viewport_height: p.viewport_height,
            })
            .map_err(|_| RpcError::invalid_params("Expected 'scroll_y' parameter")),
        "hover" => serde_json::from_value::<HoverParams>(params)
            .map(|p| RpcCommand::Hover {
                target: p.target,
                entered: p.entered,
            })
            .map_err(|_| RpcError::invalid_params("Expected 'target' and 'entered' parameters")),
        _ => return None,
    };
    Some(command)
}

/// Engine state visible to request handlers.
#[derive(Debug, Clone)]
pub struct RpcSnapshot {
    pub loading: LoadingState,
    pub rotations: Vec<(String, RotationState)>,
    pub reveals: Vec<(String, RevealRecord)>,
    pub scroll_offset: f32,
}

/// Handle individual RPC request and generate response based on method.
pub fn handle_rpc_request(request: &RpcRequest, snapshot: &RpcSnapshot) -> Option<RpcResponse> {
    // Only generate responses for requests with IDs (notifications have no ID).
    let id = request.id.clone()?;

    let result = match request.method.as_str() {
        "get_loading_state" => Ok(loading_state_json(&snapshot.loading)),
        "get_rotation" => Ok(serde_json::json!({
            "scenes": snapshot
                .rotations
                .iter()
                .map(|(scene, state)| serde_json::json!({
                    "scene": scene,
                    "current": { "x": state.current.x, "y": state.current.y },
                    "target": { "x": state.target.x, "y": state.target.y }
                }))
                .collect::<Vec<_>>()
        })),
        "get_reveal_state" => Ok(serde_json::json!({
            "scroll_offset": snapshot.scroll_offset,
            "reveals": snapshot
                .reveals
                .iter()
                .map(|(key, record)| serde_json::json!({
                    "key": key,
                    "has_entered": record.has_entered,
                    "triggered_once": record.triggered_once
                }))
                .collect::<Vec<_>>()
        })),
        "get_page_content" => serde_json::to_value(PAGE_CONTENT)
            .map_err(|err| RpcError::internal_error(&format!("Content unavailable: {err}"))),
        _ => {
            warn!("Unknown RPC method: {}", request.method);
            return Some(create_error_response(
                id,
                -32601,
                "Method not found",
                Some(serde_json::json!({"method": request.method})),
            ));
        }
    };

    Some(into_response(id, result))
}

fn loading_state_json(state: &LoadingState) -> serde_json::Value {
    serde_json::json!({
        "progress": state.progress,
        "status_text": state.status_text,
        "active": state.active
    })
}

fn into_response(id: serde_json::Value, result: Result<serde_json::Value, RpcError>) -> RpcResponse {
    match result {
        Ok(result_value) => RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: Some(result_value),
            error: None,
            id: Some(id),
        },
        Err(error) => RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: None,
            error: Some(error),
            id: Some(id),
        },
    }
}

fn handle_rpc_messages(
    mut events: EventReader<IncomingRpcMessage>,
    mut rpc_interface: ResMut<WebRpcInterface>,
    gates: Query<&LoadingGate>,
    hosts: Query<(&SceneHandle, &PointerRotation)>,
    coordinator: Res<ScrollRevealCoordinator>,
    hoverables: Query<(Entity, &Name), With<HoverScale>>,
    surface: Res<PageSurface>,
    mut scroll: ResMut<PageScroll>,
    mut pointer_events: EventWriter<PointerMoved>,
    mut hover_events: EventWriter<HoverChanged>,
) {
    for event in events.read() {
        let request = match serde_json::from_str::<RpcRequest>(&event.content) {
            Ok(request) => request,
            Err(parse_error) => {
                warn!("Unparseable RPC message: {}", parse_error);
                continue;
            }
        };

        match parse_command(&request) {
            Some(Ok(command)) => {
                match command {
                    RpcCommand::PointerMove(position) => {
                        pointer_events.write(PointerMoved { position });
                    }
                    RpcCommand::Scroll {
                        scroll_y,
                        viewport_height,
                    } => {
                        if let Some(height) = viewport_height {
                            scroll.set_viewport_height(height);
                        }
                        if surface.is_scroll_locked() {
                            debug!("Ignoring scroll update while the page is locked");
                        } else {
                            scroll.scroll_to(scroll_y);
                        }
                    }
                    RpcCommand::Hover { target, entered } => {
                        match hoverables.iter().find(|(_, name)| name.as_str() == target) {
                            Some((entity, _)) => {
                                hover_events.write(HoverChanged {
                                    target: entity,
                                    entered,
                                });
                            }
                            None => warn!("No hoverable element named '{}'", target),
                        }
                    }
                }
                if let Some(id) = request.id {
                    rpc_interface
                        .queue_response(into_response(id, Ok(serde_json::json!({"success": true}))));
                }
            }
            Some(Err(error)) => {
                warn!("Rejected '{}': {}", request.method, error.message);
                if let Some(id) = request.id {
                    rpc_interface.queue_response(into_response(id, Err(error)));
                }
            }
            None => {
                let snapshot = RpcSnapshot {
                    loading: gates.iter().next().map_or(
                        LoadingState {
                            progress: 100,
                            status_text: LOADING_PHRASES[LOADING_PHRASES.len() - 1],
                            active: false,
                        },
                        LoadingGate::state,
                    ),
                    rotations: hosts
                        .iter()
                        .map(|(handle, rotation)| (handle.scene_id().to_string(), rotation.state()))
                        .collect(),
                    reveals: coordinator
                        .records()
                        .map(|(key, record)| (key.to_string(), record))
                        .collect(),
                    scroll_offset: scroll.offset(),
                };
                if let Some(response) = handle_rpc_request(&request, &snapshot) {
                    rpc_interface.queue_response(response);
                }
            }
        }
    }
}

/// Create standardized error response with optional data payload.
fn create_error_response(
    id: serde_json::Value,
    code: i32,
    message: &str,
    data: Option<serde_json::Value>,
) -> RpcResponse {
    RpcResponse {
        jsonrpc: "2.0".to_string(),
        result: None,
        error: Some(RpcError {
            code,
            message: message.to_string(),
            data,
        }),
        id: Some(id),
    }
}

/// Send queued notifications and responses to the host page.
fn send_outgoing_messages(mut rpc_interface: ResMut<WebRpcInterface>) {
    if rpc_interface.outgoing_notifications.is_empty()
        && rpc_interface.outgoing_responses.is_empty()
    {
        return;
    }

    // Notifications first, then responses, to keep ordering stable.
    for notification in rpc_interface.outgoing_notifications.drain(..) {
        send_message_to_parent(&notification);
    }
    for response in rpc_interface.outgoing_responses.drain(..) {
        send_message_to_parent(&response);
    }
}

/// Post a serialized message to the parent window.
fn send_message_to_parent<T: Serialize>(message: &T) {
    #[cfg(target_arch = "wasm32")]
    {
        match serde_json::to_string(message) {
            Ok(json) => {
                let Some(window) = window() else {
                    error!("Window object not available");
                    return;
                };
                match window.parent().ok().flatten() {
                    Some(parent) => {
                        if let Err(e) = parent.post_message(&JsValue::from_str(&json), "*") {
                            error!("Failed to send message to parent: {:?}", e);
                        }
                    }
                    None => warn!("No parent window available for message transmission"),
                }
            }
            Err(e) => {
                error!("Failed to serialize message: {}", e);
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = message;
    }
}

impl RpcError {
    pub fn invalid_params(message: &str) -> Self {
        Self {
            code: -32602,
            message: message.to_string(),
            data: None,
        }
    }

    pub fn internal_error(message: &str) -> Self {
        Self {
            code: -32603,
            message: message.to_string(),
            data: None,
        }
    }
}
