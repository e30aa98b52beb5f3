//! JSON-RPC 2.0 bridge between the engine and the hosting page.
//!
//! The canvas runs inside a page (or iframe) that drives it with
//! `postMessage`. Requests carry an `id` and get a response; notifications
//! carry none and are fire-and-forget in both directions.
//!
//! ```text
//! Host page  <──postMessage──>  Bevy canvas
//!     │                              │
//!     ├─ pointer_move / hover ──────>│  (notification)
//!     ├─ get_loading_state {id} ────>│
//!     │<─────────────── result {id} ─┤
//!     │<──── loading_progress ───────┤  (notification)
//! ```
//!
//! ## Requests
//! - `get_loading_state`: Current progress, status phrase and overlay visibility
//! - `get_rotation`: Current and target angles of pointer-reactive scenes
//! - `get_reveal_state`: Enter/trigger records of every registered reveal
//! - `get_page_content`: Static page copy
//!
//! ## Host Input
//! - `pointer_move`: Pointer position in window coordinates
//! - `scroll_update`: Absolute scroll offset of the host page
//! - `hover`: Enter or leave an interactive element by name
//!
//! ## Outgoing Notifications
//! - `loading_progress`, `loading_complete`, `page_interactive`
//! - `scene_ready`, `section_revealed`
//!
//! Errors use the standard codes: `-32601` method not found, `-32602` invalid
//! params, `-32603` internal error.

/// Message queueing, request dispatch and the WASM message listener.
pub mod web_rpc;
