//! Core application setup and state management.
//!
//! Handles application lifecycle, window configuration, state transitions,
//! and plugin initialisation for both native and WASM targets.

/// Application setup and plugin configuration for the Bevy engine.
///
/// Creates the main app with the page, scene hosts, motion systems and the
/// RPC bridge, plus platform-specific configuration.
pub mod app_setup;

/// Application state machine: loading overlay, then the interactive page.
pub mod app_state;

/// Runtime motion tuning shared by rotation, hover and particle systems.
pub mod motion_settings;

/// Handle to the hosting page's body style.
///
/// Locks and restores scrolling on the document under WASM.
pub mod page_surface;

/// Platform-specific window configuration for native and WASM builds.
///
/// Configures canvas integration for web targets and vsync settings.
pub mod window_config;
