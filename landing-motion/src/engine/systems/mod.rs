//! Runtime systems that mirror engine events to the host page.

/// Loading, scene and reveal notifications sent over the RPC bridge.
pub mod frontend_sync;
