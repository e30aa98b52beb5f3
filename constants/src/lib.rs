//! Static configuration for the landing page.
//!
//! Page copy, section layout, reveal registrations and motion tuning live
//! here so the orchestration crate consumes them as plain data.

/// Page copy: navigation, features, token details, allocations, roadmap.
pub mod content;

/// Loading sequence phrases and timing.
pub mod loading;

/// Motion tuning for rotation, particles, hover scales and reveals.
pub mod motion;

/// Section order, heights and reveal trigger registrations.
pub mod sections;
