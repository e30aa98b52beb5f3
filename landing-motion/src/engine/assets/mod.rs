//! Asset definitions loaded from the static bundle.

/// Scene manifest: externally authored scenes and optional motion overrides.
pub mod scene_manifest;
