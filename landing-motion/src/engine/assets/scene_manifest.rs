use crate::engine::core::motion_settings::MotionSettings;
use crate::engine::loading::gate::SceneStallPolicy;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// One externally authored 3D scene placed on the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneDescriptor {
    pub id: String,
    /// Asset path including the scene label, e.g. `scenes/hero.glb#Scene0`.
    pub uri: String,
    /// Page section the scene is anchored to.
    pub section: String,
    /// Node that pointer rotation drives, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_object: Option<String>,
    #[serde(default = "default_zoom")]
    pub zoom: f32,
    /// Whether the loading gate waits for this scene.
    #[serde(default)]
    pub gates_loading: bool,
    #[serde(default)]
    pub pointer_reactive: bool,
}

fn default_zoom() -> f32 {
    1.0
}

/// Optional motion tuning overrides. Absent fields keep their defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MotionOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_rotation_deg: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation_ease_secs: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub particle_count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub particle_radius: Option<f32>,
    /// Release the page after the gating scene stalls this long.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stall_release_ms: Option<u64>,
}

impl MotionOverrides {
    pub fn apply(&self, settings: &mut MotionSettings) {
        if let Some(angle) = self.max_rotation_deg {
            settings.max_rotation_deg = angle.abs();
        }
        if let Some(secs) = self.rotation_ease_secs {
            settings.rotation_ease = Duration::from_secs_f32(secs.max(0.0));
        }
        if let Some(count) = self.particle_count {
            settings.particle_count = count;
        }
        if let Some(radius) = self.particle_radius {
            settings.particle_radius = radius;
        }
    }

    pub fn stall_policy(&self) -> Option<SceneStallPolicy> {
        self.stall_release_ms
            .map(|ms| SceneStallPolicy::ReleaseAfter(Duration::from_millis(ms)))
    }
}

/// Landing page scene manifest as a Bevy asset. Mirrors the JSON file.
#[derive(Asset, TypePath, Debug, Clone, Serialize, Deserialize)]
pub struct SceneManifest {
    pub scenes: Vec<SceneDescriptor>,
    #[serde(default)]
    pub motion: MotionOverrides,
}

impl SceneManifest {
    pub fn gating_scene_count(&self) -> usize {
        self.scenes.iter().filter(|scene| scene.gates_loading).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANIFEST: &str = r#"{
        "scenes": [
            { "id": "hero", "uri": "scenes/hero.glb#Scene0", "section": "hero",
              "target_object": "Skull", "gates_loading": true, "pointer_reactive": true },
            { "id": "coin", "uri": "scenes/coin.glb#Scene0", "section": "token-info", "zoom": 0.8 }
        ],
        "motion": { "max_rotation_deg": 12.0, "stall_release_ms": 8000 }
    }"#;

    #[test]
    fn parses_descriptors_with_defaults() {
        let manifest: SceneManifest = serde_json::from_str(MANIFEST).unwrap();
        assert_eq!(manifest.scenes.len(), 2);
        assert_eq!(manifest.gating_scene_count(), 1);

        let coin = &manifest.scenes[1];
        assert_eq!(coin.target_object, None);
        assert_eq!(coin.zoom, 0.8);
        assert!(!coin.pointer_reactive);
        assert_eq!(manifest.scenes[0].zoom, 1.0);
    }

    #[test]
    fn overrides_only_touch_present_fields() {
        let manifest: SceneManifest = serde_json::from_str(MANIFEST).unwrap();
        let mut settings = MotionSettings::default();
        manifest.motion.apply(&mut settings);
        assert_eq!(settings.max_rotation_deg, 12.0);
        assert_eq!(settings.particle_count, MotionSettings::default().particle_count);
        assert_eq!(
            manifest.motion.stall_policy(),
            Some(SceneStallPolicy::ReleaseAfter(Duration::from_secs(8)))
        );
    }

    #[test]
    fn motion_block_is_optional() {
        let manifest: SceneManifest = serde_json::from_str(r#"{ "scenes": [] }"#).unwrap();
        assert_eq!(manifest.motion, MotionOverrides::default());
        assert_eq!(manifest.motion.stall_policy(), None);
    }
}
