use crate::engine::assets::scene_manifest::SceneDescriptor;
use bevy::prelude::*;
use std::collections::HashMap;

/// Name lookup over a spawned scene instance.
pub trait SceneContext {
    /// Every named object under the instance root, in lookup order.
    fn named_objects(&self) -> Vec<(String, Entity)>;

    fn find_object_by_name(&self, name: &str) -> Option<Entity> {
        self.named_objects()
            .into_iter()
            .find_map(|(found, entity)| (found == name).then_some(entity))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readiness {
    Pending,
    Ready { target: Option<Entity> },
}

/// Readiness and named-object references for one scene host.
///
/// Populated exactly once, when the renderer reports the instance ready. A
/// missing target object is a valid steady state.
#[derive(Component, Debug, Clone)]
pub struct SceneHandle {
    scene_id: String,
    target_name: Option<String>,
    gates_loading: bool,
    readiness: Readiness,
    object_refs: HashMap<String, Entity>,
}

impl SceneHandle {
    pub fn new(descriptor: &SceneDescriptor) -> Self {
        Self {
            scene_id: descriptor.id.clone(),
            target_name: descriptor.target_object.clone(),
            gates_loading: descriptor.gates_loading,
            readiness: Readiness::Pending,
            object_refs: HashMap::new(),
        }
    }

    pub fn scene_id(&self) -> &str {
        &self.scene_id
    }

    pub fn target_name(&self) -> Option<&str> {
        self.target_name.as_deref()
    }

    pub fn gates_loading(&self) -> bool {
        self.gates_loading
    }

    pub fn readiness(&self) -> Readiness {
        self.readiness
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.readiness, Readiness::Ready { .. })
    }

    /// Resolved target object, once ready.
    pub fn target(&self) -> Option<Entity> {
        match self.readiness {
            Readiness::Ready { target } => target,
            Readiness::Pending => None,
        }
    }

    /// Index the freshly spawned scene and resolve the target. Returns false
    /// for redundant ready signals.
    pub fn resolve(&mut self, context: &impl SceneContext) -> bool {
        if self.is_ready() {
            return false;
        }

        for (name, entity) in context.named_objects() {
            self.object_refs.entry(name).or_insert(entity);
        }
        let target = self
            .target_name
            .as_deref()
            .and_then(|name| self.object_refs.get(name).copied());
        self.readiness = Readiness::Ready { target };
        true
    }

    /// First object called `name` in the ready scene.
    pub fn find_by_name(&self, name: &str) -> Option<Entity> {
        self.object_refs.get(name).copied()
    }

    /// Drop the target after the renderer removed it.
    pub fn forget_target(&mut self) {
        let Readiness::Ready { target } = &mut self.readiness else {
            return;
        };
        if let Some(gone) = target.take() {
            self.object_refs.retain(|_, entity| *entity != gone);
        }
    }
}

/// Presentation state of a scene viewer. Fixed once the scene is ready:
/// no end-user pan or zoom, a set zoom level.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct ViewerControls {
    locked: bool,
    zoom: f32,
}

impl Default for ViewerControls {
    fn default() -> Self {
        Self {
            locked: false,
            zoom: 1.0,
        }
    }
}

impl ViewerControls {
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Lock the viewer at `zoom` and return the host scale for it. `None`
    /// once already locked. Non-positive zoom falls back to 1.
    pub fn lock_for_presentation(&mut self, zoom: f32) -> Option<Vec3> {
        if self.locked {
            return None;
        }
        self.locked = true;
        self.zoom = if zoom > 0.0 { zoom } else { 1.0 };
        Some(Vec3::splat(self.zoom))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FakeScene(Vec<(&'static str, Entity)>);

    impl SceneContext for FakeScene {
        fn named_objects(&self) -> Vec<(String, Entity)> {
            self.0
                .iter()
                .map(|(name, entity)| (name.to_string(), *entity))
                .collect()
        }
    }

    fn descriptor(target: Option<&str>) -> SceneDescriptor {
        SceneDescriptor {
            id: "hero".to_string(),
            uri: "scenes/hero.glb#Scene0".to_string(),
            section: "hero".to_string(),
            target_object: target.map(str::to_string),
            zoom: 1.0,
            gates_loading: true,
            pointer_reactive: true,
        }
    }

    #[test]
    fn resolves_named_target_once() {
        let skull = Entity::from_raw(7);
        let other = Entity::from_raw(9);
        let mut handle = SceneHandle::new(&descriptor(Some("Skull")));
        assert!(!handle.is_ready());
        assert_eq!(handle.target(), None);

        assert!(handle.resolve(&FakeScene(vec![("Skull", skull)])));
        assert_eq!(handle.target(), Some(skull));
        assert_eq!(handle.find_by_name("Skull"), Some(skull));

        assert!(!handle.resolve(&FakeScene(vec![("Skull", other)])));
        assert_eq!(handle.target(), Some(skull));
    }

    #[test]
    fn absent_target_is_ready_without_object() {
        let mut handle = SceneHandle::new(&descriptor(Some("Skull")));
        assert!(handle.resolve(&FakeScene(Vec::new())));
        assert!(handle.is_ready());
        assert_eq!(handle.target(), None);
        assert_eq!(handle.find_by_name("Skull"), None);
    }

    #[test]
    fn forgetting_target_keeps_readiness() {
        let mut handle = SceneHandle::new(&descriptor(Some("Skull")));
        handle.resolve(&FakeScene(vec![("Skull", Entity::from_raw(3))]));
        handle.forget_target();
        assert!(handle.is_ready());
        assert_eq!(handle.target(), None);
    }

    #[test]
    fn any_named_object_is_found_once_ready() {
        let skull = Entity::from_raw(1);
        let jaw = Entity::from_raw(2);
        let duplicate = Entity::from_raw(3);
        let mut handle = SceneHandle::new(&descriptor(Some("Skull")));
        let scene = FakeScene(vec![("Skull", skull), ("Jaw", jaw), ("Jaw", duplicate)]);
        assert_eq!(handle.find_by_name("Jaw"), None);

        handle.resolve(&scene);
        assert_eq!(handle.find_by_name("Jaw"), Some(jaw));
        assert_eq!(handle.find_by_name("Eye"), None);

        handle.forget_target();
        assert_eq!(handle.find_by_name("Skull"), None);
        assert_eq!(handle.find_by_name("Jaw"), Some(jaw));
    }

    #[test]
    fn presentation_lock_applies_zoom_once() {
        let mut controls = ViewerControls::default();
        assert!(!controls.is_locked());
        assert_eq!(controls.lock_for_presentation(0.8), Some(Vec3::splat(0.8)));
        assert!(controls.is_locked());
        assert_eq!(controls.zoom(), 0.8);
        assert_eq!(controls.lock_for_presentation(2.0), None);
        assert_eq!(controls.zoom(), 0.8);
    }

    #[test]
    fn non_positive_zoom_falls_back_to_one() {
        let mut controls = ViewerControls::default();
        assert_eq!(controls.lock_for_presentation(0.0), Some(Vec3::ONE));
    }
}
