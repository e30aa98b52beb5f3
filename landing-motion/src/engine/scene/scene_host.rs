use super::SceneReady;
use super::scene_handle::{SceneContext, SceneHandle, ViewerControls};
use crate::engine::assets::scene_manifest::SceneDescriptor;
use crate::engine::pointer::rotation::{ContainerRect, PointerRotation};
use bevy::prelude::*;
use bevy::scene::SceneInstanceReady;
use constants::motion::SCENE_SECTION_SPACING;
use constants::sections::section_index;

/// Marker for an entity hosting one externally authored scene.
#[derive(Component)]
pub struct SceneHost {
    pub zoom: f32,
}

/// Spawn a host for `descriptor`. It stays hidden until its instance is ready.
pub fn spawn_scene_host(
    commands: &mut Commands,
    asset_server: &AssetServer,
    descriptor: &SceneDescriptor,
) -> Entity {
    let scene: Handle<Scene> = asset_server.load(descriptor.uri.clone());
    let Some(index) = section_index(&descriptor.section) else {
        warn!(
            "Scene '{}' anchored to unknown section '{}'",
            descriptor.id, descriptor.section
        );
        return spawn_at(commands, scene, descriptor, 0);
    };
    spawn_at(commands, scene, descriptor, index)
}

fn spawn_at(
    commands: &mut Commands,
    scene: Handle<Scene>,
    descriptor: &SceneDescriptor,
    section: usize,
) -> Entity {
    let mut host = commands.spawn((
        Name::new(format!("Scene Host: {}", descriptor.id)),
        SceneRoot(scene),
        SceneHost {
            zoom: descriptor.zoom,
        },
        SceneHandle::new(descriptor),
        ViewerControls::default(),
        Transform::from_xyz(0.0, -(section as f32) * SCENE_SECTION_SPACING, 0.0),
        Visibility::Hidden,
    ));
    if descriptor.pointer_reactive {
        host.insert((
            PointerRotation::default(),
            ContainerRect::for_section(&descriptor.section),
        ));
    }
    host.observe(resolve_scene_on_ready);
    host.id()
}

/// Name lookup over the descendants of a scene host.
struct SpawnedScene<'a, 'w, 's, 'c, 'n> {
    root: Entity,
    children: &'a Query<'w, 's, &'c Children>,
    names: &'a Query<'w, 's, &'n Name>,
}

impl SpawnedScene<'_, '_, '_, '_, '_> {
    fn push_children(&self, entity: Entity, stack: &mut Vec<Entity>) {
        if let Ok(children) = self.children.get(entity) {
            let children: &[Entity] = children;
            stack.extend(children.iter().rev());
        }
    }
}

impl SceneContext for SpawnedScene<'_, '_, '_, '_, '_> {
    fn named_objects(&self) -> Vec<(String, Entity)> {
        let mut found = Vec::new();
        let mut stack = Vec::new();
        self.push_children(self.root, &mut stack);
        while let Some(entity) = stack.pop() {
            if let Ok(name) = self.names.get(entity) {
                found.push((name.as_str().to_string(), entity));
            }
            self.push_children(entity, &mut stack);
        }
        found
    }
}

fn resolve_scene_on_ready(
    trigger: Trigger<SceneInstanceReady>,
    mut hosts: Query<(
        &SceneHost,
        &mut SceneHandle,
        &mut ViewerControls,
        &mut Transform,
        &mut Visibility,
    )>,
    children: Query<&Children>,
    names: Query<&Name>,
    mut ready_events: EventWriter<SceneReady>,
) {
    let host = trigger.target();
    let Ok((scene_host, mut handle, mut controls, mut transform, mut visibility)) =
        hosts.get_mut(host)
    else {
        return;
    };

    let context = SpawnedScene {
        root: host,
        children: &children,
        names: &names,
    };
    if !handle.resolve(&context) {
        debug!("Ignoring repeated ready signal for '{}'", handle.scene_id());
        return;
    }

    if let Some(scale) = controls.lock_for_presentation(scene_host.zoom) {
        transform.scale = scale;
    }
    *visibility = Visibility::Inherited;

    let target_found = handle.target().is_some();
    match (handle.target_name(), target_found) {
        (Some(name), false) => warn!(
            "Scene '{}' has no object named '{}', pointer rotation disabled",
            handle.scene_id(),
            name
        ),
        _ => info!("✓ Scene '{}' ready", handle.scene_id()),
    }

    ready_events.write(SceneReady {
        host,
        scene: handle.scene_id().to_string(),
        target_found,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::system::RunSystemOnce;
    use bevy::scene::SceneSpawner;

    fn lookup(world: &mut World, root: Entity) -> Vec<(String, Entity)> {
        world
            .run_system_once(move |children: Query<&Children>, names: Query<&Name>| {
                SpawnedScene {
                    root,
                    children: &children,
                    names: &names,
                }
                .named_objects()
            })
            .unwrap_or_default()
    }

    #[test]
    fn walks_nested_descendants_in_order() {
        let mut world = World::new();
        let root = world.spawn(Name::new("Skull")).id();
        let armature = world.spawn((Name::new("Armature"), ChildOf(root))).id();
        let skull = world.spawn((Name::new("Skull"), ChildOf(armature))).id();
        let jaw = world.spawn((Name::new("Jaw"), ChildOf(root))).id();

        let found = lookup(&mut world, root);
        assert_eq!(
            found,
            vec![
                ("Armature".to_string(), armature),
                ("Skull".to_string(), skull),
                ("Jaw".to_string(), jaw),
            ]
        );
    }

    fn hero_descriptor() -> SceneDescriptor {
        SceneDescriptor {
            id: "hero".to_string(),
            uri: "scenes/hero.glb#Scene0".to_string(),
            section: "hero".to_string(),
            target_object: Some("Skull".to_string()),
            zoom: 0.8,
            gates_loading: true,
            pointer_reactive: true,
        }
    }

    fn ready_signal() -> SceneInstanceReady {
        let instance_id = SceneSpawner::default().spawn(Handle::<Scene>::default());
        SceneInstanceReady { instance_id }
    }

    #[test]
    fn ready_signal_resolves_host_once() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins).add_event::<SceneReady>();

        let descriptor = hero_descriptor();
        let host = app
            .world_mut()
            .spawn((
                SceneHost {
                    zoom: descriptor.zoom,
                },
                SceneHandle::new(&descriptor),
                ViewerControls::default(),
                Transform::default(),
                Visibility::Hidden,
            ))
            .observe(resolve_scene_on_ready)
            .id();
        let skull = app.world_mut().spawn((Name::new("Skull"), ChildOf(host))).id();
        let jaw = app.world_mut().spawn((Name::new("Jaw"), ChildOf(skull))).id();

        app.world_mut().trigger_targets(ready_signal(), host);
        app.world_mut().trigger_targets(ready_signal(), host);

        let world = app.world();
        let handle = world.get::<SceneHandle>(host).unwrap();
        assert_eq!(handle.target(), Some(skull));
        assert_eq!(handle.find_by_name("Jaw"), Some(jaw));

        let controls = world.get::<ViewerControls>(host).unwrap();
        assert!(controls.is_locked());
        assert_eq!(world.get::<Transform>(host).unwrap().scale, Vec3::splat(0.8));
        assert_eq!(world.get::<Visibility>(host), Some(&Visibility::Inherited));

        let events = world.resource::<Events<SceneReady>>();
        let ready: Vec<_> = events.iter_current_update_events().collect();
        assert_eq!(ready.len(), 1);
        assert_eq!(ready[0].host, host);
        assert!(ready[0].target_found);
    }
}
