use crate::engine::animation::hover::HoverChanged;
use crate::engine::animation::tween::sample_eased;
use crate::engine::core::motion_settings::MotionSettings;
use bevy::color::Alpha;
use bevy::math::curve::EaseFunction;
use bevy::prelude::*;
use constants::motion::PARTICLE_SIZE_PX;
use std::f32::consts::TAU;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleInstance {
    pub id: u64,
    pub angle_slot: usize,
    pub origin: Vec2,
    pub born_at: Duration,
}

impl ParticleInstance {
    /// Position and opacity at `now` for a batch of `count`.
    pub fn frame_at(
        &self,
        now: Duration,
        count: usize,
        radius: f32,
        duration: Duration,
    ) -> ParticleFrame {
        let mut frame = particle_frame(
            self.angle_slot,
            count,
            radius,
            now.saturating_sub(self.born_at),
            duration,
        );
        frame.offset += self.origin;
        frame
    }
}

/// One hover's worth of particles. Replaced wholesale by the next hover.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleBatch {
    generation: u64,
    born_at: Duration,
    particles: Vec<ParticleInstance>,
}

impl ParticleBatch {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn born_at(&self) -> Duration {
        self.born_at
    }

    pub fn particles(&self) -> &[ParticleInstance] {
        &self.particles
    }
}

/// Offset and opacity of one particle at a point in its flight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleFrame {
    pub offset: Vec2,
    pub opacity: f32,
    pub finished: bool,
}

/// Particle `slot` of `count` flies out along `slot / count * 2π`, fading as
/// it goes.
pub fn particle_frame(
    slot: usize,
    count: usize,
    radius: f32,
    age: Duration,
    duration: Duration,
) -> ParticleFrame {
    let angle = slot as f32 / count.max(1) as f32 * TAU;
    let progress = sample_eased(
        EaseFunction::CubicOut,
        age.as_secs_f32(),
        duration.as_secs_f32(),
    );
    ParticleFrame {
        offset: Vec2::new(angle.cos(), angle.sin()) * radius * progress,
        opacity: 1.0 - progress,
        finished: age >= duration,
    }
}

/// Hover target that spawns a particle batch on every hover-enter.
#[derive(Component, Debug, Clone, Default)]
pub struct ParticleEmitter {
    batch: Option<ParticleBatch>,
    next_generation: u64,
    next_id: u64,
}

impl ParticleEmitter {
    /// Replace any live batch with a fresh one of `count` particles.
    pub fn hover_enter(&mut self, now: Duration, count: usize) -> &ParticleBatch {
        self.next_generation += 1;
        let first_id = self.next_id;
        self.next_id += count as u64;
        let particles = (0..count)
            .map(|slot| ParticleInstance {
                id: first_id + slot as u64,
                angle_slot: slot,
                origin: Vec2::ZERO,
                born_at: now,
            })
            .collect();
        self.batch.insert(ParticleBatch {
            generation: self.next_generation,
            born_at: now,
            particles,
        })
    }

    pub fn batch(&self) -> Option<&ParticleBatch> {
        self.batch.as_ref()
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.batch
            .as_ref()
            .is_some_and(|batch| batch.generation == generation)
    }

    /// Drop the batch once its flight time is over.
    pub fn retire_finished(&mut self, now: Duration, duration: Duration) -> bool {
        let finished = self
            .batch
            .as_ref()
            .is_some_and(|batch| now.saturating_sub(batch.born_at) >= duration);
        if finished {
            self.batch = None;
        }
        finished
    }
}

/// A drawn particle belonging to one emitter batch.
#[derive(Component, Debug, Clone, Copy)]
pub struct Particle {
    pub emitter: Entity,
    pub generation: u64,
    pub slot: usize,
}

const PARTICLE_COLOR: Color = Color::srgb(0.66, 0.33, 0.97);

/// Swap in a new batch for each hover-enter. Stale particles are despawned
/// in the same command flush that spawns the replacements.
pub fn emit_particle_bursts(
    mut commands: Commands,
    time: Res<Time>,
    settings: Res<MotionSettings>,
    mut hover_events: EventReader<HoverChanged>,
    mut emitters: Query<&mut ParticleEmitter>,
    particles: Query<(Entity, &Particle)>,
) {
    for event in hover_events.read() {
        if !event.entered {
            continue;
        }
        let Ok(mut emitter) = emitters.get_mut(event.target) else {
            continue;
        };

        for (entity, particle) in &particles {
            if particle.emitter == event.target {
                commands.entity(entity).try_despawn();
            }
        }

        let batch = emitter.hover_enter(time.elapsed(), settings.particle_count);
        let generation = batch.generation();
        commands.entity(event.target).with_children(|parent| {
            for instance in batch.particles() {
                parent.spawn((
                    Particle {
                        emitter: event.target,
                        generation,
                        slot: instance.angle_slot,
                    },
                    Node {
                        position_type: PositionType::Absolute,
                        width: Val::Px(PARTICLE_SIZE_PX),
                        height: Val::Px(PARTICLE_SIZE_PX),
                        left: Val::Percent(50.0),
                        top: Val::Percent(50.0),
                        ..default()
                    },
                    BorderRadius::MAX,
                    BackgroundColor(PARTICLE_COLOR),
                ));
            }
        });
    }
}

/// Move and fade live particles; drop finished or stale ones.
pub fn animate_particles(
    mut commands: Commands,
    time: Res<Time>,
    settings: Res<MotionSettings>,
    mut emitters: Query<&mut ParticleEmitter>,
    mut particles: Query<(Entity, &Particle, &mut Node, &mut BackgroundColor, &mut Visibility)>,
) {
    let now = time.elapsed();
    for (entity, particle, mut node, mut color, mut visibility) in &mut particles {
        let frame = match emitters.get(particle.emitter) {
            Ok(emitter) if emitter.is_current(particle.generation) => {
                emitter.batch().and_then(|batch| {
                    batch.particles().get(particle.slot).map(|instance| {
                        instance.frame_at(
                            now,
                            batch.particles().len(),
                            settings.particle_radius,
                            settings.particle_duration,
                        )
                    })
                })
            }
            _ => None,
        };
        let Some(frame) = frame else {
            *visibility = Visibility::Hidden;
            commands.entity(entity).try_despawn();
            continue;
        };

        if frame.finished {
            commands.entity(entity).try_despawn();
            continue;
        }
        node.margin = UiRect {
            left: Val::Px(frame.offset.x),
            top: Val::Px(frame.offset.y),
            ..default()
        };
        color.0.set_alpha(frame.opacity);
    }

    for mut emitter in &mut emitters {
        if emitter.batch().is_some() {
            emitter.retire_finished(now, settings.particle_duration);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::time::TimeUpdateStrategy;

    #[test]
    fn slots_spread_around_the_circle() {
        let radius = 20.0;
        let end = Duration::from_millis(600);
        let first = particle_frame(0, 10, radius, end, end);
        assert!((first.offset - Vec2::new(20.0, 0.0)).length() < 1e-4);
        assert!(first.finished);
        assert_eq!(first.opacity, 0.0);

        let quarter = particle_frame(5, 10, radius, end, end);
        assert!((quarter.offset - Vec2::new(-20.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn particles_start_at_origin_fully_opaque() {
        let frame = particle_frame(3, 10, 20.0, Duration::ZERO, Duration::from_millis(600));
        assert_eq!(frame.offset.length(), 0.0);
        assert_eq!(frame.opacity, 1.0);
        assert!(!frame.finished);
    }

    #[test]
    fn instance_frame_follows_its_birth_time() {
        let mut emitter = ParticleEmitter::default();
        let born = Duration::from_millis(200);
        let duration = Duration::from_millis(600);
        let instance = emitter.hover_enter(born, 4).particles()[1];

        let start = instance.frame_at(born, 4, 20.0, duration);
        assert_eq!(start.offset, Vec2::ZERO);
        assert_eq!(start.opacity, 1.0);

        let end = instance.frame_at(born + duration, 4, 20.0, duration);
        assert!((end.offset - Vec2::new(0.0, 20.0)).length() < 1e-4);
        assert_eq!(end.opacity, 0.0);
        assert!(end.finished);
    }

    #[test]
    fn second_hover_replaces_batch() {
        let mut emitter = ParticleEmitter::default();
        let first = emitter.hover_enter(Duration::ZERO, 10).generation();
        let second_batch = emitter.hover_enter(Duration::from_millis(30), 10).clone();
        assert_ne!(first, second_batch.generation());
        assert!(!emitter.is_current(first));
        assert_eq!(second_batch.particles().len(), 10);
        let ids: Vec<u64> = second_batch.particles().iter().map(|p| p.id).collect();
        assert_eq!(ids, (10..20).collect::<Vec<_>>());
    }

    #[test]
    fn finished_batch_is_retired() {
        let mut emitter = ParticleEmitter::default();
        emitter.hover_enter(Duration::ZERO, 10);
        let duration = Duration::from_millis(600);
        assert!(!emitter.retire_finished(Duration::from_millis(300), duration));
        assert!(emitter.retire_finished(Duration::from_millis(600), duration));
        assert!(emitter.batch().is_none());
    }

    fn particle_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(16)))
            .init_resource::<MotionSettings>()
            .add_event::<HoverChanged>()
            .add_systems(Update, (emit_particle_bursts, animate_particles).chain());
        app
    }

    fn live_particles(app: &mut App) -> Vec<Particle> {
        let mut query = app.world_mut().query::<&Particle>();
        query.iter(app.world()).copied().collect()
    }

    #[test]
    fn rapid_hovers_leave_only_latest_batch() {
        let mut app = particle_app();
        let icon = app.world_mut().spawn((Node::default(), ParticleEmitter::default())).id();
        app.update();

        app.world_mut().send_event(HoverChanged {
            target: icon,
            entered: true,
        });
        app.update();
        app.world_mut().send_event(HoverChanged {
            target: icon,
            entered: true,
        });
        app.update();
        app.update();

        let particles = live_particles(&mut app);
        assert_eq!(particles.len(), 10);
        let emitter = app.world().get::<ParticleEmitter>(icon).unwrap();
        assert!(particles.iter().all(|p| emitter.is_current(p.generation)));
    }

    #[test]
    fn particles_clear_after_flight() {
        let mut app = particle_app();
        let icon = app.world_mut().spawn((Node::default(), ParticleEmitter::default())).id();
        app.update();
        app.world_mut().send_event(HoverChanged {
            target: icon,
            entered: true,
        });
        app.world_mut().send_event(HoverChanged {
            target: icon,
            entered: false,
        });
        for _ in 0..60 {
            app.update();
        }
        assert!(live_particles(&mut app).is_empty());
        assert!(app.world().get::<ParticleEmitter>(icon).unwrap().batch().is_none());
    }
}
