use super::progress::{LoadingState, ProgressTimer};
use super::scroll_lock::ScrollLockGuard;
use crate::engine::core::app_state::AppState;
use crate::engine::core::page_surface::PageSurface;
use crate::engine::scene::ScenesReady;
use bevy::prelude::*;
use constants::loading::{LOADING_SETTLE_DELAY_MS, LOADING_TICK_INTERVAL_MS, LOADING_TOTAL_STEPS};
use std::time::Duration;

/// What the gate does when the timer is done but gating scenes are not.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SceneStallPolicy {
    /// Keep the overlay up until every gating scene reports ready.
    #[default]
    WaitIndefinitely,
    /// Release the page once the scene has kept it waiting this long.
    ReleaseAfter(Duration),
}

/// Timing for a freshly mounted gate.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct LoadingGateConfig {
    pub tick_interval: Duration,
    pub total_steps: u32,
    pub settle_delay: Duration,
    pub stall_policy: SceneStallPolicy,
}

impl Default for LoadingGateConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(LOADING_TICK_INTERVAL_MS),
            total_steps: LOADING_TOTAL_STEPS,
            settle_delay: Duration::from_millis(LOADING_SETTLE_DELAY_MS),
            stall_policy: SceneStallPolicy::default(),
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct GateStep {
    pub progressed: bool,
    pub complete: bool,
    /// Completion was forced by `SceneStallPolicy::ReleaseAfter`.
    pub stalled_release: bool,
}

/// Blocks the page until the loading timer and gating scenes are both done.
///
/// The gate entity owns the scroll lock, so despawning it at any point
/// hands the page back.
#[derive(Component)]
pub struct LoadingGate {
    timer: ProgressTimer,
    stall_policy: SceneStallPolicy,
    waited_on_scene: Duration,
    completed: bool,
    _scroll_lock: ScrollLockGuard,
}

impl LoadingGate {
    pub fn mount(surface: &PageSurface, config: &LoadingGateConfig) -> Self {
        Self {
            timer: ProgressTimer::start(config.tick_interval, config.total_steps, config.settle_delay),
            stall_policy: config.stall_policy,
            waited_on_scene: Duration::ZERO,
            completed: false,
            _scroll_lock: ScrollLockGuard::acquire(surface),
        }
    }

    pub fn state(&self) -> LoadingState {
        let mut state = self.timer.state();
        state.active = !self.completed;
        state
    }

    pub fn is_complete(&self) -> bool {
        self.completed
    }

    pub fn set_stall_policy(&mut self, policy: SceneStallPolicy) {
        self.stall_policy = policy;
    }

    pub fn advance(&mut self, delta: Duration, scenes_ready: bool) -> GateStep {
        if self.completed {
            return GateStep::default();
        }

        let update = self.timer.advance(delta);
        let mut step = GateStep {
            progressed: update.ticks > 0,
            ..default()
        };
        if !self.timer.is_finished() {
            return step;
        }

        if !scenes_ready {
            if !update.completed {
                self.waited_on_scene += delta;
            }
            match self.stall_policy {
                SceneStallPolicy::ReleaseAfter(limit) if self.waited_on_scene >= limit => {
                    step.stalled_release = true;
                }
                _ => return step,
            }
        }

        self.completed = true;
        step.complete = true;
        step
    }
}

/// Fired exactly once per gate when the page is released.
#[derive(Event, Debug, Clone, Copy)]
pub struct LoadingComplete {
    pub gate: Entity,
}

#[derive(Event, Debug, Clone, Copy)]
pub struct LoadingProgressChanged {
    pub progress: u8,
    pub status_text: &'static str,
}

pub fn mount_loading_gate(
    mut commands: Commands,
    surface: Res<PageSurface>,
    config: Res<LoadingGateConfig>,
) {
    let gate = LoadingGate::mount(&surface, &config);
    commands.spawn((gate, Name::new("Loading Gate")));
    info!(
        "Loading gate mounted ({} steps every {:?})",
        config.total_steps, config.tick_interval
    );
}

pub fn advance_loading_gate(
    mut commands: Commands,
    time: Res<Time>,
    scenes_ready: Res<ScenesReady>,
    mut gates: Query<(Entity, &mut LoadingGate)>,
    mut progress_events: EventWriter<LoadingProgressChanged>,
    mut complete_events: EventWriter<LoadingComplete>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    for (entity, mut gate) in &mut gates {
        let step = gate.advance(time.delta(), scenes_ready.0);

        if step.progressed {
            let state = gate.state();
            progress_events.write(LoadingProgressChanged {
                progress: state.progress,
                status_text: state.status_text,
            });
        }

        if step.stalled_release {
            warn!("Gating scene never reported ready, releasing page anyway");
        }

        if step.complete {
            complete_events.write(LoadingComplete { gate: entity });
            commands.entity(entity).despawn();
            println!("→ Loading complete, transitioning to Interactive state");
            next_state.set(AppState::Interactive);
        }
    }
}
