use bevy::prelude::*;
use constants::loading::{LOADING_PHRASES, PHRASE_BUCKET_WIDTH};
use std::time::Duration;

/// Status phrase for a progress value, clamped to the final phrase.
pub fn status_text(progress: u8) -> &'static str {
    let bucket = usize::from(progress / PHRASE_BUCKET_WIDTH);
    LOADING_PHRASES[bucket.min(LOADING_PHRASES.len() - 1)]
}

/// Snapshot of the loading sequence as shown on the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadingState {
    pub progress: u8,
    pub status_text: &'static str,
    pub active: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimerPhase {
    Counting,
    Settling,
    Finished,
}

/// What changed during one `ProgressTimer::advance` call.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ProgressUpdate {
    /// Steps applied this call.
    pub ticks: u32,
    /// Progress hit 100 during this call.
    pub reached_full: bool,
    /// The settle delay elapsed during this call. Reported once.
    pub completed: bool,
}

/// Fixed-interval step counter driving the 0..=100 loading value.
///
/// Every elapsed tick adds one step until `total_steps`; the tick source
/// then stops and a settle delay runs before completion is reported.
#[derive(Debug, Clone)]
pub struct ProgressTimer {
    tick: Timer,
    settle: Timer,
    step: u32,
    total_steps: u32,
    phase: TimerPhase,
}

impl ProgressTimer {
    pub fn start(tick_interval: Duration, total_steps: u32, settle_delay: Duration) -> Self {
        Self {
            tick: Timer::new(tick_interval, TimerMode::Repeating),
            settle: Timer::new(settle_delay, TimerMode::Once),
            step: 0,
            total_steps: total_steps.max(1),
            phase: TimerPhase::Counting,
        }
    }

    pub fn progress(&self) -> u8 {
        let scaled = u64::from(self.step) * 100 / u64::from(self.total_steps);
        scaled.min(100) as u8
    }

    pub fn state(&self) -> LoadingState {
        let progress = self.progress();
        LoadingState {
            progress,
            status_text: status_text(progress),
            active: self.phase != TimerPhase::Finished,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.phase == TimerPhase::Finished
    }

    pub fn advance(&mut self, delta: Duration) -> ProgressUpdate {
        let mut update = ProgressUpdate::default();
        match self.phase {
            TimerPhase::Counting => {
                self.tick.tick(delta);
                let due = self.tick.times_finished_this_tick();
                let applied = due.min(self.total_steps - self.step);
                self.step += applied;
                update.ticks = applied;
                if self.step < self.total_steps {
                    return update;
                }

                update.reached_full = true;
                self.phase = TimerPhase::Settling;
                // Time already spent past the final tick counts toward the settle delay.
                let surplus = self.tick.duration() * (due - applied) + self.tick.elapsed();
                self.settle_for(surplus, &mut update);
            }
            TimerPhase::Settling => self.settle_for(delta, &mut update),
            TimerPhase::Finished => {}
        }
        update
    }

    fn settle_for(&mut self, delta: Duration, update: &mut ProgressUpdate) {
        self.settle.tick(delta);
        if self.settle.finished() {
            self.phase = TimerPhase::Finished;
            update.completed = true;
        }
    }
}
