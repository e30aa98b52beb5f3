use crate::engine::animation::tween::{PlayDirection, Playhead, Tween};
use bevy::math::curve::EaseFunction;
use bevy::prelude::*;
use std::time::Duration;

/// Stepped count-up toward a fixed value, started by a reveal.
#[derive(Component, Debug, Clone)]
pub struct AnimatedCounter {
    pub reveal_key: String,
    target: u64,
    steps: u32,
    step: u32,
    duration: Duration,
    timer: Option<Timer>,
}

impl AnimatedCounter {
    pub fn new(reveal_key: &str, target: u64, steps: u32, duration: Duration) -> Self {
        Self {
            reveal_key: reveal_key.to_string(),
            target,
            steps: steps.max(1),
            step: 0,
            duration,
            timer: None,
        }
    }

    /// Begin counting. Later calls are ignored.
    pub fn start(&mut self) {
        if self.timer.is_none() && self.step == 0 {
            self.timer = Some(Timer::new(self.duration / self.steps, TimerMode::Repeating));
        }
    }

    /// Returns true when the displayed value changed.
    pub fn advance(&mut self, delta: Duration) -> bool {
        let Some(timer) = &mut self.timer else {
            return false;
        };
        timer.tick(delta);
        let due = timer.times_finished_this_tick().min(self.steps - self.step);
        self.step += due;
        if self.step >= self.steps {
            self.timer = None;
        }
        due > 0
    }

    pub fn value(&self) -> u64 {
        if self.step >= self.steps {
            return self.target;
        }
        (u128::from(self.target) * u128::from(self.step) / u128::from(self.steps)) as u64
    }
}

/// `1234567` → `"1,234,567"`.
pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(digit);
    }
    out
}

/// Allocation bar that grows to its percentage once revealed.
#[derive(Component, Debug, Clone)]
pub struct FillBar {
    pub reveal_key: String,
    percentage: f32,
    duration: Duration,
    tween: Option<Tween>,
}

impl FillBar {
    pub fn new(reveal_key: &str, percentage: f32, duration: Duration) -> Self {
        Self {
            reveal_key: reveal_key.to_string(),
            percentage,
            duration,
            tween: None,
        }
    }

    pub fn start(&mut self) {
        if self.tween.is_none() {
            self.tween = Some(Tween::new(self.duration, EaseFunction::CubicOut));
        }
    }

    /// Bar width in percent after stepping.
    pub fn advance(&mut self, delta: Duration) -> Option<f32> {
        let tween = self.tween.as_mut()?;
        if tween.is_finished() {
            return None;
        }
        Some(self.percentage * tween.advance(delta))
    }

    pub fn width(&self) -> f32 {
        self.tween
            .map_or(0.0, |tween| self.percentage * tween.progress())
    }
}

/// Header background that fades in while the page is scrolled.
#[derive(Component, Debug, Clone)]
pub struct HeaderBackdrop {
    pub max_alpha: f32,
    fade: Playhead,
    fade_secs: f32,
}

impl HeaderBackdrop {
    pub fn new(max_alpha: f32, fade: Duration) -> Self {
        Self {
            max_alpha,
            fade: Playhead::new(fade),
            fade_secs: fade.as_secs_f32(),
        }
    }

    pub fn set_scrolled(&mut self, scrolled: bool) {
        self.fade.play(if scrolled {
            PlayDirection::Forward
        } else {
            PlayDirection::Backward
        });
    }

    pub fn advance(&mut self, delta: Duration) -> Option<f32> {
        if !self.fade.advance(delta) {
            return None;
        }
        Some(self.alpha())
    }

    pub fn alpha(&self) -> f32 {
        self.max_alpha * self.fade.sample(EaseFunction::Linear, 0.0, self.fade_secs)
    }
}

/// One-off slide-in of the header from above.
#[derive(Component, Debug, Clone)]
pub struct HeaderEntrance {
    from_offset: f32,
    tween: Tween,
}

impl HeaderEntrance {
    pub fn new(from_offset: f32, duration: Duration) -> Self {
        Self {
            from_offset,
            tween: Tween::new(duration, EaseFunction::QuinticOut),
        }
    }

    pub fn advance(&mut self, delta: Duration) -> Option<f32> {
        if self.tween.is_finished() {
            return None;
        }
        let progress = self.tween.advance(delta);
        Some(self.from_offset * (1.0 - progress))
    }
}
