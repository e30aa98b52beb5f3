use bevy::math::curve::{Curve, EaseFunction};
use std::time::Duration;

/// An eased 0 → 1 progression over a fixed duration, with an optional delay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    delay: f32,
    duration: f32,
    elapsed: f32,
    ease: EaseFunction,
}

impl Tween {
    pub fn new(duration: Duration, ease: EaseFunction) -> Self {
        Self {
            delay: 0.0,
            duration: duration.as_secs_f32(),
            elapsed: 0.0,
            ease,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay.as_secs_f32();
        self
    }

    /// Move forward by `delta` and return the eased progress.
    pub fn advance(&mut self, delta: Duration) -> f32 {
        self.elapsed = (self.elapsed + delta.as_secs_f32()).min(self.delay + self.duration);
        self.progress()
    }

    /// Eased progress in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        sample_eased(self.ease, self.elapsed - self.delay, self.duration)
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.delay + self.duration
    }
}

/// Ease `elapsed / duration`, clamped to the unit interval.
///
/// A zero duration counts as already finished once the delay is over.
pub fn sample_eased(ease: EaseFunction, elapsed: f32, duration: f32) -> f32 {
    if duration <= 0.0 {
        return if elapsed >= 0.0 { 1.0 } else { 0.0 };
    }
    ease.sample_clamped((elapsed / duration).clamp(0.0, 1.0))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayDirection {
    Forward,
    Backward,
}

/// A timeline position that can run forward to its length or back to zero.
///
/// Staggered reveals and hover scales sample this with per-item delays, so
/// reversing replays the same curve backward from wherever it currently is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Playhead {
    position: f32,
    length: f32,
    direction: Option<PlayDirection>,
}

impl Playhead {
    pub fn new(length: Duration) -> Self {
        Self {
            position: 0.0,
            length: length.as_secs_f32(),
            direction: None,
        }
    }

    pub fn play(&mut self, direction: PlayDirection) {
        self.direction = Some(direction);
    }

    /// Step the playhead; returns true while it is still moving.
    pub fn advance(&mut self, delta: Duration) -> bool {
        let Some(direction) = self.direction else {
            return false;
        };
        let step = delta.as_secs_f32();
        match direction {
            PlayDirection::Forward => self.position = (self.position + step).min(self.length),
            PlayDirection::Backward => self.position = (self.position - step).max(0.0),
        }
        let settled = match direction {
            PlayDirection::Forward => self.position >= self.length,
            PlayDirection::Backward => self.position <= 0.0,
        };
        if settled {
            self.direction = None;
        }
        true
    }

    pub fn position(&self) -> f32 {
        self.position
    }

    pub fn is_playing(&self) -> bool {
        self.direction.is_some()
    }

    /// Eased progress of an item starting `delay` seconds into the timeline.
    pub fn sample(&self, ease: EaseFunction, delay: f32, duration: f32) -> f32 {
        sample_eased(ease, self.position - delay, duration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tween_reaches_one_and_stops() {
        let mut tween = Tween::new(Duration::from_millis(500), EaseFunction::QuadraticOut);
        let mid = tween.advance(Duration::from_millis(250));
        assert!(mid > 0.5 && mid < 1.0, "ease-out is ahead of linear at half time: {mid}");
        assert!(!tween.is_finished());
        assert_eq!(tween.advance(Duration::from_secs(3)), 1.0);
        assert!(tween.is_finished());
    }

    #[test]
    fn delayed_tween_holds_at_zero() {
        let mut tween = Tween::new(Duration::from_millis(100), EaseFunction::Linear)
            .with_delay(Duration::from_millis(200));
        assert_eq!(tween.advance(Duration::from_millis(150)), 0.0);
        assert_eq!(tween.advance(Duration::from_millis(150)), 1.0);
    }

    #[test]
    fn zero_duration_is_immediately_complete() {
        assert_eq!(sample_eased(EaseFunction::QuadraticOut, 0.0, 0.0), 1.0);
        assert_eq!(sample_eased(EaseFunction::QuadraticOut, -0.1, 0.0), 0.0);
    }

    #[test]
    fn playhead_reverses_from_current_position() {
        let mut playhead = Playhead::new(Duration::from_secs(1));
        playhead.play(PlayDirection::Forward);
        playhead.advance(Duration::from_millis(600));
        playhead.play(PlayDirection::Backward);
        playhead.advance(Duration::from_millis(200));
        assert!((playhead.position() - 0.4).abs() < 1e-5);
        playhead.advance(Duration::from_secs(2));
        assert_eq!(playhead.position(), 0.0);
        assert!(!playhead.is_playing());
    }

    #[test]
    fn staggered_samples_lag_by_delay() {
        let mut playhead = Playhead::new(Duration::from_secs(2));
        playhead.play(PlayDirection::Forward);
        playhead.advance(Duration::from_millis(500));
        let first = playhead.sample(EaseFunction::Linear, 0.0, 1.0);
        let second = playhead.sample(EaseFunction::Linear, 0.2, 1.0);
        assert!((first - 0.5).abs() < 1e-5);
        assert!((second - 0.3).abs() < 1e-5);
    }
}
