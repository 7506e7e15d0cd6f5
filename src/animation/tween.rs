//! A single eased transition of one value toward a target.

use crate::util::easing::EasingFunction;

/// Values that can be blended for animation.
pub trait Lerp: Copy {
    /// Linear interpolation from `self` (t = 0) to `other` (t = 1).
    #[must_use]
    fn lerp(self, other: Self, t: f32) -> Self;
}

impl Lerp for f32 {
    #[inline]
    fn lerp(self, other: Self, t: f32) -> Self {
        self + (other - self) * t
    }
}

impl Lerp for glam::Vec3 {
    #[inline]
    fn lerp(self, other: Self, t: f32) -> Self {
        self + (other - self) * t
    }
}

/// Time-driven interpolation of a [`Lerp`] value.
///
/// The tween is advanced by frame deltas rather than sampling a wall
/// clock, so it moves in lockstep with whatever drives the frame loop.
/// Progress is normalized over `duration` and mapped through `easing`;
/// a zero duration completes on the first advance.
#[derive(Debug, Clone, Copy)]
pub struct Tween<T: Lerp> {
    start: T,
    target: T,
    duration: f32,
    elapsed: f32,
    easing: EasingFunction,
}

impl<T: Lerp> Tween<T> {
    /// Start a tween from `start` to `target` over `duration` seconds.
    pub fn new(
        start: T,
        target: T,
        duration: f32,
        easing: EasingFunction,
    ) -> Self {
        Self {
            start,
            target,
            duration: duration.max(0.0),
            elapsed: 0.0,
            easing,
        }
    }

    /// Normalized progress (0.0 to 1.0).
    #[must_use]
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).min(1.0)
        }
    }

    /// Whether the tween has reached its target.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.progress() >= 1.0
    }

    /// Value at the current progress.
    #[must_use]
    pub fn value(&self) -> T {
        if self.is_complete() {
            return self.target;
        }
        self.start
            .lerp(self.target, self.easing.evaluate(self.progress()))
    }

    /// Advance by `dt` seconds and return the new value.
    pub fn advance(&mut self, dt: f32) -> T {
        self.elapsed += dt.max(0.0);
        self.value()
    }

    /// The value this tween is heading toward.
    #[must_use]
    pub fn target(&self) -> T {
        self.target
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reaches_target_after_duration() {
        let mut tween = Tween::new(0.0_f32, 10.0, 1.0, EasingFunction::CubicOut);
        for _ in 0..60 {
            let _ = tween.advance(1.0 / 60.0);
        }
        let _ = tween.advance(0.001);
        assert!(tween.is_complete());
        assert_eq!(tween.value(), 10.0);
    }

    #[test]
    fn ease_out_front_loads_progress() {
        let mut tween = Tween::new(0.0_f32, 1.0, 1.0, EasingFunction::CubicOut);
        let halfway = tween.advance(0.5);
        assert!(halfway > 0.5, "expected ease-out, got {halfway}");
        assert!(!tween.is_complete());
    }

    #[test]
    fn zero_duration_snaps() {
        let mut tween = Tween::new(
            glam::Vec3::ZERO,
            glam::Vec3::ONE,
            0.0,
            EasingFunction::Linear,
        );
        assert_eq!(tween.advance(0.0), glam::Vec3::ONE);
    }

    #[test]
    fn negative_dt_does_not_rewind() {
        let mut tween = Tween::new(0.0_f32, 1.0, 1.0, EasingFunction::Linear);
        let _ = tween.advance(0.25);
        assert_eq!(tween.advance(-1.0), 0.25);
    }
}
