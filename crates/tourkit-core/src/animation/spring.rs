#![forbid(unsafe_code)]

//! Damped harmonic oscillator.
//!
//! Drives one scalar toward a target:
//!
//!   a = -stiffness * (position - target) - damping * velocity
//!
//! integrated with semi-implicit Euler. Deltas larger than 4ms are
//! subdivided so stiff springs stay stable at low frame rates.
//!
//! # Invariants
//!
//! 1. Stiffness is at least [`MIN_STIFFNESS`]; damping is never negative.
//! 2. A spring at rest stays at rest until [`Spring::set_target`] moves the
//!    target or [`Animation::reset`] is called.
//! 3. Settling snaps `position` exactly onto `target`.

use std::time::Duration;

use super::Animation;

const MAX_STEP_SECS: f64 = 0.004;
const DEFAULT_REST_THRESHOLD: f64 = 0.01;
const DEFAULT_VELOCITY_THRESHOLD: f64 = 0.05;

/// Floor applied to stiffness.
pub const MIN_STIFFNESS: f64 = 0.1;

/// A damped spring producing physically-based motion.
#[derive(Debug, Clone)]
pub struct Spring {
    position: f64,
    velocity: f64,
    target: f64,
    initial: f64,
    stiffness: f64,
    damping: f64,
    rest_threshold: f64,
    velocity_threshold: f64,
    at_rest: bool,
}

impl Spring {
    /// Create a spring at `initial` heading for `target`.
    ///
    /// Defaults: stiffness 170, damping 26 (slightly underdamped).
    #[must_use]
    pub fn new(initial: f64, target: f64) -> Self {
        Self {
            position: initial,
            velocity: 0.0,
            target,
            initial,
            stiffness: 170.0,
            damping: 26.0,
            rest_threshold: DEFAULT_REST_THRESHOLD,
            velocity_threshold: DEFAULT_VELOCITY_THRESHOLD,
            at_rest: (initial - target).abs() < DEFAULT_REST_THRESHOLD,
        }
    }

    /// A spring already settled at `value`.
    #[must_use]
    pub fn at(value: f64) -> Self {
        Self::new(value, value)
    }

    /// Set stiffness. Clamped to [`MIN_STIFFNESS`].
    #[must_use]
    pub fn with_stiffness(mut self, k: f64) -> Self {
        self.stiffness = k.max(MIN_STIFFNESS);
        self
    }

    /// Set damping. Clamped to zero.
    #[must_use]
    pub fn with_damping(mut self, c: f64) -> Self {
        self.damping = c.max(0.0);
        self
    }

    /// Current position (unclamped).
    #[inline]
    #[must_use]
    pub fn position(&self) -> f64 {
        self.position
    }

    /// Current target.
    #[inline]
    #[must_use]
    pub fn target(&self) -> f64 {
        self.target
    }

    /// Stiffness parameter.
    #[inline]
    #[must_use]
    pub fn stiffness(&self) -> f64 {
        self.stiffness
    }

    /// Damping parameter.
    #[inline]
    #[must_use]
    pub fn damping(&self) -> f64 {
        self.damping
    }

    /// Move the target. Wakes the spring if the target actually moved.
    pub fn set_target(&mut self, target: f64) {
        if (self.target - target).abs() > self.rest_threshold {
            self.target = target;
            self.at_rest = false;
        }
    }

    /// Jump straight to `value` and settle there.
    pub fn snap_to(&mut self, value: f64) {
        self.position = value;
        self.target = value;
        self.velocity = 0.0;
        self.at_rest = true;
    }

    /// Whether the spring has settled.
    #[inline]
    #[must_use]
    pub fn is_at_rest(&self) -> bool {
        self.at_rest
    }

    /// Critical damping coefficient for the current stiffness.
    #[must_use]
    pub fn critical_damping(&self) -> f64 {
        2.0 * self.stiffness.sqrt()
    }

    fn step(&mut self, dt: f64) {
        let displacement = self.position - self.target;
        let acceleration = -self.stiffness * displacement - self.damping * self.velocity;
        self.velocity += acceleration * dt;
        self.position += self.velocity * dt;
    }

    /// Advance by `dt`, subdividing for stability.
    pub fn advance(&mut self, dt: Duration) {
        if self.at_rest {
            return;
        }

        let mut remaining = dt.as_secs_f64();
        while remaining > 0.0 {
            let step_dt = remaining.min(MAX_STEP_SECS);
            self.step(step_dt);
            remaining -= step_dt;
        }

        if (self.position - self.target).abs() < self.rest_threshold
            && self.velocity.abs() < self.velocity_threshold
        {
            self.position = self.target;
            self.velocity = 0.0;
            self.at_rest = true;
        }
    }
}

impl Animation for Spring {
    fn tick(&mut self, dt: Duration) {
        self.advance(dt);
    }

    fn is_complete(&self) -> bool {
        self.at_rest
    }

    /// Position clamped to [0.0, 1.0]; use [`Spring::position`] for the raw
    /// coordinate.
    fn value(&self) -> f32 {
        (self.position as f32).clamp(0.0, 1.0)
    }

    fn reset(&mut self) {
        self.position = self.initial;
        self.velocity = 0.0;
        self.at_rest = (self.initial - self.target).abs() < self.rest_threshold;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: Duration = Duration::from_millis(16);

    fn simulate(spring: &mut Spring, frames: usize) {
        for _ in 0..frames {
            spring.tick(FRAME);
        }
    }

    #[test]
    fn reaches_target_and_settles() {
        let mut spring = Spring::new(0.0, 40.0);
        simulate(&mut spring, 240);
        assert!(spring.is_at_rest());
        assert_eq!(spring.position(), 40.0);
    }

    #[test]
    fn starts_at_initial() {
        let spring = Spring::new(12.0, 30.0);
        assert_eq!(spring.position(), 12.0);
        assert!(!spring.is_at_rest());
    }

    #[test]
    fn spring_at_value_is_already_at_rest() {
        let mut spring = Spring::at(5.0);
        assert!(spring.is_at_rest());
        spring.tick(FRAME);
        assert_eq!(spring.position(), 5.0);
    }

    #[test]
    fn set_target_wakes_spring() {
        let mut spring = Spring::at(0.0);
        spring.set_target(10.0);
        assert!(!spring.is_at_rest());
        spring.tick(FRAME);
        assert!(spring.position() > 0.0);
    }

    #[test]
    fn set_same_target_stays_at_rest() {
        let mut spring = Spring::at(3.0);
        spring.set_target(3.0);
        assert!(spring.is_at_rest());
    }

    #[test]
    fn critically_damped_spring_does_not_overshoot() {
        let base = Spring::new(0.0, 20.0).with_stiffness(200.0);
        let c = base.critical_damping();
        let mut spring = base.with_damping(c);
        let mut max = 0.0_f64;
        for _ in 0..300 {
            spring.tick(FRAME);
            max = max.max(spring.position());
        }
        assert!(max <= 20.0 + 0.05, "overshoot to {max}");
    }

    #[test]
    fn large_dt_is_subdivided() {
        let mut spring = Spring::new(0.0, 1.0).with_stiffness(400.0).with_damping(40.0);
        spring.tick(Duration::from_secs(2));
        assert!(spring.position().is_finite());
        assert!((spring.position() - 1.0).abs() < 0.05);
    }

    #[test]
    fn snap_to_settles_immediately() {
        let mut spring = Spring::new(0.0, 50.0);
        spring.tick(FRAME);
        spring.snap_to(8.0);
        assert!(spring.is_at_rest());
        assert_eq!(spring.position(), 8.0);
        assert_eq!(spring.target(), 8.0);
    }

    #[test]
    fn parameters_are_clamped() {
        let spring = Spring::new(0.0, 1.0)
            .with_stiffness(-5.0)
            .with_damping(-1.0);
        assert_eq!(spring.stiffness(), MIN_STIFFNESS);
        assert_eq!(spring.damping(), 0.0);
    }

    #[test]
    fn deterministic_across_runs() {
        let run = || {
            let mut spring = Spring::new(3.0, 27.0);
            simulate(&mut spring, 17);
            spring.position()
        };
        assert_eq!(run().to_bits(), run().to_bits());
    }
}
