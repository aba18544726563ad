//! Tween model for animated speed changes.
//!
//! An animated adjustment runs two interpolations off one shared clock:
//! the needle value and the gauge color. Both use the same duration and
//! the same ease-in/ease-out curve, so the whole thing is modeled as a
//! single [`GaugeAnimation`] sampled by normalized progress. The caller
//! owns the clock; this module is pure math.

use std::time::Duration;

use crate::color::Color;
use crate::zone::SpeedZone;

/// Quadratic ease-in/ease-out: slow start, fast middle, slow finish.
pub fn ease_in_out(t: f64) -> f64 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

/// Tween duration for an animated change, keyed by the *target* zone.
///
/// Low and high targets get the long, laboring durations; medium targets
/// get the short burst (acceleration through the middle of the band).
pub fn tween_duration(target_zone: SpeedZone) -> Duration {
    match target_zone {
        SpeedZone::Low => Duration::from_millis(1800),
        SpeedZone::Medium => Duration::from_millis(700),
        SpeedZone::High => Duration::from_millis(2200),
    }
}

/// One combined needle + color animation.
///
/// Built when an animated adjustment is accepted; immutable afterwards.
/// Sampling at `t >= 1` lands exactly on the target values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaugeAnimation {
    start_speed: f64,
    target_speed: f64,
    start_color: Color,
    target_color: Color,
    target_zone: SpeedZone,
    duration: Duration,
}

impl GaugeAnimation {
    pub fn new(
        start_speed: f64,
        target_speed: f64,
        start_color: Color,
        target_zone: SpeedZone,
    ) -> Self {
        Self {
            start_speed,
            target_speed,
            start_color,
            target_color: target_zone.color(),
            target_zone,
            duration: tween_duration(target_zone),
        }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn target_speed(&self) -> f64 {
        self.target_speed
    }

    pub fn target_zone(&self) -> SpeedZone {
        self.target_zone
    }

    pub fn target_color(&self) -> Color {
        self.target_color
    }

    /// Sample both tweens at normalized progress `t` (clamped to `[0, 1]`,
    /// easing applied inside). Returns `(speed, color)` for that frame.
    pub fn sample(&self, t: f64) -> (f64, Color) {
        let t = t.clamp(0.0, 1.0);
        if t >= 1.0 {
            return (self.target_speed, self.target_color);
        }
        let eased = ease_in_out(t);
        let speed = self.start_speed + (self.target_speed - self.start_speed) * eased;
        let color = self.start_color.lerp(&self.target_color, eased);
        (speed, color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ease_endpoints_and_midpoint() {
        assert_eq!(ease_in_out(0.0), 0.0);
        assert_eq!(ease_in_out(1.0), 1.0);
        assert!((ease_in_out(0.5) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_ease_is_monotonic() {
        let mut prev = 0.0;
        for i in 1..=100 {
            let v = ease_in_out(i as f64 / 100.0);
            assert!(v >= prev, "easing not monotonic at step {}", i);
            prev = v;
        }
    }

    #[test]
    fn test_durations_by_target_zone() {
        assert_eq!(tween_duration(SpeedZone::Low), Duration::from_millis(1800));
        assert_eq!(tween_duration(SpeedZone::Medium), Duration::from_millis(700));
        assert_eq!(tween_duration(SpeedZone::High), Duration::from_millis(2200));
    }

    #[test]
    fn test_sample_endpoints() {
        let anim = GaugeAnimation::new(0.0, 45.0, SpeedZone::Low.color(), SpeedZone::Low);

        let (speed, color) = anim.sample(0.0);
        assert_eq!(speed, 0.0);
        assert_eq!(color, SpeedZone::Low.color());

        let (speed, color) = anim.sample(1.0);
        assert_eq!(speed, 45.0);
        assert_eq!(color, SpeedZone::Low.color());

        // Values past the end stay pinned to the target.
        let (speed, _) = anim.sample(3.0);
        assert_eq!(speed, 45.0);
    }

    #[test]
    fn test_sample_tweens_color_toward_target_zone() {
        let anim = GaugeAnimation::new(100.0, 145.0, SpeedZone::Medium.color(), SpeedZone::High);
        assert_eq!(anim.duration(), Duration::from_millis(2200));

        let (_, mid_color) = anim.sample(0.5);
        // Halfway between yellow and red: green channel half gone.
        assert!((mid_color.r - 1.0).abs() < 1e-9);
        assert!((mid_color.g - 0.5).abs() < 1e-9);

        let (speed, color) = anim.sample(1.0);
        assert_eq!(speed, 145.0);
        assert_eq!(color, SpeedZone::High.color());
    }
}
