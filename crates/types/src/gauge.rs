//! The gauge state machine: bounds, zone classification, mutations, and
//! the save/restore snapshot.
//!
//! This type owns every value the dial renders (speed, color, labels) but
//! knows nothing about drawing or clocks. Immediate mutations apply here
//! directly; animated mutations are *planned* here (range check, zone
//! reclassification, tween construction) and driven to completion by the
//! widget layer, which feeds interpolated frames back in through
//! [`Gauge::apply_frame`].

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::animation::GaugeAnimation;
use crate::color::Color;
use crate::zone::SpeedZone;

/// Construction-time configuration for a gauge.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GaugeConfig {
    /// Initial needle position.
    #[serde(default = "default_speed")]
    pub speed: f64,
    /// Upper bound of the dial, fixed after construction.
    #[serde(default = "default_max_speed")]
    pub max_speed: f64,
}

fn default_speed() -> f64 {
    0.0
}

fn default_max_speed() -> f64 {
    150.0
}

impl Default for GaugeConfig {
    fn default() -> Self {
        Self {
            speed: default_speed(),
            max_speed: default_max_speed(),
        }
    }
}

/// Construction failure: the configured speed cannot sit on the dial.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GaugeError {
    #[error("speed {speed} must be in range of [0; {max_speed}]")]
    OutOfBoundsConfiguration { speed: f64, max_speed: f64 },
}

/// Snapshot record for host save/restore.
///
/// `speed_level` is the zone's uppercase name and `speed_color` the packed
/// ARGB integer, so snapshots stay readable and toolkit-agnostic.
/// `super_state` is an opaque blob owned by whatever hosts the widget; the
/// gauge only carries it through.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GaugeSnapshot {
    pub speed: f64,
    pub speed_level: String,
    pub speed_color: u32,
    pub super_state: Value,
}

/// A speedometer gauge's full drawable state.
#[derive(Debug, Clone, PartialEq)]
pub struct Gauge {
    speed: f64,
    max_speed: f64,
    low_limit: f64,
    medium_limit: f64,
    high_limit: f64,
    zone: SpeedZone,
    color: Color,
    tick_labels: [String; 6],
}

impl Gauge {
    /// Build a gauge from configuration.
    ///
    /// Fails when `max_speed` is not positive or the initial speed falls
    /// outside `[0, max_speed]`; a gauge never exists in an invalid state.
    pub fn new(config: &GaugeConfig) -> Result<Self, GaugeError> {
        let GaugeConfig { speed, max_speed } = *config;

        if !(max_speed > 0.0) || !(0.0..=max_speed).contains(&speed) {
            return Err(GaugeError::OutOfBoundsConfiguration { speed, max_speed });
        }

        // The first and last bands take speed on slowly, the middle band
        // quickly; the split is fixed at 40% / 80% of the dial.
        let low_limit = max_speed * 0.4;
        let medium_limit = max_speed * 0.8;
        let high_limit = max_speed;

        let step = max_speed / 6.0;
        let tick_labels = std::array::from_fn(|i| format!("{:.2}", (i as f64 + 1.0) * step));

        let mut gauge = Self {
            speed,
            max_speed,
            low_limit,
            medium_limit,
            high_limit,
            zone: SpeedZone::Low,
            color: Color::default(),
            tick_labels,
        };
        gauge.zone = gauge.classify(speed);
        gauge.color = gauge.zone.color();
        Ok(gauge)
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn max_speed(&self) -> f64 {
        self.max_speed
    }

    pub fn zone(&self) -> SpeedZone {
        self.zone
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn tick_labels(&self) -> &[String; 6] {
        &self.tick_labels
    }

    pub fn low_limit(&self) -> f64 {
        self.low_limit
    }

    pub fn medium_limit(&self) -> f64 {
        self.medium_limit
    }

    /// Classify a speed value into its zone.
    ///
    /// The bands are closed and overlap at their edges; the first match
    /// wins, so a value exactly on a boundary belongs to the earlier band.
    pub fn classify(&self, value: f64) -> SpeedZone {
        if (0.0..=self.low_limit).contains(&value) {
            SpeedZone::Low
        } else if (self.low_limit..=self.medium_limit).contains(&value) {
            SpeedZone::Medium
        } else if (self.medium_limit..=self.high_limit).contains(&value) {
            SpeedZone::High
        } else {
            SpeedZone::Low
        }
    }

    /// Move the needle immediately. Out-of-range values are ignored.
    ///
    /// Zone and color are left as they are: only the animated path
    /// reclassifies them.
    pub fn set_speed(&mut self, value: f64) {
        if (0.0..=self.max_speed).contains(&value) {
            self.speed = value;
        } else {
            log::debug!(
                "ignoring set_speed({value}): outside [0; {}]",
                self.max_speed
            );
        }
    }

    /// Move the needle immediately by a delta. Same policy as
    /// [`Gauge::set_speed`].
    pub fn adjust_by_delta(&mut self, delta: f64) {
        self.set_speed(self.speed + delta);
    }

    /// Plan an animated adjustment by `delta`.
    ///
    /// Returns `None` (and changes nothing) when the target would leave
    /// the dial. Otherwise reclassifies the zone from the *target* value
    /// and returns the combined needle/color tween for the widget layer to
    /// run. Speed and color stay at their current values until frames
    /// arrive through [`Gauge::apply_frame`].
    pub fn animate_by_delta(&mut self, delta: f64) -> Option<GaugeAnimation> {
        let target = self.speed + delta;
        if !(0.0..=self.max_speed).contains(&target) {
            log::debug!(
                "ignoring animated adjust to {target}: outside [0; {}]",
                self.max_speed
            );
            return None;
        }

        self.zone = self.classify(target);
        Some(GaugeAnimation::new(
            self.speed,
            target,
            self.color,
            self.zone,
        ))
    }

    /// Write one interpolated animation frame back into the gauge.
    pub fn apply_frame(&mut self, speed: f64, color: Color) {
        self.speed = speed;
        self.color = color;
    }

    /// Emit the snapshot record, folding in the host's opaque state.
    pub fn save_state(&self, super_state: Value) -> GaugeSnapshot {
        GaugeSnapshot {
            speed: self.speed,
            speed_level: self.zone.to_string(),
            speed_color: self.color.to_argb(),
            super_state,
        }
    }

    /// Restore from a previously saved snapshot.
    ///
    /// When `state` parses as a snapshot, the three gauge fields are set
    /// verbatim and the embedded host state is handed back for the host's
    /// own restore path. Anything else passes through untouched.
    pub fn restore_state(&mut self, state: Value) -> Value {
        let snapshot: GaugeSnapshot = match serde_json::from_value(state.clone()) {
            Ok(snapshot) => snapshot,
            Err(_) => return state,
        };
        let zone = match snapshot.speed_level.parse::<SpeedZone>() {
            Ok(zone) => zone,
            Err(e) => {
                log::warn!("discarding snapshot: {e}");
                return state;
            }
        };

        self.speed = snapshot.speed;
        self.zone = zone;
        self.color = Color::from_argb(snapshot.speed_color);
        snapshot.super_state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;

    fn gauge() -> Gauge {
        Gauge::new(&GaugeConfig::default()).unwrap()
    }

    #[test]
    fn test_default_construction() {
        let g = gauge();
        assert_eq!(g.speed(), 0.0);
        assert_eq!(g.max_speed(), 150.0);
        assert_eq!(g.zone(), SpeedZone::Low);
        assert_eq!(g.color(), SpeedZone::Low.color());
    }

    #[test]
    fn test_thresholds() {
        let g = gauge();
        assert_eq!(g.low_limit(), 60.0);
        assert_eq!(g.medium_limit(), 120.0);

        let g = Gauge::new(&GaugeConfig {
            speed: 0.0,
            max_speed: 90.0,
        })
        .unwrap();
        assert_eq!(g.low_limit(), 36.0);
        assert_eq!(g.medium_limit(), 72.0);
    }

    #[test]
    fn test_construction_rejects_out_of_bounds_speed() {
        let err = Gauge::new(&GaugeConfig {
            speed: 200.0,
            max_speed: 150.0,
        })
        .unwrap_err();
        assert!(matches!(err, GaugeError::OutOfBoundsConfiguration { .. }));

        assert!(Gauge::new(&GaugeConfig {
            speed: -0.5,
            max_speed: 150.0,
        })
        .is_err());

        assert!(Gauge::new(&GaugeConfig {
            speed: 0.0,
            max_speed: -1.0,
        })
        .is_err());
    }

    #[test]
    fn test_tick_labels_for_default_dial() {
        let g = gauge();
        assert_eq!(
            g.tick_labels(),
            &["25.00", "50.00", "75.00", "100.00", "125.00", "150.00"]
        );
    }

    #[test]
    fn test_classify_is_priority_ordered() {
        let g = gauge();
        assert_eq!(g.classify(0.0), SpeedZone::Low);
        assert_eq!(g.classify(59.9), SpeedZone::Low);
        // Boundary values belong to the earlier band.
        assert_eq!(g.classify(60.0), SpeedZone::Low);
        assert_eq!(g.classify(60.1), SpeedZone::Medium);
        assert_eq!(g.classify(120.0), SpeedZone::Medium);
        assert_eq!(g.classify(120.1), SpeedZone::High);
        assert_eq!(g.classify(150.0), SpeedZone::High);
        // Out-of-band input falls back to the first band.
        assert_eq!(g.classify(-1.0), SpeedZone::Low);
        assert_eq!(g.classify(151.0), SpeedZone::Low);
    }

    #[test]
    fn test_zone_color_round_trip() {
        let g = gauge();
        assert_eq!(g.classify(45.0).color().to_argb(), 0xFF00FF00);
        assert_eq!(g.classify(60.0).color().to_argb(), 0xFF00FF00);
        assert_eq!(g.classify(100.0).color().to_argb(), 0xFFFFFF00);
        assert_eq!(g.classify(145.0).color().to_argb(), 0xFFFF0000);
        assert_eq!(g.classify(150.0).color().to_argb(), 0xFFFF0000);
    }

    #[test]
    fn test_set_speed_in_range() {
        let mut g = gauge();
        g.set_speed(130.0);
        assert_eq!(g.speed(), 130.0);
        // The immediate path never reclassifies.
        assert_eq!(g.zone(), SpeedZone::Low);
        assert_eq!(g.color(), SpeedZone::Low.color());
    }

    #[test]
    fn test_set_speed_out_of_range_is_a_no_op() {
        let mut g = gauge();
        g.set_speed(42.0);
        g.set_speed(151.0);
        assert_eq!(g.speed(), 42.0);
        g.set_speed(-0.1);
        assert_eq!(g.speed(), 42.0);
    }

    #[test]
    fn test_adjust_by_delta() {
        let mut g = gauge();
        g.adjust_by_delta(45.0);
        assert_eq!(g.speed(), 45.0);
        g.adjust_by_delta(-50.0);
        // Would land below zero: ignored.
        assert_eq!(g.speed(), 45.0);
    }

    #[test]
    fn test_animate_by_delta_out_of_range() {
        let mut g = gauge();
        let before = g.clone();
        assert!(g.animate_by_delta(151.0).is_none());
        assert!(g.animate_by_delta(-1.0).is_none());
        assert_eq!(g, before);
    }

    #[test]
    fn test_animate_by_delta_within_low_zone() {
        let mut g = gauge();
        let anim = g.animate_by_delta(45.0).unwrap();

        assert_eq!(g.zone(), SpeedZone::Low);
        assert_eq!(anim.target_speed(), 45.0);
        assert_eq!(anim.target_zone(), SpeedZone::Low);
        assert_eq!(anim.duration(), Duration::from_millis(1800));
        assert_eq!(anim.target_color(), SpeedZone::Low.color());
        // Planning alone moves nothing.
        assert_eq!(g.speed(), 0.0);
        assert_eq!(g.color(), SpeedZone::Low.color());
    }

    #[test]
    fn test_animate_by_delta_into_high_zone() {
        let mut g = Gauge::new(&GaugeConfig {
            speed: 100.0,
            max_speed: 150.0,
        })
        .unwrap();
        let anim = g.animate_by_delta(45.0).unwrap();

        assert_eq!(g.zone(), SpeedZone::High);
        assert_eq!(anim.target_speed(), 145.0);
        assert_eq!(anim.duration(), Duration::from_millis(2200));
        assert_eq!(anim.target_color(), SpeedZone::High.color());

        // Drive the tween to its end and land exactly on target.
        let (speed, color) = anim.sample(1.0);
        g.apply_frame(speed, color);
        assert_eq!(g.speed(), 145.0);
        assert_eq!(g.color(), SpeedZone::High.color());
    }

    #[test]
    fn test_snapshot_field_names() {
        let g = gauge();
        let snapshot = g.save_state(json!({"width": 800}));
        let value = serde_json::to_value(&snapshot).unwrap();

        assert_eq!(value["speed"], json!(0.0));
        assert_eq!(value["speed_level"], json!("LOW"));
        assert_eq!(value["speed_color"], json!(0xFF00FF00u32));
        assert_eq!(value["super_state"], json!({"width": 800}));
    }

    #[test]
    fn test_restore_round_trip() {
        let mut g = Gauge::new(&GaugeConfig {
            speed: 100.0,
            max_speed: 150.0,
        })
        .unwrap();
        g.animate_by_delta(45.0).unwrap();
        g.apply_frame(145.0, SpeedZone::High.color());

        let saved = serde_json::to_value(g.save_state(json!("host-blob"))).unwrap();

        let mut restored = gauge();
        let super_state = restored.restore_state(saved);
        assert_eq!(super_state, json!("host-blob"));
        assert_eq!(restored.speed(), 145.0);
        assert_eq!(restored.zone(), SpeedZone::High);
        assert_eq!(restored.color(), SpeedZone::High.color());
    }

    #[test]
    fn test_restore_passes_unknown_state_through() {
        let mut g = gauge();
        let before = g.clone();

        let raw = json!({"unrelated": true});
        let out = g.restore_state(raw.clone());
        assert_eq!(out, raw);
        assert_eq!(g, before);

        // A snapshot with a garbled zone name is also passed through.
        let bad = json!({
            "speed": 10.0,
            "speed_level": "LUDICROUS",
            "speed_color": 0,
            "super_state": null,
        });
        let out = g.restore_state(bad.clone());
        assert_eq!(out, bad);
        assert_eq!(g, before);
    }
}
