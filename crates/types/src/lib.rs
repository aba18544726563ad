//! speedo-types: pure gauge model for the Speedo speedometer widget.
//!
//! This crate contains the toolkit-agnostic half of the widget: the gauge
//! state machine, zone classification, tween math, dial geometry, and the
//! save/restore snapshot. It has no GTK dependency (the optional `gtk`
//! feature only adds Cairo convenience methods on `Color`), so the whole
//! model is unit-testable without a display.

pub mod animation;
pub mod color;
pub mod gauge;
pub mod geometry;
pub mod zone;

// Re-export commonly used types at the crate root for convenience
pub use animation::{ease_in_out, tween_duration, GaugeAnimation};
pub use color::Color;
pub use gauge::{Gauge, GaugeConfig, GaugeError, GaugeSnapshot};
pub use geometry::{
    label_anchors, needle_angle, polar_point, resolve_dimension, resolve_square, sweep_angle,
    LabelAnchor, SizeSpec, TextAlign, DEFAULT_SIZE, FACE_START_DEG, FACE_SWEEP_DEG,
};
pub use zone::{ParseZoneError, SpeedZone};
