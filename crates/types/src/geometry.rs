//! Dial face geometry: angles, the needle vector, label anchors, and the
//! size negotiation that keeps the widget square.
//!
//! Everything here is pure math over the gauge's fixed 270-degree face,
//! which opens at 135 degrees (lower left) and sweeps clockwise to 45
//! degrees (lower right).

use serde::{Deserialize, Serialize};

/// Angle (degrees) at which the gauge face starts.
pub const FACE_START_DEG: f64 = 135.0;

/// Total angular extent of the gauge face, in degrees.
pub const FACE_SWEEP_DEG: f64 = 270.0;

/// Side length used when the host expresses no size preference.
pub const DEFAULT_SIZE: i32 = 640;

/// Arc sweep (degrees) for a speed value on a face of `max_speed`.
pub fn sweep_angle(speed: f64, max_speed: f64) -> f64 {
    speed * (FACE_SWEEP_DEG / max_speed)
}

/// Needle angle (degrees) for a speed value: face start plus its sweep.
pub fn needle_angle(speed: f64, max_speed: f64) -> f64 {
    FACE_START_DEG + sweep_angle(speed, max_speed)
}

/// Point at `radius` from `(cx, cy)` along `angle_deg`, clockwise from
/// the positive x axis (y grows downward, matching the drawing surface).
pub fn polar_point(cx: f64, cy: f64, radius: f64, angle_deg: f64) -> (f64, f64) {
    let rad = angle_deg.to_radians();
    (cx + radius * rad.cos(), cy + radius * rad.sin())
}

/// One dimension of the host's measurement request.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SizeSpec {
    /// The host demands exactly this many pixels.
    Exactly(i32),
    /// The host offers at most this many pixels.
    AtMost(i32),
    /// The host expresses no preference.
    Unspecified,
}

/// Resolve one dimension against the widget's preferred size.
pub fn resolve_dimension(preferred: i32, spec: SizeSpec) -> i32 {
    match spec {
        SizeSpec::Exactly(size) => size,
        SizeSpec::AtMost(size) => preferred.min(size),
        SizeSpec::Unspecified => preferred,
    }
}

/// Resolve the square face side from both dimensions' requests.
pub fn resolve_square(width: SizeSpec, height: SizeSpec) -> i32 {
    resolve_dimension(DEFAULT_SIZE, width).min(resolve_dimension(DEFAULT_SIZE, height))
}

/// Horizontal text alignment relative to an anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

/// Anchor for one dial label: baseline position plus alignment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelAnchor {
    pub x: f64,
    pub y: f64,
    pub align: TextAlign,
}

/// Anchor table for the dial's seven labels on a square face of `size`.
///
/// Index 0 anchors the literal "0" near the face opening; indices 1..=6
/// anchor the six tick labels counterclockwise around the ring. The
/// margin equals the label font size, so labels hug the ring without
/// crossing into the arc.
pub fn label_anchors(size: f64, text_size: f64) -> [LabelAnchor; 7] {
    let pw = size / 8.0;
    let ph = size / 8.0;
    let m = text_size;

    [
        LabelAnchor {
            x: pw * 2.0 - m,
            y: size - ph * 2.0 + m,
            align: TextAlign::Right,
        },
        LabelAnchor {
            x: pw,
            y: ph * 4.0,
            align: TextAlign::Right,
        },
        LabelAnchor {
            x: pw * 2.0 - m,
            y: ph * 2.0 - m / 2.0,
            align: TextAlign::Right,
        },
        LabelAnchor {
            x: pw * 4.0,
            y: ph - m,
            align: TextAlign::Center,
        },
        LabelAnchor {
            x: size - pw * 2.0 + m / 2.0,
            y: ph * 2.0 - m / 2.0,
            align: TextAlign::Left,
        },
        LabelAnchor {
            x: size - pw,
            y: ph * 4.0,
            align: TextAlign::Left,
        },
        LabelAnchor {
            x: size - pw * 2.0 + m / 2.0,
            y: size - ph * 2.0 + m,
            align: TextAlign::Left,
        },
    ]
}
