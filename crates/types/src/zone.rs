//! Speed zone classification values.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::color::Color;

/// The three speed bands of the gauge face.
///
/// Snapshots carry the zone by its uppercase name, so the serde form and
/// the `Display`/`FromStr` round-trip both use "LOW"/"MEDIUM"/"HIGH".
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
#[derive(Default)]
pub enum SpeedZone {
    #[default]
    Low,
    Medium,
    High,
}

impl SpeedZone {
    /// Gauge color for this zone: green, yellow, red.
    pub fn color(&self) -> Color {
        match self {
            SpeedZone::Low => Color::from_argb(0xFF00FF00),
            SpeedZone::Medium => Color::from_argb(0xFFFFFF00),
            SpeedZone::High => Color::from_argb(0xFFFF0000),
        }
    }
}

impl fmt::Display for SpeedZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SpeedZone::Low => "LOW",
            SpeedZone::Medium => "MEDIUM",
            SpeedZone::High => "HIGH",
        };
        f.write_str(name)
    }
}

/// Error for an unrecognized zone name in a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown speed zone name: {0}")]
pub struct ParseZoneError(pub String);

impl FromStr for SpeedZone {
    type Err = ParseZoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "LOW" => Ok(SpeedZone::Low),
            "MEDIUM" => Ok(SpeedZone::Medium),
            "HIGH" => Ok(SpeedZone::High),
            other => Err(ParseZoneError(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zone_colors() {
        assert_eq!(SpeedZone::Low.color().to_argb(), 0xFF00FF00);
        assert_eq!(SpeedZone::Medium.color().to_argb(), 0xFFFFFF00);
        assert_eq!(SpeedZone::High.color().to_argb(), 0xFFFF0000);
    }

    #[test]
    fn test_zone_string_round_trip() {
        for zone in [SpeedZone::Low, SpeedZone::Medium, SpeedZone::High] {
            let name = zone.to_string();
            assert_eq!(name.parse::<SpeedZone>().unwrap(), zone);
        }
        assert!("FAST".parse::<SpeedZone>().is_err());
    }

    #[test]
    fn test_zone_serde_names() {
        let json = serde_json::to_string(&SpeedZone::Medium).unwrap();
        assert_eq!(json, "\"MEDIUM\"");

        let zone: SpeedZone = serde_json::from_str("\"HIGH\"").unwrap();
        assert_eq!(zone, SpeedZone::High);
    }
}
