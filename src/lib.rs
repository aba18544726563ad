//! Speedo: a custom-drawn speedometer gauge widget for GTK4
//!
//! This library provides:
//! - The [`GaugeWidget`] adapter that hosts the gauge in a GTK window
//! - The cairo dial rendering routine
//! - Frame-clock animation ticking infrastructure
//! - Application configuration and saved-state management
//!
//! The toolkit-agnostic gauge model itself lives in the `speedo-types`
//! workspace crate and is re-exported here.

pub mod config;
pub mod core;
pub mod ui;

// Re-export commonly used types
pub use config::AppConfig;
pub use speedo_types::{Gauge, GaugeConfig, GaugeError, GaugeSnapshot, SpeedZone};
pub use ui::GaugeWidget;
