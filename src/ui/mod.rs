//! GTK widgets and rendering for the Speedo gauge

pub mod dial_display;
mod gauge_widget;

pub use dial_display::render_dial;
pub use gauge_widget::GaugeWidget;
