//! Configuration management

mod settings;

pub use settings::{load_snapshot, save_snapshot, AppConfig, WindowConfig};
