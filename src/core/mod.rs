//! Core infrastructure for the Speedo app

mod animation_manager;

pub use animation_manager::register_animation;
