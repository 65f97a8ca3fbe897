//! Configuration (fixed per run) and user settings

pub mod base;
pub mod settings;

pub use base::{Config, LootWindow, LootWindowTemplate, Span};
pub use settings::{GameVariant, Settings};
