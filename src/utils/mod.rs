//! Shared utilities

pub mod keybinds;
pub mod path;
pub mod timer;

pub use timer::{from_minutes, Timer};
