//! AutoFish - fishing bot that works from the screen alone
//!
//! The bot reads pixels and on-screen text from the game window and answers
//! with synthesized keyboard and mouse input. It never touches game memory.
//!
//! [`bot::FishingBot`] runs the cast cycle against the traits in
//! [`screen_reader`], [`input`] and [`window`]; the binary wires them to
//! real screen capture, Tesseract and the Windows API.

pub mod bot;
pub mod config;
pub mod error;
pub mod input;
pub mod log_main;
pub mod screen_reader;
pub mod utils;
pub mod window;

// Re-exports for convenience
pub use bot::{BotContext, Collaborators, FishingBot, RuntimeState, Status};
pub use config::{Config, GameVariant, Settings};
pub use error::{BotError, BotResult};
pub use utils::path::get_data_dir;
