//! Error types for the fishing bot

use thiserror::Error;

use crate::screen_reader::Position;

/// Every failure a fishing cycle can surface to the run loop.
///
/// The first four variants are the fatal cycle conditions; the rest wrap
/// collaborator failures (capture, recognition, window, input) and are
/// propagated unchanged. Nothing here is retried inside the bot.
#[derive(Debug, Error)]
pub enum BotError {
    #[error("The game window is minimized or in fullscreen mode")]
    WindowMode,

    #[error("Found bobber colors at ({}, {}) before casting. Change the fishing place.", .pos.x, .pos.y)]
    BobberBeforeCast { pos: Position },

    #[error("Game error notification occurred on casting fishing")]
    CastNotification,

    #[error("Something is wrong. The bot stuck to the bobber for more than {} ms", .max.as_millis())]
    StuckOnBobber { max: std::time::Duration },

    #[error("Input gate is already held by another action")]
    GateBusy,

    #[error("Input error: {0}")]
    Input(String),

    #[error("Screen capture error: {0}")]
    Capture(String),

    #[error("Window error: {0}")]
    Window(String),

    #[error("Text recognition error: {0}")]
    Recognition(String),
}

pub type BotResult<T> = Result<T, BotError>;
