//! Exclusive, scoped access to the game window for synthesized input

use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::{BotError, BotResult};
use crate::input::InputDevice;
use crate::screen_reader::Position;
use crate::window::GameWindow;

/// Every key press, click and cursor move goes through here.
///
/// [`ActionGate::perform`] brings the window to the foreground, runs one
/// action with the input device and hands the window back afterwards, also
/// when the action fails or panics. Only one action may hold the gate; a
/// second caller gets [`BotError::GateBusy`] instead of queueing.
pub struct ActionGate {
    window: Arc<dyn GameWindow>,
    device: Mutex<Box<dyn InputDevice>>,
}

/// Releases the window when dropped
struct Claim<'a> {
    window: &'a dyn GameWindow,
}

impl Drop for Claim<'_> {
    fn drop(&mut self) {
        self.window.release();
    }
}

impl ActionGate {
    pub fn new(window: Arc<dyn GameWindow>, device: Box<dyn InputDevice>) -> Self {
        Self {
            window,
            device: Mutex::new(device),
        }
    }

    pub fn window(&self) -> &dyn GameWindow {
        self.window.as_ref()
    }

    pub fn perform<T>(
        &self,
        action: impl FnOnce(&mut dyn InputDevice) -> BotResult<T>,
    ) -> BotResult<T> {
        let mut device = self.device.try_lock().ok_or(BotError::GateBusy)?;
        let _claim = Claim {
            window: self.window.as_ref(),
        };

        self.window.activate()?;
        action(&mut **device)
    }

    /// Current cursor position, read without claiming the window
    pub fn cursor_position(&self) -> BotResult<Position> {
        let device = self.device.try_lock().ok_or(BotError::GateBusy)?;
        device.cursor_position()
    }
}
