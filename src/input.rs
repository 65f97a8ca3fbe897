//! Input simulation module for mouse and keyboard control

use crate::config::Span;
use crate::error::{BotError, BotResult};
use crate::screen_reader::Position;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
}

/// Device-level keyboard and mouse synthesis.
///
/// Implementations pause for their configured input delay after each
/// event. Only the [`ActionGate`](crate::bot::ActionGate) hands out access.
pub trait InputDevice {
    /// Press and release a key
    fn send_key(&mut self, key: &str) -> BotResult<()>;

    /// Hold (`down`) or release a key
    fn toggle_key(&mut self, key: &str, down: bool) -> BotResult<()>;

    /// Move the cursor straight to a point
    fn move_to(&mut self, pos: Position) -> BotResult<()>;

    /// Move the cursor along a curved path
    fn move_curve_to(&mut self, pos: Position, speed: f64, curvature: f64) -> BotResult<()>;

    fn toggle_button(&mut self, button: MouseButton, down: bool) -> BotResult<()>;

    fn click(&mut self, button: MouseButton) -> BotResult<()>;

    fn cursor_position(&self) -> BotResult<Position>;
}

/// Open the platform input device
#[cfg(windows)]
pub fn open_device(delay: Span<u64>) -> BotResult<Box<dyn InputDevice>> {
    Ok(Box::new(enigo_device::EnigoDevice::new(delay)?))
}

#[cfg(not(windows))]
pub fn open_device(_delay: Span<u64>) -> BotResult<Box<dyn InputDevice>> {
    tracing::warn!("Input simulation not implemented on this platform");
    Err(BotError::Input(
        "input simulation not implemented on this platform".to_string(),
    ))
}

#[cfg(windows)]
mod enigo_device {
    use std::thread;
    use std::time::Duration;

    use enigo::{Button, Coordinate, Direction, Enigo, Key, Keyboard, Mouse, Settings};

    use super::*;
    use crate::bot::motion::curve_path;

    /// Pause between intermediate points of a curved move
    const CURVE_STEP_DELAY: Duration = Duration::from_millis(4);

    pub struct EnigoDevice {
        enigo: Enigo,
        delay: Span<u64>,
    }

    impl EnigoDevice {
        pub fn new(delay: Span<u64>) -> BotResult<Self> {
            let enigo = Enigo::new(&Settings::default())
                .map_err(|e| BotError::Input(format!("Failed to create Enigo: {:?}", e)))?;
            Ok(Self { enigo, delay })
        }

        fn pause(&self) {
            thread::sleep(self.delay.sample_ms());
        }

        fn key(&mut self, key: &str, direction: Direction) -> BotResult<()> {
            let enigo_key = string_to_enigo_key(key)
                .ok_or_else(|| BotError::Input(format!("Unknown key '{}'", key)))?;
            self.enigo
                .key(enigo_key, direction)
                .map_err(|e| BotError::Input(format!("Failed to press key '{}': {:?}", key, e)))
        }

        fn move_abs(&mut self, pos: Position) -> BotResult<()> {
            self.enigo
                .move_mouse(pos.x, pos.y, Coordinate::Abs)
                .map_err(|e| {
                    BotError::Input(format!("Failed to move mouse to ({}, {}): {:?}", pos.x, pos.y, e))
                })
        }

        fn button(&mut self, button: MouseButton, direction: Direction) -> BotResult<()> {
            let button = match button {
                MouseButton::Left => Button::Left,
                MouseButton::Right => Button::Right,
            };
            self.enigo
                .button(button, direction)
                .map_err(|e| BotError::Input(format!("Failed to use mouse button: {:?}", e)))
        }
    }

    impl InputDevice for EnigoDevice {
        fn send_key(&mut self, key: &str) -> BotResult<()> {
            self.key(key, Direction::Click)?;
            self.pause();
            Ok(())
        }

        fn toggle_key(&mut self, key: &str, down: bool) -> BotResult<()> {
            let direction = if down { Direction::Press } else { Direction::Release };
            self.key(key, direction)?;
            self.pause();
            Ok(())
        }

        fn move_to(&mut self, pos: Position) -> BotResult<()> {
            self.move_abs(pos)?;
            self.pause();
            Ok(())
        }

        fn move_curve_to(&mut self, pos: Position, speed: f64, curvature: f64) -> BotResult<()> {
            let from = self.cursor_position()?;
            for point in curve_path(from, pos, speed, curvature) {
                self.move_abs(point)?;
                thread::sleep(CURVE_STEP_DELAY);
            }
            Ok(())
        }

        fn toggle_button(&mut self, button: MouseButton, down: bool) -> BotResult<()> {
            let direction = if down { Direction::Press } else { Direction::Release };
            self.button(button, direction)?;
            self.pause();
            Ok(())
        }

        fn click(&mut self, button: MouseButton) -> BotResult<()> {
            self.button(button, Direction::Click)?;
            self.pause();
            Ok(())
        }

        fn cursor_position(&self) -> BotResult<Position> {
            let (x, y) = self
                .enigo
                .location()
                .map_err(|e| BotError::Input(format!("Failed to read cursor position: {:?}", e)))?;
            Ok(Position::new(x, y))
        }
    }

    /// Convert string key name to enigo Key
    fn string_to_enigo_key(key: &str) -> Option<Key> {
        // Lowercase single characters avoid keyboard layout mapping issues
        if key.chars().count() == 1 {
            let c = key.chars().next()?.to_ascii_lowercase();
            return Some(Key::Unicode(c));
        }

        let key = match key.to_uppercase().as_str() {
            "F1" => Key::F1,
            "F2" => Key::F2,
            "F3" => Key::F3,
            "F4" => Key::F4,
            "F5" => Key::F5,
            "F6" => Key::F6,
            "F7" => Key::F7,
            "F8" => Key::F8,
            "F9" => Key::F9,
            "F10" => Key::F10,
            "F11" => Key::F11,
            "F12" => Key::F12,
            "ESC" | "ESCAPE" => Key::Escape,
            "ENTER" | "RETURN" => Key::Return,
            "SPACE" => Key::Space,
            "TAB" => Key::Tab,
            "BACKSPACE" => Key::Backspace,
            "UP" => Key::UpArrow,
            "DOWN" => Key::DownArrow,
            "LEFT" => Key::LeftArrow,
            "RIGHT" => Key::RightArrow,
            "HOME" => Key::Home,
            "END" => Key::End,
            "PAGEUP" => Key::PageUp,
            "PAGEDOWN" => Key::PageDown,
            "DELETE" => Key::Delete,
            "SHIFT" => Key::Shift,
            "CTRL" | "CONTROL" => Key::Control,
            "ALT" => Key::Alt,
            _ => return None,
        };
        Some(key)
    }

}
