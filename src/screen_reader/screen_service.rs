//! Screen capture service

use std::thread;
use std::time::Duration;

use image::RgbaImage;

use super::zone::Zone;
use crate::error::{BotError, BotResult};

/// Raw capture of an absolute screen rectangle.
///
/// Every visual zone reads through one shared implementation of this trait.
pub trait Capture {
    fn capture_region(&self, zone: Zone) -> BotResult<RgbaImage>;
}

const CAPTURE_RETRIES: u32 = 3;

/// Pause between failed captures. Captures run inline on the bot task and
/// this wait blocks it, so it stays a few milliseconds.
const RETRY_BACKOFF: Duration = Duration::from_millis(10);

/// Service for capturing screenshots
pub struct ScreenService {
    retries: u32,
    retry_delay: Duration,
}

impl ScreenService {
    /// Create a new screen service
    pub fn new() -> Self {
        Self {
            retries: CAPTURE_RETRIES,
            retry_delay: RETRY_BACKOFF,
        }
    }

    /// Take a screenshot safely with retries
    fn safe_screenshot(&self, zone: Zone) -> BotResult<RgbaImage> {
        let mut last_error = BotError::Capture("no capture attempted".to_string());
        for i in 0..self.retries {
            match capture(zone) {
                Ok(img) => return Ok(img),
                Err(e) => {
                    tracing::warn!(
                        "Screenshot failed: {}. Retrying ({}/{})",
                        e,
                        i + 1,
                        self.retries
                    );
                    last_error = e;
                    if i + 1 < self.retries {
                        thread::sleep(self.retry_delay);
                    }
                }
            }
        }
        Err(last_error)
    }
}

impl Default for ScreenService {
    fn default() -> Self {
        Self::new()
    }
}

impl Capture for ScreenService {
    fn capture_region(&self, zone: Zone) -> BotResult<RgbaImage> {
        if zone.is_empty() {
            return Err(BotError::Capture(format!("empty capture zone {:?}", zone)));
        }
        self.safe_screenshot(zone)
    }
}

#[cfg(windows)]
fn capture(zone: Zone) -> BotResult<RgbaImage> {
    use screenshots::Screen;

    let screen = Screen::from_point(zone.x, zone.y)
        .map_err(|e| BotError::Capture(format!("Failed to get screen: {}", e)))?;

    // capture_area takes coordinates relative to the display
    let image = screen
        .capture_area(
            zone.x - screen.display_info.x,
            zone.y - screen.display_info.y,
            zone.width,
            zone.height,
        )
        .map_err(|e| BotError::Capture(format!("Failed to capture area: {}", e)))?;

    RgbaImage::from_raw(image.width(), image.height(), image.to_vec())
        .ok_or_else(|| BotError::Capture("Failed to create image from raw data".to_string()))
}

#[cfg(not(windows))]
fn capture(_zone: Zone) -> BotResult<RgbaImage> {
    tracing::warn!("Screen capture not implemented on this platform");
    Err(BotError::Capture(
        "screen capture not implemented on this platform".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_zone_is_rejected() {
        let service = ScreenService::new();
        let result = service.capture_region(Zone::new(10, 10, 0, 20));
        assert!(matches!(result, Err(BotError::Capture(_))));
    }

    #[test]
    fn test_retries_block_briefly() {
        let service = ScreenService::new();
        let started = std::time::Instant::now();
        let _ = service.capture_region(Zone::new(0, 0, 4, 4));
        // Two backoffs between three attempts
        assert!(started.elapsed() < Duration::from_millis(500));
        assert!(RETRY_BACKOFF * (CAPTURE_RETRIES - 1) <= Duration::from_millis(20));
    }
}
