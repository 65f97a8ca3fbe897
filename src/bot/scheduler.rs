//! Optional periodic behaviors (lures, random breaks)

use crate::utils::Timer;

/// An optional behavior with its own due-timer.
///
/// The run loop asks [`Scheduled::is_due`] between casts and restarts the
/// timer after the behavior ran.
#[derive(Debug)]
pub struct Scheduled {
    pub enabled: bool,
    pub timer: Timer,
}

impl Scheduled {
    pub fn new(enabled: bool, timer: Timer) -> Self {
        Self { enabled, timer }
    }

    /// Enabled and its interval has passed. A behavior whose timer was
    /// never started is due right away.
    pub fn is_due(&self) -> bool {
        self.enabled && self.timer.is_elapsed()
    }

    pub fn start(&mut self) {
        self.timer.start();
    }
}
