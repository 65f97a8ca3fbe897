//! Bobber search with a remembered hint

use crate::error::BotResult;
use crate::screen_reader::{FishingZone, Position};

/// Remembers where the bobber was last found so the next search starts
/// there.
#[derive(Debug, Clone, Default)]
pub struct BobberTracker {
    pub last_hint: Option<Position>,
    pub max_attempts: u32,
}

impl BobberTracker {
    pub fn new(max_attempts: u32) -> Self {
        Self {
            last_hint: None,
            max_attempts,
        }
    }

    /// Search the zone, starting near the last hit. A miss clears the hint.
    pub fn find(&mut self, zone: &dyn FishingZone) -> BotResult<Option<Position>> {
        let found = zone.find_bobber(self.last_hint, self.max_attempts)?;
        self.last_hint = found;
        Ok(found)
    }
}
