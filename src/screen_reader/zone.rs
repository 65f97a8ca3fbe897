//! Screen geometry: positions, relative rectangles and absolute zones

use serde::{Deserialize, Serialize};

/// A point in absolute screen coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Offset by a delta on both axes
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Euclidean distance to another point
    pub fn distance(self, other: Position) -> f64 {
        let dx = (other.x - self.x) as f64;
        let dy = (other.y - self.y) as f64;
        (dx * dx + dy * dy).sqrt()
    }
}

/// A rectangle in relative coordinates (0.0 to 1.0) of the window view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RelativeRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl RelativeRect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Absolute screen rectangle used for capture and classification.
///
/// The window view itself is a `Zone`; every other zone is derived from it
/// with [`Zone::to_rel`] once per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Zone {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create from window rect (x1, y1, x2, y2)
    pub fn from_rect(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self {
            x: x1,
            y: y1,
            width: (x2 - x1).max(0) as u32,
            height: (y2 - y1).max(0) as u32,
        }
    }

    /// Square zone of `radius` around a point
    pub fn around(center: Position, radius: u32) -> Self {
        let r = radius as i32;
        Self::new(center.x - r, center.y - r, radius * 2 + 1, radius * 2 + 1)
    }

    /// Scale a relative rectangle against this zone
    pub fn to_rel(&self, rel: RelativeRect) -> Zone {
        Zone {
            x: self.x + (self.width as f64 * rel.x).floor() as i32,
            y: self.y + (self.height as f64 * rel.y).floor() as i32,
            width: (self.width as f64 * rel.width).floor() as u32,
            height: (self.height as f64 * rel.height).floor() as u32,
        }
    }

    pub fn right(&self) -> i32 {
        self.x + self.width as i32
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height as i32
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= self.x && pos.x < self.right() && pos.y >= self.y && pos.y < self.bottom()
    }

    /// Overlap of two zones, if any
    pub fn intersect(&self, other: &Zone) -> Option<Zone> {
        let x1 = self.x.max(other.x);
        let y1 = self.y.max(other.y);
        let x2 = self.right().min(other.right());
        let y2 = self.bottom().min(other.bottom());
        (x2 > x1 && y2 > y1).then(|| Zone::from_rect(x1, y1, x2, y2))
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}
