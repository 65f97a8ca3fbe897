//! Run configuration: timings, thresholds and loot window geometry

use std::collections::BTreeMap;
use std::ops::Bound::{Excluded, Unbounded};
use std::fs;
use std::path::Path;
use std::time::Duration;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::screen_reader::{RelativeRect, Zone};

/// Inclusive `from..=to` range sampled uniformly
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Span<T> {
    pub from: T,
    pub to: T,
}

impl<T> Span<T> {
    pub const fn new(from: T, to: T) -> Self {
        Self { from, to }
    }
}

impl Span<u64> {
    /// Random duration in milliseconds
    pub fn sample_ms(&self) -> Duration {
        let (lo, hi) = (self.from.min(self.to), self.from.max(self.to));
        Duration::from_millis(rand::rng().random_range(lo..=hi))
    }
}

impl Span<f64> {
    pub fn sample(&self) -> f64 {
        let (lo, hi) = (self.from.min(self.to), self.from.max(self.to));
        if lo == hi {
            return lo;
        }
        rand::rng().random_range(lo..=hi)
    }
}

/// Loot window offsets as fractions of the window view
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LootWindowTemplate {
    /// Topmost screen row the list anchor may sit on
    pub upper_limit: f64,
    /// Horizontal offset from the cursor to the item names
    pub to_item_x: f64,
    /// Vertical offset from the cursor up to the first item
    pub to_item_y: f64,
    pub width: f64,
    pub height: f64,
    pub item_height: f64,
}

impl Default for LootWindowTemplate {
    fn default() -> Self {
        Self {
            upper_limit: 0.185,
            to_item_x: 0.015,
            to_item_y: 0.018,
            width: 0.11,
            height: 0.2,
            item_height: 0.038,
        }
    }
}

/// Loot window geometry in pixels for the current window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LootWindow {
    pub upper_limit: i32,
    pub to_item_x: i32,
    pub to_item_y: i32,
    pub width: u32,
    pub height: u32,
    pub item_height: u32,
}

impl LootWindow {
    pub fn scaled(template: &LootWindowTemplate, view: &Zone) -> Self {
        let w = view.width as f64;
        let h = view.height as f64;
        Self {
            upper_limit: view.y + (template.upper_limit * h) as i32,
            to_item_x: (template.to_item_x * w) as i32,
            to_item_y: (template.to_item_y * h) as i32,
            width: (template.width * w) as u32,
            height: (template.height * h) as u32,
            item_height: ((template.item_height * h) as u32).max(1),
        }
    }
}

/// Configuration fixed for a whole run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Delay after each synthesized key/button event (ms)
    pub delay: Span<u64>,
    /// How much red must dominate green and blue for a bobber pixel
    pub red_threshold: u8,
    /// Fishing area relative to the window
    pub rel_zone: RelativeRect,
    /// Notification banner area relative to the window
    pub notification_zone: RelativeRect,
    /// Wait after casting before looking for the bobber (ms)
    pub cast_delay: u64,
    /// Bobber polling interval (ms)
    pub checking_delay: u64,
    /// Longest time to watch one bobber (ms)
    pub max_fish_time: u64,
    /// Rejected candidates allowed per bobber search
    pub max_attempts: u32,
    pub reaction: bool,
    pub reaction_delay: Span<u64>,
    pub mouse_move_speed: Span<f64>,
    pub mouse_curvature_strength: Span<f64>,
    /// Probability that a human-like bot skips hovering the bobber
    pub highlight_skip_chance: f64,
    pub random_sleep: bool,
    /// Minutes between random breaks
    pub random_sleep_every: Span<f64>,
    /// Length of a random break (ms)
    pub random_sleep_delay: Span<u64>,
    /// Wait after applying lures (ms)
    pub lures_delay: u64,
    pub sleep_after_hook: bool,
    pub after_hook_delay: Span<u64>,
    /// Templates keyed by the first window width they no longer apply to
    pub loot_window: BTreeMap<u32, LootWindowTemplate>,
}

impl Default for Config {
    fn default() -> Self {
        let mut loot_window = BTreeMap::new();
        loot_window.insert(
            1536,
            LootWindowTemplate {
                upper_limit: 0.2,
                to_item_x: 0.018,
                to_item_y: 0.02,
                width: 0.13,
                height: 0.22,
                item_height: 0.043,
            },
        );
        loot_window.insert(1920, LootWindowTemplate::default());

        Self {
            delay: Span::new(75, 100),
            red_threshold: 50,
            rel_zone: RelativeRect::new(0.26, 0.0, 0.48, 0.48),
            notification_zone: RelativeRect::new(0.44, 0.12, 0.11, 0.07),
            cast_delay: 1750,
            checking_delay: 50,
            max_fish_time: 30_000,
            max_attempts: 16,
            reaction: true,
            reaction_delay: Span::new(200, 500),
            mouse_move_speed: Span::new(5.0, 15.0),
            mouse_curvature_strength: Span::new(20.0, 60.0),
            highlight_skip_chance: 0.15,
            random_sleep: false,
            random_sleep_every: Span::new(20.0, 40.0),
            random_sleep_delay: Span::new(60_000, 180_000),
            lures_delay: 8000,
            sleep_after_hook: true,
            after_hook_delay: Span::new(300, 1200),
            loot_window,
        }
    }
}

impl Config {
    /// Parse configuration JSON; missing fields take their defaults
    pub fn from_json(content: &str) -> serde_json::Result<Self> {
        serde_json::from_str(content)
    }

    /// Load configuration from file, falling back to defaults
    pub fn load_or_default(path: &Path) -> Self {
        let content = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                tracing::info!("[CONFIG] No config at {:?} ({}), using defaults", path, e);
                return Self::default();
            }
        };

        match Self::from_json(&content) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("[CONFIG] Invalid config JSON in {:?}: {}", path, e);
                Self::default()
            }
        }
    }

    pub fn cast_delay(&self) -> Duration {
        Duration::from_millis(self.cast_delay)
    }

    pub fn checking_delay(&self) -> Duration {
        Duration::from_millis(self.checking_delay)
    }

    pub fn max_fish_time(&self) -> Duration {
        Duration::from_millis(self.max_fish_time)
    }

    pub fn lures_delay(&self) -> Duration {
        Duration::from_millis(self.lures_delay)
    }

    /// Template for a window of `width` pixels: the first template keyed
    /// above the width, else the widest one. A window exactly as wide as a
    /// key uses the next larger template.
    pub fn loot_template_for(&self, width: u32) -> LootWindowTemplate {
        self.loot_window
            .range((Excluded(width), Unbounded))
            .next()
            .or_else(|| self.loot_window.iter().next_back())
            .map(|(_, t)| *t)
            .unwrap_or_default()
    }
}
