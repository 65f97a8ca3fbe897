//! The three visual zones: fishing area, notification banner and loot rows
//!
//! The bot only talks to the traits; the color-scanning implementations
//! below read through a shared [`Capture`].

use std::sync::Arc;

use image::{Rgb, RgbaImage};

use super::color::{is_bobber_red, redness, Banner, Rarity};
use super::screen_service::Capture;
use super::zone::{Position, Zone};
use crate::error::BotResult;

/// Visual tracking primitives scoped to the fishing zone
pub trait FishingZone {
    /// Locate the bobber, searching near `hint` first and giving up after
    /// `max_attempts` rejected candidates.
    fn find_bobber(&self, hint: Option<Position>, max_attempts: u32) -> BotResult<Option<Position>>;

    /// Whether the bobber is still visible at `pos`
    fn is_bobber(&self, pos: Position) -> BotResult<bool>;

    /// Look for the bobber in the close neighborhood of `pos`
    fn check_around_bobber(&self, pos: Position) -> BotResult<Option<Position>>;

    /// Up to `samples` distinct bobber colors currently visible
    fn bobber_print(&self, samples: usize) -> BotResult<Vec<Rgb<u8>>>;
}

/// Banner checks scoped to the notification zone
pub trait NotificationZone {
    fn check(&self, banner: Banner) -> BotResult<bool>;
}

/// Rarity color test scoped to a single loot row
pub trait LootZone {
    fn find_items(&self, zone: Zone, first: Rarity, second: Rarity) -> BotResult<bool>;
}

const HINT_RADIUS: u32 = 40;
const AROUND_RADIUS: u32 = 10;
const CLUSTER_RADIUS: i64 = 2;
const MIN_CLUSTER: usize = 6;
const MIN_BANNER_PIXELS: usize = 20;
const MIN_ITEM_PIXELS: usize = 10;

/// Fishing zone backed by red-pixel scanning
pub struct ColorFishingZone {
    capture: Arc<dyn Capture>,
    zone: Zone,
    red_threshold: u8,
}

impl ColorFishingZone {
    pub fn new(capture: Arc<dyn Capture>, zone: Zone, red_threshold: u8) -> Self {
        Self {
            capture,
            zone,
            red_threshold,
        }
    }

    fn is_red_at(&self, img: &RgbaImage, x: i64, y: i64) -> bool {
        if x < 0 || y < 0 || x >= img.width() as i64 || y >= img.height() as i64 {
            return false;
        }
        is_bobber_red(img.get_pixel(x as u32, y as u32), self.red_threshold)
    }

    /// A lone red pixel is noise; the feather shows up as a small cluster
    fn is_cluster(&self, img: &RgbaImage, x: i64, y: i64) -> bool {
        let mut count = 0;
        for dy in -CLUSTER_RADIUS..=CLUSTER_RADIUS {
            for dx in -CLUSTER_RADIUS..=CLUSTER_RADIUS {
                if self.is_red_at(img, x + dx, y + dy) {
                    count += 1;
                }
            }
        }
        count >= MIN_CLUSTER
    }

    /// Scan `area` (image coordinates) row by row for a verified cluster
    fn scan(&self, img: &RgbaImage, area: Zone, attempts: &mut u32, max_attempts: u32) -> Option<(u32, u32)> {
        for y in area.y.max(0)..area.bottom().min(img.height() as i32) {
            for x in area.x.max(0)..area.right().min(img.width() as i32) {
                if !self.is_red_at(img, x as i64, y as i64) {
                    continue;
                }
                if self.is_cluster(img, x as i64, y as i64) {
                    return Some((x as u32, y as u32));
                }
                *attempts += 1;
                if *attempts >= max_attempts {
                    tracing::trace!("[BOBBER] Attempts budget exhausted ({})", max_attempts);
                    return None;
                }
            }
        }
        None
    }
}

impl FishingZone for ColorFishingZone {
    fn find_bobber(&self, hint: Option<Position>, max_attempts: u32) -> BotResult<Option<Position>> {
        let img = self.capture.capture_region(self.zone)?;
        let whole = Zone::new(0, 0, img.width(), img.height());
        let mut attempts = 0;

        if let Some(hint) = hint.filter(|h| self.zone.contains(*h)) {
            let local = Position::new(hint.x - self.zone.x, hint.y - self.zone.y);
            if let Some(area) = Zone::around(local, HINT_RADIUS).intersect(&whole) {
                if let Some((x, y)) = self.scan(&img, area, &mut attempts, max_attempts) {
                    return Ok(Some(Position::new(self.zone.x + x as i32, self.zone.y + y as i32)));
                }
            }
        }

        if attempts >= max_attempts {
            return Ok(None);
        }

        Ok(self
            .scan(&img, whole, &mut attempts, max_attempts)
            .map(|(x, y)| Position::new(self.zone.x + x as i32, self.zone.y + y as i32)))
    }

    fn is_bobber(&self, pos: Position) -> BotResult<bool> {
        let img = self.capture.capture_region(Zone::around(pos, 1))?;
        Ok(img
            .pixels()
            .any(|px| is_bobber_red(px, self.red_threshold)))
    }

    fn check_around_bobber(&self, pos: Position) -> BotResult<Option<Position>> {
        let area = Zone::around(pos, AROUND_RADIUS);
        let img = self.capture.capture_region(area)?;
        let center = Position::new(AROUND_RADIUS as i32, AROUND_RADIUS as i32);

        let nearest = img
            .enumerate_pixels()
            .filter(|(_, _, px)| is_bobber_red(px, self.red_threshold))
            .map(|(x, y, _)| Position::new(x as i32, y as i32))
            .min_by(|a, b| center.distance(*a).total_cmp(&center.distance(*b)));

        Ok(nearest.map(|p| Position::new(area.x + p.x, area.y + p.y)))
    }

    fn bobber_print(&self, samples: usize) -> BotResult<Vec<Rgb<u8>>> {
        let img = self.capture.capture_region(self.zone)?;
        let mut reds: Vec<_> = img
            .pixels()
            .filter(|px| is_bobber_red(px, self.red_threshold))
            .collect();
        reds.sort_by_key(|px| std::cmp::Reverse(redness(px)));

        let mut print: Vec<Rgb<u8>> = Vec::with_capacity(samples);
        for px in reds {
            let rgb = Rgb([px.0[0], px.0[1], px.0[2]]);
            if !print.contains(&rgb) {
                print.push(rgb);
            }
            if print.len() == samples {
                break;
            }
        }
        Ok(print)
    }
}

/// Notification zone backed by banner text color counting
pub struct ColorNotificationZone {
    capture: Arc<dyn Capture>,
    zone: Zone,
}

impl ColorNotificationZone {
    pub fn new(capture: Arc<dyn Capture>, zone: Zone) -> Self {
        Self { capture, zone }
    }
}

impl NotificationZone for ColorNotificationZone {
    fn check(&self, banner: Banner) -> BotResult<bool> {
        let img = self.capture.capture_region(self.zone)?;
        let count = img.pixels().filter(|px| banner.matches(px)).count();
        tracing::trace!("[NOTIFY] {:?} pixels: {}", banner, count);
        Ok(count >= MIN_BANNER_PIXELS)
    }
}

/// Loot rows tested for rarity name colors
pub struct ColorLootZone {
    capture: Arc<dyn Capture>,
}

impl ColorLootZone {
    pub fn new(capture: Arc<dyn Capture>) -> Self {
        Self { capture }
    }
}

impl LootZone for ColorLootZone {
    fn find_items(&self, zone: Zone, first: Rarity, second: Rarity) -> BotResult<bool> {
        let img = self.capture.capture_region(zone)?;
        let count = img
            .pixels()
            .filter(|px| first.matches(px) || second.matches(px))
            .count();
        Ok(count >= MIN_ITEM_PIXELS)
    }
}
