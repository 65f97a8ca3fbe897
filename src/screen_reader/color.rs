//! Pixel color predicates shared by the visual zones

use image::Rgba;

/// Loot rarities worth picking regardless of the whitelist, identified on
/// screen by their name color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rarity {
    Uncommon,
    Rare,
}

/// Per-channel tolerance when comparing against a rarity color
const RARITY_TOLERANCE: i16 = 40;

impl Rarity {
    /// Name color of items of this rarity
    pub fn rgb(&self) -> [u8; 3] {
        match self {
            Rarity::Uncommon => [0x1e, 0xff, 0x00],
            Rarity::Rare => [0x00, 0x70, 0xdd],
        }
    }

    /// Whether a pixel is close enough to this rarity's color
    pub fn matches(&self, px: &Rgba<u8>) -> bool {
        let target = self.rgb();
        (0..3).all(|i| (px.0[i] as i16 - target[i] as i16).abs() <= RARITY_TOLERANCE)
    }
}

/// Notification banner kinds shown at the top of the screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Banner {
    /// Red text, e.g. a cast that did not land in water
    Error,
    /// Yellow text, e.g. the fish got away
    Warning,
}

impl Banner {
    pub fn matches(&self, px: &Rgba<u8>) -> bool {
        let [r, g, b, _] = px.0;
        match self {
            Banner::Error => r > 200 && g < 70 && b < 70,
            Banner::Warning => r > 200 && g > 170 && b < 80,
        }
    }
}

/// Bobber feather red: red dominates both other channels by `threshold`
pub fn is_bobber_red(px: &Rgba<u8>, threshold: u8) -> bool {
    let [r, g, b, _] = px.0;
    let (r, g, b) = (r as i16, g as i16, b as i16);
    r - g > threshold as i16 && r - b > threshold as i16
}

/// How strongly red dominates a pixel, used to rank bobber samples
pub fn redness(px: &Rgba<u8>) -> i16 {
    let [r, g, b, _] = px.0;
    r as i16 - g.max(b) as i16
}
