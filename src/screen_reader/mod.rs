//! Screen reader module for capturing and analyzing screen content

pub mod color;
pub mod screen_service;
pub mod text_reader;
pub mod visual_zones;
pub mod zone;

pub use color::{Banner, Rarity};
pub use screen_service::{Capture, ScreenService};
pub use text_reader::{similarity, sort_words_by_item, TesseractReader, TextReader, Word};
pub use visual_zones::{
    ColorFishingZone, ColorLootZone, ColorNotificationZone, FishingZone, LootZone,
    NotificationZone,
};
pub use zone::{Position, RelativeRect, Zone};
