//! User settings chosen between runs

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::utils::from_minutes;
use crate::utils::keybinds::resolve_key;

/// Which game client is being fished in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameVariant {
    Retail,
    Classic,
    #[serde(rename = "Retail&Classic")]
    RetailAndClassic,
}

impl GameVariant {
    /// Time for the loot window to close after hooking
    pub fn loot_close_delay(&self) -> Duration {
        match self {
            GameVariant::RetailAndClassic => Duration::from_millis(750),
            _ => Duration::from_millis(250),
        }
    }
}

/// Settings structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub game: GameVariant,
    /// Curved cursor moves and occasional non-reactions
    pub like_human: bool,
    pub lures: bool,
    pub lures_key: String,
    /// Minimum minutes between lure applications
    pub lures_delay_min: f64,
    pub fishing_key: String,
    /// Only pick whitelisted loot
    pub whitelist: bool,
    /// Comma-separated loot names
    pub whitelist_words: String,
    /// Also pick uncommon (green) and rare (blue) loot by name color
    pub whitelist_rarity: bool,
    /// Hook with shift held (auto-loot modifier)
    pub shift_click: bool,
    pub window_title: String,
    pub start_key: String,
    pub stop_key: String,
    pub dismiss_key: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            game: GameVariant::Retail,
            like_human: true,
            lures: false,
            lures_key: "2".to_string(),
            lures_delay_min: 10.0,
            fishing_key: "1".to_string(),
            whitelist: false,
            whitelist_words: String::new(),
            whitelist_rarity: false,
            shift_click: false,
            window_title: "World of Warcraft".to_string(),
            start_key: "F9".to_string(),
            stop_key: "F10".to_string(),
            dismiss_key: "ESC".to_string(),
        }
    }
}

impl Settings {
    pub fn from_json(content: &str) -> serde_json::Result<Self> {
        serde_json::from_str(content)
    }

    /// Load settings from file, falling back to defaults
    pub fn load_or_default(path: &Path) -> Self {
        let settings = match fs::read_to_string(path) {
            Ok(content) => Self::from_json(&content).unwrap_or_else(|e| {
                tracing::warn!("[CONFIG] Invalid settings JSON in {:?}: {}", path, e);
                Self::default()
            }),
            Err(_) => Self::default(),
        };

        for (name, key) in settings.keys() {
            if resolve_key(key).is_none() {
                tracing::warn!("[CONFIG] Unrecognized {} '{}'", name, key);
            }
        }
        settings
    }

    /// Save settings to file
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)
    }

    /// Whitelist terms, trimmed, without empty entries
    pub fn whitelist_terms(&self) -> Vec<String> {
        self.whitelist_words
            .split(',')
            .map(|word| word.trim().to_string())
            .filter(|word| !word.is_empty())
            .collect()
    }

    pub fn lures_interval(&self) -> Duration {
        from_minutes(self.lures_delay_min)
    }

    fn keys(&self) -> [(&'static str, &str); 5] {
        [
            ("lures_key", self.lures_key.as_str()),
            ("fishing_key", self.fishing_key.as_str()),
            ("start_key", self.start_key.as_str()),
            ("stop_key", self.stop_key.as_str()),
            ("dismiss_key", self.dismiss_key.as_str()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.start_key, "F9");
        assert_eq!(settings.game, GameVariant::Retail);
        assert!(settings.whitelist_terms().is_empty());
    }

    #[test]
    fn test_whitelist_terms() {
        let settings = Settings {
            whitelist_words: " Simple Fish, ,Raw Sagefish ,".to_string(),
            ..Settings::default()
        };
        assert_eq!(settings.whitelist_terms(), vec!["Simple Fish", "Raw Sagefish"]);
    }

    #[test]
    fn test_game_variant_json() {
        let settings = Settings::from_json(r#"{ "game": "Retail&Classic", "shift_click": true }"#).unwrap();
        assert_eq!(settings.game, GameVariant::RetailAndClassic);
        assert_eq!(settings.game.loot_close_delay(), Duration::from_millis(750));
        assert!(settings.shift_click);
        assert_eq!(settings.fishing_key, "1");
    }

    #[test]
    fn test_huge_lures_delay_saturates() {
        let settings = Settings::from_json(r#"{ "lures_delay_min": 1e300 }"#).unwrap();
        assert_eq!(settings.lures_interval(), Duration::MAX);
        assert_eq!(Settings::default().lures_interval(), Duration::from_secs(600));
    }

    #[test]
    fn test_save_and_load() {
        let dir = std::env::temp_dir().join(format!("autofish-settings-{}", std::process::id()));
        let path = dir.join("settings.json");
        let settings = Settings {
            lures: true,
            whitelist_words: "Simple Fish".to_string(),
            ..Settings::default()
        };
        settings.save(&path).unwrap();

        let loaded = Settings::load_or_default(&path);
        assert!(loaded.lures);
        assert_eq!(loaded.whitelist_words, "Simple Fish");
        let _ = fs::remove_dir_all(dir);
    }
}
