//! Key name validation and hotkey codes

use global_hotkey::hotkey::{Code, HotKey};

/// Special key names accepted in settings
const SPECIAL_KEYS: &[&str] = &[
    "F1", "F2", "F3", "F4", "F5", "F6", "F7", "F8", "F9", "F10", "F11", "F12", "ESC", "ESCAPE",
    "ENTER", "RETURN", "SPACE", "TAB", "BACKSPACE", "UP", "DOWN", "LEFT", "RIGHT", "HOME", "END",
    "PAGEUP", "PAGEDOWN", "INSERT", "DELETE", "SHIFT", "CTRL", "CONTROL", "ALT", "PAUSE",
];

/// Resolve a key name string to a validated, upper-cased key name
pub fn resolve_key(key_name: &str) -> Option<String> {
    let key_upper = key_name.trim().to_uppercase();
    if key_upper.is_empty() {
        return None;
    }

    if SPECIAL_KEYS.contains(&key_upper.as_str()) {
        return Some(key_upper);
    }

    let mut chars = key_upper.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_alphanumeric() => Some(key_upper),
        _ => None,
    }
}

/// Global hotkey for a start/stop key name
pub fn hotkey_for(key: &str) -> Option<HotKey> {
    string_to_code(key).map(|code| HotKey::new(None, code))
}

/// Convert key string to global_hotkey Code.
///
/// Only keys that make sense as a global start/stop trigger are mapped;
/// letters and digits would fire while typing in the game chat.
pub fn string_to_code(key: &str) -> Option<Code> {
    let code = match resolve_key(key)?.as_str() {
        "F1" => Code::F1,
        "F2" => Code::F2,
        "F3" => Code::F3,
        "F4" => Code::F4,
        "F5" => Code::F5,
        "F6" => Code::F6,
        "F7" => Code::F7,
        "F8" => Code::F8,
        "F9" => Code::F9,
        "F10" => Code::F10,
        "F11" => Code::F11,
        "F12" => Code::F12,
        "PAUSE" => Code::Pause,
        "INSERT" => Code::Insert,
        "HOME" => Code::Home,
        "END" => Code::End,
        "PAGEUP" => Code::PageUp,
        "PAGEDOWN" => Code::PageDown,
        "DELETE" => Code::Delete,
        _ => return None,
    };
    Some(code)
}
