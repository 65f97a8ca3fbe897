//! Scripted stand-ins for the screen, window and input device

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use image::{Rgb, RgbaImage};
use parking_lot::Mutex;

use autofish::bot::{BotContext, Collaborators};
use autofish::config::{Config, Settings};
use autofish::error::{BotError, BotResult};
use autofish::input::{InputDevice, MouseButton};
use autofish::screen_reader::{
    Banner, Capture, FishingZone, LootZone, NotificationZone, Position, Rarity, TextReader, Word,
    Zone,
};
use autofish::window::GameWindow;

pub const VIEW: Zone = Zone {
    x: 0,
    y: 0,
    width: 1920,
    height: 1080,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SendKey(String),
    ToggleKey(String, bool),
    MoveTo(Position),
    MoveCurve(Position),
    Button(MouseButton, bool),
    Click(MouseButton),
}

pub struct MockWindow {
    pub view: Mutex<Zone>,
    pub activated: AtomicUsize,
    pub released: AtomicUsize,
}

impl MockWindow {
    pub fn new(view: Zone) -> Self {
        Self {
            view: Mutex::new(view),
            activated: AtomicUsize::new(0),
            released: AtomicUsize::new(0),
        }
    }

    pub fn released(&self) -> usize {
        self.released.load(Ordering::SeqCst)
    }

    pub fn activated(&self) -> usize {
        self.activated.load(Ordering::SeqCst)
    }
}

impl GameWindow for MockWindow {
    fn view(&self) -> BotResult<Zone> {
        Ok(*self.view.lock())
    }

    fn activate(&self) -> BotResult<()> {
        self.activated.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn release(&self) {
        self.released.fetch_add(1, Ordering::SeqCst);
    }
}

/// Records every input event; the cursor follows moves
#[derive(Clone)]
pub struct MockDevice {
    pub actions: Arc<Mutex<Vec<Action>>>,
    pub cursor: Arc<Mutex<Position>>,
    pub fail_keys: bool,
}

impl MockDevice {
    pub fn new(cursor: Position) -> Self {
        Self {
            actions: Arc::new(Mutex::new(Vec::new())),
            cursor: Arc::new(Mutex::new(cursor)),
            fail_keys: false,
        }
    }

    pub fn actions(&self) -> Vec<Action> {
        self.actions.lock().clone()
    }

    pub fn keys_sent(&self, key: &str) -> usize {
        self.actions()
            .iter()
            .filter(|a| matches!(a, Action::SendKey(k) if k == key))
            .count()
    }

    pub fn right_presses(&self) -> usize {
        self.actions()
            .iter()
            .filter(|a| matches!(a, Action::Button(MouseButton::Right, true)))
            .count()
    }

    pub fn moves(&self) -> Vec<Position> {
        self.actions()
            .iter()
            .filter_map(|a| match a {
                Action::MoveTo(p) | Action::MoveCurve(p) => Some(*p),
                _ => None,
            })
            .collect()
    }

    fn push(&self, action: Action) {
        self.actions.lock().push(action);
    }
}

impl InputDevice for MockDevice {
    fn send_key(&mut self, key: &str) -> BotResult<()> {
        if self.fail_keys {
            return Err(BotError::Input(format!("cannot press '{}'", key)));
        }
        self.push(Action::SendKey(key.to_string()));
        Ok(())
    }

    fn toggle_key(&mut self, key: &str, down: bool) -> BotResult<()> {
        self.push(Action::ToggleKey(key.to_string(), down));
        Ok(())
    }

    fn move_to(&mut self, pos: Position) -> BotResult<()> {
        *self.cursor.lock() = pos;
        self.push(Action::MoveTo(pos));
        Ok(())
    }

    fn move_curve_to(&mut self, pos: Position, _speed: f64, _curvature: f64) -> BotResult<()> {
        *self.cursor.lock() = pos;
        self.push(Action::MoveCurve(pos));
        Ok(())
    }

    fn toggle_button(&mut self, button: MouseButton, down: bool) -> BotResult<()> {
        self.push(Action::Button(button, down));
        Ok(())
    }

    fn click(&mut self, button: MouseButton) -> BotResult<()> {
        self.push(Action::Click(button));
        Ok(())
    }

    fn cursor_position(&self) -> BotResult<Position> {
        Ok(*self.cursor.lock())
    }
}

#[derive(Default)]
pub struct FishingScript {
    /// Results of successive `find_bobber` calls; `None` once exhausted
    pub finds: VecDeque<Option<Position>>,
    /// Results of successive `is_bobber` calls; `true` once exhausted
    pub present: VecDeque<bool>,
    /// Results of successive `check_around_bobber` calls
    pub around: VecDeque<Option<Position>>,
    pub hints: Vec<Option<Position>>,
    pub is_bobber_calls: usize,
}

#[derive(Clone, Default)]
pub struct ScriptedFishingZone {
    pub script: Arc<Mutex<FishingScript>>,
}

impl ScriptedFishingZone {
    pub fn finds(self, finds: impl IntoIterator<Item = Option<Position>>) -> Self {
        self.script.lock().finds = finds.into_iter().collect();
        self
    }

    pub fn present(self, present: impl IntoIterator<Item = bool>) -> Self {
        self.script.lock().present = present.into_iter().collect();
        self
    }

    pub fn around(self, around: impl IntoIterator<Item = Option<Position>>) -> Self {
        self.script.lock().around = around.into_iter().collect();
        self
    }

    pub fn hints(&self) -> Vec<Option<Position>> {
        self.script.lock().hints.clone()
    }

    pub fn is_bobber_calls(&self) -> usize {
        self.script.lock().is_bobber_calls
    }
}

impl FishingZone for ScriptedFishingZone {
    fn find_bobber(&self, hint: Option<Position>, _max_attempts: u32) -> BotResult<Option<Position>> {
        let mut script = self.script.lock();
        script.hints.push(hint);
        Ok(script.finds.pop_front().flatten())
    }

    fn is_bobber(&self, _pos: Position) -> BotResult<bool> {
        let mut script = self.script.lock();
        script.is_bobber_calls += 1;
        Ok(script.present.pop_front().unwrap_or(true))
    }

    fn check_around_bobber(&self, _pos: Position) -> BotResult<Option<Position>> {
        Ok(self.script.lock().around.pop_front().flatten())
    }

    fn bobber_print(&self, samples: usize) -> BotResult<Vec<Rgb<u8>>> {
        Ok(vec![Rgb([200, 30, 30]); samples.min(1)])
    }
}

#[derive(Clone, Default)]
pub struct MockNotifications {
    pub error: bool,
    pub warning: bool,
    pub checks: Arc<Mutex<Vec<Banner>>>,
}

impl MockNotifications {
    pub fn checks(&self) -> Vec<Banner> {
        self.checks.lock().clone()
    }
}

impl NotificationZone for MockNotifications {
    fn check(&self, banner: Banner) -> BotResult<bool> {
        self.checks.lock().push(banner);
        Ok(match banner {
            Banner::Error => self.error,
            Banner::Warning => self.warning,
        })
    }
}

/// Reports rarity colors on the rows whose top edge is listed
#[derive(Clone, Default)]
pub struct MockLootZone {
    pub colored_rows: Vec<i32>,
    pub queried: Arc<Mutex<Vec<(Zone, Rarity, Rarity)>>>,
}

impl LootZone for MockLootZone {
    fn find_items(&self, zone: Zone, first: Rarity, second: Rarity) -> BotResult<bool> {
        self.queried.lock().push((zone, first, second));
        Ok(self.colored_rows.contains(&zone.y))
    }
}

#[derive(Clone, Default)]
pub struct BlankCapture {
    pub fail: bool,
    pub captured: Arc<Mutex<Vec<Zone>>>,
}

impl Capture for BlankCapture {
    fn capture_region(&self, zone: Zone) -> BotResult<RgbaImage> {
        self.captured.lock().push(zone);
        if self.fail {
            return Err(BotError::Capture("screen locked".to_string()));
        }
        Ok(RgbaImage::new(zone.width.max(1), zone.height.max(1)))
    }
}

#[derive(Clone, Default)]
pub struct PresetReader {
    pub words: Vec<Word>,
    pub scales: Arc<Mutex<Vec<u32>>>,
}

impl TextReader for PresetReader {
    fn read_text(&self, _image: &RgbaImage, scale: u32) -> BotResult<Vec<Word>> {
        self.scales.lock().push(scale);
        Ok(self.words.clone())
    }
}

/// Quiet, deterministic configuration: no reactions, no human-like moves
pub fn test_config() -> Config {
    Config {
        reaction: false,
        sleep_after_hook: false,
        ..Config::default()
    }
}

pub fn test_settings() -> Settings {
    Settings {
        like_human: false,
        ..Settings::default()
    }
}

/// All mocks for one bot, kept so tests can inspect them afterwards
pub struct Harness {
    pub config: Config,
    pub settings: Settings,
    pub window: Arc<MockWindow>,
    pub device: MockDevice,
    pub fishing: ScriptedFishingZone,
    pub notifications: MockNotifications,
    pub loot: MockLootZone,
    pub capture: BlankCapture,
    pub reader: PresetReader,
}

impl Harness {
    pub fn new() -> Self {
        Self {
            config: test_config(),
            settings: test_settings(),
            window: Arc::new(MockWindow::new(VIEW)),
            device: MockDevice::new(Position::new(960, 540)),
            fishing: ScriptedFishingZone::default(),
            notifications: MockNotifications::default(),
            loot: MockLootZone::default(),
            capture: BlankCapture::default(),
            reader: PresetReader::default(),
        }
    }

    pub fn context(&self) -> BotContext {
        let view = *self.window.view.lock();
        let collaborators = Collaborators {
            window: self.window.clone(),
            device: Box::new(self.device.clone()),
            capture: Arc::new(self.capture.clone()),
            fishing_zone: Box::new(self.fishing.clone()),
            notification_zone: Box::new(self.notifications.clone()),
            loot_zone: Box::new(self.loot.clone()),
            text_reader: Box::new(self.reader.clone()),
        };
        BotContext::new(self.config.clone(), self.settings.clone(), view, collaborators)
    }
}
