//! Everything one fishing run needs, built once and borrowed by the bot

use std::sync::Arc;

use crate::config::{Config, LootWindow, Settings};
use crate::input::InputDevice;
use crate::screen_reader::{
    Capture, ColorFishingZone, ColorLootZone, ColorNotificationZone, FishingZone, LootZone,
    NotificationZone, TextReader, Zone,
};
use crate::window::GameWindow;

use super::action_gate::ActionGate;
use super::motion::MotionPlanner;

/// The outside world as seen by the bot
pub struct Collaborators {
    pub window: Arc<dyn GameWindow>,
    pub device: Box<dyn InputDevice>,
    pub capture: Arc<dyn Capture>,
    pub fishing_zone: Box<dyn FishingZone>,
    pub notification_zone: Box<dyn NotificationZone>,
    pub loot_zone: Box<dyn LootZone>,
    pub text_reader: Box<dyn TextReader>,
}

impl Collaborators {
    /// Color-scanning zones laid out over the window view
    pub fn from_screen(
        config: &Config,
        view: Zone,
        window: Arc<dyn GameWindow>,
        device: Box<dyn InputDevice>,
        capture: Arc<dyn Capture>,
        text_reader: Box<dyn TextReader>,
    ) -> Self {
        let fishing_zone = view.to_rel(config.rel_zone);
        let notification_zone = view.to_rel(config.notification_zone);
        tracing::debug!(
            "[INIT] Fishing zone {:?}, notification zone {:?}",
            fishing_zone,
            notification_zone
        );

        Self {
            fishing_zone: Box::new(ColorFishingZone::new(
                capture.clone(),
                fishing_zone,
                config.red_threshold,
            )),
            notification_zone: Box::new(ColorNotificationZone::new(
                capture.clone(),
                notification_zone,
            )),
            loot_zone: Box::new(ColorLootZone::new(capture.clone())),
            window,
            device,
            capture,
            text_reader,
        }
    }
}

/// Run-wide context: configuration, derived geometry and collaborators
pub struct BotContext {
    pub config: Config,
    pub settings: Settings,
    /// Window view captured when the run started
    pub view: Zone,
    pub loot_window: LootWindow,
    pub whitelist: Vec<String>,
    pub gate: ActionGate,
    pub motion: MotionPlanner,
    pub capture: Arc<dyn Capture>,
    pub fishing_zone: Box<dyn FishingZone>,
    pub notification_zone: Box<dyn NotificationZone>,
    pub loot_zone: Box<dyn LootZone>,
    pub text_reader: Box<dyn TextReader>,
}

impl BotContext {
    pub fn new(config: Config, settings: Settings, view: Zone, collaborators: Collaborators) -> Self {
        let loot_window = LootWindow::scaled(&config.loot_template_for(view.width), &view);
        let whitelist = settings.whitelist_terms();
        let motion = MotionPlanner::new(
            settings.like_human,
            config.mouse_move_speed,
            config.mouse_curvature_strength,
        );

        Self {
            loot_window,
            whitelist,
            motion,
            gate: ActionGate::new(collaborators.window, collaborators.device),
            capture: collaborators.capture,
            fishing_zone: collaborators.fishing_zone,
            notification_zone: collaborators.notification_zone,
            loot_zone: collaborators.loot_zone,
            text_reader: collaborators.text_reader,
            config,
            settings,
            view,
        }
    }

    /// Sleep for a reaction delay when reactions are enabled
    pub async fn react(&self) {
        if self.config.reaction {
            tokio::time::sleep(self.config.reaction_delay.sample_ms()).await;
        }
    }
}
