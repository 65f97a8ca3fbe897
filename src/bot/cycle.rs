//! The cast cycle: cast, find, watch and hook the bobber

use std::time::Duration;

use image::Rgb;
use rand::Rng;
use tokio::time::sleep;

use crate::error::{BotError, BotResult};
use crate::input::MouseButton;
use crate::screen_reader::{Banner, Position};
use crate::utils::{from_minutes, Timer};

use super::context::BotContext;
use super::loot::LootHandler;
use super::scheduler::Scheduled;
use super::state::{RuntimeState, Status};
use super::tracker::BobberTracker;

/// Window origin reported for minimized and exclusive-fullscreen windows
const HIDDEN_ORIGIN: i32 = -32000;

/// Wait for a notification banner to show up
const BANNER_WAIT: Duration = Duration::from_millis(250);

const JITTER: u32 = 5;

/// Samples taken for the bobber color print
const BOBBER_PRINT_SAMPLES: usize = 5;

/// The fishing state machine for one run.
///
/// The run loop calls the operations in order: [`preliminary_checks`] once,
/// then per cycle [`cast_fishing`], [`find_bobber`], [`highlight_bobber`],
/// [`check_bobber`] and [`hook_bobber`]. Lures and random breaks run
/// between cycles when their [`Scheduled`] hook is due.
///
/// [`preliminary_checks`]: FishingBot::preliminary_checks
/// [`cast_fishing`]: FishingBot::cast_fishing
/// [`find_bobber`]: FishingBot::find_bobber
/// [`highlight_bobber`]: FishingBot::highlight_bobber
/// [`check_bobber`]: FishingBot::check_bobber
/// [`hook_bobber`]: FishingBot::hook_bobber
pub struct FishingBot<'a> {
    ctx: &'a BotContext,
    tracker: BobberTracker,
    patience: Timer,
    lures: Scheduled,
    random_break: Scheduled,
}

impl<'a> FishingBot<'a> {
    pub fn new(ctx: &'a BotContext) -> Self {
        let lures_interval = ctx.settings.lures_interval();
        let break_every = ctx.config.random_sleep_every;

        Self {
            tracker: BobberTracker::new(ctx.config.max_attempts),
            patience: Timer::fixed(ctx.config.max_fish_time()),
            lures: Scheduled::new(ctx.settings.lures, Timer::fixed(lures_interval)),
            random_break: Scheduled::new(
                ctx.config.random_sleep,
                Timer::new(move || from_minutes(break_every.sample())),
            ),
            ctx,
        }
    }

    pub fn lures(&self) -> &Scheduled {
        &self.lures
    }

    pub fn lures_mut(&mut self) -> &mut Scheduled {
        &mut self.lures
    }

    pub fn random_break(&self) -> &Scheduled {
        &self.random_break
    }

    pub fn random_break_mut(&mut self) -> &mut Scheduled {
        &mut self.random_break
    }

    /// Refuse to start when the window is hidden or the fishing zone already
    /// shows something bobber colored.
    pub fn preliminary_checks(&self) -> BotResult<()> {
        let view = self.ctx.gate.window().view()?;
        if view.x == HIDDEN_ORIGIN && view.y == HIDDEN_ORIGIN {
            return Err(BotError::WindowMode);
        }

        let found = self
            .ctx
            .fishing_zone
            .find_bobber(None, self.ctx.config.max_attempts)?;
        if let Some(pos) = found {
            tracing::warn!("[INIT] Bobber colors at ({}, {}) before casting", pos.x, pos.y);
            self.ctx.gate.perform(|device| device.move_to(pos))?;
            return Err(BotError::BobberBeforeCast { pos });
        }
        Ok(())
    }

    pub async fn apply_lures(&self) -> BotResult<()> {
        tracing::info!("[CAST] Applying lures");
        let key = self.ctx.settings.lures_key.as_str();
        self.ctx.gate.perform(|device| device.send_key(key))?;
        sleep(self.ctx.config.lures_delay()).await;
        Ok(())
    }

    pub async fn random_sleep(&self) {
        let pause = self.ctx.config.random_sleep_delay.sample_ms();
        tracing::info!("[CAST] Taking a break for {} s", pause.as_secs());
        sleep(pause).await;
    }

    pub fn find_all_bobber_colors(&self) -> BotResult<Vec<Rgb<u8>>> {
        self.ctx.fishing_zone.bobber_print(BOBBER_PRINT_SAMPLES)
    }

    /// Cast the line. The first cast of a run is checked for an error
    /// banner and moves the state to `Working`.
    pub async fn cast_fishing(&self, state: &mut RuntimeState) -> BotResult<()> {
        let key = self.ctx.settings.fishing_key.as_str();
        self.ctx.gate.perform(|device| device.send_key(key))?;
        tracing::debug!("[CAST] Cast with '{}'", key);

        if state.status == Status::Initial {
            sleep(BANNER_WAIT).await;
            if self.ctx.notification_zone.check(Banner::Error)? {
                return Err(BotError::CastNotification);
            }
            state.status = Status::Working;
        }

        sleep(self.ctx.config.cast_delay()).await;
        Ok(())
    }

    pub fn find_bobber(&mut self) -> BotResult<Option<Position>> {
        let found = self.tracker.find(self.ctx.fishing_zone.as_ref())?;
        match found {
            Some(pos) => tracing::debug!("[BOBBER] Found at ({}, {})", pos.x, pos.y),
            None => tracing::debug!("[BOBBER] Not found"),
        }
        Ok(found)
    }

    /// Hover the bobber so the game outlines it, then look again. A
    /// human-like bot sometimes skips this and keeps `pos`.
    pub async fn highlight_bobber(&mut self, pos: Position) -> BotResult<Option<Position>> {
        if self.ctx.settings.like_human && self.skips_highlight() {
            tracing::trace!("[BOBBER] Not highlighting");
            return Ok(Some(pos));
        }

        self.ctx.react().await;
        let ctx = self.ctx;
        ctx.gate
            .perform(|device| ctx.motion.move_to(device, pos, Some(JITTER)))?;

        self.find_bobber()
    }

    fn skips_highlight(&self) -> bool {
        let chance = self.ctx.config.highlight_skip_chance;
        if chance.is_nan() {
            return false;
        }
        rand::rng().random_bool(chance.clamp(0.0, 1.0))
    }

    /// Watch the bobber until it is disturbed and return where it was last
    /// seen. Returns `pos` unchanged when the cycle is not `Working`.
    pub async fn check_bobber(&mut self, pos: Position, state: &RuntimeState) -> BotResult<Position> {
        let mut pos = pos;
        self.patience.start();

        while state.is_working() {
            if self.patience.is_elapsed() {
                return Err(BotError::StuckOnBobber {
                    max: self.ctx.config.max_fish_time(),
                });
            }

            if !self.ctx.fishing_zone.is_bobber(pos)? {
                match self.ctx.fishing_zone.check_around_bobber(pos)? {
                    Some(moved) => {
                        tracing::trace!("[BOBBER] Drifted to ({}, {})", moved.x, moved.y);
                        pos = moved;
                    }
                    None => {
                        tracing::debug!(
                            "[BOBBER] Disturbed after {} ms",
                            self.patience.elapsed().as_millis()
                        );
                        return Ok(pos);
                    }
                }
            }

            sleep(self.ctx.config.checking_delay()).await;
        }
        Ok(pos)
    }

    /// Click the bobber. Returns whether the catch succeeded, which is the
    /// absence of a warning banner shortly after.
    pub async fn hook_bobber(&self, pos: Position) -> BotResult<bool> {
        let ctx = self.ctx;
        ctx.react().await;

        let shift_click = ctx.settings.shift_click;
        ctx.gate.perform(|device| {
            ctx.motion.move_to(device, pos, Some(JITTER))?;
            if shift_click {
                device.toggle_key("shift", true)?;
                let clicked = device.click(MouseButton::Right);
                device.toggle_key("shift", false)?;
                clicked
            } else {
                device.toggle_button(MouseButton::Right, true)?;
                device.toggle_button(MouseButton::Right, false)
            }
        })?;

        sleep(BANNER_WAIT).await;
        let caught = !ctx.notification_zone.check(Banner::Warning)?;
        if caught {
            tracing::info!("[HOOK] Caught");
            if ctx.settings.whitelist && !ctx.whitelist.is_empty() {
                LootHandler::new(ctx).pick_loot().await?;
            }
        } else {
            tracing::info!("[HOOK] Missed");
        }

        sleep(ctx.settings.game.loot_close_delay()).await;
        if ctx.config.sleep_after_hook {
            sleep(ctx.config.after_hook_delay.sample_ms()).await;
        }

        Ok(caught)
    }
}
