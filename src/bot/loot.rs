//! Reward list reading and picking after a successful hook

use tokio::time::sleep;

use crate::config::Span;
use crate::error::BotResult;
use crate::input::MouseButton;
use crate::screen_reader::{similarity, sort_words_by_item, Position, Rarity, Zone};

use super::context::BotContext;

/// Scale the list capture is upscaled by before text recognition
const OCR_SCALE: u32 = 2;

/// Minimum similarity (percent) for a whitelist match
const MATCH_THRESHOLD: f64 = 70.0;

const OPEN_WAIT: Span<u64> = Span::new(150, 250);
const TOOLTIP_WAIT: Span<u64> = Span::new(100, 200);
const DISMISS_WAIT: Span<u64> = Span::new(50, 150);

/// What a pass over the reward list found and took
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LootReport {
    pub listed: usize,
    pub picked: usize,
}

impl LootReport {
    pub fn left_behind(&self) -> bool {
        self.picked != self.listed
    }
}

pub struct LootHandler<'a> {
    ctx: &'a BotContext,
}

impl<'a> LootHandler<'a> {
    pub fn new(ctx: &'a BotContext) -> Self {
        Self { ctx }
    }

    /// Read the reward list under the cursor, pick whitelisted entries and
    /// dismiss the list when anything is left on it.
    pub async fn pick_loot(&self) -> BotResult<LootReport> {
        let ctx = self.ctx;
        let geometry = ctx.loot_window;

        let mut anchor = ctx.gate.cursor_position()?;
        if anchor.y < geometry.upper_limit {
            anchor.y = geometry.upper_limit;
        }

        sleep(OPEN_WAIT.sample_ms()).await;
        let first_entry = anchor.offset(geometry.to_item_x, -geometry.to_item_y - 10);
        ctx.gate
            .perform(|device| ctx.motion.move_to(device, first_entry, Some(5)))?;
        sleep(TOOLTIP_WAIT.sample_ms()).await;

        let list = Zone::new(
            anchor.x + geometry.to_item_x,
            anchor.y - geometry.to_item_y,
            geometry.width,
            geometry.height,
        );
        let items = self.read_items(list);

        let mut report = LootReport {
            listed: items.len(),
            picked: 0,
        };
        let mut item_pos: i32 = 0;
        for item in &items {
            let row = Zone::new(list.x, list.y + item_pos, geometry.width, geometry.item_height);
            if self.accepts(item, row) {
                tracing::info!("[LOOT] Picking '{}'", item);
                let target = Position::new(anchor.x, anchor.y + item_pos);
                ctx.gate
                    .perform(|device| ctx.motion.move_to(device, target, Some(5)))?;
                ctx.react().await;
                ctx.gate.perform(|device| {
                    device.toggle_button(MouseButton::Right, true)?;
                    device.toggle_button(MouseButton::Right, false)
                })?;
                report.picked += 1;
            } else if !item.is_empty() {
                tracing::debug!("[LOOT] Skipping '{}'", item);
            }

            item_pos += geometry.item_height as i32;
        }

        if report.left_behind() {
            sleep(DISMISS_WAIT.sample_ms()).await;
            let key = ctx.settings.dismiss_key.as_str();
            ctx.gate.perform(|device| device.send_key(key))?;
        }

        tracing::info!("[LOOT] Picked {} of {} items", report.picked, report.listed);
        Ok(report)
    }

    /// Rows of text on the list. An unreadable list counts as one unknown
    /// entry so it still gets dismissed.
    fn read_items(&self, list: Zone) -> Vec<String> {
        let ctx = self.ctx;
        let words = ctx
            .capture
            .capture_region(list)
            .and_then(|image| ctx.text_reader.read_text(&image, OCR_SCALE));

        match words {
            Ok(words) => sort_words_by_item(&words, ctx.loot_window.item_height),
            Err(e) => {
                tracing::warn!("[LOOT] Could not read the loot list: {}", e);
                vec![String::new()]
            }
        }
    }

    /// Rarity color first (when enabled), then fuzzy name match
    fn accepts(&self, item: &str, row: Zone) -> bool {
        let ctx = self.ctx;
        if ctx.settings.whitelist_rarity {
            match ctx.loot_zone.find_items(row, Rarity::Rare, Rarity::Uncommon) {
                Ok(true) => return true,
                Ok(false) => {}
                Err(e) => tracing::warn!("[LOOT] Rarity check failed: {}", e),
            }
        }

        ctx.whitelist
            .iter()
            .any(|word| similarity(word, item) > MATCH_THRESHOLD)
    }
}
