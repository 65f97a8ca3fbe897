mod common;

use autofish::bot::{FishingBot, LootHandler, LootReport};
use autofish::screen_reader::{Position, Rarity, Word, Zone};

use common::Harness;

// Loot window geometry for the 1920x1080 test view
const TO_ITEM_X: i32 = 28;
const TO_ITEM_Y: i32 = 19;
const ITEM_HEIGHT: i32 = 41;
const UPPER_LIMIT: i32 = 199;

fn whitelisted(words: &str, rows: Vec<Word>) -> Harness {
    let mut harness = Harness::new();
    harness.settings.whitelist = true;
    harness.settings.whitelist_words = words.to_string();
    harness.reader.words = rows;
    harness
}

fn cursor(harness: &Harness) -> Position {
    *harness.device.cursor.lock()
}

fn within(p: Position, target: Position, radius: i32) -> bool {
    (p.x - target.x).abs() <= radius && (p.y - target.y).abs() <= radius
}

#[tokio::test(start_paused = true)]
async fn test_misspelled_entry_is_accepted() {
    let harness = whitelisted(
        "Simple Fish",
        vec![Word::new("Simple", 0, 5), Word::new("Fidh", 64, 6)],
    );
    let anchor = cursor(&harness);
    let ctx = harness.context();

    let report = LootHandler::new(&ctx).pick_loot().await.unwrap();

    assert_eq!(report, LootReport { listed: 1, picked: 1 });
    assert_eq!(harness.device.right_presses(), 1);
    assert_eq!(harness.device.keys_sent("ESC"), 0);
    assert_eq!(*harness.reader.scales.lock(), vec![2]);

    // Tooltip dodge above the first entry, then the entry itself
    let moves = harness.device.moves();
    assert_eq!(moves.len(), 2);
    assert!(within(moves[0], anchor.offset(TO_ITEM_X, -TO_ITEM_Y - 10), 5));
    assert!(within(moves[1], anchor, 5));
}

#[tokio::test(start_paused = true)]
async fn test_nothing_accepted_dismisses_once() {
    let harness = whitelisted(
        "Simple Fish",
        vec![Word::new("Old", 0, 5), Word::new("Boot", 40, 5), Word::new("Driftwood", 0, 47)],
    );
    let ctx = harness.context();

    let report = LootHandler::new(&ctx).pick_loot().await.unwrap();

    assert_eq!(report, LootReport { listed: 2, picked: 0 });
    assert_eq!(harness.device.right_presses(), 0);
    assert_eq!(harness.device.keys_sent("ESC"), 1);
}

#[tokio::test(start_paused = true)]
async fn test_all_accepted_leaves_list_open() {
    let harness = whitelisted(
        "Simple Fish, Raw Sagefish",
        vec![
            Word::new("Simple Fish", 0, 5),
            Word::new("Raw Sagefish", 0, 5 + ITEM_HEIGHT as u32),
        ],
    );
    let ctx = harness.context();

    let report = LootHandler::new(&ctx).pick_loot().await.unwrap();

    assert_eq!(report, LootReport { listed: 2, picked: 2 });
    assert_eq!(harness.device.keys_sent("ESC"), 0);
}

#[tokio::test(start_paused = true)]
async fn test_offset_advances_over_skipped_rows() {
    let harness = whitelisted(
        "Simple Fish",
        vec![
            Word::new("Simple Fish", 0, 5),
            Word::new("Old Boot", 0, 5 + ITEM_HEIGHT as u32),
            Word::new("Simple Fish", 0, 5 + 3 * ITEM_HEIGHT as u32),
        ],
    );
    let anchor = cursor(&harness);
    let ctx = harness.context();

    let report = LootHandler::new(&ctx).pick_loot().await.unwrap();

    // Rows: fish, boot, (empty), fish
    assert_eq!(report, LootReport { listed: 4, picked: 2 });
    let moves = harness.device.moves();
    assert_eq!(moves.len(), 3);
    assert!(within(moves[1], anchor, 5));
    assert!(within(moves[2], anchor.offset(0, 3 * ITEM_HEIGHT), 5));
    assert_eq!(harness.device.keys_sent("ESC"), 1);
}

#[tokio::test(start_paused = true)]
async fn test_rarity_color_accepts_unlisted_row() {
    let mut harness = whitelisted(
        "Simple Fish",
        vec![
            Word::new("Old Boot", 0, 5),
            Word::new("Sea Scorpion", 0, 5 + ITEM_HEIGHT as u32),
        ],
    );
    harness.settings.whitelist_rarity = true;
    let anchor = cursor(&harness);
    let list_top = anchor.y - TO_ITEM_Y;
    harness.loot.colored_rows = vec![list_top + ITEM_HEIGHT];
    let ctx = harness.context();

    let report = LootHandler::new(&ctx).pick_loot().await.unwrap();

    assert_eq!(report, LootReport { listed: 2, picked: 1 });
    let queried = harness.loot.queried.lock().clone();
    assert_eq!(queried.len(), 2);
    let (row, first, second) = queried[1];
    assert_eq!((first, second), (Rarity::Rare, Rarity::Uncommon));
    assert_eq!(row.x, anchor.x + TO_ITEM_X);
    assert_eq!(row.height, ITEM_HEIGHT as u32);
}

#[tokio::test(start_paused = true)]
async fn test_list_anchor_clamped_to_upper_limit() {
    let harness = whitelisted("Simple Fish", vec![Word::new("Simple Fish", 0, 5)]);
    *harness.device.cursor.lock() = Position::new(900, 60);
    let ctx = harness.context();

    LootHandler::new(&ctx).pick_loot().await.unwrap();

    let captured: Vec<Zone> = harness.capture.captured.lock().clone();
    assert_eq!(captured.len(), 1);
    assert_eq!(captured[0].x, 900 + TO_ITEM_X);
    assert_eq!(captured[0].y, UPPER_LIMIT - TO_ITEM_Y);
}

#[tokio::test(start_paused = true)]
async fn test_unreadable_list_is_dismissed() {
    let mut harness = whitelisted("Simple Fish", vec![Word::new("Simple Fish", 0, 5)]);
    harness.capture.fail = true;
    let ctx = harness.context();

    let report = LootHandler::new(&ctx).pick_loot().await.unwrap();

    assert_eq!(report.picked, 0);
    assert!(harness.reader.scales.lock().is_empty());
    assert_eq!(harness.device.right_presses(), 0);
    assert_eq!(harness.device.keys_sent("ESC"), 1);
}

#[tokio::test(start_paused = true)]
async fn test_successful_hook_picks_loot() {
    let harness = whitelisted("Simple Fish", vec![Word::new("Simple Fish", 0, 5)]);
    let ctx = harness.context();
    let bot = FishingBot::new(&ctx);

    assert!(bot.hook_bobber(Position::new(700, 400)).await.unwrap());
    assert_eq!(harness.capture.captured.lock().len(), 1);
    // One press to hook, one to pick
    assert_eq!(harness.device.right_presses(), 2);
    assert_eq!(harness.device.keys_sent("ESC"), 0);
}
