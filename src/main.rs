//! AutoFish - auto fishing bot
//!
//! Headless run loop: press the start hotkey with the game in front, press
//! the stop hotkey (or Ctrl+C) to finish. Progress goes to stdout and to
//! `debug/log/debug.log` in the data folder.

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use anyhow::Context;
use global_hotkey::{GlobalHotKeyEvent, GlobalHotKeyManager, HotKeyState};

use autofish::bot::{BotContext, Collaborators, FishingBot, RuntimeState};
use autofish::config::{Config, Settings};
use autofish::error::BotResult;
use autofish::input::open_device;
use autofish::log_main::{SessionLog, SessionStats};
use autofish::screen_reader::{ScreenService, TesseractReader};
use autofish::utils::keybinds::hotkey_for;
use autofish::utils::path::{config_dir, get_data_dir, logs_dir};
use autofish::window::{pump_messages, select_window, GameWindow};

const START_POLL_INTERVAL: Duration = Duration::from_millis(100);

fn init_logging(base: &Path) {
    let log_dir = base.join("debug").join("log");
    let _ = std::fs::create_dir_all(&log_dir);

    let log_file_path = log_dir.join("debug.log");
    let file_result = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file_path);

    use tracing_subscriber::fmt::format::FmtSpan;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    // Default level 'info', screen and OCR crates kept quiet
    const LOG_FILTER: &str = "info,autofish=info,rusty_tesseract=warn,screenshots=warn,enigo=warn";

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(LOG_FILTER));

    match file_result {
        Ok(file) => {
            let file_layer = tracing_subscriber::fmt::layer()
                .with_writer(std::sync::Mutex::new(file))
                .with_ansi(false)
                .with_span_events(FmtSpan::CLOSE);

            let stdout_layer = tracing_subscriber::fmt::layer().with_span_events(FmtSpan::CLOSE);

            tracing_subscriber::registry()
                .with(env_filter)
                .with(file_layer)
                .with(stdout_layer)
                .init();

            tracing::info!("[INIT] Logging initialized, file: {:?}", log_file_path);
        }
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(EnvFilter::new(LOG_FILTER))
                .init();
            eprintln!(
                "[INIT] Failed to create debug log file at {:?}: {}",
                log_file_path, e
            );
        }
    }
}

/// Register the start/stop hotkeys on a thread that pumps window messages.
/// Start sets `running`, stop clears it.
fn spawn_hotkeys(settings: &Settings, running: Arc<AtomicBool>) -> anyhow::Result<()> {
    let start = hotkey_for(&settings.start_key)
        .with_context(|| format!("Unsupported start key '{}'", settings.start_key))?;
    let stop = hotkey_for(&settings.stop_key)
        .with_context(|| format!("Unsupported stop key '{}'", settings.stop_key))?;

    let (ready_tx, ready_rx) = mpsc::channel::<Result<(), String>>();
    thread::spawn(move || {
        let manager = match GlobalHotKeyManager::new() {
            Ok(manager) => manager,
            Err(e) => {
                let _ = ready_tx.send(Err(e.to_string()));
                return;
            }
        };

        for hotkey in [start, stop] {
            if let Err(e) = manager.register(hotkey) {
                tracing::warn!("[INIT] Failed to register hotkey: {}", e);
            }
        }

        let (start_id, stop_id) = (start.id(), stop.id());
        GlobalHotKeyEvent::set_event_handler(Some(move |event: GlobalHotKeyEvent| {
            if event.state != HotKeyState::Pressed {
                return;
            }
            if event.id == start_id && !running.swap(true, Ordering::SeqCst) {
                tracing::info!("Start key pressed");
            } else if event.id == stop_id && running.swap(false, Ordering::SeqCst) {
                tracing::info!("Stop key pressed");
            }
        }));

        let _ = ready_tx.send(Ok(()));
        pump_messages();
        drop(manager);
    });

    ready_rx
        .recv()
        .context("Hotkey thread exited early")?
        .map_err(anyhow::Error::msg)
        .context("Failed to create hotkey manager")
}

async fn wait_for_start(running: &AtomicBool) {
    while !running.load(Ordering::SeqCst) {
        tokio::time::sleep(START_POLL_INTERVAL).await;
    }
}

/// One start-to-stop run against the game window
async fn run_session(
    config: &Config,
    settings: &Settings,
    running: &AtomicBool,
    log: &SessionLog,
) -> anyhow::Result<SessionStats> {
    tracing::info!("[INIT] Looking for the game window...");
    let window = select_window(&settings.window_title)
        .with_context(|| format!("Can't find the game window '{}'", settings.window_title))?;
    let view = window.view().context("Failed to read the window position")?;
    let device = open_device(config.delay).context("Failed to open the input device")?;

    let collaborators = Collaborators::from_screen(
        config,
        view,
        Arc::new(window),
        device,
        Arc::new(ScreenService::new()),
        Box::new(TesseractReader::default()),
    );
    let ctx = BotContext::new(config.clone(), settings.clone(), view, collaborators);
    let mut bot = FishingBot::new(&ctx);
    let mut state = RuntimeState::new();
    let mut stats = SessionStats::default();

    if let Err(e) = log.start_session() {
        tracing::warn!("Failed to write session log: {}", e);
    }

    let result = fish(&mut bot, &mut state, &mut stats, running, log).await;

    if let Err(e) = log.stop_session(&stats) {
        tracing::warn!("Failed to write session log: {}", e);
    }
    tracing::info!("{}", stats.summary());

    result?;
    Ok(stats)
}

async fn fish(
    bot: &mut FishingBot<'_>,
    state: &mut RuntimeState,
    stats: &mut SessionStats,
    running: &AtomicBool,
    log: &SessionLog,
) -> BotResult<()> {
    bot.preliminary_checks()?;
    bot.random_break_mut().start();
    let mut colors_logged = false;

    while running.load(Ordering::SeqCst) {
        if bot.lures().is_due() {
            bot.apply_lures().await?;
            bot.lures_mut().start();
        }

        if bot.random_break().is_due() {
            bot.random_sleep().await;
            bot.random_break_mut().start();
        }

        bot.cast_fishing(state).await?;

        let Some(pos) = bot.find_bobber()? else {
            if stats.total() == 0 {
                tracing::warn!("[BOBBER] No bobber in the fishing zone. Change the fishing place.");
                return Ok(());
            }
            tracing::warn!("[BOBBER] Didn't find bobber, will cast again");
            continue;
        };

        if !colors_logged {
            tracing::debug!("[BOBBER] Bobber colors: {:?}", bot.find_all_bobber_colors()?);
            colors_logged = true;
        }

        let Some(pos) = bot.highlight_bobber(pos).await? else {
            tracing::warn!("[BOBBER] Lost the bobber while highlighting, will cast again");
            continue;
        };

        let pos = bot.check_bobber(pos, state).await?;
        let caught = bot.hook_bobber(pos).await?;
        stats.record(caught);
        if let Err(e) = log.log_catch(caught) {
            tracing::warn!("Failed to write fishing log: {}", e);
        }
    }
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let base = get_data_dir();
    init_logging(&base);

    println!("AutoFish {}", env!("CARGO_PKG_VERSION"));
    println!("================================");

    let config = Config::load_or_default(&config_dir().join("config.json"));
    let settings_path = config_dir().join("settings.json");
    let settings = Settings::load_or_default(&settings_path);
    if !settings_path.exists() {
        // Leave an editable copy of the defaults behind
        if let Err(e) = settings.save(&settings_path) {
            tracing::warn!("[CONFIG] Could not write {:?}: {}", settings_path, e);
        }
    }
    let log = SessionLog::new(logs_dir());

    let running = Arc::new(AtomicBool::new(false));
    spawn_hotkeys(&settings, running.clone())?;
    println!(
        "Hotkeys: START={}, STOP={}",
        settings.start_key, settings.stop_key
    );

    loop {
        let session = async {
            wait_for_start(&running).await;
            run_session(&config, &settings, &running, &log).await
        };

        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                println!("App is closing, cleaning up...");
                break;
            }
            result = session => {
                if let Err(e) = result {
                    tracing::error!("{:#}", e);
                }
                running.store(false, Ordering::SeqCst);
            }
        }
    }

    Ok(())
}
