//! Window management using Windows API

use crate::error::{BotError, BotResult};
use crate::screen_reader::Zone;

#[cfg(windows)]
use windows::core::PCWSTR;
#[cfg(windows)]
use windows::Win32::Foundation::{HWND, RECT};
#[cfg(windows)]
use windows::Win32::UI::WindowsAndMessaging::{
    DispatchMessageW, FindWindowW, GetMessageW, GetWindowRect, SetForegroundWindow, ShowWindow,
    TranslateMessage, MSG, SW_SHOW,
};

/// The target application window.
///
/// `activate` claims the window for synthesized input and `release` hands it
/// back; the action gate pairs the two around every input burst.
pub trait GameWindow {
    /// Absolute window rectangle. A minimized or exclusive-fullscreen window
    /// reports its origin at (-32000, -32000).
    fn view(&self) -> BotResult<Zone>;

    fn activate(&self) -> BotResult<()>;

    fn release(&self);
}

/// A top-level window looked up by its exact title.
///
/// The handle is re-resolved on every call so a restarted client is picked
/// up without re-selecting.
#[derive(Debug, Clone)]
pub struct Win32Window {
    title: String,
}

impl Win32Window {
    #[cfg(windows)]
    fn hwnd(&self) -> BotResult<HWND> {
        find_window(&self.title)
            .ok_or_else(|| BotError::Window(format!("Window '{}' not found", self.title)))
    }
}

#[cfg(windows)]
fn find_window(title: &str) -> Option<HWND> {
    let title_wide: Vec<u16> = title.encode_utf16().chain(std::iter::once(0)).collect();

    unsafe {
        let hwnd = FindWindowW(PCWSTR::null(), PCWSTR(title_wide.as_ptr())).ok()?;
        if hwnd.0 as usize == 0 {
            None
        } else {
            Some(hwnd)
        }
    }
}

/// Find the game window by title
#[cfg(windows)]
pub fn select_window(title: &str) -> Option<Win32Window> {
    match find_window(title) {
        Some(_) => {
            tracing::info!("[INIT] Selected window '{}'", title);
            Some(Win32Window {
                title: title.to_string(),
            })
        }
        None => {
            tracing::warn!("[INIT] Could not find window '{}'", title);
            None
        }
    }
}

#[cfg(not(windows))]
pub fn select_window(title: &str) -> Option<Win32Window> {
    tracing::warn!(
        "[INIT] Window selection not implemented on this platform ('{}')",
        title
    );
    None
}

#[cfg(windows)]
impl GameWindow for Win32Window {
    fn view(&self) -> BotResult<Zone> {
        let hwnd = self.hwnd()?;
        let mut rect = RECT::default();
        unsafe { GetWindowRect(hwnd, &mut rect) }
            .map_err(|e| BotError::Window(format!("GetWindowRect failed: {}", e)))?;

        Ok(Zone::from_rect(rect.left, rect.top, rect.right, rect.bottom))
    }

    fn activate(&self) -> BotResult<()> {
        let hwnd = self.hwnd()?;
        unsafe {
            let _ = ShowWindow(hwnd, SW_SHOW);
            let _ = SetForegroundWindow(hwnd);
        }
        Ok(())
    }

    fn release(&self) {
        tracing::trace!("Released window '{}'", self.title);
    }
}

#[cfg(not(windows))]
impl GameWindow for Win32Window {
    fn view(&self) -> BotResult<Zone> {
        Err(BotError::Window(
            "window rect not implemented on this platform".to_string(),
        ))
    }

    fn activate(&self) -> BotResult<()> {
        Err(BotError::Window(
            "window focusing not implemented on this platform".to_string(),
        ))
    }

    fn release(&self) {}
}

/// Run the thread's message loop. Global hotkeys registered on this thread
/// are only delivered while it pumps messages.
#[cfg(windows)]
pub fn pump_messages() {
    let mut msg = MSG::default();
    unsafe {
        while GetMessageW(&mut msg, HWND::default(), 0, 0).as_bool() {
            let _ = TranslateMessage(&msg);
            let _ = DispatchMessageW(&msg);
        }
    }
}

#[cfg(not(windows))]
pub fn pump_messages() {
    loop {
        std::thread::park();
    }
}
