//! Session logging and statistics

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Session entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub start: String,
    pub stop: Option<String>,
    #[serde(default)]
    pub caught: u32,
    #[serde(default)]
    pub missed: u32,
}

/// Log entry for one hook
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatchLogEntry {
    pub timestamp: String,
    #[serde(rename = "catch")]
    pub caught: bool,
}

/// Catch counts for the current run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub caught: u32,
    pub missed: u32,
}

impl SessionStats {
    pub fn record(&mut self, caught: bool) {
        if caught {
            self.caught += 1;
        } else {
            self.missed += 1;
        }
    }

    pub fn total(&self) -> u32 {
        self.caught + self.missed
    }

    /// Percentage of missed hooks, rounded down
    pub fn miss_rate(&self) -> u32 {
        match self.total() {
            0 => 0,
            total => self.missed * 100 / total,
        }
    }

    pub fn summary(&self) -> String {
        format!("Done! Caught: {}, Missed: {}%", self.caught, self.miss_rate())
    }
}

/// JSON logs under `<data>/logs`
#[derive(Debug, Clone)]
pub struct SessionLog {
    dir: PathBuf,
}

impl SessionLog {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn sessions_path(&self) -> PathBuf {
        self.dir.join("sessions.json")
    }

    fn catches_path(&self) -> PathBuf {
        self.dir.join("fishing_log.json")
    }

    pub fn load_sessions(&self) -> Vec<Session> {
        load_entries(&self.sessions_path())
    }

    /// Append an open session
    pub fn start_session(&self) -> io::Result<()> {
        let mut sessions = self.load_sessions();
        sessions.push(Session {
            start: Utc::now().to_rfc3339(),
            stop: None,
            caught: 0,
            missed: 0,
        });
        save_entries(&self.sessions_path(), &sessions)
    }

    /// Close the latest open session with its final counts
    pub fn stop_session(&self, stats: &SessionStats) -> io::Result<()> {
        let mut sessions = self.load_sessions();
        if let Some(session) = sessions.iter_mut().rev().find(|s| s.stop.is_none()) {
            session.stop = Some(Utc::now().to_rfc3339());
            session.caught = stats.caught;
            session.missed = stats.missed;
        }
        save_entries(&self.sessions_path(), &sessions)
    }

    /// Log a hook outcome to the fishing log
    pub fn log_catch(&self, caught: bool) -> io::Result<()> {
        let path = self.catches_path();
        let mut data: Vec<CatchLogEntry> = load_entries(&path);
        data.push(CatchLogEntry {
            timestamp: Utc::now().to_rfc3339(),
            caught,
        });
        save_entries(&path, &data)
    }

    pub fn load_catches(&self) -> Vec<CatchLogEntry> {
        load_entries(&self.catches_path())
    }
}

fn load_entries<T: DeserializeOwned>(path: &Path) -> Vec<T> {
    fs::read_to_string(path)
        .ok()
        .and_then(|c| serde_json::from_str(&c).ok())
        .unwrap_or_default()
}

fn save_entries<T: Serialize>(path: &Path, entries: &[T]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = serde_json::to_string_pretty(entries)?;
    fs::write(path, content)
}
