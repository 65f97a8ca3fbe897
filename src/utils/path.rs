//! Path utilities for finding data directories

use std::env;
use std::path::PathBuf;

use directories::ProjectDirs;

/// Returns the folder where config, logs and debug output live.
///
/// A `config` folder next to the executable wins (portable install), then
/// one in the working directory, then the per-user data directory.
pub fn get_data_dir() -> PathBuf {
    if let Ok(exe_path) = env::current_exe() {
        if let Some(parent) = exe_path.parent() {
            if parent.join("config").exists() {
                return parent.to_path_buf();
            }
        }
    }

    let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    if cwd.join("config").exists() {
        return cwd;
    }

    ProjectDirs::from("", "", "autofish")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or(cwd)
}

pub fn config_dir() -> PathBuf {
    get_data_dir().join("config")
}

pub fn logs_dir() -> PathBuf {
    get_data_dir().join("logs")
}
