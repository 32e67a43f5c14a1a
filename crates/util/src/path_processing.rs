use std::env;
use std::path::PathBuf;

use dirs_next::{data_local_dir, home_dir};

/// Environment variable overriding where the interactive reader writes logs.
pub const LOG_PATH_ENV: &str = "LECTERN_LOG_PATH";

const LOG_FILE_NAME: &str = "lectern.log";

pub fn expand_tilde(path: &str) -> PathBuf {
    let p = path.trim();
    if p == "~" {
        return home_dir().unwrap_or_else(|| PathBuf::from("~"));
    }
    if let Some(rest) = p.strip_prefix("~/") {
        return home_dir().unwrap_or_else(|| PathBuf::from("~")).join(rest);
    }
    if let Some(rest) = p.strip_prefix("~\\") {
        // Windows-style
        return home_dir().unwrap_or_else(|| PathBuf::from("~")).join(rest);
    }
    PathBuf::from(p)
}

/// Log file used while the TUI owns the terminal.
pub fn default_log_path() -> PathBuf {
    if let Ok(path) = env::var(LOG_PATH_ENV) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return expand_tilde(trimmed);
        }
    }
    data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("lectern")
        .join(LOG_FILE_NAME)
}
