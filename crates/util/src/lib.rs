//! Configuration, preferences and filesystem helpers shared by the Lectern
//! binary and TUI.

pub mod config;
pub mod path_processing;
pub mod preferences;

pub use config::{ConfigError, ConfigOverrides, ReaderConfig};
pub use path_processing::{LOG_PATH_ENV, default_log_path, expand_tilde};
pub use preferences::{PreferencesError, UserPreferences};

/// Interprets common "enabled" spellings used in environment variables.
pub fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on" | "enable" | "enabled"
    )
}
