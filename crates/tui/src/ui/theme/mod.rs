//! Theme styling for the reader.
//!
//! Palettes (Dracula, Nord and an ANSI 256-color fallback) map onto semantic
//! roles; components only ever ask the [`Theme`] for styles.

use std::env;

use lectern_util::is_truthy;
use tracing::debug;

pub mod ansi256;
pub mod catalog;
pub mod dracula;
pub mod helpers;
pub mod nord;
pub mod roles;

pub use ansi256::Ansi256Theme;
pub use catalog::ThemeDefinition;
pub use dracula::DraculaTheme;
pub use nord::NordTheme;
pub use roles::Theme;

pub const THEME_ENV: &str = "LECTERN_THEME";
pub const COLOR_MODE_ENV: &str = "LECTERN_COLOR_MODE";
pub const FORCE_TRUECOLOR_ENV: &str = "LECTERN_FORCE_TRUECOLOR";

/// Theme plus metadata describing how it was selected.
pub struct LoadedTheme {
    pub definition: &'static ThemeDefinition,
    pub theme: Box<dyn Theme>,
}

impl LoadedTheme {
    pub fn from_definition(definition: &'static ThemeDefinition) -> Self {
        Self {
            definition,
            theme: definition.build(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorCapability {
    Truecolor,
    Ansi256,
}

/// Selects a theme from an explicit override, `LECTERN_THEME`, the saved
/// preference and terminal capabilities, in that order.
///
/// ANSI-only terminals always get the fallback palette.
pub fn load(explicit: Option<&str>, preferred: Option<&str>) -> LoadedTheme {
    if detect_color_capability() == ColorCapability::Ansi256 {
        debug!("ANSI-only terminal detected; using the fallback palette");
        return LoadedTheme::from_definition(catalog::default_ansi());
    }

    let from_env = env::var(THEME_ENV).ok();
    let candidates = [explicit, from_env.as_deref(), preferred];
    for name in candidates.into_iter().flatten() {
        if let Some(definition) = catalog::resolve(name.trim()) {
            return LoadedTheme::from_definition(definition);
        }
        debug!(theme = name, "unknown theme name ignored");
    }

    LoadedTheme::from_definition(catalog::default_truecolor())
}

pub fn detect_color_capability() -> ColorCapability {
    if let Some(mode) = env::var(COLOR_MODE_ENV).ok().and_then(|value| parse_color_mode(value.trim())) {
        return mode;
    }

    if env::var(FORCE_TRUECOLOR_ENV).is_ok_and(|value| is_truthy(&value)) {
        return ColorCapability::Truecolor;
    }

    let color_term = env::var("COLORTERM").unwrap_or_default().to_ascii_lowercase();
    if color_term.contains("truecolor") || color_term.contains("24bit") {
        return ColorCapability::Truecolor;
    }

    let term = env::var("TERM").unwrap_or_default().to_ascii_lowercase();
    if term.contains("truecolor") || term.contains("direct") {
        return ColorCapability::Truecolor;
    }

    ColorCapability::Ansi256
}

fn parse_color_mode(value: &str) -> Option<ColorCapability> {
    match value.to_ascii_lowercase().as_str() {
        "truecolor" | "24bit" => Some(ColorCapability::Truecolor),
        "ansi256" | "256" | "8bit" => Some(ColorCapability::Ansi256),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_terminal<F: FnOnce()>(color_mode: Option<&str>, theme: Option<&str>, test: F) {
        temp_env::with_vars(
            [
                (COLOR_MODE_ENV, color_mode),
                (THEME_ENV, theme),
                (FORCE_TRUECOLOR_ENV, None),
                ("COLORTERM", None),
                ("TERM", Some("xterm-256color")),
            ],
            test,
        );
    }

    #[test]
    fn ansi_terminals_get_the_fallback() {
        with_terminal(None, Some("nord"), || {
            assert_eq!(load(Some("nord"), Some("nord")).definition.id, "ansi256");
        });
    }

    #[test]
    fn explicit_choice_beats_environment_and_preference() {
        with_terminal(Some("truecolor"), Some("dracula"), || {
            assert_eq!(load(Some("nord"), Some("dracula")).definition.id, "nord");
            assert_eq!(load(None, Some("nord")).definition.id, "dracula");
        });
    }

    #[test]
    fn unknown_names_fall_through_to_the_default() {
        with_terminal(Some("24bit"), Some("solarized"), || {
            assert_eq!(load(None, Some("nord")).definition.id, "nord");
            assert_eq!(load(Some("bogus"), None).definition.id, "dracula");
        });
    }
}
