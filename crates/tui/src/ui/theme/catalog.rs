use super::{Ansi256Theme, DraculaTheme, NordTheme, Theme};

/// Describes a selectable theme.
#[derive(Clone, Copy, Debug)]
pub struct ThemeDefinition {
    /// Canonical identifier used for persistence.
    pub id: &'static str,
    pub label: &'static str,
    /// Theme aliases (e.g., env overrides) that map back to this definition.
    pub aliases: &'static [&'static str],
    /// Whether the palette targets ANSI/8-bit terminals.
    pub is_ansi_fallback: bool,
    factory: fn() -> Box<dyn Theme>,
}

impl ThemeDefinition {
    pub fn build(&self) -> Box<dyn Theme> {
        (self.factory)()
    }
}

const DRACULA: ThemeDefinition = ThemeDefinition {
    id: "dracula",
    label: "Dracula",
    aliases: &["dracula", "dark"],
    is_ansi_fallback: false,
    factory: || Box::new(DraculaTheme::new()),
};

const NORD: ThemeDefinition = ThemeDefinition {
    id: "nord",
    label: "Nord",
    aliases: &["nord", "polar"],
    is_ansi_fallback: false,
    factory: || Box::new(NordTheme::new()),
};

const ANSI256: ThemeDefinition = ThemeDefinition {
    id: "ansi256",
    label: "ANSI 256",
    aliases: &["ansi256", "ansi", "256"],
    is_ansi_fallback: true,
    factory: || Box::new(Ansi256Theme::new()),
};

/// Ordered list of themes; `t` cycles through them in this order.
pub const THEME_DEFINITIONS: &[ThemeDefinition] = &[DRACULA, NORD, ANSI256];

pub fn all() -> &'static [ThemeDefinition] {
    THEME_DEFINITIONS
}

/// Locate a definition by id or alias (case-insensitive).
pub fn resolve(name: &str) -> Option<&'static ThemeDefinition> {
    THEME_DEFINITIONS.iter().find(|definition| {
        definition.id.eq_ignore_ascii_case(name) || definition.aliases.iter().any(|alias| alias.eq_ignore_ascii_case(name))
    })
}

/// Preferred default for truecolor terminals.
pub fn default_truecolor() -> &'static ThemeDefinition {
    &DRACULA
}

/// Preferred default for ANSI-only terminals.
pub fn default_ansi() -> &'static ThemeDefinition {
    &ANSI256
}

/// The selectable theme after `id`, wrapping around. ANSI fallbacks are
/// skipped and unknown ids restart the cycle.
pub fn next_after(id: &str) -> &'static ThemeDefinition {
    let start = THEME_DEFINITIONS
        .iter()
        .position(|definition| definition.id == id)
        .map_or(0, |index| index + 1);
    THEME_DEFINITIONS
        .iter()
        .cycle()
        .skip(start)
        .take(THEME_DEFINITIONS.len())
        .find(|definition| !definition.is_ansi_fallback)
        .unwrap_or_else(default_truecolor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aliases_resolve_case_insensitively() {
        assert_eq!(resolve("NORD").map(|definition| definition.id), Some("nord"));
        assert_eq!(resolve("ansi").map(|definition| definition.id), Some("ansi256"));
        assert!(resolve("solarized").is_none());
    }

    #[test]
    fn cycling_wraps_around_selectable_themes() {
        assert_eq!(next_after("dracula").id, "nord");
        assert_eq!(next_after("nord").id, "dracula", "the ANSI fallback is not offered");
        assert_eq!(next_after("ansi256").id, "dracula");
        assert_eq!(next_after("unknown").id, "dracula");
        assert_eq!(all().len(), 3);
    }
}
