//! Reader configuration.
//!
//! Values are layered: built-in defaults, then `LECTERN_*` environment
//! variables, then whatever the command line sets explicitly through
//! [`ReaderConfig::apply_overrides`].

use std::env;
use std::time::Duration;

use lectern_sync::{InvalidThreshold, ObserverConfig, PolicyKind, ScrollBehavior, UnknownPolicy};
use thiserror::Error;

pub const THRESHOLD_ENV: &str = "LECTERN_THRESHOLD";
pub const POLICY_ENV: &str = "LECTERN_POLICY";
pub const SCROLL_MARGIN_ENV: &str = "LECTERN_SCROLL_MARGIN";
pub const SMOOTH_SCROLL_MS_ENV: &str = "LECTERN_SMOOTH_SCROLL_MS";
pub const SIDEBAR_MIN_WIDTH_ENV: &str = "LECTERN_SIDEBAR_MIN_WIDTH";

const DEFAULT_SCROLL_MARGIN: u16 = 1;
const DEFAULT_SMOOTH_SCROLL: Duration = Duration::from_millis(320);
const DEFAULT_SIDEBAR_MIN_WIDTH: u16 = 90;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error(transparent)]
    Threshold(#[from] InvalidThreshold),
    #[error(transparent)]
    Policy(#[from] UnknownPolicy),
    #[error("{key} must be a number, got '{value}'")]
    InvalidNumber { key: &'static str, value: String },
}

/// Settings that shape scroll tracking and layout in the reader.
#[derive(Debug, Clone, PartialEq)]
pub struct ReaderConfig {
    pub observer: ObserverConfig,
    pub policy: PolicyKind,
    /// Rows kept above a section when scrolling to it, leaving room for the header.
    pub scroll_margin: u16,
    /// Duration of the smooth-scroll animation. Zero jumps instantly.
    pub smooth_scroll: Duration,
    /// Narrower terminals hide the sidebar and rely on the popover menu.
    pub sidebar_min_width: u16,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            observer: ObserverConfig::default(),
            policy: PolicyKind::default(),
            scroll_margin: DEFAULT_SCROLL_MARGIN,
            smooth_scroll: DEFAULT_SMOOTH_SCROLL,
            sidebar_min_width: DEFAULT_SIDEBAR_MIN_WIDTH,
        }
    }
}

/// Explicit values from the command line; `None` keeps the lower layer.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub threshold: Option<f32>,
    pub policy: Option<PolicyKind>,
    pub scroll_margin: Option<u16>,
    pub smooth_scroll_ms: Option<u64>,
    pub sidebar_min_width: Option<u16>,
}

impl ReaderConfig {
    /// Defaults overlaid with any `LECTERN_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(value) = env_value(THRESHOLD_ENV) {
            config.observer = ObserverConfig::new(parse_number(THRESHOLD_ENV, &value)?)?;
        }
        if let Some(value) = env_value(POLICY_ENV) {
            config.policy = value.parse()?;
        }
        if let Some(value) = env_value(SCROLL_MARGIN_ENV) {
            config.scroll_margin = parse_number(SCROLL_MARGIN_ENV, &value)?;
        }
        if let Some(value) = env_value(SMOOTH_SCROLL_MS_ENV) {
            config.smooth_scroll = Duration::from_millis(parse_number(SMOOTH_SCROLL_MS_ENV, &value)?);
        }
        if let Some(value) = env_value(SIDEBAR_MIN_WIDTH_ENV) {
            config.sidebar_min_width = parse_number(SIDEBAR_MIN_WIDTH_ENV, &value)?;
        }
        Ok(config)
    }

    pub fn apply_overrides(mut self, overrides: &ConfigOverrides) -> Result<Self, ConfigError> {
        if let Some(threshold) = overrides.threshold {
            self.observer = ObserverConfig::new(threshold)?;
        }
        if let Some(policy) = overrides.policy {
            self.policy = policy;
        }
        if let Some(margin) = overrides.scroll_margin {
            self.scroll_margin = margin;
        }
        if let Some(millis) = overrides.smooth_scroll_ms {
            self.smooth_scroll = Duration::from_millis(millis);
        }
        if let Some(width) = overrides.sidebar_min_width {
            self.sidebar_min_width = width;
        }
        Ok(self)
    }

    /// Jumps are instant when smooth scrolling is switched off.
    pub fn scroll_behavior(&self) -> ScrollBehavior {
        if self.smooth_scroll.is_zero() {
            ScrollBehavior::Instant
        } else {
            ScrollBehavior::Smooth
        }
    }
}

fn env_value(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_number<T: std::str::FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value.parse::<T>().map_err(|_| ConfigError::InvalidNumber {
        key,
        value: value.to_string(),
    })
}
