//! Configuration management for Chorus
//!
//! Every field has a default, so a missing file or a partial file is fine.
//! Only a file that exists but cannot be read or parsed is an error.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub friend: FriendConfig,
    pub timeline: TimelineConfig,
    pub ui: UiConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FriendConfig {
    /// Upper bound offered by the age limit selector
    pub max_age_limit: u32,
    /// Upper bound offered by the show limit selector
    pub max_show_limit: usize,
    /// Initial age limit of each friend panel
    pub age_limits: [u32; 2],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineConfig {
    /// Simulated round-trip of the like request
    pub like_latency_ms: u64,
    /// Probability in `[0, 1]` that a like request fails
    pub like_failure_rate: f64,
    /// Quiet period before typed text is committed
    pub text_debounce_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub tick_rate_ms: u64,
    pub colors_enabled: bool,
}

impl Default for FriendConfig {
    fn default() -> Self {
        Self {
            max_age_limit: 45,
            max_show_limit: 8,
            age_limits: [25, 45],
        }
    }
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            like_latency_ms: 500,
            like_failure_rate: 0.0,
            text_debounce_ms: 500,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: 100,
            colors_enabled: true,
        }
    }
}

impl Config {
    /// Load configuration from the default location
    ///
    /// Falls back to defaults when no config file exists.
    pub fn load() -> Result<Self> {
        let config_path = resolve_config_path()?;
        if !config_path.exists() {
            tracing::debug!(path = %config_path.display(), "No config file, using defaults");
            return Ok(Self::default().with_env_overrides());
        }
        Ok(Self::load_from_path(&config_path)?.with_env_overrides())
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        let config: Config = toml::from_str(&content).map_err(ConfigError::ParseError)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the effects and views cannot work with
    pub fn validate(&self) -> Result<()> {
        let rate = self.timeline.like_failure_rate;
        if !(0.0..=1.0).contains(&rate) {
            return Err(ConfigError::Invalid(format!(
                "timeline.like_failure_rate must be within [0, 1], got {}",
                rate
            ))
            .into());
        }
        if self.friend.max_show_limit == 0 {
            return Err(
                ConfigError::Invalid("friend.max_show_limit must be at least 1".to_string()).into(),
            );
        }
        Ok(())
    }

    /// Apply `NO_COLOR`, `CHORUS_TUI_NO_COLOR` and `CHORUS_TUI_TICK_MS`
    pub fn with_env_overrides(mut self) -> Self {
        if std::env::var("NO_COLOR").is_ok() || std::env::var("CHORUS_TUI_NO_COLOR").is_ok() {
            self.ui.colors_enabled = false;
        }
        if let Some(tick) = std::env::var("CHORUS_TUI_TICK_MS")
            .ok()
            .and_then(|s| s.parse().ok())
        {
            self.ui.tick_rate_ms = tick;
        }
        self
    }
}

/// Config file path: `CHORUS_CONFIG`, else `<config_dir>/chorus/config.toml`
pub fn resolve_config_path() -> Result<PathBuf> {
    if let Ok(path) = std::env::var("CHORUS_CONFIG") {
        return Ok(PathBuf::from(shellexpand::tilde(&path).to_string()));
    }

    let config_dir = dirs::config_dir()
        .ok_or_else(|| ConfigError::MissingField("config directory".to_string()))?;

    Ok(config_dir.join("chorus").join("config.toml"))
}
