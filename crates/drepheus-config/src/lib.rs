//! Configuration file handling for drepheus.
//!
//! The config lives at `<config dir>/drepheus/config.toml`. Every key is
//! optional; a missing file means defaults.

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    time::Duration,
};

use directories::ProjectDirs;
use drepheus_core::{ColorTheme, GlyphSet, RainSpeed};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Name of the config file inside the config directory.
pub const CONFIG_FILE: &str = "config.toml";

/// Errors while loading the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config TOML in {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid config value for `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Rain appearance and timing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RainConfig {
    /// Word the rain locks in.
    pub word: String,
    pub theme: ColorTheme,
    pub speed: RainSpeed,
    pub glyphs: GlyphSet,
    /// Time between frame callbacks.
    pub frame_interval_ms: u64,
    pub fade_alpha: f32,
    pub lock_chance: f32,
    pub glow_chance: f32,
    pub glow_decay: f32,
    pub max_restart_gap: u32,
}

impl Default for RainConfig {
    fn default() -> Self {
        Self {
            word: "Drepheus".to_string(),
            theme: ColorTheme::Neon,
            speed: RainSpeed::Normal,
            glyphs: GlyphSet::Classic,
            frame_interval_ms: 16,
            fade_alpha: 0.05,
            lock_chance: 0.5,
            glow_chance: 0.02,
            glow_decay: 0.03,
            max_restart_gap: 30,
        }
    }
}

/// Password gate in front of the invite link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PortalConfig {
    pub password: String,
    pub invite_url: String,
    /// How long "ACCESS DENIED" stays up after a wrong password.
    pub denied_ms: u64,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            password: "10".to_string(),
            invite_url: "https://discord.gg/ffRr5JxNyf".to_string(),
            denied_ms: 2000,
        }
    }
}

/// Full application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub rain: RainConfig,
    pub portal: PortalConfig,
}

impl Config {
    /// Default config file location, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "drepheus").map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    /// Load from the default location, falling back to defaults.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => {
                tracing::debug!("no config directory, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Load from `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "config file not found, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let config: Config = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let rain = &self.rain;
        if rain.word.trim().is_empty() {
            return Err(invalid("rain.word", "must not be empty"));
        }
        if rain.word.chars().any(char::is_control) {
            return Err(invalid("rain.word", "must not contain control characters"));
        }
        if rain.frame_interval_ms == 0 {
            return Err(invalid("rain.frame_interval_ms", "must be at least 1"));
        }
        for (key, value) in [
            ("rain.fade_alpha", rain.fade_alpha),
            ("rain.lock_chance", rain.lock_chance),
            ("rain.glow_chance", rain.glow_chance),
            ("rain.glow_decay", rain.glow_decay),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(invalid(key, format!("{value} is outside 0.0..=1.0")));
            }
        }
        if self.portal.invite_url.trim().is_empty() {
            return Err(invalid("portal.invite_url", "must not be empty"));
        }
        Ok(())
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.rain.frame_interval_ms)
    }

    pub fn denied_for(&self) -> Duration {
        Duration::from_millis(self.portal.denied_ms)
    }
}

fn invalid(key: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        key,
        reason: reason.into(),
    }
}
