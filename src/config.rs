use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::error::AppError;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "LITECYCLES_CONFIG";
/// Config file picked up from the working directory when present.
pub const DEFAULT_CONFIG_PATH: &str = "config/litecycles.toml";

/// Window and loop settings. Game rules are fixed and not configurable.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Windowed-mode width in pixels.
    pub window_width: f32,
    /// Windowed-mode height in pixels.
    pub window_height: f32,
    /// Simulation ticks per second; one tick per frame.
    pub target_fps: u32,
    /// Open in desktop fullscreen instead of a window.
    pub start_fullscreen: bool,
    /// Ticks between computer decisions. 0 re-plans every tick.
    pub ai_decision_interval_ticks: u32,
    /// Crash sound and background hum.
    pub sound_enabled: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            window_width: 1400.0,
            window_height: 900.0,
            target_fps: 60,
            start_fullscreen: false,
            ai_decision_interval_ticks: 0,
            sound_enabled: true,
        }
    }
}

impl AppConfig {
    /// Loads from `$LITECYCLES_CONFIG`, then `config/litecycles.toml`,
    /// falling back to defaults when neither is present.
    pub fn load() -> Result<Self, AppError> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Self::from_file(Path::new(&path));
        }
        let fallback = Path::new(DEFAULT_CONFIG_PATH);
        if fallback.exists() {
            return Self::from_file(fallback);
        }
        tracing::debug!("no config file found, using defaults");
        Ok(Self::default())
    }

    pub fn from_file(path: &Path) -> Result<Self, AppError> {
        let contents = std::fs::read_to_string(path).map_err(|source| AppError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::parse(&contents).map_err(|err| match err {
            ParseError::Toml(source) => AppError::ConfigParse {
                path: PathBuf::from(path),
                source,
            },
            ParseError::Value(message) => AppError::ConfigValue(message),
        })?;
        tracing::info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    fn parse(contents: &str) -> Result<Self, ParseError> {
        let config: Self = toml::from_str(contents)?;
        config.validate().map_err(ParseError::Value)?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), String> {
        if self.target_fps == 0 {
            return Err("target_fps must be at least 1".to_string());
        }
        if self.window_width <= 0.0 || self.window_height <= 0.0 {
            return Err(format!(
                "window size must be positive, got {}x{}",
                self.window_width, self.window_height
            ));
        }
        Ok(())
    }
}

#[derive(Error, Debug)]
enum ParseError {
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
    #[error("{0}")]
    Value(String),
}
