use std::path::PathBuf;

use thiserror::Error;

/// Failures that stop the game before or while the window is set up.
///
/// The simulation itself never fails; crashes and invalid commands are state.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("graphics error: {0}")]
    Graphics(#[from] ggez::GameError),

    #[error("failed to read config {}: {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config {}: {source}", .path.display())]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("invalid config value: {0}")]
    ConfigValue(String),
}
