//! Two-player light cycle arcade game.
//!
//! The simulation (`geometry`, `trail`, `player`, `collision`, `ai`,
//! `session`, `input`) is plain data driven one tick at a time; `render`,
//! `audio` and `app` wire it to a ggez window.

pub mod ai;
pub mod app;
pub mod audio;
pub mod collision;
pub mod config;
pub mod error;
pub mod geometry;
pub mod input;
pub mod player;
pub mod render;
pub mod session;
pub mod trail;

pub use geometry::{Bounds, Cell, Heading};
pub use input::{Command, Outcome};
pub use player::{Control, Player, PlayerSlot};
pub use session::{GameSession, Mode, Phase, Winner};
