use ggez::input::keyboard::KeyCode;

use crate::geometry::{Bounds, Heading};
use crate::player::PlayerSlot;
use crate::session::{GameSession, Mode, Phase};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Steer(PlayerSlot, Heading),
    SelectMode(Mode),
    Restart,
    ToMenu,
    ToggleDisplay,
    Quit,
}

/// What the caller has to do after a command was routed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// A fresh round was set up.
    Reset,
    /// Steering was queued for the next tick.
    Queued,
    ToMenu,
    /// Not applicable in the current phase; dropped.
    Ignored,
    ToggleDisplay,
    Quit,
}

/// Default bindings: arrows steer player one, WASD steer player two.
pub fn command_for_key(key: KeyCode) -> Option<Command> {
    let command = match key {
        KeyCode::Up => Command::Steer(PlayerSlot::One, Heading::Up),
        KeyCode::Down => Command::Steer(PlayerSlot::One, Heading::Down),
        KeyCode::Left => Command::Steer(PlayerSlot::One, Heading::Left),
        KeyCode::Right => Command::Steer(PlayerSlot::One, Heading::Right),
        KeyCode::W => Command::Steer(PlayerSlot::Two, Heading::Up),
        KeyCode::S => Command::Steer(PlayerSlot::Two, Heading::Down),
        KeyCode::A => Command::Steer(PlayerSlot::Two, Heading::Left),
        KeyCode::D => Command::Steer(PlayerSlot::Two, Heading::Right),
        KeyCode::Key1 => Command::SelectMode(Mode::TwoPlayer),
        KeyCode::Key2 => Command::SelectMode(Mode::VersusComputer),
        KeyCode::R => Command::Restart,
        KeyCode::M => Command::ToMenu,
        KeyCode::F => Command::ToggleDisplay,
        KeyCode::Escape => Command::Quit,
        _ => return None,
    };
    Some(command)
}

/// Applies a command to the session according to its phase.
///
/// Steering is only queued here; it takes effect at the start of the next
/// tick. Display toggling and quitting are returned to the caller untouched
/// in every phase.
pub fn route(session: &mut GameSession, command: Command, bounds: Bounds) -> Outcome {
    match (session.phase(), command) {
        (_, Command::ToggleDisplay) => Outcome::ToggleDisplay,
        (_, Command::Quit) => Outcome::Quit,
        (Phase::Menu, Command::SelectMode(mode)) => {
            session.start(mode, bounds);
            Outcome::Reset
        },
        (Phase::GameOver, Command::Restart) => {
            session.restart(bounds);
            Outcome::Reset
        },
        (Phase::GameOver, Command::ToMenu) => {
            session.to_menu();
            Outcome::ToMenu
        },
        (Phase::Playing, Command::Steer(slot, heading)) if session.enqueue(slot, heading) => {
            Outcome::Queued
        },
        (phase, command) => {
            tracing::debug!(?phase, ?command, "ignored command");
            Outcome::Ignored
        },
    }
}
