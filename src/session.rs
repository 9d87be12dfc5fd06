use std::collections::VecDeque;
use std::time::Instant;

use crate::ai;
use crate::collision::{self, Obstacle};
use crate::geometry::{Bounds, Heading};
use crate::player::{Autopilot, Control, Player, PlayerSlot};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Menu,
    Playing,
    GameOver,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    TwoPlayer,
    VersusComputer,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Winner {
    Player(PlayerSlot),
    Tie,
}

/// One run of the game: phase, both cycles, and the queued steering input.
///
/// Everything the simulation touches lives here; the outer loop owns the
/// clock and the playfield size and passes them in.
#[derive(Debug)]
pub struct GameSession {
    phase: Phase,
    mode: Mode,
    players: Option<[Player; 2]>,
    winner: Option<Winner>,
    game_over_at: Option<Instant>,
    commands: VecDeque<(PlayerSlot, Heading)>,
    ticks: u64,
    ai_decision_interval: u32,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSession {
    pub fn new() -> Self {
        GameSession {
            phase: Phase::Menu,
            mode: Mode::TwoPlayer,
            players: None,
            winner: None,
            game_over_at: None,
            commands: VecDeque::new(),
            ticks: 0,
            ai_decision_interval: 0,
        }
    }

    /// How many ticks the computer waits between decisions. 0 means every tick.
    pub fn with_ai_decision_interval(mut self, ticks: u32) -> Self {
        self.ai_decision_interval = ticks;
        self
    }

    /// Starts a round with explicit cycles instead of the default layout.
    pub fn from_players(mode: Mode, player_one: Player, player_two: Player) -> Self {
        let mut session = Self::new();
        session.mode = mode;
        session.begin_round([player_one, player_two]);
        session
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn players(&self) -> Option<&[Player; 2]> {
        self.players.as_ref()
    }

    pub fn player(&self, slot: PlayerSlot) -> Option<&Player> {
        self.players.as_ref().map(|players| &players[slot.index()])
    }

    pub fn winner(&self) -> Option<Winner> {
        self.winner
    }

    pub fn winner_name(&self) -> Option<&'static str> {
        match self.winner? {
            Winner::Tie => Some("Tie"),
            Winner::Player(slot) => self.player(slot).map(Player::name),
        }
    }

    pub fn game_over_at(&self) -> Option<Instant> {
        self.game_over_at
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn pending_commands(&self) -> usize {
        self.commands.len()
    }

    pub fn start(&mut self, mode: Mode, bounds: Bounds) {
        self.mode = mode;
        let players = self.starting_players(bounds);
        self.begin_round(players);
        tracing::info!(?mode, width = bounds.width, height = bounds.height, "round started");
    }

    /// Replays the current mode from fresh start positions.
    pub fn restart(&mut self, bounds: Bounds) {
        self.start(self.mode, bounds);
    }

    pub fn to_menu(&mut self) {
        self.phase = Phase::Menu;
        self.commands.clear();
        tracing::info!("returned to menu");
    }

    /// Queues a turn for the next tick. Only human-controlled cycles accept
    /// queued turns; returns whether the command was kept.
    pub fn enqueue(&mut self, slot: PlayerSlot, heading: Heading) -> bool {
        if self.phase != Phase::Playing {
            return false;
        }
        let accepted = self
            .player(slot)
            .is_some_and(|player| !player.is_computer());
        if accepted {
            self.commands.push_back((slot, heading));
        }
        accepted
    }

    /// Advances one frame. Does nothing outside [`Phase::Playing`].
    pub fn tick(&mut self, bounds: Bounds, now: Instant) {
        if self.phase != Phase::Playing {
            return;
        }
        let Some([one, two]) = self.players.as_mut() else {
            return;
        };
        self.ticks += 1;

        while let Some((slot, heading)) = self.commands.pop_front() {
            match slot {
                PlayerSlot::One => one.change_direction(heading),
                PlayerSlot::Two => two.change_direction(heading),
            }
        }

        if one.autopilot_due() {
            ai::steer(one, two, bounds);
        }
        if two.autopilot_due() {
            ai::steer(two, one, bounds);
        }

        one.advance();
        two.advance();

        let hit_one = collision::detect(one, two, bounds);
        let hit_two = collision::detect(two, one, bounds);
        crash_on(one, hit_one);
        crash_on(two, hit_two);

        let winner = match (one.is_alive(), two.is_alive()) {
            (true, true) => {
                tracing::trace!(tick = self.ticks, "tick");
                return;
            },
            (false, false) => Winner::Tie,
            (true, false) => Winner::Player(PlayerSlot::One),
            (false, true) => Winner::Player(PlayerSlot::Two),
        };

        self.phase = Phase::GameOver;
        self.winner = Some(winner);
        self.game_over_at = Some(now);
        self.commands.clear();
        tracing::info!(?winner, ticks = self.ticks, "game over");
    }

    fn begin_round(&mut self, players: [Player; 2]) {
        self.players = Some(players);
        self.phase = Phase::Playing;
        self.winner = None;
        self.game_over_at = None;
        self.commands.clear();
        self.ticks = 0;
    }

    fn starting_players(&self, bounds: Bounds) -> [Player; 2] {
        let one = Player::new(
            PlayerSlot::One,
            "Player 1",
            bounds.start_cell(1),
            Heading::Right,
            Control::Human,
        );
        let two = match self.mode {
            Mode::TwoPlayer => Player::new(
                PlayerSlot::Two,
                "Player 2",
                bounds.start_cell(3),
                Heading::Left,
                Control::Human,
            ),
            Mode::VersusComputer => Player::new(
                PlayerSlot::Two,
                "AI",
                bounds.start_cell(3),
                Heading::Left,
                Control::Computer(Autopilot::new(self.ai_decision_interval)),
            ),
        };
        [one, two]
    }
}

fn crash_on(player: &mut Player, obstacle: Option<Obstacle>) {
    if let Some(obstacle) = obstacle {
        tracing::debug!(player = player.name(), ?obstacle, position = ?player.position(), "crash");
        player.crash();
    }
}
