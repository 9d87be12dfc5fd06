use crate::geometry::{Cell, Heading, STEP_DISTANCE};
use crate::trail::Trail;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlayerSlot {
    One,
    Two,
}

impl PlayerSlot {
    pub fn index(&self) -> usize {
        match self {
            PlayerSlot::One => 0,
            PlayerSlot::Two => 1,
        }
    }
}

/// Who decides where a cycle goes.
#[derive(Clone, Debug, PartialEq)]
pub enum Control {
    /// Fed from the session's command queue.
    Human,
    Computer(Autopilot),
}

/// Gate for how often the AI re-plans. An interval of 0 or 1 means every tick.
#[derive(Clone, Debug, PartialEq)]
pub struct Autopilot {
    interval_ticks: u32,
    countdown: u32,
}

impl Autopilot {
    pub fn new(interval_ticks: u32) -> Self {
        Autopilot {
            interval_ticks,
            countdown: 0,
        }
    }

    pub fn every_tick() -> Self {
        Self::new(0)
    }

    /// Consumes one tick of the interval; true when a decision is due.
    pub fn ready(&mut self) -> bool {
        if self.countdown == 0 {
            self.countdown = self.interval_ticks.saturating_sub(1);
            true
        } else {
            self.countdown -= 1;
            false
        }
    }
}

#[derive(Clone, Debug)]
pub struct Player {
    slot: PlayerSlot,
    name: &'static str,
    heading: Heading,
    alive: bool,
    trail: Trail,
    control: Control,
}

impl Player {
    pub fn new(
        slot: PlayerSlot,
        name: &'static str,
        start: Cell,
        heading: Heading,
        control: Control,
    ) -> Self {
        Player {
            slot,
            name,
            heading,
            alive: true,
            trail: Trail::new(start),
            control,
        }
    }

    pub fn slot(&self) -> PlayerSlot {
        self.slot
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn position(&self) -> Cell {
        self.trail.head()
    }

    pub fn heading(&self) -> Heading {
        self.heading
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn trail(&self) -> &Trail {
        &self.trail
    }

    pub fn control(&self) -> &Control {
        &self.control
    }

    pub fn is_computer(&self) -> bool {
        matches!(self.control, Control::Computer(_))
    }

    /// Ticks the autopilot gate. Always false for human players.
    pub fn autopilot_due(&mut self) -> bool {
        match &mut self.control {
            Control::Computer(autopilot) => autopilot.ready(),
            Control::Human => false,
        }
    }

    pub fn advance(&mut self) {
        if !self.alive {
            return;
        }
        let next = self.position().stepped(self.heading, STEP_DISTANCE);
        self.trail.push(next);
    }

    /// Silently ignores a reversal; a cycle cannot turn back into itself.
    pub fn change_direction(&mut self, heading: Heading) {
        if !self.alive || heading.is_opposite(&self.heading) {
            return;
        }
        self.heading = heading;
    }

    pub fn crash(&mut self) {
        self.alive = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::TRAIL_CAPACITY;

    fn human(x: f32, y: f32, heading: Heading) -> Player {
        Player::new(PlayerSlot::One, "Player 1", Cell::new(x, y), heading, Control::Human)
    }

    #[test]
    fn advance_steps_one_and_a_half_cells() {
        let mut player = human(100.0, 200.0, Heading::Right);
        player.advance();
        assert_eq!(player.position(), Cell::new(130.0, 200.0));
        assert_eq!(player.trail().len(), 2);
    }

    #[test]
    fn reversal_is_rejected() {
        let mut player = human(100.0, 200.0, Heading::Right);
        player.change_direction(Heading::Left);
        assert_eq!(player.heading(), Heading::Right);
        player.change_direction(Heading::Up);
        assert_eq!(player.heading(), Heading::Up);
        player.change_direction(Heading::Left);
        assert_eq!(player.heading(), Heading::Left);
    }

    #[test]
    fn dead_player_is_frozen() {
        let mut player = human(100.0, 200.0, Heading::Right);
        player.advance();
        player.crash();
        player.crash();
        let position = player.position();
        let len = player.trail().len();

        player.advance();
        player.change_direction(Heading::Up);

        assert!(!player.is_alive());
        assert_eq!(player.position(), position);
        assert_eq!(player.heading(), Heading::Right);
        assert_eq!(player.trail().len(), len);
    }

    #[test]
    fn autopilot_interval_gates_decisions() {
        let mut every = Autopilot::every_tick();
        assert!((0..5).all(|_| every.ready()));

        let mut third = Autopilot::new(3);
        let pattern: Vec<bool> = (0..7).map(|_| third.ready()).collect();
        assert_eq!(pattern, vec![true, false, false, true, false, false, true]);
    }

    #[test]
    fn humans_never_trigger_autopilot() {
        let mut player = human(0.0, 0.0, Heading::Down);
        assert!(!player.autopilot_due());
        assert!(!player.is_computer());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn heading() -> impl Strategy<Value = Heading> {
            prop::sample::select(Heading::ALL.to_vec())
        }

        proptest! {
            #[test]
            fn heading_never_reverses(turns in prop::collection::vec(heading(), 0..64)) {
                let mut player = human(500.0, 500.0, Heading::Right);
                for turn in turns {
                    let before = player.heading();
                    player.change_direction(turn);
                    prop_assert!(!player.heading().is_opposite(&before));
                }
            }

            #[test]
            fn trail_grows_by_one_until_capped(moves in 0usize..1200) {
                let mut player = human(0.0, 0.0, Heading::Right);
                for _ in 0..moves {
                    let before = player.trail().len();
                    player.advance();
                    let expected = (before + 1).min(TRAIL_CAPACITY);
                    prop_assert_eq!(player.trail().len(), expected);
                }
                prop_assert_eq!(player.trail().len(), (moves + 1).min(player.trail().capacity()));
            }
        }
    }
}
