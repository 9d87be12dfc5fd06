//! Reactive steering for computer-controlled cycles.
//!
//! A greedy one-step lookahead: every heading except a reversal is tried one
//! full step ahead, and the cycle keeps going straight whenever that is safe.

use crate::collision::overlaps_any;
use crate::geometry::{Bounds, Heading, STEP_DISTANCE};
use crate::player::Player;

/// Picks the heading for `me` given the pre-move state of both cycles.
///
/// Falls back to the first non-reversing heading in [`Heading::ALL`] order
/// when nothing is safe, accepting the crash.
pub fn decide(me: &Player, opponent: &Player, bounds: Bounds) -> Heading {
    let current = me.heading();
    let candidates: Vec<Heading> = Heading::ALL
        .into_iter()
        .filter(|heading| !heading.is_opposite(&current))
        .collect();

    let safe: Vec<Heading> = candidates
        .iter()
        .copied()
        .filter(|heading| is_safe(me, opponent, *heading, bounds))
        .collect();

    if safe.contains(&current) {
        current
    } else if let Some(first) = safe.first() {
        *first
    } else {
        candidates[0]
    }
}

/// Runs [`decide`] and applies the result through the normal turn rules.
pub fn steer(me: &mut Player, opponent: &Player, bounds: Bounds) {
    if !me.is_alive() {
        return;
    }
    let heading = decide(me, opponent, bounds);
    if heading != me.heading() {
        tracing::trace!(player = me.name(), ?heading, "autopilot turn");
    }
    me.change_direction(heading);
}

fn is_safe(me: &Player, opponent: &Player, heading: Heading, bounds: Bounds) -> bool {
    let next = me.position().stepped(heading, STEP_DISTANCE);
    bounds.contains(&next)
        && !overlaps_any(&next, me.trail().iter_body())
        && !overlaps_any(&next, opponent.trail().iter())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Cell;
    use crate::player::{Autopilot, Control, PlayerSlot};

    const BOUNDS: Bounds = Bounds::new(600.0, 400.0);

    fn bot(x: f32, y: f32, heading: Heading) -> Player {
        Player::new(
            PlayerSlot::Two,
            "AI",
            Cell::new(x, y),
            heading,
            Control::Computer(Autopilot::every_tick()),
        )
    }

    fn human(x: f32, y: f32, heading: Heading) -> Player {
        Player::new(PlayerSlot::One, "Player 1", Cell::new(x, y), heading, Control::Human)
    }

    #[test]
    fn keeps_straight_when_straight_is_safe() {
        let me = bot(300.0, 200.0, Heading::Left);
        let other = human(40.0, 40.0, Heading::Right);
        // Right is excluded as a reversal; Down and Up are also safe.
        assert_eq!(decide(&me, &other, BOUNDS), Heading::Left);
    }

    #[test]
    fn turns_in_enumeration_order_at_a_wall() {
        let me = bot(580.0, 200.0, Heading::Right);
        let other = human(40.0, 40.0, Heading::Right);
        // Right would leave the arena, Left is a reversal: Down comes next.
        assert_eq!(decide(&me, &other, BOUNDS), Heading::Down);
    }

    #[test]
    fn avoids_opponent_trail() {
        let me = bot(300.0, 200.0, Heading::Left);
        let other = human(270.0, 200.0, Heading::Up);
        assert_eq!(decide(&me, &other, BOUNDS), Heading::Down);
    }

    #[test]
    fn cornered_bot_takes_first_candidate() {
        // Bottom-right corner heading down: Right and Down leave the arena,
        // Up is a reversal, and the opponent blocks Left.
        let me = bot(580.0, 380.0, Heading::Down);
        let other = human(550.0, 380.0, Heading::Up);
        assert_eq!(decide(&me, &other, BOUNDS), Heading::Right);
    }

    #[test]
    fn steer_leaves_dead_bot_untouched() {
        let mut me = bot(580.0, 200.0, Heading::Right);
        me.crash();
        let other = human(40.0, 40.0, Heading::Right);
        steer(&mut me, &other, BOUNDS);
        assert_eq!(me.heading(), Heading::Right);
    }

    #[test]
    fn steer_applies_decision() {
        let mut me = bot(580.0, 200.0, Heading::Right);
        let other = human(40.0, 40.0, Heading::Right);
        steer(&mut me, &other, BOUNDS);
        assert_eq!(me.heading(), Heading::Down);
    }
}
