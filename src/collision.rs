use crate::geometry::{Bounds, Cell};
use crate::player::Player;

/// What a crashed cycle ran into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Obstacle {
    Wall,
    OwnTrail,
    OpponentTrail,
}

/// Finds the first obstacle the player's head overlaps, checking the arena
/// edge, then the player's own trail, then the opponent's.
///
/// Dead players never collide. The player's own head is skipped; the
/// opponent's head is not, so two heads meeting is a crash for both.
pub fn detect(player: &Player, opponent: &Player, bounds: Bounds) -> Option<Obstacle> {
    if !player.is_alive() {
        return None;
    }
    let head = player.position();

    if !bounds.contains(&head) {
        return Some(Obstacle::Wall);
    }
    if overlaps_any(&head, player.trail().iter_body()) {
        return Some(Obstacle::OwnTrail);
    }
    if overlaps_any(&head, opponent.trail().iter()) {
        return Some(Obstacle::OpponentTrail);
    }
    None
}

pub fn check_collision(player: &Player, opponent: &Player, bounds: Bounds) -> bool {
    detect(player, opponent, bounds).is_some()
}

pub fn overlaps_any<'a>(cell: &Cell, cells: impl IntoIterator<Item = &'a Cell>) -> bool {
    cells.into_iter().any(|other| cell.overlaps(other))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Heading;
    use crate::player::{Control, PlayerSlot};

    const BOUNDS: Bounds = Bounds::new(400.0, 400.0);

    fn player(slot: PlayerSlot, x: f32, y: f32, heading: Heading) -> Player {
        Player::new(slot, "test", Cell::new(x, y), heading, Control::Human)
    }

    fn far_opponent() -> Player {
        player(PlayerSlot::Two, 10.0, 390.0, Heading::Up)
    }

    #[test]
    fn fresh_player_is_clear() {
        let me = player(PlayerSlot::One, 200.0, 200.0, Heading::Right);
        assert_eq!(detect(&me, &far_opponent(), BOUNDS), None);
    }

    #[test]
    fn reaching_the_far_edge_is_a_wall_hit() {
        // 340 + 2 * 30 = 400, exactly the width.
        let mut me = player(PlayerSlot::One, 340.0, 200.0, Heading::Right);
        me.advance();
        assert_eq!(detect(&me, &far_opponent(), BOUNDS), None);
        me.advance();
        assert_eq!(detect(&me, &far_opponent(), BOUNDS), Some(Obstacle::Wall));
    }

    #[test]
    fn leaving_through_the_origin_is_a_wall_hit() {
        let mut me = player(PlayerSlot::One, 20.0, 20.0, Heading::Up);
        me.advance();
        assert!(check_collision(&me, &far_opponent(), BOUNDS));
    }

    #[test]
    fn own_head_is_not_an_obstacle() {
        let mut me = player(PlayerSlot::One, 100.0, 100.0, Heading::Right);
        for _ in 0..5 {
            me.advance();
            assert!(!check_collision(&me, &far_opponent(), BOUNDS));
        }
    }

    #[test]
    fn tight_loop_hits_own_trail() {
        let mut me = player(PlayerSlot::One, 100.0, 100.0, Heading::Right);
        me.advance();
        me.change_direction(Heading::Down);
        me.advance();
        me.change_direction(Heading::Left);
        me.advance();
        me.change_direction(Heading::Up);
        me.advance();
        assert_eq!(detect(&me, &far_opponent(), BOUNDS), Some(Obstacle::OwnTrail));
    }

    #[test]
    fn opponent_head_counts() {
        let me = player(PlayerSlot::One, 200.0, 200.0, Heading::Right);
        let other = player(PlayerSlot::Two, 215.0, 190.0, Heading::Left);
        assert_eq!(detect(&me, &other, BOUNDS), Some(Obstacle::OpponentTrail));
    }

    #[test]
    fn wall_takes_precedence() {
        let me = player(PlayerSlot::One, 410.0, 200.0, Heading::Right);
        let other = player(PlayerSlot::Two, 410.0, 200.0, Heading::Left);
        assert_eq!(detect(&me, &other, BOUNDS), Some(Obstacle::Wall));
    }

    #[test]
    fn dead_players_do_not_collide() {
        let mut me = player(PlayerSlot::One, 500.0, 200.0, Heading::Right);
        me.crash();
        assert!(!check_collision(&me, &far_opponent(), BOUNDS));
    }
}
