//! Enemy AI
//!
//! Enemies next to the player attack; enemies within aggro range take one
//! greedy step toward the player; everything else holds still.

use super::Enemy;
use crate::dungeon::{Direction, Dungeon, Position};

/// What an enemy does on its turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiAction {
    /// Adjacent: hit the player
    AttackPlayer,
    /// Stepped to a new cell
    Moved(Position),
    /// Stayed put (out of range, or the step was blocked)
    Held,
}

/// Greedy step toward `target`: close the x gap first, then the y gap.
///
/// Returns None when already on the target.
pub fn chase_direction(from: Position, target: Position) -> Option<Direction> {
    if from.x < target.x {
        Some(Direction::East)
    } else if from.x > target.x {
        Some(Direction::West)
    } else if from.y < target.y {
        Some(Direction::South)
    } else if from.y > target.y {
        Some(Direction::North)
    } else {
        None
    }
}

/// Decide one enemy's action.
///
/// `occupied` reports cells that already hold the player or another enemy
/// for this phase; the enemy never steps into one of those or into a wall.
pub fn decide(
    enemy: &Enemy,
    player: Position,
    dungeon: &Dungeon,
    aggro_range: i32,
    occupied: impl Fn(Position) -> bool,
) -> AiAction {
    let dist = enemy.pos.distance(player);

    if dist == 1 {
        return AiAction::AttackPlayer;
    }
    if dist == 0 || dist > aggro_range {
        return AiAction::Held;
    }

    let Some(dir) = chase_direction(enemy.pos, player) else {
        return AiAction::Held;
    };
    let next = enemy.pos.step(dir);

    if dungeon.is_walkable(next) && !occupied(next) {
        AiAction::Moved(next)
    } else {
        AiAction::Held
    }
}
