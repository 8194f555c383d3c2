//! Scripted player for headless runs
//!
//! Priorities each turn: hit an adjacent enemy, walk to the nearest heal
//! item when below half hp, otherwise walk to the exit. Waits when nothing
//! is reachable.

use std::collections::VecDeque;

use hashbrown::HashMap;

use delve_core::dungeon::{Direction, Position, Tile};
use delve_core::object::ItemKind;
use delve_core::{Intent, RunState};

/// Pick the next intent for `state`
pub fn choose_intent(state: &RunState) -> Intent {
    let me = state.player.pos;

    if let Some(dir) = Direction::ALL
        .into_iter()
        .find(|&d| state.enemy_at(me.step(d)).is_some())
    {
        return Intent::Move(dir);
    }

    let hurt = state.player.stats.hp * 2 < state.player.stats.max_hp;
    if hurt {
        let heals: Vec<Position> = state
            .items
            .iter()
            .filter(|i| i.kind == ItemKind::Heal)
            .map(|i| i.pos)
            .collect();
        if let Some(dir) = first_step(state, |p| heals.contains(&p)) {
            return Intent::Move(dir);
        }
    }

    let exit = state.dungeon.exit;
    match first_step(state, |p| p == exit) {
        Some(dir) => Intent::Move(dir),
        None => Intent::Wait,
    }
}

/// Breadth-first search from the player to the nearest cell matching `goal`.
///
/// Enemies block the search. The exit is only entered when it is the goal,
/// so detours never descend by accident.
fn first_step(state: &RunState, goal: impl Fn(Position) -> bool) -> Option<Direction> {
    let start = state.player.pos;
    let mut came_from: HashMap<Position, (Position, Direction)> = HashMap::new();
    let mut queue = VecDeque::from([start]);

    while let Some(current) = queue.pop_front() {
        if current != start && goal(current) {
            return rewind(&came_from, start, current);
        }

        for dir in Direction::ALL {
            let next = current.step(dir);
            if next == start || came_from.contains_key(&next) {
                continue;
            }
            let passable = match state.dungeon.tile(next) {
                Some(Tile::Floor) => true,
                Some(Tile::Exit) => goal(next),
                _ => false,
            };
            if !passable || state.enemy_at(next).is_some() {
                continue;
            }
            came_from.insert(next, (current, dir));
            queue.push_back(next);
        }
    }

    None
}

/// Walk the parent links back to the step taken out of `start`
fn rewind(
    came_from: &HashMap<Position, (Position, Direction)>,
    start: Position,
    mut at: Position,
) -> Option<Direction> {
    loop {
        let &(parent, dir) = came_from.get(&at)?;
        if parent == start {
            return Some(dir);
        }
        at = parent;
    }
}
