//! Cave generation
//!
//! A random walk from the map centre carves floor until the configured fill
//! ratio is reached. The walk never jumps, so every carved cell is connected
//! to every other.

use hashbrown::HashSet;

use super::{Direction, Dungeon, Position, Tile};
use crate::config::GameConfig;
use crate::rng::GameRng;

/// Generate the map and spawn points for `level`.
///
/// The level only affects how many enemies are requested; the carve itself
/// is the same at every depth.
pub fn generate_dungeon(level: u32, config: &GameConfig, rng: &mut GameRng) -> Dungeon {
    let mut dungeon = Dungeon::blank(config.width, config.height);
    let floor = carve(&mut dungeon, config.floor_target(), rng);

    // Walk order: first cell is the start, last is the exit
    let start = floor[0];
    let exit = floor[floor.len() - 1];
    dungeon.set_tile(exit, Tile::Exit);
    dungeon.start = start;
    dungeon.exit = exit;

    let candidates: Vec<Position> = floor
        .iter()
        .copied()
        .filter(|&p| p != start && p != exit)
        .collect();

    let enemy_count = config.enemy_count(level);
    let item_count = rng.range_inclusive(config.item_count_min, config.item_count_max) as usize;

    let mut taken: HashSet<Position> = HashSet::new();
    dungeon.enemy_spawns = pick_spawns(&candidates, enemy_count, &mut taken, config, rng);
    dungeon.item_spawns = pick_spawns(&candidates, item_count, &mut taken, config, rng);

    log::debug!(
        "generated level {}: {} floor tiles, {}/{} enemy spawns, {}/{} item spawns",
        level,
        floor.len(),
        dungeon.enemy_spawns.len(),
        enemy_count,
        dungeon.item_spawns.len(),
        item_count
    );

    dungeon
}

/// Random-walk carve. Returns floor cells in the order they were dug.
fn carve(dungeon: &mut Dungeon, target: usize, rng: &mut GameRng) -> Vec<Position> {
    let max_x = dungeon.width as i32 - 2;
    let max_y = dungeon.height as i32 - 2;
    let mut cursor = Position::new(dungeon.width as i32 / 2, dungeon.height as i32 / 2)
        .clamp_to(1, 1, max_x, max_y);

    let mut floor = Vec::with_capacity(target);
    dungeon.set_tile(cursor, Tile::Floor);
    floor.push(cursor);

    while floor.len() < target {
        let dir = Direction::ALL[rng.rn2(4) as usize];
        cursor = cursor.step(dir).clamp_to(1, 1, max_x, max_y);

        if dungeon.tile(cursor) == Some(Tile::Wall) {
            dungeon.set_tile(cursor, Tile::Floor);
            floor.push(cursor);
        }
    }

    floor
}

/// Choose up to `count` distinct cells not already in `taken`.
///
/// Each slot gets `spawn_attempts` samples; a slot that never lands on a
/// free cell is dropped.
fn pick_spawns(
    candidates: &[Position],
    count: usize,
    taken: &mut HashSet<Position>,
    config: &GameConfig,
    rng: &mut GameRng,
) -> Vec<Position> {
    let mut picked = Vec::with_capacity(count);
    if candidates.is_empty() {
        return picked;
    }

    for _ in 0..count {
        for _ in 0..config.spawn_attempts {
            let Some(&pos) = rng.choose(candidates) else {
                break;
            };
            if taken.insert(pos) {
                picked.push(pos);
                break;
            }
        }
    }

    picked
}
