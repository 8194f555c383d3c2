//! Enemy instances and the enemy factory

use serde::{Deserialize, Serialize};

use super::species::{Species, unlocked_tiers};
use crate::combat::Stats;
use crate::config::GameConfig;
use crate::dungeon::Position;
use crate::rng::GameRng;

/// Identifier for an enemy, unique within its level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EnemyId(pub u32);

/// A live enemy on the current level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enemy {
    pub id: EnemyId,
    /// Index into the species catalog
    pub tier: usize,
    /// Level the enemy was scaled for
    pub level: u32,
    pub name: String,
    pub glyph: char,
    pub pos: Position,
    pub stats: Stats,
}

impl Enemy {
    /// Instantiate `species` scaled to `level`.
    ///
    /// hp grows by `enemy_hp_growth_percent` per level past the first
    /// (floored); attack gains 1 every `enemy_attack_growth_levels` levels.
    pub fn from_species(
        id: EnemyId,
        tier: usize,
        species: &Species,
        level: u32,
        pos: Position,
        config: &GameConfig,
    ) -> Self {
        let depth = level.saturating_sub(1) as i32;
        let hp = (species.hp * (100 + config.enemy_hp_growth_percent * depth) / 100).max(1);
        let attack = species.attack + depth / config.enemy_attack_growth_levels.max(1);

        Self {
            id,
            tier,
            level,
            name: species.name.clone(),
            glyph: species.glyph,
            pos,
            stats: Stats::new(hp, attack, 0),
        }
    }
}

/// Create one enemy per position.
///
/// Each enemy independently draws its species uniformly from the species
/// unlocked at `level`.
pub fn spawn_enemies(
    level: u32,
    positions: &[Position],
    config: &GameConfig,
    rng: &mut GameRng,
) -> Vec<Enemy> {
    let mut pool = unlocked_tiers(&config.species, level);
    if pool.is_empty() && !config.species.is_empty() {
        pool.push(0);
    }

    positions
        .iter()
        .enumerate()
        .filter_map(|(idx, &pos)| {
            let tier = *rng.choose(&pool)?;
            let species = config.species.get(tier)?;
            Some(Enemy::from_species(
                EnemyId(idx as u32),
                tier,
                species,
                level,
                pos,
                config,
            ))
        })
        .collect()
}
