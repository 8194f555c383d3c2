//! Items and the item factory

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::config::GameConfig;
use crate::consts::ITEM_SYM;
use crate::dungeon::Position;
use crate::rng::GameRng;

/// What an item does when picked up
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
pub enum ItemKind {
    /// Restore hp, capped at max hp
    Heal,
    /// Permanent attack bonus
    AttackBoost,
    /// Permanent defense bonus
    DefenseBoost,
}

/// Catalog entry for an item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDef {
    pub name: String,
    pub kind: ItemKind,
    pub value: i32,
    /// Relative spawn weight
    pub weight: u32,
}

impl ItemDef {
    pub fn new(name: &str, kind: ItemKind, value: i32, weight: u32) -> Self {
        Self {
            name: name.to_string(),
            kind,
            value,
            weight,
        }
    }
}

/// The stock loot table
pub fn default_items() -> Vec<ItemDef> {
    vec![
        ItemDef::new("Health Potion", ItemKind::Heal, 25, 5),
        ItemDef::new("Whetstone", ItemKind::AttackBoost, 1, 3),
        ItemDef::new("Heavy Sword", ItemKind::AttackBoost, 2, 1),
        ItemDef::new("Leather Patch", ItemKind::DefenseBoost, 1, 3),
        ItemDef::new("Iron Plate", ItemKind::DefenseBoost, 2, 1),
    ]
}

/// Identifier for an item, unique within its level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemId(pub u32);

/// An item lying on the current level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub pos: Position,
    pub kind: ItemKind,
    pub magnitude: i32,
    pub name: String,
    pub glyph: char,
}

impl Item {
    /// Instantiate `def` scaled to `level`.
    ///
    /// Heals gain `heal_growth_per_level` per level past the first; stat
    /// boosts gain 1 every `stat_growth_levels` levels.
    pub fn from_def(id: ItemId, def: &ItemDef, level: u32, pos: Position, config: &GameConfig) -> Self {
        let depth = level.saturating_sub(1) as i32;
        let bonus = match def.kind {
            ItemKind::Heal => config.heal_growth_per_level * depth,
            ItemKind::AttackBoost | ItemKind::DefenseBoost => {
                depth / config.stat_growth_levels.max(1)
            }
        };

        Self {
            id,
            pos,
            kind: def.kind,
            magnitude: def.value + bonus,
            name: def.name.clone(),
            glyph: ITEM_SYM,
        }
    }
}

/// Create one item per position, each drawn by catalog weight
pub fn spawn_items(
    level: u32,
    positions: &[Position],
    config: &GameConfig,
    rng: &mut GameRng,
) -> Vec<Item> {
    let weights: Vec<u32> = config.items.iter().map(|def| def.weight).collect();

    positions
        .iter()
        .enumerate()
        .filter_map(|(idx, &pos)| {
            let def = config.items.get(rng.weighted_index(&weights)?)?;
            Some(Item::from_def(ItemId(idx as u32), def, level, pos, config))
        })
        .collect()
}
