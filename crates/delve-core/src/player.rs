//! The player character

use serde::{Deserialize, Serialize};

use crate::combat::Stats;
use crate::config::GameConfig;
use crate::consts::PLAYER_SYM;
use crate::dungeon::Position;
use crate::object::{Item, ItemKind};

/// The hero
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub glyph: char,
    pub pos: Position,
    pub stats: Stats,
}

impl Player {
    /// Fresh hero with the configured starting stats
    pub fn new(config: &GameConfig, pos: Position) -> Self {
        Self {
            name: "Hero".to_string(),
            glyph: PLAYER_SYM,
            pos,
            stats: Stats::new(config.player_hp, config.player_attack, config.player_defense),
        }
    }

    pub fn is_dead(&self) -> bool {
        self.stats.is_dead()
    }

    /// Apply an item's effect. Heals are capped at max hp; boosts are
    /// permanent.
    pub fn apply_item(&mut self, item: &Item) {
        match item.kind {
            ItemKind::Heal => {
                self.stats.heal(item.magnitude);
            }
            ItemKind::AttackBoost => self.stats.attack += item.magnitude,
            ItemKind::DefenseBoost => self.stats.defense += item.magnitude,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::ItemId;

    fn item(kind: ItemKind, magnitude: i32) -> Item {
        Item {
            id: ItemId(0),
            pos: Position::new(1, 1),
            kind,
            magnitude,
            name: "test".to_string(),
            glyph: '$',
        }
    }

    #[test]
    fn test_starting_stats() {
        let p = Player::new(&GameConfig::default(), Position::new(3, 4));
        assert_eq!(p.stats, Stats::new(100, 5, 0));
        assert_eq!(p.pos, Position::new(3, 4));
        assert_eq!(p.glyph, '@');
    }

    #[test]
    fn test_apply_items() {
        let mut p = Player::new(&GameConfig::default(), Position::new(1, 1));
        p.stats.hp = 60;
        p.apply_item(&item(ItemKind::Heal, 25));
        assert_eq!(p.stats.hp, 85);
        p.apply_item(&item(ItemKind::Heal, 25));
        assert_eq!(p.stats.hp, 100);
        p.apply_item(&item(ItemKind::AttackBoost, 2));
        p.apply_item(&item(ItemKind::DefenseBoost, 1));
        assert_eq!(p.stats.attack, 7);
        assert_eq!(p.stats.defense, 1);
    }
}
