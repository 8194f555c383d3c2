//! Combat stats and damage rules
//!
//! Melee always lands. Player blows ignore enemy defense; enemy blows are
//! reduced by the player's defense. Every hit deals at least 1.

use serde::{Deserialize, Serialize};

/// Hit points and combat ratings shared by the player and enemies.
///
/// `hp` stays within `0..=max_hp`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Stats {
    pub hp: i32,
    pub max_hp: i32,
    pub attack: i32,
    pub defense: i32,
}

impl Stats {
    /// Full-health stats
    pub const fn new(max_hp: i32, attack: i32, defense: i32) -> Self {
        Self {
            hp: max_hp,
            max_hp,
            attack,
            defense,
        }
    }

    pub const fn is_dead(&self) -> bool {
        self.hp <= 0
    }

    /// Subtract `damage`, flooring at 0. Returns true if this killed.
    pub fn take_damage(&mut self, damage: i32) -> bool {
        self.hp = (self.hp - damage).max(0);
        self.is_dead()
    }

    /// Restore up to `amount` hp without passing `max_hp`.
    /// Returns the hp actually gained.
    pub fn heal(&mut self, amount: i32) -> i32 {
        let before = self.hp;
        self.hp = (self.hp + amount).min(self.max_hp);
        self.hp - before
    }
}

/// Damage the player deals in melee
pub const fn player_damage(attack: i32) -> i32 {
    if attack > 1 { attack } else { 1 }
}

/// Damage an enemy deals to a defender
pub const fn enemy_damage(attack: i32, defense: i32) -> i32 {
    let raw = attack - defense;
    if raw > 1 { raw } else { 1 }
}

/// Outcome of one melee blow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitResult {
    /// Target survived with this much hp left
    Wounded { damage: i32, remaining: i32 },
    /// Target dropped to 0
    Killed { damage: i32 },
}

/// Apply a blow to `target`
pub fn strike(target: &mut Stats, damage: i32) -> HitResult {
    if target.take_damage(damage) {
        HitResult::Killed { damage }
    } else {
        HitResult::Wounded {
            damage,
            remaining: target.hp,
        }
    }
}
