//! Enemy templates

use serde::{Deserialize, Serialize};

/// Base stats for one kind of enemy.
///
/// `min_level` is the first level at which the species can spawn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Species {
    pub name: String,
    pub glyph: char,
    pub hp: i32,
    pub attack: i32,
    pub min_level: u32,
}

impl Species {
    pub fn new(name: &str, glyph: char, hp: i32, attack: i32, min_level: u32) -> Self {
        Self {
            name: name.to_string(),
            glyph,
            hp,
            attack,
            min_level,
        }
    }
}

/// The stock bestiary, weakest first
pub fn default_species() -> Vec<Species> {
    vec![
        Species::new("Rat", 'r', 10, 2, 1),
        Species::new("Goblin", 'g', 20, 4, 3),
        Species::new("Orc", 'O', 40, 8, 5),
        Species::new("Demon", 'D', 80, 12, 8),
    ]
}

/// Indices of every species allowed on `level`
pub fn unlocked_tiers(catalog: &[Species], level: u32) -> Vec<usize> {
    catalog
        .iter()
        .enumerate()
        .filter(|(_, s)| s.min_level <= level)
        .map(|(idx, _)| idx)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_widens_at_thresholds() {
        let catalog = default_species();
        assert_eq!(unlocked_tiers(&catalog, 1), vec![0]);
        assert_eq!(unlocked_tiers(&catalog, 2), vec![0]);
        assert_eq!(unlocked_tiers(&catalog, 3), vec![0, 1]);
        assert_eq!(unlocked_tiers(&catalog, 4), vec![0, 1]);
        assert_eq!(unlocked_tiers(&catalog, 5), vec![0, 1, 2]);
        assert_eq!(unlocked_tiers(&catalog, 7), vec![0, 1, 2]);
        assert_eq!(unlocked_tiers(&catalog, 8), vec![0, 1, 2, 3]);
        assert_eq!(unlocked_tiers(&catalog, 10), vec![0, 1, 2, 3]);
    }
}
