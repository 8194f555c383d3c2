//! Game configuration
//!
//! Every tunable the engine uses: map size, level count, starting stats,
//! scoring, scaling rules and the enemy/item catalogs. Missing fields in a
//! config file fall back to the defaults in `consts`.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;
use crate::monster::{Species, default_species};
use crate::object::{ItemDef, default_items};

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // Map
    pub width: usize,
    pub height: usize,
    pub floor_fill: f64,

    // Run
    pub max_levels: u32,
    pub kill_bonus: u64,
    pub level_bonus: u64,

    // Player
    pub player_hp: i32,
    pub player_attack: i32,
    pub player_defense: i32,

    // Spawning
    pub enemy_base: f64,
    pub enemies_per_level: f64,
    pub item_count_min: u32,
    pub item_count_max: u32,
    pub spawn_attempts: u32,

    // Scaling
    pub enemy_hp_growth_percent: i32,
    pub enemy_attack_growth_levels: i32,
    pub heal_growth_per_level: i32,
    pub stat_growth_levels: i32,

    // AI
    pub aggro_range: i32,

    // Presentation
    pub message_history: usize,
    pub flash_window_ms: u64,

    // Catalogs
    pub species: Vec<Species>,
    pub items: Vec<ItemDef>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: MAP_WIDTH,
            height: MAP_HEIGHT,
            floor_fill: FLOOR_FILL,

            max_levels: MAX_LEVELS,
            kill_bonus: POINTS_PER_KILL,
            level_bonus: POINTS_PER_LEVEL,

            player_hp: INITIAL_PLAYER_HP,
            player_attack: INITIAL_PLAYER_ATK,
            player_defense: INITIAL_PLAYER_DEF,

            enemy_base: ENEMY_BASE,
            enemies_per_level: ENEMIES_PER_LEVEL,
            item_count_min: ITEM_COUNT_MIN,
            item_count_max: ITEM_COUNT_MAX,
            spawn_attempts: SPAWN_ATTEMPTS,

            enemy_hp_growth_percent: ENEMY_HP_GROWTH_PERCENT,
            enemy_attack_growth_levels: ENEMY_ATTACK_GROWTH_LEVELS,
            heal_growth_per_level: HEAL_GROWTH_PER_LEVEL,
            stat_growth_levels: STAT_GROWTH_LEVELS,

            aggro_range: AGGRO_RANGE,

            message_history: MESSAGE_HISTORY,
            flash_window_ms: FLASH_WINDOW_MS,

            species: default_species(),
            items: default_items(),
        }
    }
}

impl GameConfig {
    /// Parse and validate a config from JSON text
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_json_str(&text)?;
        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Check that generation can terminate and every catalog draw succeeds
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width < 3 || self.height < 3 {
            return Err(ConfigError::MapTooSmall {
                width: self.width,
                height: self.height,
            });
        }

        let target = self.floor_target();
        let interior = self.interior_cells();
        if target < 3 || target > interior {
            return Err(ConfigError::UnreachableFill { target, interior });
        }

        if self.max_levels == 0 {
            return Err(ConfigError::NoLevels);
        }
        if self.player_hp <= 0 {
            return Err(ConfigError::InvalidPlayerHp(self.player_hp));
        }

        if self.species.is_empty() {
            return Err(ConfigError::EmptySpeciesCatalog);
        }
        if !self.species.iter().any(|s| s.min_level <= 1) {
            return Err(ConfigError::NoStarterSpecies);
        }
        if self.items.iter().all(|i| i.weight == 0) {
            return Err(ConfigError::EmptyItemCatalog);
        }
        if self.item_count_min > self.item_count_max {
            return Err(ConfigError::InvertedItemRange {
                min: self.item_count_min,
                max: self.item_count_max,
            });
        }

        if self.enemy_attack_growth_levels <= 0 {
            return Err(ConfigError::ZeroGrowthDivisor("enemy_attack_growth_levels"));
        }
        if self.stat_growth_levels <= 0 {
            return Err(ConfigError::ZeroGrowthDivisor("stat_growth_levels"));
        }

        Ok(())
    }

    /// Number of floor tiles the random walk carves
    pub fn floor_target(&self) -> usize {
        ((self.width * self.height) as f64 * self.floor_fill).floor() as usize
    }

    /// Cells inside the one-tile wall border
    pub fn interior_cells(&self) -> usize {
        self.width.saturating_sub(2) * self.height.saturating_sub(2)
    }

    /// Enemies requested for a level, before spawn collisions
    pub fn enemy_count(&self, level: u32) -> usize {
        (self.enemy_base + self.enemies_per_level * level as f64)
            .floor()
            .max(0.0) as usize
    }

    /// How long an hp flash stays visible
    pub fn flash_window(&self) -> Duration {
        Duration::from_millis(self.flash_window_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.floor_target(), 225);
        assert_eq!(config.interior_cells(), 23 * 18);
    }

    #[test]
    fn test_enemy_count_scaling() {
        let config = GameConfig::default();
        assert_eq!(config.enemy_count(1), 4);
        assert_eq!(config.enemy_count(2), 6);
        assert_eq!(config.enemy_count(3), 7);
        assert_eq!(config.enemy_count(10), 18);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = GameConfig::from_json_str(r#"{ "max_levels": 3, "kill_bonus": 10 }"#).unwrap();
        assert_eq!(config.max_levels, 3);
        assert_eq!(config.kill_bonus, 10);
        assert_eq!(config.width, MAP_WIDTH);
        assert_eq!(config.species.len(), 4);
        assert_eq!(config.items.len(), 5);
    }

    #[test]
    fn test_bad_json_is_parse_error() {
        let err = GameConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_overfull_map_rejected() {
        let config = GameConfig {
            floor_fill: 0.95,
            ..GameConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::UnreachableFill { .. })
        ));
    }

    #[test]
    fn test_tiny_map_rejected() {
        let config = GameConfig {
            width: 2,
            ..GameConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::MapTooSmall { .. })));
    }

    #[test]
    fn test_catalog_checks() {
        let mut config = GameConfig::default();
        for item in &mut config.items {
            item.weight = 0;
        }
        assert!(matches!(config.validate(), Err(ConfigError::EmptyItemCatalog)));

        let mut config = GameConfig::default();
        for species in &mut config.species {
            species.min_level = 2;
        }
        assert!(matches!(config.validate(), Err(ConfigError::NoStarterSpecies)));

        let config = GameConfig {
            species: Vec::new(),
            ..GameConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::EmptySpeciesCatalog)));
    }

    #[test]
    fn test_inverted_item_range_rejected() {
        let config = GameConfig {
            item_count_min: 5,
            item_count_max: 1,
            ..GameConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvertedItemRange { min: 5, max: 1 })
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = GameConfig::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
