//! Default game constants
//!
//! These seed `GameConfig::default()`; every one of them can be overridden
//! from a config file.

/// Map dimensions
pub const MAP_WIDTH: usize = 25;
pub const MAP_HEIGHT: usize = 20;

/// Number of levels; reaching the exit of the last one wins the run
pub const MAX_LEVELS: u32 = 10;

/// Scoring
pub const POINTS_PER_KILL: u64 = 50;
pub const POINTS_PER_LEVEL: u64 = 100;

/// Starting player stats
pub const INITIAL_PLAYER_HP: i32 = 100;
pub const INITIAL_PLAYER_ATK: i32 = 5;
pub const INITIAL_PLAYER_DEF: i32 = 0;

/// Fraction of the map the random walk carves into floor
pub const FLOOR_FILL: f64 = 0.45;

/// Enemy count per level is `floor(ENEMY_BASE + ENEMIES_PER_LEVEL * level)`
pub const ENEMY_BASE: f64 = 3.0;
pub const ENEMIES_PER_LEVEL: f64 = 1.5;

/// Items per level, inclusive range
pub const ITEM_COUNT_MIN: u32 = 2;
pub const ITEM_COUNT_MAX: u32 = 4;

/// Samples tried per spawn slot before the slot is dropped
pub const SPAWN_ATTEMPTS: u32 = 50;

/// Manhattan distance at which enemies start chasing the player
pub const AGGRO_RANGE: i32 = 6;

/// Enemy scaling: +10% hp per level, +1 attack every 2 levels
pub const ENEMY_HP_GROWTH_PERCENT: i32 = 10;
pub const ENEMY_ATTACK_GROWTH_LEVELS: i32 = 2;

/// Item scaling: heals +5 per level, stat boosts +1 every 3 levels
pub const HEAL_GROWTH_PER_LEVEL: i32 = 5;
pub const STAT_GROWTH_LEVELS: i32 = 3;

/// Messages kept in the run log
pub const MESSAGE_HISTORY: usize = 100;

/// How long a damage/heal flash stays raised, in milliseconds
pub const FLASH_WINDOW_MS: u64 = 300;

/// Display glyphs
pub const PLAYER_SYM: char = '@';
pub const ITEM_SYM: char = '$';
pub const S_WALL: char = '#';
pub const S_FLOOR: char = '.';
pub const S_EXIT: char = '>';
pub const S_START: char = '<';
