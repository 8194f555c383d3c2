//! Error types
//!
//! Turn processing has no failure modes; errors only come from loading a
//! configuration or parsing a hand-written map.

use thiserror::Error;

/// Problems with a `GameConfig`
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Map must be at least 3x3, got {width}x{height}")]
    MapTooSmall { width: usize, height: usize },

    #[error("Floor target {target} does not fit the {interior} interior cells (need room for start, exit and a spawn)")]
    UnreachableFill { target: usize, interior: usize },

    #[error("max_levels must be at least 1")]
    NoLevels,

    #[error("Starting hp must be positive, got {0}")]
    InvalidPlayerHp(i32),

    #[error("Species catalog is empty")]
    EmptySpeciesCatalog,

    #[error("No species is unlocked at level 1")]
    NoStarterSpecies,

    #[error("Item catalog is empty or every item has zero weight")]
    EmptyItemCatalog,

    #[error("Item count range is inverted: {min} > {max}")]
    InvertedItemRange { min: u32, max: u32 },

    #[error("Growth divisor '{0}' must be positive")]
    ZeroGrowthDivisor(&'static str),
}

/// Problems with an ASCII map
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MapParseError {
    #[error("Map has no rows")]
    Empty,

    #[error("Row {row} has width {found}, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Unknown map glyph '{glyph}' at ({x}, {y})")]
    UnknownGlyph { glyph: char, x: usize, y: usize },

    #[error("Map has no exit")]
    MissingExit,

    #[error("Map has no floor to start on")]
    MissingStart,
}
