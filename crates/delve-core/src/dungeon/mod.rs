//! Dungeon system
//!
//! Contains the tile grid, coordinates, and the cave generator.

mod generation;
mod level;
mod position;
mod tile;

pub use generation::generate_dungeon;
pub use level::Dungeon;
pub use position::{Direction, Position};
pub use tile::Tile;
