//! Map tiles

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::consts::{S_EXIT, S_FLOOR, S_WALL};

/// A single map cell. Fixed once a level is generated.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
pub enum Tile {
    #[default]
    Wall,
    Floor,
    Exit,
}

impl Tile {
    /// Classic ASCII glyph
    pub const fn to_char(self) -> char {
        match self {
            Tile::Wall => S_WALL,
            Tile::Floor => S_FLOOR,
            Tile::Exit => S_EXIT,
        }
    }

    /// Inverse of `to_char`
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            S_WALL => Some(Tile::Wall),
            S_FLOOR => Some(Tile::Floor),
            S_EXIT => Some(Tile::Exit),
            _ => None,
        }
    }

    /// Anything but a wall can be stood on
    pub const fn is_walkable(self) -> bool {
        !matches!(self, Tile::Wall)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_glyph_roundtrip() {
        for tile in Tile::iter() {
            assert_eq!(Tile::from_char(tile.to_char()), Some(tile));
        }
        assert_eq!(Tile::from_char('?'), None);
    }

    #[test]
    fn test_walkable() {
        assert!(!Tile::Wall.is_walkable());
        assert!(Tile::Floor.is_walkable());
        assert!(Tile::Exit.is_walkable());
    }
}
