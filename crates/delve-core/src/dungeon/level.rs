//! Level map structure

use serde::{Deserialize, Serialize};

use super::{Position, Tile};
use crate::consts::S_START;
use crate::error::MapParseError;

/// A generated level: tile grid, start, exit and spawn points.
///
/// `grid[y][x]`; every cell is defined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dungeon {
    pub width: usize,
    pub height: usize,
    pub grid: Vec<Vec<Tile>>,
    pub start: Position,
    pub exit: Position,
    pub enemy_spawns: Vec<Position>,
    pub item_spawns: Vec<Position>,
}

impl Dungeon {
    /// A solid block of wall, used before a run starts
    pub fn blank(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            grid: vec![vec![Tile::Wall; width]; height],
            start: Position::default(),
            exit: Position::default(),
            enemy_spawns: Vec::new(),
            item_spawns: Vec::new(),
        }
    }

    /// Build a level from ASCII rows.
    ///
    /// `#` wall, `.` floor, `>` exit, `<` start (a floor cell). Without a
    /// `<` the first floor cell in reading order is the start. Spawn lists
    /// are left empty.
    pub fn from_rows(rows: &[&str]) -> Result<Self, MapParseError> {
        let first = rows.first().ok_or(MapParseError::Empty)?;
        let width = first.chars().count();
        let mut grid = Vec::with_capacity(rows.len());
        let mut start = None;
        let mut first_floor = None;
        let mut exit = None;

        for (y, row) in rows.iter().enumerate() {
            let found = row.chars().count();
            if found != width {
                return Err(MapParseError::RaggedRow {
                    row: y,
                    expected: width,
                    found,
                });
            }
            let mut cells = Vec::with_capacity(width);
            for (x, glyph) in row.chars().enumerate() {
                let pos = Position::new(x as i32, y as i32);
                let tile = if glyph == S_START {
                    start = Some(pos);
                    Tile::Floor
                } else {
                    Tile::from_char(glyph).ok_or(MapParseError::UnknownGlyph { glyph, x, y })?
                };
                match tile {
                    Tile::Floor if first_floor.is_none() => first_floor = Some(pos),
                    Tile::Exit => exit = Some(pos),
                    _ => {}
                }
                cells.push(tile);
            }
            grid.push(cells);
        }

        let exit = exit.ok_or(MapParseError::MissingExit)?;
        let start = start.or(first_floor).ok_or(MapParseError::MissingStart)?;

        Ok(Self {
            width,
            height: rows.len(),
            grid,
            start,
            exit,
            enemy_spawns: Vec::new(),
            item_spawns: Vec::new(),
        })
    }

    /// Check if a position lies on the map
    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    /// Tile at `pos`, or None off the map
    pub fn tile(&self, pos: Position) -> Option<Tile> {
        if !self.in_bounds(pos) {
            return None;
        }
        Some(self.grid[pos.y as usize][pos.x as usize])
    }

    /// Set the tile at `pos`; ignored off the map
    pub fn set_tile(&mut self, pos: Position, tile: Tile) {
        if self.in_bounds(pos) {
            self.grid[pos.y as usize][pos.x as usize] = tile;
        }
    }

    /// In bounds and not a wall
    pub fn is_walkable(&self, pos: Position) -> bool {
        self.tile(pos).is_some_and(Tile::is_walkable)
    }

    /// Number of non-wall cells
    pub fn open_cells(&self) -> usize {
        self.grid
            .iter()
            .flatten()
            .filter(|t| t.is_walkable())
            .count()
    }

    /// Render the bare tiles with entity glyphs laid over them
    pub fn render_with(&self, overlay: &[(Position, char)]) -> String {
        let mut rows: Vec<Vec<char>> = self
            .grid
            .iter()
            .map(|row| row.iter().map(|t| t.to_char()).collect())
            .collect();
        for &(pos, glyph) in overlay {
            if self.in_bounds(pos) {
                rows[pos.y as usize][pos.x as usize] = glyph;
            }
        }
        rows.into_iter()
            .map(|r| r.into_iter().collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl core::fmt::Display for Dungeon {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        for row in &self.grid {
            for tile in row {
                write!(f, "{}", tile.to_char())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
