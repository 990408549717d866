//! Tile grid and walkability oracle.
//!
//! Cells are either a bare [`TileKind`] or an object carrying a kind plus
//! free-form metadata (a chest's contents, a port's destination). Only the
//! kind drives walkability.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::components::Position;
use crate::error::{Result, TacticsError};

/// Tile type enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TileKind {
    /// Bare floor.
    #[default]
    Floor,
    /// Grass, floor-like.
    Grass,
    /// Shallow water.
    Water,
    /// Exit or zone transition.
    Port,
    /// Teleport pad.
    Portal,
    /// Hole that swallows whatever is pushed into it.
    Pitfall,
    /// Consumable pickup.
    Food,
    /// Weapon pickup.
    Weapon,
    /// Key pickup.
    Key,
    /// Solid wall.
    Wall,
    /// Boulder.
    Rock,
    /// Tree.
    Tree,
    /// Shrub.
    Shrub,
    /// Closed chest.
    Chest,
    /// Table or other furniture.
    Table,
}

impl TileKind {
    /// Returns true if actors may stand on this tile.
    #[must_use]
    pub const fn is_walkable(self) -> bool {
        matches!(
            self,
            Self::Floor
                | Self::Grass
                | Self::Water
                | Self::Port
                | Self::Portal
                | Self::Pitfall
                | Self::Food
                | Self::Weapon
                | Self::Key
        )
    }

    /// Returns true for walkable tiles that harm whoever ends up on them.
    #[must_use]
    pub const fn is_hazard(self) -> bool {
        matches!(self, Self::Pitfall)
    }

    /// Map an ASCII glyph to a tile kind.
    #[must_use]
    pub const fn from_glyph(glyph: char) -> Option<Self> {
        Some(match glyph {
            '.' => Self::Floor,
            ',' => Self::Grass,
            '~' => Self::Water,
            '>' => Self::Port,
            'O' => Self::Portal,
            '_' => Self::Pitfall,
            '%' => Self::Food,
            '/' => Self::Weapon,
            '-' => Self::Key,
            '#' => Self::Wall,
            '*' => Self::Rock,
            'T' => Self::Tree,
            '"' => Self::Shrub,
            '=' => Self::Chest,
            'n' => Self::Table,
            _ => return None,
        })
    }

    /// ASCII glyph for this tile kind.
    #[must_use]
    pub const fn glyph(self) -> char {
        match self {
            Self::Floor => '.',
            Self::Grass => ',',
            Self::Water => '~',
            Self::Port => '>',
            Self::Portal => 'O',
            Self::Pitfall => '_',
            Self::Food => '%',
            Self::Weapon => '/',
            Self::Key => '-',
            Self::Wall => '#',
            Self::Rock => '*',
            Self::Tree => 'T',
            Self::Shrub => '"',
            Self::Chest => '=',
            Self::Table => 'n',
        }
    }
}

/// A single grid cell.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cell {
    /// A bare tile.
    Tile(TileKind),
    /// A tile carrying extra data.
    Object {
        /// Tile kind that drives walkability.
        kind: TileKind,
        /// Free-form metadata owned by other systems.
        #[serde(default)]
        metadata: BTreeMap<String, String>,
    },
}

impl Cell {
    /// The tile kind of this cell.
    #[must_use]
    pub const fn kind(&self) -> TileKind {
        match self {
            Self::Tile(kind) | Self::Object { kind, .. } => *kind,
        }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::Tile(TileKind::Floor)
    }
}

impl From<TileKind> for Cell {
    fn from(kind: TileKind) -> Self {
        Self::Tile(kind)
    }
}

/// Rectangular tile grid stored in row-major order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawGrid")]
pub struct Grid {
    /// Grid width in cells.
    width: u32,
    /// Grid height in cells.
    height: u32,
    /// Cell data stored in row-major order.
    cells: Vec<Cell>,
}

/// Decoded grid fields before the dimensions are checked.
#[derive(Deserialize)]
struct RawGrid {
    width: u32,
    height: u32,
    cells: Vec<Cell>,
}

impl TryFrom<RawGrid> for Grid {
    type Error = TacticsError;

    fn try_from(raw: RawGrid) -> Result<Self> {
        if raw.width == 0 || raw.height == 0 {
            return Err(TacticsError::InvalidGrid("grid must not be empty".into()));
        }
        let expected = (raw.width as usize) * (raw.height as usize);
        if raw.cells.len() != expected {
            return Err(TacticsError::InvalidGrid(format!(
                "{} cells for a {}x{} grid",
                raw.cells.len(),
                raw.width,
                raw.height
            )));
        }
        Ok(Self {
            width: raw.width,
            height: raw.height,
            cells: raw.cells,
        })
    }
}

impl Grid {
    /// Create a new grid filled with floor.
    ///
    /// # Panics
    ///
    /// Panics if `width` or `height` is zero.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        assert!(width > 0, "Grid width must be positive");
        assert!(height > 0, "Grid height must be positive");

        let cell_count = (width as usize) * (height as usize);
        Self {
            width,
            height,
            cells: vec![Cell::default(); cell_count],
        }
    }

    /// Build a grid from ASCII rows, one glyph per cell.
    ///
    /// Unknown glyphs and ragged rows are rejected.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.as_ref().chars().count());
        if width == 0 || height == 0 {
            return Err(TacticsError::InvalidGrid("grid must not be empty".into()));
        }

        let mut cells = Vec::with_capacity(width * height);
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.chars().count() != width {
                return Err(TacticsError::InvalidGrid(format!(
                    "row {y} has {} cells, expected {width}",
                    row.chars().count()
                )));
            }
            for (x, glyph) in row.chars().enumerate() {
                let kind = TileKind::from_glyph(glyph).ok_or_else(|| {
                    TacticsError::InvalidGrid(format!("unknown glyph '{glyph}' at {x},{y}"))
                })?;
                cells.push(Cell::Tile(kind));
            }
        }

        Ok(Self {
            width: width as u32,
            height: height as u32,
            cells,
        })
    }

    /// Grid width in cells.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Grid height in cells.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Convert coordinates to a cell index, or `None` if out of bounds.
    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if self.in_bounds(x, y) {
            Some((y as usize) * (self.width as usize) + (x as usize))
        } else {
            None
        }
    }

    /// Check if coordinates are within grid bounds.
    #[must_use]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }

    /// Get the cell at coordinates.
    /// Returns `None` if out of bounds.
    #[must_use]
    pub fn get_tile(&self, x: i32, y: i32) -> Option<&Cell> {
        self.index(x, y).map(|index| &self.cells[index])
    }

    /// Tile kind at coordinates, if in bounds.
    #[must_use]
    pub fn kind_at(&self, x: i32, y: i32) -> Option<TileKind> {
        self.get_tile(x, y).map(Cell::kind)
    }

    /// Replace the cell at coordinates.
    /// Returns `false` if out of bounds.
    pub fn set_tile(&mut self, x: i32, y: i32, cell: impl Into<Cell>) -> bool {
        match self.index(x, y) {
            Some(index) => {
                self.cells[index] = cell.into();
                true
            }
            None => false,
        }
    }

    /// Walkability oracle: true if an actor may enter `(x, y)`.
    ///
    /// Out-of-bounds coordinates are never walkable.
    #[must_use]
    pub fn is_walkable(&self, x: i32, y: i32) -> bool {
        self.kind_at(x, y).is_some_and(TileKind::is_walkable)
    }

    /// [`is_walkable`](Self::is_walkable) for a position.
    #[must_use]
    pub fn is_walkable_at(&self, position: Position) -> bool {
        self.is_walkable(position.x, position.y)
    }

    /// Render the grid as ASCII rows.
    #[must_use]
    pub fn to_rows(&self) -> Vec<String> {
        self.cells
            .chunks(self.width as usize)
            .map(|row| row.iter().map(|cell| cell.kind().glyph()).collect())
            .collect()
    }
}

impl Default for Grid {
    /// Create a default 16x16 open grid.
    fn default() -> Self {
        Self::new(16, 16)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_creation() {
        let grid = Grid::new(10, 6);
        assert_eq!(grid.width(), 10);
        assert_eq!(grid.height(), 6);
        assert!(grid.is_walkable(9, 5));
    }

    #[test]
    fn test_out_of_bounds_is_not_walkable() {
        let grid = Grid::new(4, 4);
        assert!(!grid.is_walkable(-1, 0));
        assert!(!grid.is_walkable(0, -1));
        assert!(!grid.is_walkable(4, 0));
        assert!(!grid.is_walkable(0, 4));
        assert!(grid.get_tile(7, 7).is_none());
    }

    #[test]
    fn test_object_cells_use_their_kind() {
        let mut grid = Grid::new(3, 3);
        let mut metadata = BTreeMap::new();
        metadata.insert("loot".to_string(), "key".to_string());

        grid.set_tile(
            1,
            1,
            Cell::Object {
                kind: TileKind::Chest,
                metadata: metadata.clone(),
            },
        );
        assert!(!grid.is_walkable(1, 1));

        grid.set_tile(
            1,
            1,
            Cell::Object {
                kind: TileKind::Port,
                metadata,
            },
        );
        assert!(grid.is_walkable(1, 1));
    }

    #[test]
    fn test_allow_list() {
        for kind in [
            TileKind::Floor,
            TileKind::Water,
            TileKind::Pitfall,
            TileKind::Port,
            TileKind::Food,
        ] {
            assert!(kind.is_walkable(), "{kind:?} should be walkable");
        }
        for kind in [TileKind::Wall, TileKind::Rock, TileKind::Tree, TileKind::Chest] {
            assert!(!kind.is_walkable(), "{kind:?} should block");
        }
    }

    #[test]
    fn test_set_tile_out_of_bounds() {
        let mut grid = Grid::new(2, 2);
        assert!(!grid.set_tile(2, 0, TileKind::Wall));
        assert!(grid.set_tile(1, 0, TileKind::Wall));
        assert!(!grid.is_walkable(1, 0));
    }

    #[test]
    fn test_from_rows() {
        let grid = Grid::from_rows(&["..#", "~_.", "T.>"]).unwrap();
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.kind_at(2, 0), Some(TileKind::Wall));
        assert_eq!(grid.kind_at(1, 1), Some(TileKind::Pitfall));
        assert_eq!(grid.to_rows(), vec!["..#", "~_.", "T.>"]);
    }

    #[test]
    fn test_from_rows_rejects_bad_input() {
        assert!(Grid::from_rows(&["...", ".."]).is_err());
        assert!(Grid::from_rows(&["..?"]).is_err());
        assert!(Grid::from_rows::<&str>(&[]).is_err());
    }

    #[test]
    fn test_decode_round_trip() {
        let grid = Grid::from_rows(&["#..", "._#"]).unwrap();
        let bytes = bincode::serialize(&grid).unwrap();
        let decoded: Grid = bincode::deserialize(&bytes).unwrap();
        assert_eq!(decoded, grid);
    }

    #[test]
    fn test_decode_rejects_mismatched_cells() {
        let short = RawGrid {
            width: 3,
            height: 2,
            cells: vec![Cell::default(); 4],
        };
        assert!(matches!(
            Grid::try_from(short),
            Err(TacticsError::InvalidGrid(_))
        ));

        let mut grid = Grid::new(3, 2);
        grid.cells.pop();
        let bytes = bincode::serialize(&grid).unwrap();
        assert!(bincode::deserialize::<Grid>(&bytes).is_err());
    }

    #[test]
    fn test_decode_rejects_zero_width() {
        let empty = RawGrid {
            width: 0,
            height: 4,
            cells: Vec::new(),
        };
        assert!(Grid::try_from(empty).is_err());
    }
}
