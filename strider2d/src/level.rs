//! Level parsing: a rectangular grid of integer tile codes becomes a
//! `TileGrid` plus a spawn position.
//!
//! Codes: `0` empty, `1` player spawn, anything `>= 2` a solid tile. Two
//! serializations are accepted (whitespace/comma-delimited text rows and a
//! JSON array of arrays) since the contract only requires row/column
//! integers and a single spawn marker.

use thiserror::Error;

use crate::grid::{GridCoord, TileGrid};
use crate::math::Vec2;

/// Fatal level-load failures. No partial level is constructed.
#[derive(Debug, Error)]
pub enum LevelFormatError {
    #[error("level grid is empty")]
    Empty,
    #[error("row {row} has {found} cells, expected {expected}")]
    NonRectangular {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("unreadable tile code {token:?} at row {row}, column {col}")]
    InvalidToken {
        row: usize,
        col: usize,
        token: String,
    },
    #[error("level has no spawn cell")]
    MissingSpawn,
    #[error("second spawn cell at row {row}, column {col}")]
    DuplicateSpawn { row: usize, col: usize },
    #[error("invalid JSON level: {0}")]
    Json(#[from] serde_json::Error),
}

/// A loaded level: the solid-tile grid and the spawn cell's pixel position
/// (top-left corner of the spawn cell).
#[derive(Clone, Debug)]
pub struct Level {
    grid: TileGrid,
    spawn: Vec2,
}

impl Level {
    /// Parses a delimited text grid, one row per line. Tokens may be
    /// separated by spaces, tabs, or commas; blank lines are skipped.
    pub fn parse(text: &str, tile_size: f32) -> Result<Self, LevelFormatError> {
        let mut rows: Vec<Vec<u32>> = Vec::new();
        for (row_index, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let mut row = Vec::new();
            for (col_index, token) in line
                .split(|c: char| c.is_whitespace() || c == ',')
                .filter(|t| !t.is_empty())
                .enumerate()
            {
                let code = token
                    .parse::<u32>()
                    .map_err(|_| LevelFormatError::InvalidToken {
                        row: row_index,
                        col: col_index,
                        token: token.to_string(),
                    })?;
                row.push(code);
            }
            rows.push(row);
        }
        Self::from_rows(&rows, tile_size)
    }

    /// Parses a JSON array-of-arrays of tile codes.
    pub fn from_json(json: &str, tile_size: f32) -> Result<Self, LevelFormatError> {
        let rows: Vec<Vec<u32>> = serde_json::from_str(json)?;
        Self::from_rows(&rows, tile_size)
    }

    /// Builds a level from already-decoded rows of tile codes.
    pub fn from_rows(rows: &[Vec<u32>], tile_size: f32) -> Result<Self, LevelFormatError> {
        if rows.is_empty() || rows[0].is_empty() {
            return Err(LevelFormatError::Empty);
        }
        let columns = rows[0].len();

        let mut solid_cells = Vec::new();
        let mut spawn_cell: Option<GridCoord> = None;

        for (row_index, row) in rows.iter().enumerate() {
            if row.len() != columns {
                return Err(LevelFormatError::NonRectangular {
                    row: row_index,
                    expected: columns,
                    found: row.len(),
                });
            }
            for (col_index, &code) in row.iter().enumerate() {
                let coord = GridCoord::new(col_index as i32, row_index as i32);
                match code {
                    0 => {}
                    1 => {
                        if spawn_cell.is_some() {
                            return Err(LevelFormatError::DuplicateSpawn {
                                row: row_index,
                                col: col_index,
                            });
                        }
                        spawn_cell = Some(coord);
                    }
                    _ => solid_cells.push(coord),
                }
            }
        }

        let spawn_cell = spawn_cell.ok_or(LevelFormatError::MissingSpawn)?;
        let grid = TileGrid::new(columns, rows.len(), tile_size, &solid_cells);
        let spawn = grid.grid_to_world(spawn_cell);

        log::debug!(
            "level loaded: {}x{} cells, {} solid tiles, spawn at {:?}",
            columns,
            rows.len(),
            grid.tiles().len(),
            spawn
        );

        Ok(Self { grid, spawn })
    }

    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    pub fn spawn(&self) -> Vec2 {
        self.spawn
    }

    /// Consumes the level, handing out its parts.
    pub fn into_parts(self) -> (TileGrid, Vec2) {
        (self.grid, self.spawn)
    }
}
