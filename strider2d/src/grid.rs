//! Immutable tile grid for a loaded level.
//!
//! Tiles live in an arena (`Vec<Tile>`) owned by `TileGrid` for the lifetime
//! of the level. Ids are assigned in row-major placement order, so a tile's
//! id doubles as its arena slot.

use crate::math::{Rect, Vec2};

/// A cell position in the grid (grid coordinates, not pixels).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GridCoord {
    pub x: i32,
    pub y: i32,
}

impl GridCoord {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Stable identifier for a placed solid tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TileId(u32);

impl TileId {
    pub fn to_u32(self) -> u32 {
        self.0
    }

    /// Id of the tile placed immediately after this one, if any was.
    pub fn next(self) -> TileId {
        TileId(self.0 + 1)
    }

    /// Id of the tile placed immediately before this one.
    pub fn prev(self) -> Option<TileId> {
        self.0.checked_sub(1).map(TileId)
    }
}

/// One solid world cell. Created at level load, never mutated.
#[derive(Clone, Copy, Debug)]
pub struct Tile {
    id: TileId,
    coord: GridCoord,
    rect: Rect,
}

impl Tile {
    pub fn id(&self) -> TileId {
        self.id
    }

    pub fn coord(&self) -> GridCoord {
        self.coord
    }

    /// The tile's pixel bounding box.
    pub fn rect(&self) -> &Rect {
        &self.rect
    }
}

/// The static set of solid tiles of a level, plus the level's extent.
#[derive(Clone, Debug)]
pub struct TileGrid {
    columns: usize,
    rows: usize,
    tile_size: f32,
    tiles: Vec<Tile>,
}

impl TileGrid {
    /// Builds a grid from solid-cell coordinates, assigning row-major ids in
    /// the order given. `columns`/`rows` fix the level extent even when the
    /// outermost cells are empty.
    pub fn new(columns: usize, rows: usize, tile_size: f32, solid_cells: &[GridCoord]) -> Self {
        let tiles = solid_cells
            .iter()
            .enumerate()
            .map(|(i, &coord)| Tile {
                id: TileId(i as u32),
                coord,
                rect: Rect::new(
                    coord.x as f32 * tile_size,
                    coord.y as f32 * tile_size,
                    tile_size,
                    tile_size,
                ),
            })
            .collect();
        Self {
            columns,
            rows,
            tile_size,
            tiles,
        }
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn tile_size(&self) -> f32 {
        self.tile_size
    }

    /// Level width in pixels. Fixes the world bound used by the camera and
    /// by horizontal movement clamping.
    pub fn pixel_width(&self) -> f32 {
        self.columns as f32 * self.tile_size
    }

    /// Level height in pixels.
    pub fn pixel_height(&self) -> f32 {
        self.rows as f32 * self.tile_size
    }

    /// All solid tiles in placement order.
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Looks up a tile by its stable id.
    pub fn by_id(&self, id: TileId) -> Option<&Tile> {
        self.tiles.get(id.0 as usize)
    }

    /// Converts a pixel position to the grid cell containing it.
    pub fn world_to_grid(&self, world_pos: Vec2) -> GridCoord {
        GridCoord {
            x: (world_pos.x / self.tile_size).floor() as i32,
            y: (world_pos.y / self.tile_size).floor() as i32,
        }
    }

    /// Pixel position of a cell's top-left corner.
    pub fn grid_to_world(&self, coord: GridCoord) -> Vec2 {
        Vec2::new(
            coord.x as f32 * self.tile_size,
            coord.y as f32 * self.tile_size,
        )
    }

    /// The solid tile directly beneath `rect`, probing from the feet down to
    /// the bottom of the playfield. A tile the feet already graze by less
    /// than half a pixel (float accumulation) still counts. Ties on height
    /// resolve to the earliest placed tile. Returns `None` over a
    /// bottomless drop.
    pub fn closest_ground(&self, rect: &Rect) -> Option<&Tile> {
        self.tiles
            .iter()
            .filter(|t| {
                t.rect.left() < rect.right()
                    && t.rect.right() > rect.left()
                    && t.rect.top() >= rect.bottom() - 0.5
            })
            .min_by(|a, b| {
                a.rect
                    .top()
                    .partial_cmp(&b.rect.top())
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_3x2() -> TileGrid {
        // Solid bottom row of a 3x2 level.
        TileGrid::new(
            3,
            2,
            32.0,
            &[
                GridCoord::new(0, 1),
                GridCoord::new(1, 1),
                GridCoord::new(2, 1),
            ],
        )
    }

    #[test]
    fn ids_follow_placement_order() {
        let grid = grid_3x2();
        for (i, tile) in grid.tiles().iter().enumerate() {
            assert_eq!(tile.id().to_u32(), i as u32);
            assert_eq!(grid.by_id(tile.id()).map(|t| t.coord()), Some(tile.coord()));
        }
    }

    #[test]
    fn pixel_extent_covers_empty_cells() {
        let grid = grid_3x2();
        assert_eq!(grid.pixel_width(), 96.0);
        assert_eq!(grid.pixel_height(), 64.0);
    }

    #[test]
    fn world_to_grid_floors() {
        let grid = grid_3x2();
        assert_eq!(grid.world_to_grid(Vec2::new(31.9, 0.0)), GridCoord::new(0, 0));
        assert_eq!(grid.world_to_grid(Vec2::new(32.0, 33.0)), GridCoord::new(1, 1));
    }

    #[test]
    fn closest_ground_picks_highest_tile_below() {
        let grid = TileGrid::new(
            1,
            4,
            32.0,
            &[GridCoord::new(0, 3), GridCoord::new(0, 2)],
        );
        let body = Rect::new(4.0, 0.0, 24.0, 32.0);
        let ground = grid.closest_ground(&body).expect("tile below");
        assert_eq!(ground.coord(), GridCoord::new(0, 2));
    }

    #[test]
    fn closest_ground_ignores_tiles_above_the_feet() {
        let grid = TileGrid::new(1, 4, 32.0, &[GridCoord::new(0, 0)]);
        let body = Rect::new(4.0, 64.0, 24.0, 32.0);
        assert!(grid.closest_ground(&body).is_none());
    }
}
