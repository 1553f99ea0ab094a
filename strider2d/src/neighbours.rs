//! Per-frame cache of the tiles near the player.
//!
//! The collision resolver only ever looks at this subset, so each frame is
//! O(neighbours) instead of O(all tiles). The rebuild itself is the one
//! O(total tiles) scan per frame, acceptable for maps of modest size, and
//! the place to revisit first if level sizes grow.

use std::collections::HashMap;

use crate::grid::{Tile, TileGrid, TileId};
use crate::math::Rect;

/// Index of tiles within one tile-size of the player, keyed by stable tile
/// id. Holds arena slots only; `TileGrid` remains sole owner of the tiles.
#[derive(Debug, Default)]
pub struct NeighbourIndex {
    entries: HashMap<TileId, usize>,
}

impl NeighbourIndex {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Recomputes the index for the player's current rect: entries whose
    /// tile left the proximity window are dropped, newly-proximate tiles
    /// are added. A tile is proximate when its bounding-box center lies in
    /// `player_rect` inflated by one tile size on each side (inclusive).
    ///
    /// Any tile absent from the index has its nearest edge more than half a
    /// tile away from the body; per-frame displacement is clamped to half a
    /// tile, so every tile the player could reach this frame is present.
    pub fn rebuild(&mut self, player_rect: &Rect, grid: &TileGrid) {
        let window = player_rect.inflate(grid.tile_size(), grid.tile_size());

        self.entries.retain(|id, _| {
            grid.by_id(*id)
                .is_some_and(|t| window.contains_point(t.rect().center()))
        });
        for (slot, tile) in grid.tiles().iter().enumerate() {
            if window.contains_point(tile.rect().center()) {
                self.entries.insert(tile.id(), slot);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: TileId) -> bool {
        self.entries.contains_key(&id)
    }

    /// Iterates the indexed tiles, borrowing them back from the grid.
    pub fn tiles<'a>(&'a self, grid: &'a TileGrid) -> impl Iterator<Item = &'a Tile> + 'a {
        self.entries
            .values()
            .filter_map(move |&slot| grid.tiles().get(slot))
    }
}
