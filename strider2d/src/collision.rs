//! Axis-sweep collision resolution against the neighbour index.
//!
//! The resolver answers one question per call: given a signed displacement
//! along a single axis, how far can the body move before a solid tile blocks
//! it? Callers resolve one axis at a time, horizontal before vertical.
//! Downward motion (+y in screen space) resolves against tile tops, upward
//! motion against tile bottoms. With nothing in the way the request passes
//! through unchanged.

use crate::grid::{TileGrid, TileId};
use crate::math::{Rect, Vec2};
use crate::neighbours::NeighbourIndex;

/// The axis a displacement is resolved on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// Clamps `distance` (signed, along `axis`) so that the body's swept rect
/// never overlaps a solid tile. The result has the same sign as the request
/// and magnitude in `[0, |distance|]`; a blocked move leaves the body's
/// leading edge flush with the tile's trailing edge.
pub fn resolve(
    axis: Axis,
    distance: f32,
    body: &Rect,
    index: &NeighbourIndex,
    grid: &TileGrid,
) -> f32 {
    if distance == 0.0 {
        return 0.0;
    }
    let sign = distance.signum();
    let mut allowed = distance.abs();

    let delta = match axis {
        Axis::X => Vec2::new(distance, 0.0),
        Axis::Y => Vec2::new(0.0, distance),
    };
    let swept = sweep(body, delta);

    for tile in index.tiles(grid) {
        if !swept.overlaps(tile.rect()) {
            continue;
        }
        allowed = allowed.min(flush_distance(axis, sign, body, tile.rect()));

        // Two flush tiles leave no seam, but resolving against only the one
        // whose rect the sweep happened to hit first can let a fast body
        // squeeze past the shared edge. Probe the arena-adjacent tile in the
        // direction of travel as well.
        if axis == Axis::X {
            if let Some(adjacent) = arena_adjacent(tile.id(), sign, grid) {
                if swept.overlaps(adjacent) {
                    allowed = allowed.min(flush_distance(axis, sign, body, adjacent));
                }
            }
        }
    }

    allowed.max(0.0) * sign
}

/// The body's bounding box swept along `delta`.
fn sweep(body: &Rect, delta: Vec2) -> Rect {
    Rect::new(
        body.x + delta.x.min(0.0),
        body.y + delta.y.min(0.0),
        body.w + delta.x.abs(),
        body.h + delta.y.abs(),
    )
}

/// Distance that leaves the body's leading edge touching the tile's
/// trailing edge. Negative when the rects already overlap; the caller
/// clamps that to zero.
fn flush_distance(axis: Axis, sign: f32, body: &Rect, tile: &Rect) -> f32 {
    match (axis, sign > 0.0) {
        (Axis::X, true) => tile.left() - body.right(),
        (Axis::X, false) => body.left() - tile.right(),
        (Axis::Y, true) => tile.top() - body.bottom(),
        (Axis::Y, false) => body.top() - tile.bottom(),
    }
}

fn arena_adjacent(id: TileId, sign: f32, grid: &TileGrid) -> Option<&Rect> {
    let adjacent = if sign > 0.0 { Some(id.next()) } else { id.prev() };
    adjacent.and_then(|id| grid.by_id(id)).map(|t| t.rect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GridCoord;

    fn build(columns: usize, rows: usize, cells: &[GridCoord], body: &Rect) -> (TileGrid, NeighbourIndex) {
        let grid = TileGrid::new(columns, rows, 32.0, cells);
        let mut index = NeighbourIndex::new();
        index.rebuild(body, &grid);
        (grid, index)
    }

    #[test]
    fn clear_path_passes_the_request_through() {
        let body = Rect::new(0.0, 0.0, 24.0, 32.0);
        let (grid, index) = build(10, 3, &[GridCoord::new(9, 2)], &body);
        assert_eq!(resolve(Axis::X, 20.0, &body, &index, &grid), 20.0);
        assert_eq!(resolve(Axis::Y, -15.0, &body, &index, &grid), -15.0);
    }

    #[test]
    fn rightward_move_stops_flush_with_the_tile() {
        let body = Rect::new(0.0, 0.0, 24.0, 32.0);
        let (grid, index) = build(2, 1, &[GridCoord::new(1, 0)], &body);
        let allowed = resolve(Axis::X, 20.0, &body, &index, &grid);
        assert_eq!(allowed, 8.0);
        // Flush is touching, not overlapping.
        let moved = body.translate(Vec2::new(allowed, 0.0));
        assert!(!moved.overlaps(grid.tiles()[0].rect()));
    }

    #[test]
    fn leftward_move_stops_flush_with_the_tile() {
        let body = Rect::new(40.0, 0.0, 24.0, 32.0);
        let (grid, index) = build(2, 1, &[GridCoord::new(0, 0)], &body);
        assert_eq!(resolve(Axis::X, -20.0, &body, &index, &grid), -8.0);
    }

    #[test]
    fn downward_move_resolves_against_tile_tops() {
        let grid = TileGrid::new(1, 2, 32.0, &[GridCoord::new(0, 1)]);
        let body = Rect::new(4.0, 0.0, 24.0, 24.0);
        index_for(&body, &grid, |index| {
            assert_eq!(resolve(Axis::Y, 50.0, &body, index, &grid), 8.0);
        });
    }

    #[test]
    fn upward_move_resolves_against_tile_bottoms() {
        let grid = TileGrid::new(1, 3, 32.0, &[GridCoord::new(0, 0)]);
        let body = Rect::new(4.0, 48.0, 24.0, 32.0);
        index_for(&body, &grid, |index| {
            assert_eq!(resolve(Axis::Y, -40.0, &body, index, &grid), -16.0);
        });
    }

    #[test]
    fn never_returns_more_than_requested_nor_negative() {
        let grid = TileGrid::new(3, 1, 32.0, &[GridCoord::new(1, 0)]);
        // Body already flush with the tile's left edge.
        let body = Rect::new(8.0, 0.0, 24.0, 32.0);
        index_for(&body, &grid, |index| {
            assert_eq!(resolve(Axis::X, 10.0, &body, index, &grid), 0.0);
            assert_eq!(resolve(Axis::X, 0.0, &body, index, &grid), 0.0);
        });
    }

    #[test]
    fn flush_tile_pair_does_not_let_the_body_squeeze_through() {
        // Two flush tiles; a sweep that crosses the shared edge must stop at
        // the first tile's leading edge, not the second's.
        let grid = TileGrid::new(4, 1, 32.0, &[GridCoord::new(2, 0), GridCoord::new(3, 0)]);
        let body = Rect::new(30.0, 0.0, 24.0, 32.0);
        index_for(&body, &grid, |index| {
            let allowed = resolve(Axis::X, 60.0, &body, index, &grid);
            assert_eq!(allowed, 64.0 - body.right());
        });
    }

    fn index_for(body: &Rect, grid: &TileGrid, f: impl FnOnce(&NeighbourIndex)) {
        let mut index = NeighbourIndex::new();
        index.rebuild(body, grid);
        f(&index);
    }
}
