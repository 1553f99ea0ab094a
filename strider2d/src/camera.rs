//! Scroll camera tracking the player across the tile map.

use serde::{Deserialize, Serialize};

use crate::math::{Rect, Vec2};

/// Scrolling mode, fixed at construction from the map extent: a map no
/// wider than the viewport never scrolls.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CameraMode {
    Static,
    Follow,
}

/// Whether the camera tracks the player vertically. The horizontal rules
/// are the same either way.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerticalFollow {
    /// Camera y stays at 0.
    Fixed,
    /// Camera centers vertically on the player, clamped to the map.
    Centered,
}

/// Derives a scroll offset from the player position each frame. No state
/// persists between frames besides the mode; there is no smoothing.
#[derive(Clone, Copy, Debug)]
pub struct Camera {
    mode: CameraMode,
    vertical: VerticalFollow,
    viewport: Vec2,
    map_extent: Vec2,
    offset: Vec2,
}

impl Camera {
    pub fn new(map_extent: Vec2, viewport: Vec2, vertical: VerticalFollow) -> Self {
        let mode = if map_extent.x <= viewport.x {
            CameraMode::Static
        } else {
            CameraMode::Follow
        };
        Self {
            mode,
            vertical,
            viewport,
            map_extent,
            offset: Vec2::ZERO,
        }
    }

    /// Recomputes the offset for the player's committed rect.
    ///
    /// In Follow mode the x offset is 0 while the player is within the
    /// first half-viewport, tracks the player's center through the middle
    /// of the map, and pins to `map_width - viewport_width` near the right
    /// edge.
    pub fn recompute(&mut self, player_rect: &Rect) {
        let x = match self.mode {
            CameraMode::Static => 0.0,
            CameraMode::Follow => {
                let center_x = player_rect.center().x;
                let half = self.viewport.x / 2.0;
                if center_x <= half {
                    0.0
                } else if center_x < self.map_extent.x - half {
                    center_x - half
                } else {
                    self.map_extent.x - self.viewport.x
                }
            }
        };
        let y = match self.vertical {
            VerticalFollow::Fixed => 0.0,
            VerticalFollow::Centered => {
                let max = (self.map_extent.y - self.viewport.y).max(0.0);
                (player_rect.center().y - self.viewport.y / 2.0).clamp(0.0, max)
            }
        };
        self.offset = Vec2::new(x, y);
    }

    pub fn mode(&self) -> CameraMode {
        self.mode
    }

    /// Current scroll offset. Renderers subtract this from world positions.
    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    /// The world-space rect currently visible; everything outside it can be
    /// skipped when drawing.
    pub fn cull_rect(&self) -> Rect {
        Rect::new(self.offset.x, self.offset.y, self.viewport.x, self.viewport.y)
    }
}
