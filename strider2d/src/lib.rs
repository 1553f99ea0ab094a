//! Strider2D - a tile-grid platformer movement and collision core.
//!
//! Headless by design: the embedding game supplies input state and frame
//! time, and consumes committed rects plus a camera offset for drawing.

pub mod camera;
pub mod collision;
pub mod config;
pub mod grid;
pub mod input;
pub mod level;
pub mod math;
pub mod neighbours;
pub mod player;
pub mod world;

pub use crate::camera::{Camera, CameraMode, VerticalFollow};
pub use crate::collision::Axis;
pub use crate::config::{ConfigError, CoreConfig};
pub use crate::grid::{GridCoord, Tile, TileGrid, TileId};
pub use crate::input::{Action, ActionState};
pub use crate::level::{Level, LevelFormatError};
pub use crate::math::{Rect, Vec2};
pub use crate::neighbours::NeighbourIndex;
pub use crate::player::{Facing, HorizontalMode, KinematicBody, VerticalMode};
pub use crate::world::GameWorld;
